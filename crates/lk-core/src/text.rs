//! Text rasterization collaborator.
//!
//! Font resolution and glyph shaping live outside the engine. A
//! `TextRasterizer` turns display text plus formatting into an RGBA bitmap;
//! `TextObject` calls it on every content or formatting change.

use crate::model::{Color, FontWeight, TextAlign, TextFormatting};
use image::{Rgba, RgbaImage};

/// Largest side, in pixels, of a bitmap produced by [`BlockRasterizer`].
///
/// Oversized or non-finite metrics clamp to this instead of attempting an
/// allocation that would abort the process.
pub const MAX_BITMAP_SIDE: u32 = 4096;

/// Renders display text (case transform already applied) to a bitmap.
pub trait TextRasterizer {
    fn rasterize(&self, text: &str, formatting: &TextFormatting) -> RgbaImage;
}

/// Font-free placeholder rasterizer.
///
/// Every glyph is a solid block on a fixed advance derived from the font
/// size, so layout (size, alignment, spacing, decorations, background box)
/// is faithful even though letterforms are not.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockRasterizer;

impl BlockRasterizer {
    fn advance(formatting: &TextFormatting) -> f32 {
        let base = formatting.font_size * 0.6;
        let base = match formatting.font_weight {
            FontWeight::Regular => base,
            FontWeight::SemiBold => base * 1.05,
            FontWeight::Bold => base * 1.1,
        };
        base + formatting.letter_spacing
    }
}

impl TextRasterizer for BlockRasterizer {
    fn rasterize(&self, text: &str, formatting: &TextFormatting) -> RgbaImage {
        let lines: Vec<&str> = text.split('\n').collect();
        let advance = Self::advance(formatting).max(0.0);
        let line_height = formatting.font_size * formatting.line_spacing;
        let pad = formatting.fill_padding.max(0.0);

        let line_widths: Vec<f32> = lines
            .iter()
            .map(|l| l.chars().count() as f32 * advance)
            .collect();
        let text_width = line_widths.iter().copied().fold(0.0, f32::max);
        let width = bitmap_side(text_width + 2.0 * pad);
        let height = bitmap_side(line_height * lines.len() as f32 + 2.0 * pad);
        if width == MAX_BITMAP_SIDE || height == MAX_BITMAP_SIDE {
            log::warn!("text bitmap clamped to {width}×{height}");
        }

        let mut img = RgbaImage::new(width, height);

        if let Some(fill) = formatting.fill_color {
            fill_rect(&mut img, 0.0, 0.0, width as f32, height as f32, with_opacity(fill, formatting.opacity));
        }

        let ink = with_opacity(formatting.color, formatting.opacity);
        let glyph_top = formatting.font_size * 0.25;
        let glyph_bottom = formatting.font_size;

        for (row, (line, line_width)) in lines.iter().zip(&line_widths).enumerate() {
            let slack = text_width - line_width;
            let start_x = pad
                + match formatting.alignment {
                    TextAlign::Left => 0.0,
                    TextAlign::Center => slack / 2.0,
                    TextAlign::Right => slack,
                };
            let top = pad + row as f32 * line_height;

            for (i, ch) in line.chars().enumerate() {
                if ch.is_whitespace() {
                    continue;
                }
                let x = start_x + i as f32 * advance;
                fill_rect(
                    &mut img,
                    x + advance * 0.1,
                    top + glyph_top,
                    x + advance * 0.9,
                    top + glyph_bottom,
                    ink,
                );
            }

            if formatting.underline {
                fill_rect(&mut img, start_x, top + glyph_bottom, start_x + line_width, top + glyph_bottom + 2.0, ink);
            }
            if formatting.strikethrough {
                let mid = top + (glyph_top + glyph_bottom) / 2.0;
                fill_rect(&mut img, start_x, mid - 1.0, start_x + line_width, mid + 1.0, ink);
            }
        }

        img
    }
}

/// Round a measured extent to a pixel count in `1..=MAX_BITMAP_SIDE`.
fn bitmap_side(extent: f32) -> u32 {
    if extent.is_nan() {
        return 1;
    }
    extent.round().clamp(1.0, MAX_BITMAP_SIDE as f32) as u32
}

fn with_opacity(color: Color, opacity: u8) -> Rgba<u8> {
    let a = (color.a as u16 * opacity as u16 / 255) as u8;
    Rgba([color.r, color.g, color.b, a])
}

/// Fill `[x0, x1) × [y0, y1)`, clipped to the image.
fn fill_rect(img: &mut RgbaImage, x0: f32, y0: f32, x1: f32, y1: f32, color: Rgba<u8>) {
    let (w, h) = img.dimensions();
    let x0 = (x0.max(0.0) as u32).min(w);
    let y0 = (y0.max(0.0) as u32).min(h);
    let x1 = (x1.max(0.0).ceil() as u32).min(w);
    let y1 = (y1.max(0.0).ceil() as u32).min(h);
    for y in y0..y1 {
        for x in x0..x1 {
            img.put_pixel(x, y, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn size_follows_metrics() {
        let f = TextFormatting::default(); // 16px, 1.2 line spacing
        let img = BlockRasterizer.rasterize("abcde", &f);
        // 5 glyphs × 9.6px advance = 48px; 16 × 1.2 = 19.2 → 19px.
        assert_eq!(img.dimensions(), (48, 19));
    }

    #[test]
    fn multiline_uses_widest_line() {
        let f = TextFormatting::default();
        let img = BlockRasterizer.rasterize("ab\nabcd", &f);
        assert_eq!(img.dimensions(), (38, 38));
    }

    #[test]
    fn background_fill_and_padding() {
        let f = TextFormatting {
            fill_color: Some(Color::rgb(0, 255, 0)),
            fill_padding: 4.0,
            ..TextFormatting::default()
        };
        let img = BlockRasterizer.rasterize("a", &f);
        assert_eq!(img.get_pixel(0, 0), &Rgba([0, 255, 0, 255]));
        assert_eq!(img.width(), 18);
    }

    #[test]
    fn empty_text_still_produces_a_bitmap() {
        let img = BlockRasterizer.rasterize("", &TextFormatting::default());
        assert_eq!(img.width(), 1);
    }

    #[test]
    fn oversized_metrics_are_clamped() {
        let huge = TextFormatting {
            font_size: 1e9,
            ..TextFormatting::default()
        };
        let img = BlockRasterizer.rasterize("Hi", &huge);
        assert_eq!(img.dimensions(), (MAX_BITMAP_SIDE, MAX_BITMAP_SIDE));

        let spaced = TextFormatting {
            letter_spacing: f32::INFINITY,
            line_spacing: f32::NAN,
            ..TextFormatting::default()
        };
        let img = BlockRasterizer.rasterize("Hi", &spaced);
        assert_eq!(img.dimensions(), (MAX_BITMAP_SIDE, 1));
    }
}
