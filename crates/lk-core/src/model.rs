//! Visual objects: the rendered content wrapped by a layer.
//!
//! A `VisualObject` is a tagged variant over shapes, text, and images. It
//! owns only rendering payload (style, text, bitmaps). Placement and
//! geometry (position, size, rotation) belong to the owning `Layer`; the
//! object is asked for its natural size once, when the layer is created.

use crate::text::TextRasterizer;
use image::RgbaImage;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ─── Colors ──────────────────────────────────────────────────────────────

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#RGB`, `#RRGGBB`, or `#RRGGBBAA`. The `#` is optional.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let digit = |i: usize| hex.get(i..i + 1).and_then(|s| u8::from_str_radix(s, 16).ok());
        let byte = |i: usize| hex.get(i..i + 2).and_then(|s| u8::from_str_radix(s, 16).ok());
        match hex.len() {
            3 => Some(Self::rgb(digit(0)? * 17, digit(1)? * 17, digit(2)? * 17)),
            6 => Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Self::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }

    /// Emit `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }

    pub fn to_rgba(self) -> image::Rgba<u8> {
        image::Rgba([self.r, self.g, self.b, self.a])
    }
}

// ─── Shapes ──────────────────────────────────────────────────────────────

/// The drawable shape kinds. Outline variants draw the stroke only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Square,
    OutlineSquare,
    Circle,
    OutlineCircle,
    Triangle,
    OutlineTriangle,
    Line,
    Star,
    OutlineStar,
    Heart,
    OutlineHeart,
    Polygon,
    OutlinePolygon,
}

impl ShapeKind {
    pub fn is_outline(self) -> bool {
        matches!(
            self,
            ShapeKind::OutlineSquare
                | ShapeKind::OutlineCircle
                | ShapeKind::OutlineTriangle
                | ShapeKind::OutlineStar
                | ShapeKind::OutlineHeart
                | ShapeKind::OutlinePolygon
                | ShapeKind::Line
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Square => "square",
            ShapeKind::OutlineSquare => "outline_square",
            ShapeKind::Circle => "circle",
            ShapeKind::OutlineCircle => "outline_circle",
            ShapeKind::Triangle => "triangle",
            ShapeKind::OutlineTriangle => "outline_triangle",
            ShapeKind::Line => "line",
            ShapeKind::Star => "star",
            ShapeKind::OutlineStar => "outline_star",
            ShapeKind::Heart => "heart",
            ShapeKind::OutlineHeart => "outline_heart",
            ShapeKind::Polygon => "polygon",
            ShapeKind::OutlinePolygon => "outline_polygon",
        }
    }
}

/// Stroke and fill settings for a shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    pub line_color: Color,
    pub line_thickness: f32,
    /// `None` draws no fill.
    pub fill_color: Option<Color>,
    /// Corner rounding for square kinds.
    pub border_radius: f32,
    /// Whole-shape opacity, 0 (transparent) ..= 255 (opaque).
    pub alpha: u8,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            line_color: Color::BLACK,
            line_thickness: 2.0,
            fill_color: None,
            border_radius: 0.0,
            alpha: 255,
        }
    }
}

/// A vector shape payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeObject {
    pub kind: ShapeKind,
    pub style: ShapeStyle,
    size: (f32, f32),
}

impl ShapeObject {
    /// A shape with an explicit initial size and default style.
    pub fn new(kind: ShapeKind, width: f32, height: f32) -> Self {
        Self {
            kind,
            style: ShapeStyle::default(),
            size: (width, height),
        }
    }

    pub fn with_style(mut self, style: ShapeStyle) -> Self {
        self.style = style;
        self
    }

    pub fn set_line_color(&mut self, color: Color) {
        self.style.line_color = color;
    }

    pub fn set_line_thickness(&mut self, thickness: f32) {
        self.style.line_thickness = thickness.max(0.0);
    }

    pub fn set_fill_color(&mut self, color: Option<Color>) {
        self.style.fill_color = color;
    }

    pub fn set_border_radius(&mut self, radius: f32) {
        self.style.border_radius = radius.max(0.0);
    }

    pub fn set_alpha(&mut self, alpha: u8) {
        self.style.alpha = alpha;
    }

    /// The fill that actually gets painted (outline kinds never fill).
    pub fn effective_fill(&self) -> Option<Color> {
        if self.kind.is_outline() {
            None
        } else {
            self.style.fill_color
        }
    }
}

// ─── Text ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontWeight {
    #[default]
    Regular,
    SemiBold,
    Bold,
}

/// Case transform applied before rasterizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseTransform {
    #[default]
    None,
    Uppercase,
    Lowercase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Everything that affects how a text object is laid out and drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextFormatting {
    pub font_name: String,
    pub font_size: f32,
    pub font_weight: FontWeight,
    pub color: Color,
    pub case: CaseTransform,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    pub alignment: TextAlign,
    /// Extra horizontal advance per glyph, in pixels.
    pub letter_spacing: f32,
    /// Line height as a multiple of the font size.
    pub line_spacing: f32,
    /// Background box behind the text.
    pub fill_color: Option<Color>,
    pub fill_padding: f32,
    pub fill_corner_radius: f32,
    pub stroke_width: f32,
    pub stroke_color: Color,
    pub opacity: u8,
}

impl Default for TextFormatting {
    fn default() -> Self {
        Self {
            font_name: "arial.ttf".into(),
            font_size: 16.0,
            font_weight: FontWeight::Regular,
            color: Color::BLACK,
            case: CaseTransform::None,
            italic: false,
            underline: false,
            strikethrough: false,
            alignment: TextAlign::Left,
            letter_spacing: 0.0,
            line_spacing: 1.2,
            fill_color: None,
            fill_padding: 0.0,
            fill_corner_radius: 0.0,
            stroke_width: 0.0,
            stroke_color: Color::BLACK,
            opacity: 255,
        }
    }
}

impl TextFormatting {
    pub fn heading() -> Self {
        Self {
            font_size: 36.0,
            font_weight: FontWeight::Bold,
            ..Self::default()
        }
    }

    pub fn subheading() -> Self {
        Self {
            font_size: 24.0,
            font_weight: FontWeight::SemiBold,
            color: Color::rgb(50, 50, 50),
            ..Self::default()
        }
    }

    pub fn body() -> Self {
        Self::default()
    }

    /// Apply the case transform to `text`.
    pub fn transform_case(&self, text: &str) -> String {
        match self.case {
            CaseTransform::None => text.to_string(),
            CaseTransform::Uppercase => text.to_uppercase(),
            CaseTransform::Lowercase => text.to_lowercase(),
        }
    }
}

/// A text payload: content, formatting, and the bitmap rendered from them.
///
/// The bitmap is always a full re-render of the current content; there is
/// no incremental reflow. Flips are sticky: every re-render mirrors the
/// fresh bitmap again until the flip is toggled off.
#[derive(Debug, Clone, PartialEq)]
pub struct TextObject {
    content: String,
    formatting: TextFormatting,
    bitmap: RgbaImage,
    flipped_horizontal: bool,
    flipped_vertical: bool,
}

impl TextObject {
    pub fn new(
        content: impl Into<String>,
        formatting: TextFormatting,
        rasterizer: &dyn TextRasterizer,
    ) -> Self {
        let content = content.into();
        let bitmap = rasterizer.rasterize(&formatting.transform_case(&content), &formatting);
        Self {
            content,
            formatting,
            bitmap,
            flipped_horizontal: false,
            flipped_vertical: false,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// The content as it is drawn (case transform applied).
    pub fn display_text(&self) -> String {
        self.formatting.transform_case(&self.content)
    }

    pub fn formatting(&self) -> &TextFormatting {
        &self.formatting
    }

    pub fn bitmap(&self) -> &RgbaImage {
        &self.bitmap
    }

    pub fn set_text(&mut self, content: impl Into<String>, rasterizer: &dyn TextRasterizer) {
        self.content = content.into();
        self.rerender(rasterizer);
    }

    pub fn set_formatting(&mut self, formatting: TextFormatting, rasterizer: &dyn TextRasterizer) {
        self.formatting = formatting;
        self.rerender(rasterizer);
    }

    /// Mirror the text left to right. Calling it again undoes the flip.
    pub fn flip_horizontal(&mut self) {
        self.flipped_horizontal = !self.flipped_horizontal;
        image::imageops::flip_horizontal_in_place(&mut self.bitmap);
    }

    /// Mirror the text top to bottom. Calling it again undoes the flip.
    pub fn flip_vertical(&mut self) {
        self.flipped_vertical = !self.flipped_vertical;
        image::imageops::flip_vertical_in_place(&mut self.bitmap);
    }

    pub fn is_flipped_horizontal(&self) -> bool {
        self.flipped_horizontal
    }

    pub fn is_flipped_vertical(&self) -> bool {
        self.flipped_vertical
    }

    fn rerender(&mut self, rasterizer: &dyn TextRasterizer) {
        self.bitmap = rasterizer.rasterize(&self.display_text(), &self.formatting);
        if self.flipped_horizontal {
            image::imageops::flip_horizontal_in_place(&mut self.bitmap);
        }
        if self.flipped_vertical {
            image::imageops::flip_vertical_in_place(&mut self.bitmap);
        }
        log::trace!(
            "text re-rendered: {:?} → {}×{}",
            self.content,
            self.bitmap.width(),
            self.bitmap.height()
        );
    }
}

// ─── Images ──────────────────────────────────────────────────────────────

/// A decoded bitmap plus the file it came from.
///
/// Edits (flips, opacity) touch `bitmap` only; `original` keeps the
/// decoded pixels so edits can be reverted.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageObject {
    path: Option<PathBuf>,
    original: RgbaImage,
    bitmap: RgbaImage,
}

impl ImageObject {
    pub fn from_bitmap(bitmap: RgbaImage, path: Option<PathBuf>) -> Self {
        Self {
            path,
            original: bitmap.clone(),
            bitmap,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn bitmap(&self) -> &RgbaImage {
        &self.bitmap
    }

    pub fn flip_horizontal(&mut self) {
        image::imageops::flip_horizontal_in_place(&mut self.bitmap);
    }

    pub fn flip_vertical(&mut self) {
        image::imageops::flip_vertical_in_place(&mut self.bitmap);
    }

    /// Overwrite the alpha channel of every pixel.
    pub fn set_opacity(&mut self, alpha: u8) {
        for pixel in self.bitmap.pixels_mut() {
            pixel[3] = alpha;
        }
    }

    pub fn reset_to_original(&mut self) {
        self.bitmap = self.original.clone();
    }
}

// ─── Visual object ───────────────────────────────────────────────────────

/// The content of a layer.
#[derive(Debug, Clone, PartialEq)]
pub enum VisualObject {
    Shape(ShapeObject),
    Text(TextObject),
    Image(ImageObject),
}

impl VisualObject {
    /// Size to seed a new layer with. `None` for an empty bitmap.
    pub fn natural_size(&self) -> Option<(f32, f32)> {
        let size = match self {
            VisualObject::Shape(shape) => shape.size,
            VisualObject::Text(text) => bitmap_size(&text.bitmap),
            VisualObject::Image(img) => bitmap_size(&img.bitmap),
        };
        (size.0 > 0.0 && size.1 > 0.0).then_some(size)
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            VisualObject::Shape(_) => "shape",
            VisualObject::Text(_) => "text",
            VisualObject::Image(_) => "image",
        }
    }

    pub fn as_shape_mut(&mut self) -> Option<&mut ShapeObject> {
        match self {
            VisualObject::Shape(shape) => Some(shape),
            _ => None,
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut TextObject> {
        match self {
            VisualObject::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_image_mut(&mut self) -> Option<&mut ImageObject> {
        match self {
            VisualObject::Image(img) => Some(img),
            _ => None,
        }
    }
}

impl From<ShapeObject> for VisualObject {
    fn from(shape: ShapeObject) -> Self {
        VisualObject::Shape(shape)
    }
}

impl From<TextObject> for VisualObject {
    fn from(text: TextObject) -> Self {
        VisualObject::Text(text)
    }
}

impl From<ImageObject> for VisualObject {
    fn from(img: ImageObject) -> Self {
        VisualObject::Image(img)
    }
}

fn bitmap_size(bitmap: &RgbaImage) -> (f32, f32) {
    (bitmap.width() as f32, bitmap.height() as f32)
}
