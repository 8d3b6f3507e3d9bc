//! Property controllers for the payload of the selected layer.
//!
//! Each setter is gated on the layer's variant: asking the shape
//! controller to recolor a text layer is a no-op that returns `false`.
//! The lock flag does not apply here; it only freezes geometry.

use lk_core::id::LayerId;
use lk_core::model::{Color, ImageObject, ShapeObject, TextFormatting, TextObject};
use lk_core::registry::LayerRegistry;
use lk_core::text::{BlockRasterizer, TextRasterizer};

// ─── Shape ───────────────────────────────────────────────────────────────

pub struct ShapeController;

impl ShapeController {
    fn with_shape(registry: &mut LayerRegistry, id: LayerId, edit: impl FnOnce(&mut ShapeObject)) -> bool {
        registry
            .get_mut(id)
            .and_then(|layer| layer.object_mut().as_shape_mut())
            .map(edit)
            .is_some()
    }

    pub fn set_line_color(registry: &mut LayerRegistry, id: LayerId, color: Color) -> bool {
        Self::with_shape(registry, id, |shape| shape.set_line_color(color))
    }

    pub fn set_line_thickness(registry: &mut LayerRegistry, id: LayerId, thickness: f32) -> bool {
        Self::with_shape(registry, id, |shape| shape.set_line_thickness(thickness))
    }

    /// `None` removes the fill.
    pub fn set_fill_color(registry: &mut LayerRegistry, id: LayerId, color: Option<Color>) -> bool {
        Self::with_shape(registry, id, |shape| shape.set_fill_color(color))
    }

    pub fn set_border_radius(registry: &mut LayerRegistry, id: LayerId, radius: f32) -> bool {
        Self::with_shape(registry, id, |shape| shape.set_border_radius(radius))
    }

    pub fn set_alpha(registry: &mut LayerRegistry, id: LayerId, alpha: u8) -> bool {
        Self::with_shape(registry, id, |shape| shape.set_alpha(alpha))
    }
}

// ─── Text ────────────────────────────────────────────────────────────────

/// Edits text layers and keeps the layer sized to the rendered bitmap.
pub struct TextController<R: TextRasterizer = BlockRasterizer> {
    rasterizer: R,
}

impl Default for TextController<BlockRasterizer> {
    fn default() -> Self {
        Self::new(BlockRasterizer)
    }
}

impl<R: TextRasterizer> TextController<R> {
    pub fn new(rasterizer: R) -> Self {
        Self { rasterizer }
    }

    pub fn rasterizer(&self) -> &R {
        &self.rasterizer
    }

    /// Build a text payload with this controller's rasterizer.
    pub fn create(&self, content: impl Into<String>, formatting: TextFormatting) -> TextObject {
        TextObject::new(content, formatting, &self.rasterizer)
    }

    pub fn set_text(&self, registry: &mut LayerRegistry, id: LayerId, content: impl Into<String>) -> bool {
        let content = content.into();
        self.edit(registry, id, |text, raster| text.set_text(content, raster))
    }

    pub fn set_formatting(&self, registry: &mut LayerRegistry, id: LayerId, formatting: TextFormatting) -> bool {
        self.edit(registry, id, |text, raster| text.set_formatting(formatting, raster))
    }

    /// Tweak one field of the current formatting.
    pub fn update_formatting(
        &self,
        registry: &mut LayerRegistry,
        id: LayerId,
        update: impl FnOnce(&mut TextFormatting),
    ) -> bool {
        self.edit(registry, id, |text, raster| {
            let mut formatting = text.formatting().clone();
            update(&mut formatting);
            text.set_formatting(formatting, raster);
        })
    }

    /// Mirror the rendered text; later text or formatting edits keep it.
    pub fn flip_horizontal(&self, registry: &mut LayerRegistry, id: LayerId) -> bool {
        self.edit(registry, id, |text, _| text.flip_horizontal())
    }

    pub fn flip_vertical(&self, registry: &mut LayerRegistry, id: LayerId) -> bool {
        self.edit(registry, id, |text, _| text.flip_vertical())
    }

    fn edit(
        &self,
        registry: &mut LayerRegistry,
        id: LayerId,
        edit: impl FnOnce(&mut TextObject, &dyn TextRasterizer),
    ) -> bool {
        let Some(text) = registry
            .get_mut(id)
            .and_then(|layer| layer.object_mut().as_text_mut())
        else {
            return false;
        };
        edit(text, &self.rasterizer);
        // A locked layer keeps its box; the bitmap is scaled into it.
        if !registry.fit_to_content(id) {
            log::debug!("text {id} re-rendered without refit");
        }
        true
    }
}

// ─── Image ───────────────────────────────────────────────────────────────

pub struct ImageController;

impl ImageController {
    fn with_image(registry: &mut LayerRegistry, id: LayerId, edit: impl FnOnce(&mut ImageObject)) -> bool {
        registry
            .get_mut(id)
            .and_then(|layer| layer.object_mut().as_image_mut())
            .map(edit)
            .is_some()
    }

    pub fn flip_horizontal(registry: &mut LayerRegistry, id: LayerId) -> bool {
        Self::with_image(registry, id, ImageObject::flip_horizontal)
    }

    pub fn flip_vertical(registry: &mut LayerRegistry, id: LayerId) -> bool {
        Self::with_image(registry, id, ImageObject::flip_vertical)
    }

    pub fn reset_to_original(registry: &mut LayerRegistry, id: LayerId) -> bool {
        Self::with_image(registry, id, ImageObject::reset_to_original)
    }

    pub fn set_opacity(registry: &mut LayerRegistry, id: LayerId, alpha: u8) -> bool {
        Self::with_image(registry, id, |img| img.set_opacity(alpha))
    }
}
