//! Layer stack → Vello drawing commands.
//!
//! Walks the visible layers bottom to top and emits one paint operation
//! per layer, plus an optional selection overlay on top.

use crate::shapes::ShapePainter;
use kurbo::{Affine, Rect, Stroke};
use lk_core::config::EditorConfig;
use lk_core::geometry::handle_points;
use lk_core::image::RgbaImage;
use lk_core::layer::Layer;
use lk_core::model::VisualObject;
use lk_core::registry::LayerRegistry;
use peniko::{Blob, Color, Fill, Image, ImageFormat as Format};
use std::sync::Arc;
use vello::Scene;

const SELECTION_COLOR: Color = Color::from_rgba8(0x34, 0x98, 0xDB, 0xFF);
const HANDLE_FILL: Color = Color::from_rgba8(0xFF, 0xFF, 0xFF, 0xFF);
const HANDLE_SIZE: f64 = 8.0;

/// Paint every visible layer to a Vello scene.
///
/// Call once per frame with a freshly-cleared `Scene`. Returns the number
/// of layers painted.
pub fn paint_layers(scene: &mut Scene, registry: &LayerRegistry, painter: &dyn ShapePainter) -> usize {
    let layers = registry.visible_layers_sorted();
    for layer in &layers {
        paint_layer(scene, layer, painter);
    }
    layers.len()
}

/// Canvas transform of a layer: its local `(0, 0)..(w, h)` box rotated
/// about the top-left corner, then moved to `(x, y)`.
///
/// Positive degrees turn counter-clockwise on screen, so the angle is
/// negated for kurbo's y-down frame. This is the forward map of the
/// rotation-aware hit test.
pub fn layer_transform(layer: &Layer) -> Affine {
    Affine::translate((layer.x() as f64, layer.y() as f64))
        * Affine::rotate(-(layer.rotation() as f64).to_radians())
}

fn paint_layer(scene: &mut Scene, layer: &Layer, painter: &dyn ShapePainter) {
    let transform = layer_transform(layer);
    match layer.object() {
        VisualObject::Shape(shape) => painter.paint_shape(
            scene,
            shape.kind,
            &shape.style,
            layer.width(),
            layer.height(),
            transform,
        ),
        VisualObject::Text(text) => paint_bitmap(scene, text.bitmap(), layer, transform),
        VisualObject::Image(img) => paint_bitmap(scene, img.bitmap(), layer, transform),
    }
    log::trace!(
        "paint {} ({}) {}×{} at ({}, {}) rot {}",
        layer.id(),
        layer.object().kind_name(),
        layer.width(),
        layer.height(),
        layer.x(),
        layer.y(),
        layer.rotation()
    );
}

/// Draw a bitmap stretched to the layer's box.
fn paint_bitmap(scene: &mut Scene, bitmap: &RgbaImage, layer: &Layer, transform: Affine) {
    let (bw, bh) = bitmap.dimensions();
    if bw == 0 || bh == 0 {
        return;
    }
    let blob = Blob::new(Arc::new(bitmap.as_raw().clone()));
    let image = Image::new(blob, Format::Rgba8, bw, bh);
    scene.draw_image(&image, transform * bitmap_scale(bw, bh, layer));
}

fn bitmap_scale(bw: u32, bh: u32, layer: &Layer) -> Affine {
    Affine::scale_non_uniform(
        layer.width() as f64 / bw as f64,
        layer.height() as f64 / bh as f64,
    )
}

// ─── Selection overlay ───────────────────────────────────────────────────────

/// Draw the handle box and eight handles around the selected layer.
///
/// The overlay is axis-aligned, matching where handles are grabbed.
/// Returns `false` when nothing is selected or the selection is hidden.
pub fn paint_selection(scene: &mut Scene, registry: &LayerRegistry, config: &EditorConfig) -> bool {
    let Some(layer) = registry.selected().filter(|l| l.is_visible()) else {
        return false;
    };
    let b = config.border_buffer as f64;
    let (x, y) = (layer.x() as f64, layer.y() as f64);
    let (w, h) = (layer.width() as f64, layer.height() as f64);

    let outline = Stroke::new(1.0);
    let handle_box = Rect::new(x - b, y - b, x + w + b, y + h + b);
    scene.stroke(&outline, Affine::IDENTITY, SELECTION_COLOR, None, &handle_box);

    let handles = handle_points(layer.x(), layer.y(), layer.width(), layer.height(), config.border_buffer);
    for (_, (hx, hy)) in handles {
        let square = Rect::from_center_size((hx as f64, hy as f64), (HANDLE_SIZE, HANDLE_SIZE));
        scene.fill(Fill::NonZero, Affine::IDENTITY, HANDLE_FILL, None, &square);
        scene.stroke(&outline, Affine::IDENTITY, SELECTION_COLOR, None, &square);
    }
    true
}
