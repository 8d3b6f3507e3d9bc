//! Shape outlines and the painter that draws them.
//!
//! Every shape is built in the layer's local frame, `(0, 0)` to
//! `(width, height)`, and placed on the canvas by the layer transform.

use kurbo::{Affine, BezPath, Circle, Point, Rect, Shape, Stroke};
use lk_core::model::{Color as LayerColor, ShapeKind, ShapeStyle};
use peniko::{Color, Fill};
use std::f64::consts::{FRAC_PI_2, PI};
use vello::Scene;

/// Flattening tolerance for curved outlines.
const TOLERANCE: f64 = 0.1;

/// Draws one shape kind into a scene.
pub trait ShapePainter {
    fn paint_shape(
        &self,
        scene: &mut Scene,
        kind: ShapeKind,
        style: &ShapeStyle,
        width: f32,
        height: f32,
        transform: Affine,
    );
}

/// The default painter: kurbo outlines filled and stroked through Vello.
#[derive(Debug, Clone, Copy, Default)]
pub struct KurboShapePainter;

impl ShapePainter for KurboShapePainter {
    fn paint_shape(
        &self,
        scene: &mut Scene,
        kind: ShapeKind,
        style: &ShapeStyle,
        width: f32,
        height: f32,
        transform: Affine,
    ) {
        let path = shape_path(kind, width as f64, height as f64, style.border_radius as f64);

        if !kind.is_outline()
            && let Some(fill) = style.fill_color
        {
            scene.fill(Fill::NonZero, transform, to_color(fill, style.alpha), None, &path);
        }
        if style.line_thickness > 0.0 {
            let stroke = Stroke::new(style.line_thickness as f64);
            scene.stroke(&stroke, transform, to_color(style.line_color, style.alpha), None, &path);
        }
    }
}

// ─── Outlines ────────────────────────────────────────────────────────────────

/// The outline of `kind` inside a `width × height` box at the origin.
pub fn shape_path(kind: ShapeKind, width: f64, height: f64, border_radius: f64) -> BezPath {
    let rect = Rect::new(0.0, 0.0, width, height);
    match kind {
        ShapeKind::Square | ShapeKind::OutlineSquare => {
            let radius = border_radius.min(width.min(height) / 2.0);
            rect.to_rounded_rect(radius).to_path(TOLERANCE)
        }
        ShapeKind::Circle | ShapeKind::OutlineCircle => {
            Circle::new(rect.center(), width.min(height) / 2.0).to_path(TOLERANCE)
        }
        ShapeKind::Triangle | ShapeKind::OutlineTriangle => {
            polyline(&[(width / 2.0, 0.0), (width, height), (0.0, height)])
        }
        ShapeKind::Line => {
            let mut path = BezPath::new();
            path.move_to((0.0, height / 2.0));
            path.line_to((width, height / 2.0));
            path
        }
        ShapeKind::Star | ShapeKind::OutlineStar => star(rect, 5, 0.4),
        ShapeKind::Heart | ShapeKind::OutlineHeart => heart(rect),
        ShapeKind::Polygon | ShapeKind::OutlinePolygon => regular_polygon(rect, 6),
    }
}

fn polyline(points: &[(f64, f64)]) -> BezPath {
    let mut path = BezPath::new();
    if let Some((first, rest)) = points.split_first() {
        path.move_to(*first);
        for p in rest {
            path.line_to(*p);
        }
        path.close_path();
    }
    path
}

/// Points on an ellipse inscribed in `rect`, starting straight up.
fn ring(rect: Rect, count: usize, scale: f64, phase: f64) -> impl Iterator<Item = (f64, f64)> {
    let c = rect.center();
    let (rx, ry) = (rect.width() / 2.0 * scale, rect.height() / 2.0 * scale);
    (0..count).map(move |i| {
        let a = -FRAC_PI_2 + phase + i as f64 * 2.0 * PI / count as f64;
        (c.x + rx * a.cos(), c.y + ry * a.sin())
    })
}

fn star(rect: Rect, spikes: usize, inner_ratio: f64) -> BezPath {
    let step = PI / spikes as f64;
    let outer = ring(rect, spikes, 1.0, 0.0);
    let inner = ring(rect, spikes, inner_ratio, step);
    let points: Vec<_> = outer.zip(inner).flat_map(|(o, i)| [o, i]).collect();
    polyline(&points)
}

fn regular_polygon(rect: Rect, sides: usize) -> BezPath {
    polyline(&ring(rect, sides, 1.0, 0.0).collect::<Vec<_>>())
}

fn heart(rect: Rect) -> BezPath {
    let (w, h) = (rect.width(), rect.height());
    let at = |fx: f64, fy: f64| Point::new(rect.x0 + fx * w, rect.y0 + fy * h);
    let mut path = BezPath::new();
    path.move_to(at(0.5, 0.25));
    path.curve_to(at(0.5, 0.0), at(0.0, 0.0), at(0.0, 0.3));
    path.curve_to(at(0.0, 0.6), at(0.35, 0.8), at(0.5, 1.0));
    path.curve_to(at(0.65, 0.8), at(1.0, 0.6), at(1.0, 0.3));
    path.curve_to(at(1.0, 0.0), at(0.5, 0.0), at(0.5, 0.25));
    path.close_path();
    path
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

/// Layer color with the shape's whole-object alpha folded in.
pub(crate) fn to_color(color: LayerColor, alpha: u8) -> Color {
    let a = (color.a as u16 * alpha as u16 / 255) as u8;
    Color::from_rgba8(color.r, color.g, color.b, a)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bbox(kind: ShapeKind, w: f64, h: f64) -> Rect {
        shape_path(kind, w, h, 0.0).bounding_box()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 0.5
    }

    #[test]
    fn square_fills_its_box() {
        let b = bbox(ShapeKind::Square, 80.0, 40.0);
        assert!(approx(b.x0, 0.0) && approx(b.y0, 0.0));
        assert!(approx(b.x1, 80.0) && approx(b.y1, 40.0));
    }

    #[test]
    fn circle_uses_shorter_side() {
        let b = bbox(ShapeKind::OutlineCircle, 100.0, 40.0);
        assert!(approx(b.width(), 40.0), "{b:?}");
        assert!(approx(b.center().x, 50.0));
    }

    #[test]
    fn line_runs_through_the_middle() {
        let b = bbox(ShapeKind::Line, 100.0, 20.0);
        assert!(approx(b.y0, 10.0) && approx(b.y1, 10.0));
        assert!(approx(b.width(), 100.0));
    }

    #[test]
    fn star_and_polygon_stay_inside_box() {
        for kind in [ShapeKind::Star, ShapeKind::Polygon, ShapeKind::Heart, ShapeKind::Triangle] {
            let b = bbox(kind, 60.0, 90.0);
            assert!(b.x0 >= -0.5 && b.y0 >= -0.5, "{kind:?} {b:?}");
            assert!(b.x1 <= 60.5 && b.y1 <= 90.5, "{kind:?} {b:?}");
        }
    }

    #[test]
    fn star_has_ten_vertices() {
        let path = shape_path(ShapeKind::OutlineStar, 50.0, 50.0, 0.0);
        // move_to + 9 line_to + close
        assert_eq!(path.elements().len(), 11);
    }

    #[test]
    fn border_radius_is_capped() {
        // A radius larger than half the short side must not blow up the outline.
        let b = shape_path(ShapeKind::Square, 40.0, 20.0, 500.0).bounding_box();
        assert!(approx(b.width(), 40.0) && approx(b.height(), 20.0));
    }

    #[test]
    fn alpha_folds_into_color() {
        let c = to_color(LayerColor::rgba(10, 20, 30, 255), 128);
        assert_eq!(c.to_rgba8().a, 128);
    }
}
