//! Geometry utilities: rotated hit testing and resize-handle detection.
//!
//! Both functions are pure and work on raw box parameters so they can be
//! shared by the registry (selection) and the interaction controller
//! (handle grabbing).
//!
//! The two tests are deliberately asymmetric: `point_in_oriented_box`
//! honors the box rotation, while `near_border_or_handle` works in
//! axis-aligned screen space. Handles on a rotated layer therefore sit on
//! its unrotated bounding box.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the eight named resize points on a layer's handle box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Anchor {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Top,
    Bottom,
    Left,
    Right,
}

impl Anchor {
    /// Corners, in the order they are probed.
    pub const CORNERS: [Anchor; 4] = [
        Anchor::TopLeft,
        Anchor::TopRight,
        Anchor::BottomLeft,
        Anchor::BottomRight,
    ];

    /// Edges, in the order they are probed.
    pub const EDGES: [Anchor; 4] = [Anchor::Top, Anchor::Left, Anchor::Right, Anchor::Bottom];

    pub fn as_str(self) -> &'static str {
        match self {
            Anchor::TopLeft => "top-left",
            Anchor::TopRight => "top-right",
            Anchor::BottomLeft => "bottom-left",
            Anchor::BottomRight => "bottom-right",
            Anchor::Top => "top",
            Anchor::Bottom => "bottom",
            Anchor::Left => "left",
            Anchor::Right => "right",
        }
    }

    pub fn is_corner(self) -> bool {
        Self::CORNERS.contains(&self)
    }

    /// Dragging this anchor moves the left edge of the box.
    pub fn moves_left_edge(self) -> bool {
        matches!(self, Anchor::TopLeft | Anchor::BottomLeft | Anchor::Left)
    }

    /// Dragging this anchor moves the top edge of the box.
    pub fn moves_top_edge(self) -> bool {
        matches!(self, Anchor::TopLeft | Anchor::TopRight | Anchor::Top)
    }

    /// Dragging this anchor changes the width.
    pub fn affects_width(self) -> bool {
        !matches!(self, Anchor::Top | Anchor::Bottom)
    }

    /// Dragging this anchor changes the height.
    pub fn affects_height(self) -> bool {
        !matches!(self, Anchor::Left | Anchor::Right)
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Anchor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top-left" => Ok(Anchor::TopLeft),
            "top-right" => Ok(Anchor::TopRight),
            "bottom-left" => Ok(Anchor::BottomLeft),
            "bottom-right" => Ok(Anchor::BottomRight),
            "top" => Ok(Anchor::Top),
            "bottom" => Ok(Anchor::Bottom),
            "left" => Ok(Anchor::Left),
            "right" => Ok(Anchor::Right),
            other => Err(format!("unknown anchor: {other}")),
        }
    }
}

/// Test whether `(px, py)` falls inside the box at `(x, y)` of the given
/// size, rotated by `rotation_degrees` around its top-left corner.
/// Positive degrees turn the box counter-clockwise on the y-down canvas.
///
/// The query point is moved into the box's local frame (translate by
/// `-x, -y`, then rotate by `-rotation`) and compared against
/// `0..=width` × `0..=height`. Edges count as inside.
pub fn point_in_oriented_box(
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    rotation_degrees: f32,
    px: f32,
    py: f32,
) -> bool {
    let (local_x, local_y) = to_local(x, y, rotation_degrees, px, py);
    (0.0..=width).contains(&local_x) && (0.0..=height).contains(&local_y)
}

/// Map a canvas point into the unrotated frame of a box anchored at `(x, y)`.
pub fn to_local(x: f32, y: f32, rotation_degrees: f32, px: f32, py: f32) -> (f32, f32) {
    let lx = px - x;
    let ly = py - y;
    let (sin, cos) = (-rotation_degrees).to_radians().sin_cos();
    (lx * cos + ly * sin, -lx * sin + ly * cos)
}

/// Find the resize handle nearest to `(px, py)`, if any is within
/// `threshold`.
///
/// The box is grown by `buffer` on every side. Corners are probed first
/// (top-left, top-right, bottom-left, bottom-right), then edges (top,
/// left, right, bottom) by distance to the closest point on the segment.
/// The first match wins, so a corner always beats an edge.
#[allow(clippy::too_many_arguments)]
pub fn near_border_or_handle(
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    px: f32,
    py: f32,
    buffer: f32,
    threshold: f32,
) -> Option<Anchor> {
    let left = x - buffer;
    let top = y - buffer;
    let right = left + width + 2.0 * buffer;
    let bottom = top + height + 2.0 * buffer;

    let corners = [
        (Anchor::TopLeft, (left, top)),
        (Anchor::TopRight, (right, top)),
        (Anchor::BottomLeft, (left, bottom)),
        (Anchor::BottomRight, (right, bottom)),
    ];
    for (anchor, (cx, cy)) in corners {
        if distance(px, py, cx, cy) < threshold {
            return Some(anchor);
        }
    }

    let edges = [
        (Anchor::Top, (left, top), (right, top)),
        (Anchor::Left, (left, top), (left, bottom)),
        (Anchor::Right, (right, top), (right, bottom)),
        (Anchor::Bottom, (left, bottom), (right, bottom)),
    ];
    for (anchor, start, end) in edges {
        if let Some(d) = distance_to_segment(px, py, start, end)
            && d < threshold
        {
            return Some(anchor);
        }
    }

    None
}

/// Positions of all eight handles on the grown box, corners first.
/// Used to draw the selection overlay.
pub fn handle_points(x: f32, y: f32, width: f32, height: f32, buffer: f32) -> [(Anchor, (f32, f32)); 8] {
    let left = x - buffer;
    let top = y - buffer;
    let right = left + width + 2.0 * buffer;
    let bottom = top + height + 2.0 * buffer;
    let mid_x = (left + right) / 2.0;
    let mid_y = (top + bottom) / 2.0;
    [
        (Anchor::TopLeft, (left, top)),
        (Anchor::TopRight, (right, top)),
        (Anchor::BottomLeft, (left, bottom)),
        (Anchor::BottomRight, (right, bottom)),
        (Anchor::Top, (mid_x, top)),
        (Anchor::Left, (left, mid_y)),
        (Anchor::Right, (right, mid_y)),
        (Anchor::Bottom, (mid_x, bottom)),
    ]
}

fn distance(ax: f32, ay: f32, bx: f32, by: f32) -> f32 {
    ((ax - bx).powi(2) + (ay - by).powi(2)).sqrt()
}

/// Distance from a point to a segment. `None` for a zero-length segment.
fn distance_to_segment(px: f32, py: f32, start: (f32, f32), end: (f32, f32)) -> Option<f32> {
    let (sx, sy) = start;
    let (ex, ey) = end;
    let len_sq = (ex - sx).powi(2) + (ey - sy).powi(2);
    if len_sq == 0.0 {
        return None;
    }
    let t = (((px - sx) * (ex - sx) + (py - sy) * (ey - sy)) / len_sq).clamp(0.0, 1.0);
    let proj_x = sx + t * (ex - sx);
    let proj_y = sy + t * (ey - sy);
    Some(distance(px, py, proj_x, proj_y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn point_inside_unrotated_box() {
        assert!(point_in_oriented_box(100.0, 100.0, 100.0, 100.0, 0.0, 150.0, 150.0));
        assert!(!point_in_oriented_box(100.0, 100.0, 100.0, 100.0, 0.0, 99.0, 150.0));
    }

    #[test]
    fn box_edges_count_as_inside() {
        assert!(point_in_oriented_box(0.0, 0.0, 50.0, 50.0, 0.0, 0.0, 0.0));
        assert!(point_in_oriented_box(0.0, 0.0, 50.0, 50.0, 0.0, 50.0, 50.0));
        assert!(!point_in_oriented_box(0.0, 0.0, 50.0, 50.0, 0.0, 50.1, 50.0));
    }

    #[test]
    fn rotation_moves_the_hit_area() {
        // 100×50 box rotated 90° about its top-left: the body swings up,
        // to negative y on the canvas.
        assert!(point_in_oriented_box(0.0, 0.0, 100.0, 50.0, 90.0, 25.0, -50.0));
        assert!(!point_in_oriented_box(0.0, 0.0, 100.0, 50.0, 90.0, -25.0, 50.0));
        assert!(!point_in_oriented_box(0.0, 0.0, 100.0, 50.0, 90.0, 25.0, 50.0));
        // Unrotated, the same point is a hit.
        assert!(point_in_oriented_box(0.0, 0.0, 100.0, 50.0, 0.0, 25.0, 40.0));
    }

    #[test]
    fn positive_rotation_is_counter_clockwise_on_screen() {
        let near = |(ax, ay): (f32, f32), (bx, by): (f32, f32)| (ax - bx).abs() < 1e-3 && (ay - by).abs() < 1e-3;

        // The far end of the top edge, (100, 0) locally, sits straight
        // above the pivot at 90° and up-right at 45°.
        assert!(near(to_local(0.0, 0.0, 90.0, 0.0, -100.0), (100.0, 0.0)));
        let d = 100.0 * std::f32::consts::FRAC_1_SQRT_2;
        assert!(near(to_local(0.0, 0.0, 45.0, d, -d), (100.0, 0.0)));
        // The local +y axis points right at 90°.
        assert!(near(to_local(10.0, 20.0, 90.0, 60.0, 20.0), (0.0, 50.0)));
        // A negative angle turns the other way.
        assert!(point_in_oriented_box(0.0, 0.0, 100.0, 50.0, -90.0, -25.0, 50.0));
        assert!(!point_in_oriented_box(0.0, 0.0, 100.0, 50.0, -90.0, 25.0, -50.0));
    }

    #[test]
    fn full_turn_is_identity() {
        assert!(point_in_oriented_box(10.0, 10.0, 40.0, 40.0, 360.0, 30.0, 30.0));
        assert!(!point_in_oriented_box(10.0, 10.0, 40.0, 40.0, 360.0, 5.0, 30.0));
    }

    #[test]
    fn top_left_handle_detected() {
        let hit = near_border_or_handle(100.0, 100.0, 100.0, 100.0, 95.0, 95.0, 5.0, 15.0);
        assert_eq!(hit, Some(Anchor::TopLeft));
    }

    #[test]
    fn corner_beats_edge() {
        // (100, 96) is near both the top-left corner and the top edge.
        let hit = near_border_or_handle(100.0, 100.0, 100.0, 100.0, 100.0, 96.0, 5.0, 15.0);
        assert_eq!(hit, Some(Anchor::TopLeft));
    }

    #[test]
    fn edges_detected_by_projection() {
        let b = |px, py| near_border_or_handle(100.0, 100.0, 100.0, 100.0, px, py, 5.0, 15.0);
        assert_eq!(b(150.0, 97.0), Some(Anchor::Top));
        assert_eq!(b(150.0, 203.0), Some(Anchor::Bottom));
        assert_eq!(b(97.0, 150.0), Some(Anchor::Left));
        assert_eq!(b(203.0, 150.0), Some(Anchor::Right));
        assert_eq!(b(205.0, 205.0), Some(Anchor::BottomRight));
    }

    #[test]
    fn far_from_border_is_none() {
        assert_eq!(near_border_or_handle(100.0, 100.0, 100.0, 100.0, 150.0, 150.0, 5.0, 15.0), None);
        assert_eq!(near_border_or_handle(100.0, 100.0, 100.0, 100.0, 400.0, 400.0, 5.0, 15.0), None);
    }

    #[test]
    fn threshold_is_exclusive() {
        // Exactly 15px above the grown top edge.
        assert_eq!(near_border_or_handle(100.0, 100.0, 100.0, 100.0, 150.0, 80.0, 5.0, 15.0), None);
    }

    #[test]
    fn degenerate_box_does_not_divide_by_zero() {
        // Zero buffer and zero size collapse every edge to a point.
        let hit = near_border_or_handle(10.0, 10.0, 0.0, 0.0, 40.0, 40.0, 0.0, 15.0);
        assert_eq!(hit, None);
        let hit = near_border_or_handle(10.0, 10.0, 0.0, 0.0, 12.0, 12.0, 0.0, 15.0);
        assert_eq!(hit, Some(Anchor::TopLeft));
    }

    #[test]
    fn anchor_names_roundtrip() {
        for anchor in Anchor::CORNERS.iter().chain(Anchor::EDGES.iter()) {
            assert_eq!(anchor.as_str().parse::<Anchor>(), Ok(*anchor));
        }
        assert!("middle".parse::<Anchor>().is_err());
    }

    #[test]
    fn handle_points_sit_on_grown_box() {
        let points = handle_points(100.0, 100.0, 100.0, 50.0, 5.0);
        assert_eq!(points[0], (Anchor::TopLeft, (95.0, 95.0)));
        assert_eq!(points[3], (Anchor::BottomRight, (205.0, 155.0)));
        assert_eq!(points[4], (Anchor::Top, (150.0, 95.0)));
    }
}
