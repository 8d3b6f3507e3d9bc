//! A layer: one visual object plus placement, z-order, and UI state.
//!
//! The layer is the single owner of position, size, and rotation. Its
//! wrapped object contributes only a natural size at creation time.

use crate::geometry::point_in_oriented_box;
use crate::id::LayerId;
use crate::model::VisualObject;

/// Axis-aligned box of a layer before rotation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

#[derive(Debug, Clone)]
pub struct Layer {
    id: LayerId,
    pub(crate) name: String,
    /// Top-left of the unrotated bounding box.
    pub(crate) x: f32,
    pub(crate) y: f32,
    pub(crate) width: f32,
    pub(crate) height: f32,
    /// Degrees in `[0, 360)`.
    pub(crate) rotation: f32,
    /// Dense z-index, 0 = bottom. Maintained by the registry.
    pub(crate) order: usize,
    pub(crate) visible: bool,
    pub(crate) locked: bool,
    pub(crate) selected: bool,
    object: VisualObject,
}

impl Layer {
    pub(crate) fn new(object: VisualObject, name: Option<&str>, width: f32, height: f32) -> Self {
        let id = LayerId::next();
        Self {
            id,
            name: name.map_or_else(|| format!("Layer {}", id.get()), str::to_string),
            x: 0.0,
            y: 0.0,
            width,
            height,
            rotation: 0.0,
            order: 0,
            visible: true,
            locked: false,
            selected: false,
            object,
        }
    }

    pub fn id(&self) -> LayerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn object(&self) -> &VisualObject {
        &self.object
    }

    /// Payload access for property setters. Geometry stays registry-owned.
    pub fn object_mut(&mut self) -> &mut VisualObject {
        &mut self.object
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn bounds(&self) -> Bounds {
        Bounds {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
        }
    }

    pub fn center(&self) -> (f32, f32) {
        self.bounds().center()
    }

    /// Rotation-aware hit test.
    pub fn hit_test(&self, px: f32, py: f32) -> bool {
        point_in_oriented_box(self.x, self.y, self.width, self.height, self.rotation, px, py)
    }

    pub(crate) fn move_by(&mut self, dx: f32, dy: f32) {
        self.x += dx;
        self.y += dy;
    }

    pub(crate) fn rotate_by(&mut self, delta_degrees: f32) {
        self.rotation = normalize_degrees(self.rotation + delta_degrees);
    }

    pub(crate) fn resize(&mut self, width: f32, height: f32, x: Option<f32>, y: Option<f32>, min_size: f32) {
        self.width = width.max(min_size);
        self.height = height.max(min_size);
        if let Some(x) = x {
            self.x = x;
        }
        if let Some(y) = y {
            self.y = y;
        }
    }

    /// Deep copy under a fresh id. Order and selection are left for the
    /// registry to assign.
    pub(crate) fn duplicate(&self, name: String, offset: (f32, f32)) -> Self {
        Self {
            id: LayerId::next(),
            name,
            x: self.x + offset.0,
            y: self.y + offset.1,
            selected: false,
            ..self.clone()
        }
    }
}

/// Wrap any angle into `[0, 360)`.
pub fn normalize_degrees(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}
