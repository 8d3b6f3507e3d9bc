//! The layer registry: a flat z-stack of layers with a single selection.
//!
//! Layers live in a `Vec` kept in z-order, so `layers[i].order == i` at all
//! times. Every structural change re-stamps the order fields, which keeps
//! them a dense permutation of `0..N`.
//!
//! Operations addressed to an id that is not in the registry are silent
//! no-ops, as are geometry changes on a locked layer. Callers that care can
//! inspect the returned `bool` / `Option`.

use crate::config::EditorConfig;
use crate::id::LayerId;
use crate::layer::Layer;
use crate::model::VisualObject;

/// A registry mutation, for callers that route edits as values
/// (keyboard shortcuts, scripted sessions).
#[derive(Debug, Clone, PartialEq)]
pub enum LayerMutation {
    Delete { id: LayerId },
    Duplicate { id: LayerId },
    MoveUp { id: LayerId },
    MoveDown { id: LayerId },
    MoveToTop { id: LayerId },
    MoveToBottom { id: LayerId },
    ToggleVisibility { id: LayerId },
    ToggleLock { id: LayerId },
    Rename { id: LayerId, name: String },
    Move { id: LayerId, dx: f32, dy: f32 },
    Rotate { id: LayerId, degrees: f32 },
    Resize {
        id: LayerId,
        width: f32,
        height: f32,
        x: Option<f32>,
        y: Option<f32>,
    },
}

#[derive(Debug, Clone, Default)]
pub struct LayerRegistry {
    /// Bottom to top. Index equals `Layer::order`.
    layers: Vec<Layer>,
    selected: Option<LayerId>,
    config: EditorConfig,
}

impl LayerRegistry {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            layers: Vec::new(),
            selected: None,
            config,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn contains(&self, id: LayerId) -> bool {
        self.index_of(id).is_some()
    }

    /// All layers, bottom to top.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn get(&self, id: LayerId) -> Option<&Layer> {
        self.index_of(id).map(|i| &self.layers[i])
    }

    pub fn get_mut(&mut self, id: LayerId) -> Option<&mut Layer> {
        self.index_of(id).map(|i| &mut self.layers[i])
    }

    pub fn selected_id(&self) -> Option<LayerId> {
        self.selected
    }

    pub fn selected(&self) -> Option<&Layer> {
        self.selected.and_then(|id| self.get(id))
    }

    /// Visible layers, bottom to top. This is the compositing order.
    pub fn visible_layers_sorted(&self) -> Vec<&Layer> {
        self.layers.iter().filter(|l| l.visible).collect()
    }

    fn index_of(&self, id: LayerId) -> Option<usize> {
        self.layers.iter().position(|l| l.id() == id)
    }

    // ─── Structure ───────────────────────────────────────────────────────

    /// Append a layer on top of the stack. Its size is seeded from the
    /// object's natural size, clamped to the minimum.
    pub fn add(&mut self, object: impl Into<VisualObject>, name: Option<&str>) -> LayerId {
        let object = object.into();
        let fallback = self.config.default_object_size;
        let (w, h) = object.natural_size().unwrap_or((fallback, fallback));
        let min = self.config.min_size;

        let mut layer = Layer::new(object, name, w.max(min), h.max(min));
        layer.order = self.layers.len();
        let id = layer.id();
        log::debug!(
            "add {} {:?} ({}) at order {}",
            id,
            layer.name,
            layer.object().kind_name(),
            layer.order
        );
        self.layers.push(layer);
        id
    }

    /// Remove a layer. Clears the selection if it pointed at it.
    pub fn delete(&mut self, id: LayerId) -> bool {
        let Some(idx) = self.index_of(id) else {
            return false;
        };
        self.layers.remove(idx);
        if self.selected == Some(id) {
            self.selected = None;
        }
        self.restamp_order();
        log::debug!("delete {id}");
        true
    }

    /// Deep-copy a layer, offset it, and put the copy on top.
    pub fn duplicate(&mut self, id: LayerId) -> Option<LayerId> {
        let idx = self.index_of(id)?;
        let source = &self.layers[idx];
        let mut copy = source.duplicate(
            format!("{} (Copy)", source.name),
            self.config.duplicate_offset,
        );
        copy.order = self.layers.len();
        let new_id = copy.id();
        log::debug!("duplicate {id} → {new_id}");
        self.layers.push(copy);
        Some(new_id)
    }

    /// Swap with the layer directly above. No-op at the top.
    pub fn move_up(&mut self, id: LayerId) -> bool {
        match self.index_of(id) {
            Some(idx) if idx + 1 < self.layers.len() => {
                self.swap(idx, idx + 1);
                true
            }
            _ => false,
        }
    }

    /// Swap with the layer directly below. No-op at the bottom.
    pub fn move_down(&mut self, id: LayerId) -> bool {
        match self.index_of(id) {
            Some(idx) if idx > 0 => {
                self.swap(idx, idx - 1);
                true
            }
            _ => false,
        }
    }

    pub fn move_to_top(&mut self, id: LayerId) -> bool {
        let Some(idx) = self.index_of(id) else {
            return false;
        };
        let layer = self.layers.remove(idx);
        self.layers.push(layer);
        self.restamp_order();
        true
    }

    pub fn move_to_bottom(&mut self, id: LayerId) -> bool {
        let Some(idx) = self.index_of(id) else {
            return false;
        };
        let layer = self.layers.remove(idx);
        self.layers.insert(0, layer);
        self.restamp_order();
        true
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.layers.swap(a, b);
        self.layers[a].order = a;
        self.layers[b].order = b;
    }

    fn restamp_order(&mut self) {
        for (i, layer) in self.layers.iter_mut().enumerate() {
            layer.order = i;
        }
    }

    // ─── Selection ───────────────────────────────────────────────────────

    /// Make `id` the single selected layer.
    pub fn select(&mut self, id: LayerId) -> bool {
        let Some(idx) = self.index_of(id) else {
            return false;
        };
        self.deselect();
        self.layers[idx].selected = true;
        self.selected = Some(id);
        true
    }

    pub fn deselect(&mut self) {
        if let Some(prev) = self.selected.take()
            && let Some(layer) = self.get_mut(prev)
        {
            layer.selected = false;
        }
    }

    /// Select the topmost visible, unlocked layer under the point.
    /// A miss clears the selection.
    pub fn select_at_point(&mut self, px: f32, py: f32) -> Option<LayerId> {
        let hit = self
            .layers
            .iter()
            .rev()
            .find(|l| l.visible && !l.locked && l.hit_test(px, py))
            .map(Layer::id);

        match hit {
            Some(id) => {
                self.select(id);
                log::trace!("select_at_point ({px}, {py}) → {id}");
            }
            None => self.deselect(),
        }
        hit
    }

    // ─── Flags ───────────────────────────────────────────────────────────

    pub fn toggle_visibility(&mut self, id: LayerId) -> bool {
        self.get_mut(id).map(|l| l.visible = !l.visible).is_some()
    }

    pub fn toggle_lock(&mut self, id: LayerId) -> bool {
        self.get_mut(id).map(|l| l.locked = !l.locked).is_some()
    }

    pub fn set_visible(&mut self, id: LayerId, visible: bool) -> bool {
        self.get_mut(id).map(|l| l.visible = visible).is_some()
    }

    pub fn set_locked(&mut self, id: LayerId, locked: bool) -> bool {
        self.get_mut(id).map(|l| l.locked = locked).is_some()
    }

    pub fn rename(&mut self, id: LayerId, name: impl Into<String>) -> bool {
        let name = name.into();
        self.get_mut(id).map(|l| l.name = name).is_some()
    }

    // ─── Geometry (lock-gated) ───────────────────────────────────────────

    fn unlocked_mut(&mut self, id: LayerId) -> Option<&mut Layer> {
        self.get_mut(id).filter(|l| !l.locked)
    }

    pub fn move_layer(&mut self, id: LayerId, dx: f32, dy: f32) -> bool {
        self.unlocked_mut(id).map(|l| l.move_by(dx, dy)).is_some()
    }

    /// Set an absolute position.
    pub fn place(&mut self, id: LayerId, x: f32, y: f32) -> bool {
        self.unlocked_mut(id)
            .map(|l| {
                l.x = x;
                l.y = y;
            })
            .is_some()
    }

    /// Rotate by `degrees`; the result is wrapped into `[0, 360)`.
    pub fn rotate_layer(&mut self, id: LayerId, degrees: f32) -> bool {
        self.unlocked_mut(id).map(|l| l.rotate_by(degrees)).is_some()
    }

    /// Set the size (clamped to the minimum) and, when given, the position.
    pub fn resize_layer(
        &mut self,
        id: LayerId,
        width: f32,
        height: f32,
        x: Option<f32>,
        y: Option<f32>,
    ) -> bool {
        let min = self.config.min_size;
        self.unlocked_mut(id)
            .map(|l| l.resize(width, height, x, y, min))
            .is_some()
    }

    /// Refit the size to the object's natural size, keeping the position.
    /// Used after a text re-render changes the bitmap.
    pub fn fit_to_content(&mut self, id: LayerId) -> bool {
        let min = self.config.min_size;
        let Some(layer) = self.unlocked_mut(id) else {
            return false;
        };
        let Some((w, h)) = layer.object().natural_size() else {
            return false;
        };
        layer.resize(w, h, None, None, min);
        true
    }

    // ─── Mutations as values ─────────────────────────────────────────────

    /// Apply a mutation. Returns whether anything changed.
    pub fn apply(&mut self, mutation: LayerMutation) -> bool {
        match mutation {
            LayerMutation::Delete { id } => self.delete(id),
            LayerMutation::Duplicate { id } => self.duplicate(id).is_some(),
            LayerMutation::MoveUp { id } => self.move_up(id),
            LayerMutation::MoveDown { id } => self.move_down(id),
            LayerMutation::MoveToTop { id } => self.move_to_top(id),
            LayerMutation::MoveToBottom { id } => self.move_to_bottom(id),
            LayerMutation::ToggleVisibility { id } => self.toggle_visibility(id),
            LayerMutation::ToggleLock { id } => self.toggle_lock(id),
            LayerMutation::Rename { id, name } => self.rename(id, name),
            LayerMutation::Move { id, dx, dy } => self.move_layer(id, dx, dy),
            LayerMutation::Rotate { id, degrees } => self.rotate_layer(id, degrees),
            LayerMutation::Resize {
                id,
                width,
                height,
                x,
                y,
            } => self.resize_layer(id, width, height, x, y),
        }
    }
}
