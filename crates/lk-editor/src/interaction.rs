//! Pointer interaction state machine.
//!
//! Translates pointer events into registry edits on the selected layer:
//!
//! | Gesture | Result |
//! |---------|--------|
//! | Primary press on a handle of the selection | Resize from that anchor |
//! | Primary press on a layer, then move | Select it, then drag |
//! | Primary press on empty canvas | Clear the selection |
//! | Secondary press, then move | Rotate the selection toward the cursor |
//!
//! Releasing the button that started a gesture ends it. There is no
//! other way to cancel.

use crate::input::{Buttons, InputEvent, PointerButton};
use lk_core::geometry::{Anchor, near_border_or_handle};
use lk_core::registry::{LayerMutation, LayerRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    Dragging,
    Resizing,
    Rotating,
}

#[derive(Debug, Clone, Default)]
pub struct InteractionController {
    state: InteractionState,
    /// Anchor grabbed at the start of a resize.
    resize_edge: Option<Anchor>,
    /// Layer position and size when the resize started.
    original_pos: (f32, f32),
    original_size: (f32, f32),
    /// Pointer offset from the layer's top-left, captured on select.
    drag_offset: (f32, f32),
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn resize_edge(&self) -> Option<Anchor> {
        self.resize_edge
    }

    /// Handle one pointer event. Returns whether the registry changed.
    ///
    /// Key events are ignored here; the session routes them to shortcuts.
    pub fn handle(&mut self, event: &InputEvent, registry: &mut LayerRegistry) -> bool {
        match *event {
            InputEvent::PointerDown { button, x, y } => self.press(button, x, y, registry),
            InputEvent::PointerUp { button, .. } => {
                self.release(button);
                false
            }
            InputEvent::PointerMove { x, y, buttons } => self.motion(x, y, buttons, registry),
            InputEvent::Key { .. } => false,
        }
    }

    fn transition(&mut self, next: InteractionState) {
        if self.state != next {
            log::debug!("interaction {:?} → {:?}", self.state, next);
            self.state = next;
        }
    }

    // ─── Press / release ─────────────────────────────────────────────────

    fn press(&mut self, button: PointerButton, px: f32, py: f32, registry: &mut LayerRegistry) -> bool {
        match button {
            PointerButton::Primary => self.press_primary(px, py, registry),
            PointerButton::Secondary => {
                if registry.selected().is_some() {
                    self.transition(InteractionState::Rotating);
                }
                false
            }
            PointerButton::Middle => false,
        }
    }

    /// Grab a handle or pick a layer. During a rotation only the picking
    /// runs; the gesture itself ends on the secondary release.
    fn press_primary(&mut self, px: f32, py: f32, registry: &mut LayerRegistry) -> bool {
        let rotating = self.state == InteractionState::Rotating;
        let config = registry.config();
        let handle = registry.selected().filter(|_| !rotating).and_then(|layer| {
            near_border_or_handle(
                layer.x(),
                layer.y(),
                layer.width(),
                layer.height(),
                px,
                py,
                config.border_buffer,
                config.handle_threshold,
            )
            .map(|anchor| (anchor, layer.bounds()))
        });

        if let Some((anchor, bounds)) = handle {
            self.resize_edge = Some(anchor);
            self.original_pos = (bounds.x, bounds.y);
            self.original_size = (bounds.width, bounds.height);
            self.transition(InteractionState::Resizing);
            return false;
        }

        let before = registry.selected_id();
        let hit = registry.select_at_point(px, py);
        if let Some(layer) = hit.and_then(|id| registry.get(id)) {
            self.drag_offset = (px - layer.x(), py - layer.y());
        }
        if !rotating {
            self.resize_edge = None;
            self.transition(InteractionState::Idle);
        }
        hit != before
    }

    fn release(&mut self, button: PointerButton) {
        match (button, self.state) {
            (PointerButton::Primary, InteractionState::Dragging | InteractionState::Resizing) => {
                self.resize_edge = None;
                self.transition(InteractionState::Idle);
            }
            (PointerButton::Secondary, InteractionState::Rotating) => {
                self.transition(InteractionState::Idle);
            }
            _ => {}
        }
    }

    // ─── Motion ──────────────────────────────────────────────────────────

    fn motion(&mut self, px: f32, py: f32, buttons: Buttons, registry: &mut LayerRegistry) -> bool {
        if self.state == InteractionState::Resizing {
            return self.resize_to(px, py, registry);
        }
        if buttons.primary && registry.selected().is_some() {
            if self.state != InteractionState::Rotating {
                self.transition(InteractionState::Dragging);
            }
            return self.drag_to(px, py, registry);
        }
        if self.state == InteractionState::Rotating {
            return self.rotate_toward(px, py, registry);
        }
        false
    }

    fn drag_to(&mut self, px: f32, py: f32, registry: &mut LayerRegistry) -> bool {
        let Some(layer) = registry.selected() else {
            return false;
        };
        let id = layer.id();
        let dx = px - self.drag_offset.0 - layer.x();
        let dy = py - self.drag_offset.1 - layer.y();
        log::trace!("drag {id} by ({dx}, {dy})");
        registry.apply(LayerMutation::Move { id, dx, dy })
    }

    /// Point the layer at the cursor: its rotation becomes the angle from
    /// its center to the pointer.
    fn rotate_toward(&mut self, px: f32, py: f32, registry: &mut LayerRegistry) -> bool {
        let Some(layer) = registry.selected() else {
            return false;
        };
        let id = layer.id();
        let (cx, cy) = layer.center();
        let angle = (py - cy).atan2(px - cx).to_degrees();
        let degrees = angle - layer.rotation();
        log::trace!("rotate {id} toward {angle}°");
        registry.apply(LayerMutation::Rotate { id, degrees })
    }

    fn resize_to(&mut self, mx: f32, my: f32, registry: &mut LayerRegistry) -> bool {
        let (Some(anchor), Some(id)) = (self.resize_edge, registry.selected_id()) else {
            return false;
        };
        let config = registry.config();
        let b = config.border_buffer;
        let min = config.min_size;
        let reanchor = config.clamp_anchor_offset();

        let (ox, oy) = self.original_pos;
        let (ow, oh) = self.original_size;
        let bx = ox - b;
        let by = oy - b;

        let (mut width, mut x) = if anchor.moves_left_edge() {
            (ow + (ox - mx + b), Some(mx - b))
        } else if anchor.affects_width() {
            (mx - bx - b, None)
        } else {
            (ow, None)
        };
        let (mut height, mut y) = if anchor.moves_top_edge() {
            (oh + (oy - my + b), Some(my - b))
        } else if anchor.affects_height() {
            (my - by - b, None)
        } else {
            (oh, None)
        };

        if width < min {
            width = min;
            if anchor.moves_left_edge() {
                x = Some(ox + ow - reanchor);
            }
        }
        if height < min {
            height = min;
            if anchor.moves_top_edge() {
                y = Some(oy + oh - reanchor);
            }
        }

        log::trace!("resize {id} from {anchor}: {width}×{height} at ({x:?}, {y:?})");
        registry.apply(LayerMutation::Resize {
            id,
            width,
            height,
            x,
            y,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lk_core::id::LayerId;
    use lk_core::model::{ShapeKind, ShapeObject};
    use pretty_assertions::assert_eq;

    /// One selected 100×100 square at (100, 100).
    fn setup() -> (LayerRegistry, LayerId) {
        let mut reg = LayerRegistry::default();
        let id = reg.add(ShapeObject::new(ShapeKind::Square, 100.0, 100.0), Some("Box"));
        reg.place(id, 100.0, 100.0);
        reg.select(id);
        (reg, id)
    }

    fn geometry(reg: &LayerRegistry, id: LayerId) -> (f32, f32, f32, f32) {
        let l = reg.get(id).unwrap();
        (l.x(), l.y(), l.width(), l.height())
    }

    fn press(ctrl: &mut InteractionController, reg: &mut LayerRegistry, x: f32, y: f32) {
        ctrl.handle(&InputEvent::press(PointerButton::Primary, x, y), reg);
    }

    fn drag(ctrl: &mut InteractionController, reg: &mut LayerRegistry, x: f32, y: f32) -> bool {
        ctrl.handle(&InputEvent::motion(x, y, Buttons::only(PointerButton::Primary)), reg)
    }

    #[test]
    fn press_on_corner_starts_resize() {
        let (mut reg, _) = setup();
        let mut ctrl = InteractionController::new();
        press(&mut ctrl, &mut reg, 95.0, 95.0);
        assert_eq!(ctrl.state(), InteractionState::Resizing);
        assert_eq!(ctrl.resize_edge(), Some(Anchor::TopLeft));
    }

    #[test]
    fn resize_bottom_right_grows() {
        let (mut reg, id) = setup();
        let mut ctrl = InteractionController::new();
        press(&mut ctrl, &mut reg, 205.0, 205.0);
        assert_eq!(ctrl.resize_edge(), Some(Anchor::BottomRight));
        drag(&mut ctrl, &mut reg, 250.0, 230.0);
        assert_eq!(geometry(&reg, id), (100.0, 100.0, 150.0, 130.0));
    }

    #[test]
    fn resize_top_left_moves_origin() {
        let (mut reg, id) = setup();
        let mut ctrl = InteractionController::new();
        press(&mut ctrl, &mut reg, 95.0, 95.0);
        drag(&mut ctrl, &mut reg, 75.0, 85.0);
        // width = 100 + (100 − 75 + 5), x = 75 − 5
        assert_eq!(geometry(&reg, id), (70.0, 80.0, 130.0, 120.0));
    }

    #[test]
    fn resize_top_right_clamp_keeps_x() {
        let (mut reg, id) = setup();
        let mut ctrl = InteractionController::new();
        press(&mut ctrl, &mut reg, 205.0, 95.0);
        assert_eq!(ctrl.resize_edge(), Some(Anchor::TopRight));
        drag(&mut ctrl, &mut reg, 50.0, 50.0);
        let (x, y, w, h) = geometry(&reg, id);
        assert_eq!(w, 20.0);
        assert_eq!(x, 100.0);
        // Height grew upward: 100 + (100 − 50 + 5)
        assert_eq!((y, h), (45.0, 155.0));
    }

    #[test]
    fn resize_left_clamp_reanchors_x() {
        let (mut reg, id) = setup();
        let mut ctrl = InteractionController::new();
        press(&mut ctrl, &mut reg, 95.0, 150.0);
        assert_eq!(ctrl.resize_edge(), Some(Anchor::Left));
        drag(&mut ctrl, &mut reg, 400.0, 10.0);
        // Clamped: x = 100 + 100 − 15; height untouched by a left edge.
        assert_eq!(geometry(&reg, id), (185.0, 100.0, 20.0, 100.0));
    }

    #[test]
    fn resize_top_clamp_reanchors_y() {
        let (mut reg, id) = setup();
        let mut ctrl = InteractionController::new();
        press(&mut ctrl, &mut reg, 150.0, 95.0);
        assert_eq!(ctrl.resize_edge(), Some(Anchor::Top));
        drag(&mut ctrl, &mut reg, 150.0, 500.0);
        assert_eq!(geometry(&reg, id), (100.0, 185.0, 100.0, 20.0));
    }

    #[test]
    fn resize_never_goes_below_minimum() {
        let (mut reg, id) = setup();
        for anchor_point in [(95.0, 95.0), (205.0, 95.0), (95.0, 205.0), (205.0, 205.0)] {
            let mut ctrl = InteractionController::new();
            press(&mut ctrl, &mut reg, anchor_point.0, anchor_point.1);
            for (mx, my) in [(-1000.0, -1000.0), (1000.0, -1000.0), (150.0, 150.0), (-5.0, 2000.0)] {
                drag(&mut ctrl, &mut reg, mx, my);
                let (_, _, w, h) = geometry(&reg, id);
                assert!(w >= 20.0 && h >= 20.0, "{w}×{h} after ({mx}, {my})");
            }
            ctrl.handle(&InputEvent::release(PointerButton::Primary, 0.0, 0.0), &mut reg);
            reg.resize_layer(id, 100.0, 100.0, Some(100.0), Some(100.0));
        }
    }

    #[test]
    fn release_ends_resize() {
        let (mut reg, _) = setup();
        let mut ctrl = InteractionController::new();
        press(&mut ctrl, &mut reg, 95.0, 95.0);
        ctrl.handle(&InputEvent::release(PointerButton::Primary, 95.0, 95.0), &mut reg);
        assert_eq!(ctrl.state(), InteractionState::Idle);
        assert_eq!(ctrl.resize_edge(), None);
    }

    #[test]
    fn drag_keeps_grab_offset() {
        let (mut reg, id) = setup();
        let mut ctrl = InteractionController::new();
        press(&mut ctrl, &mut reg, 150.0, 160.0);
        assert_eq!(ctrl.state(), InteractionState::Idle);
        assert!(drag(&mut ctrl, &mut reg, 170.0, 200.0));
        assert_eq!(ctrl.state(), InteractionState::Dragging);
        assert_eq!(geometry(&reg, id), (120.0, 140.0, 100.0, 100.0));

        ctrl.handle(&InputEvent::release(PointerButton::Primary, 170.0, 200.0), &mut reg);
        assert_eq!(ctrl.state(), InteractionState::Idle);
    }

    #[test]
    fn move_without_button_does_nothing() {
        let (mut reg, id) = setup();
        let mut ctrl = InteractionController::new();
        press(&mut ctrl, &mut reg, 150.0, 150.0);
        assert!(!ctrl.handle(&InputEvent::motion(10.0, 10.0, Buttons::NONE), &mut reg));
        assert_eq!(geometry(&reg, id), (100.0, 100.0, 100.0, 100.0));
    }

    #[test]
    fn press_on_empty_canvas_clears_selection() {
        let (mut reg, id) = setup();
        let mut ctrl = InteractionController::new();
        press(&mut ctrl, &mut reg, 600.0, 600.0);
        assert_eq!(reg.selected_id(), None);
        assert!(!drag(&mut ctrl, &mut reg, 650.0, 650.0));
        assert_eq!(geometry(&reg, id), (100.0, 100.0, 100.0, 100.0));
    }

    #[test]
    fn locked_layer_does_not_drag() {
        let (mut reg, id) = setup();
        reg.set_locked(id, true);
        let mut ctrl = InteractionController::new();
        // Still selected, but a locked layer is not hit by select_at_point.
        press(&mut ctrl, &mut reg, 150.0, 150.0);
        assert_eq!(reg.selected_id(), None);
        drag(&mut ctrl, &mut reg, 170.0, 170.0);
        assert_eq!(geometry(&reg, id), (100.0, 100.0, 100.0, 100.0));
    }

    #[test]
    fn secondary_press_rotates_toward_cursor() {
        let (mut reg, id) = setup();
        let mut ctrl = InteractionController::new();
        ctrl.handle(&InputEvent::press(PointerButton::Secondary, 150.0, 150.0), &mut reg);
        assert_eq!(ctrl.state(), InteractionState::Rotating);

        // Straight below the center (150, 150) → 90°.
        ctrl.handle(&InputEvent::motion(150.0, 250.0, Buttons::only(PointerButton::Secondary)), &mut reg);
        assert!((reg.get(id).unwrap().rotation() - 90.0).abs() < 1e-3);

        // Directly left → 180°, absolute rather than accumulated.
        ctrl.handle(&InputEvent::motion(50.0, 150.0, Buttons::only(PointerButton::Secondary)), &mut reg);
        assert!((reg.get(id).unwrap().rotation() - 180.0).abs() < 1e-3);

        // Above → −90° wraps to 270°.
        ctrl.handle(&InputEvent::motion(150.0, 0.0, Buttons::only(PointerButton::Secondary)), &mut reg);
        assert!((reg.get(id).unwrap().rotation() - 270.0).abs() < 1e-3);

        ctrl.handle(&InputEvent::release(PointerButton::Secondary, 150.0, 0.0), &mut reg);
        assert_eq!(ctrl.state(), InteractionState::Idle);
    }

    #[test]
    fn secondary_press_without_selection_stays_idle() {
        let mut reg = LayerRegistry::default();
        let mut ctrl = InteractionController::new();
        ctrl.handle(&InputEvent::press(PointerButton::Secondary, 10.0, 10.0), &mut reg);
        assert_eq!(ctrl.state(), InteractionState::Idle);
    }

    #[test]
    fn primary_release_does_not_end_rotation() {
        let (mut reg, _) = setup();
        let mut ctrl = InteractionController::new();
        ctrl.handle(&InputEvent::press(PointerButton::Secondary, 150.0, 150.0), &mut reg);
        ctrl.handle(&InputEvent::release(PointerButton::Primary, 150.0, 150.0), &mut reg);
        assert_eq!(ctrl.state(), InteractionState::Rotating);
    }

    #[test]
    fn primary_click_keeps_rotation() {
        let (mut reg, id) = setup();
        let mut ctrl = InteractionController::new();
        ctrl.handle(&InputEvent::press(PointerButton::Secondary, 150.0, 150.0), &mut reg);
        press(&mut ctrl, &mut reg, 150.0, 150.0);
        ctrl.handle(&InputEvent::release(PointerButton::Primary, 150.0, 150.0), &mut reg);
        assert_eq!(ctrl.state(), InteractionState::Rotating);

        ctrl.handle(&InputEvent::motion(50.0, 150.0, Buttons::only(PointerButton::Secondary)), &mut reg);
        assert_eq!(ctrl.state(), InteractionState::Rotating);
        assert!((reg.get(id).unwrap().rotation() - 180.0).abs() < 1e-3);
    }

    #[test]
    fn primary_drag_during_rotation_moves_without_ending_it() {
        let (mut reg, id) = setup();
        let mut ctrl = InteractionController::new();
        ctrl.handle(&InputEvent::press(PointerButton::Secondary, 150.0, 150.0), &mut reg);
        press(&mut ctrl, &mut reg, 150.0, 150.0);
        let both = Buttons::only(PointerButton::Secondary).with(PointerButton::Primary);
        ctrl.handle(&InputEvent::motion(170.0, 150.0, both), &mut reg);
        assert_eq!(ctrl.state(), InteractionState::Rotating);
        assert_eq!(reg.get(id).unwrap().x(), 120.0);

        ctrl.handle(&InputEvent::release(PointerButton::Primary, 170.0, 150.0), &mut reg);
        assert_eq!(ctrl.state(), InteractionState::Rotating);
        ctrl.handle(&InputEvent::release(PointerButton::Secondary, 170.0, 150.0), &mut reg);
        assert_eq!(ctrl.state(), InteractionState::Idle);
    }

    #[test]
    fn handles_are_not_grabbed_while_rotating() {
        let (mut reg, id) = setup();
        let mut ctrl = InteractionController::new();
        ctrl.handle(&InputEvent::press(PointerButton::Secondary, 150.0, 150.0), &mut reg);
        // (95, 95) is the top-left handle of the selected box.
        press(&mut ctrl, &mut reg, 95.0, 95.0);
        assert_eq!(ctrl.state(), InteractionState::Rotating);
        assert_eq!(geometry(&reg, id), (100.0, 100.0, 100.0, 100.0));
    }
}
