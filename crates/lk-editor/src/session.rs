//! Editor session: the explicit application loop.
//!
//! A host owns one `EditorSession`, queues input as it arrives, and calls
//! `tick` once per frame. Each tick drains a bounded number of events so a
//! burst of pointer moves can never stall a frame; the rest wait for the
//! next tick.

use crate::input::InputEvent;
use crate::interaction::InteractionController;
use crate::shortcuts::{ShortcutAction, ShortcutMap};
use lk_core::config::EditorConfig;
use lk_core::id::LayerId;
use lk_core::model::VisualObject;
use lk_core::registry::LayerRegistry;
use std::collections::VecDeque;

pub struct EditorSession {
    /// The layer stack (single source of truth for geometry and selection).
    pub registry: LayerRegistry,

    pub controller: InteractionController,

    pending: VecDeque<InputEvent>,

    /// Set when the registry changed and the canvas needs a repaint.
    dirty: bool,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl EditorSession {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            registry: LayerRegistry::new(config),
            controller: InteractionController::new(),
            pending: VecDeque::new(),
            dirty: false,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        self.registry.config()
    }

    /// Add an object at `(x, y)` and select it.
    pub fn insert(&mut self, object: impl Into<VisualObject>, name: Option<&str>, x: f32, y: f32) -> LayerId {
        let id = self.registry.add(object, name);
        self.registry.place(id, x, y);
        self.registry.select(id);
        self.dirty = true;
        id
    }

    // ─── Event queue ─────────────────────────────────────────────────────

    pub fn queue(&mut self, event: InputEvent) {
        self.pending.push_back(event);
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Queue `events`, then process at most `budget` queued events.
    /// Returns how many were processed.
    pub fn tick(&mut self, events: impl IntoIterator<Item = InputEvent>, budget: usize) -> usize {
        self.pending.extend(events);
        let mut processed = 0;
        while processed < budget {
            let Some(event) = self.pending.pop_front() else {
                break;
            };
            self.dispatch(&event);
            processed += 1;
        }
        if !self.pending.is_empty() {
            log::trace!("tick budget reached, {} events deferred", self.pending.len());
        }
        processed
    }

    /// Whether a repaint is due. Reading clears the flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    fn dispatch(&mut self, event: &InputEvent) {
        let changed = match event {
            InputEvent::Key {
                key,
                ctrl,
                shift,
                alt,
                meta,
            } => match ShortcutMap::resolve(key, *ctrl, *shift, *alt, *meta) {
                Some(action) => self.run_shortcut(action),
                None => false,
            },
            _ => self.controller.handle(event, &mut self.registry),
        };
        self.dirty |= changed;
    }

    /// Apply a shortcut to the selected layer. No selection, no effect.
    pub fn run_shortcut(&mut self, action: ShortcutAction) -> bool {
        let Some(id) = self.registry.selected_id() else {
            return false;
        };
        log::debug!("shortcut {action:?} on {id}");
        match action {
            ShortcutAction::Duplicate => match self.registry.duplicate(id) {
                Some(copy) => self.registry.select(copy),
                None => false,
            },
            other => self.registry.apply(other.to_mutation(id)),
        }
    }
}
