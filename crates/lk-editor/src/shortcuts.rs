//! Keyboard shortcut mapping.
//!
//! Maps key + modifier combos to layer actions on the current selection.
//! There is no binding that aborts a drag, resize, or rotation in progress:
//! releasing the button is the only way out.

use lk_core::id::LayerId;
use lk_core::registry::LayerMutation;

/// Actions that keyboard shortcuts can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    // ── Edit ──
    Delete,
    Duplicate,

    // ── Z-order ──
    SendBackward,
    BringForward,
    SendToBack,
    BringToFront,

    // ── Flags ──
    ToggleVisibility,
    ToggleLock,
}

impl ShortcutAction {
    /// The registry mutation this action performs on `id`.
    pub fn to_mutation(self, id: LayerId) -> LayerMutation {
        match self {
            ShortcutAction::Delete => LayerMutation::Delete { id },
            ShortcutAction::Duplicate => LayerMutation::Duplicate { id },
            ShortcutAction::SendBackward => LayerMutation::MoveDown { id },
            ShortcutAction::BringForward => LayerMutation::MoveUp { id },
            ShortcutAction::SendToBack => LayerMutation::MoveToBottom { id },
            ShortcutAction::BringToFront => LayerMutation::MoveToTop { id },
            ShortcutAction::ToggleVisibility => LayerMutation::ToggleVisibility { id },
            ShortcutAction::ToggleLock => LayerMutation::ToggleLock { id },
        }
    }
}

/// Resolves key events into shortcut actions.
///
/// Uses platform-aware modifier detection: on macOS `meta` is ⌘,
/// on other platforms `ctrl` serves the same role.
pub struct ShortcutMap;

impl ShortcutMap {
    /// Resolve a key event to an action.
    ///
    /// `key` is the `KeyboardEvent.key` value (e.g. `"d"`, `"Delete"`).
    /// Returns `None` if the key combo has no binding.
    pub fn resolve(
        key: &str,
        ctrl: bool,
        shift: bool,
        _alt: bool,
        meta: bool,
    ) -> Option<ShortcutAction> {
        let cmd = ctrl || meta;

        if cmd && shift {
            return match key {
                "[" | "{" => Some(ShortcutAction::SendToBack),
                "]" | "}" => Some(ShortcutAction::BringToFront),
                _ => None,
            };
        }

        if cmd {
            return match key {
                "d" | "D" => Some(ShortcutAction::Duplicate),
                "[" => Some(ShortcutAction::SendBackward),
                "]" => Some(ShortcutAction::BringForward),
                "h" | "H" => Some(ShortcutAction::ToggleVisibility),
                "l" | "L" => Some(ShortcutAction::ToggleLock),
                _ => None,
            };
        }

        match key {
            "Delete" | "Backspace" => Some(ShortcutAction::Delete),
            _ => None,
        }
    }
}
