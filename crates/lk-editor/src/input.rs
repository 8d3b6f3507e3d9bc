//! Input events delivered to the editor.
//!
//! Hosts translate their native pointer and keyboard events into
//! `InputEvent`s. Coordinates are canvas pixels.

use serde::{Deserialize, Serialize};

/// Which pointer button an event refers to.
///
/// Primary selects, drags, and resizes. Secondary rotates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

impl PointerButton {
    /// Map a DOM-style `MouseEvent.button` index.
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(PointerButton::Primary),
            1 => Some(PointerButton::Middle),
            2 => Some(PointerButton::Secondary),
            _ => None,
        }
    }
}

/// The set of buttons held during a pointer move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Buttons {
    pub primary: bool,
    pub secondary: bool,
    pub middle: bool,
}

impl Buttons {
    pub const NONE: Buttons = Buttons {
        primary: false,
        secondary: false,
        middle: false,
    };

    pub fn only(button: PointerButton) -> Self {
        Self::NONE.with(button)
    }

    pub fn with(mut self, button: PointerButton) -> Self {
        match button {
            PointerButton::Primary => self.primary = true,
            PointerButton::Secondary => self.secondary = true,
            PointerButton::Middle => self.middle = true,
        }
        self
    }

    pub fn contains(self, button: PointerButton) -> bool {
        match button {
            PointerButton::Primary => self.primary,
            PointerButton::Secondary => self.secondary,
            PointerButton::Middle => self.middle,
        }
    }

    /// Decode a DOM-style `MouseEvent.buttons` bitmask.
    pub fn from_bits(bits: u8) -> Self {
        Self {
            primary: bits & 1 != 0,
            secondary: bits & 2 != 0,
            middle: bits & 4 != 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    PointerDown {
        button: PointerButton,
        x: f32,
        y: f32,
    },
    PointerUp {
        button: PointerButton,
        x: f32,
        y: f32,
    },
    PointerMove {
        x: f32,
        y: f32,
        buttons: Buttons,
    },
    /// `key` is the `KeyboardEvent.key` value (e.g. `"d"`, `"Delete"`).
    Key {
        key: String,
        ctrl: bool,
        shift: bool,
        alt: bool,
        meta: bool,
    },
}

impl InputEvent {
    pub fn press(button: PointerButton, x: f32, y: f32) -> Self {
        InputEvent::PointerDown { button, x, y }
    }

    pub fn release(button: PointerButton, x: f32, y: f32) -> Self {
        InputEvent::PointerUp { button, x, y }
    }

    pub fn motion(x: f32, y: f32, buttons: Buttons) -> Self {
        InputEvent::PointerMove { x, y, buttons }
    }

    /// A key with no modifiers.
    pub fn key(key: impl Into<String>) -> Self {
        InputEvent::Key {
            key: key.into(),
            ctrl: false,
            shift: false,
            alt: false,
            meta: false,
        }
    }

    /// A key with the platform command modifier (⌘ / Ctrl).
    pub fn command(key: impl Into<String>, shift: bool) -> Self {
        InputEvent::Key {
            key: key.into(),
            ctrl: true,
            shift,
            alt: false,
            meta: false,
        }
    }

    pub fn is_pointer(&self) -> bool {
        !matches!(self, InputEvent::Key { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buttons_bitmask() {
        let held = Buttons::from_bits(0b011);
        assert!(held.contains(PointerButton::Primary));
        assert!(held.contains(PointerButton::Secondary));
        assert!(!held.contains(PointerButton::Middle));
        assert_eq!(Buttons::from_bits(0), Buttons::NONE);
    }

    #[test]
    fn dom_button_indices() {
        assert_eq!(PointerButton::from_index(0), Some(PointerButton::Primary));
        assert_eq!(PointerButton::from_index(2), Some(PointerButton::Secondary));
        assert_eq!(PointerButton::from_index(7), None);
    }

    #[test]
    fn events_serialize_with_type_tag() {
        let json = serde_json::to_string(&InputEvent::press(PointerButton::Primary, 1.0, 2.0)).unwrap();
        assert_eq!(json, r#"{"type":"pointer_down","button":"primary","x":1.0,"y":2.0}"#);
    }
}
