//! Tunable constants for geometry, handles, and duplication.

use serde::{Deserialize, Serialize};

// ─── Config ───────────────────────────────────────────────────────────────

/// Engine-wide configuration shared by the registry and the interaction
/// controller.
///
/// The defaults reproduce the classic editor feel: 20px minimum size,
/// a 5px handle box around the selection, 15px grab radius.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Minimum width and height for every layer. Default: **20**.
    pub min_size: f32,

    /// How far the handle box extends past the layer bounds. Default: **5**.
    pub border_buffer: f32,

    /// Grab radius around corners and edges of the handle box. Default: **15**.
    pub handle_threshold: f32,

    /// Position offset applied to a duplicated layer. Default: **(20, 20)**.
    pub duplicate_offset: (f32, f32),

    /// Fallback size for objects with an empty bitmap. Default: **100**.
    pub default_object_size: f32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            min_size: 20.0,
            border_buffer: 5.0,
            handle_threshold: 15.0,
            duplicate_offset: (20.0, 20.0),
            default_object_size: 100.0,
        }
    }
}

impl EditorConfig {
    /// Offset from the original far edge used to re-anchor a clamped
    /// left/top resize (15 with the defaults).
    pub fn clamp_anchor_offset(&self) -> f32 {
        self.min_size - self.border_buffer
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_match_classic_values() {
        let config = EditorConfig::default();
        assert_eq!(config.min_size, 20.0);
        assert_eq!(config.border_buffer, 5.0);
        assert_eq!(config.handle_threshold, 15.0);
        assert_eq!(config.duplicate_offset, (20.0, 20.0));
        assert_eq!(config.clamp_anchor_offset(), 15.0);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: EditorConfig = serde_json::from_str(r#"{ "min_size": 32.0 }"#).unwrap();
        assert_eq!(config.min_size, 32.0);
        assert_eq!(config.border_buffer, 5.0);
        assert_eq!(config.duplicate_offset, (20.0, 20.0));
    }
}
