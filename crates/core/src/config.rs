//! Scene configuration.
//!
//! Every field has a default, so an empty JSON object (`{}`) yields the
//! stock scene: a 300x250 rectangle over a transparent-black clear.

use serde::{Deserialize, Serialize};

use crate::error::RenderError;

/// Default rectangle width in pixels.
pub const DEFAULT_RECT_WIDTH: f32 = 300.0;

/// Default rectangle height in pixels.
pub const DEFAULT_RECT_HEIGHT: f32 = 250.0;

/// Default `u_color` value. Components outside `[0, 1]` are clamped before
/// upload, so this renders opaque black.
pub const DEFAULT_COLOR: [f32; 4] = [-1.0, -1.0, -1.0, 1.0];

/// Default clear color (transparent black).
pub const DEFAULT_CLEAR_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 0.0];

/// What to draw and how to clear around it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub rect_width: f32,
    pub rect_height: f32,
    /// RGBA fill color passed to `u_color`.
    pub color: [f32; 4],
    pub clear_color: [f32; 4],
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            rect_width: DEFAULT_RECT_WIDTH,
            rect_height: DEFAULT_RECT_HEIGHT,
            color: DEFAULT_COLOR,
            clear_color: DEFAULT_CLEAR_COLOR,
        }
    }
}

impl SceneConfig {
    /// Parses and validates a JSON config. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::InvalidConfig` if the JSON is malformed or a
    /// value is out of range (see [`SceneConfig::validate`]).
    pub fn from_json(json: &str) -> Result<Self, RenderError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| RenderError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the rectangle size is finite and non-negative and that
    /// every color component is finite.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::InvalidConfig` naming the offending field.
    pub fn validate(&self) -> Result<(), RenderError> {
        for (name, value) in [
            ("rect_width", self.rect_width),
            ("rect_height", self.rect_height),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(RenderError::InvalidConfig(format!(
                    "{name} must be a finite, non-negative number, got {value}"
                )));
            }
        }

        for (name, rgba) in [("color", self.color), ("clear_color", self.clear_color)] {
            if rgba.iter().any(|c| !c.is_finite()) {
                return Err(RenderError::InvalidConfig(format!(
                    "{name} components must be finite, got {rgba:?}"
                )));
            }
        }

        Ok(())
    }
}

/// Clamps each RGBA component into `[0, 1]`.
///
/// Returns the clamped color and whether any component changed.
pub fn clamp_color(rgba: [f32; 4]) -> ([f32; 4], bool) {
    let clamped = rgba.map(|c| c.clamp(0.0, 1.0));
    (clamped, clamped != rgba)
}
