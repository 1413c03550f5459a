//! Editor configuration.
//!
//! Host pages pass a JSON object with any subset of these fields; missing
//! fields take their defaults. Snap and soft-snap thresholds are fixed
//! constants in their own modules and are not configurable here.

use crate::guide::{SMART_GUIDE_COLOR, USER_GUIDE_COLOR};
use crate::model::Color;
use serde::{Deserialize, Serialize};

/// Window after a first click in which a second click counts as a
/// double click.
pub const DOUBLE_CLICK_WINDOW_MS: f64 = 250.0;

/// Thickness of each ruler in screen pixels.
pub const RULER_THICKNESS: f32 = 20.0;

/// Zoom change per zoom-in / zoom-out step, in percent.
pub const ZOOM_STEP_PERCENT: f32 = 10.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Snap dragged elements to the canvas and siblings. Default: **true**.
    pub snap_enabled: bool,

    /// Draw the top and left rulers. Default: **true**.
    pub show_rulers: bool,

    /// Draw user and smart guides. Default: **true**.
    pub show_guides: bool,

    pub double_click_window_ms: f64,

    pub ruler_thickness: f32,

    pub user_guide_color: Color,

    pub smart_guide_color: Color,

    pub zoom_step: f32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            snap_enabled: true,
            show_rulers: true,
            show_guides: true,
            double_click_window_ms: DOUBLE_CLICK_WINDOW_MS,
            ruler_thickness: RULER_THICKNESS,
            user_guide_color: USER_GUIDE_COLOR,
            smart_guide_color: SMART_GUIDE_COLOR,
            zoom_step: ZOOM_STEP_PERCENT,
        }
    }
}

impl EditorConfig {
    /// Parse a (possibly partial) JSON config.
    ///
    /// # Errors
    /// Returns a readable message if the JSON is malformed or a field has the
    /// wrong type. Non-positive timings and sizes are rejected.
    pub fn from_json(json: &str) -> Result<Self, String> {
        let config: EditorConfig =
            serde_json::from_str(json).map_err(|e| format!("invalid editor config: {e}"))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        if !(self.double_click_window_ms > 0.0) {
            return Err(format!(
                "doubleClickWindowMs must be positive, got {}",
                self.double_click_window_ms
            ));
        }
        if !(self.ruler_thickness >= 0.0) {
            return Err(format!("rulerThickness must not be negative, got {}", self.ruler_thickness));
        }
        if !(self.zoom_step > 0.0) {
            return Err(format!("zoomStep must be positive, got {}", self.zoom_step));
        }
        Ok(())
    }
}
