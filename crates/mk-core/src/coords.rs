//! Screen ↔ canvas coordinate mapping.
//!
//! The interactive preview is the canvas drawn at `scale` screen pixels per
//! canvas pixel, with its top-left corner at the container's client rect
//! origin.

use serde::{Deserialize, Serialize};

/// A container's bounding client rect, in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl ScreenRect {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// Convert a pointer's client coordinates into canvas space:
/// `(client − rect.origin) / scale`. A non-positive scale is treated as 1.
pub fn screen_to_canvas(client_x: f32, client_y: f32, rect: &ScreenRect, scale: f32) -> (f32, f32) {
    let scale = effective_scale(scale);
    ((client_x - rect.left) / scale, (client_y - rect.top) / scale)
}

/// Inverse of [`screen_to_canvas`].
pub fn canvas_to_screen(x: f32, y: f32, rect: &ScreenRect, scale: f32) -> (f32, f32) {
    let scale = effective_scale(scale);
    (x * scale + rect.left, y * scale + rect.top)
}

fn effective_scale(scale: f32) -> f32 {
    if scale.is_finite() && scale > 0.0 { scale } else { 1.0 }
}
