//! Device catalog, render-size fitting and effective zoom.

use serde::{Deserialize, Serialize};

/// Width of the fixed composition canvas.
pub const CANVAS_WIDTH: u32 = 1280;
/// Height of the fixed composition canvas.
pub const CANVAS_HEIGHT: u32 = 720;

/// Scale applied to the user's zoom percentage before device adjustments.
pub const BASE_ZOOM_FACTOR: f32 = 0.7;
pub const MOBILE_ZOOM_MULTIPLIER: f32 = 1.2;
pub const DESKTOP_ZOOM_MULTIPLIER: f32 = 0.8;

pub const MIN_ZOOM_PERCENT: f32 = 10.0;
pub const MAX_ZOOM_PERCENT: f32 = 300.0;

/// Key of the catalog entry used for unknown devices.
pub const FALLBACK_DEVICE: &str = "screenshot";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    Screenshot,
    Browser,
    Mobile,
    Tablet,
    Desktop,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeviceDimensions {
    pub width: u32,
    pub height: u32,
    #[serde(rename = "type")]
    pub device_type: DeviceType,
}

/// How many devices are shown side by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    #[default]
    Single,
    Double,
    Triple,
}

impl LayoutMode {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "single" => Some(LayoutMode::Single),
            "double" => Some(LayoutMode::Double),
            "triple" => Some(LayoutMode::Triple),
            _ => None,
        }
    }
}

const fn dims(width: u32, height: u32, device_type: DeviceType) -> DeviceDimensions {
    DeviceDimensions {
        width,
        height,
        device_type,
    }
}

/// Native screen size of every supported frame, in CSS pixels.
static DEVICES: &[(&str, DeviceDimensions)] = &[
    ("screenshot", dims(1200, 800, DeviceType::Screenshot)),
    ("browser-chrome", dims(1440, 900, DeviceType::Browser)),
    ("browser-safari", dims(1440, 900, DeviceType::Browser)),
    ("browser-arc", dims(1512, 982, DeviceType::Browser)),
    ("iphone-17-pro", dims(402, 874, DeviceType::Mobile)),
    ("iphone-17-pro-max", dims(440, 956, DeviceType::Mobile)),
    ("iphone-16", dims(393, 852, DeviceType::Mobile)),
    ("iphone-se", dims(375, 667, DeviceType::Mobile)),
    ("pixel-9-pro", dims(412, 915, DeviceType::Mobile)),
    ("galaxy-s25", dims(360, 780, DeviceType::Mobile)),
    ("ipad-pro-13", dims(1032, 1376, DeviceType::Tablet)),
    ("ipad-air", dims(820, 1180, DeviceType::Tablet)),
    ("ipad-mini", dims(744, 1133, DeviceType::Tablet)),
    ("macbook-pro-16", dims(1728, 1117, DeviceType::Desktop)),
    ("macbook-air-13", dims(1470, 956, DeviceType::Desktop)),
    ("imac-24", dims(2240, 1260, DeviceType::Desktop)),
    ("studio-display", dims(2560, 1440, DeviceType::Desktop)),
];

/// All catalog keys, in display order.
pub fn device_keys() -> impl Iterator<Item = &'static str> {
    DEVICES.iter().map(|(key, _)| *key)
}

/// Look up a device's native size. Unknown or missing keys resolve to the
/// plain `screenshot` entry (1200×800).
pub fn get_device_dimensions(device_key: Option<&str>) -> DeviceDimensions {
    device_key
        .and_then(|key| DEVICES.iter().find(|(k, _)| *k == key))
        .or_else(|| DEVICES.iter().find(|(k, _)| *k == FALLBACK_DEVICE))
        .map(|(_, d)| *d)
        .unwrap_or(dims(1200, 800, DeviceType::Screenshot))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderSize {
    pub width: u32,
    pub height: u32,
}

/// Fit a device's native size inside the 1280×720 canvas, preserving its
/// aspect ratio. Devices that already fit keep their size; larger ones are
/// scaled down uniformly until the limiting edge touches the canvas.
pub fn compute_render_size(device_width: u32, device_height: u32) -> RenderSize {
    if device_width == 0 || device_height == 0 {
        return RenderSize { width: 0, height: 0 };
    }

    let w = device_width as f64;
    let h = device_height as f64;
    let scale = (CANVAS_WIDTH as f64 / w).min(CANVAS_HEIGHT as f64 / h).min(1.0);

    RenderSize {
        width: ((w * scale).round() as u32).clamp(1, CANVAS_WIDTH),
        height: ((h * scale).round() as u32).clamp(1, CANVAS_HEIGHT),
    }
}

/// Absolute scale factor for the rendered mockup.
///
/// `(zoom / 100) × 0.7`, then ×1.2 for mobile frames and ×0.8 for desktop
/// frames. The layout mode and template never change the result.
pub fn get_effective_zoom(
    zoom_percent: f32,
    _layout_mode: LayoutMode,
    device_key: Option<&str>,
    _template: Option<&str>,
) -> f32 {
    let base = (zoom_percent / 100.0) * BASE_ZOOM_FACTOR;
    let device_multiplier = match get_device_dimensions(device_key).device_type {
        DeviceType::Mobile => MOBILE_ZOOM_MULTIPLIER,
        DeviceType::Desktop => DESKTOP_ZOOM_MULTIPLIER,
        _ => 1.0,
    };
    base * device_multiplier
}

pub fn clamp_zoom_percent(zoom_percent: f32) -> f32 {
    if zoom_percent.is_nan() {
        return 100.0;
    }
    zoom_percent.clamp(MIN_ZOOM_PERCENT, MAX_ZOOM_PERCENT)
}

/// Move `zoom_percent` by `steps × step` and clamp to the supported range.
pub fn step_zoom_percent(zoom_percent: f32, steps: i32, step: f32) -> f32 {
    clamp_zoom_percent(zoom_percent + steps as f32 * step)
}
