//! Overlay document model.
//!
//! A mockup is a fixed-size canvas with a device (or a multi-device scene),
//! free text overlays, an optional branding block and user-placed guides.
//! Positions are absolute canvas pixels. This is the shape the persistence
//! layer saves and loads as JSON.

use crate::device::LayoutMode;
use crate::geometry::BoundingBox;
use crate::guide::Guide;
use crate::id::ElementId;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ─── Colors ──────────────────────────────────────────────────────────────

/// RGBA color. Stored as 4 × f32 [0.0, 1.0], serialized as a hex string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Color {
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#RGB`, `#RGBA`, `#RRGGBB` or `#RRGGBBAA` (leading `#` optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();

        let channels: [u8; 4] = match bytes.len() {
            3 | 4 => {
                let mut out = [255u8; 4];
                for (slot, &c) in out.iter_mut().zip(bytes) {
                    *slot = hex_val(c)? * 17;
                }
                out
            }
            6 | 8 => {
                let mut out = [255u8; 4];
                for (slot, pair) in out.iter_mut().zip(bytes.chunks(2)) {
                    *slot = hex_val(pair[0])? << 4 | hex_val(pair[1])?;
                }
                out
            }
            _ => return None,
        };

        Some(Self::rgba(
            channels[0] as f32 / 255.0,
            channels[1] as f32 / 255.0,
            channels[2] as f32 / 255.0,
            channels[3] as f32 / 255.0,
        ))
    }

    /// 8-bit channels, rounded.
    pub fn to_rgba8(&self) -> [u8; 4] {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    /// Emit as `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
    pub fn to_hex(&self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        if a == 255 {
            format!("#{r:02X}{g:02X}{b:02X}")
        } else {
            format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
        }
    }

    /// CSS `rgba(...)` string for Canvas2D style setters.
    pub fn to_css(&self) -> String {
        let [r, g, b, _] = self.to_rgba8();
        format!("rgba({r}, {g}, {b}, {:.3})", self.a.clamp(0.0, 1.0))
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::from_hex(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid color: {s}")))
    }
}

// ─── Overlays ────────────────────────────────────────────────────────────

/// Width of one character relative to the font size, used when no text
/// metrics are available.
pub const TEXT_CHAR_WIDTH_RATIO: f32 = 0.6;
/// Line height relative to the font size.
pub const TEXT_LINE_HEIGHT_RATIO: f32 = 1.2;

fn default_font_size() -> f32 {
    32.0
}

fn default_font_family() -> String {
    "Inter".to_string()
}

fn default_font_weight() -> u16 {
    600
}

/// Free text placed on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextOverlay {
    pub id: ElementId,
    pub content: String,
    pub x: f32,
    pub y: f32,
    #[serde(default = "default_font_size")]
    pub font_size: f32,
    #[serde(default = "default_font_family")]
    pub font_family: String,
    #[serde(default = "default_font_weight")]
    pub font_weight: u16,
    #[serde(default = "default_text_color")]
    pub color: Color,
}

fn default_text_color() -> Color {
    Color::WHITE
}

impl TextOverlay {
    pub fn new(id: ElementId, content: impl Into<String>, x: f32, y: f32) -> Self {
        Self {
            id,
            content: content.into(),
            x,
            y,
            font_size: default_font_size(),
            font_family: default_font_family(),
            font_weight: default_font_weight(),
            color: default_text_color(),
        }
    }

    pub fn with_font_size(mut self, font_size: f32) -> Self {
        self.font_size = font_size;
        self
    }

    /// Approximate bounds: `units × size × 0.6` wide, `size × 1.2` tall,
    /// where `units` counts UTF-16 code units like a browser string length.
    pub fn approx_bounds(&self) -> BoundingBox {
        let chars = self.content.encode_utf16().count() as f32;
        BoundingBox::new(
            self.x,
            self.y,
            chars * self.font_size * TEXT_CHAR_WIDTH_RATIO,
            self.font_size * TEXT_LINE_HEIGHT_RATIO,
        )
    }
}

/// The branding block (logo and/or wordmark). At most one per mockup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branding {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default = "default_font_size")]
    pub font_size: f32,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_visible() -> bool {
    true
}

impl Branding {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            text: None,
            logo_url: None,
            font_size: default_font_size(),
            visible: true,
        }
    }

    /// Approximate bounds: a square logo one line tall, followed by the
    /// wordmark measured like a text overlay.
    pub fn approx_bounds(&self) -> BoundingBox {
        let line = self.font_size * TEXT_LINE_HEIGHT_RATIO;
        let logo = if self.logo_url.is_some() { line } else { 0.0 };
        let chars = self.text.as_deref().map_or(0, |t| t.encode_utf16().count()) as f32;
        BoundingBox::new(
            self.x,
            self.y,
            logo + chars * self.font_size * TEXT_CHAR_WIDTH_RATIO,
            line,
        )
    }
}

/// One device in a multi-device scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneDevice {
    pub id: ElementId,
    pub device_key: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl SceneDevice {
    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::new(self.x, self.y, self.width, self.height)
    }
}

// ─── Document ────────────────────────────────────────────────────────────

/// Largest canvas edge a saved mockup may declare, in canvas pixels.
pub const MAX_CANVAS_EXTENT: f32 = 16_384.0;

fn default_canvas_width() -> f32 {
    crate::device::CANVAS_WIDTH as f32
}

fn default_canvas_height() -> f32 {
    crate::device::CANVAS_HEIGHT as f32
}

fn default_zoom() -> f32 {
    100.0
}

/// Everything the save routine persists for one mockup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MockupConfig {
    #[serde(default)]
    pub device_key: Option<String>,
    #[serde(default)]
    pub layout_mode: LayoutMode,
    #[serde(default = "default_zoom")]
    pub zoom: f32,
    #[serde(default = "default_canvas_width")]
    pub canvas_width: f32,
    #[serde(default = "default_canvas_height")]
    pub canvas_height: f32,
    #[serde(default)]
    pub texts: Vec<TextOverlay>,
    #[serde(default)]
    pub branding: Option<Branding>,
    #[serde(default)]
    pub scene_devices: Vec<SceneDevice>,
    /// User guides only; derived guides are never stored.
    #[serde(default)]
    pub guides: Vec<Guide>,
}

impl Default for MockupConfig {
    fn default() -> Self {
        Self {
            device_key: None,
            layout_mode: LayoutMode::default(),
            zoom: default_zoom(),
            canvas_width: default_canvas_width(),
            canvas_height: default_canvas_height(),
            texts: Vec::new(),
            branding: None,
            scene_devices: Vec::new(),
            guides: Vec::new(),
        }
    }
}

impl MockupConfig {
    pub fn text(&self, id: ElementId) -> Option<&TextOverlay> {
        self.texts.iter().find(|t| t.id == id)
    }

    pub fn text_mut(&mut self, id: ElementId) -> Option<&mut TextOverlay> {
        self.texts.iter_mut().find(|t| t.id == id)
    }

    pub fn scene_device(&self, id: ElementId) -> Option<&SceneDevice> {
        self.scene_devices.iter().find(|d| d.id == id)
    }

    pub fn scene_device_mut(&mut self, id: ElementId) -> Option<&mut SceneDevice> {
        self.scene_devices.iter_mut().find(|d| d.id == id)
    }

    /// Serialize to JSON. Smart guides that slipped into `guides` are dropped.
    pub fn to_json(&self) -> Result<String, String> {
        let mut doc = self.clone();
        doc.guides.retain(|g| !g.is_smart_guide);
        serde_json::to_string(&doc).map_err(|e| format!("failed to encode mockup: {e}"))
    }

    /// Parse a saved mockup. Smart guides in the input are discarded.
    ///
    /// # Errors
    /// Returns a readable message if the JSON is malformed or the canvas
    /// size is out of range.
    pub fn from_json(json: &str) -> Result<Self, String> {
        let mut doc: MockupConfig =
            serde_json::from_str(json).map_err(|e| format!("invalid mockup JSON: {e}"))?;
        doc.validate()?;
        doc.guides.retain(|g| !g.is_smart_guide);
        Ok(doc)
    }

    /// Check that both canvas edges lie in `(0, MAX_CANVAS_EXTENT]`.
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [("canvasWidth", self.canvas_width), ("canvasHeight", self.canvas_height)] {
            if !(value > 0.0 && value <= MAX_CANVAS_EXTENT) {
                return Err(format!("{name} must be in (0, {MAX_CANVAS_EXTENT}], got {value}"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guide::GuideOrientation;
    use pretty_assertions::assert_eq;

    #[test]
    fn color_hex_forms() {
        let c = Color::from_hex("#FF8000").unwrap();
        assert_eq!(c.to_rgba8(), [255, 128, 0, 255]);
        assert_eq!(c.to_hex(), "#FF8000");

        let short = Color::from_hex("f0a").unwrap();
        assert_eq!(short.to_hex(), "#FF00AA");

        let translucent = Color::from_hex("#00000080").unwrap();
        assert_eq!(translucent.to_hex(), "#00000080");

        assert!(Color::from_hex("#12345").is_none());
        assert!(Color::from_hex("#GG0000").is_none());
    }

    #[test]
    fn text_bounds_are_approximated_from_font_size() {
        let t = TextOverlay::new(ElementId::intern("t"), "Hello", 100.0, 50.0).with_font_size(20.0);
        let b = t.approx_bounds();
        assert_eq!((b.x, b.y), (100.0, 50.0));
        assert!((b.width - 60.0).abs() < 1e-3, "width {}", b.width);
        assert!((b.height - 24.0).abs() < 1e-3, "height {}", b.height);
    }

    #[test]
    fn branding_bounds_include_logo() {
        let mut b = Branding::new(10.0, 10.0);
        b.font_size = 10.0;
        assert_eq!(b.approx_bounds().width, 0.0);
        b.logo_url = Some("logo.png".into());
        b.text = Some("Acme".into());
        let bounds = b.approx_bounds();
        assert!((bounds.width - 36.0).abs() < 1e-3, "width {}", bounds.width);
        assert!((bounds.height - 12.0).abs() < 1e-3, "height {}", bounds.height);
    }

    #[test]
    fn to_json_keeps_only_user_guides() {
        let mut doc = MockupConfig::default();
        doc.guides.push(Guide::user("guide-1".into(), GuideOrientation::Vertical, 100.0));
        doc.guides.push(Guide::smart("smart-center-x", GuideOrientation::Vertical, 640.0));
        let json = doc.to_json().unwrap();
        let back = MockupConfig::from_json(&json).unwrap();
        assert_eq!(back.guides.len(), 1);
        assert_eq!(back.guides[0].id.as_str(), "guide-1");
    }

    #[test]
    fn from_json_fills_defaults() {
        let doc = MockupConfig::from_json(
            r##"{"texts":[{"id":"headline","content":"Ship it","x":10,"y":20}]}"##,
        )
        .unwrap();
        assert_eq!(doc.canvas_width, 1280.0);
        assert_eq!(doc.canvas_height, 720.0);
        assert_eq!(doc.zoom, 100.0);
        assert_eq!(doc.layout_mode, LayoutMode::Single);
        let text = doc.text(ElementId::intern("headline")).unwrap();
        assert_eq!(text.font_size, 32.0);
        assert_eq!(text.color, Color::WHITE);
    }

    #[test]
    fn from_json_rejects_malformed_input() {
        let err = MockupConfig::from_json("{not json").unwrap_err();
        assert!(err.starts_with("invalid mockup JSON"), "{err}");
    }

    #[test]
    fn from_json_rejects_out_of_range_canvas() {
        for json in [
            r#"{"canvasWidth":2000000,"canvasHeight":720}"#,
            r#"{"canvasWidth":1280,"canvasHeight":0}"#,
            r#"{"canvasWidth":-5}"#,
        ] {
            let err = MockupConfig::from_json(json).unwrap_err();
            assert!(err.starts_with("canvas"), "{json}: {err}");
        }
        let max = MockupConfig::from_json(r#"{"canvasWidth":16384,"canvasHeight":16384}"#).unwrap();
        assert_eq!(max.canvas_width, MAX_CANVAS_EXTENT);
    }

    #[test]
    fn text_width_counts_utf16_units() {
        // The rocket is one char but two UTF-16 code units.
        let t = TextOverlay::new(ElementId::intern("t"), "Go\u{1F680}", 0.0, 0.0).with_font_size(10.0);
        assert!((t.approx_bounds().width - 24.0).abs() < 1e-3, "width {}", t.approx_bounds().width);

        let mut b = Branding::new(0.0, 0.0);
        b.font_size = 10.0;
        b.text = Some("\u{1F680}".into());
        assert!((b.approx_bounds().width - 12.0).abs() < 1e-3);
    }
}
