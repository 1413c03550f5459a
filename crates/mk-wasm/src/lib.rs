//! WASM bridge for Mockup Kit: exposes the canvas interaction session to
//! the browser editor.
//!
//! Compiled via `wasm-pack build --target web`. Pointer handlers take the
//! event's client position and timestamp plus the container's current
//! bounding rect and scale, and return JSON telling the host whether to call
//! `preventDefault()` / `stopPropagation()`. The host drives timers by
//! calling `tick` with the same clock as `Event.timeStamp`.

mod render2d;

use mk_core::config::EditorConfig;
use mk_core::coords::ScreenRect;
use mk_core::device::{LayoutMode, compute_render_size, get_device_dimensions};
use mk_core::geometry::BoundingBox;
use mk_core::id::ElementId;
use mk_core::snap::calculate_snap;
use mk_editor::session::{MockupSession, SessionEvent};
use mk_editor::shortcuts::{ShortcutAction, ShortcutMap};
use mk_editor::{ClickOutcome, MouseEvent};
use mk_render::overlay::OverlayTheme;
use serde_json::json;
use wasm_bindgen::prelude::*;
use web_sys::CanvasRenderingContext2d;

/// The WASM-facing canvas controller.
///
/// One instance per mounted mockup editor. Call `unmount` when the editor
/// goes away so pending click timers never fire into a dead view.
#[wasm_bindgen]
pub struct MockupCanvas {
    session: MockupSession,
    dark_mode: bool,
}

impl Default for MockupCanvas {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl MockupCanvas {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        console_error_panic_hook_setup();
        Self {
            session: MockupSession::default(),
            dark_mode: false,
        }
    }

    /// Replace the editor config from a (possibly partial) JSON object.
    /// Returns `{"ok":true}` or `{"ok":false,"error":"..."}`.
    pub fn set_config_json(&mut self, json: &str) -> String {
        match EditorConfig::from_json(json) {
            Ok(config) => {
                self.session.set_config(config);
                ok_json()
            }
            Err(e) => {
                log::warn!("rejected editor config: {e}");
                error_json(&e)
            }
        }
    }

    pub fn get_config_json(&self) -> String {
        serde_json::to_string(self.session.config()).unwrap_or_else(|_| "{}".to_string())
    }

    /// Load a saved mockup. Returns `{"ok":true}` or `{"ok":false,"error":"..."}`.
    pub fn load_json(&mut self, json: &str) -> String {
        match self.session.load_json(json) {
            Ok(()) => ok_json(),
            Err(e) => {
                log::warn!("failed to load mockup: {e}");
                error_json(&e)
            }
        }
    }

    /// Serialize the mockup with its user guides.
    /// Returns `{"ok":true,"mockup":{...}}` or `{"ok":false,"error":"..."}`.
    pub fn save_json(&self) -> String {
        match self.session.save_json() {
            Ok(mockup) => format!(r#"{{"ok":true,"mockup":{mockup}}}"#),
            Err(e) => error_json(&e),
        }
    }

    pub fn set_theme(&mut self, is_dark: bool) {
        self.dark_mode = is_dark;
    }

    // ─── Pointer events ──────────────────────────────────────────────────

    /// Mouse-down on a text overlay.
    /// Returns `{"preventDefault":bool,"stopPropagation":bool,"outcome":"ignored"|"pending"|"doubleClick"}`.
    #[allow(clippy::too_many_arguments)]
    pub fn handle_text_mouse_down(
        &mut self,
        element_id: &str,
        client_x: f32,
        client_y: f32,
        time_ms: f64,
        rect_left: f32,
        rect_top: f32,
        rect_width: f32,
        rect_height: f32,
        scale: f32,
    ) -> String {
        let mut event = MouseEvent::new(client_x, client_y, time_ms);
        let rect = container(rect_left, rect_top, rect_width, rect_height);
        let outcome = self
            .session
            .handle_text_mouse_down(&mut event, ElementId::intern(element_id), &rect, scale);
        event_json(&event, json!({ "outcome": outcome_name(outcome) }))
    }

    /// Mouse-down on the branding block. Same result shape as
    /// `handle_text_mouse_down`.
    #[allow(clippy::too_many_arguments)]
    pub fn handle_branding_mouse_down(
        &mut self,
        client_x: f32,
        client_y: f32,
        time_ms: f64,
        rect_left: f32,
        rect_top: f32,
        rect_width: f32,
        rect_height: f32,
        scale: f32,
    ) -> String {
        let mut event = MouseEvent::new(client_x, client_y, time_ms);
        let rect = container(rect_left, rect_top, rect_width, rect_height);
        let outcome = self.session.handle_branding_mouse_down(&mut event, &rect, scale);
        event_json(&event, json!({ "outcome": outcome_name(outcome) }))
    }

    /// Mouse-down on a scene device: selects it and starts dragging at once.
    /// Returns `{"preventDefault":bool,"stopPropagation":bool,"dragging":bool}`.
    #[allow(clippy::too_many_arguments)]
    pub fn handle_scene_device_mouse_down(
        &mut self,
        device_id: &str,
        client_x: f32,
        client_y: f32,
        time_ms: f64,
        rect_left: f32,
        rect_top: f32,
        rect_width: f32,
        rect_height: f32,
        scale: f32,
    ) -> String {
        let mut event = MouseEvent::new(client_x, client_y, time_ms);
        let rect = container(rect_left, rect_top, rect_width, rect_height);
        let dragging =
            self.session
                .handle_scene_device_mouse_down(&mut event, ElementId::intern(device_id), &rect, scale);
        event_json(&event, json!({ "dragging": dragging }))
    }

    /// Mouse-down that may land on a ruler or a user guide.
    /// Returns `{"preventDefault":bool,"stopPropagation":bool,"guide":"<id>"|null}`.
    #[allow(clippy::too_many_arguments)]
    pub fn handle_overlay_mouse_down(
        &mut self,
        client_x: f32,
        client_y: f32,
        time_ms: f64,
        rect_left: f32,
        rect_top: f32,
        rect_width: f32,
        rect_height: f32,
        scale: f32,
    ) -> String {
        let mut event = MouseEvent::new(client_x, client_y, time_ms);
        let rect = container(rect_left, rect_top, rect_width, rect_height);
        let guide = match self.session.handle_ruler_mouse_down(&mut event, &rect, scale) {
            Some(id) => Some(id),
            None if self.session.handle_guide_mouse_down(&mut event, &rect, scale) => {
                self.session.guides().dragging().cloned()
            }
            None => None,
        };
        event_json(&event, json!({ "guide": guide.as_ref().map(|g| g.as_str()) }))
    }

    /// Double click on the overlay: deletes the user guide under the pointer.
    /// Returns `{"preventDefault":bool,"stopPropagation":bool,"deleted":bool}`.
    #[allow(clippy::too_many_arguments)]
    pub fn handle_overlay_double_click(
        &mut self,
        client_x: f32,
        client_y: f32,
        time_ms: f64,
        rect_left: f32,
        rect_top: f32,
        rect_width: f32,
        rect_height: f32,
        scale: f32,
    ) -> String {
        let mut event = MouseEvent::new(client_x, client_y, time_ms);
        let rect = container(rect_left, rect_top, rect_width, rect_height);
        let deleted = self.session.handle_guide_double_click(&mut event, &rect, scale);
        event_json(&event, json!({ "deleted": deleted }))
    }

    /// Pointer move. Returns `true` if anything moved and the host should
    /// re-render.
    #[allow(clippy::too_many_arguments)]
    pub fn handle_mouse_move(
        &mut self,
        client_x: f32,
        client_y: f32,
        time_ms: f64,
        rect_left: f32,
        rect_top: f32,
        rect_width: f32,
        rect_height: f32,
        scale: f32,
    ) -> bool {
        let mut event = MouseEvent::new(client_x, client_y, time_ms);
        let rect = container(rect_left, rect_top, rect_width, rect_height);
        self.session.handle_mouse_move(&mut event, &rect, scale)
    }

    /// Pointer release. Returns `true` if a drag ended.
    #[allow(clippy::too_many_arguments)]
    pub fn handle_mouse_up(
        &mut self,
        client_x: f32,
        client_y: f32,
        time_ms: f64,
        rect_left: f32,
        rect_top: f32,
        rect_width: f32,
        rect_height: f32,
        scale: f32,
    ) -> bool {
        let mut event = MouseEvent::new(client_x, client_y, time_ms);
        let rect = container(rect_left, rect_top, rect_width, rect_height);
        self.session.handle_mouse_up(&mut event, &rect, scale)
    }

    /// Fire expired single-click timers. Returns `true` if a drag started.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        self.session.tick(now_ms)
    }

    /// Earliest pending click deadline, or `undefined` when idle.
    pub fn next_deadline(&self) -> Option<f64> {
        self.session.next_deadline()
    }

    /// Cancel pending timers and end every drag.
    pub fn unmount(&mut self) {
        self.session.unmount();
    }

    /// Drain host notifications as a JSON array, e.g.
    /// `[{"type":"editText","id":"headline"},{"type":"guideDeleted","id":"guide-2"}]`.
    pub fn take_events_json(&mut self) -> String {
        let events: Vec<serde_json::Value> = self
            .session
            .take_events()
            .into_iter()
            .map(|event| match event {
                SessionEvent::EditText(id) => json!({ "type": "editText", "id": id.as_str() }),
                SessionEvent::EditBranding => json!({ "type": "editBranding" }),
                SessionEvent::GuideCreated(id) => json!({ "type": "guideCreated", "id": id.as_str() }),
                SessionEvent::GuideDeleted(id) => json!({ "type": "guideDeleted", "id": id.as_str() }),
            })
            .collect();
        serde_json::Value::Array(events).to_string()
    }

    /// State of the three drag categories as JSON.
    pub fn get_drag_state_json(&self) -> String {
        serde_json::to_string(self.session.drag()).unwrap_or_else(|_| "{}".to_string())
    }

    // ─── Guides ──────────────────────────────────────────────────────────

    /// User, smart and live snap guides as a JSON array.
    pub fn get_guides_json(&self) -> String {
        let snap = self.session.last_snap().map_or(&[][..], |s| &s.guides[..]);
        let guides = self.session.guides().display_guides(snap);
        serde_json::to_string(&guides).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn clear_user_guides(&mut self) {
        self.session.clear_user_guides();
    }

    /// Paint rulers, guides and distance indicators onto the overlay canvas.
    /// `origin_x` / `origin_y` locate the canvas's top-left corner in the
    /// overlay's pixel space.
    pub fn render_overlay(&self, ctx: &CanvasRenderingContext2d, origin_x: f64, origin_y: f64, scale: f32) {
        let theme = if self.dark_mode {
            OverlayTheme::dark()
        } else {
            OverlayTheme::light()
        };
        let items = self.session.overlay_items(scale, &theme);
        render2d::paint_overlay(ctx, &items, origin_x, origin_y, scale as f64);
    }

    // ─── Keyboard / view ─────────────────────────────────────────────────

    /// Handle a keyboard event. Returns `{"changed":bool,"action":"<name>"}`.
    pub fn handle_key(&mut self, key: &str, ctrl: bool, shift: bool, alt: bool, meta: bool) -> String {
        let Some(action) = ShortcutMap::resolve(key, ctrl, shift, alt, meta) else {
            return r#"{"changed":false,"action":"none"}"#.to_string();
        };
        let changed = self.session.apply_shortcut(action);
        json!({ "changed": changed, "action": action_name(action) }).to_string()
    }

    pub fn set_zoom(&mut self, zoom_percent: f32) {
        self.session.set_zoom(zoom_percent);
    }

    pub fn get_zoom(&self) -> f32 {
        self.session.doc().zoom
    }

    /// Absolute scale of the rendered mockup for the current zoom and device.
    pub fn get_effective_zoom(&self) -> f32 {
        self.session.effective_zoom()
    }
}

// ─── Standalone utilities ────────────────────────────────────────────────

/// Snap `element` against the canvas and `others`.
///
/// `element_json` is a box `{"x","y","width","height"}` and `others_json` an
/// array of boxes. Returns `{"ok":true,"result":{x,y,snappedX,snappedY,guides,distanceIndicators}}`
/// or `{"ok":false,"error":"..."}`.
#[wasm_bindgen]
pub fn calculate_snap_json(
    element_json: &str,
    canvas_width: f32,
    canvas_height: f32,
    others_json: &str,
    enable_snap: bool,
) -> String {
    let element: BoundingBox = match serde_json::from_str(element_json) {
        Ok(b) => b,
        Err(e) => return error_json(&format!("invalid element box: {e}")),
    };
    let others: Vec<BoundingBox> = match serde_json::from_str(others_json) {
        Ok(b) => b,
        Err(e) => return error_json(&format!("invalid sibling boxes: {e}")),
    };
    let result = calculate_snap(&element, canvas_width, canvas_height, &others, enable_snap);
    match serde_json::to_string(&result) {
        Ok(result) => format!(r#"{{"ok":true,"result":{result}}}"#),
        Err(e) => error_json(&format!("Serialization error: {e}")),
    }
}

/// Native device size, `{"width","height","type"}`. Unknown or missing keys
/// resolve to the screenshot frame.
#[wasm_bindgen]
pub fn get_device_dimensions_json(device_key: Option<String>) -> String {
    let dims = get_device_dimensions(device_key.as_deref());
    serde_json::to_string(&dims).unwrap_or_else(|_| "{}".to_string())
}

/// Fit a device inside the canvas. Returns `{"width","height"}`.
#[wasm_bindgen]
pub fn compute_render_size_json(device_width: u32, device_height: u32) -> String {
    serde_json::to_string(&compute_render_size(device_width, device_height)).unwrap_or_else(|_| "{}".to_string())
}

/// Absolute scale factor for `zoom_percent` on `device_key`. Unknown layout
/// names are treated as `single`; the layout never changes the result.
#[wasm_bindgen]
pub fn get_effective_zoom(
    zoom_percent: f32,
    layout_mode: &str,
    device_key: Option<String>,
    template: Option<String>,
) -> f32 {
    mk_core::device::get_effective_zoom(
        zoom_percent,
        LayoutMode::from_name(layout_mode).unwrap_or_default(),
        device_key.as_deref(),
        template.as_deref(),
    )
}

// ─── Helpers ─────────────────────────────────────────────────────────────

/// Container rect from the host. The host passes NaN coordinates when the
/// container is not mounted.
fn container(left: f32, top: f32, width: f32, height: f32) -> Option<ScreenRect> {
    if left.is_finite() && top.is_finite() {
        Some(ScreenRect::new(left, top, width, height))
    } else {
        None
    }
}

fn event_json(event: &MouseEvent, extra: serde_json::Value) -> String {
    let mut out = json!({
        "preventDefault": event.default_prevented,
        "stopPropagation": event.propagation_stopped,
    });
    if let (Some(out), serde_json::Value::Object(extra)) = (out.as_object_mut(), extra) {
        out.extend(extra);
    }
    out.to_string()
}

fn ok_json() -> String {
    r#"{"ok":true}"#.to_string()
}

fn error_json(message: &str) -> String {
    json!({ "ok": false, "error": message }).to_string()
}

fn outcome_name(outcome: ClickOutcome) -> &'static str {
    match outcome {
        ClickOutcome::Ignored => "ignored",
        ClickOutcome::Pending => "pending",
        ClickOutcome::DoubleClick => "doubleClick",
    }
}

fn action_name(action: ShortcutAction) -> &'static str {
    match action {
        ShortcutAction::ZoomIn => "zoomIn",
        ShortcutAction::ZoomOut => "zoomOut",
        ShortcutAction::ZoomReset => "zoomReset",
        ShortcutAction::ToggleSnap => "toggleSnap",
        ShortcutAction::ToggleRulers => "toggleRulers",
        ShortcutAction::ToggleGuides => "toggleGuides",
        ShortcutAction::ClearGuides => "clearGuides",
        ShortcutAction::Deselect => "deselect",
    }
}

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("Mockup Kit WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn snap_json_round_trip() {
        let out = calculate_snap_json(r#"{"x":5,"y":300,"width":100,"height":40}"#, 1280.0, 720.0, "[]", true);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["ok"], true);
        assert_eq!(value["result"]["x"], 0.0);
        assert_eq!(value["result"]["snappedX"], true);
        assert_eq!(value["result"]["guides"][0]["type"], "vertical");
    }

    #[test]
    fn snap_json_reports_bad_input() {
        let out = calculate_snap_json("nope", 1280.0, 720.0, "[]", true);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["ok"], false);
        assert!(value["error"].as_str().unwrap().starts_with("invalid element box"));
    }

    #[test]
    fn device_and_zoom_exports() {
        let dims: serde_json::Value = serde_json::from_str(&get_device_dimensions_json(None)).unwrap();
        assert_eq!(dims, json!({ "width": 1200, "height": 800, "type": "screenshot" }));

        let size: serde_json::Value = serde_json::from_str(&compute_render_size_json(2560, 1440)).unwrap();
        assert_eq!(size, json!({ "width": 1280, "height": 720 }));

        let zoom = get_effective_zoom(100.0, "triple", Some("iphone-17-pro".into()), None);
        assert!((zoom - 0.84).abs() < 1e-6);
    }

    #[test]
    fn ignored_mouse_down_leaves_event_alone() {
        let mut canvas = MockupCanvas::new();
        let out = canvas.handle_text_mouse_down("ghost", 10.0, 10.0, 0.0, 0.0, 0.0, 1280.0, 720.0, 1.0);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(
            value,
            json!({ "preventDefault": false, "stopPropagation": false, "outcome": "ignored" })
        );
    }

    #[test]
    fn text_click_flow_through_bridge() {
        let mut canvas = MockupCanvas::new();
        let loaded = canvas.load_json(r#"{"texts":[{"id":"t","content":"Hi","x":100,"y":100}]}"#);
        assert_eq!(loaded, r#"{"ok":true}"#);

        let out = canvas.handle_text_mouse_down("t", 110.0, 110.0, 0.0, 0.0, 0.0, 1280.0, 720.0, 1.0);
        assert!(out.contains(r#""outcome":"pending""#));
        assert_eq!(canvas.next_deadline(), Some(250.0));
        assert!(canvas.tick(250.0));

        let drag: serde_json::Value = serde_json::from_str(&canvas.get_drag_state_json()).unwrap();
        assert_eq!(drag["text"]["draggingText"], "t");
        assert_eq!(drag["text"]["dragOffset"], json!({ "x": 10.0, "y": 10.0 }));
    }

    #[test]
    fn missing_container_is_ignored() {
        let mut canvas = MockupCanvas::new();
        canvas.load_json(r#"{"texts":[{"id":"t","content":"Hi","x":100,"y":100}]}"#);
        let out = canvas.handle_text_mouse_down("t", 110.0, 110.0, 0.0, f32::NAN, f32::NAN, 0.0, 0.0, 1.0);
        assert!(out.contains(r#""outcome":"ignored""#));
    }

    #[test]
    fn load_error_is_reported() {
        let mut canvas = MockupCanvas::new();
        let value: serde_json::Value = serde_json::from_str(&canvas.load_json("{")).unwrap();
        assert_eq!(value["ok"], false);
    }

    #[test]
    fn key_handling() {
        let mut canvas = MockupCanvas::new();
        let out = canvas.handle_key("=", false, false, false, true);
        assert_eq!(out, r#"{"action":"zoomIn","changed":true}"#);
        assert_eq!(canvas.get_zoom(), 110.0);
        assert_eq!(canvas.handle_key("q", false, false, false, false), r#"{"changed":false,"action":"none"}"#);
    }
}
