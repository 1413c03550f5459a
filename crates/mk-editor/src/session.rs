//! One mounted mockup canvas.
//!
//! `MockupSession` owns the document, the drag store, the per-category
//! mouse handlers and the guide overlay, and routes pointer events between
//! them. The host passes the container rect and the current scale on every
//! event; nothing positional is cached between events.

use crate::branding::BrandingHandler;
use crate::click::ClickOutcome;
use crate::drag::DragStore;
use crate::guides::{GuideOverlay, GuideRelease};
use crate::input::{ContainerRef, PointerInput, consume, pointer_in_canvas};
use crate::scene_device::SceneDeviceHandler;
use crate::shortcuts::ShortcutAction;
use crate::text_overlay::TextOverlayHandler;
use mk_core::config::EditorConfig;
use mk_core::device::{clamp_zoom_percent, get_effective_zoom, step_zoom_percent};
use mk_core::geometry::BoundingBox;
use mk_core::id::{ElementId, GuideId, SequentialGuideIds};
use mk_core::model::{MockupConfig, TextOverlay};
use mk_core::snap::{SnapResult, calculate_snap};
use mk_render::hit::{GUIDE_HIT_TOLERANCE, hit_test_guide, hit_test_ruler};
use mk_render::overlay::{OverlayFrame, OverlayItem, OverlayTheme, build_overlay};

/// Something the host should react to, drained with
/// [`MockupSession::take_events`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Double click on a text overlay: open its editor.
    EditText(ElementId),
    /// Double click on the branding block.
    EditBranding,
    GuideCreated(GuideId),
    GuideDeleted(GuideId),
}

/// The currently selected element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Text(ElementId),
    Branding,
    SceneDevice(ElementId),
}

pub struct MockupSession {
    config: EditorConfig,
    doc: MockupConfig,
    drag: DragStore,
    text: TextOverlayHandler,
    branding: BrandingHandler,
    scene_devices: SceneDeviceHandler,
    guides: GuideOverlay,
    snap: Option<SnapResult>,
    events: Vec<SessionEvent>,
}

impl Default for MockupSession {
    fn default() -> Self {
        Self::new(EditorConfig::default(), MockupConfig::default())
    }
}

impl MockupSession {
    pub fn new(config: EditorConfig, doc: MockupConfig) -> Self {
        let mut session = Self {
            text: TextOverlayHandler::new(config.double_click_window_ms),
            branding: BrandingHandler::new(config.double_click_window_ms),
            scene_devices: SceneDeviceHandler::new(),
            guides: GuideOverlay::new(doc.canvas_width, doc.canvas_height),
            drag: DragStore::new(),
            snap: None,
            events: Vec::new(),
            config,
            doc: MockupConfig::default(),
        };
        session.replace_doc(doc);
        session.apply_config();
        session
    }

    // ─── Document ────────────────────────────────────────────────────────

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: EditorConfig) {
        self.config = config;
        self.apply_config();
    }

    /// The document. User guides live in the overlay while the session is
    /// mounted; see [`snapshot`](Self::snapshot) for the full document.
    pub fn doc(&self) -> &MockupConfig {
        &self.doc
    }

    /// Mutate the document, then refresh everything derived from it.
    pub fn edit_doc<R>(&mut self, f: impl FnOnce(&mut MockupConfig) -> R) -> R {
        let out = f(&mut self.doc);
        self.guides.set_canvas_size(self.doc.canvas_width, self.doc.canvas_height);
        self.refresh_smart_guides();
        out
    }

    /// The document with the current user guides folded back in.
    pub fn snapshot(&self) -> MockupConfig {
        let mut doc = self.doc.clone();
        doc.guides = self.guides.guides().to_vec();
        doc
    }

    /// Replace the document from saved JSON. Pending clicks and drags are
    /// discarded.
    pub fn load_json(&mut self, json: &str) -> Result<(), String> {
        let doc = MockupConfig::from_json(json)?;
        self.unmount();
        self.replace_doc(doc);
        Ok(())
    }

    pub fn save_json(&self) -> Result<String, String> {
        self.snapshot().to_json()
    }

    pub fn add_text(&mut self, text: TextOverlay) {
        self.edit_doc(|doc| doc.texts.push(text));
    }

    /// Remove a text overlay along with any pending click or drag on it.
    pub fn remove_text(&mut self, id: ElementId) -> bool {
        self.text.cancel(id);
        if self.drag.dragging_text() == Some(id) {
            self.drag.stop_text_drag();
            self.snap = None;
        }
        if self.text.selected() == Some(id) {
            self.text.select(None);
        }
        self.edit_doc(|doc| {
            let before = doc.texts.len();
            doc.texts.retain(|t| t.id != id);
            doc.texts.len() != before
        })
    }

    fn replace_doc(&mut self, mut doc: MockupConfig) {
        let guides = std::mem::take(&mut doc.guides);
        self.guides
            .set_id_source(Box::new(SequentialGuideIds::after(guides.iter().map(|g| &g.id))));
        self.guides.set_guides(guides);
        self.doc = doc;
        self.edit_doc(|_| ());
    }

    fn apply_config(&mut self) {
        self.text.set_double_click_window(self.config.double_click_window_ms);
        self.branding.set_double_click_window(self.config.double_click_window_ms);
        self.guides
            .set_colors(self.config.user_guide_color, self.config.smart_guide_color);
    }

    fn refresh_smart_guides(&mut self) {
        self.guides
            .recompute_smart_guides(&self.doc.texts, &self.doc.scene_devices);
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    pub fn drag(&self) -> &DragStore {
        &self.drag
    }

    pub fn drag_mut(&mut self) -> &mut DragStore {
        &mut self.drag
    }

    pub fn guides(&self) -> &GuideOverlay {
        &self.guides
    }

    /// Snap outcome of the last element move, cleared on release.
    pub fn last_snap(&self) -> Option<&SnapResult> {
        self.snap.as_ref()
    }

    pub fn selection(&self) -> Option<Selection> {
        if let Some(id) = self.text.selected() {
            Some(Selection::Text(id))
        } else if self.branding.is_selected() {
            Some(Selection::Branding)
        } else {
            self.scene_devices.selected().map(Selection::SceneDevice)
        }
    }

    pub fn deselect(&mut self) {
        self.text.select(None);
        self.branding.set_selected(false);
        self.scene_devices.select(None);
    }

    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    // ─── Element mouse-down ──────────────────────────────────────────────

    pub fn handle_text_mouse_down<E, C>(
        &mut self,
        event: &mut E,
        element_id: ElementId,
        container: &C,
        scale: f32,
    ) -> ClickOutcome
    where
        E: PointerInput + ?Sized,
        C: ContainerRef + ?Sized,
    {
        self.tick(event.time_ms());
        let outcome = self.text.handle_text_mouse_down(
            event,
            element_id,
            &self.doc.texts,
            container,
            scale,
            &mut self.drag,
        );
        if outcome == ClickOutcome::DoubleClick {
            self.events.push(SessionEvent::EditText(element_id));
        }
        outcome
    }

    pub fn handle_branding_mouse_down<E, C>(&mut self, event: &mut E, container: &C, scale: f32) -> ClickOutcome
    where
        E: PointerInput + ?Sized,
        C: ContainerRef + ?Sized,
    {
        self.tick(event.time_ms());
        let outcome = self.branding.handle_branding_mouse_down(
            event,
            self.doc.branding.as_ref(),
            container,
            scale,
            &mut self.drag,
        );
        if outcome == ClickOutcome::DoubleClick {
            self.events.push(SessionEvent::EditBranding);
        }
        outcome
    }

    pub fn handle_scene_device_mouse_down<E, C>(
        &mut self,
        event: &mut E,
        device_id: ElementId,
        container: &C,
        scale: f32,
    ) -> bool
    where
        E: PointerInput + ?Sized,
        C: ContainerRef + ?Sized,
    {
        self.tick(event.time_ms());
        let started = self.scene_devices.handle_scene_device_mouse_down(
            event,
            device_id,
            &self.doc.scene_devices,
            container,
            scale,
            &mut self.drag,
        );
        if started {
            self.text.select(None);
            self.branding.set_selected(false);
        }
        started
    }

    /// Fire expired single-click timers. Returns whether any drag started.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        let texts = self.text.tick(now_ms, &mut self.drag);
        if texts > 0 {
            self.branding.set_selected(false);
            self.scene_devices.select(None);
        }
        let branding = self.branding.tick(now_ms, &mut self.drag);
        if branding {
            self.text.select(None);
            self.scene_devices.select(None);
        }
        texts > 0 || branding
    }

    /// Earliest pending click deadline, for scheduling the next `tick`.
    pub fn next_deadline(&self) -> Option<f64> {
        match (self.text.next_deadline(), self.branding.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    // ─── Guide mouse-down ────────────────────────────────────────────────

    /// Mouse-down on a ruler: create a guide under the pointer and start
    /// dragging it.
    pub fn handle_ruler_mouse_down<E, C>(&mut self, event: &mut E, container: &C, scale: f32) -> Option<GuideId>
    where
        E: PointerInput + ?Sized,
        C: ContainerRef + ?Sized,
    {
        if !self.config.show_rulers {
            return None;
        }
        let (px, py) = pointer_in_canvas(event, container, scale)?;
        let ruler = hit_test_ruler(
            px,
            py,
            self.doc.canvas_width,
            self.doc.canvas_height,
            self.config.ruler_thickness * screen_px(scale),
        )?;
        consume(event);
        let id = self.guides.begin_from_ruler(ruler, px, py);
        self.events.push(SessionEvent::GuideCreated(id.clone()));
        Some(id)
    }

    /// Mouse-down on a user guide: start dragging it.
    pub fn handle_guide_mouse_down<E, C>(&mut self, event: &mut E, container: &C, scale: f32) -> bool
    where
        E: PointerInput + ?Sized,
        C: ContainerRef + ?Sized,
    {
        let Some(id) = self.guide_under_pointer(event, container, scale) else {
            return false;
        };
        consume(event);
        self.guides.begin_drag(&id)
    }

    /// Double click on a user guide deletes it.
    pub fn handle_guide_double_click<E, C>(&mut self, event: &mut E, container: &C, scale: f32) -> bool
    where
        E: PointerInput + ?Sized,
        C: ContainerRef + ?Sized,
    {
        let Some(id) = self.guide_under_pointer(event, container, scale) else {
            return false;
        };
        consume(event);
        let removed = self.guides.double_click(&id);
        if removed {
            self.events.push(SessionEvent::GuideDeleted(id));
        }
        removed
    }

    fn guide_under_pointer<E, C>(&self, event: &E, container: &C, scale: f32) -> Option<GuideId>
    where
        E: PointerInput + ?Sized,
        C: ContainerRef + ?Sized,
    {
        if !self.config.show_guides {
            return None;
        }
        let (px, py) = pointer_in_canvas(event, container, scale)?;
        hit_test_guide(
            self.guides.guides(),
            px,
            py,
            self.doc.canvas_width,
            self.doc.canvas_height,
            GUIDE_HIT_TOLERANCE * screen_px(scale),
        )
        .map(|g| g.id.clone())
    }

    pub fn clear_user_guides(&mut self) {
        self.guides.clear_user_guides();
    }

    // ─── Move / release ──────────────────────────────────────────────────

    /// Pointer move. A dragged guide takes precedence over element drags.
    /// Dragged elements follow `pointer − offset`, snapped against the
    /// canvas and every other element. Click timers due by the event's
    /// timestamp fire first. Returns whether anything moved.
    pub fn handle_mouse_move<E, C>(&mut self, event: &mut E, container: &C, scale: f32) -> bool
    where
        E: PointerInput + ?Sized,
        C: ContainerRef + ?Sized,
    {
        self.tick(event.time_ms());
        let Some((px, py)) = pointer_in_canvas(event, container, scale) else {
            return false;
        };

        if self.guides.dragging().is_some() {
            return self.guides.drag_to(px, py);
        }

        let mut moved = false;
        if let Some(id) = self.drag.dragging_text() {
            moved |= self.move_text(id, px, py);
        }
        if self.drag.is_dragging_branding() {
            moved |= self.move_branding(px, py);
        }
        if let Some(id) = self.drag.dragging_scene_device() {
            moved |= self.move_scene_device(id, px, py);
        }
        if moved {
            self.refresh_smart_guides();
        }
        moved
    }

    /// Pointer release: finish a guide drag and stop every element drag,
    /// including one whose click timer expired before the release.
    /// Returns whether a drag was active.
    pub fn handle_mouse_up<E, C>(&mut self, event: &mut E, container: &C, scale: f32) -> bool
    where
        E: PointerInput + ?Sized,
        C: ContainerRef + ?Sized,
    {
        self.tick(event.time_ms());
        let mut active = false;
        if self.guides.dragging().is_some() {
            active = true;
            match pointer_in_canvas(event, container, scale) {
                Some((px, py)) => {
                    if let Some(GuideRelease::Deleted(id)) = self.guides.end_drag(px, py) {
                        self.events.push(SessionEvent::GuideDeleted(id));
                    }
                }
                None => {
                    self.guides.cancel_drag();
                }
            }
        }
        if self.drag.is_any_dragging() {
            active = true;
            self.drag.stop_all();
        }
        self.snap = None;
        active
    }

    /// Tear down: drop pending click timers and end every drag.
    pub fn unmount(&mut self) {
        self.text.cancel_pending();
        self.branding.cancel_pending();
        self.drag.stop_all();
        self.guides.cancel_drag();
        self.snap = None;
    }

    fn move_text(&mut self, id: ElementId, px: f32, py: f32) -> bool {
        let offset = self.drag.text.drag_offset;
        let Some(text) = self.doc.text(id) else {
            return false;
        };
        let element = text.approx_bounds().at(px - offset.x, py - offset.y);
        let siblings = self.sibling_bounds(Some(id), false);
        let result = self.snap_element(&element, &siblings);
        if let Some(text) = self.doc.text_mut(id) {
            text.x = result.x;
            text.y = result.y;
        }
        self.snap = Some(result);
        true
    }

    fn move_branding(&mut self, px: f32, py: f32) -> bool {
        let offset = self.drag.branding.branding_drag_offset;
        let Some(branding) = self.doc.branding.as_ref() else {
            return false;
        };
        let element = branding.approx_bounds().at(px - offset.x, py - offset.y);
        let siblings = self.sibling_bounds(None, true);
        let result = self.snap_element(&element, &siblings);
        if let Some(branding) = self.doc.branding.as_mut() {
            branding.x = result.x;
            branding.y = result.y;
        }
        self.snap = Some(result);
        true
    }

    fn move_scene_device(&mut self, id: ElementId, px: f32, py: f32) -> bool {
        let offset = self.drag.scene_device.scene_device_drag_offset;
        let Some(device) = self.doc.scene_device(id) else {
            return false;
        };
        let element = device.bounds().at(px - offset.x, py - offset.y);
        let siblings = self.sibling_bounds(Some(id), false);
        let result = self.snap_element(&element, &siblings);
        if let Some(device) = self.doc.scene_device_mut(id) {
            device.x = result.x;
            device.y = result.y;
        }
        self.snap = Some(result);
        true
    }

    fn snap_element(&self, element: &BoundingBox, siblings: &[BoundingBox]) -> SnapResult {
        let result = calculate_snap(
            element,
            self.doc.canvas_width,
            self.doc.canvas_height,
            siblings,
            self.config.snap_enabled,
        );
        log::trace!(
            "move to ({}, {}) snapped ({}, {})",
            result.x,
            result.y,
            result.snapped_x,
            result.snapped_y
        );
        result
    }

    /// Bounds of every element except the one being dragged, in snap
    /// priority order: texts, then scene devices, then branding.
    fn sibling_bounds(&self, exclude: Option<ElementId>, exclude_branding: bool) -> Vec<BoundingBox> {
        let texts = self
            .doc
            .texts
            .iter()
            .filter(|t| Some(t.id) != exclude)
            .map(TextOverlay::approx_bounds);
        let devices = self
            .doc
            .scene_devices
            .iter()
            .filter(|d| Some(d.id) != exclude)
            .map(|d| d.bounds());
        let branding = self
            .doc
            .branding
            .as_ref()
            .filter(|b| b.visible && !exclude_branding)
            .map(|b| b.approx_bounds());
        texts.chain(devices).chain(branding).collect()
    }

    // ─── View ────────────────────────────────────────────────────────────

    /// Absolute scale factor of the rendered mockup.
    pub fn effective_zoom(&self) -> f32 {
        get_effective_zoom(
            self.doc.zoom,
            self.doc.layout_mode,
            self.doc.device_key.as_deref(),
            None,
        )
    }

    pub fn set_zoom(&mut self, zoom_percent: f32) {
        self.doc.zoom = clamp_zoom_percent(zoom_percent);
    }

    pub fn zoom_by(&mut self, steps: i32) {
        self.doc.zoom = step_zoom_percent(self.doc.zoom, steps, self.config.zoom_step);
    }

    /// Apply a resolved keyboard shortcut. Returns whether state changed.
    pub fn apply_shortcut(&mut self, action: ShortcutAction) -> bool {
        match action {
            ShortcutAction::ZoomIn => self.zoom_by(1),
            ShortcutAction::ZoomOut => self.zoom_by(-1),
            ShortcutAction::ZoomReset => self.set_zoom(100.0),
            ShortcutAction::ToggleSnap => self.config.snap_enabled = !self.config.snap_enabled,
            ShortcutAction::ToggleRulers => self.config.show_rulers = !self.config.show_rulers,
            ShortcutAction::ToggleGuides => self.config.show_guides = !self.config.show_guides,
            ShortcutAction::ClearGuides => {
                if self.guides.guides().is_empty() {
                    return false;
                }
                self.clear_user_guides();
            }
            ShortcutAction::Deselect => {
                if self.selection().is_none() {
                    return false;
                }
                self.deselect();
            }
        }
        true
    }

    /// Overlay display list for the current frame at `scale`.
    pub fn overlay_items(&self, scale: f32, theme: &OverlayTheme) -> Vec<OverlayItem> {
        let snap_guides = self.snap.as_ref().map_or(&[][..], |s| &s.guides[..]);
        let indicators = self
            .snap
            .as_ref()
            .map_or(&[][..], |s| &s.distance_indicators[..]);
        let guides = self.guides.display_guides(snap_guides);
        let frame = OverlayFrame {
            canvas_width: self.doc.canvas_width,
            canvas_height: self.doc.canvas_height,
            scale,
            ruler_thickness: self.config.ruler_thickness,
            show_rulers: self.config.show_rulers,
            show_guides: self.config.show_guides,
            guides: &guides,
            indicators,
            active_guide: self.guides.dragging(),
        };
        build_overlay(&frame, theme)
    }
}

/// Size of one screen pixel in canvas pixels.
fn screen_px(scale: f32) -> f32 {
    if scale.is_finite() && scale > 0.0 { 1.0 / scale } else { 1.0 }
}
