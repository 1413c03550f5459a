//! Ruler and guide overlay controller.
//!
//! Owns the user guides (persisted), the smart guides (derived from the
//! canvas contents) and the guide currently being dragged. All positions are
//! canvas pixels. Ids for new guides come from an injected
//! [`GuideIdSource`].

use mk_core::guide::{
    Guide, GuideOrientation, Ruler, SMART_GUIDE_COLOR, USER_GUIDE_COLOR, compute_smart_guides,
    guide_extent,
};
use mk_core::id::{GuideId, GuideIdSource, SequentialGuideIds};
use mk_core::model::{Color, SceneDevice, TextOverlay};

/// Distance within which a dragged user guide jumps onto a smart guide.
pub const GUIDE_SOFT_SNAP_THRESHOLD: f32 = 8.0;

/// What happened to the dragged guide on release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuideRelease {
    Kept(GuideId),
    Deleted(GuideId),
}

pub struct GuideOverlay {
    guides: Vec<Guide>,
    smart_guides: Vec<Guide>,
    dragging: Option<GuideId>,
    ids: Box<dyn GuideIdSource>,
    canvas_width: f32,
    canvas_height: f32,
    user_color: Color,
    smart_color: Color,
}

impl GuideOverlay {
    pub fn new(canvas_width: f32, canvas_height: f32) -> Self {
        Self::with_id_source(canvas_width, canvas_height, Box::new(SequentialGuideIds::new()))
    }

    pub fn with_id_source(canvas_width: f32, canvas_height: f32, ids: Box<dyn GuideIdSource>) -> Self {
        Self {
            guides: Vec::new(),
            smart_guides: compute_smart_guides(canvas_width, canvas_height, &[], &[]),
            dragging: None,
            ids,
            canvas_width,
            canvas_height,
            user_color: USER_GUIDE_COLOR,
            smart_color: SMART_GUIDE_COLOR,
        }
    }

    pub fn set_colors(&mut self, user: Color, smart: Color) {
        self.user_color = user;
        self.smart_color = smart;
        for guide in &mut self.guides {
            guide.color = user;
        }
        for guide in &mut self.smart_guides {
            guide.color = smart;
        }
    }

    pub fn set_id_source(&mut self, ids: Box<dyn GuideIdSource>) {
        self.ids = ids;
    }

    pub fn set_canvas_size(&mut self, canvas_width: f32, canvas_height: f32) {
        self.canvas_width = canvas_width;
        self.canvas_height = canvas_height;
    }

    /// Replace the user guides, e.g. after loading a mockup. Smart guides in
    /// the input are dropped and any active drag ends.
    pub fn set_guides(&mut self, guides: Vec<Guide>) {
        self.guides = guides.into_iter().filter(|g| !g.is_smart_guide).collect();
        self.dragging = None;
    }

    /// User guides in creation order.
    pub fn guides(&self) -> &[Guide] {
        &self.guides
    }

    pub fn smart_guides(&self) -> &[Guide] {
        &self.smart_guides
    }

    pub fn guide(&self, id: &GuideId) -> Option<&Guide> {
        self.guides.iter().find(|g| &g.id == id)
    }

    pub fn dragging(&self) -> Option<&GuideId> {
        self.dragging.as_ref()
    }

    pub fn recompute_smart_guides(&mut self, texts: &[TextOverlay], devices: &[SceneDevice]) {
        let color = self.smart_color;
        self.smart_guides = compute_smart_guides(self.canvas_width, self.canvas_height, texts, devices)
            .into_iter()
            .map(|g| g.with_color(color))
            .collect();
    }

    /// Mouse-down on a ruler at canvas point `(x, y)`: create a guide there
    /// and start dragging it.
    pub fn begin_from_ruler(&mut self, ruler: Ruler, x: f32, y: f32) -> GuideId {
        let orientation = ruler.guide_orientation();
        let position = self.clamp(orientation, along(orientation, x, y));
        let id = self.ids.next_id();
        log::debug!("create guide {id} ({orientation:?} at {position})");
        self.guides
            .push(Guide::user(id.clone(), orientation, position).with_color(self.user_color));
        self.dragging = Some(id.clone());
        id
    }

    /// Start dragging an existing user guide. Smart or unknown ids are
    /// refused.
    pub fn begin_drag(&mut self, id: &GuideId) -> bool {
        if self.guide(id).is_none() {
            return false;
        }
        self.dragging = Some(id.clone());
        true
    }

    /// Move the dragged guide to follow canvas point `(x, y)`. The position
    /// is clamped to the canvas, then pulled onto the nearest smart guide of
    /// the same orientation within [`GUIDE_SOFT_SNAP_THRESHOLD`].
    pub fn drag_to(&mut self, x: f32, y: f32) -> bool {
        let Some(id) = self.dragging.clone() else {
            return false;
        };
        let Some(orientation) = self.guide(&id).map(|g| g.orientation) else {
            self.dragging = None;
            return false;
        };

        let clamped = self.clamp(orientation, along(orientation, x, y));
        let position = self.soft_snap(orientation, clamped);
        if let Some(guide) = self.guides.iter_mut().find(|g| g.id == id) {
            guide.position = position;
        }
        true
    }

    /// End the drag at canvas point `(x, y)`. The guide is deleted when the
    /// raw pointer lies outside `[0, extent]` along the axis the guide moves
    /// on (x for vertical guides, y for horizontal ones). The other
    /// coordinate is ignored, so a vertical guide released over the top
    /// ruler is kept.
    pub fn end_drag(&mut self, x: f32, y: f32) -> Option<GuideRelease> {
        let id = self.dragging.take()?;
        let orientation = self.guide(&id)?.orientation;
        let raw = along(orientation, x, y);
        let extent = guide_extent(orientation, self.canvas_width, self.canvas_height);
        if (0.0..=extent).contains(&raw) {
            Some(GuideRelease::Kept(id))
        } else {
            self.remove_guide(&id);
            Some(GuideRelease::Deleted(id))
        }
    }

    /// Stop dragging without a release position; the guide stays where it is.
    pub fn cancel_drag(&mut self) -> Option<GuideId> {
        self.dragging.take()
    }

    /// Double-click on a guide deletes it. Smart guides are not affected.
    pub fn double_click(&mut self, id: &GuideId) -> bool {
        self.remove_guide(id)
    }

    pub fn remove_guide(&mut self, id: &GuideId) -> bool {
        let before = self.guides.len();
        self.guides.retain(|g| &g.id != id);
        if self.dragging.as_ref() == Some(id) {
            self.dragging = None;
        }
        let removed = self.guides.len() != before;
        if removed {
            log::debug!("delete guide {id}");
        }
        removed
    }

    pub fn clear_user_guides(&mut self) {
        log::debug!("clear {} user guides", self.guides.len());
        self.guides.clear();
        self.dragging = None;
    }

    /// Everything the overlay draws: user guides, then smart guides, then the
    /// live snap guides of the current element drag.
    pub fn display_guides(&self, snap_guides: &[Guide]) -> Vec<Guide> {
        let mut out = Vec::with_capacity(self.guides.len() + self.smart_guides.len() + snap_guides.len());
        out.extend(self.guides.iter().cloned());
        out.extend(self.smart_guides.iter().cloned());
        out.extend(snap_guides.iter().cloned());
        out
    }

    fn clamp(&self, orientation: GuideOrientation, position: f32) -> f32 {
        let extent = guide_extent(orientation, self.canvas_width, self.canvas_height);
        if position.is_nan() {
            return 0.0;
        }
        position.clamp(0.0, extent.max(0.0))
    }

    fn soft_snap(&self, orientation: GuideOrientation, position: f32) -> f32 {
        self.smart_guides
            .iter()
            .filter(|g| g.orientation == orientation)
            .map(|g| (g.position, (g.position - position).abs()))
            .filter(|(_, gap)| *gap < GUIDE_SOFT_SNAP_THRESHOLD)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map_or(position, |(snapped, _)| snapped)
    }
}

/// The coordinate a guide of `orientation` is positioned along.
fn along(orientation: GuideOrientation, x: f32, y: f32) -> f32 {
    match orientation {
        GuideOrientation::Vertical => x,
        GuideOrientation::Horizontal => y,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mk_core::id::ElementId;
    use pretty_assertions::assert_eq;

    fn overlay() -> GuideOverlay {
        GuideOverlay::new(1280.0, 720.0)
    }

    #[test]
    fn ruler_press_creates_and_drags_guide() {
        let mut overlay = overlay();
        let id = overlay.begin_from_ruler(Ruler::Top, 300.0, -10.0);
        assert_eq!(id.as_str(), "guide-1");
        assert_eq!(overlay.dragging(), Some(&id));

        let guide = overlay.guide(&id).unwrap();
        assert_eq!(guide.orientation, GuideOrientation::Vertical);
        assert_eq!(guide.position, 300.0);
        assert!(!guide.is_smart_guide);

        let id2 = overlay.begin_from_ruler(Ruler::Left, -10.0, 200.0);
        assert_eq!(id2.as_str(), "guide-2");
        assert_eq!(overlay.guide(&id2).unwrap().orientation, GuideOrientation::Horizontal);
        assert_eq!(overlay.guide(&id2).unwrap().position, 200.0);
    }

    #[test]
    fn drag_clamps_to_canvas() {
        let mut overlay = overlay();
        let id = overlay.begin_from_ruler(Ruler::Top, 300.0, -10.0);
        assert!(overlay.drag_to(1500.0, 50.0));
        assert_eq!(overlay.guide(&id).unwrap().position, 1280.0);
        assert!(overlay.drag_to(-40.0, 50.0));
        assert_eq!(overlay.guide(&id).unwrap().position, 0.0);
    }

    #[test]
    fn drag_soft_snaps_to_same_orientation_smart_guide() {
        let mut overlay = overlay();
        let id = overlay.begin_from_ruler(Ruler::Top, 300.0, -10.0);

        overlay.drag_to(645.0, 360.0);
        assert_eq!(overlay.guide(&id).unwrap().position, 640.0);

        overlay.drag_to(648.0, 360.0);
        assert_eq!(overlay.guide(&id).unwrap().position, 648.0);

        // The canvas center-y smart guide is horizontal and never attracts
        // a vertical guide.
        overlay.drag_to(362.0, 0.0);
        assert_eq!(overlay.guide(&id).unwrap().position, 362.0);
    }

    #[test]
    fn soft_snap_picks_nearest_smart_guide() {
        let mut overlay = overlay();
        let text = TextOverlay::new(ElementId::intern("t"), "ab", 634.0, 0.0).with_font_size(10.0);
        overlay.recompute_smart_guides(&[text], &[]);
        let id = overlay.begin_from_ruler(Ruler::Top, 100.0, -5.0);
        overlay.drag_to(635.0, 10.0);
        assert_eq!(overlay.guide(&id).unwrap().position, 634.0);
    }

    #[test]
    fn release_outside_canvas_deletes() {
        let mut overlay = overlay();
        let id = overlay.begin_from_ruler(Ruler::Left, -10.0, 200.0);
        overlay.drag_to(100.0, -5.0);
        assert_eq!(overlay.end_drag(100.0, -5.0), Some(GuideRelease::Deleted(id)));
        assert!(overlay.guides().is_empty());
        assert_eq!(overlay.dragging(), None);
    }

    #[test]
    fn vertical_guide_released_over_top_ruler_is_kept() {
        let mut overlay = overlay();
        let id = overlay.begin_from_ruler(Ruler::Top, 300.0, -10.0);
        assert_eq!(overlay.end_drag(300.0, -10.0), Some(GuideRelease::Kept(id)));
        assert_eq!(overlay.guides().len(), 1);
        assert_eq!(overlay.end_drag(0.0, 0.0), None);
    }

    #[test]
    fn double_click_deletes_user_guides_only() {
        let mut overlay = overlay();
        let id = overlay.begin_from_ruler(Ruler::Top, 300.0, -10.0);
        overlay.end_drag(300.0, 10.0);
        assert!(!overlay.double_click(&GuideId::new("smart-center-x")));
        assert_eq!(overlay.smart_guides().len(), 2);
        assert!(overlay.double_click(&id));
        assert!(overlay.guides().is_empty());
    }

    #[test]
    fn smart_guides_cannot_be_dragged() {
        let mut overlay = overlay();
        assert!(!overlay.begin_drag(&GuideId::new("smart-center-x")));
        assert!(!overlay.drag_to(10.0, 10.0));
    }

    #[test]
    fn set_guides_drops_smart_guides() {
        let mut overlay = overlay();
        overlay.set_guides(vec![
            Guide::user("guide-7".into(), GuideOrientation::Vertical, 10.0),
            Guide::smart("smart-center-x", GuideOrientation::Vertical, 640.0),
        ]);
        assert_eq!(overlay.guides().len(), 1);
    }

    #[test]
    fn display_merges_all_sources() {
        let mut overlay = overlay();
        overlay.begin_from_ruler(Ruler::Top, 10.0, -1.0);
        let snap = [Guide::smart("snap-x", GuideOrientation::Vertical, 0.0)];
        let display = overlay.display_guides(&snap);
        assert_eq!(display.len(), 4);
        assert_eq!(display[0].id.as_str(), "guide-1");
        assert_eq!(display[3].id.as_str(), "snap-x");
    }

    #[test]
    fn clear_user_guides_keeps_smart_guides() {
        let mut overlay = overlay();
        overlay.begin_from_ruler(Ruler::Top, 10.0, -1.0);
        overlay.begin_from_ruler(Ruler::Left, -1.0, 10.0);
        overlay.clear_user_guides();
        assert!(overlay.guides().is_empty());
        assert_eq!(overlay.dragging(), None);
        assert_eq!(overlay.smart_guides().len(), 2);
    }
}
