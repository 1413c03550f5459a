//! Mouse handling for the branding block.
//!
//! Same single/double click split as text overlays, with a single state
//! machine since a mockup carries at most one branding block.

use crate::click::{ClickDisambiguator, ClickOutcome};
use crate::drag::{DragOffset, DragStore};
use crate::input::{ContainerRef, PointerInput, consume, pointer_in_canvas};
use mk_core::config::DOUBLE_CLICK_WINDOW_MS;
use mk_core::model::Branding;

/// Invoked on a double click on the branding block.
pub type BrandingDoubleClickCallback = Box<dyn FnMut()>;

pub struct BrandingHandler {
    clicks: ClickDisambiguator<()>,
    selected: bool,
    on_double_click: Option<BrandingDoubleClickCallback>,
}

impl Default for BrandingHandler {
    fn default() -> Self {
        Self::new(DOUBLE_CLICK_WINDOW_MS)
    }
}

impl BrandingHandler {
    pub fn new(double_click_window_ms: f64) -> Self {
        Self {
            clicks: ClickDisambiguator::new(double_click_window_ms),
            selected: false,
            on_double_click: None,
        }
    }

    pub fn with_double_click(mut self, callback: BrandingDoubleClickCallback) -> Self {
        self.on_double_click = Some(callback);
        self
    }

    pub fn set_on_double_click(&mut self, callback: Option<BrandingDoubleClickCallback>) {
        self.on_double_click = callback;
    }

    pub fn set_double_click_window(&mut self, window_ms: f64) {
        self.clicks.set_window_ms(window_ms);
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    /// Mouse-down on the branding block.
    ///
    /// `branding` is `None` when the mockup has no branding block or it is
    /// not editable; the event is then ignored. The container rect must be
    /// available as well.
    pub fn handle_branding_mouse_down<E, C>(
        &mut self,
        event: &mut E,
        branding: Option<&Branding>,
        container: &C,
        scale: f32,
        drag: &mut DragStore,
    ) -> ClickOutcome
    where
        E: PointerInput + ?Sized,
        C: ContainerRef + ?Sized,
    {
        let now = event.time_ms();
        self.tick(now, drag);

        let Some(branding) = branding else {
            return ClickOutcome::Ignored;
        };
        let Some((px, py)) = pointer_in_canvas(event, container, scale) else {
            return ClickOutcome::Ignored;
        };
        consume(event);

        let offset = DragOffset::new(px - branding.x, py - branding.y);
        let outcome = self.clicks.press((), now, offset);
        if outcome == ClickOutcome::DoubleClick {
            log::debug!("double click on branding");
            if let Some(callback) = self.on_double_click.as_mut() {
                callback();
            }
        }
        outcome
    }

    /// Fire an expired single-click timer. Returns whether a drag started.
    pub fn tick(&mut self, now_ms: f64, drag: &mut DragStore) -> bool {
        match self.clicks.expire(now_ms).first() {
            Some(click) => {
                self.selected = true;
                drag.start_branding_drag(click.offset);
                true
            }
            None => false,
        }
    }

    pub fn next_deadline(&self) -> Option<f64> {
        self.clicks.next_deadline()
    }

    pub fn has_pending(&self) -> bool {
        self.clicks.has_pending()
    }

    pub fn cancel_pending(&mut self) {
        self.clicks.cancel_all();
    }
}
