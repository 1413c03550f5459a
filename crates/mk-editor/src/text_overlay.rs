//! Mouse handling for free text overlays.
//!
//! A single click selects the text and starts dragging it, but only after the
//! double-click window has passed without a second press. A double click
//! cancels that and hands the id to the edit callback instead.

use crate::click::{ClickDisambiguator, ClickOutcome};
use crate::drag::{DragOffset, DragStore};
use crate::input::{ContainerRef, PointerInput, consume, pointer_in_canvas};
use mk_core::config::DOUBLE_CLICK_WINDOW_MS;
use mk_core::id::ElementId;
use mk_core::model::TextOverlay;

/// Invoked with the text id on a double click.
pub type TextDoubleClickCallback = Box<dyn FnMut(ElementId)>;

pub struct TextOverlayHandler {
    clicks: ClickDisambiguator<ElementId>,
    selected: Option<ElementId>,
    on_double_click: Option<TextDoubleClickCallback>,
}

impl Default for TextOverlayHandler {
    fn default() -> Self {
        Self::new(DOUBLE_CLICK_WINDOW_MS)
    }
}

impl TextOverlayHandler {
    pub fn new(double_click_window_ms: f64) -> Self {
        Self {
            clicks: ClickDisambiguator::new(double_click_window_ms),
            selected: None,
            on_double_click: None,
        }
    }

    pub fn with_double_click(mut self, callback: TextDoubleClickCallback) -> Self {
        self.on_double_click = Some(callback);
        self
    }

    pub fn set_on_double_click(&mut self, callback: Option<TextDoubleClickCallback>) {
        self.on_double_click = callback;
    }

    pub fn set_double_click_window(&mut self, window_ms: f64) {
        self.clicks.set_window_ms(window_ms);
    }

    pub fn selected(&self) -> Option<ElementId> {
        self.selected
    }

    pub fn select(&mut self, id: Option<ElementId>) {
        self.selected = id;
    }

    /// Mouse-down on a text overlay.
    ///
    /// Ignored (event untouched, no state change) when `element_id` is not
    /// in `texts` or the container rect is unavailable. Otherwise the event
    /// is consumed and the press is fed to the click state machine with the
    /// pointer-to-origin offset captured now, in canvas space.
    pub fn handle_text_mouse_down<E, C>(
        &mut self,
        event: &mut E,
        element_id: ElementId,
        texts: &[TextOverlay],
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

        let Some(text) = texts.iter().find(|t| t.id == element_id) else {
            return ClickOutcome::Ignored;
        };
        let Some((px, py)) = pointer_in_canvas(event, container, scale) else {
            return ClickOutcome::Ignored;
        };
        consume(event);

        let offset = DragOffset::new(px - text.x, py - text.y);
        let outcome = self.clicks.press(element_id, now, offset);
        if outcome == ClickOutcome::DoubleClick {
            log::debug!("double click on text {element_id:?}");
            if let Some(callback) = self.on_double_click.as_mut() {
                callback(element_id);
            }
        }
        outcome
    }

    /// Fire expired single-click timers: select the text and start its drag.
    /// Returns how many fired.
    pub fn tick(&mut self, now_ms: f64, drag: &mut DragStore) -> usize {
        let fired = self.clicks.expire(now_ms);
        for click in &fired {
            self.selected = Some(click.key);
            drag.start_text_drag(click.key, click.offset);
        }
        fired.len()
    }

    pub fn next_deadline(&self) -> Option<f64> {
        self.clicks.next_deadline()
    }

    pub fn has_pending(&self) -> bool {
        self.clicks.has_pending()
    }

    /// Drop the pending timer for one text, e.g. when it is removed.
    pub fn cancel(&mut self, id: ElementId) -> bool {
        self.clicks.cancel(id)
    }

    /// Drop every pending timer. Call on unmount.
    pub fn cancel_pending(&mut self) {
        self.clicks.cancel_all();
    }
}
