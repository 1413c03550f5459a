//! Input abstraction layer.
//!
//! Handlers never touch the DOM. They read pointer data through
//! [`PointerInput`] and the container's client rect through
//! [`ContainerRef`], and request `preventDefault` / `stopPropagation` through
//! the event so the host can apply them.

use mk_core::coords::ScreenRect;

/// A pointer event as seen by the interaction handlers.
pub trait PointerInput {
    fn client_x(&self) -> f32;
    fn client_y(&self) -> f32;
    /// Event timestamp in milliseconds (`Event.timeStamp`).
    fn time_ms(&self) -> f64;
    fn prevent_default(&mut self);
    fn stop_propagation(&mut self);
}

/// Source of the container's bounding client rect.
///
/// Read on every pointer event and never cached, so scrolling and resizing
/// during a drag stay correct. `None` means the container is not mounted.
pub trait ContainerRef {
    fn bounding_client_rect(&self) -> Option<ScreenRect>;
}

impl ContainerRef for ScreenRect {
    fn bounding_client_rect(&self) -> Option<ScreenRect> {
        Some(*self)
    }
}

impl ContainerRef for Option<ScreenRect> {
    fn bounding_client_rect(&self) -> Option<ScreenRect> {
        *self
    }
}

/// Plain mouse event that records which DOM side effects were requested.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MouseEvent {
    pub client_x: f32,
    pub client_y: f32,
    pub time_ms: f64,
    pub default_prevented: bool,
    pub propagation_stopped: bool,
}

impl MouseEvent {
    pub fn new(client_x: f32, client_y: f32, time_ms: f64) -> Self {
        Self {
            client_x,
            client_y,
            time_ms,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// Whether a handler consumed the event.
    pub fn consumed(&self) -> bool {
        self.default_prevented || self.propagation_stopped
    }
}

impl PointerInput for MouseEvent {
    fn client_x(&self) -> f32 {
        self.client_x
    }

    fn client_y(&self) -> f32 {
        self.client_y
    }

    fn time_ms(&self) -> f64 {
        self.time_ms
    }

    fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }
}

/// Resolve the pointer into canvas space, or `None` if the container rect
/// is unavailable.
pub fn pointer_in_canvas<E: PointerInput + ?Sized, C: ContainerRef + ?Sized>(
    event: &E,
    container: &C,
    scale: f32,
) -> Option<(f32, f32)> {
    let rect = container.bounding_client_rect()?;
    Some(mk_core::coords::screen_to_canvas(
        event.client_x(),
        event.client_y(),
        &rect,
        scale,
    ))
}

/// Mark an event as handled.
pub fn consume<E: PointerInput + ?Sized>(event: &mut E) {
    event.prevent_default();
    event.stop_propagation();
}
