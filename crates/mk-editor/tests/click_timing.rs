//! Integration tests: click disambiguation timing and the drag store
//! (mk-editor).
//!
//! Time is driven by hand: events carry their timestamp and `tick` stands in
//! for the event loop firing the single-click timer.

use mk_core::coords::ScreenRect;
use mk_core::id::ElementId;
use mk_core::model::{Branding, TextOverlay};
use mk_editor::drag::{BrandingDrag, DragOffset, DragStore, TextDrag};
use mk_editor::{BrandingHandler, ClickOutcome, MouseEvent, TextOverlayHandler};
use pretty_assertions::assert_eq;
use std::cell::RefCell;
use std::rc::Rc;

const RECT: ScreenRect = ScreenRect::new(40.0, 30.0, 640.0, 360.0);
const SCALE: f32 = 0.5;

fn init_log() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn headline() -> Vec<TextOverlay> {
    vec![TextOverlay::new(ElementId::intern("headline"), "Ship it", 120.0, 80.0)]
}

/// Handler whose double-click callback records ids into the returned log.
fn recording_handler() -> (TextOverlayHandler, Rc<RefCell<Vec<ElementId>>>) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    let handler = TextOverlayHandler::default().with_double_click(Box::new(move |id| sink.borrow_mut().push(id)));
    (handler, log)
}

fn press(
    handler: &mut TextOverlayHandler,
    drag: &mut DragStore,
    client_x: f32,
    client_y: f32,
    t: f64,
) -> (ClickOutcome, MouseEvent) {
    let mut event = MouseEvent::new(client_x, client_y, t);
    let outcome =
        handler.handle_text_mouse_down(&mut event, ElementId::intern("headline"), &headline(), &RECT, SCALE, drag);
    (outcome, event)
}

// ─── Text overlays ───────────────────────────────────────────────────────

#[test]
fn single_click_starts_drag_once_with_canvas_offset() {
    init_log();
    let (mut handler, double_clicks) = recording_handler();
    let mut drag = DragStore::new();

    let (outcome, event) = press(&mut handler, &mut drag, 117.0, 80.0, 5_000.0);
    assert_eq!(outcome, ClickOutcome::Pending);
    assert!(event.default_prevented && event.propagation_stopped);

    let mut starts = 0;
    for t in [5_100.0, 5_200.0, 5_249.9, 5_250.0, 5_300.0, 6_000.0] {
        starts += handler.tick(t, &mut drag);
    }
    assert_eq!(starts, 1);

    // ((117 - 40) / 0.5 - 120, (80 - 30) / 0.5 - 80)
    assert_eq!(
        drag.text,
        TextDrag {
            dragging_text: Some(ElementId::intern("headline")),
            drag_offset: DragOffset::new(34.0, 20.0),
        }
    );
    assert!(double_clicks.borrow().is_empty());
}

#[test]
fn two_presses_within_window_double_click_once() {
    init_log();
    let (mut handler, double_clicks) = recording_handler();
    let mut drag = DragStore::new();

    press(&mut handler, &mut drag, 117.0, 80.0, 1_000.0);
    let (outcome, _) = press(&mut handler, &mut drag, 117.0, 80.0, 1_100.0);
    assert_eq!(outcome, ClickOutcome::DoubleClick);

    for t in [1_250.0, 1_350.0, 2_000.0] {
        assert_eq!(handler.tick(t, &mut drag), 0);
    }
    assert_eq!(*double_clicks.borrow(), vec![ElementId::intern("headline")]);
    assert!(!drag.is_any_dragging());
}

#[test]
fn third_press_after_double_click_starts_fresh_drag() {
    init_log();
    let (mut handler, double_clicks) = recording_handler();
    let mut drag = DragStore::new();

    press(&mut handler, &mut drag, 117.0, 80.0, 1_000.0);
    press(&mut handler, &mut drag, 117.0, 80.0, 1_100.0);
    let (outcome, _) = press(&mut handler, &mut drag, 127.0, 90.0, 1_150.0);
    assert_eq!(outcome, ClickOutcome::Pending);

    assert_eq!(handler.tick(1_399.0, &mut drag), 0);
    assert_eq!(handler.tick(1_400.0, &mut drag), 1);
    assert_eq!(drag.dragging_text(), Some(ElementId::intern("headline")));
    assert_eq!(drag.text.drag_offset, DragOffset::new(54.0, 40.0));
    assert_eq!(double_clicks.borrow().len(), 1);
}

#[test]
fn late_second_press_fires_first_click_then_rearms() {
    let (mut handler, double_clicks) = recording_handler();
    let mut drag = DragStore::new();

    press(&mut handler, &mut drag, 117.0, 80.0, 1_000.0);
    // No tick in between: the press itself flushes the expired timer.
    let (outcome, _) = press(&mut handler, &mut drag, 117.0, 80.0, 1_400.0);
    assert_eq!(outcome, ClickOutcome::Pending);
    assert_eq!(drag.dragging_text(), Some(ElementId::intern("headline")));
    assert!(double_clicks.borrow().is_empty());
    assert_eq!(handler.next_deadline(), Some(1_650.0));
}

#[test]
fn missing_double_click_callback_is_fine() {
    let mut handler = TextOverlayHandler::default();
    let mut drag = DragStore::new();
    press(&mut handler, &mut drag, 117.0, 80.0, 0.0);
    let (outcome, _) = press(&mut handler, &mut drag, 117.0, 80.0, 50.0);
    assert_eq!(outcome, ClickOutcome::DoubleClick);
}

// ─── Branding ────────────────────────────────────────────────────────────

#[test]
fn branding_follows_the_same_timing() {
    let branding = Branding::new(100.0, 600.0);
    let mut handler = BrandingHandler::default();
    let mut drag = DragStore::new();

    let mut event = MouseEvent::new(100.0, 340.0, 0.0);
    handler.handle_branding_mouse_down(&mut event, Some(&branding), &RECT, SCALE, &mut drag);
    assert!(handler.tick(250.0, &mut drag));
    assert_eq!(
        drag.branding,
        BrandingDrag {
            is_dragging_branding: true,
            branding_drag_offset: DragOffset::new(20.0, 20.0),
        }
    );

    let mut first = MouseEvent::new(100.0, 340.0, 1_000.0);
    let mut second = MouseEvent::new(100.0, 340.0, 1_090.0);
    drag.stop_branding_drag();
    handler.handle_branding_mouse_down(&mut first, Some(&branding), &RECT, SCALE, &mut drag);
    let outcome = handler.handle_branding_mouse_down(&mut second, Some(&branding), &RECT, SCALE, &mut drag);
    assert_eq!(outcome, ClickOutcome::DoubleClick);
    assert!(!handler.tick(2_000.0, &mut drag));
    assert!(!drag.is_dragging_branding());
}

// ─── Drag store ──────────────────────────────────────────────────────────

#[test]
fn drag_store_round_trip_and_noop_stops() {
    let mut store = DragStore::new();
    store.start_text_drag(ElementId::intern("a"), DragOffset::new(1.0, 2.0));
    store.stop_text_drag();
    assert_eq!(store.text, TextDrag::default());

    store.stop_branding_drag();
    store.stop_scene_device_drag();
    assert_eq!(store, DragStore::default());
}
