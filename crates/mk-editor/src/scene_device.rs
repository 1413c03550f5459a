//! Mouse handling for scene devices: select and start dragging at once.

use crate::drag::{DragOffset, DragStore};
use crate::input::{ContainerRef, PointerInput, consume, pointer_in_canvas};
use mk_core::id::ElementId;
use mk_core::model::SceneDevice;

#[derive(Debug, Clone, Default)]
pub struct SceneDeviceHandler {
    selected: Option<ElementId>,
}

impl SceneDeviceHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<ElementId> {
        self.selected
    }

    pub fn select(&mut self, id: Option<ElementId>) {
        self.selected = id;
    }

    /// Mouse-down on a scene device. Returns `false` (event untouched) when
    /// the device is unknown or the container rect is unavailable.
    pub fn handle_scene_device_mouse_down<E, C>(
        &mut self,
        event: &mut E,
        device_id: ElementId,
        devices: &[SceneDevice],
        container: &C,
        scale: f32,
        drag: &mut DragStore,
    ) -> bool
    where
        E: PointerInput + ?Sized,
        C: ContainerRef + ?Sized,
    {
        let Some(device) = devices.iter().find(|d| d.id == device_id) else {
            return false;
        };
        let Some((px, py)) = pointer_in_canvas(event, container, scale) else {
            return false;
        };
        consume(event);

        self.selected = Some(device_id);
        drag.start_scene_device_drag(device_id, DragOffset::new(px - device.x, py - device.y));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::MouseEvent;
    use mk_core::coords::ScreenRect;
    use pretty_assertions::assert_eq;

    fn devices() -> Vec<SceneDevice> {
        vec![SceneDevice {
            id: ElementId::intern("phone"),
            device_key: "iphone-17-pro".into(),
            x: 100.0,
            y: 100.0,
            width: 200.0,
            height: 400.0,
        }]
    }

    #[test]
    fn press_selects_and_drags_immediately() {
        let mut handler = SceneDeviceHandler::new();
        let mut drag = DragStore::new();
        let rect = ScreenRect::new(10.0, 10.0, 1280.0, 720.0);
        let mut event = MouseEvent::new(160.0, 210.0, 0.0);

        assert!(handler.handle_scene_device_mouse_down(
            &mut event,
            ElementId::intern("phone"),
            &devices(),
            &rect,
            1.0,
            &mut drag
        ));
        assert!(event.consumed());
        assert_eq!(handler.selected(), Some(ElementId::intern("phone")));
        assert_eq!(drag.dragging_scene_device(), Some(ElementId::intern("phone")));
        assert_eq!(drag.scene_device.scene_device_drag_offset, DragOffset::new(50.0, 100.0));
    }

    #[test]
    fn unknown_device_is_ignored() {
        let mut handler = SceneDeviceHandler::new();
        let mut drag = DragStore::new();
        let mut event = MouseEvent::new(0.0, 0.0, 0.0);
        assert!(!handler.handle_scene_device_mouse_down(
            &mut event,
            ElementId::intern("tablet"),
            &devices(),
            &ScreenRect::new(0.0, 0.0, 10.0, 10.0),
            1.0,
            &mut drag
        ));
        assert!(!event.consumed());
        assert!(!drag.is_any_dragging());
    }
}
