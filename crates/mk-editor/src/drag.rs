//! Drag-and-drop state store.
//!
//! Three independent categories: free text, the branding block and scene
//! devices. Each holds at most one active drag plus the pointer-to-origin
//! offset captured when the drag started. Starting a drag replaces any
//! active drag of the same category; stopping an idle category is a no-op.

use mk_core::id::ElementId;
use serde::Serialize;

/// Vector from the pointer to the dragged element's origin, canvas px.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct DragOffset {
    pub x: f32,
    pub y: f32,
}

impl DragOffset {
    pub const ZERO: DragOffset = DragOffset { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextDrag {
    pub dragging_text: Option<ElementId>,
    pub drag_offset: DragOffset,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandingDrag {
    pub is_dragging_branding: bool,
    pub branding_drag_offset: DragOffset,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneDeviceDrag {
    pub dragging_scene_device: Option<ElementId>,
    pub scene_device_drag_offset: DragOffset,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DragStore {
    pub text: TextDrag,
    pub branding: BrandingDrag,
    pub scene_device: SceneDeviceDrag,
}

impl DragStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ─── Text ────────────────────────────────────────────────────────────

    pub fn start_text_drag(&mut self, id: ElementId, offset: DragOffset) {
        log::debug!("start text drag {id:?} offset ({}, {})", offset.x, offset.y);
        self.text = TextDrag {
            dragging_text: Some(id),
            drag_offset: offset,
        };
    }

    pub fn stop_text_drag(&mut self) {
        if let Some(id) = self.text.dragging_text {
            log::debug!("stop text drag {id:?}");
        }
        self.text = TextDrag::default();
    }

    pub fn dragging_text(&self) -> Option<ElementId> {
        self.text.dragging_text
    }

    // ─── Branding ────────────────────────────────────────────────────────

    pub fn start_branding_drag(&mut self, offset: DragOffset) {
        log::debug!("start branding drag offset ({}, {})", offset.x, offset.y);
        self.branding = BrandingDrag {
            is_dragging_branding: true,
            branding_drag_offset: offset,
        };
    }

    pub fn stop_branding_drag(&mut self) {
        if self.branding.is_dragging_branding {
            log::debug!("stop branding drag");
        }
        self.branding = BrandingDrag::default();
    }

    pub fn is_dragging_branding(&self) -> bool {
        self.branding.is_dragging_branding
    }

    // ─── Scene devices ───────────────────────────────────────────────────

    pub fn start_scene_device_drag(&mut self, id: ElementId, offset: DragOffset) {
        log::debug!("start scene device drag {id:?} offset ({}, {})", offset.x, offset.y);
        self.scene_device = SceneDeviceDrag {
            dragging_scene_device: Some(id),
            scene_device_drag_offset: offset,
        };
    }

    pub fn stop_scene_device_drag(&mut self) {
        if let Some(id) = self.scene_device.dragging_scene_device {
            log::debug!("stop scene device drag {id:?}");
        }
        self.scene_device = SceneDeviceDrag::default();
    }

    pub fn dragging_scene_device(&self) -> Option<ElementId> {
        self.scene_device.dragging_scene_device
    }

    // ─── All ─────────────────────────────────────────────────────────────

    pub fn is_any_dragging(&self) -> bool {
        self.text.dragging_text.is_some()
            || self.branding.is_dragging_branding
            || self.scene_device.dragging_scene_device.is_some()
    }

    pub fn stop_all(&mut self) {
        self.stop_text_drag();
        self.stop_branding_drag();
        self.stop_scene_device_drag();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn text_drag_start_stop() {
        let mut store = DragStore::new();
        store.start_text_drag(ElementId::intern("a"), DragOffset::new(1.0, 2.0));
        assert_eq!(store.dragging_text(), Some(ElementId::intern("a")));
        assert_eq!(store.text.drag_offset, DragOffset::new(1.0, 2.0));

        store.stop_text_drag();
        assert_eq!(
            store.text,
            TextDrag {
                dragging_text: None,
                drag_offset: DragOffset::ZERO,
            }
        );
    }

    #[test]
    fn stopping_idle_categories_is_noop() {
        let mut store = DragStore::new();
        store.stop_text_drag();
        store.stop_branding_drag();
        store.stop_scene_device_drag();
        assert_eq!(store, DragStore::default());
    }

    #[test]
    fn restart_replaces_active_drag() {
        let mut store = DragStore::new();
        store.start_text_drag(ElementId::intern("a"), DragOffset::new(1.0, 1.0));
        store.start_text_drag(ElementId::intern("b"), DragOffset::new(5.0, 6.0));
        assert_eq!(store.dragging_text(), Some(ElementId::intern("b")));
        assert_eq!(store.text.drag_offset, DragOffset::new(5.0, 6.0));
    }

    #[test]
    fn categories_are_independent() {
        let mut store = DragStore::new();
        store.start_text_drag(ElementId::intern("a"), DragOffset::new(1.0, 1.0));
        store.start_branding_drag(DragOffset::new(2.0, 2.0));
        store.start_scene_device_drag(ElementId::intern("phone"), DragOffset::new(3.0, 3.0));

        store.stop_branding_drag();
        assert!(!store.is_dragging_branding());
        assert_eq!(store.dragging_text(), Some(ElementId::intern("a")));
        assert_eq!(store.dragging_scene_device(), Some(ElementId::intern("phone")));
        assert_eq!(store.scene_device.scene_device_drag_offset, DragOffset::new(3.0, 3.0));

        store.stop_all();
        assert!(!store.is_any_dragging());
    }
}
