pub mod branding;
pub mod click;
pub mod drag;
pub mod guides;
pub mod input;
pub mod scene_device;
pub mod session;
pub mod shortcuts;
pub mod text_overlay;

pub use branding::BrandingHandler;
pub use click::{ClickDisambiguator, ClickOutcome, ClickState};
pub use drag::{DragOffset, DragStore};
pub use guides::{GUIDE_SOFT_SNAP_THRESHOLD, GuideOverlay, GuideRelease};
pub use input::{ContainerRef, MouseEvent, PointerInput};
pub use scene_device::SceneDeviceHandler;
pub use session::{MockupSession, Selection, SessionEvent};
pub use shortcuts::{ShortcutAction, ShortcutMap};
pub use text_overlay::TextOverlayHandler;
