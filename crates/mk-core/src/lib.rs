pub mod config;
pub mod coords;
pub mod device;
pub mod geometry;
pub mod guide;
pub mod id;
pub mod model;
pub mod snap;

pub use config::EditorConfig;
pub use coords::{ScreenRect, canvas_to_screen, screen_to_canvas};
pub use device::{
    DeviceDimensions, DeviceType, LayoutMode, RenderSize, compute_render_size, get_device_dimensions,
    get_effective_zoom,
};
pub use geometry::{BoundingBox, calculate_overlap_area, distance, do_boxes_overlap};
pub use guide::{DistanceIndicator, Guide, GuideOrientation, Ruler, compute_smart_guides};
pub use id::{ElementId, GuideId, GuideIdSource, SequentialGuideIds};
pub use model::*;
pub use snap::{SnapResult, calculate_snap};
