pub mod hit;
pub mod overlay;
pub mod paint;

pub use hit::{GUIDE_HIT_TOLERANCE, hit_test_guide, hit_test_ruler};
pub use overlay::{OverlayFrame, OverlayItem, OverlayTheme, build_overlay};
pub use paint::paint_overlay;
