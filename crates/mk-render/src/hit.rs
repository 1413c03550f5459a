//! Hit testing for the overlay: point → ruler / guide lookup.
//!
//! Coordinates are canvas space. Rulers live at negative coordinates just
//! outside the canvas; guides are hit within a tolerance of their line.

use mk_core::guide::{Guide, GuideOrientation, Ruler};

/// Half-width of a guide's grab area in screen pixels.
pub const GUIDE_HIT_TOLERANCE: f32 = 4.0;

/// Which ruler, if any, is under `(px, py)`.
///
/// `ruler_size` is the ruler thickness in canvas pixels. The corner square
/// where both rulers meet belongs to neither.
pub fn hit_test_ruler(
    px: f32,
    py: f32,
    canvas_width: f32,
    canvas_height: f32,
    ruler_size: f32,
) -> Option<Ruler> {
    if ruler_size <= 0.0 {
        return None;
    }
    let on_top = (-ruler_size..0.0).contains(&py) && (0.0..=canvas_width).contains(&px);
    let on_left = (-ruler_size..0.0).contains(&px) && (0.0..=canvas_height).contains(&py);
    match (on_top, on_left) {
        (true, _) => Some(Ruler::Top),
        (_, true) => Some(Ruler::Left),
        _ => None,
    }
}

/// Find the topmost user guide under `(px, py)`.
///
/// Smart guides are never hit. Guides later in the slice are painted on top
/// and win. `tolerance` is in canvas pixels.
pub fn hit_test_guide<'a>(
    guides: &'a [Guide],
    px: f32,
    py: f32,
    canvas_width: f32,
    canvas_height: f32,
    tolerance: f32,
) -> Option<&'a Guide> {
    guides.iter().rev().filter(|g| !g.is_smart_guide).find(|g| match g.orientation {
        GuideOrientation::Vertical => {
            (px - g.position).abs() <= tolerance && (0.0..=canvas_height).contains(&py)
        }
        GuideOrientation::Horizontal => {
            (py - g.position).abs() <= tolerance && (0.0..=canvas_width).contains(&px)
        }
    })
}
