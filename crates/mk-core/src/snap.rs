//! Element snapping against the canvas and sibling elements.
//!
//! Each axis is resolved independently. Candidates are tried in a fixed
//! priority order and the first one within [`SNAP_THRESHOLD`] wins:
//!
//! | Source   | X candidates (Y is symmetric)                                  |
//! |----------|----------------------------------------------------------------|
//! | Canvas   | left → 0, right → width, center → width / 2                    |
//! | Sibling  | left → left, left → right, right → left, right → right, center |
//!
//! Siblings are only consulted when the canvas did not already snap the
//! axis, and they are scanned in input order: the first sibling with any
//! match claims the axis even if a later sibling would be closer.

use crate::geometry::BoundingBox;
use crate::guide::{DistanceIndicator, Guide, GuideOrientation};
use crate::model::Color;
use serde::Serialize;
use smallvec::SmallVec;

/// Proximity (canvas px) within which an element edge or center locks onto
/// a snap target.
pub const SNAP_THRESHOLD: f32 = 8.0;

/// Gaps at or beyond this many pixels get no distance indicator.
pub const MAX_INDICATOR_GAP: f32 = 100.0;

/// Color of guides emitted by the snap engine.
pub const SNAP_GUIDE_COLOR: Color = Color::rgba(1.0, 0.0, 1.0, 1.0);

/// Outcome of a snap calculation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapResult {
    pub x: f32,
    pub y: f32,
    pub snapped_x: bool,
    pub snapped_y: bool,
    /// At most one guide per snapped axis.
    pub guides: SmallVec<[Guide; 2]>,
    pub distance_indicators: SmallVec<[DistanceIndicator; 2]>,
}

impl SnapResult {
    fn unsnapped(element: &BoundingBox) -> Self {
        Self {
            x: element.x,
            y: element.y,
            snapped_x: false,
            snapped_y: false,
            guides: SmallVec::new(),
            distance_indicators: SmallVec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

impl Axis {
    fn start(self, b: &BoundingBox) -> f32 {
        match self {
            Axis::X => b.x,
            Axis::Y => b.y,
        }
    }

    fn size(self, b: &BoundingBox) -> f32 {
        match self {
            Axis::X => b.width,
            Axis::Y => b.height,
        }
    }

    fn other(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }

    /// Orientation of the line marking a snap on this axis.
    fn guide_orientation(self) -> GuideOrientation {
        match self {
            Axis::X => GuideOrientation::Vertical,
            Axis::Y => GuideOrientation::Horizontal,
        }
    }

    /// Orientation of a gap measured along this axis.
    fn gap_orientation(self) -> GuideOrientation {
        match self {
            Axis::X => GuideOrientation::Horizontal,
            Axis::Y => GuideOrientation::Vertical,
        }
    }

    fn guide_id(self) -> &'static str {
        match self {
            Axis::X => "snap-x",
            Axis::Y => "snap-y",
        }
    }
}

/// A resolved snap on one axis.
#[derive(Debug, Clone, Copy)]
struct AxisSnap {
    /// New origin of the element along the axis.
    origin: f32,
    /// Position of the line snapped to.
    line: f32,
    indicator: Option<DistanceIndicator>,
}

/// Which of the element's anchors moved onto which of the target's.
#[derive(Debug, Clone, Copy)]
enum Anchor {
    Start,
    End,
    Center,
}

fn within(a: f32, b: f32) -> bool {
    (a - b).abs() < SNAP_THRESHOLD
}

/// Compute the snapped position of `element` on a canvas of the given size.
///
/// With `enable_snap == false` the element's position is returned unchanged
/// with no guides or indicators.
pub fn calculate_snap(
    element: &BoundingBox,
    canvas_width: f32,
    canvas_height: f32,
    other_elements: &[BoundingBox],
    enable_snap: bool,
) -> SnapResult {
    let mut result = SnapResult::unsnapped(element);
    if !enable_snap {
        return result;
    }

    for (axis, extent) in [(Axis::X, canvas_width), (Axis::Y, canvas_height)] {
        let snap =
            snap_to_canvas(axis, element, extent).or_else(|| snap_to_siblings(axis, element, other_elements));
        let Some(snap) = snap else {
            continue;
        };

        log::trace!("snap {:?}: {} -> {} (line {})", axis, axis.start(element), snap.origin, snap.line);

        match axis {
            Axis::X => {
                result.x = snap.origin;
                result.snapped_x = true;
            }
            Axis::Y => {
                result.y = snap.origin;
                result.snapped_y = true;
            }
        }
        result
            .guides
            .push(Guide::smart(axis.guide_id(), axis.guide_orientation(), snap.line).with_color(SNAP_GUIDE_COLOR));
        if let Some(indicator) = snap.indicator {
            result.distance_indicators.push(indicator);
        }
    }

    result
}

fn snap_to_canvas(axis: Axis, element: &BoundingBox, extent: f32) -> Option<AxisSnap> {
    let start = axis.start(element);
    let size = axis.size(element);

    let candidates = [
        (start, 0.0, 0.0),
        (start + size, extent, extent - size),
        (start + size / 2.0, extent / 2.0, extent / 2.0 - size / 2.0),
    ];

    candidates
        .into_iter()
        .find(|(anchor, line, _)| within(*anchor, *line))
        .map(|(_, line, origin)| AxisSnap {
            origin,
            line,
            indicator: None,
        })
}

fn snap_to_siblings(axis: Axis, element: &BoundingBox, others: &[BoundingBox]) -> Option<AxisSnap> {
    others.iter().find_map(|other| snap_to_sibling(axis, element, other))
}

fn snap_to_sibling(axis: Axis, element: &BoundingBox, other: &BoundingBox) -> Option<AxisSnap> {
    use Anchor::{Center, End, Start};

    let start = axis.start(element);
    let size = axis.size(element);
    let end = start + size;
    let o_start = axis.start(other);
    let o_end = o_start + axis.size(other);
    let o_center = o_start + axis.size(other) / 2.0;

    let candidates = [
        (Start, start, o_start),
        (Start, start, o_end),
        (End, end, o_start),
        (End, end, o_end),
        (Center, start + size / 2.0, o_center),
    ];

    let (anchor, _, line) = candidates.into_iter().find(|(_, edge, line)| within(*edge, *line))?;

    let origin = match anchor {
        Start => line,
        End => line - size,
        Center => line - size / 2.0,
    };

    // Flush against a neighbour: element start on the sibling's end, or
    // element end on the sibling's start.
    let gap = match anchor {
        Start if line == o_end && line != o_start => Some((o_end, start)),
        End if line == o_start && line != o_end => Some((end, o_start)),
        _ => None,
    };
    let indicator = gap.and_then(|(from, to)| gap_indicator(axis, element, other, from, to));

    Some(AxisSnap { origin, line, indicator })
}

/// Indicator spanning `from..to` along `axis`, drawn across the middle of the
/// two boxes' shared span on the other axis.
fn gap_indicator(
    axis: Axis,
    element: &BoundingBox,
    other: &BoundingBox,
    from: f32,
    to: f32,
) -> Option<DistanceIndicator> {
    let gap = to - from;
    if !(gap > 0.0 && gap < MAX_INDICATOR_GAP) {
        return None;
    }

    let cross = axis.other();
    let lo = cross.start(element).max(cross.start(other));
    let hi = (cross.start(element) + cross.size(element)).min(cross.start(other) + cross.size(other));
    let mid = if hi > lo {
        (lo + hi) / 2.0
    } else {
        cross.start(element) + cross.size(element) / 2.0
    };

    let (x1, y1, x2, y2) = match axis {
        Axis::X => (from, mid, to, mid),
        Axis::Y => (mid, from, mid, to),
    };

    Some(DistanceIndicator {
        x1,
        y1,
        x2,
        y2,
        distance: gap,
        orientation: axis.gap_orientation(),
    })
}
