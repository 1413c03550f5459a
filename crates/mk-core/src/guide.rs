//! Alignment guides, rulers and distance indicators.
//!
//! A guide's orientation names the line that is drawn: a `Vertical` guide is
//! a vertical line and its `position` is an X coordinate; a `Horizontal`
//! guide is a horizontal line positioned along Y. The top ruler therefore
//! spawns vertical guides and the left ruler spawns horizontal ones.

use crate::geometry::BoundingBox;
use crate::id::GuideId;
use crate::model::{Color, SceneDevice, TextOverlay};
use serde::{Deserialize, Serialize};

/// Default color of user-placed guides.
pub const USER_GUIDE_COLOR: Color = Color::rgba(0.0, 0.6, 1.0, 1.0);
/// Default color of derived (smart) guides.
pub const SMART_GUIDE_COLOR: Color = Color::rgba(1.0, 0.0, 1.0, 0.35);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuideOrientation {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guide {
    pub id: GuideId,
    #[serde(rename = "type")]
    pub orientation: GuideOrientation,
    pub position: f32,
    pub color: Color,
    #[serde(default)]
    pub is_smart_guide: bool,
}

impl Guide {
    /// A user guide: persisted, draggable, deletable.
    pub fn user(id: GuideId, orientation: GuideOrientation, position: f32) -> Self {
        Self {
            id,
            orientation,
            position,
            color: USER_GUIDE_COLOR,
            is_smart_guide: false,
        }
    }

    /// A derived guide: recomputed every pass, never persisted.
    pub fn smart(id: &str, orientation: GuideOrientation, position: f32) -> Self {
        Self {
            id: GuideId::new(id),
            orientation,
            position,
            color: SMART_GUIDE_COLOR,
            is_smart_guide: true,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

/// The two rulers drawn outside the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ruler {
    /// Along the top edge; measures X.
    Top,
    /// Along the left edge; measures Y.
    Left,
}

impl Ruler {
    /// Orientation of a guide dragged off this ruler.
    pub fn guide_orientation(self) -> GuideOrientation {
        match self {
            Ruler::Top => GuideOrientation::Vertical,
            Ruler::Left => GuideOrientation::Horizontal,
        }
    }
}

/// Gap annotation between two adjacent elements, shown while snapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceIndicator {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub distance: f32,
    pub orientation: GuideOrientation,
}

/// Upper bound of a guide position for the given canvas.
pub fn guide_extent(orientation: GuideOrientation, canvas_width: f32, canvas_height: f32) -> f32 {
    match orientation {
        GuideOrientation::Vertical => canvas_width,
        GuideOrientation::Horizontal => canvas_height,
    }
}

/// Derive the smart guides for the current canvas contents: both canvas
/// center lines, the four edges of every text overlay and the edges plus
/// center lines of every scene device.
pub fn compute_smart_guides(
    canvas_width: f32,
    canvas_height: f32,
    texts: &[TextOverlay],
    devices: &[SceneDevice],
) -> Vec<Guide> {
    use GuideOrientation::{Horizontal, Vertical};

    let mut guides = Vec::with_capacity(2 + texts.len() * 4 + devices.len() * 6);
    guides.push(Guide::smart("smart-center-x", Vertical, canvas_width / 2.0));
    guides.push(Guide::smart("smart-center-y", Horizontal, canvas_height / 2.0));

    for text in texts {
        push_edges(&mut guides, &format!("smart-text-{}", text.id), &text.approx_bounds());
    }

    for device in devices {
        let b = device.bounds();
        let prefix = format!("smart-device-{}", device.id);
        push_edges(&mut guides, &prefix, &b);
        guides.push(Guide::smart(&format!("{prefix}-center-x"), Vertical, b.center_x()));
        guides.push(Guide::smart(&format!("{prefix}-center-y"), Horizontal, b.center_y()));
    }

    guides
}

fn push_edges(guides: &mut Vec<Guide>, prefix: &str, b: &BoundingBox) {
    use GuideOrientation::{Horizontal, Vertical};

    guides.push(Guide::smart(&format!("{prefix}-top"), Horizontal, b.top()));
    guides.push(Guide::smart(&format!("{prefix}-bottom"), Horizontal, b.bottom()));
    guides.push(Guide::smart(&format!("{prefix}-left"), Vertical, b.left()));
    guides.push(Guide::smart(&format!("{prefix}-right"), Vertical, b.right()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::ElementId;

    fn find<'a>(guides: &'a [Guide], id: &str) -> &'a Guide {
        guides
            .iter()
            .find(|g| g.id.as_str() == id)
            .unwrap_or_else(|| panic!("missing guide {id}"))
    }

    #[test]
    fn canvas_centers_only_for_empty_canvas() {
        let guides = compute_smart_guides(1280.0, 720.0, &[], &[]);
        assert_eq!(guides.len(), 2);
        let cx = find(&guides, "smart-center-x");
        assert_eq!(cx.orientation, GuideOrientation::Vertical);
        assert_eq!(cx.position, 640.0);
        let cy = find(&guides, "smart-center-y");
        assert_eq!(cy.orientation, GuideOrientation::Horizontal);
        assert_eq!(cy.position, 360.0);
        assert!(guides.iter().all(|g| g.is_smart_guide));
    }

    #[test]
    fn text_edges_use_approximate_metrics() {
        let text = TextOverlay::new(ElementId::intern("title"), "Hey", 100.0, 200.0).with_font_size(10.0);
        let guides = compute_smart_guides(1280.0, 720.0, &[text], &[]);
        assert_eq!(guides.len(), 6);
        assert_eq!(find(&guides, "smart-text-title-top").position, 200.0);
        assert_eq!(find(&guides, "smart-text-title-bottom").position, 212.0);
        assert_eq!(find(&guides, "smart-text-title-left").position, 100.0);
        assert_eq!(find(&guides, "smart-text-title-right").position, 118.0);
    }

    #[test]
    fn device_edges_and_centers() {
        let device = SceneDevice {
            id: ElementId::intern("phone"),
            device_key: "iphone-17-pro".into(),
            x: 100.0,
            y: 50.0,
            width: 200.0,
            height: 400.0,
        };
        let guides = compute_smart_guides(1280.0, 720.0, &[], &[device]);
        assert_eq!(guides.len(), 8);
        assert_eq!(find(&guides, "smart-device-phone-center-x").position, 200.0);
        assert_eq!(find(&guides, "smart-device-phone-center-y").position, 250.0);
        assert_eq!(find(&guides, "smart-device-phone-right").orientation, GuideOrientation::Vertical);
    }

    #[test]
    fn rulers_spawn_perpendicular_lines() {
        assert_eq!(Ruler::Top.guide_orientation(), GuideOrientation::Vertical);
        assert_eq!(Ruler::Left.guide_orientation(), GuideOrientation::Horizontal);
    }

    #[test]
    fn guide_serializes_with_type_key() {
        let g = Guide::user("guide-1".into(), GuideOrientation::Horizontal, 42.0);
        let json = serde_json::to_string(&g).unwrap();
        assert!(json.contains(r#""type":"horizontal""#), "{json}");
        assert!(json.contains(r#""isSmartGuide":false"#), "{json}");
    }
}
