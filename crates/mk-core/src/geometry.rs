//! Geometry primitives on axis-aligned bounding boxes in canvas pixels.

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in canvas space. `x`/`y` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BoundingBox {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.right() && py >= self.y && py <= self.bottom()
    }

    /// Same box moved so its top-left corner is at `(x, y)`.
    pub fn at(&self, x: f32, y: f32) -> Self {
        Self { x, y, ..*self }
    }
}

/// Euclidean distance between two points.
pub fn distance(x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    let dx = x2 - x1;
    let dy = y2 - y1;
    (dx * dx + dy * dy).sqrt()
}

/// Open-interval overlap on both axes. Boxes that only share an edge do not
/// overlap, and neither does a box with zero width or height.
pub fn do_boxes_overlap(a: &BoundingBox, b: &BoundingBox) -> bool {
    let solid = |b: &BoundingBox| b.width > 0.0 && b.height > 0.0;
    solid(a)
        && solid(b)
        && a.left() < b.right() && b.left() < a.right() && a.top() < b.bottom() && b.top() < a.bottom()
}

/// Area of the intersection of two boxes, `0.0` when they do not overlap.
pub fn calculate_overlap_area(a: &BoundingBox, b: &BoundingBox) -> f32 {
    if !do_boxes_overlap(a, b) {
        return 0.0;
    }
    let w = a.right().min(b.right()) - a.left().max(b.left());
    let h = a.bottom().min(b.bottom()) - a.top().max(b.top());
    w * h
}
