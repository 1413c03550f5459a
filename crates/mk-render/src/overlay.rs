//! Ruler / guide overlay → backend-agnostic display list.
//!
//! Everything is in canvas coordinates. The rulers sit outside the canvas
//! (negative coordinates) and keep a constant on-screen thickness, so their
//! canvas-space size is `thickness / scale`. The Vello painter in
//! [`crate::paint`] and the Canvas2D painter in the WASM bridge both consume
//! the same `OverlayItem` list.

use mk_core::geometry::BoundingBox;
use mk_core::guide::{DistanceIndicator, Guide, GuideOrientation};
use mk_core::id::GuideId;
use mk_core::model::Color;

/// One drawing command.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayItem {
    Rect {
        rect: BoundingBox,
        fill: Color,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        color: Color,
        /// Stroke width in canvas pixels.
        width: f32,
        dashed: bool,
    },
    Label {
        x: f32,
        y: f32,
        text: String,
        color: Color,
        /// Font size in canvas pixels.
        size: f32,
    },
}

/// Overlay colors.
#[derive(Debug, Clone)]
pub struct OverlayTheme {
    pub ruler_bg: Color,
    pub ruler_tick: Color,
    pub ruler_text: Color,
    pub indicator: Color,
    pub indicator_text: Color,
}

impl OverlayTheme {
    pub fn light() -> Self {
        Self {
            ruler_bg: Color::rgba(0.96, 0.96, 0.97, 1.0),
            ruler_tick: Color::rgba(0.0, 0.0, 0.0, 0.35),
            ruler_text: Color::rgba(0.33, 0.33, 0.35, 1.0),
            indicator: Color::rgba(1.0, 0.27, 0.23, 1.0),
            indicator_text: Color::WHITE,
        }
    }

    pub fn dark() -> Self {
        Self {
            ruler_bg: Color::rgba(0.11, 0.11, 0.12, 1.0),
            ruler_tick: Color::rgba(1.0, 1.0, 1.0, 0.3),
            ruler_text: Color::rgba(0.6, 0.6, 0.62, 1.0),
            indicator: Color::rgba(1.0, 0.27, 0.23, 1.0),
            indicator_text: Color::WHITE,
        }
    }
}

/// Inputs for one overlay frame.
#[derive(Debug, Clone, Copy)]
pub struct OverlayFrame<'a> {
    pub canvas_width: f32,
    pub canvas_height: f32,
    /// Screen pixels per canvas pixel.
    pub scale: f32,
    /// Ruler thickness in screen pixels.
    pub ruler_thickness: f32,
    pub show_rulers: bool,
    pub show_guides: bool,
    /// User, smart and snap guides, in paint order.
    pub guides: &'a [Guide],
    pub indicators: &'a [DistanceIndicator],
    /// Guide currently being dragged, drawn emphasised with its position.
    pub active_guide: Option<&'a GuideId>,
}

impl OverlayFrame<'_> {
    /// Size of one screen pixel in canvas pixels.
    pub fn px(&self) -> f32 {
        if self.scale.is_finite() && self.scale > 0.0 { 1.0 / self.scale } else { 1.0 }
    }

    /// Ruler thickness in canvas pixels.
    pub fn ruler_size(&self) -> f32 {
        self.ruler_thickness * self.px()
    }
}

/// Most ticks drawn along one ruler. Longer rulers space their ticks out.
pub const MAX_RULER_TICKS: u32 = 2_000;

/// Major tick spacing in canvas pixels: the smallest step that keeps labels
/// at least 50 screen pixels apart.
pub fn major_tick_step(scale: f32) -> f32 {
    const STEPS: [f32; 6] = [50.0, 100.0, 250.0, 500.0, 1000.0, 2500.0];
    let scale = if scale.is_finite() && scale > 0.0 { scale } else { 1.0 };
    STEPS
        .into_iter()
        .find(|step| step * scale >= 50.0)
        .unwrap_or(STEPS[STEPS.len() - 1])
}

/// Build the display list for one frame.
pub fn build_overlay(frame: &OverlayFrame<'_>, theme: &OverlayTheme) -> Vec<OverlayItem> {
    let mut items = Vec::new();

    if frame.show_rulers && frame.ruler_thickness > 0.0 {
        push_rulers(&mut items, frame, theme);
    }

    if frame.show_guides {
        for guide in frame.guides {
            let active = frame.active_guide == Some(&guide.id);
            push_guide(&mut items, frame, guide, active);
        }
    }

    for indicator in frame.indicators {
        push_indicator(&mut items, frame, indicator, theme);
    }

    items
}

fn push_rulers(items: &mut Vec<OverlayItem>, frame: &OverlayFrame<'_>, theme: &OverlayTheme) {
    let t = frame.ruler_size();
    let px = frame.px();
    let (cw, ch) = (frame.canvas_width, frame.canvas_height);

    items.push(OverlayItem::Rect {
        rect: BoundingBox::new(0.0, -t, cw, t),
        fill: theme.ruler_bg,
    });
    items.push(OverlayItem::Rect {
        rect: BoundingBox::new(-t, 0.0, t, ch),
        fill: theme.ruler_bg,
    });
    items.push(OverlayItem::Rect {
        rect: BoundingBox::new(-t, -t, t, t),
        fill: theme.ruler_bg,
    });

    let major = major_tick_step(frame.scale);
    let label_size = 9.0 * px;

    for (extent, horizontal) in [(cw, true), (ch, false)] {
        let mut minor = major / 5.0;
        let full = (extent / minor).floor();
        if full > MAX_RULER_TICKS as f32 {
            minor *= (full / MAX_RULER_TICKS as f32).ceil();
        }
        let count = ((extent / minor).floor() as u32).min(MAX_RULER_TICKS);
        for i in 0..=count {
            let pos = i as f32 * minor;
            let is_major = i % 5 == 0;
            let len = if is_major { t * 0.6 } else { t * 0.3 };
            let (x1, y1, x2, y2) = if horizontal {
                (pos, -len, pos, 0.0)
            } else {
                (-len, pos, 0.0, pos)
            };
            items.push(OverlayItem::Line {
                x1,
                y1,
                x2,
                y2,
                color: theme.ruler_tick,
                width: px,
                dashed: false,
            });
            if is_major {
                let (x, y) = if horizontal {
                    (pos + 2.0 * px, -t + label_size)
                } else {
                    (-t + 2.0 * px, pos + label_size + 2.0 * px)
                };
                items.push(OverlayItem::Label {
                    x,
                    y,
                    text: format!("{}", pos as i32),
                    color: theme.ruler_text,
                    size: label_size,
                });
            }
        }
    }
}

fn push_guide(items: &mut Vec<OverlayItem>, frame: &OverlayFrame<'_>, guide: &Guide, active: bool) {
    let px = frame.px();
    let (x1, y1, x2, y2) = match guide.orientation {
        GuideOrientation::Vertical => (guide.position, 0.0, guide.position, frame.canvas_height),
        GuideOrientation::Horizontal => (0.0, guide.position, frame.canvas_width, guide.position),
    };

    items.push(OverlayItem::Line {
        x1,
        y1,
        x2,
        y2,
        color: guide.color,
        width: if active { 2.0 * px } else { px },
        dashed: guide.is_smart_guide,
    });

    if active {
        let (x, y) = match guide.orientation {
            GuideOrientation::Vertical => (guide.position + 4.0 * px, 14.0 * px),
            GuideOrientation::Horizontal => (4.0 * px, guide.position - 4.0 * px),
        };
        items.push(OverlayItem::Label {
            x,
            y,
            text: format!("{}", guide.position.round() as i32),
            color: guide.color,
            size: 11.0 * px,
        });
    }
}

fn push_indicator(
    items: &mut Vec<OverlayItem>,
    frame: &OverlayFrame<'_>,
    indicator: &DistanceIndicator,
    theme: &OverlayTheme,
) {
    let px = frame.px();
    items.push(OverlayItem::Line {
        x1: indicator.x1,
        y1: indicator.y1,
        x2: indicator.x2,
        y2: indicator.y2,
        color: theme.indicator,
        width: px,
        dashed: false,
    });
    items.push(OverlayItem::Label {
        x: (indicator.x1 + indicator.x2) / 2.0 + 3.0 * px,
        y: (indicator.y1 + indicator.y2) / 2.0 - 3.0 * px,
        text: format!("{}", indicator.distance.round() as i32),
        color: theme.indicator,
        size: 10.0 * px,
    });
}
