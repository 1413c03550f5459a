//! Overlay display list → Vello drawing commands.

use crate::overlay::OverlayItem;
use kurbo::{Affine, Line, Rect, Stroke};
use mk_core::model::Color as MkColor;
use peniko::{Color, Fill};
use vello::Scene;

const DASH_PATTERN: [f64; 2] = [4.0, 4.0];

/// Paint overlay items into a Vello scene.
///
/// `transform` maps canvas space to the target surface, typically
/// `Affine::translate(canvas_origin) * Affine::scale(scale)`.
pub fn paint_overlay(scene: &mut Scene, items: &[OverlayItem], transform: Affine) {
    for item in items {
        match item {
            OverlayItem::Rect { rect, fill } => {
                let shape = Rect::new(
                    rect.x as f64,
                    rect.y as f64,
                    (rect.x + rect.width) as f64,
                    (rect.y + rect.height) as f64,
                );
                scene.fill(Fill::NonZero, transform, to_color(fill), None, &shape);
            }
            OverlayItem::Line {
                x1,
                y1,
                x2,
                y2,
                color,
                width,
                dashed,
            } => {
                let line = Line::new((*x1 as f64, *y1 as f64), (*x2 as f64, *y2 as f64));
                let mut stroke = Stroke::new(*width as f64);
                if *dashed {
                    let px = *width as f64;
                    stroke = stroke.with_dashes(0.0, DASH_PATTERN.map(|d| d * px));
                }
                scene.stroke(&stroke, transform, to_color(color), None, &line);
            }
            OverlayItem::Label { x, y, text, .. } => {
                // Glyph layout needs a font context; the host draws labels.
                log::trace!("overlay label {text:?} at ({x}, {y})");
            }
        }
    }
}

fn to_color(c: &MkColor) -> Color {
    let [r, g, b, a] = c.to_rgba8();
    Color::from_rgba8(r, g, b, a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::{OverlayFrame, OverlayTheme, build_overlay};
    use mk_core::guide::{Guide, GuideOrientation};

    #[test]
    fn paints_rulers_and_guides() {
        let guides = [
            Guide::user("guide-1".into(), GuideOrientation::Vertical, 320.0),
            Guide::smart("smart-center-y", GuideOrientation::Horizontal, 360.0),
        ];
        let frame = OverlayFrame {
            canvas_width: 1280.0,
            canvas_height: 720.0,
            scale: 1.0,
            ruler_thickness: 20.0,
            show_rulers: true,
            show_guides: true,
            guides: &guides,
            indicators: &[],
            active_guide: None,
        };
        let items = build_overlay(&frame, &OverlayTheme::light());

        let mut scene = Scene::new();
        paint_overlay(&mut scene, &items, Affine::translate((20.0, 20.0)));
        assert!(!scene.encoding().is_empty());
    }

    #[test]
    fn empty_list_paints_nothing() {
        let mut scene = Scene::new();
        paint_overlay(&mut scene, &[], Affine::IDENTITY);
        assert!(scene.encoding().is_empty());
    }
}
