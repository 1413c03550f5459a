//! Canvas2D overlay painter.
//!
//! Draws the ruler / guide display list from `mk-render` onto the overlay
//! `<canvas>` that sits above the mockup preview.

use mk_core::model::Color;
use mk_render::overlay::OverlayItem;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

/// Paint `items` (canvas coordinates) with the canvas origin at
/// `(origin_x, origin_y)` screen pixels and `scale` screen pixels per canvas
/// pixel.
pub fn paint_overlay(
    ctx: &CanvasRenderingContext2d,
    items: &[OverlayItem],
    origin_x: f64,
    origin_y: f64,
    scale: f64,
) {
    ctx.save();
    let _ = ctx.translate(origin_x, origin_y);
    let _ = ctx.scale(scale, scale);

    for item in items {
        match item {
            OverlayItem::Rect { rect, fill } => {
                ctx.set_fill_style_str(&fill.to_css());
                ctx.fill_rect(rect.x as f64, rect.y as f64, rect.width as f64, rect.height as f64);
            }
            OverlayItem::Line {
                x1,
                y1,
                x2,
                y2,
                color,
                width,
                dashed,
            } => draw_line(ctx, (*x1, *y1, *x2, *y2), color, *width as f64, *dashed),
            OverlayItem::Label {
                x,
                y,
                text,
                color,
                size,
            } => {
                ctx.set_font(&format!("500 {size}px Inter, sans-serif"));
                ctx.set_fill_style_str(&color.to_css());
                ctx.set_text_baseline("alphabetic");
                let _ = ctx.fill_text(text, *x as f64, *y as f64);
            }
        }
    }

    ctx.restore();
}

fn draw_line(ctx: &CanvasRenderingContext2d, (x1, y1, x2, y2): (f32, f32, f32, f32), color: &Color, width: f64, dashed: bool) {
    ctx.save();
    ctx.set_stroke_style_str(&color.to_css());
    ctx.set_line_width(width);
    if dashed {
        let _ = ctx.set_line_dash(&js_sys::Array::of2(
            &JsValue::from_f64(4.0 * width),
            &JsValue::from_f64(4.0 * width),
        ));
    }
    ctx.begin_path();
    ctx.move_to(x1 as f64, y1 as f64);
    ctx.line_to(x2 as f64, y2 as f64);
    ctx.stroke();
    ctx.restore();
}
