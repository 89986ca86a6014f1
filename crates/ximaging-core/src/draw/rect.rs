//! Rectangles
//!
//! Corners are inclusive and may be given in any order.

use tracing::trace;

use super::Canvas;
use crate::color::Rgba;
use crate::error::Result;
use crate::geometry::Point;
use crate::image::Image;

/// Inclusive `(left, top, right, bottom)` of the rectangle spanned by two corners.
fn corners(p1: Point, p2: Point) -> (i32, i32, i32, i32) {
    (p1.x.min(p2.x), p1.y.min(p2.y), p1.x.max(p2.x), p1.y.max(p2.y))
}

/// Draw the outline of the rectangle spanned by `p1` and `p2`.
pub fn draw_rectangle(image: &mut Image, p1: Point, p2: Point, color: Rgba) -> Result<()> {
    let mut canvas = Canvas::set(image, color)?;
    trace!(?p1, ?p2, "draw_rectangle");

    let (left, top, right, bottom) = corners(p1, p2);
    canvas.hline(left, right, top);
    if bottom != top {
        canvas.hline(left, right, bottom);
    }
    for y in top.saturating_add(1).max(0)..bottom.min(canvas.height()) {
        canvas.plot(left, y);
        if right != left {
            canvas.plot(right, y);
        }
    }
    Ok(())
}

/// Fill the rectangle spanned by `p1` and `p2` with `color`.
pub fn fill_rectangle(image: &mut Image, p1: Point, p2: Point, color: Rgba) -> Result<()> {
    let canvas = Canvas::set(image, color)?;
    trace!(?p1, ?p2, "fill_rectangle");
    fill(canvas, p1, p2);
    Ok(())
}

/// Fill the rectangle spanned by `p1` and `p2`, alpha-blending `color`.
pub fn blend_rectangle(image: &mut Image, p1: Point, p2: Point, color: Rgba) -> Result<()> {
    let canvas = Canvas::blend(image, color)?;
    trace!(?p1, ?p2, "blend_rectangle");
    fill(canvas, p1, p2);
    Ok(())
}

fn fill(mut canvas: Canvas<'_>, p1: Point, p2: Point) {
    let (left, top, right, bottom) = corners(p1, p2);
    for y in top.max(0)..=bottom.min(canvas.height() - 1) {
        canvas.hline(left, right, y);
    }
}
