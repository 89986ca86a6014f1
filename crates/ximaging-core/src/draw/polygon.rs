//! Convex polygon fill
//!
//! Every edge is walked with Bresenham, keeping the leftmost and rightmost x
//! reached in each row; each row is then filled between the two. For a
//! convex polygon this is exactly its interior and outline. A non-convex
//! polygon gets the span between its outermost edges in every row (its
//! row-wise hull), never an error.

use tracing::trace;

use super::Canvas;
use super::line::Steps;
use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::geometry::Point;
use crate::image::Image;

/// Fill a convex polygon with `color`.
///
/// # Errors
///
/// Returns [`Error::NullParameter`] for an empty point list and
/// [`Error::InvalidArgument`] for fewer than 3 points.
pub fn fill_convex_polygon(image: &mut Image, points: &[Point], color: Rgba) -> Result<()> {
    if points.is_empty() {
        return Err(Error::NullParameter("points"));
    }
    let canvas = Canvas::set(image, color)?;
    trace!(n = points.len(), "fill_convex_polygon");
    fill(canvas, points)
}

/// Fill a convex polygon, alpha-blending `color`.
///
/// # Errors
///
/// Same as [`fill_convex_polygon`].
pub fn blend_convex_polygon(image: &mut Image, points: &[Point], color: Rgba) -> Result<()> {
    if points.is_empty() {
        return Err(Error::NullParameter("points"));
    }
    let canvas = Canvas::blend(image, color)?;
    trace!(n = points.len(), "blend_convex_polygon");
    fill(canvas, points)
}

fn fill(mut canvas: Canvas<'_>, points: &[Point]) -> Result<()> {
    if points.len() < 3 {
        return Err(Error::InvalidArgument(format!(
            "polygon needs at least 3 points, got {}",
            points.len()
        )));
    }

    // rows outside the image are never rendered, so only visible ones are tracked
    let min_y = points.iter().map(|p| p.y).min().unwrap_or(0).max(0);
    let max_y = points
        .iter()
        .map(|p| p.y)
        .max()
        .unwrap_or(0)
        .min(canvas.height() - 1);
    if min_y > max_y {
        return Ok(());
    }

    let mut spans = vec![(i32::MAX, i32::MIN); (max_y - min_y + 1) as usize];
    let mut record = |x: i32, y: i32| {
        if y >= min_y && y <= max_y {
            let span = &mut spans[(y - min_y) as usize];
            span.0 = span.0.min(x);
            span.1 = span.1.max(x);
        }
    };
    let (left, right) = (-1, canvas.width());
    for (i, &p1) in points.iter().enumerate() {
        let p2 = points[(i + 1) % points.len()];
        let edge = Steps::new(p1, p2);
        if edge.is_steep() {
            if let Some((k0, k1)) = edge.major_range(min_y as i64, max_y as i64) {
                edge.walk(k0, k1, &mut record);
            }
            continue;
        }

        // columns beyond the image only matter as clamped span ends
        let last = edge.last_step();
        let mut clamped = |ka: i64, kb: i64| {
            let (xa, ya) = edge.point(ka);
            let (_, yb) = edge.point(kb);
            let x = xa.clamp(left, right);
            for y in ya.min(yb).max(min_y)..=ya.max(yb).min(max_y) {
                record(x, y);
            }
        };
        match edge.major_range(left as i64, right as i64) {
            Some((k0, k1)) => {
                if k0 > 0 {
                    clamped(0, k0 - 1);
                }
                if k1 < last {
                    clamped(k1 + 1, last);
                }
                edge.walk(k0, k1, &mut record);
            }
            None => clamped(0, last),
        }
    }

    for (i, &(x1, x2)) in spans.iter().enumerate() {
        if x1 <= x2 {
            canvas.hline(x1, x2, min_y + i as i32);
        }
    }
    Ok(())
}
