//! Pie slices
//!
//! A pie is rendered as horizontal spans:
//!
//! 1. the ring between `r1` and `r2` is rasterized into at most two spans
//!    per row
//! 2. both bounding rays are rasterized with Bresenham and each row records
//!    the x extent every ray covers in it
//! 3. spans are cut at the middle of each ray's extent, and every piece whose
//!    midpoint angle lies outside `[angle_start, angle_end]` is dropped
//!
//! Angles are in degrees, counterclockwise from the positive x axis with y
//! pointing up on screen (the point at angle `a` lies at
//! `(cx + r cos a, cy - r sin a)`). A range with `angle_end < angle_start`
//! after reduction modulo 360 wraps through 0.

use tracing::{debug, trace};

use super::Canvas;
use super::ellipse::{blend_circle, blend_ring, ring_spans};
use super::line::bresenham;
use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::geometry::Point;
use crate::image::Image;

/// Scratch slots used per pie row.
const SLOTS_PER_ROW: usize = 10;

// Row record layout inside the scratch buffer
const SPAN_COUNT: usize = 0;
const SPANS: usize = 1; // two (x1, x2) pairs
const RAY_A: usize = 5; // (min, max)
const RAY_B: usize = 7; // (min, max)

/// Scratch size in `i32` slots needed by [`blend_pie`] for outer radius `r2`.
pub fn pie_buffer_size(r2: u32) -> usize {
    (2 * r2 as usize + 1) * SLOTS_PER_ROW
}

/// Fill a pie slice of the ring `r1..=r2`, alpha-blending `color`.
///
/// `buffer` is caller-provided scratch of at least [`pie_buffer_size`]`(r2)`
/// slots. When both angles reduce to the same value modulo 360 the whole
/// ring (or disk when `r1 == 0`) is drawn.
///
/// # Errors
///
/// - [`Error::UnsupportedPixelFormat`] for formats other than
///   Grayscale8/RGB24/RGBA32
/// - [`Error::TooSmallBuffer`] carrying the required size
/// - [`Error::InvalidArgument`] if `r1 > r2` or an angle is not finite
#[allow(clippy::too_many_arguments)]
pub fn blend_pie(
    image: &mut Image,
    center: Point,
    r1: u32,
    r2: u32,
    angle_start: f32,
    angle_end: f32,
    color: Rgba,
    buffer: &mut [i32],
) -> Result<()> {
    let mut canvas = Canvas::blend(image, color)?;

    let required = pie_buffer_size(r2);
    if buffer.len() < required {
        return Err(Error::TooSmallBuffer {
            required,
            provided: buffer.len(),
        });
    }
    if r1 > r2 {
        return Err(Error::InvalidArgument(format!(
            "inner radius {r1} exceeds outer radius {r2}"
        )));
    }
    if !angle_start.is_finite() || !angle_end.is_finite() {
        return Err(Error::InvalidArgument(format!(
            "pie angles must be finite: {angle_start}, {angle_end}"
        )));
    }
    trace!(?center, r1, r2, angle_start, angle_end, "blend_pie");

    let start = angle_start.rem_euclid(360.0);
    let end = angle_end.rem_euclid(360.0);
    if start == end {
        debug!(start, "pie covers the full circle");
        drop(canvas);
        return if r1 == 0 {
            blend_circle(image, center, r2, color)
        } else {
            blend_ring(image, center, r1, r2, color)
        };
    }

    let rows = 2 * r2 as usize + 1;
    let table = &mut buffer[..rows * SLOTS_PER_ROW];
    build_rows(table, r1, r2, start, end);

    let r2i = r2 as i32;
    for (i, row) in table.chunks_exact(SLOTS_PER_ROW).enumerate() {
        let dy = i as i32 - r2i;
        let cuts = row_cuts(row);
        for s in 0..row[SPAN_COUNT] as usize {
            let (x1, x2) = (row[SPANS + 2 * s], row[SPANS + 2 * s + 1]);
            for_each_piece(x1, x2, &cuts, |a, b| {
                if contains_angle(piece_angle(a, b, dy), start, end) {
                    canvas.hline(center.x + a, center.x + b, center.y + dy);
                }
            });
        }
    }
    Ok(())
}

/// Populate the per-row records (coordinates relative to the center).
fn build_rows(table: &mut [i32], r1: u32, r2: u32, start: f32, end: f32) {
    let r2i = r2 as i32;

    for row in table.chunks_exact_mut(SLOTS_PER_ROW) {
        row[SPAN_COUNT] = 0;
        row[RAY_A] = i32::MAX;
        row[RAY_A + 1] = i32::MIN;
        row[RAY_B] = i32::MAX;
        row[RAY_B + 1] = i32::MIN;
    }

    for (dy, x1, x2) in ring_spans(r1, r2) {
        let row = &mut table[(dy + r2i) as usize * SLOTS_PER_ROW..][..SLOTS_PER_ROW];
        let n = row[SPAN_COUNT] as usize;
        row[SPANS + 2 * n] = x1;
        row[SPANS + 2 * n + 1] = x2;
        row[SPAN_COUNT] += 1;
    }

    for (angle, slot) in [(start, RAY_A), (end, RAY_B)] {
        let rad = (angle as f64).to_radians();
        let tip = Point::new(
            (r2 as f64 * rad.cos()).round() as i32,
            -(r2 as f64 * rad.sin()).round() as i32,
        );
        bresenham(Point::new(0, 0), tip, |x, y| {
            let row = &mut table[(y + r2i) as usize * SLOTS_PER_ROW..][..SLOTS_PER_ROW];
            row[slot] = row[slot].min(x);
            row[slot + 1] = row[slot + 1].max(x);
        });
    }
}

/// Cut positions of a row: the middle of every ray extent present, sorted.
fn row_cuts(row: &[i32]) -> Vec<i32> {
    let mut cuts: Vec<i32> = [RAY_A, RAY_B]
        .into_iter()
        .filter(|&slot| row[slot] <= row[slot + 1])
        .map(|slot| (row[slot] + row[slot + 1]).div_euclid(2))
        .collect();
    cuts.sort_unstable();
    cuts.dedup();
    cuts
}

/// Split `x1..=x2` at every cut `c` into `..=c` and `c + 1..`.
fn for_each_piece<F: FnMut(i32, i32)>(x1: i32, x2: i32, cuts: &[i32], mut piece: F) {
    let mut from = x1;
    for &c in cuts {
        if c >= from && c < x2 {
            piece(from, c);
            from = c + 1;
        }
    }
    piece(from, x2);
}

/// Angle in degrees `[0, 360)` of the midpoint of a piece.
fn piece_angle(x1: i32, x2: i32, dy: i32) -> f32 {
    let mx = (x1 + x2) as f64 / 2.0;
    let deg = (-dy as f64).atan2(mx).to_degrees();
    deg.rem_euclid(360.0) as f32
}

fn contains_angle(angle: f32, start: f32, end: f32) -> bool {
    if start < end {
        angle >= start && angle <= end
    } else {
        angle >= start || angle <= end
    }
}
