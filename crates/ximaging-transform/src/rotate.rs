//! Rotation operations
//!
//! This module provides:
//! - Orthogonal rotations (90/180/270 degrees), exact pixel moves
//! - Rotation by an arbitrary angle with bilinear interpolation
//! - The bounding size of a rotated image
//!
//! Angles are in degrees. Positive angles rotate counterclockwise as seen
//! on screen (y axis pointing down).

use tracing::trace;
use ximaging_core::check::{BYTE_FORMATS, check_dst, check_format};
use ximaging_core::parallel::for_each_row;
use ximaging_core::{Error, Image, Rgba};

use crate::{SAMPLE_FORMATS, TransformError, TransformResult};

/// Fill `dst` with `src` pixels: destination `(x, y)` takes source
/// `map(x, y)`.
fn remap<F>(src: &Image, dst: &mut Image, map: F)
where
    F: Fn(u32, u32) -> (u32, u32) + Send + Sync,
{
    let bpp = src.bytes_per_pixel();
    for_each_row(dst, |y, row| {
        for (x, px) in row.chunks_exact_mut(bpp).enumerate() {
            let (sx, sy) = map(x as u32, y);
            px.copy_from_slice(&src.row(sy)[sx as usize * bpp..][..bpp]);
        }
    });
}

/// Rotate 90 degrees clockwise.
///
/// Source pixel `(x, y)` lands at `(height - 1 - y, x)`; `dst` must be
/// `height x width` in the source format.
pub fn rotate_90(src: &Image, dst: &mut Image) -> TransformResult<()> {
    check_format(src, SAMPLE_FORMATS)?;
    check_dst(dst, src.height(), src.width(), src.format())?;
    let h = src.height();
    trace!(w = src.width(), h, "rotate_90");
    remap(src, dst, |x, y| (y, h - 1 - x));
    Ok(())
}

/// Rotate 270 degrees clockwise (90 counterclockwise).
///
/// Source pixel `(x, y)` lands at `(y, width - 1 - x)`.
pub fn rotate_270(src: &Image, dst: &mut Image) -> TransformResult<()> {
    check_format(src, SAMPLE_FORMATS)?;
    check_dst(dst, src.height(), src.width(), src.format())?;
    let w = src.width();
    trace!(w, h = src.height(), "rotate_270");
    remap(src, dst, |x, y| (w - 1 - y, x));
    Ok(())
}

/// Rotate 180 degrees; `dst` has the parameters of `src`.
pub fn rotate_180(src: &Image, dst: &mut Image) -> TransformResult<()> {
    check_format(src, SAMPLE_FORMATS)?;
    check_dst(dst, src.width(), src.height(), src.format())?;
    let (w, h) = (src.width(), src.height());
    trace!(w, h, "rotate_180");
    remap(src, dst, |x, y| (w - 1 - x, h - 1 - y));
    Ok(())
}

/// Size of the bounding box of a `width x height` image rotated by `angle`
/// degrees, rounded to whole pixels.
///
/// # Errors
///
/// Returns [`TransformError::InvalidAngle`] for a NaN or infinite angle.
pub fn calculate_rotated_size(width: u32, height: u32, angle: f32) -> TransformResult<(u32, u32)> {
    if !angle.is_finite() {
        return Err(TransformError::InvalidAngle(angle));
    }
    let rad = (angle as f64).to_radians();
    let (sin, cos) = (rad.sin().abs(), rad.cos().abs());
    let (w, h) = (width as f64, height as f64);
    // the rotated corners are symmetric about the center, so the extent is
    // twice the largest projected half-diagonal
    let new_w = (w * cos + h * sin).round().max(1.0) as u32;
    let new_h = (w * sin + h * cos).round().max(1.0) as u32;
    Ok((new_w, new_h))
}

/// Rotate by `angle` degrees around the image centers with bilinear
/// interpolation.
///
/// Every destination pixel is mapped back into the source; pixels that fall
/// outside it get `fill` (as written by [`Rgba::format_bytes`]). The
/// destination may have any size; use [`calculate_rotated_size`] to keep
/// the whole image.
///
/// # Errors
///
/// Formats Grayscale8, RGB24, RGBA32 with `dst` in the source format, and
/// [`TransformError::InvalidAngle`] for a non-finite angle.
pub fn rotate_bilinear(src: &Image, dst: &mut Image, angle: f32, fill: Rgba) -> TransformResult<()> {
    check_format(src, BYTE_FORMATS)?;
    if dst.format() != src.format() {
        return Err(Error::ImageParametersMismatch(format!(
            "source is {:?}, destination is {:?}",
            src.format(),
            dst.format()
        ))
        .into());
    }
    if !angle.is_finite() {
        return Err(TransformError::InvalidAngle(angle));
    }

    let (sw, sh) = (src.width(), src.height());
    let old_xr = (sw as f64 - 1.0) / 2.0;
    let old_yr = (sh as f64 - 1.0) / 2.0;
    let new_xr = (dst.width() as f64 - 1.0) / 2.0;
    let new_yr = (dst.height() as f64 - 1.0) / 2.0;
    let rad = -(angle as f64).to_radians();
    let (sin, cos) = rad.sin_cos();
    let (xmax, ymax) = (sw as usize - 1, sh as usize - 1);
    let bpp = src.bytes_per_pixel();
    let fill = fill.format_bytes(src.format());
    trace!(sw, sh, dw = dst.width(), dh = dst.height(), angle, "rotate_bilinear");

    for_each_row(dst, |y, row| {
        let cy = y as f64 - new_yr;
        for (x, px) in row.chunks_exact_mut(bpp).enumerate() {
            let cx = x as f64 - new_xr;
            let ox = cos * cx + sin * cy + old_xr;
            let oy = -sin * cx + cos * cy + old_yr;
            if ox < 0.0 || oy < 0.0 || ox >= sw as f64 || oy >= sh as f64 {
                px.copy_from_slice(&fill[..bpp]);
                continue;
            }
            let (ox1, oy1) = (ox as usize, oy as usize);
            let ox2 = if ox1 == xmax { ox1 } else { ox1 + 1 };
            let oy2 = if oy1 == ymax { oy1 } else { oy1 + 1 };
            let dx1 = ox - ox1 as f64;
            let dy1 = oy - oy1 as f64;
            let (dx2, dy2) = (1.0 - dx1, 1.0 - dy1);
            let (r1, r2) = (src.row(oy1 as u32), src.row(oy2 as u32));
            for (p, out) in px.iter_mut().enumerate() {
                let (a, b) = (r1[ox1 * bpp + p] as f64, r1[ox2 * bpp + p] as f64);
                let (c, d) = (r2[ox1 * bpp + p] as f64, r2[ox2 * bpp + p] as f64);
                *out = (dy2 * (dx2 * a + dx1 * b) + dy1 * (dx2 * c + dx1 * d)).round() as u8;
            }
        }
    });
    Ok(())
}
