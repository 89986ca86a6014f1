//! Image resizing
//!
//! Both resizers map every destination pixel back into the source, so the
//! destination size is free; only the formats must match.

use tracing::{debug, trace};
use ximaging_core::check::{BYTE_FORMATS, check_format};
use ximaging_core::parallel::for_each_row;
use ximaging_core::{Error, Image};

use crate::{SAMPLE_FORMATS, TransformResult};

fn check_resize(src: &Image, dst: &Image) -> TransformResult<()> {
    if src.format() != dst.format() {
        return Err(Error::ImageParametersMismatch(format!(
            "source is {:?}, destination is {:?}",
            src.format(),
            dst.format()
        ))
        .into());
    }
    Ok(())
}

/// Copy the pixels of two images with equal parameters row by row.
fn copy_rows(src: &Image, dst: &mut Image) {
    for_each_row(dst, |y, row| row.copy_from_slice(src.row(y)));
}

/// Resize with nearest-neighbor sampling: `src_x = x * src_width / dst_width`
/// and likewise for rows.
///
/// # Errors
///
/// Formats Grayscale8, RGB24, RGBA32 and GrayscaleFloat32; `dst` must have
/// the format of `src`.
pub fn resize_nearest_neighbor(src: &Image, dst: &mut Image) -> TransformResult<()> {
    check_format(src, SAMPLE_FORMATS)?;
    check_resize(src, dst)?;
    if src.same_size(dst) {
        debug!("resize_nearest_neighbor: same size, copying");
        copy_rows(src, dst);
        return Ok(());
    }

    let (sw, sh) = (src.width() as u64, src.height() as u64);
    let (dw, dh) = (dst.width() as u64, dst.height() as u64);
    let bpp = src.bytes_per_pixel();
    trace!(sw, sh, dw, dh, "resize_nearest_neighbor");

    for_each_row(dst, |y, row| {
        let src_row = src.row((y as u64 * sh / dh) as u32);
        for (x, px) in row.chunks_exact_mut(bpp).enumerate() {
            let sx = (x as u64 * sw / dw) as usize;
            px.copy_from_slice(&src_row[sx * bpp..][..bpp]);
        }
    });
    Ok(())
}

/// Resize with bilinear interpolation.
///
/// Destination pixel `x` samples the source at `x * src_width / dst_width`;
/// the four surrounding pixels are weighted by distance and the result is
/// rounded. Samples on the last row or column reuse it as their second
/// neighbor.
///
/// # Errors
///
/// Formats Grayscale8, RGB24, RGBA32; `dst` must have the format of `src`.
pub fn resize_bilinear(src: &Image, dst: &mut Image) -> TransformResult<()> {
    check_format(src, BYTE_FORMATS)?;
    check_resize(src, dst)?;
    if src.same_size(dst) {
        debug!("resize_bilinear: same size, copying");
        copy_rows(src, dst);
        return Ok(());
    }

    let (sw, sh) = (src.width(), src.height());
    let (dw, dh) = (dst.width(), dst.height());
    let x_factor = sw as f64 / dw as f64;
    let y_factor = sh as f64 / dh as f64;
    let (xmax, ymax) = (sw as usize - 1, sh as usize - 1);
    let bpp = src.bytes_per_pixel();
    trace!(sw, sh, dw, dh, "resize_bilinear");

    for_each_row(dst, |y, row| {
        let oy = y as f64 * y_factor;
        let oy1 = oy as usize;
        let oy2 = if oy1 == ymax { oy1 } else { oy1 + 1 };
        let dy1 = oy - oy1 as f64;
        let dy2 = 1.0 - dy1;
        let (r1, r2) = (src.row(oy1 as u32), src.row(oy2 as u32));

        for (x, px) in row.chunks_exact_mut(bpp).enumerate() {
            let ox = x as f64 * x_factor;
            let ox1 = ox as usize;
            let ox2 = if ox1 == xmax { ox1 } else { ox1 + 1 };
            let dx1 = ox - ox1 as f64;
            let dx2 = 1.0 - dx1;
            for (p, out) in px.iter_mut().enumerate() {
                let (a, b) = (r1[ox1 * bpp + p] as f64, r1[ox2 * bpp + p] as f64);
                let (c, d) = (r2[ox1 * bpp + p] as f64, r2[ox2 * bpp + p] as f64);
                *out = (dy2 * (dx2 * a + dx1 * b) + dy1 * (dx2 * c + dx1 * d)).round() as u8;
            }
        }
    });
    Ok(())
}
