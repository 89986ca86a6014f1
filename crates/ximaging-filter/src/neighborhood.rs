//! 3x3 neighborhood filters
//!
//! Dilatation (maximum), erosion (minimum) and mean over the in-bounds
//! part of each pixel's 3x3 window. Every byte of a pixel, alpha included,
//! is processed as its own plane.

use tracing::trace;
use ximaging_core::check::{BYTE_FORMATS, check_format, check_min_size, check_same_params};
use ximaging_core::parallel::for_each_row;
use ximaging_core::Image;

use crate::FilterResult;

fn check_3x3(src: &Image, dst: &Image) -> FilterResult<()> {
    check_format(src, BYTE_FORMATS)?;
    check_min_size(src, 3, 3)?;
    check_same_params(src, dst)?;
    Ok(())
}

/// Run `reduce(acc, byte)` over the in-bounds 3x3 window of every byte and
/// store `finish(acc, count)`.
fn window_3x3<R, F>(src: &Image, dst: &mut Image, init: u32, reduce: R, finish: F)
where
    R: Fn(u32, u8) -> u32 + Send + Sync,
    F: Fn(u32, u32) -> u8 + Send + Sync,
{
    let (w, h) = (src.width() as usize, src.height() as usize);
    let bpp = src.bytes_per_pixel();
    for_each_row(dst, |y, row| {
        let y = y as usize;
        let y0 = y.saturating_sub(1);
        let y1 = (y + 1).min(h - 1);
        for x in 0..w {
            let x0 = x.saturating_sub(1);
            let x1 = (x + 1).min(w - 1);
            let count = ((y1 - y0 + 1) * (x1 - x0 + 1)) as u32;
            for p in 0..bpp {
                let mut acc = init;
                for sy in y0..=y1 {
                    let src_row = src.row(sy as u32);
                    for sx in x0..=x1 {
                        acc = reduce(acc, src_row[sx * bpp + p]);
                    }
                }
                row[x * bpp + p] = finish(acc, count);
            }
        }
    });
}

/// 3x3 dilatation: every byte becomes the maximum of its neighborhood.
///
/// # Errors
///
/// Formats Grayscale8, RGB24, RGBA32; the image must be at least 3x3.
pub fn dilatation_3x3(src: &Image, dst: &mut Image) -> FilterResult<()> {
    check_3x3(src, dst)?;
    trace!(w = src.width(), h = src.height(), "dilatation_3x3");
    window_3x3(src, dst, 0, |acc, v| acc.max(v as u32), |acc, _| acc as u8);
    Ok(())
}

/// 3x3 erosion: every byte becomes the minimum of its neighborhood.
pub fn erosion_3x3(src: &Image, dst: &mut Image) -> FilterResult<()> {
    check_3x3(src, dst)?;
    trace!(w = src.width(), h = src.height(), "erosion_3x3");
    window_3x3(src, dst, 255, |acc, v| acc.min(v as u32), |acc, _| acc as u8);
    Ok(())
}

/// 3x3 mean with truncating integer division by the number of in-bounds
/// neighbors (4 in corners, 6 along edges, 9 inside).
pub fn mean_3x3(src: &Image, dst: &mut Image) -> FilterResult<()> {
    check_3x3(src, dst)?;
    trace!(w = src.width(), h = src.height(), "mean_3x3");
    window_3x3(src, dst, 0, |acc, v| acc + v as u32, |acc, n| (acc / n) as u8);
    Ok(())
}
