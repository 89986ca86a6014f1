//! Mean shift smoothing
//!
//! Each pixel becomes the average of the neighbors in a square window whose
//! color is close enough to its own. Edges between differently colored
//! regions survive while noise inside a region is flattened.

use tracing::trace;
use ximaging_core::check::{BYTE_FORMATS, check_images, check_range};
use ximaging_core::parallel::for_each_row;
use ximaging_core::{ALPHA_INDEX, BLUE_INDEX, GREEN_INDEX, Image, RED_INDEX};

use crate::FilterResult;

/// Accepted window radius.
pub const MEAN_SHIFT_RADIUS_RANGE: (u32, u32) = (1, 20);
/// Accepted color distance (441 covers the full RGB cube diagonal).
pub const MEAN_SHIFT_DISTANCE_RANGE: (u32, u32) = (0, 442);

/// Mean shift filter.
///
/// A neighbor takes part in the average when its distance to the center
/// pixel is at most `color_distance`: the absolute difference for
/// Grayscale8, the Euclidean RGB distance (compared squared) for color
/// images. The window is clipped at the image borders. RGBA alpha is copied.
///
/// # Arguments
///
/// * `radius` - Window radius, in `[1, 20]`
/// * `color_distance` - Maximum distance, in `[0, 442]`
pub fn mean_shift(src: &Image, dst: &mut Image, radius: u32, color_distance: u32) -> FilterResult<()> {
    check_images(src, dst, BYTE_FORMATS)?;
    check_range("radius", radius, MEAN_SHIFT_RADIUS_RANGE.0, MEAN_SHIFT_RADIUS_RANGE.1)?;
    check_range(
        "color_distance",
        color_distance,
        MEAN_SHIFT_DISTANCE_RANGE.0,
        MEAN_SHIFT_DISTANCE_RANGE.1,
    )?;

    let (w, h) = (src.width() as i32, src.height() as i32);
    let r = radius as i32;
    let bpp = src.bytes_per_pixel();
    let color = src.format().is_color();
    let max_d2 = color_distance * color_distance;
    trace!(w, h, radius, color_distance, "mean_shift");

    for_each_row(dst, |y, row| {
        let y = y as i32;
        let y0 = (y - r).max(0);
        let y1 = (y + r).min(h - 1);
        let center_row = src.row(y as u32);
        for x in 0..w {
            let x0 = (x - r).max(0);
            let x1 = (x + r).min(w - 1);
            let c = &center_row[x as usize * bpp..][..bpp];
            let out = &mut row[x as usize * bpp..][..bpp];

            if color {
                let (cr, cg, cb) = (c[RED_INDEX] as i32, c[GREEN_INDEX] as i32, c[BLUE_INDEX] as i32);
                let (mut sr, mut sg, mut sb, mut n) = (0u32, 0u32, 0u32, 0u32);
                for sy in y0..=y1 {
                    let src_row = src.row(sy as u32);
                    for sx in x0..=x1 {
                        let p = &src_row[sx as usize * bpp..];
                        let dr = p[RED_INDEX] as i32 - cr;
                        let dg = p[GREEN_INDEX] as i32 - cg;
                        let db = p[BLUE_INDEX] as i32 - cb;
                        if ((dr * dr + dg * dg + db * db) as u32) <= max_d2 {
                            sr += p[RED_INDEX] as u32;
                            sg += p[GREEN_INDEX] as u32;
                            sb += p[BLUE_INDEX] as u32;
                            n += 1;
                        }
                    }
                }
                // the center itself always counts, so n >= 1
                out[RED_INDEX] = (sr / n) as u8;
                out[GREEN_INDEX] = (sg / n) as u8;
                out[BLUE_INDEX] = (sb / n) as u8;
                if bpp == 4 {
                    out[ALPHA_INDEX] = c[ALPHA_INDEX];
                }
            } else {
                let cv = c[0] as i32;
                let (mut s, mut n) = (0u32, 0u32);
                for sy in y0..=y1 {
                    let src_row = src.row(sy as u32);
                    for &v in &src_row[x0 as usize..=x1 as usize] {
                        if (v as i32 - cv).unsigned_abs() <= color_distance {
                            s += v as u32;
                            n += 1;
                        }
                    }
                }
                out[0] = (s / n) as u8;
            }
        }
    });
    Ok(())
}
