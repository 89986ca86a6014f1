//! Oil painting effect
//!
//! Mode filter over intensity: every pixel takes the most frequent
//! intensity of its window. For color images the intensity is the BT.709
//! luma and the output is the average color of the pixels in the winning
//! intensity bucket.

use tracing::trace;
use ximaging_core::check::{BYTE_FORMATS, check_images, check_range};
use ximaging_core::parallel::for_each_row;
use ximaging_core::{ALPHA_INDEX, BLUE_INDEX, GREEN_INDEX, Image, RED_INDEX, luma};

use crate::FilterResult;

/// Accepted brush radius.
pub const OIL_PAINTING_RADIUS_RANGE: (u32, u32) = (1, 10);

/// Index of the most populated bucket; the lowest index wins ties.
fn mode_bucket(counts: &[u32; 256]) -> usize {
    let mut best = 0;
    for (i, &c) in counts.iter().enumerate().skip(1) {
        if c > counts[best] {
            best = i;
        }
    }
    best
}

/// Oil painting filter with a `(2 * radius + 1)²` window clipped at the
/// borders. RGBA alpha is copied.
///
/// # Arguments
///
/// * `radius` - Brush radius, in `[1, 10]`
pub fn oil_painting(src: &Image, dst: &mut Image, radius: u32) -> FilterResult<()> {
    check_images(src, dst, BYTE_FORMATS)?;
    check_range("radius", radius, OIL_PAINTING_RADIUS_RANGE.0, OIL_PAINTING_RADIUS_RANGE.1)?;

    let (w, h) = (src.width() as i32, src.height() as i32);
    let r = radius as i32;
    let bpp = src.bytes_per_pixel();
    let color = src.format().is_color();
    trace!(w, h, radius, "oil_painting");

    for_each_row(dst, |y, row| {
        let y = y as i32;
        let y0 = (y - r).max(0);
        let y1 = (y + r).min(h - 1);
        let mut counts = [0u32; 256];
        let mut sums = [[0u32; 3]; 256];
        for x in 0..w {
            let x0 = (x - r).max(0) as usize;
            let x1 = (x + r).min(w - 1) as usize;
            counts.fill(0);
            let out = &mut row[x as usize * bpp..][..bpp];

            if color {
                sums.fill([0; 3]);
                for sy in y0..=y1 {
                    let src_row = src.row(sy as u32);
                    for p in src_row[x0 * bpp..(x1 + 1) * bpp].chunks_exact(bpp) {
                        let (rv, gv, bv) = (p[RED_INDEX], p[GREEN_INDEX], p[BLUE_INDEX]);
                        let i = luma(rv, gv, bv) as usize;
                        counts[i] += 1;
                        sums[i][0] += rv as u32;
                        sums[i][1] += gv as u32;
                        sums[i][2] += bv as u32;
                    }
                }
                let i = mode_bucket(&counts);
                let n = counts[i];
                out[RED_INDEX] = (sums[i][0] / n) as u8;
                out[GREEN_INDEX] = (sums[i][1] / n) as u8;
                out[BLUE_INDEX] = (sums[i][2] / n) as u8;
                if bpp == 4 {
                    out[ALPHA_INDEX] = src.row(y as u32)[x as usize * bpp + ALPHA_INDEX];
                }
            } else {
                for sy in y0..=y1 {
                    for &v in &src.row(sy as u32)[x0..=x1] {
                        counts[v as usize] += 1;
                    }
                }
                out[0] = mode_bucket(&counts) as u8;
            }
        }
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ximaging_core::{PixelFormat, Rgba};

    #[test]
    fn test_mode_tie_goes_low() {
        let mut counts = [0u32; 256];
        counts[40] = 3;
        counts[7] = 3;
        counts[200] = 2;
        assert_eq!(mode_bucket(&counts), 7);
    }

    #[test]
    fn test_gray_majority() {
        let mut src = Image::new(3, 3, PixelFormat::Grayscale8).unwrap();
        src.row_mut(0).copy_from_slice(&[5, 5, 9]);
        src.row_mut(1).copy_from_slice(&[5, 9, 9]);
        src.row_mut(2).copy_from_slice(&[5, 9, 9]);
        let mut dst = src.create_template();
        oil_painting(&src, &mut dst, 1).unwrap();
        // center window: four 5s, five 9s
        assert_eq!(dst.row(1)[1], 9);
        // top-left window: three 5s, one 9
        assert_eq!(dst.row(0)[0], 5);
    }

    #[test]
    fn test_color_bucket_average() {
        let mut src = Image::filled(3, 1, PixelFormat::Rgba32, Rgba::new(100, 0, 0, 77)).unwrap();
        src.set_pixel(2, 0, Rgba::new(0, 200, 0, 255)).unwrap();
        let mut dst = src.create_template();
        oil_painting(&src, &mut dst, 1).unwrap();
        assert_eq!(dst.pixel(1, 0), Some(Rgba::new(100, 0, 0, 77)));
        // window of x = 2 holds one pixel of each; red has the lower luma
        assert_eq!(dst.pixel(2, 0), Some(Rgba::new(100, 0, 0, 255)));
    }
}
