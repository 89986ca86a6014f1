//! Edge detection
//!
//! Three 3x3 detectors on Grayscale8 images. The one-pixel border of the
//! output is always 0.

use tracing::{debug, trace};
use ximaging_core::check::{check_format, check_min_size, check_same_params};
use ximaging_core::parallel::for_each_row;
use ximaging_core::{Image, PixelFormat};

use crate::FilterResult;

/// Edge detector type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EdgeDetectorType {
    /// Maximum absolute difference between opposite neighbors
    Difference,
    /// Maximum absolute difference between the center and its neighbors
    Homogeneity,
    /// Sobel gradient magnitude `|Gx| + |Gy|`
    #[default]
    Sobel,
}

/// 3x3 window, row-major, centered on the pixel.
#[inline]
fn edge_value(n: &[i32; 9], kind: EdgeDetectorType) -> u8 {
    let v = match kind {
        EdgeDetectorType::Difference => (n[0] - n[8])
            .abs()
            .max((n[1] - n[7]).abs())
            .max((n[2] - n[6]).abs())
            .max((n[3] - n[5]).abs()),
        EdgeDetectorType::Homogeneity => {
            let c = n[4];
            n.iter().map(|v| (v - c).abs()).max().unwrap_or(0)
        }
        EdgeDetectorType::Sobel => {
            let gx = (n[2] + 2 * n[5] + n[8]) - (n[0] + 2 * n[3] + n[6]);
            let gy = (n[6] + 2 * n[7] + n[8]) - (n[0] + 2 * n[1] + n[2]);
            gx.abs() + gy.abs()
        }
    };
    v.min(255) as u8
}

/// Detect edges of `src` into `dst`.
///
/// # Arguments
///
/// * `src` - Grayscale8 source, at least 3x3
/// * `dst` - Grayscale8 destination of the same size
/// * `kind` - Detector
/// * `scale_intensity` - Stretch the result linearly so that its maximum
///   becomes 255 (skipped when the maximum is already 0 or 255)
pub fn edge_detector(
    src: &Image,
    dst: &mut Image,
    kind: EdgeDetectorType,
    scale_intensity: bool,
) -> FilterResult<()> {
    check_format(src, &[PixelFormat::Grayscale8])?;
    check_min_size(src, 3, 3)?;
    check_same_params(src, dst)?;

    let (w, h) = (src.width() as usize, src.height() as usize);
    trace!(w, h, ?kind, scale_intensity, "edge_detector");

    for_each_row(dst, |y, row| {
        let y = y as usize;
        row.fill(0);
        if y == 0 || y == h - 1 {
            return;
        }
        let rows = [src.row(y as u32 - 1), src.row(y as u32), src.row(y as u32 + 1)];
        for x in 1..w - 1 {
            let mut n = [0i32; 9];
            for (i, r) in rows.iter().enumerate() {
                for j in 0..3 {
                    n[i * 3 + j] = r[x + j - 1] as i32;
                }
            }
            row[x] = edge_value(&n, kind);
        }
    });

    if scale_intensity {
        let max = (1..h - 1)
            .flat_map(|y| dst.row(y as u32)[1..w - 1].iter().copied())
            .max()
            .unwrap_or(0);
        if max == 0 || max == 255 {
            debug!(max, "edge_detector: stretch skipped");
            return Ok(());
        }
        let mut lut = [0u8; 256];
        for (i, v) in lut.iter_mut().enumerate() {
            *v = (i * 255 / max as usize).min(255) as u8;
        }
        for_each_row(dst, |_, row| {
            for v in row.iter_mut() {
                *v = lut[*v as usize];
            }
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ximaging_core::Rgba;

    fn step() -> Image {
        let mut image = Image::new(5, 4, PixelFormat::Grayscale8).unwrap();
        for y in 0..4 {
            image.row_mut(y).copy_from_slice(&[10, 10, 10, 30, 30]);
        }
        image
    }

    #[test]
    fn test_sobel_step() {
        let src = step();
        let mut dst = src.create_template();
        edge_detector(&src, &mut dst, EdgeDetectorType::Sobel, false).unwrap();
        // gx = 4 * 20 at the columns next to the step
        assert_eq!(dst.row(1), &[0, 0, 80, 80, 0]);
        assert_eq!(dst.row(0), &[0; 5]);
        assert_eq!(dst.row(3), &[0; 5]);
    }

    #[test]
    fn test_difference_and_homogeneity() {
        let src = step();
        let mut dst = src.create_template();
        edge_detector(&src, &mut dst, EdgeDetectorType::Difference, false).unwrap();
        assert_eq!(dst.row(2), &[0, 0, 20, 20, 0]);
        edge_detector(&src, &mut dst, EdgeDetectorType::Homogeneity, false).unwrap();
        assert_eq!(dst.row(2), &[0, 0, 20, 20, 0]);
    }

    #[test]
    fn test_scale_intensity() {
        let src = step();
        let mut dst = src.create_template();
        edge_detector(&src, &mut dst, EdgeDetectorType::Sobel, true).unwrap();
        assert_eq!(dst.row(1), &[0, 0, 255, 255, 0]);
    }

    #[test]
    fn test_flat_is_zero() {
        let src = Image::filled(6, 6, PixelFormat::Grayscale8, Rgba::gray(123)).unwrap();
        let mut dst = src.create_template();
        edge_detector(&src, &mut dst, EdgeDetectorType::Sobel, true).unwrap();
        assert_eq!(dst, Image::new(6, 6, PixelFormat::Grayscale8).unwrap());
    }

    #[test]
    fn test_gray_only() {
        let src = Image::new(6, 6, PixelFormat::Rgb24).unwrap();
        let mut dst = src.create_template();
        assert!(edge_detector(&src, &mut dst, EdgeDetectorType::Sobel, false).is_err());
    }
}
