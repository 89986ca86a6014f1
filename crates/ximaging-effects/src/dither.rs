//! Ordered dithering
//!
//! A square threshold matrix is tiled over a Grayscale8 image; a pixel
//! becomes white (bit set) when its value is at least the threshold at its
//! position. The output is a packed Binary1 image.
//!
//! The predefined Bayer matrices rank the cells `0..n²` and turn rank `i`
//! into threshold `(i + 1) * 256 / (n² + 1)`, so the thresholds are spread
//! evenly over `(0, 256)`.

use tracing::trace;
use ximaging_core::check::{check_dst, check_format};
use ximaging_core::image::set_bit;
use ximaging_core::parallel::for_each_row;
use ximaging_core::{Image, PixelFormat};

use crate::{EffectsError, EffectsResult};

/// Square matrix of dithering thresholds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThresholdMatrix {
    size: usize,
    values: Vec<u8>,
}

const BAYER_2: [u8; 4] = [0, 2, 3, 1];
const BAYER_3: [u8; 9] = [0, 7, 3, 6, 5, 2, 4, 1, 8];

impl ThresholdMatrix {
    /// Create a matrix from row-major thresholds.
    ///
    /// # Errors
    ///
    /// Returns [`EffectsError::InvalidMatrix`] when `size` is 0 or `values`
    /// does not hold `size * size` entries.
    pub fn new(size: usize, values: Vec<u8>) -> EffectsResult<Self> {
        if size == 0 {
            return Err(EffectsError::InvalidMatrix("size is 0".to_string()));
        }
        if values.len() != size * size {
            return Err(EffectsError::InvalidMatrix(format!(
                "{} values for a {size}x{size} matrix",
                values.len()
            )));
        }
        Ok(Self { size, values })
    }

    /// Thresholds from a ranking of the `size * size` cells.
    fn from_ranks(size: usize, ranks: &[u8]) -> Self {
        let cells = (size * size) as u32;
        let values = ranks
            .iter()
            .map(|&i| ((i as u32 + 1) * 256 / (cells + 1)) as u8)
            .collect();
        Self { size, values }
    }

    /// Bayer ranks of order `size`, a power of two, built by recursive
    /// subdivision of the 2x2 pattern.
    fn bayer_ranks(size: usize) -> Vec<u8> {
        if size == 2 {
            return BAYER_2.to_vec();
        }
        let half = size / 2;
        let inner = Self::bayer_ranks(half);
        let mut ranks = vec![0u8; size * size];
        for y in 0..size {
            for x in 0..size {
                let quadrant = BAYER_2[(y / half) * 2 + x / half];
                ranks[y * size + x] = 4 * inner[(y % half) * half + x % half] + quadrant;
            }
        }
        ranks
    }

    /// 2x2 Bayer matrix.
    pub fn bayer2() -> Self {
        Self::from_ranks(2, &BAYER_2)
    }

    /// 3x3 dispersed-dot matrix.
    pub fn bayer3() -> Self {
        Self::from_ranks(3, &BAYER_3)
    }

    /// 4x4 Bayer matrix.
    pub fn bayer4() -> Self {
        Self::from_ranks(4, &Self::bayer_ranks(4))
    }

    /// 8x8 Bayer matrix.
    pub fn bayer8() -> Self {
        Self::from_ranks(8, &Self::bayer_ranks(8))
    }

    /// Order of the matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Row-major thresholds.
    pub fn values(&self) -> &[u8] {
        &self.values
    }

    /// Threshold applied at image position `(x, y)`.
    #[inline]
    pub fn threshold_at(&self, x: usize, y: usize) -> u8 {
        self.values[(y % self.size) * self.size + x % self.size]
    }
}

impl Default for ThresholdMatrix {
    fn default() -> Self {
        Self::bayer4()
    }
}

/// Dither a Grayscale8 image into a Binary1 image of the same size.
///
/// # Errors
///
/// `src` must be Grayscale8 and `dst` Binary1 with the size of `src`.
pub fn ordered_dithering(src: &Image, dst: &mut Image, matrix: &ThresholdMatrix) -> EffectsResult<()> {
    check_format(src, &[PixelFormat::Grayscale8])?;
    check_dst(dst, src.width(), src.height(), PixelFormat::Binary1)?;
    trace!(w = src.width(), h = src.height(), order = matrix.size(), "ordered_dithering");

    for_each_row(dst, |y, row| {
        row.fill(0);
        for (x, &v) in src.row(y).iter().enumerate() {
            if v >= matrix.threshold_at(x, y as usize) {
                set_bit(row, x as u32, true);
            }
        }
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ximaging_core::image::get_bit;

    #[test]
    fn test_bayer_thresholds() {
        assert_eq!(ThresholdMatrix::bayer2().values(), &[51, 153, 204, 102]);
        let m4 = ThresholdMatrix::bayer4();
        assert_eq!(m4.values()[..4], [15, 135, 45, 165]);
        let m8 = ThresholdMatrix::bayer8();
        let mut sorted = m8.values().to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), 64);
        assert_eq!(m8.values()[0], 3);
        assert_eq!(ThresholdMatrix::bayer3().values()[8], 230);
    }

    #[test]
    fn test_new_validates() {
        assert!(ThresholdMatrix::new(2, vec![1, 2, 3, 4]).is_ok());
        assert!(matches!(ThresholdMatrix::new(2, vec![1, 2, 3]), Err(EffectsError::InvalidMatrix(_))));
        assert!(matches!(ThresholdMatrix::new(0, vec![]), Err(EffectsError::InvalidMatrix(_))));
    }

    #[test]
    fn test_extremes() {
        let mut src = Image::new(10, 3, PixelFormat::Grayscale8).unwrap();
        src.row_mut(1).fill(255);
        let mut dst = Image::new(10, 3, PixelFormat::Binary1).unwrap();
        ordered_dithering(&src, &mut dst, &ThresholdMatrix::bayer8()).unwrap();
        for x in 0..10 {
            assert!(!get_bit(dst.row(0), x));
            assert!(get_bit(dst.row(1), x));
        }
    }

    #[test]
    fn test_mid_gray_density() {
        let src = Image::filled(8, 8, PixelFormat::Grayscale8, ximaging_core::Rgba::gray(128)).unwrap();
        let mut dst = Image::new(8, 8, PixelFormat::Binary1).unwrap();
        ordered_dithering(&src, &mut dst, &ThresholdMatrix::bayer8()).unwrap();
        let set: u32 = (0..8).map(|y| dst.row(y)[0].count_ones()).sum();
        assert_eq!(set, 32);
    }

    #[test]
    fn test_dst_checked() {
        let src = Image::new(4, 4, PixelFormat::Grayscale8).unwrap();
        let mut dst = Image::new(4, 4, PixelFormat::Grayscale8).unwrap();
        assert!(ordered_dithering(&src, &mut dst, &ThresholdMatrix::default()).is_err());
    }
}
