//! Pixel jitter
//!
//! Every pixel is replaced by a random neighbor within `radius`. Neighbors
//! are always read from a snapshot of the image taken before the first
//! write, so the result does not depend on the visiting order. Offsets are
//! drawn on the calling thread in row-major order (`dx` then `dy` per
//! pixel), which keeps seeded runs reproducible.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::trace;
use ximaging_core::Image;
use ximaging_core::check::{BYTE_FORMATS, check_format, check_range};

use crate::EffectsResult;

/// Allowed jitter radius
pub const JITTER_RADIUS_RANGE: (u8, u8) = (1, 10);

/// Move every pixel to a random spot within `±radius` in both directions.
///
/// Picks that fall outside the image leave the pixel unchanged. All bytes
/// of a pixel, alpha included, move together.
///
/// # Errors
///
/// Formats Grayscale8, RGB24, RGBA32; `radius` in `[1, 10]`.
pub fn jitter<R: Rng>(image: &mut Image, radius: u8, rng: &mut R) -> EffectsResult<()> {
    check_format(image, BYTE_FORMATS)?;
    check_range("radius", radius, JITTER_RADIUS_RANGE.0, JITTER_RADIUS_RANGE.1)?;
    trace!(w = image.width(), h = image.height(), radius, "jitter");

    let snapshot = image.clone();
    let (w, h) = (image.width() as i64, image.height() as i64);
    let bpp = image.bytes_per_pixel();
    let r = radius as i64;

    for y in 0..h {
        let row = image.row_mut(y as u32);
        for x in 0..w {
            let sx = x + rng.random_range(-r..=r);
            let sy = y + rng.random_range(-r..=r);
            if sx < 0 || sy < 0 || sx >= w || sy >= h {
                continue;
            }
            let from = &snapshot.row(sy as u32)[sx as usize * bpp..][..bpp];
            row[x as usize * bpp..][..bpp].copy_from_slice(from);
        }
    }
    Ok(())
}

/// [`jitter`] with a [`StdRng`] seeded from `seed`.
pub fn jitter_seeded(image: &mut Image, radius: u8, seed: u64) -> EffectsResult<()> {
    let mut rng = StdRng::seed_from_u64(seed);
    jitter(image, radius, &mut rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ximaging_core::{PixelFormat, Rgba};

    fn numbered(w: u32, h: u32) -> Image {
        let mut image = Image::new(w, h, PixelFormat::Grayscale8).unwrap();
        for y in 0..h {
            for (x, v) in image.row_mut(y).iter_mut().enumerate() {
                *v = (y * w + x as u32) as u8;
            }
        }
        image
    }

    #[test]
    fn test_flat_image_unchanged() {
        let mut image = Image::filled(6, 6, PixelFormat::Rgba32, Rgba::new(1, 2, 3, 4)).unwrap();
        let original = image.clone();
        jitter_seeded(&mut image, 3, 11).unwrap();
        assert_eq!(image, original);
    }

    #[test]
    fn test_values_come_from_the_window() {
        let (w, h) = (12u32, 10u32);
        let mut image = numbered(w, h);
        jitter_seeded(&mut image, 2, 5).unwrap();
        for y in 0..h {
            for x in 0..w {
                let v = image.row(y)[x as usize] as u32;
                let (sx, sy) = (v % w, v / w);
                assert!(sx.abs_diff(x) <= 2 && sy.abs_diff(y) <= 2);
            }
        }
    }

    #[test]
    fn test_reproducible_and_validated() {
        let mut a = numbered(8, 8);
        let mut b = a.clone();
        jitter_seeded(&mut a, 1, 99).unwrap();
        jitter_seeded(&mut b, 1, 99).unwrap();
        assert_eq!(a, b);
        assert!(jitter_seeded(&mut a, 0, 1).is_err());
        assert!(jitter_seeded(&mut a, 11, 1).is_err());
    }
}
