//! Uniform additive noise
//!
//! Rows are processed in order on the calling thread so that a seeded
//! generator always produces the same image.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::trace;
use ximaging_core::Image;
use ximaging_core::check::{BYTE_FORMATS, check_format};

use crate::ColorResult;

/// Add noise drawn uniformly from `[-amplitude, amplitude]` to every color
/// byte, clamping to `[0, 255]`. RGBA alpha is untouched.
///
/// Draws are taken from `rng` in row-major order, one per color byte.
pub fn uniform_additive_noise<R: Rng>(image: &mut Image, amplitude: u8, rng: &mut R) -> ColorResult<()> {
    check_format(image, BYTE_FORMATS)?;
    trace!(w = image.width(), h = image.height(), amplitude, "uniform_additive_noise");

    let a = amplitude as i32;
    let bpp = image.bytes_per_pixel();
    let planes = image.format().color_planes();
    for y in 0..image.height() {
        for px in image.row_mut(y).chunks_exact_mut(bpp) {
            for v in &mut px[..planes] {
                let n = rng.random_range(-a..=a);
                *v = (*v as i32 + n).clamp(0, 255) as u8;
            }
        }
    }
    Ok(())
}

/// [`uniform_additive_noise`] with a [`StdRng`] seeded from `seed`.
pub fn uniform_additive_noise_seeded(image: &mut Image, amplitude: u8, seed: u64) -> ColorResult<()> {
    let mut rng = StdRng::seed_from_u64(seed);
    uniform_additive_noise(image, amplitude, &mut rng)
}
