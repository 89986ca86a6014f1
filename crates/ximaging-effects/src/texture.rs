//! Textures
//!
//! - [`apply_texture`] modulates an image with a Grayscale8 texture
//! - [`TextureGenerator`] implementations render procedural Grayscale8
//!   textures from [`PerlinNoise`]
//!
//! Every generator draws one random offset in `[0, 5000)` from a
//! [`StdRng`] seeded with its `seed` and samples the noise at
//! `(x + offset, y + offset)`. Equal seeds give equal textures; the
//! rendering itself is row-parallel.

use std::f64::consts::PI;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::trace;
use ximaging_core::check::{BYTE_FORMATS, check_format, check_range, check_same_size};
use ximaging_core::parallel::for_each_row;
use ximaging_core::{Image, PixelFormat};

use crate::{EffectsResult, PerlinNoise};

/// Multiply the color bytes of `image` by the texture.
///
/// Each color byte `v` with texture value `t` becomes
/// `v * (keep + (1 - keep) * t / base_level)`, truncated and clamped to 255,
/// where `keep` is `amount_to_keep`. A texture value equal to `base_level`
/// leaves the byte unchanged. Alpha is untouched.
///
/// # Errors
///
/// `image` in Grayscale8, RGB24 or RGBA32; `texture` a Grayscale8 image of
/// the same size; `base_level` in `[1, 255]` and `amount_to_keep` in
/// `[0, 1]`.
pub fn apply_texture(image: &mut Image, texture: &Image, base_level: u8, amount_to_keep: f32) -> EffectsResult<()> {
    check_format(image, BYTE_FORMATS)?;
    check_format(texture, &[PixelFormat::Grayscale8])?;
    check_same_size(image, texture)?;
    check_range("base_level", base_level, 1, 255)?;
    check_range("amount_to_keep", amount_to_keep, 0.0, 1.0)?;
    trace!(w = image.width(), h = image.height(), base_level, amount_to_keep, "apply_texture");

    let keep = amount_to_keep as f64;
    let scale = (1.0 - keep) / base_level as f64;
    let bpp = image.bytes_per_pixel();
    let planes = image.format().color_planes();
    for_each_row(image, |y, row| {
        for (px, &t) in row.chunks_exact_mut(bpp).zip(texture.row(y)) {
            let factor = keep + scale * t as f64;
            for v in &mut px[..planes] {
                *v = (*v as f64 * factor).min(255.0) as u8;
            }
        }
    });
    Ok(())
}

/// Procedural texture source
pub trait TextureGenerator {
    /// Render a `width x height` Grayscale8 texture.
    ///
    /// # Errors
    ///
    /// [`ximaging_core::Error::InvalidImageSize`] for a zero dimension.
    fn generate(&self, width: u32, height: u32) -> EffectsResult<Image>;
}

/// Random sampling offset for `seed`.
fn noise_offset(seed: u64) -> f64 {
    StdRng::seed_from_u64(seed).random_range(0..5000) as f64
}

/// Render `value(x, y)`, expected in `[0, 1]`, as a Grayscale8 image.
fn render<F>(width: u32, height: u32, value: F) -> EffectsResult<Image>
where
    F: Fn(f64, f64) -> f64 + Send + Sync,
{
    let mut image = Image::new(width, height, PixelFormat::Grayscale8)?;
    for_each_row(&mut image, |y, row| {
        for (x, v) in row.iter_mut().enumerate() {
            *v = (value(x as f64, y as f64).clamp(0.0, 1.0) * 255.0) as u8;
        }
    });
    Ok(image)
}

/// Soft clouds: the noise mapped from `[-1, 1]` to `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CloudsTexture {
    pub seed: u64,
}

impl CloudsTexture {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl TextureGenerator for CloudsTexture {
    fn generate(&self, width: u32, height: u32) -> EffectsResult<Image> {
        trace!(width, height, seed = self.seed, "clouds texture");
        let noise = PerlinNoise::new(8, 0.5, 1.0 / 32.0, 1.0);
        let r = noise_offset(self.seed);
        render(width, height, |x, y| noise.function_2d(x + r, y + r) * 0.5 + 0.5)
    }
}

/// Marble veins: `|sin(pi * (x / xp + y / yp + noise))|` where the periods
/// are counted across the whole image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarbleTexture {
    pub seed: u64,
    /// Number of vein periods across the width
    pub x_period: f64,
    /// Number of vein periods down the height
    pub y_period: f64,
}

impl Default for MarbleTexture {
    fn default() -> Self {
        Self {
            seed: 0,
            x_period: 5.0,
            y_period: 10.0,
        }
    }
}

impl MarbleTexture {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }
}

impl TextureGenerator for MarbleTexture {
    fn generate(&self, width: u32, height: u32) -> EffectsResult<Image> {
        trace!(width, height, seed = self.seed, "marble texture");
        let noise = PerlinNoise::new(2, 0.65, 1.0 / 32.0, 1.0);
        let r = noise_offset(self.seed);
        let xf = self.x_period / width as f64;
        let yf = self.y_period / height as f64;
        render(width, height, |x, y| {
            ((x * xf + y * yf + noise.function_2d(x + r, y + r)) * PI).sin().abs()
        })
    }
}

/// Wood grain: concentric rings around the center, disturbed by
/// low-amplitude noise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WoodTexture {
    pub seed: u64,
    /// Number of rings between the center and the edge
    pub rings: f64,
}

impl Default for WoodTexture {
    fn default() -> Self {
        Self { seed: 0, rings: 12.0 }
    }
}

impl WoodTexture {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }
}

impl TextureGenerator for WoodTexture {
    fn generate(&self, width: u32, height: u32) -> EffectsResult<Image> {
        trace!(width, height, seed = self.seed, rings = self.rings, "wood texture");
        let noise = PerlinNoise::new(8, 0.5, 1.0 / 32.0, 0.05);
        let r = noise_offset(self.seed);
        let (w, h) = (width as f64, height as f64);
        let (cx, cy) = ((width / 2) as f64, (height / 2) as f64);
        let rings = self.rings;
        render(width, height, |x, y| {
            let xv = (x - cx) / w;
            let yv = (y - cy) / h;
            let d = (xv * xv + yv * yv).sqrt();
            ((d + noise.function_2d(x + r, y + r)) * PI * 2.0 * rings).sin().abs()
        })
    }
}

/// Woven cloth: crossed sine waves along both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextileTexture {
    pub seed: u64,
}

impl TextileTexture {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl TextureGenerator for TextileTexture {
    fn generate(&self, width: u32, height: u32) -> EffectsResult<Image> {
        trace!(width, height, seed = self.seed, "textile texture");
        let noise = PerlinNoise::new(3, 0.65, 1.0 / 8.0, 1.0);
        let r = noise_offset(self.seed);
        render(width, height, |x, y| {
            let n = noise.function_2d(x + r, y + r);
            ((x + n).sin() + (y + n).sin()) * 0.25 + 0.5
        })
    }
}

/// Labyrinth-like ridges: the absolute value of single-octave noise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LabyrinthTexture {
    pub seed: u64,
}

impl LabyrinthTexture {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl TextureGenerator for LabyrinthTexture {
    fn generate(&self, width: u32, height: u32) -> EffectsResult<Image> {
        trace!(width, height, seed = self.seed, "labyrinth texture");
        let noise = PerlinNoise::new(1, 0.65, 1.0 / 16.0, 1.0);
        let r = noise_offset(self.seed);
        render(width, height, |x, y| noise.function_2d(x + r, y + r).abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ximaging_core::{Error, Rgba};

    use crate::EffectsError;

    #[test]
    fn test_apply_texture_base_level_is_identity() {
        let mut image = Image::filled(3, 2, PixelFormat::Rgba32, Rgba::new(10, 100, 200, 77)).unwrap();
        let texture = Image::filled(3, 2, PixelFormat::Grayscale8, Rgba::gray(128)).unwrap();
        apply_texture(&mut image, &texture, 128, 0.25).unwrap();
        assert_eq!(image.pixel(1, 1), Some(Rgba::new(10, 100, 200, 77)));
    }

    #[test]
    fn test_apply_texture_scales() {
        let mut image = Image::filled(2, 1, PixelFormat::Grayscale8, Rgba::gray(200)).unwrap();
        let mut texture = Image::new(2, 1, PixelFormat::Grayscale8).unwrap();
        texture.row_mut(0).copy_from_slice(&[0, 255]);
        apply_texture(&mut image, &texture, 128, 0.5).unwrap();
        // 200 * 0.5 = 100; 200 * (0.5 + 0.5 * 255 / 128) clamps
        assert_eq!(image.row(0), &[100, 255]);
    }

    #[test]
    fn test_apply_texture_checks() {
        let mut image = Image::new(4, 4, PixelFormat::Rgb24).unwrap();
        let texture = Image::new(4, 4, PixelFormat::Grayscale8).unwrap();
        assert!(matches!(
            apply_texture(&mut image, &texture, 0, 0.5),
            Err(EffectsError::Core(Error::ArgumentOutOfRange { .. }))
        ));
        assert!(apply_texture(&mut image, &texture, 128, 1.5).is_err());
        let small = Image::new(2, 4, PixelFormat::Grayscale8).unwrap();
        assert!(apply_texture(&mut image, &small, 128, 0.5).is_err());
    }

    #[test]
    fn test_generators_are_seeded() {
        let generators: [&dyn TextureGenerator; 5] = [
            &CloudsTexture::new(3),
            &MarbleTexture::new(3),
            &WoodTexture::new(3),
            &TextileTexture::new(3),
            &LabyrinthTexture::new(3),
        ];
        for generator in generators {
            let a = generator.generate(32, 24).unwrap();
            let b = generator.generate(32, 24).unwrap();
            assert_eq!(a.format(), PixelFormat::Grayscale8);
            assert_eq!((a.width(), a.height()), (32, 24));
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(matches!(
            CloudsTexture::default().generate(0, 10),
            Err(EffectsError::Core(Error::InvalidImageSize { .. }))
        ));
    }
}
