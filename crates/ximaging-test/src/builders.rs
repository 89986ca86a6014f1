//! Synthetic test images
//!
//! Deterministic inputs for regression tests. All builders return images
//! with the minimal stride unless noted.

use ximaging_core::{Image, PixelFormat, Rgba};

use crate::error::{TestError, TestResult};

/// Image with every byte of every pixel set to `value`.
///
/// For RGBA32 the alpha channel is set to `value` as well.
pub fn uniform(width: u32, height: u32, format: PixelFormat, value: u8) -> TestResult<Image> {
    let mut image = Image::new(width, height, format)?;
    for y in 0..height {
        image.row_mut(y).fill(value);
    }
    Ok(image)
}

/// Image filled with one color (see [`Rgba::format_bytes`]).
pub fn solid(width: u32, height: u32, format: PixelFormat, color: Rgba) -> TestResult<Image> {
    Ok(Image::filled(width, height, format, color)?)
}

/// Horizontal gradient: every byte of column `x` is
/// `x * 255 / (width - 1)` (0 for single-column images).
pub fn gradient(width: u32, height: u32, format: PixelFormat) -> TestResult<Image> {
    if !matches!(
        format,
        PixelFormat::Grayscale8 | PixelFormat::Rgb24 | PixelFormat::Rgba32
    ) {
        return Err(TestError::InvalidParameters(format!(
            "gradient needs an 8-bit format, got {format:?}"
        )));
    }
    let mut image = Image::new(width, height, format)?;
    let bpp = format.bytes_per_pixel();
    let span = (width.max(2) - 1) as usize;
    for y in 0..height {
        for (x, px) in image.row_mut(y).chunks_exact_mut(bpp).enumerate() {
            px.fill((x * 255 / span) as u8);
        }
    }
    Ok(image)
}

/// Checkerboard of `cell x cell` squares alternating `a` and `b`, starting
/// with `a` in the top-left corner.
pub fn checkerboard(
    width: u32,
    height: u32,
    format: PixelFormat,
    cell: u32,
    a: Rgba,
    b: Rgba,
) -> TestResult<Image> {
    if cell == 0 {
        return Err(TestError::InvalidParameters("cell size is 0".to_string()));
    }
    let mut image = Image::new(width, height, format)?;
    for y in 0..height {
        for x in 0..width {
            let color = if (x / cell + y / cell) % 2 == 0 { a } else { b };
            image.set_pixel(x, y, color)?;
        }
    }
    Ok(image)
}

/// Image whose bytes are a fixed pseudo-random sequence (xorshift32 seeded
/// with `seed`). Useful as "anything but flat" input.
pub fn pattern(width: u32, height: u32, format: PixelFormat, seed: u32) -> TestResult<Image> {
    let mut image = Image::new(width, height, format)?;
    let mut state = seed.max(1);
    for y in 0..height {
        for v in image.row_mut(y) {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            *v = (state >> 24) as u8;
        }
    }
    Ok(image)
}
