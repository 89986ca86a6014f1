//! Pixel access functions
//!
//! Per-pixel getters and setters. Kernels work on whole rows through
//! [`Image::row`] / [`Image::row_mut`]; these helpers exist for tests,
//! drawing and the odd single-pixel query.

use super::Image;
use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::format::{ALPHA_INDEX, BLUE_INDEX, GREEN_INDEX, PixelFormat, RED_INDEX};

impl Image {
    /// Get the pixel at (x, y) as a color.
    ///
    /// Gray, binary and float pixels are returned as opaque gray (binary 1
    /// is white, float values are clamped to [0, 255]). Returns `None` if the
    /// coordinates are out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(read_rgba(self.row(y), x, self.format()))
    }

    /// Set the pixel at (x, y).
    ///
    /// The color is converted with [`Rgba::format_bytes`]; binary pixels are
    /// set when the gray value is at least 128.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba) -> Result<()> {
        if x >= self.width() || y >= self.height() {
            return Err(Error::InvalidArgument(format!(
                "pixel ({x}, {y}) outside {}x{} image",
                self.width(),
                self.height()
            )));
        }
        let format = self.format();
        let row = self.row_mut(y);
        match format {
            PixelFormat::Binary1 => set_bit(row, x, color.premultiplied().to_gray() >= 128),
            PixelFormat::GrayscaleFloat32 => {
                set_f32(row, x, color.premultiplied().to_gray() as f32)
            }
            _ => {
                let bpp = format.bytes_per_pixel();
                let i = x as usize * bpp;
                row[i..i + bpp].copy_from_slice(&color.format_bytes(format)[..bpp]);
            }
        }
        Ok(())
    }

    /// Get a float value at (x, y) of a `GrayscaleFloat32` image.
    pub fn get_f32(&self, x: u32, y: u32) -> Option<f32> {
        if self.format() != PixelFormat::GrayscaleFloat32 || x >= self.width() || y >= self.height()
        {
            return None;
        }
        Some(get_f32(self.row(y), x))
    }

    /// Get a bit at (x, y) of a `Binary1` image.
    pub fn get_bit(&self, x: u32, y: u32) -> Option<bool> {
        if self.format() != PixelFormat::Binary1 || x >= self.width() || y >= self.height() {
            return None;
        }
        Some(get_bit(self.row(y), x))
    }
}

/// Read pixel `x` of a row in `format` as a color.
pub(crate) fn read_rgba(row: &[u8], x: u32, format: PixelFormat) -> Rgba {
    match format {
        PixelFormat::Grayscale8 => Rgba::gray(row[x as usize]),
        PixelFormat::Rgb24 => {
            let i = x as usize * 3;
            Rgba::rgb(row[i + RED_INDEX], row[i + GREEN_INDEX], row[i + BLUE_INDEX])
        }
        PixelFormat::Rgba32 => {
            let i = x as usize * 4;
            Rgba::new(
                row[i + RED_INDEX],
                row[i + GREEN_INDEX],
                row[i + BLUE_INDEX],
                row[i + ALPHA_INDEX],
            )
        }
        PixelFormat::Binary1 => Rgba::gray(if get_bit(row, x) { 255 } else { 0 }),
        PixelFormat::GrayscaleFloat32 => Rgba::gray(get_f32(row, x).round().clamp(0.0, 255.0) as u8),
    }
}

/// Read pixel `x` of a packed 1-bpp row (MSB first).
#[inline]
pub fn get_bit(row: &[u8], x: u32) -> bool {
    row[(x >> 3) as usize] & (0x80 >> (x & 7)) != 0
}

/// Write pixel `x` of a packed 1-bpp row (MSB first).
#[inline]
pub fn set_bit(row: &mut [u8], x: u32, on: bool) {
    let mask = 0x80u8 >> (x & 7);
    let byte = &mut row[(x >> 3) as usize];
    if on {
        *byte |= mask;
    } else {
        *byte &= !mask;
    }
}

/// Read pixel `x` of a float row.
#[inline]
pub fn get_f32(row: &[u8], x: u32) -> f32 {
    let i = x as usize * 4;
    f32::from_ne_bytes([row[i], row[i + 1], row[i + 2], row[i + 3]])
}

/// Write pixel `x` of a float row.
#[inline]
pub fn set_f32(row: &mut [u8], x: u32, value: f32) {
    let i = x as usize * 4;
    row[i..i + 4].copy_from_slice(&value.to_ne_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_pixel_layout() {
        let mut image = Image::new(2, 1, PixelFormat::Rgb24).unwrap();
        image.set_pixel(1, 0, Rgba::rgb(10, 20, 30)).unwrap();
        assert_eq!(image.row(0), &[0, 0, 0, 30, 20, 10]);
        assert_eq!(image.pixel(1, 0), Some(Rgba::rgb(10, 20, 30)));
        assert_eq!(image.pixel(2, 0), None);
    }

    #[test]
    fn test_binary_bits() {
        let mut image = Image::new(10, 1, PixelFormat::Binary1).unwrap();
        image.set_pixel(0, 0, Rgba::WHITE).unwrap();
        image.set_pixel(9, 0, Rgba::WHITE).unwrap();
        assert_eq!(image.row(0), &[0x80, 0x40]);
        assert_eq!(image.get_bit(9, 0), Some(true));
        assert_eq!(image.get_bit(8, 0), Some(false));
        image.set_pixel(0, 0, Rgba::BLACK).unwrap();
        assert_eq!(image.row(0)[0], 0);
    }

    #[test]
    fn test_float_pixels() {
        let mut image = Image::new(3, 1, PixelFormat::GrayscaleFloat32).unwrap();
        set_f32(image.row_mut(0), 2, 12.5);
        assert_eq!(image.get_f32(2, 0), Some(12.5));
        assert_eq!(image.pixel(2, 0), Some(Rgba::gray(13)));
    }

    #[test]
    fn test_set_pixel_out_of_bounds() {
        let mut image = Image::new(2, 2, PixelFormat::Grayscale8).unwrap();
        assert!(image.set_pixel(2, 0, Rgba::WHITE).is_err());
    }
}
