//! Pixel formats
//!
//! Multi-byte formats store channels in BGR(A) order, which matches a
//! little-endian 24/32-bit `0xAARRGGBB` word. Use the `*_INDEX` constants
//! instead of literal offsets.

/// Byte offset of the blue channel inside a 24/32-bit pixel.
pub const BLUE_INDEX: usize = 0;
/// Byte offset of the green channel inside a 24/32-bit pixel.
pub const GREEN_INDEX: usize = 1;
/// Byte offset of the red channel inside a 24/32-bit pixel.
pub const RED_INDEX: usize = 2;
/// Byte offset of the alpha channel inside a 32-bit pixel.
pub const ALPHA_INDEX: usize = 3;

/// Pixel format of an [`Image`](crate::Image).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// 8-bit grayscale
    Grayscale8,
    /// 24-bit color, BGR in memory
    Rgb24,
    /// 32-bit color with alpha, BGRA in memory
    Rgba32,
    /// 1-bit binary, packed MSB first
    Binary1,
    /// 32-bit float grayscale (native endian), used as scratch storage
    GrayscaleFloat32,
}

impl PixelFormat {
    /// Bytes occupied by one pixel.
    ///
    /// `Binary1` reports 1 even though eight pixels share a byte; use
    /// [`PixelFormat::line_size`] for row lengths.
    #[inline]
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Grayscale8 | PixelFormat::Binary1 => 1,
            PixelFormat::Rgb24 => 3,
            PixelFormat::Rgba32 | PixelFormat::GrayscaleFloat32 => 4,
        }
    }

    /// Bits occupied by one pixel.
    #[inline]
    pub fn bits_per_pixel(self) -> usize {
        match self {
            PixelFormat::Binary1 => 1,
            other => other.bytes_per_pixel() * 8,
        }
    }

    /// Minimal number of bytes needed to hold `width` pixels.
    #[inline]
    pub fn line_size(self, width: u32) -> usize {
        match self {
            PixelFormat::Binary1 => (width as usize).div_ceil(8),
            other => width as usize * other.bytes_per_pixel(),
        }
    }

    /// Whether pixels carry red, green and blue channels.
    #[inline]
    pub fn is_color(self) -> bool {
        matches!(self, PixelFormat::Rgb24 | PixelFormat::Rgba32)
    }

    /// Whether the format has an alpha channel.
    #[inline]
    pub fn has_alpha(self) -> bool {
        self == PixelFormat::Rgba32
    }

    /// Number of 8-bit color planes (excluding alpha) for the byte formats.
    #[inline]
    pub fn color_planes(self) -> usize {
        match self {
            PixelFormat::Rgb24 | PixelFormat::Rgba32 => 3,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_size() {
        assert_eq!(PixelFormat::Grayscale8.line_size(10), 10);
        assert_eq!(PixelFormat::Rgb24.line_size(10), 30);
        assert_eq!(PixelFormat::Rgba32.line_size(10), 40);
        assert_eq!(PixelFormat::GrayscaleFloat32.line_size(10), 40);
        assert_eq!(PixelFormat::Binary1.line_size(10), 2);
        assert_eq!(PixelFormat::Binary1.line_size(16), 2);
    }

    #[test]
    fn test_channel_layout() {
        // BGR in memory
        assert!(BLUE_INDEX < GREEN_INDEX && GREEN_INDEX < RED_INDEX);
        assert_eq!(ALPHA_INDEX, 3);
        assert_eq!(PixelFormat::Binary1.bits_per_pixel(), 1);
        assert_eq!(PixelFormat::Rgb24.bits_per_pixel(), 24);
    }
}
