//! Image - the pixel buffer every kernel operates on
//!
//! # Memory layout
//!
//! - Rows are `stride` bytes apart; `stride` may exceed the minimal line
//!   size to allow alignment padding
//! - Pixel `(x, y)` of a byte format starts at `y * stride + x * bpp`
//! - Color channels are BGR(A) in memory, see [`crate::format`]
//! - `Binary1` rows are packed MSB first
//!
//! # Ownership model
//!
//! The caller owns every `Image`. Kernels borrow their inputs (`&Image`) and
//! outputs (`&mut Image`) and never resize or reallocate them.

mod access;
pub mod arith;
pub mod blend;

pub(crate) use access::read_rgba;
pub use access::{get_bit, get_f32, set_bit, set_f32};

pub use arith::{
    add_images, diff_images, diff_images_thresholded, fade_images, intersect_images,
    merge_images, move_towards_images, subtract_images,
};
pub use blend::{BlendMode, blend_images, mask_image, masked_fill, masked_image_fill};

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::format::PixelFormat;

/// Raw pixel buffer.
///
/// # Examples
///
/// ```
/// use ximaging_core::{Image, PixelFormat};
///
/// let image = Image::new(640, 480, PixelFormat::Rgb24).unwrap();
/// assert_eq!(image.width(), 640);
/// assert_eq!(image.stride(), 640 * 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    stride: usize,
    format: PixelFormat,
    data: Vec<u8>,
}

impl Image {
    /// Create a zero-initialized image with the minimal stride.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidImageSize`] if width or height is 0.
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Result<Self> {
        Self::with_stride(width, height, format.line_size(width), format)
    }

    /// Create a zero-initialized image with an explicit row stride.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidImageSize`] if width or height is 0 or the
    /// buffer size overflows, and [`Error::InvalidArgument`] if `stride` is
    /// smaller than the line size of `width` pixels.
    pub fn with_stride(width: u32, height: u32, stride: usize, format: PixelFormat) -> Result<Self> {
        let size = Self::buffer_size(width, height, stride, format)?;
        let mut data = Vec::new();
        data.try_reserve_exact(size).map_err(|_| Error::OutOfMemory)?;
        data.resize(size, 0);
        Ok(Self {
            width,
            height,
            stride,
            format,
            data,
        })
    }

    /// Wrap an existing buffer.
    ///
    /// # Errors
    ///
    /// Same as [`Image::with_stride`], plus
    /// [`Error::ImageParametersMismatch`] if `data.len() != stride * height`.
    pub fn from_raw(
        width: u32,
        height: u32,
        stride: usize,
        format: PixelFormat,
        data: Vec<u8>,
    ) -> Result<Self> {
        let size = Self::buffer_size(width, height, stride, format)?;
        if data.len() != size {
            return Err(Error::ImageParametersMismatch(format!(
                "buffer holds {} bytes, {}x{} with stride {} needs {}",
                data.len(),
                width,
                height,
                stride,
                size
            )));
        }
        Ok(Self {
            width,
            height,
            stride,
            format,
            data,
        })
    }

    /// Create an image filled with `color`.
    pub fn filled(width: u32, height: u32, format: PixelFormat, color: Rgba) -> Result<Self> {
        let mut image = Self::new(width, height, format)?;
        image.fill(color);
        Ok(image)
    }

    fn buffer_size(width: u32, height: u32, stride: usize, format: PixelFormat) -> Result<usize> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidImageSize { width, height });
        }
        let line = format.line_size(width);
        if stride < line {
            return Err(Error::InvalidArgument(format!(
                "stride {stride} is smaller than line size {line}"
            )));
        }
        stride
            .checked_mul(height as usize)
            .ok_or(Error::InvalidImageSize { width, height })
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes between the starts of consecutive rows.
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Pixel format.
    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Bytes per pixel of the image format.
    #[inline]
    pub fn bytes_per_pixel(&self) -> usize {
        self.format.bytes_per_pixel()
    }

    /// Bytes of pixel data in one row (padding excluded).
    #[inline]
    pub fn line_size(&self) -> usize {
        self.format.line_size(self.width)
    }

    /// Raw buffer, padding included.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw buffer, padding included.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Give up the image and return its buffer.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Pixel bytes of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        let start = y as usize * self.stride;
        &self.data[start..start + self.line_size()]
    }

    /// Mutable pixel bytes of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let start = y as usize * self.stride;
        let line = self.line_size();
        &mut self.data[start..start + line]
    }

    /// Buffer, stride and line size for the row iteration helpers.
    #[inline]
    pub(crate) fn raw_parts_mut(&mut self) -> (&mut [u8], usize, usize) {
        let line = self.line_size();
        (&mut self.data, self.stride, line)
    }

    /// Check if two images have the same width, height and format.
    pub fn same_params(&self, other: &Image) -> bool {
        self.width == other.width && self.height == other.height && self.format == other.format
    }

    /// Check if two images have the same width and height.
    pub fn same_size(&self, other: &Image) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Fill every pixel with `color` (see [`Rgba::format_bytes`]).
    pub fn fill(&mut self, color: Rgba) {
        match self.format {
            PixelFormat::Binary1 => {
                let byte = if color.premultiplied().to_gray() >= 128 {
                    0xff
                } else {
                    0
                };
                for y in 0..self.height {
                    self.row_mut(y).fill(byte);
                }
            }
            PixelFormat::GrayscaleFloat32 => {
                let v = (color.premultiplied().to_gray() as f32).to_ne_bytes();
                for y in 0..self.height {
                    for px in self.row_mut(y).chunks_exact_mut(4) {
                        px.copy_from_slice(&v);
                    }
                }
            }
            format => {
                let bpp = format.bytes_per_pixel();
                let bytes = color.format_bytes(format);
                for y in 0..self.height {
                    for px in self.row_mut(y).chunks_exact_mut(bpp) {
                        px.copy_from_slice(&bytes[..bpp]);
                    }
                }
            }
        }
    }

    /// Copy the pixel data of `src` into this image.
    ///
    /// Strides may differ; only the pixel bytes of each row are copied.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ImageParametersMismatch`] if the images differ in
    /// width, height or format.
    pub fn copy_from(&mut self, src: &Image) -> Result<()> {
        if !self.same_params(src) {
            return Err(Error::ImageParametersMismatch(format!(
                "copy from {}x{} {:?} into {}x{} {:?}",
                src.width, src.height, src.format, self.width, self.height, self.format
            )));
        }
        for y in 0..self.height {
            self.row_mut(y).copy_from_slice(src.row(y));
        }
        Ok(())
    }

    /// Create an image of the same size and format with zeroed pixels.
    pub fn create_template(&self) -> Self {
        Self {
            width: self.width,
            height: self.height,
            stride: self.stride,
            format: self.format,
            data: vec![0u8; self.data.len()],
        }
    }

    /// Compare pixel data, ignoring row padding.
    pub fn pixels_equal(&self, other: &Image) -> bool {
        self.same_params(other) && (0..self.height).all(|y| self.row(y) == other.row(y))
    }
}
