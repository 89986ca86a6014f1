//! Drawing primitives
//!
//! Shapes are rasterized into points or horizontal spans, then rendered
//! through a [`Canvas`] that clips to the image and either writes the color
//! (`draw_*` / `fill_*`) or alpha-blends it (`blend_*`).
//!
//! Supported formats: Grayscale8, RGB24, RGBA32.
//!
//! - [`line`] - Bresenham lines
//! - [`rect`] - rectangles
//! - [`ellipse`] - midpoint circles, ellipses and rings
//! - [`pie`] - pie slices
//! - [`polygon`] - convex polygon fill
//! - [`overlay`] - drawing one image onto another

pub mod ellipse;
pub mod line;
pub mod overlay;
pub mod pie;
pub mod polygon;
pub mod rect;

pub use ellipse::{
    blend_circle, blend_ellipse, blend_ring, draw_circle, draw_ellipse, fill_circle, fill_ellipse,
};
pub use line::{blend_line, draw_line};
pub use overlay::draw_image;
pub use pie::{blend_pie, pie_buffer_size};
pub use polygon::{blend_convex_polygon, fill_convex_polygon};
pub use rect::{blend_rectangle, draw_rectangle, fill_rectangle};

use crate::check::{BYTE_FORMATS, check_format};
use crate::color::Rgba;
use crate::error::Result;
use crate::format::{ALPHA_INDEX, BLUE_INDEX, GREEN_INDEX, PixelFormat, RED_INDEX};
use crate::image::Image;
use crate::image::blend::mix;

/// Pixel operation for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Brush {
    /// Write these bytes (already converted to the image format)
    Set([u8; 4]),
    /// Alpha-blend this color
    Blend(Rgba),
}

/// Clipping render target.
pub(crate) struct Canvas<'a> {
    image: &'a mut Image,
    brush: Brush,
    bpp: usize,
}

impl<'a> Canvas<'a> {
    /// Canvas writing `color` converted with [`Rgba::format_bytes`].
    pub(crate) fn set(image: &'a mut Image, color: Rgba) -> Result<Self> {
        check_format(image, BYTE_FORMATS)?;
        let bytes = color.format_bytes(image.format());
        Ok(Self::with_brush(image, Brush::Set(bytes)))
    }

    /// Canvas blending `color` with its alpha.
    pub(crate) fn blend(image: &'a mut Image, color: Rgba) -> Result<Self> {
        check_format(image, BYTE_FORMATS)?;
        Ok(Self::with_brush(image, Brush::Blend(color)))
    }

    fn with_brush(image: &'a mut Image, brush: Brush) -> Self {
        let bpp = image.bytes_per_pixel();
        Self { image, brush, bpp }
    }

    #[inline]
    pub(crate) fn width(&self) -> i32 {
        self.image.width() as i32
    }

    #[inline]
    pub(crate) fn height(&self) -> i32 {
        self.image.height() as i32
    }

    /// Render one pixel; points outside the image are ignored.
    pub(crate) fn plot(&mut self, x: i32, y: i32) {
        if x < 0 || y < 0 || x >= self.width() || y >= self.height() {
            return;
        }
        self.hline(x, x, y);
    }

    /// Render the inclusive span `x1..=x2` of row `y`, clipped.
    pub(crate) fn hline(&mut self, x1: i32, x2: i32, y: i32) {
        if y < 0 || y >= self.height() {
            return;
        }
        let (x1, x2) = (x1.min(x2).max(0), x1.max(x2).min(self.width() - 1));
        if x1 > x2 {
            return;
        }
        let bpp = self.bpp;
        let format = self.image.format();
        let brush = self.brush;
        let row = self.image.row_mut(y as u32);
        for px in row[x1 as usize * bpp..(x2 as usize + 1) * bpp].chunks_exact_mut(bpp) {
            match brush {
                Brush::Set(bytes) => px.copy_from_slice(&bytes[..bpp]),
                Brush::Blend(color) => blend_pixel(px, color, format),
            }
        }
    }
}

/// Alpha-blend `color` onto one pixel of `format`.
///
/// RGBA targets accumulate alpha with the "over" rule.
pub(crate) fn blend_pixel(px: &mut [u8], color: Rgba, format: PixelFormat) {
    let a = color.a as u32;
    match format {
        PixelFormat::Grayscale8 => px[0] = mix(color.to_gray(), px[0], a),
        _ => {
            px[RED_INDEX] = mix(color.r, px[RED_INDEX], a);
            px[GREEN_INDEX] = mix(color.g, px[GREEN_INDEX], a);
            px[BLUE_INDEX] = mix(color.b, px[BLUE_INDEX], a);
            if format.has_alpha() {
                px[ALPHA_INDEX] = (a + px[ALPHA_INDEX] as u32 * (255 - a) / 255) as u8;
            }
        }
    }
}
