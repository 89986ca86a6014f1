//! Image blending and masking
//!
//! - Blend modes (Multiply, Screen, Overlay, Color Dodge/Burn, ...) applied
//!   byte by byte, alpha plane included
//! - Mask driven compositing where an 8-bit grayscale mask supplies the
//!   blend coefficient `mask / 255`

use tracing::trace;

use super::Image;
use crate::check::{BYTE_FORMATS, check_format, check_images, check_same_size};
use crate::color::Rgba;
use crate::error::Result;
use crate::format::PixelFormat;
use crate::parallel::for_each_row;

/// Blend mode for compositing operations
///
/// `a` is the base image byte, `b` the overlay byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendMode {
    /// `a * b / 255`
    Multiply,
    /// `255 - (255 - a) * (255 - b) / 255`
    Screen,
    /// Multiply for dark base values, Screen for bright ones
    Overlay,
    /// `a * 255 / (255 - b)`
    ColorDodge,
    /// `255 - (255 - a) * 255 / b`
    ColorBurn,
    /// `max(a, b)`
    Lighten,
    /// `min(a, b)`
    Darken,
    /// `|a - b|`
    Difference,
}

impl BlendMode {
    /// Blend one byte.
    #[inline]
    pub fn apply(self, a: u8, b: u8) -> u8 {
        let (a32, b32) = (a as u32, b as u32);
        match self {
            BlendMode::Multiply => (a32 * b32 / 255) as u8,
            BlendMode::Screen => (255 - (255 - a32) * (255 - b32) / 255) as u8,
            BlendMode::Overlay => {
                if a32 < 128 {
                    (2 * a32 * b32 / 255) as u8
                } else {
                    (255 - 2 * (255 - a32) * (255 - b32) / 255) as u8
                }
            }
            BlendMode::ColorDodge => {
                if b32 == 255 {
                    255
                } else {
                    (a32 * 255 / (255 - b32)).min(255) as u8
                }
            }
            BlendMode::ColorBurn => {
                if b32 == 0 {
                    0
                } else {
                    (255 - ((255 - a32) * 255 / b32).min(255)) as u8
                }
            }
            BlendMode::Lighten => a.max(b),
            BlendMode::Darken => a.min(b),
            BlendMode::Difference => a.abs_diff(b),
        }
    }
}

/// Blend `overlay` onto `image` with the given mode.
pub fn blend_images(image: &mut Image, overlay: &Image, mode: BlendMode) -> Result<()> {
    check_images(image, overlay, BYTE_FORMATS)?;
    trace!(width = image.width(), height = image.height(), ?mode, "blend_images");
    for_each_row(image, |y, row| {
        for (a, &b) in row.iter_mut().zip(overlay.row(y)) {
            *a = mode.apply(*a, b);
        }
    });
    Ok(())
}

#[inline]
pub(crate) fn mix(v: u8, fill: u8, m: u32) -> u8 {
    ((v as u32 * m + fill as u32 * (255 - m) + 127) / 255) as u8
}

fn check_mask(image: &Image, mask: &Image) -> Result<()> {
    check_format(image, BYTE_FORMATS)?;
    check_format(mask, &[PixelFormat::Grayscale8])?;
    check_same_size(image, mask)
}

/// Keep `image` where the mask is 255, replace it by `fill` where the mask is
/// 0, and mix linearly in between.
///
/// `fill` is converted with [`Rgba::format_bytes`]; RGBA alpha is mixed too.
pub fn mask_image(image: &mut Image, mask: &Image, fill: Rgba) -> Result<()> {
    check_mask(image, mask)?;
    trace!(width = image.width(), height = image.height(), "mask_image");
    let bpp = image.bytes_per_pixel();
    let fill = fill.format_bytes(image.format());
    for_each_row(image, |y, row| {
        for (px, &m) in row.chunks_exact_mut(bpp).zip(mask.row(y)) {
            for (v, &f) in px.iter_mut().zip(&fill) {
                *v = mix(*v, f, m as u32);
            }
        }
    });
    Ok(())
}

/// Paint `color` through the mask.
///
/// The blend coefficient of a pixel is `mask / 255 * color.a / 255`.
/// Alpha of RGBA images is left unchanged; grayscale images receive the
/// color's luma.
pub fn masked_fill(image: &mut Image, mask: &Image, color: Rgba) -> Result<()> {
    check_mask(image, mask)?;
    trace!(width = image.width(), height = image.height(), "masked_fill");
    let bpp = image.bytes_per_pixel();
    let planes = image.format().color_planes();
    let mut target = Rgba::rgb(color.r, color.g, color.b).format_bytes(image.format());
    if planes == 1 {
        target[0] = color.to_gray();
    }
    let alpha = color.a as u32;
    for_each_row(image, |y, row| {
        for (px, &m) in row.chunks_exact_mut(bpp).zip(mask.row(y)) {
            // coefficient scaled to 0..=255
            let k = m as u32 * alpha / 255;
            for (v, &t) in px[..planes].iter_mut().zip(&target) {
                *v = mix(t, *v, k);
            }
        }
    });
    Ok(())
}

/// Blend `fill_image` into `image` through the mask: mask 255 takes the
/// fill image, 0 keeps `image`.
pub fn masked_image_fill(image: &mut Image, mask: &Image, fill_image: &Image) -> Result<()> {
    check_mask(image, mask)?;
    check_images(image, fill_image, BYTE_FORMATS)?;
    trace!(width = image.width(), height = image.height(), "masked_image_fill");
    let bpp = image.bytes_per_pixel();
    for_each_row(image, |y, row| {
        let fill_row = fill_image.row(y);
        for ((px, &m), fill) in row
            .chunks_exact_mut(bpp)
            .zip(mask.row(y))
            .zip(fill_row.chunks_exact(bpp))
        {
            for (v, &f) in px.iter_mut().zip(fill) {
                *v = mix(f, *v, m as u32);
            }
        }
    });
    Ok(())
}
