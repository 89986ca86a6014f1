//! Tone and channel operations
//!
//! - [`make_sepia`], [`set_hue`], [`rotate_rgb_channels`] - in-place color
//!   adjustments
//! - [`to_grayscale`] / [`grayscale_to_rgb`] - format conversion
//! - [`invert`], [`threshold`] - per-byte mapping
//! - [`extract_channel`] / [`replace_channel`] - single channel access

use tracing::trace;
use ximaging_core::check::{BYTE_FORMATS, COLOR_FORMATS, check_format, check_range, check_same_size};
use ximaging_core::parallel::for_each_row;
use ximaging_core::{
    ALPHA_INDEX, BLUE_INDEX, Channel, Error, GREEN_INDEX, Hsv, Image, PixelFormat, RED_INDEX,
    hsv_to_rgb, luma, rgb_to_hsv,
};

use crate::ColorResult;

/// Apply `f` to the RGB components of every pixel of a color image.
fn map_rgb<F>(image: &mut Image, f: F)
where
    F: Fn(u8, u8, u8) -> (u8, u8, u8) + Send + Sync,
{
    let bpp = image.bytes_per_pixel();
    for_each_row(image, |_, row| {
        for px in row.chunks_exact_mut(bpp) {
            let (r, g, b) = f(px[RED_INDEX], px[GREEN_INDEX], px[BLUE_INDEX]);
            px[RED_INDEX] = r;
            px[GREEN_INDEX] = g;
            px[BLUE_INDEX] = b;
        }
    });
}

/// Sepia toning.
///
/// Luma `0.299 R + 0.587 G + 0.114 B` (rounded) becomes
/// `(luma + 49, luma - 14, luma - 56)`, clamped to `[0, 255]`.
pub fn make_sepia(image: &mut Image) -> ColorResult<()> {
    check_format(image, COLOR_FORMATS)?;
    trace!(w = image.width(), h = image.height(), "make_sepia");
    map_rgb(image, |r, g, b| {
        let y = (0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32).round() as i32;
        let c = |v: i32| v.clamp(0, 255) as u8;
        (c(y + 49), c(y - 14), c(y - 56))
    });
    Ok(())
}

/// Replace the hue of every pixel, keeping HSV saturation and value.
///
/// # Arguments
///
/// * `hue` - New hue in degrees, `[0, 359]`
pub fn set_hue(image: &mut Image, hue: u16) -> ColorResult<()> {
    check_format(image, COLOR_FORMATS)?;
    check_range("hue", hue, 0, 359)?;
    trace!(w = image.width(), h = image.height(), hue, "set_hue");
    map_rgb(image, |r, g, b| {
        let hsv = rgb_to_hsv(r, g, b);
        hsv_to_rgb(Hsv { h: hue as f32, ..hsv })
    });
    Ok(())
}

/// Rotate the RGB channels: red takes green, green takes blue, blue takes
/// red.
pub fn rotate_rgb_channels(image: &mut Image) -> ColorResult<()> {
    check_format(image, COLOR_FORMATS)?;
    trace!(w = image.width(), h = image.height(), "rotate_rgb_channels");
    map_rgb(image, |r, g, b| (g, b, r));
    Ok(())
}

/// Convert a color image to Grayscale8 with BT.709 luma.
pub fn to_grayscale(src: &Image, dst: &mut Image) -> ColorResult<()> {
    check_format(src, COLOR_FORMATS)?;
    check_format(dst, &[PixelFormat::Grayscale8])?;
    check_same_size(src, dst)?;
    trace!(w = src.width(), h = src.height(), "to_grayscale");
    let bpp = src.bytes_per_pixel();
    for_each_row(dst, |y, row| {
        for (v, px) in row.iter_mut().zip(src.row(y).chunks_exact(bpp)) {
            *v = luma(px[RED_INDEX], px[GREEN_INDEX], px[BLUE_INDEX]);
        }
    });
    Ok(())
}

/// Replicate a Grayscale8 image into RGB24 or RGBA32 (opaque).
pub fn grayscale_to_rgb(src: &Image, dst: &mut Image) -> ColorResult<()> {
    check_format(src, &[PixelFormat::Grayscale8])?;
    check_format(dst, COLOR_FORMATS)?;
    check_same_size(src, dst)?;
    trace!(w = src.width(), h = src.height(), "grayscale_to_rgb");
    let bpp = dst.bytes_per_pixel();
    for_each_row(dst, |y, row| {
        for (px, &v) in row.chunks_exact_mut(bpp).zip(src.row(y)) {
            px[..3].fill(v);
            if bpp == 4 {
                px[ALPHA_INDEX] = 255;
            }
        }
    });
    Ok(())
}

/// Invert every color byte (`255 - v`). RGBA alpha is left alone.
pub fn invert(image: &mut Image) -> ColorResult<()> {
    check_format(image, BYTE_FORMATS)?;
    trace!(w = image.width(), h = image.height(), "invert");
    let bpp = image.bytes_per_pixel();
    let planes = image.format().color_planes();
    for_each_row(image, |_, row| {
        for px in row.chunks_exact_mut(bpp) {
            for v in &mut px[..planes] {
                *v = 255 - *v;
            }
        }
    });
    Ok(())
}

/// Binarize a Grayscale8 image in place: values `>= t` become 255, the rest 0.
pub fn threshold(image: &mut Image, t: u8) -> ColorResult<()> {
    check_format(image, &[PixelFormat::Grayscale8])?;
    trace!(w = image.width(), h = image.height(), t, "threshold");
    for_each_row(image, |_, row| {
        for v in row.iter_mut() {
            *v = if *v >= t { 255 } else { 0 };
        }
    });
    Ok(())
}

fn check_channel(image: &Image, channel: Channel) -> ColorResult<()> {
    if channel == Channel::Alpha && !image.format().has_alpha() {
        return Err(Error::InvalidArgument(format!(
            "{:?} image has no alpha channel",
            image.format()
        ))
        .into());
    }
    Ok(())
}

/// Copy one channel of a color image into a Grayscale8 image.
///
/// # Errors
///
/// [`ximaging_core::Error::InvalidArgument`] when asking for alpha of an
/// RGB24 image.
pub fn extract_channel(src: &Image, dst: &mut Image, channel: Channel) -> ColorResult<()> {
    check_format(src, COLOR_FORMATS)?;
    check_format(dst, &[PixelFormat::Grayscale8])?;
    check_same_size(src, dst)?;
    check_channel(src, channel)?;
    trace!(w = src.width(), h = src.height(), ?channel, "extract_channel");
    let bpp = src.bytes_per_pixel();
    let offset = channel.offset();
    for_each_row(dst, |y, row| {
        for (v, px) in row.iter_mut().zip(src.row(y).chunks_exact(bpp)) {
            *v = px[offset];
        }
    });
    Ok(())
}

/// Overwrite one channel of a color image with a Grayscale8 image.
pub fn replace_channel(image: &mut Image, channel_src: &Image, channel: Channel) -> ColorResult<()> {
    check_format(image, COLOR_FORMATS)?;
    check_format(channel_src, &[PixelFormat::Grayscale8])?;
    check_same_size(image, channel_src)?;
    check_channel(image, channel)?;
    trace!(w = image.width(), h = image.height(), ?channel, "replace_channel");
    let bpp = image.bytes_per_pixel();
    let offset = channel.offset();
    for_each_row(image, |y, row| {
        for (px, &v) in row.chunks_exact_mut(bpp).zip(channel_src.row(y)) {
            px[offset] = v;
        }
    });
    Ok(())
}
