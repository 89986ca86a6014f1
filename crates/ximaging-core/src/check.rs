//! Argument validation shared by all kernels
//!
//! Kernels validate in a fixed order before writing any pixel:
//! null parameter, pixel format, image size, destination compatibility,
//! then argument ranges.

use crate::error::{Error, Result};
use crate::format::PixelFormat;
use crate::image::Image;

/// 8-bit formats every byte-plane kernel accepts.
pub const BYTE_FORMATS: &[PixelFormat] = &[
    PixelFormat::Grayscale8,
    PixelFormat::Rgb24,
    PixelFormat::Rgba32,
];

/// Color formats.
pub const COLOR_FORMATS: &[PixelFormat] = &[PixelFormat::Rgb24, PixelFormat::Rgba32];

/// Fail with [`Error::UnsupportedPixelFormat`] unless `image` has one of `formats`.
pub fn check_format(image: &Image, formats: &[PixelFormat]) -> Result<()> {
    if formats.contains(&image.format()) {
        Ok(())
    } else {
        Err(Error::UnsupportedPixelFormat(image.format()))
    }
}

/// Fail with [`Error::ImageIsTooSmall`] if `image` is smaller than
/// `min_width x min_height`.
pub fn check_min_size(image: &Image, min_width: u32, min_height: u32) -> Result<()> {
    if image.width() < min_width || image.height() < min_height {
        return Err(Error::ImageIsTooSmall {
            width: image.width(),
            height: image.height(),
            min_width,
            min_height,
        });
    }
    Ok(())
}

/// Fail with [`Error::ImageParametersMismatch`] unless both images have the
/// same width, height and format.
pub fn check_same_params(a: &Image, b: &Image) -> Result<()> {
    if a.same_params(b) {
        Ok(())
    } else {
        Err(mismatch(a, b))
    }
}

/// Fail with [`Error::ImageParametersMismatch`] unless both images have the
/// same width and height.
pub fn check_same_size(a: &Image, b: &Image) -> Result<()> {
    if a.same_size(b) {
        Ok(())
    } else {
        Err(mismatch(a, b))
    }
}

/// Fail with [`Error::ImageParametersMismatch`] unless `dst` has the given
/// dimensions and format.
pub fn check_dst(dst: &Image, width: u32, height: u32, format: PixelFormat) -> Result<()> {
    if dst.width() != width || dst.height() != height || dst.format() != format {
        return Err(Error::ImageParametersMismatch(format!(
            "destination is {}x{} {:?}, expected {}x{} {:?}",
            dst.width(),
            dst.height(),
            dst.format(),
            width,
            height,
            format
        )));
    }
    Ok(())
}

/// Two-image contract: `a` in one of `formats`, `b` identical to `a`.
pub fn check_images(a: &Image, b: &Image, formats: &[PixelFormat]) -> Result<()> {
    check_format(a, formats)?;
    check_same_params(a, b)
}

/// Fail with [`Error::ArgumentOutOfRange`] unless `min <= value <= max`.
pub fn check_range<T>(name: &'static str, value: T, min: T, max: T) -> Result<()>
where
    T: PartialOrd + Copy + Into<f64>,
{
    // NaN fails both comparisons
    if value >= min && value <= max {
        Ok(())
    } else {
        Err(Error::out_of_range(name, value, min, max))
    }
}

fn mismatch(a: &Image, b: &Image) -> Error {
    Error::ImageParametersMismatch(format!(
        "{}x{} {:?} vs {}x{} {:?}",
        a.width(),
        a.height(),
        a.format(),
        b.width(),
        b.height(),
        b.format()
    ))
}
