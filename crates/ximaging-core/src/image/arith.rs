//! Two-image arithmetic
//!
//! All operations take an image that is modified in place and a second
//! operand with identical width, height and format. Formats: Grayscale8,
//! RGB24 and RGBA32. Values are processed byte by byte over every plane,
//! alpha included.

use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::trace;

use super::Image;
use crate::check::{BYTE_FORMATS, check_format, check_images, check_range, check_same_size};
use crate::color::Rgba;
use crate::error::Result;
use crate::format::PixelFormat;
use crate::parallel::for_each_row;

/// Apply `op(a, b)` to every byte of `image` and the matching byte of `other`.
fn zip_bytes<F>(image: &mut Image, other: &Image, op: F)
where
    F: Fn(u8, u8) -> u8 + Send + Sync,
{
    for_each_row(image, |y, row| {
        for (a, &b) in row.iter_mut().zip(other.row(y)) {
            *a = op(*a, b);
        }
    });
}

/// Per-byte maximum of two images, stored in `image`.
pub fn merge_images(image: &mut Image, other: &Image) -> Result<()> {
    check_images(image, other, BYTE_FORMATS)?;
    trace!(width = image.width(), height = image.height(), "merge_images");
    zip_bytes(image, other, u8::max);
    Ok(())
}

/// Per-byte minimum of two images, stored in `image`.
pub fn intersect_images(image: &mut Image, other: &Image) -> Result<()> {
    check_images(image, other, BYTE_FORMATS)?;
    trace!(width = image.width(), height = image.height(), "intersect_images");
    zip_bytes(image, other, u8::min);
    Ok(())
}

/// Move every byte of `image` towards `other` by at most `step`.
pub fn move_towards_images(image: &mut Image, other: &Image, step: u8) -> Result<()> {
    check_images(image, other, BYTE_FORMATS)?;
    trace!(width = image.width(), height = image.height(), step, "move_towards_images");
    zip_bytes(image, other, move |a, b| {
        if a < b {
            a + step.min(b - a)
        } else {
            a - step.min(a - b)
        }
    });
    Ok(())
}

/// Linear blend `image + (other - image) * factor`, rounded.
///
/// # Errors
///
/// Returns [`crate::Error::ArgumentOutOfRange`] if `factor` is outside [0, 1].
pub fn fade_images(image: &mut Image, other: &Image, factor: f32) -> Result<()> {
    check_images(image, other, BYTE_FORMATS)?;
    check_range("factor", factor, 0.0, 1.0)?;
    trace!(width = image.width(), height = image.height(), factor, "fade_images");
    zip_bytes(image, other, move |a, b| {
        let a = a as f32;
        (a + (b as f32 - a) * factor).round() as u8
    });
    Ok(())
}

/// Saturating `image + other * factor`.
///
/// # Errors
///
/// Returns [`crate::Error::ArgumentOutOfRange`] if `factor` is outside [0, 1].
pub fn add_images(image: &mut Image, other: &Image, factor: f32) -> Result<()> {
    check_images(image, other, BYTE_FORMATS)?;
    check_range("factor", factor, 0.0, 1.0)?;
    trace!(width = image.width(), height = image.height(), factor, "add_images");
    zip_bytes(image, other, move |a, b| {
        (a as f32 + b as f32 * factor).round().min(255.0) as u8
    });
    Ok(())
}

/// Saturating `image - other * factor`.
///
/// # Errors
///
/// Returns [`crate::Error::ArgumentOutOfRange`] if `factor` is outside [0, 1].
pub fn subtract_images(image: &mut Image, other: &Image, factor: f32) -> Result<()> {
    check_images(image, other, BYTE_FORMATS)?;
    check_range("factor", factor, 0.0, 1.0)?;
    trace!(width = image.width(), height = image.height(), factor, "subtract_images");
    zip_bytes(image, other, move |a, b| {
        (a as f32 - b as f32 * factor).round().max(0.0) as u8
    });
    Ok(())
}

/// Absolute per-byte difference, stored in `image`.
pub fn diff_images(image: &mut Image, other: &Image) -> Result<()> {
    check_images(image, other, BYTE_FORMATS)?;
    trace!(width = image.width(), height = image.height(), "diff_images");
    zip_bytes(image, other, |a, b| a.abs_diff(b));
    Ok(())
}

/// Binarize the difference of two images.
///
/// The per-pixel difference is `|a - b|` for grayscale and
/// `|dr| + |dg| + |db|` for color images (alpha ignored). Pixels whose
/// difference is strictly greater than `threshold` are set to `hi` in `dst`,
/// all others to `lo`. `dst` must have the size of the inputs and may use
/// any 8-bit format.
///
/// Returns the number of `hi` pixels.
pub fn diff_images_thresholded(
    a: &Image,
    b: &Image,
    dst: &mut Image,
    threshold: u32,
    hi: Rgba,
    lo: Rgba,
) -> Result<usize> {
    check_images(a, b, BYTE_FORMATS)?;
    check_format(dst, BYTE_FORMATS)?;
    check_same_size(a, dst)?;
    trace!(width = a.width(), height = a.height(), threshold, "diff_images_thresholded");

    let src_bpp = a.bytes_per_pixel();
    let dst_bpp = dst.bytes_per_pixel();
    let hi = hi.format_bytes(dst.format());
    let lo = lo.format_bytes(dst.format());
    let color = a.format() != PixelFormat::Grayscale8;
    let count = AtomicUsize::new(0);

    for_each_row(dst, |y, row| {
        let mut hits = 0usize;
        let pa = a.row(y).chunks_exact(src_bpp);
        let pb = b.row(y).chunks_exact(src_bpp);
        for ((out, pa), pb) in row.chunks_exact_mut(dst_bpp).zip(pa).zip(pb) {
            let diff: u32 = if color {
                (0..3).map(|i| pa[i].abs_diff(pb[i]) as u32).sum()
            } else {
                pa[0].abs_diff(pb[0]) as u32
            };
            if diff > threshold {
                out.copy_from_slice(&hi[..dst_bpp]);
                hits += 1;
            } else {
                out.copy_from_slice(&lo[..dst_bpp]);
            }
        }
        count.fetch_add(hits, Ordering::Relaxed);
    });

    Ok(count.into_inner())
}
