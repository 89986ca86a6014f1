//! Convolution operations
//!
//! Implements image convolution with arbitrary kernels:
//!
//! - [`convolution`] - renormalized 2D correlation, taps outside the image
//!   are dropped
//! - [`separable_convolution`] - horizontal then vertical 1D pass through a
//!   float scratch image
//! - [`convolution_ex`] - explicit divisor, offset and border handling
//! - [`gaussian_blur`] / [`gaussian_sharpen`]
//!
//! All of them work on Grayscale8, RGB24 and RGBA32 images, treating every
//! byte of a pixel as an independent plane.

use tracing::{debug, trace};
use ximaging_core::check::{BYTE_FORMATS, check_dst, check_format, check_images, check_same_params};
use ximaging_core::image::{get_f32, set_f32};
use ximaging_core::parallel::for_each_row;
use ximaging_core::{ALPHA_INDEX, Error, Image, PixelFormat};

use crate::kernel::{Kernel, check_kernel_size, gaussian_blur_kernel_2d, gaussian_sharpen_kernel_2d};
use crate::{FilterError, FilterResult};

/// How [`convolution_ex`] treats taps that fall outside the source image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderMode {
    /// Use the nearest edge pixel
    #[default]
    Extend,
    /// Wrap around to the opposite edge
    Wrap,
    /// Treat outside pixels as 0
    Zero,
    /// Only compute pixels whose whole window is inside the source; the
    /// destination is `size - 1` smaller in each dimension
    Crop,
}

#[inline]
fn to_byte(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

/// Number of planes filtered; the RGBA alpha plane is skipped unless asked for.
fn filtered_planes(format: PixelFormat, process_alpha: bool) -> usize {
    let bpp = format.bytes_per_pixel();
    if format.has_alpha() && !process_alpha {
        bpp - 1
    } else {
        bpp
    }
}

/// Convolve `src` with `kernel` into `dst`.
///
/// Near the borders, taps outside the image are skipped and the result is
/// divided by the sum of the weights actually used (no division when that
/// sum is 0), so edges keep the brightness of the interior.
///
/// # Arguments
///
/// * `src` - Grayscale8, RGB24 or RGBA32 source
/// * `dst` - Destination with the same size and format
/// * `kernel` - Square kernel, centered
/// * `process_alpha` - Filter the alpha plane of RGBA images too; otherwise
///   alpha is copied
pub fn convolution(src: &Image, dst: &mut Image, kernel: &Kernel, process_alpha: bool) -> FilterResult<()> {
    check_images(src, dst, BYTE_FORMATS)?;

    let (w, h) = (src.width() as i32, src.height() as i32);
    let size = kernel.size() as i32;
    let r = size / 2;
    let bpp = src.bytes_per_pixel();
    let planes = filtered_planes(src.format(), process_alpha);
    let weights = kernel.data();
    trace!(w, h, size, process_alpha, "convolution");

    for_each_row(dst, |y, row| {
        let y = y as i32;
        let mut sums = [0f32; 4];
        for x in 0..w {
            sums.fill(0.0);
            let mut used = 0f32;
            for ky in 0..size {
                let sy = y + ky - r;
                if sy < 0 || sy >= h {
                    continue;
                }
                let src_row = src.row(sy as u32);
                for kx in 0..size {
                    let sx = x + kx - r;
                    if sx < 0 || sx >= w {
                        continue;
                    }
                    let wt = weights[(ky * size + kx) as usize];
                    let px = &src_row[sx as usize * bpp..];
                    for p in 0..planes {
                        sums[p] += wt * px[p] as f32;
                    }
                    used += wt;
                }
            }
            let out = &mut row[x as usize * bpp..][..bpp];
            for p in 0..planes {
                out[p] = to_byte(if used != 0.0 { sums[p] / used } else { sums[p] });
            }
            if planes < bpp {
                out[ALPHA_INDEX] = src.row(y as u32)[x as usize * bpp + ALPHA_INDEX];
            }
        }
    });
    Ok(())
}

/// Weighted sum of `taps` around `center` over `len` samples read by `get`,
/// normalized as described in [`separable_convolution`].
#[inline]
fn separable_tap(taps: &[f32], taps_sum: f32, center: i32, len: i32, get: impl Fn(i32) -> f32) -> f32 {
    let r = taps.len() as i32 / 2;
    let mut sum = 0f32;
    if center >= r && center + r < len {
        for (k, &wt) in taps.iter().enumerate() {
            sum += wt * get(center + k as i32 - r);
        }
        if taps_sum != 0.0 { sum / taps_sum } else { sum }
    } else {
        let mut used = 0f32;
        for (k, &wt) in taps.iter().enumerate() {
            let i = center + k as i32 - r;
            if i >= 0 && i < len {
                sum += wt * get(i);
                used += wt;
            }
        }
        if used != 0.0 { sum / used } else { sum }
    }
}

/// Convolve with a separable kernel: `h_kernel` along rows, then `v_kernel`
/// along columns.
///
/// The horizontal pass writes unrounded sums to `temp`, a GrayscaleFloat32
/// image of `width * bytes_per_pixel x height` (one float per byte of
/// `src`). The vertical pass reads it back once the horizontal pass has
/// finished. Interior samples are divided by the kernel sum (not at all for
/// zero-sum kernels), edge samples by the sum of the weights used.
///
/// # Errors
///
/// - [`ximaging_core::Error::NullParameter`] for an empty kernel
/// - [`FilterError::InvalidKernel`] for an even length or one outside `[3, 51]`
/// - [`ximaging_core::Error::ImageIsTooSmall`] when `h_kernel` is longer than
///   the width or `v_kernel` longer than the height
/// - [`ximaging_core::Error::ImageParametersMismatch`] for a `dst` or `temp`
///   of the wrong shape
pub fn separable_convolution(
    src: &Image,
    dst: &mut Image,
    temp: &mut Image,
    h_kernel: &[f32],
    v_kernel: &[f32],
) -> FilterResult<()> {
    if h_kernel.is_empty() {
        return Err(Error::NullParameter("h_kernel").into());
    }
    if v_kernel.is_empty() {
        return Err(Error::NullParameter("v_kernel").into());
    }
    check_format(src, BYTE_FORMATS)?;
    check_format(temp, &[PixelFormat::GrayscaleFloat32])?;
    check_kernel_size(h_kernel.len())?;
    check_kernel_size(v_kernel.len())?;
    if h_kernel.len() > src.width() as usize || v_kernel.len() > src.height() as usize {
        return Err(Error::ImageIsTooSmall {
            width: src.width(),
            height: src.height(),
            min_width: h_kernel.len() as u32,
            min_height: v_kernel.len() as u32,
        }
        .into());
    }
    check_same_params(src, dst)?;
    let bpp = src.bytes_per_pixel();
    check_dst(temp, src.width() * bpp as u32, src.height(), PixelFormat::GrayscaleFloat32)?;

    let (w, h) = (src.width() as i32, src.height() as i32);
    let h_sum: f32 = h_kernel.iter().sum();
    let v_sum: f32 = v_kernel.iter().sum();
    trace!(w, h, h_len = h_kernel.len(), v_len = v_kernel.len(), "separable_convolution");

    for_each_row(temp, |y, row| {
        let src_row = src.row(y);
        for x in 0..w {
            for p in 0..bpp {
                let v = separable_tap(h_kernel, h_sum, x, w, |sx| src_row[sx as usize * bpp + p] as f32);
                set_f32(row, (x as usize * bpp + p) as u32, v);
            }
        }
    });

    let temp: &Image = temp;
    for_each_row(dst, |y, row| {
        for i in 0..(w as usize * bpp) {
            let v = separable_tap(v_kernel, v_sum, y as i32, h, |sy| get_f32(temp.row(sy as u32), i as u32));
            row[i] = to_byte(v);
        }
    });
    Ok(())
}

/// Map a possibly outside coordinate according to `border`; `None` means the
/// tap contributes 0.
#[inline]
fn border_index(i: i32, len: i32, border: BorderMode) -> Option<i32> {
    if i >= 0 && i < len {
        return Some(i);
    }
    match border {
        BorderMode::Extend => Some(i.clamp(0, len - 1)),
        BorderMode::Wrap => Some(i.rem_euclid(len)),
        BorderMode::Zero | BorderMode::Crop => None,
    }
}

/// Convolve with an explicit divisor and offset.
///
/// Each output byte is `clamp(round(sum / divisor + offset))`. RGBA alpha is
/// taken from the pixel under the kernel center.
///
/// # Arguments
///
/// * `src` - Grayscale8, RGB24 or RGBA32 source
/// * `dst` - Same size and format as `src`, or `size - 1` smaller in both
///   dimensions for [`BorderMode::Crop`]
/// * `kernel` - Square kernel
/// * `divisor` - Non-zero divisor applied to the weighted sum
/// * `offset` - Added after division
/// * `border` - Handling of taps outside the source
pub fn convolution_ex(
    src: &Image,
    dst: &mut Image,
    kernel: &Kernel,
    divisor: f32,
    offset: f32,
    border: BorderMode,
) -> FilterResult<()> {
    check_format(src, BYTE_FORMATS)?;
    let size = kernel.size();
    let (dx, dy) = if border == BorderMode::Crop {
        if src.width() < size || src.height() < size {
            return Err(Error::ImageIsTooSmall {
                width: src.width(),
                height: src.height(),
                min_width: size,
                min_height: size,
            }
            .into());
        }
        check_dst(dst, src.width() - (size - 1), src.height() - (size - 1), src.format())?;
        (kernel.radius() as i32, kernel.radius() as i32)
    } else {
        check_same_params(src, dst)?;
        (0, 0)
    };
    if divisor == 0.0 || !divisor.is_finite() {
        return Err(FilterError::Core(Error::InvalidArgument(format!(
            "divisor must be finite and non-zero, got {divisor}"
        ))));
    }
    if !offset.is_finite() {
        return Err(FilterError::Core(Error::InvalidArgument(format!(
            "offset must be finite, got {offset}"
        ))));
    }

    let (w, h) = (src.width() as i32, src.height() as i32);
    let size = size as i32;
    let r = size / 2;
    let bpp = src.bytes_per_pixel();
    let planes = filtered_planes(src.format(), false);
    let out_w = dst.width() as i32;
    let weights = kernel.data();
    trace!(w, h, size, divisor, offset, ?border, "convolution_ex");

    for_each_row(dst, |y, row| {
        // center of the window in source coordinates
        let cy = y as i32 + dy;
        let mut sums = [0f32; 4];
        for x in 0..out_w {
            let cx = x + dx;
            sums.fill(0.0);
            for ky in 0..size {
                let Some(sy) = border_index(cy + ky - r, h, border) else {
                    continue;
                };
                let src_row = src.row(sy as u32);
                for kx in 0..size {
                    let Some(sx) = border_index(cx + kx - r, w, border) else {
                        continue;
                    };
                    let wt = weights[(ky * size + kx) as usize];
                    let px = &src_row[sx as usize * bpp..];
                    for p in 0..planes {
                        sums[p] += wt * px[p] as f32;
                    }
                }
            }
            let out = &mut row[x as usize * bpp..][..bpp];
            for p in 0..planes {
                out[p] = to_byte(sums[p] / divisor + offset);
            }
            if planes < bpp {
                out[ALPHA_INDEX] = src.row(cy as u32)[cx as usize * bpp + ALPHA_INDEX];
            }
        }
    });
    Ok(())
}

/// Gaussian blur.
///
/// Builds a `(2 * radius + 1)²` Gaussian kernel and runs [`convolution`]
/// with it; RGBA alpha is copied.
///
/// # Arguments
///
/// * `sigma` - Standard deviation, in `[0.1, 10]`
/// * `radius` - Kernel radius, in `[1, 10]`
pub fn gaussian_blur(src: &Image, dst: &mut Image, sigma: f32, radius: u32) -> FilterResult<()> {
    check_images(src, dst, BYTE_FORMATS)?;
    let kernel = gaussian_blur_kernel_2d(sigma, radius)?;
    debug!(sigma, radius, "gaussian_blur");
    convolution(src, dst, &kernel, false)
}

/// Gaussian sharpen; same arguments as [`gaussian_blur`].
pub fn gaussian_sharpen(src: &Image, dst: &mut Image, sigma: f32, radius: u32) -> FilterResult<()> {
    check_images(src, dst, BYTE_FORMATS)?;
    let kernel = gaussian_sharpen_kernel_2d(sigma, radius)?;
    debug!(sigma, radius, "gaussian_sharpen");
    convolution(src, dst, &kernel, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ximaging_core::Rgba;

    fn ramp(w: u32, h: u32, format: PixelFormat) -> Image {
        let mut image = Image::new(w, h, format).unwrap();
        for y in 0..h {
            for (i, v) in image.row_mut(y).iter_mut().enumerate() {
                *v = ((i as u32 * 7 + y * 13) % 256) as u8;
            }
        }
        image
    }

    #[test]
    fn test_box_on_flat_image_is_flat() {
        let src = Image::filled(6, 5, PixelFormat::Rgb24, Rgba::new(10, 200, 90, 255)).unwrap();
        let mut dst = src.create_template();
        convolution(&src, &mut dst, &Kernel::box_kernel(5).unwrap(), false).unwrap();
        assert!(dst.pixels_equal(&src));
    }

    #[test]
    fn test_delta_is_copy() {
        let src = ramp(7, 6, PixelFormat::Rgba32);
        let mut dst = src.create_template();
        convolution(&src, &mut dst, &Kernel::delta(3).unwrap(), true).unwrap();
        assert!(dst.pixels_equal(&src));
    }

    #[test]
    fn test_alpha_copied_unless_processed() {
        let mut src = Image::new(3, 3, PixelFormat::Rgba32).unwrap();
        src.set_pixel(1, 1, Rgba::new(90, 90, 90, 255)).unwrap();
        let mut dst = src.create_template();
        let kernel = Kernel::box_kernel(3).unwrap();
        convolution(&src, &mut dst, &kernel, false).unwrap();
        assert_eq!(dst.pixel(1, 1).unwrap().a, 255);
        assert_eq!(dst.pixel(0, 0).unwrap().a, 0);
        convolution(&src, &mut dst, &kernel, true).unwrap();
        // 255 / 9 at the center
        assert_eq!(dst.pixel(1, 1).unwrap().a, 28);
    }

    #[test]
    fn test_zero_sum_kernel_not_divided() {
        let src = Image::filled(4, 4, PixelFormat::Grayscale8, Rgba::gray(50)).unwrap();
        let mut dst = src.create_template();
        let kernel = Kernel::from_slice(3, &[0., 0., 0., -1., 0., 1., 0., 0., 0.]).unwrap();
        convolution(&src, &mut dst, &kernel, false).unwrap();
        // interior gradient of a flat image is 0
        assert_eq!(dst.row(1)[1], 0);
        // left edge: only the +1 tap survives, weight sum 1
        assert_eq!(dst.row(1)[0], 50);
    }

    #[test]
    fn test_separable_matches_flat() {
        let src = Image::filled(8, 6, PixelFormat::Rgba32, Rgba::new(1, 2, 3, 4)).unwrap();
        let mut dst = src.create_template();
        let mut temp = Image::new(32, 6, PixelFormat::GrayscaleFloat32).unwrap();
        let taps = [1.0, 2.0, 4.0, 2.0, 1.0];
        separable_convolution(&src, &mut dst, &mut temp, &taps, &taps[1..4]).unwrap();
        assert!(dst.pixels_equal(&src));
    }

    #[test]
    fn test_separable_validation() {
        let src = Image::new(4, 4, PixelFormat::Grayscale8).unwrap();
        let mut dst = src.create_template();
        let mut temp = Image::new(4, 4, PixelFormat::GrayscaleFloat32).unwrap();
        assert_eq!(
            separable_convolution(&src, &mut dst, &mut temp, &[], &[1.0; 3]),
            Err(FilterError::Core(Error::NullParameter("h_kernel")))
        );
        assert!(matches!(
            separable_convolution(&src, &mut dst, &mut temp, &[1.0; 5], &[1.0; 3]),
            Err(FilterError::Core(Error::ImageIsTooSmall { .. }))
        ));
        let mut bad_temp = Image::new(5, 4, PixelFormat::GrayscaleFloat32).unwrap();
        assert!(matches!(
            separable_convolution(&src, &mut dst, &mut bad_temp, &[1.0; 3], &[1.0; 3]),
            Err(FilterError::Core(Error::ImageParametersMismatch(_)))
        ));
        let mut gray_temp = Image::new(4, 4, PixelFormat::Grayscale8).unwrap();
        assert!(matches!(
            separable_convolution(&src, &mut dst, &mut gray_temp, &[1.0; 3], &[1.0; 3]),
            Err(FilterError::Core(Error::UnsupportedPixelFormat(_)))
        ));
    }

    #[test]
    fn test_ex_divisor_and_offset() {
        let src = Image::filled(5, 5, PixelFormat::Grayscale8, Rgba::gray(10)).unwrap();
        let mut dst = src.create_template();
        let kernel = Kernel::from_slice(3, &[1.0; 9]).unwrap();
        convolution_ex(&src, &mut dst, &kernel, 3.0, 5.0, BorderMode::Extend).unwrap();
        // 9 * 10 / 3 + 5
        assert_eq!(dst.row(0), &[35; 5]);
        convolution_ex(&src, &mut dst, &kernel, 3.0, 5.0, BorderMode::Zero).unwrap();
        // corner sees 4 pixels: 40 / 3 + 5 = 18.33
        assert_eq!(dst.row(0)[0], 18);
        assert_eq!(dst.row(2)[2], 35);
        assert!(matches!(
            convolution_ex(&src, &mut dst, &kernel, 0.0, 0.0, BorderMode::Extend),
            Err(FilterError::Core(Error::InvalidArgument(_)))
        ));
    }

    #[test]
    fn test_ex_wrap_and_crop() {
        let mut src = Image::new(4, 3, PixelFormat::Grayscale8).unwrap();
        src.row_mut(1).copy_from_slice(&[1, 2, 3, 4]);
        let shift_left = Kernel::from_slice(3, &[0., 0., 0., 0., 0., 1., 0., 0., 0.]).unwrap();
        let mut dst = src.create_template();
        convolution_ex(&src, &mut dst, &shift_left, 1.0, 0.0, BorderMode::Wrap).unwrap();
        assert_eq!(dst.row(1), &[2, 3, 4, 1]);

        let mut cropped = Image::new(2, 1, PixelFormat::Grayscale8).unwrap();
        convolution_ex(&src, &mut cropped, &shift_left, 1.0, 0.0, BorderMode::Crop).unwrap();
        assert_eq!(cropped.row(0), &[3, 4]);
        assert!(matches!(
            convolution_ex(&src, &mut dst, &shift_left, 1.0, 0.0, BorderMode::Crop),
            Err(FilterError::Core(Error::ImageParametersMismatch(_)))
        ));
    }

    #[test]
    fn test_gaussian_validation_order() {
        let src = Image::new(4, 4, PixelFormat::Binary1).unwrap();
        let mut dst = src.create_template();
        // format is reported before the sigma range
        assert!(matches!(
            gaussian_blur(&src, &mut dst, 0.0, 1),
            Err(FilterError::Core(Error::UnsupportedPixelFormat(_)))
        ));
    }

    #[test]
    fn test_sharpen_flat_is_flat() {
        let src = Image::filled(6, 6, PixelFormat::Grayscale8, Rgba::gray(77)).unwrap();
        let mut dst = src.create_template();
        gaussian_sharpen(&src, &mut dst, 1.0, 1).unwrap();
        assert!(dst.pixels_equal(&src));
    }
}
