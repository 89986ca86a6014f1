//! In-place mirroring

use tracing::trace;
use ximaging_core::Image;
use ximaging_core::check::check_format;
use ximaging_core::parallel::for_each_row;

use crate::{SAMPLE_FORMATS, TransformResult};

/// Mirror `image` in place.
///
/// `horizontal` reverses every row (left becomes right), `vertical` reverses
/// the row order (top becomes bottom). Both together equal a 180 degree
/// rotation; with both flags false the image is unchanged.
pub fn mirror(image: &mut Image, horizontal: bool, vertical: bool) -> TransformResult<()> {
    check_format(image, SAMPLE_FORMATS)?;
    trace!(w = image.width(), h = image.height(), horizontal, vertical, "mirror");

    if horizontal {
        let bpp = image.bytes_per_pixel();
        let w = image.width() as usize;
        for_each_row(image, |_, row| {
            for x in 0..w / 2 {
                let (left, right) = row.split_at_mut((w - 1 - x) * bpp);
                left[x * bpp..][..bpp].swap_with_slice(&mut right[..bpp]);
            }
        });
    }

    if vertical {
        let h = image.height() as usize;
        let stride = image.stride();
        let line = image.line_size();
        let data = image.data_mut();
        for y in 0..h / 2 {
            let (top, bottom) = data.split_at_mut((h - 1 - y) * stride);
            top[y * stride..][..line].swap_with_slice(&mut bottom[..line]);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ximaging_core::{PixelFormat, Rgba};

    fn sample() -> Image {
        let mut image = Image::with_stride(3, 3, 12, PixelFormat::Rgb24).unwrap();
        image.set_pixel(0, 0, Rgba::RED).unwrap();
        image.set_pixel(2, 2, Rgba::BLUE).unwrap();
        image
    }

    #[test]
    fn test_horizontal() {
        let mut image = sample();
        mirror(&mut image, true, false).unwrap();
        assert_eq!(image.pixel(2, 0), Some(Rgba::RED));
        assert_eq!(image.pixel(0, 2), Some(Rgba::BLUE));
        assert_eq!(image.pixel(0, 0), Some(Rgba::BLACK));
    }

    #[test]
    fn test_vertical() {
        let mut image = sample();
        mirror(&mut image, false, true).unwrap();
        assert_eq!(image.pixel(0, 2), Some(Rgba::RED));
        assert_eq!(image.pixel(2, 0), Some(Rgba::BLUE));
    }

    #[test]
    fn test_no_flags_is_identity() {
        let mut image = sample();
        mirror(&mut image, false, false).unwrap();
        assert_eq!(image, sample());
    }

    #[test]
    fn test_both_twice_is_identity() {
        let original = sample();
        let mut image = original.clone();
        mirror(&mut image, true, true).unwrap();
        assert_eq!(image.pixel(2, 2), Some(Rgba::RED));
        mirror(&mut image, true, true).unwrap();
        assert_eq!(image, original);
    }
}
