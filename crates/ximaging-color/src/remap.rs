//! Lookup-table remapping

use tracing::trace;
use ximaging_core::check::{COLOR_FORMATS, check_format, check_same_size};
use ximaging_core::parallel::for_each_row;
use ximaging_core::{ALPHA_INDEX, BLUE_INDEX, GREEN_INDEX, Image, PixelFormat, RED_INDEX};

use crate::{ColorMaps, ColorResult};

/// Replace every RGB component by its entry in the channel's table. Alpha
/// is left alone.
pub fn color_remapping(
    image: &mut Image,
    red: &[u8; 256],
    green: &[u8; 256],
    blue: &[u8; 256],
) -> ColorResult<()> {
    check_format(image, COLOR_FORMATS)?;
    trace!(w = image.width(), h = image.height(), "color_remapping");
    let bpp = image.bytes_per_pixel();
    for_each_row(image, |_, row| {
        for px in row.chunks_exact_mut(bpp) {
            px[RED_INDEX] = red[px[RED_INDEX] as usize];
            px[GREEN_INDEX] = green[px[GREEN_INDEX] as usize];
            px[BLUE_INDEX] = blue[px[BLUE_INDEX] as usize];
        }
    });
    Ok(())
}

/// Remap a Grayscale8 image through `map`.
pub fn grayscale_remapping(image: &mut Image, map: &[u8; 256]) -> ColorResult<()> {
    check_format(image, &[PixelFormat::Grayscale8])?;
    trace!(w = image.width(), h = image.height(), "grayscale_remapping");
    for_each_row(image, |_, row| {
        for v in row.iter_mut() {
            *v = map[*v as usize];
        }
    });
    Ok(())
}

/// Pseudo-color a Grayscale8 image: destination pixel gets
/// `(maps.red[v], maps.green[v], maps.blue[v])` for source value `v`.
///
/// `dst` is RGB24 or RGBA32 of the source size; RGBA output is opaque.
pub fn grayscale_remapping_to_rgb(src: &Image, dst: &mut Image, maps: &ColorMaps) -> ColorResult<()> {
    check_format(src, &[PixelFormat::Grayscale8])?;
    check_format(dst, COLOR_FORMATS)?;
    check_same_size(src, dst)?;
    trace!(w = src.width(), h = src.height(), "grayscale_remapping_to_rgb");
    let bpp = dst.bytes_per_pixel();
    for_each_row(dst, |y, row| {
        for (px, &v) in row.chunks_exact_mut(bpp).zip(src.row(y)) {
            let v = v as usize;
            px[RED_INDEX] = maps.red[v];
            px[GREEN_INDEX] = maps.green[v];
            px[BLUE_INDEX] = maps.blue[v];
            if bpp == 4 {
                px[ALPHA_INDEX] = 255;
            }
        }
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ximaging_core::Rgba;

    use crate::gradient::{linear_map, two_color_gradient};

    #[test]
    fn test_color_remapping_inverts_red_only() {
        let mut image = Image::filled(2, 2, PixelFormat::Rgba32, Rgba::new(10, 20, 30, 40)).unwrap();
        let identity = ColorMaps::identity();
        let invert = linear_map((0, 255), (255, 0)).unwrap();
        color_remapping(&mut image, &invert, &identity.green, &identity.blue).unwrap();
        assert_eq!(image.pixel(1, 1), Some(Rgba::new(245, 20, 30, 40)));
    }

    #[test]
    fn test_grayscale_remapping() {
        let mut image = Image::filled(3, 1, PixelFormat::Grayscale8, Rgba::gray(100)).unwrap();
        let map = linear_map((0, 200), (0, 100)).unwrap();
        grayscale_remapping(&mut image, &map).unwrap();
        assert_eq!(image.row(0), &[50, 50, 50]);
        let mut rgb = Image::new(1, 1, PixelFormat::Rgb24).unwrap();
        assert!(grayscale_remapping(&mut rgb, &map).is_err());
    }

    #[test]
    fn test_pseudo_color() {
        let mut src = Image::new(2, 1, PixelFormat::Grayscale8).unwrap();
        src.row_mut(0).copy_from_slice(&[0, 255]);
        let mut dst = Image::new(2, 1, PixelFormat::Rgba32).unwrap();
        let maps = two_color_gradient(Rgba::RED, Rgba::BLUE);
        grayscale_remapping_to_rgb(&src, &mut dst, &maps).unwrap();
        assert_eq!(dst.pixel(0, 0), Some(Rgba::RED));
        assert_eq!(dst.pixel(1, 0), Some(Rgba::BLUE));
    }
}
