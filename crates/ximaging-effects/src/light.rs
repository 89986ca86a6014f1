//! Relief lighting
//!
//! Both effects treat pixel intensity as a height field. The surface normal
//! of every interior pixel comes from Sobel-like 3x3 differences of the
//! intensity, and is lit by a directional light:
//!
//! ```text
//! N = (Nx, Ny, 2 * 255 / depth)
//! L = 255 * (cos(az) cos(el), sin(az) cos(el), sin(el))
//! shade = N . L / |N|      (0 when N . L < 0)
//! ```
//!
//! A flat neighborhood (`Nx = Ny = 0`) gets the flat shade `Lz`.
//! Intensity is the gray value, or the luma of a color pixel.

use tracing::trace;
use ximaging_core::check::{BYTE_FORMATS, check_format, check_min_size, check_range, check_same_params};
use ximaging_core::parallel::for_each_row;
use ximaging_core::{BLUE_INDEX, GREEN_INDEX, Image, RED_INDEX, luma};

use crate::EffectsResult;

/// Light source of [`emboss`] and [`drop_light`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightParams {
    /// Direction of the light in the image plane, degrees `[0, 360]`
    pub azimuth: f32,
    /// Height of the light above the image plane, degrees `[0, 90]`
    pub elevation: f32,
    /// Relief depth, `[1, 100]`; larger values give steeper relief
    pub depth: u8,
}

impl Default for LightParams {
    fn default() -> Self {
        Self {
            azimuth: 30.0,
            elevation: 45.0,
            depth: 10,
        }
    }
}

impl LightParams {
    fn validate(&self) -> EffectsResult<()> {
        check_range("azimuth", self.azimuth, 0.0, 360.0)?;
        check_range("elevation", self.elevation, 0.0, 90.0)?;
        check_range("depth", self.depth, 1, 100)?;
        Ok(())
    }
}

/// Precomputed light vector and normal z component
#[derive(Debug, Clone, Copy)]
struct Light {
    lx: f64,
    ly: f64,
    lz: f64,
    nz: f64,
}

impl Light {
    fn new(params: &LightParams) -> Self {
        let az = (params.azimuth as f64).to_radians();
        let el = (params.elevation as f64).to_radians();
        Self {
            lx: az.cos() * el.cos() * 255.0,
            ly: az.sin() * el.cos() * 255.0,
            lz: el.sin() * 255.0,
            nz: 2.0 * 255.0 / params.depth as f64,
        }
    }

    fn flat_shade(&self) -> f64 {
        self.lz
    }

    fn shade(&self, nx: f64, ny: f64) -> f64 {
        if nx == 0.0 && ny == 0.0 {
            return self.flat_shade();
        }
        let dot = nx * self.lx + ny * self.ly + self.nz * self.lz;
        if dot < 0.0 {
            0.0
        } else {
            dot / (nx * nx + ny * ny + self.nz * self.nz).sqrt()
        }
    }
}

/// Intensity of every pixel, row-major without padding.
fn intensity_map(src: &Image) -> Vec<i32> {
    let bpp = src.bytes_per_pixel();
    let mut map = Vec::with_capacity(src.width() as usize * src.height() as usize);
    for y in 0..src.height() {
        let row = src.row(y);
        if bpp == 1 {
            map.extend(row.iter().map(|&v| v as i32));
        } else {
            map.extend(
                row.chunks_exact(bpp)
                    .map(|px| luma(px[RED_INDEX], px[GREEN_INDEX], px[BLUE_INDEX]) as i32),
            );
        }
    }
    map
}

/// Sobel-like normal components at interior pixel `(x, y)`.
///
/// `Nx` is left minus right, `Ny` is bottom minus top.
fn normal(map: &[i32], w: usize, x: usize, y: usize) -> (f64, f64) {
    let at = |dx: usize, dy: usize| map[(y + dy - 1) * w + x + dx - 1];
    let nx = at(0, 0) + 2 * at(0, 1) + at(0, 2) - at(2, 0) - 2 * at(2, 1) - at(2, 2);
    let ny = at(0, 2) + 2 * at(1, 2) + at(2, 2) - at(0, 0) - 2 * at(1, 0) - at(2, 0);
    (nx as f64, ny as f64)
}

#[inline]
fn to_byte(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

fn check_light(src: &Image, dst: &Image, params: &LightParams) -> EffectsResult<()> {
    check_format(src, BYTE_FORMATS)?;
    check_min_size(src, 3, 3)?;
    check_same_params(src, dst)?;
    params.validate()
}

/// Replace the image with its lit relief.
///
/// Color planes get the shade, alpha is copied. Border pixels have no
/// complete neighborhood and get the flat shade.
///
/// # Errors
///
/// Formats Grayscale8, RGB24, RGBA32; `src` and `dst` must have equal
/// parameters and be at least 3x3.
pub fn emboss(src: &Image, dst: &mut Image, params: &LightParams) -> EffectsResult<()> {
    check_light(src, dst, params)?;
    trace!(w = src.width(), h = src.height(), ?params, "emboss");

    let light = Light::new(params);
    let map = intensity_map(src);
    let (w, h) = (src.width() as usize, src.height() as usize);
    let bpp = src.bytes_per_pixel();
    let planes = src.format().color_planes();
    let flat = to_byte(light.flat_shade());

    for_each_row(dst, |y, row| {
        let src_row = src.row(y);
        let y = y as usize;
        for (x, px) in row.chunks_exact_mut(bpp).enumerate() {
            let shade = if x == 0 || y == 0 || x == w - 1 || y == h - 1 {
                flat
            } else {
                let (nx, ny) = normal(&map, w, x, y);
                to_byte(light.shade(nx, ny))
            };
            px[..planes].fill(shade);
            px[planes..].copy_from_slice(&src_row[x * bpp + planes..(x + 1) * bpp]);
        }
    });
    Ok(())
}

/// Overlay the lit relief on the image: every color byte gets
/// `shade - flat_shade` added, clamped to `[0, 255]`.
///
/// Flat regions are unchanged; border pixels and alpha are copied.
///
/// # Errors
///
/// As for [`emboss`].
pub fn drop_light(src: &Image, dst: &mut Image, params: &LightParams) -> EffectsResult<()> {
    check_light(src, dst, params)?;
    trace!(w = src.width(), h = src.height(), ?params, "drop_light");

    let light = Light::new(params);
    let map = intensity_map(src);
    let (w, h) = (src.width() as usize, src.height() as usize);
    let bpp = src.bytes_per_pixel();
    let planes = src.format().color_planes();
    let flat = light.flat_shade();

    for_each_row(dst, |y, row| {
        let src_row = src.row(y);
        row.copy_from_slice(src_row);
        let y = y as usize;
        if y == 0 || y == h - 1 {
            return;
        }
        for x in 1..w - 1 {
            let (nx, ny) = normal(&map, w, x, y);
            let delta = light.shade(nx, ny) - flat;
            for v in &mut row[x * bpp..x * bpp + planes] {
                *v = to_byte(*v as f64 + delta);
            }
        }
    });
    Ok(())
}
