//! Color filtering
//!
//! Every filter classifies each pixel as inside or outside a color region
//! and fills one of the two groups with a color:
//!
//! - `fill_outside = true`: pixels outside the region get the fill color
//! - `fill_outside = false`: pixels inside the region get the fill color
//!
//! Filters work in place on RGB24 and RGBA32 images. For RGBA the fill
//! color is written as is, alpha included.

use tracing::trace;
use ximaging_core::check::{COLOR_FORMATS, check_format, check_range};
use ximaging_core::parallel::for_each_row;
use ximaging_core::{BLUE_INDEX, GREEN_INDEX, Image, RED_INDEX, Rgba, rgb_to_hsl, rgb_to_hsv};

use crate::{ColorError, ColorResult};

/// Inclusive RGB ranges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorRanges {
    pub red: (u8, u8),
    pub green: (u8, u8),
    pub blue: (u8, u8),
}

impl Default for ColorRanges {
    fn default() -> Self {
        Self {
            red: (0, 255),
            green: (0, 255),
            blue: (0, 255),
        }
    }
}

/// Inclusive HSL ranges
///
/// The hue range wraps around when `hue.0 > hue.1` (e.g. `(340, 20)` selects
/// reds).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HslRanges {
    /// Hue in degrees, `[0, 359]`
    pub hue: (u16, u16),
    /// Saturation, `[0, 1]`
    pub saturation: (f32, f32),
    /// Luminance, `[0, 1]`
    pub luminance: (f32, f32),
}

impl Default for HslRanges {
    fn default() -> Self {
        Self {
            hue: (0, 359),
            saturation: (0.0, 1.0),
            luminance: (0.0, 1.0),
        }
    }
}

/// Inclusive HSV ranges; the hue range wraps like [`HslRanges::hue`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HsvRanges {
    /// Hue in degrees, `[0, 360]`
    pub hue: (f32, f32),
    /// Saturation, `[0, 1]`
    pub saturation: (f32, f32),
    /// Value, `[0, 1]`
    pub value: (f32, f32),
}

impl Default for HsvRanges {
    fn default() -> Self {
        Self {
            hue: (0.0, 360.0),
            saturation: (0.0, 1.0),
            value: (0.0, 1.0),
        }
    }
}

/// Distance measure for [`color_filtering_by_distance`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistanceType {
    /// `sqrt(dr² + dg² + db²)`
    #[default]
    Euclidean,
    /// `|dr| + |dg| + |db|`
    Manhattan,
}

fn check_order<T: PartialOrd + std::fmt::Debug>(name: &str, range: (T, T)) -> ColorResult<()> {
    if range.0 > range.1 {
        return Err(ColorError::InvalidRange(format!(
            "{name} range {range:?} has min > max"
        )));
    }
    Ok(())
}

fn check_unit(name: &'static str, range: (f32, f32)) -> ColorResult<()> {
    check_range(name, range.0, 0.0, 1.0)?;
    check_range(name, range.1, 0.0, 1.0)?;
    check_order(name, range)
}

#[inline]
fn hue_in<T: PartialOrd>(h: T, range: (T, T)) -> bool {
    if range.0 <= range.1 {
        h >= range.0 && h <= range.1
    } else {
        h >= range.0 || h <= range.1
    }
}

#[inline]
fn within<T: PartialOrd>(v: T, range: (T, T)) -> bool {
    v >= range.0 && v <= range.1
}

/// Fill the pixels selected by `fill_outside` and `inside(r, g, b)`.
fn fill_where<F>(image: &mut Image, fill_outside: bool, fill: Rgba, inside: F)
where
    F: Fn(u8, u8, u8) -> bool + Send + Sync,
{
    let bpp = image.bytes_per_pixel();
    let fill = fill.format_bytes(image.format());
    for_each_row(image, |_, row| {
        for px in row.chunks_exact_mut(bpp) {
            let is_inside = inside(px[RED_INDEX], px[GREEN_INDEX], px[BLUE_INDEX]);
            if is_inside != fill_outside {
                px.copy_from_slice(&fill[..bpp]);
            }
        }
    });
}

/// Filter by inclusive per-channel RGB ranges.
///
/// # Errors
///
/// Returns [`ColorError::InvalidRange`] for a range with min > max.
pub fn color_filtering(image: &mut Image, ranges: &ColorRanges, fill_outside: bool, fill: Rgba) -> ColorResult<()> {
    check_format(image, COLOR_FORMATS)?;
    check_order("red", ranges.red)?;
    check_order("green", ranges.green)?;
    check_order("blue", ranges.blue)?;
    trace!(w = image.width(), h = image.height(), ?ranges, fill_outside, "color_filtering");

    let ranges = *ranges;
    fill_where(image, fill_outside, fill, move |r, g, b| {
        within(r, ranges.red) && within(g, ranges.green) && within(b, ranges.blue)
    });
    Ok(())
}

/// Filter by distance to `center`: a pixel is inside when its distance is at
/// most `radius`. The Euclidean distance is compared squared.
pub fn color_filtering_by_distance(
    image: &mut Image,
    center: Rgba,
    radius: u16,
    distance: DistanceType,
    fill_outside: bool,
    fill: Rgba,
) -> ColorResult<()> {
    check_format(image, COLOR_FORMATS)?;
    trace!(?center, radius, ?distance, fill_outside, "color_filtering_by_distance");

    let (cr, cg, cb) = (center.r as i32, center.g as i32, center.b as i32);
    let radius = radius as i32;
    let radius2 = radius * radius;
    fill_where(image, fill_outside, fill, move |r, g, b| {
        let dr = r as i32 - cr;
        let dg = g as i32 - cg;
        let db = b as i32 - cb;
        match distance {
            DistanceType::Euclidean => dr * dr + dg * dg + db * db <= radius2,
            DistanceType::Manhattan => dr.abs() + dg.abs() + db.abs() <= radius,
        }
    });
    Ok(())
}

/// Filter by HSL ranges.
///
/// # Errors
///
/// Hue bounds above 359 and saturation or luminance bounds outside `[0, 1]`
/// give [`ximaging_core::Error::ArgumentOutOfRange`]; reversed saturation
/// or luminance ranges give [`ColorError::InvalidRange`].
pub fn hsl_color_filtering(image: &mut Image, ranges: &HslRanges, fill_outside: bool, fill: Rgba) -> ColorResult<()> {
    check_format(image, COLOR_FORMATS)?;
    check_range("hue", ranges.hue.0, 0, 359)?;
    check_range("hue", ranges.hue.1, 0, 359)?;
    check_unit("saturation", ranges.saturation)?;
    check_unit("luminance", ranges.luminance)?;
    trace!(?ranges, fill_outside, "hsl_color_filtering");

    let ranges = *ranges;
    fill_where(image, fill_outside, fill, move |r, g, b| {
        let hsl = rgb_to_hsl(r, g, b);
        hue_in(hsl.h, ranges.hue)
            && within(hsl.s, ranges.saturation)
            && within(hsl.l, ranges.luminance)
    });
    Ok(())
}

/// Filter by HSV ranges; errors as for [`hsl_color_filtering`] with hue
/// bounds in `[0, 360]`.
pub fn hsv_color_filtering(image: &mut Image, ranges: &HsvRanges, fill_outside: bool, fill: Rgba) -> ColorResult<()> {
    check_format(image, COLOR_FORMATS)?;
    check_range("hue", ranges.hue.0, 0.0, 360.0)?;
    check_range("hue", ranges.hue.1, 0.0, 360.0)?;
    check_unit("saturation", ranges.saturation)?;
    check_unit("value", ranges.value)?;
    trace!(?ranges, fill_outside, "hsv_color_filtering");

    let ranges = *ranges;
    fill_where(image, fill_outside, fill, move |r, g, b| {
        let hsv = rgb_to_hsv(r, g, b);
        hue_in(hsv.h, ranges.hue) && within(hsv.s, ranges.saturation) && within(hsv.v, ranges.value)
    });
    Ok(())
}
