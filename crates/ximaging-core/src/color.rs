//! Color value types and color space conversions
//!
//! - [`Rgba`] - 8-bit color with alpha, used for fill and draw colors
//! - [`Hsl`] / [`Hsv`] - hue based color spaces
//!
//! All conversions are pure and allocation free.

use crate::format::{ALPHA_INDEX, BLUE_INDEX, GREEN_INDEX, PixelFormat, RED_INDEX};

/// 8-bit RGBA color.
///
/// When a color is written into a format without an alpha channel the alpha
/// acts as an intensity multiplier (see [`Rgba::format_bytes`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
    pub const RED: Rgba = Rgba::rgb(255, 0, 0);
    pub const GREEN: Rgba = Rgba::rgb(0, 255, 0);
    pub const BLUE: Rgba = Rgba::rgb(0, 0, 255);
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    /// Create a color from all four components.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Opaque gray color.
    pub const fn gray(v: u8) -> Self {
        Self::rgb(v, v, v)
    }

    /// Color with RGB scaled by `alpha / 255` and alpha set to 255.
    pub fn premultiplied(self) -> Self {
        let a = self.a as u32;
        Self::rgb(
            (self.r as u32 * a / 255) as u8,
            (self.g as u32 * a / 255) as u8,
            (self.b as u32 * a / 255) as u8,
        )
    }

    /// BT.709 luma of the RGB components.
    #[inline]
    pub fn to_gray(self) -> u8 {
        luma(self.r, self.g, self.b)
    }

    /// Bytes written when this color fills a pixel of `format`, in memory order.
    ///
    /// Formats without alpha receive the premultiplied color; RGBA receives
    /// the raw components. Only the first `format.bytes_per_pixel()` entries
    /// are meaningful. Float and binary formats use the gray value.
    pub fn format_bytes(self, format: PixelFormat) -> [u8; 4] {
        let mut out = [0u8; 4];
        match format {
            PixelFormat::Rgba32 => {
                out[RED_INDEX] = self.r;
                out[GREEN_INDEX] = self.g;
                out[BLUE_INDEX] = self.b;
                out[ALPHA_INDEX] = self.a;
            }
            PixelFormat::Rgb24 => {
                let p = self.premultiplied();
                out[RED_INDEX] = p.r;
                out[GREEN_INDEX] = p.g;
                out[BLUE_INDEX] = p.b;
            }
            _ => out[0] = self.premultiplied().to_gray(),
        }
        out
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::BLACK
    }
}

/// BT.709 luma in integer arithmetic.
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((2125 * r as u32 + 7154 * g as u32 + 721 * b as u32) / 10000) as u8
}

/// HSL color.
///
/// Ranges: h [0..=359] degrees, s [0..1], l [0..1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: u16,
    pub s: f32,
    pub l: f32,
}

/// HSV color.
///
/// Ranges: h [0..360) degrees, s [0..1], v [0..1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    pub h: f32,
    pub s: f32,
    pub v: f32,
}

/// Convert RGB to HSL.
///
/// Hue is undefined for achromatic colors and reported as 0.
pub fn rgb_to_hsl(r: u8, g: u8, b: u8) -> Hsl {
    let rf = r as f32 / 255.0;
    let gf = g as f32 / 255.0;
    let bf = b as f32 / 255.0;

    let min = rf.min(gf).min(bf);
    let max = rf.max(gf).max(bf);
    let delta = max - min;

    let l = (max + min) / 2.0;

    if delta == 0.0 {
        return Hsl { h: 0, s: 0.0, l };
    }

    let s = if l <= 0.5 {
        delta / (max + min)
    } else {
        delta / (2.0 - max - min)
    };

    let sector = if r >= g && r >= b {
        ((gf - bf) / delta).rem_euclid(6.0)
    } else if g >= b {
        (bf - rf) / delta + 2.0
    } else {
        (rf - gf) / delta + 4.0
    };

    let h = ((sector * 60.0) as u16) % 360;
    Hsl { h, s, l }
}

/// Convert HSL to RGB.
pub fn hsl_to_rgb(hsl: Hsl) -> (u8, u8, u8) {
    if hsl.s == 0.0 {
        let v = to_byte(hsl.l);
        return (v, v, v);
    }

    let l = hsl.l;
    let s = hsl.s;
    let hue = hsl.h as f32 / 360.0;

    let v2 = if l < 0.5 {
        l * (1.0 + s)
    } else {
        (l + s) - (s * l)
    };
    let v1 = 2.0 * l - v2;

    (
        to_byte(hue_to_channel(v1, v2, hue + 1.0 / 3.0)),
        to_byte(hue_to_channel(v1, v2, hue)),
        to_byte(hue_to_channel(v1, v2, hue - 1.0 / 3.0)),
    )
}

fn hue_to_channel(v1: f32, v2: f32, vh: f32) -> f32 {
    let vh = vh.rem_euclid(1.0);
    if 6.0 * vh < 1.0 {
        v1 + (v2 - v1) * 6.0 * vh
    } else if 2.0 * vh < 1.0 {
        v2
    } else if 3.0 * vh < 2.0 {
        v1 + (v2 - v1) * (2.0 / 3.0 - vh) * 6.0
    } else {
        v1
    }
}

/// Convert RGB to HSV.
///
/// Branchless formulation: the channels are sorted by swapping while a hue
/// offset `k` records which channel ended up largest. The 1e-20 epsilon keeps
/// both divisions finite for achromatic input.
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> Hsv {
    const EPSILON: f32 = 1e-20;

    let mut r = r as f32 / 255.0;
    let mut g = g as f32 / 255.0;
    let mut b = b as f32 / 255.0;
    let mut k = 0.0f32;

    if g < b {
        std::mem::swap(&mut g, &mut b);
        k = -1.0;
    }
    if r < g {
        std::mem::swap(&mut r, &mut g);
        k = -2.0 / 6.0 - k;
    }

    let chroma = r - g.min(b);
    let mut h = (k + (g - b) / (6.0 * chroma + EPSILON)).abs() * 360.0;
    if h >= 360.0 {
        h -= 360.0;
    }

    Hsv {
        h,
        s: chroma / (r + EPSILON),
        v: r,
    }
}

/// Convert HSV to RGB.
pub fn hsv_to_rgb(hsv: Hsv) -> (u8, u8, u8) {
    let v = hsv.v;
    if hsv.s == 0.0 {
        let c = to_byte(v);
        return (c, c, c);
    }

    let h = hsv.h.rem_euclid(360.0) / 60.0;
    let sector = h.floor();
    let f = h - sector;
    let s = hsv.s;

    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    let (r, g, b) = match sector as i32 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    (to_byte(r), to_byte(g), to_byte(b))
}

#[inline]
fn to_byte(v: f32) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}
