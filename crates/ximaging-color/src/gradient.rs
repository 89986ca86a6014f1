//! Lookup tables and color gradients
//!
//! A [`ColorMaps`] holds one 256-entry table per RGB channel. Gradients map
//! intensity 0 to the first color stop and 255 to the last, with the stops
//! spread evenly in between; they feed
//! [`grayscale_remapping_to_rgb`](crate::grayscale_remapping_to_rgb) to turn
//! gray images into pseudo-color.

use ximaging_core::Rgba;

use crate::{ColorError, ColorResult};

/// Per-channel lookup tables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorMaps {
    pub red: [u8; 256],
    pub green: [u8; 256],
    pub blue: [u8; 256],
}

impl ColorMaps {
    /// Tables that leave every value unchanged.
    pub fn identity() -> Self {
        let mut table = [0u8; 256];
        for (i, v) in table.iter_mut().enumerate() {
            *v = i as u8;
        }
        Self {
            red: table,
            green: table,
            blue: table,
        }
    }

    /// Color stored at index `i`.
    pub fn color(&self, i: u8) -> Rgba {
        let i = i as usize;
        Rgba::rgb(self.red[i], self.green[i], self.blue[i])
    }
}

impl Default for ColorMaps {
    fn default() -> Self {
        Self::identity()
    }
}

/// Linear lookup table mapping `in_range` onto `out_range`.
///
/// Values below `in_range.0` map to `out_range.0`, values above
/// `in_range.1` to `out_range.1`, and values in between are interpolated
/// and rounded. A reversed output range inverts. A single-value input range
/// becomes a step at that value.
///
/// # Errors
///
/// Returns [`ColorError::InvalidRange`] when `in_range.0 > in_range.1`.
pub fn linear_map(in_range: (u8, u8), out_range: (u8, u8)) -> ColorResult<[u8; 256]> {
    let (in_min, in_max) = in_range;
    if in_min > in_max {
        return Err(ColorError::InvalidRange(format!(
            "input range {in_range:?} has min > max"
        )));
    }
    let (out_min, out_max) = (out_range.0 as f32, out_range.1 as f32);
    let mut map = [0u8; 256];
    for (i, v) in map.iter_mut().enumerate() {
        let i = i as u8;
        *v = if i < in_min {
            out_range.0
        } else if i >= in_max {
            out_range.1
        } else {
            let t = (i - in_min) as f32 / (in_max - in_min) as f32;
            (out_min + (out_max - out_min) * t).round() as u8
        };
    }
    Ok(map)
}

/// Gradient through evenly spaced color stops (at least 2).
fn multi_stop(stops: &[Rgba]) -> ColorMaps {
    let mut maps = ColorMaps::identity();
    let segments = stops.len() - 1;
    for i in 0..256usize {
        // position of i along the stops, in units of segments
        let pos = i as f32 * segments as f32 / 255.0;
        let k = (pos as usize).min(segments - 1);
        let t = pos - k as f32;
        let (a, b) = (stops[k], stops[k + 1]);
        let lerp = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
        maps.red[i] = lerp(a.r, b.r);
        maps.green[i] = lerp(a.g, b.g);
        maps.blue[i] = lerp(a.b, b.b);
    }
    maps
}

/// Gradient from `start` (at 0) to `end` (at 255).
pub fn two_color_gradient(start: Rgba, end: Rgba) -> ColorMaps {
    multi_stop(&[start, end])
}

/// Gradient through three colors; `middle` sits at 127.5.
pub fn three_color_gradient(start: Rgba, middle: Rgba, end: Rgba) -> ColorMaps {
    multi_stop(&[start, middle, end])
}

/// Gradient through five evenly spaced colors.
pub fn five_color_gradient(colors: [Rgba; 5]) -> ColorMaps {
    multi_stop(&colors)
}

/// Built-in heat map: black, blue, red, yellow, white.
///
/// The 256 entries are computed from the five stops (at 0, 63.75, 127.5,
/// 191.25 and 255) rather than stored, so entry `i` is the rounded linear
/// blend of the two stops around it; for instance 64 is `(1, 0, 254)` and
/// 128 is `(255, 2, 0)`.
pub fn heat_gradient() -> ColorMaps {
    five_color_gradient([
        Rgba::BLACK,
        Rgba::BLUE,
        Rgba::RED,
        Rgba::rgb(255, 255, 0),
        Rgba::WHITE,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_map() {
        let map = linear_map((50, 150), (0, 200)).unwrap();
        assert_eq!(map[0], 0);
        assert_eq!(map[50], 0);
        assert_eq!(map[100], 100);
        assert_eq!(map[150], 200);
        assert_eq!(map[255], 200);
    }

    #[test]
    fn test_linear_map_inverting_and_step() {
        let map = linear_map((0, 255), (255, 0)).unwrap();
        assert_eq!(map[0], 255);
        assert_eq!(map[255], 0);
        let step = linear_map((128, 128), (0, 255)).unwrap();
        assert_eq!(step[127], 0);
        assert_eq!(step[128], 255);
        assert!(matches!(linear_map((10, 5), (0, 255)), Err(ColorError::InvalidRange(_))));
    }

    #[test]
    fn test_two_color_ends() {
        let maps = two_color_gradient(Rgba::RED, Rgba::BLUE);
        assert_eq!(maps.color(0), Rgba::RED);
        assert_eq!(maps.color(255), Rgba::BLUE);
        assert_eq!(maps.color(128).r, 127);
    }

    #[test]
    fn test_three_color_middle() {
        let maps = three_color_gradient(Rgba::BLACK, Rgba::WHITE, Rgba::BLACK);
        assert_eq!(maps.color(0), Rgba::BLACK);
        assert_eq!(maps.color(255), Rgba::BLACK);
        assert!(maps.red[127] >= 254 && maps.red[128] >= 254);
    }

    #[test]
    fn test_heat_stops() {
        let maps = heat_gradient();
        assert_eq!(maps.color(0), Rgba::BLACK);
        assert_eq!(maps.color(255), Rgba::WHITE);
        // the blue stop sits at 63.75
        assert!(maps.blue[64] >= 250 && maps.red[64] <= 5);
    }

    #[test]
    fn test_heat_table_entries() {
        let maps = heat_gradient();
        let expected = [
            (32, Rgba::rgb(0, 0, 128)),
            (64, Rgba::rgb(1, 0, 254)),
            (96, Rgba::rgb(129, 0, 126)),
            (128, Rgba::rgb(255, 2, 0)),
            (160, Rgba::rgb(255, 130, 0)),
            (191, Rgba::rgb(255, 254, 0)),
            (192, Rgba::rgb(255, 255, 3)),
            (224, Rgba::rgb(255, 255, 131)),
        ];
        for (i, color) in expected {
            assert_eq!(maps.color(i), color, "entry {i}");
        }
        // red and green never fall
        for i in 1..256 {
            assert!(maps.red[i] >= maps.red[i - 1]);
            assert!(maps.green[i] >= maps.green[i - 1]);
        }
    }

    #[test]
    fn test_identity() {
        let maps = ColorMaps::identity();
        assert_eq!(maps.red[42], 42);
        assert_eq!(maps, ColorMaps::default());
    }
}
