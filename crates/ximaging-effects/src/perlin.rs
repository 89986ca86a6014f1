//! Perlin noise
//!
//! Value noise from an integer hash, cosine interpolated between lattice
//! points and summed over octaves. Each octave doubles the frequency and
//! scales the amplitude by `persistence`. Every octave contributes values in
//! `[-amplitude, amplitude]`.

use std::f64::consts::PI;

/// Octave-summed noise generator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerlinNoise {
    /// Number of octaves, at least 1
    pub octaves: u32,
    /// Amplitude factor between octaves
    pub persistence: f64,
    /// Frequency of the first octave
    pub initial_frequency: f64,
    /// Amplitude of the first octave
    pub initial_amplitude: f64,
}

impl Default for PerlinNoise {
    fn default() -> Self {
        Self {
            octaves: 4,
            persistence: 0.65,
            initial_frequency: 1.0,
            initial_amplitude: 1.0,
        }
    }
}

/// Hash noise in `(-1, 1]` at an integer position.
#[inline]
fn lattice(n: i32) -> f64 {
    let n = (n << 13) ^ n;
    let hash = n
        .wrapping_mul(n.wrapping_mul(n).wrapping_mul(15731).wrapping_add(789_221))
        .wrapping_add(1_376_312_589)
        & 0x7fff_ffff;
    1.0 - hash as f64 / 1_073_741_824.0
}

#[inline]
fn lattice_2d(x: i32, y: i32) -> f64 {
    lattice(x.wrapping_add(y.wrapping_mul(57)))
}

#[inline]
fn cosine_interpolate(a: f64, b: f64, t: f64) -> f64 {
    let f = (1.0 - (t * PI).cos()) * 0.5;
    a * (1.0 - f) + b * f
}

fn smoothed(x: f64) -> f64 {
    let xi = x as i32;
    cosine_interpolate(lattice(xi), lattice(xi.wrapping_add(1)), x - xi as f64)
}

fn smoothed_2d(x: f64, y: f64) -> f64 {
    let (xi, yi) = (x as i32, y as i32);
    let (xf, yf) = (x - xi as f64, y - yi as f64);
    let (x1, y1) = (xi.wrapping_add(1), yi.wrapping_add(1));
    let top = cosine_interpolate(lattice_2d(xi, yi), lattice_2d(x1, yi), xf);
    let bottom = cosine_interpolate(lattice_2d(xi, y1), lattice_2d(x1, y1), xf);
    cosine_interpolate(top, bottom, yf)
}

impl PerlinNoise {
    pub fn new(octaves: u32, persistence: f64, initial_frequency: f64, initial_amplitude: f64) -> Self {
        Self {
            octaves,
            persistence,
            initial_frequency,
            initial_amplitude,
        }
    }

    /// Sum `noise(position * frequency) * amplitude` over the octaves.
    fn sum<F: Fn(f64) -> f64>(&self, noise: F) -> f64 {
        let mut frequency = self.initial_frequency;
        let mut amplitude = self.initial_amplitude;
        let mut total = 0.0;
        for _ in 0..self.octaves {
            total += noise(frequency) * amplitude;
            frequency *= 2.0;
            amplitude *= self.persistence;
        }
        total
    }

    /// One-dimensional noise at `x`.
    pub fn function_1d(&self, x: f64) -> f64 {
        self.sum(|f| smoothed(x * f))
    }

    /// Two-dimensional noise at `(x, y)`.
    pub fn function_2d(&self, x: f64, y: f64) -> f64 {
        self.sum(|f| smoothed_2d(x * f, y * f))
    }

    /// Largest absolute value the generator can produce.
    pub fn max_amplitude(&self) -> f64 {
        self.sum(|_| 1.0).abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lattice_range() {
        for n in -1000..1000 {
            let v = lattice(n);
            assert!(v > -1.0 && v <= 1.0);
        }
        assert_eq!(lattice(7), lattice(7));
    }

    #[test]
    fn test_interpolation_hits_lattice() {
        assert_eq!(smoothed(3.0), lattice(3));
        assert_eq!(smoothed_2d(4.0, 9.0), lattice_2d(4, 9));
        assert!((cosine_interpolate(2.0, 6.0, 0.5) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_bounded_by_amplitude() {
        let noise = PerlinNoise::new(3, 0.5, 0.1, 2.0);
        assert_eq!(noise.max_amplitude(), 3.5);
        for i in 0..200 {
            let x = i as f64 * 0.37;
            assert!(noise.function_1d(x).abs() <= 3.5 + 1e-9);
            assert!(noise.function_2d(x, 1000.0 - x).abs() <= 3.5 + 1e-9);
        }
    }

    #[test]
    fn test_zero_octaves() {
        let noise = PerlinNoise {
            octaves: 0,
            ..Default::default()
        };
        assert_eq!(noise.function_2d(1.5, 2.5), 0.0);
    }
}
