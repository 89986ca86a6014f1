//! 256-bin intensity histogram with summary statistics

use crate::error::{Error, Result};
use crate::format::{ALPHA_INDEX, BLUE_INDEX, GREEN_INDEX, PixelFormat, RED_INDEX};
use crate::image::Image;

/// Color channel selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Red,
    Green,
    Blue,
    Alpha,
}

impl Channel {
    /// Byte offset of the channel inside a BGR(A) pixel.
    pub fn offset(self) -> usize {
        match self {
            Channel::Red => RED_INDEX,
            Channel::Green => GREEN_INDEX,
            Channel::Blue => BLUE_INDEX,
            Channel::Alpha => ALPHA_INDEX,
        }
    }
}

/// Fixed 256-bin histogram of 8-bit values.
///
/// Summary values are recomputed by [`Histogram::update`]; they are zero for
/// an empty histogram.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    values: [u32; 256],
    total: u64,
    min: u8,
    max: u8,
    mean: f32,
    std_dev: f32,
    median: u8,
}

impl Default for Histogram {
    fn default() -> Self {
        Self {
            values: [0; 256],
            total: 0,
            min: 0,
            max: 0,
            mean: 0.0,
            std_dev: 0.0,
            median: 0,
        }
    }
}

impl Histogram {
    /// Empty histogram
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from raw bin counts.
    pub fn from_values(values: [u32; 256]) -> Self {
        let mut h = Self {
            values,
            ..Self::default()
        };
        h.update();
        h
    }

    /// Histogram of a Grayscale8 image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedPixelFormat`] for other formats.
    pub fn from_gray(image: &Image) -> Result<Self> {
        if image.format() != PixelFormat::Grayscale8 {
            return Err(Error::UnsupportedPixelFormat(image.format()));
        }
        let mut values = [0u32; 256];
        for y in 0..image.height() {
            for &v in image.row(y) {
                values[v as usize] += 1;
            }
        }
        Ok(Self::from_values(values))
    }

    /// Histogram of one channel of an RGB24/RGBA32 image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedPixelFormat`] for non-color formats and
    /// for `Channel::Alpha` on RGB24.
    pub fn from_channel(image: &Image, channel: Channel) -> Result<Self> {
        let format = image.format();
        if !format.is_color() || (channel == Channel::Alpha && !format.has_alpha()) {
            return Err(Error::UnsupportedPixelFormat(format));
        }
        let bpp = format.bytes_per_pixel();
        let offset = channel.offset();
        let mut values = [0u32; 256];
        for y in 0..image.height() {
            for px in image.row(y).chunks_exact(bpp) {
                values[px[offset] as usize] += 1;
            }
        }
        Ok(Self::from_values(values))
    }

    /// Recompute the summary statistics from the bins.
    pub fn update(&mut self) {
        let total: u64 = self.values.iter().map(|&v| v as u64).sum();
        self.total = total;
        if total == 0 {
            self.min = 0;
            self.max = 0;
            self.mean = 0.0;
            self.std_dev = 0.0;
            self.median = 0;
            return;
        }

        self.min = self.values.iter().position(|&v| v != 0).unwrap_or(0) as u8;
        self.max = self.values.iter().rposition(|&v| v != 0).unwrap_or(0) as u8;

        let sum: f64 = self
            .values
            .iter()
            .enumerate()
            .map(|(i, &v)| i as f64 * v as f64)
            .sum();
        let mean = sum / total as f64;
        let variance: f64 = self
            .values
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                let d = i as f64 - mean;
                d * d * v as f64
            })
            .sum::<f64>()
            / total as f64;
        self.mean = mean as f32;
        self.std_dev = variance.sqrt() as f32;

        // first bin where the running count reaches half the population
        let half = total.div_ceil(2);
        let mut running = 0u64;
        self.median = 0;
        for (i, &v) in self.values.iter().enumerate() {
            running += v as u64;
            if running >= half {
                self.median = i as u8;
                break;
            }
        }
    }

    /// Bin counts
    pub fn values(&self) -> &[u32; 256] {
        &self.values
    }

    /// Number of counted samples
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn min(&self) -> u8 {
        self.min
    }

    pub fn max(&self) -> u8 {
        self.max
    }

    pub fn mean(&self) -> f32 {
        self.mean
    }

    pub fn std_dev(&self) -> f32 {
        self.std_dev
    }

    pub fn median(&self) -> u8 {
        self.median
    }
}
