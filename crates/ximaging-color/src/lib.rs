//! ximaging-color - Color filtering, remapping and tone operations
//!
//! This crate provides per-pixel color operations:
//!
//! - **Filtering**: keep or fill pixels by RGB ranges, distance to a color,
//!   or HSL/HSV ranges
//! - **Remapping**: per-channel lookup tables, gray to pseudo-color
//! - **Gradients**: lookup tables from 2, 3 or 5 color stops
//! - **Tone**: sepia, hue, channel rotation, gray conversion, inversion,
//!   thresholding, channel extraction and replacement
//! - **Noise**: uniform additive noise from a caller-supplied generator
//!
//! All operations work in place unless they change the pixel format.

mod error;
pub mod filtering;
pub mod gradient;
pub mod noise;
pub mod remap;
pub mod tone;

pub use error::{ColorError, ColorResult};
pub use filtering::{
    ColorRanges, DistanceType, HslRanges, HsvRanges, color_filtering,
    color_filtering_by_distance, hsl_color_filtering, hsv_color_filtering,
};
pub use gradient::{
    ColorMaps, five_color_gradient, heat_gradient, linear_map, three_color_gradient,
    two_color_gradient,
};
pub use noise::{uniform_additive_noise, uniform_additive_noise_seeded};
pub use remap::{color_remapping, grayscale_remapping, grayscale_remapping_to_rgb};
pub use tone::{
    extract_channel, grayscale_to_rgb, invert, make_sepia, replace_channel, rotate_rgb_channels,
    set_hue, threshold, to_grayscale,
};
