//! ximaging Core - Pixel buffer and shared building blocks
//!
//! This crate provides the data structures and operations every other
//! ximaging crate builds on:
//!
//! - [`Image`] - Raw pixel buffer (width, height, stride, format, bytes)
//! - [`PixelFormat`] - Grayscale8, RGB24, RGBA32, Binary1, GrayscaleFloat32
//! - [`Rgba`] / [`Hsl`] / [`Hsv`] - Color values and conversions
//! - [`Point`] / [`Rect`] - Integer geometry
//! - [`Histogram`] - 256-bin statistics
//! - [`image::arith`] / [`image::blend`] - Two-image operations and masking
//! - [`draw`] - Lines, shapes, pies, polygons and image drawing
//! - [`parallel`] - Row-parallel execution helper
//! - [`check`] - Argument validation shared by all kernels
//!
//! # Features
//!
//! - `parallel` (default) - dispatch rows of row-independent kernels to the
//!   rayon thread pool. Results are identical with and without it.

pub mod check;
pub mod color;
pub mod draw;
pub mod error;
pub mod format;
pub mod geometry;
pub mod histogram;
pub mod image;
pub mod parallel;

pub use color::{Hsl, Hsv, Rgba, hsl_to_rgb, hsv_to_rgb, luma, rgb_to_hsl, rgb_to_hsv};
pub use error::{Error, ErrorCode, Result};
pub use format::{ALPHA_INDEX, BLUE_INDEX, GREEN_INDEX, PixelFormat, RED_INDEX};
pub use geometry::{Point, Rect};
pub use histogram::{Channel, Histogram};
pub use image::{
    BlendMode, Image, add_images, blend_images, diff_images, diff_images_thresholded,
    fade_images, intersect_images, mask_image, masked_fill, masked_image_fill, merge_images,
    move_towards_images, subtract_images,
};
