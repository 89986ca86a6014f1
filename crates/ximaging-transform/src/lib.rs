//! ximaging-transform - Geometric transformations
//!
//! This crate provides:
//!
//! - Resizing: nearest neighbor and bilinear
//! - Orthogonal rotations (90/180/270 degrees) and mirroring
//! - Bilinear rotation by an arbitrary angle
//! - In-place translation
//!
//! Orthogonal operations and nearest-neighbor resizing move whole pixels and
//! therefore also accept GrayscaleFloat32 images.

mod error;
pub mod mirror;
pub mod rotate;
pub mod scale;
pub mod shift;

pub use error::{TransformError, TransformResult};
pub use mirror::mirror;
pub use rotate::{calculate_rotated_size, rotate_180, rotate_270, rotate_90, rotate_bilinear};
pub use scale::{resize_bilinear, resize_nearest_neighbor};
pub use shift::shift_image;

use ximaging_core::PixelFormat;

/// Formats handled by the whole-pixel operations.
pub(crate) const SAMPLE_FORMATS: &[PixelFormat] = &[
    PixelFormat::Grayscale8,
    PixelFormat::Rgb24,
    PixelFormat::Rgba32,
    PixelFormat::GrayscaleFloat32,
];
