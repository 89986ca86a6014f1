//! ximaging - Raw pixel-buffer image processing for Rust
//!
//! # Overview
//!
//! ximaging operates directly on packed pixel memory (Grayscale8, RGB24,
//! RGBA32, with Binary1 and GrayscaleFloat32 as auxiliary formats) and
//! provides:
//!
//! - Convolution (general, separable, extended with border modes), Gaussian
//!   blur and sharpen
//! - 3x3 morphology and mean, mean shift, oil painting, edge detection
//! - Rotation, resizing, mirroring and shifting
//! - RGB/HSL/HSV color filtering, remapping, gradients and tone operations
//! - Two-image arithmetic, blending, masking and drawing primitives
//! - Relief lighting, jitter, run length smoothing, dithering and
//!   procedural textures
//!
//! Row-independent kernels run row-parallel with the `parallel` feature
//! (default) and give the same result without it.
//!
//! # Example
//!
//! ```
//! use ximaging::{Image, PixelFormat, Rgba};
//!
//! let src = Image::filled(64, 48, PixelFormat::Rgb24, Rgba::RED).unwrap();
//! let mut dst = src.create_template();
//! ximaging::filter::gaussian_blur(&src, &mut dst, 1.4, 3).unwrap();
//! assert_eq!(dst.pixel(10, 10), Some(Rgba::RED));
//! ```

// Re-export core types (primary data structures used everywhere)
pub use ximaging_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use ximaging_color as color;
pub use ximaging_effects as effects;
pub use ximaging_filter as filter;
pub use ximaging_transform as transform;
