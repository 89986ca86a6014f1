//! ximaging-filter - Convolution, morphology and statistical filters
//!
//! This crate provides neighborhood filters over 8-bit pixel buffers:
//!
//! - Convolution with square kernels, separable kernels and explicit
//!   border handling
//! - Gaussian blur and sharpen
//! - 3x3 dilatation, erosion and mean
//! - Mean shift and oil painting
//! - Edge detection (difference, homogeneity, Sobel)
//!
//! Every operation reads a source image and writes a caller-provided
//! destination; neither is ever reallocated.

pub mod convolve;
pub mod edge;
mod error;
pub mod kernel;
pub mod mean_shift;
pub mod neighborhood;
pub mod oil_painting;

pub use convolve::{
    BorderMode, convolution, convolution_ex, gaussian_blur, gaussian_sharpen,
    separable_convolution,
};
pub use edge::{EdgeDetectorType, edge_detector};
pub use error::{FilterError, FilterResult};
pub use kernel::{
    Kernel, gaussian_blur_kernel_1d, gaussian_blur_kernel_2d, gaussian_sharpen_kernel_2d,
};
pub use mean_shift::mean_shift;
pub use neighborhood::{dilatation_3x3, erosion_3x3, mean_3x3};
pub use oil_painting::oil_painting;
