//! ximaging-test - Regression test framework for ximaging
//!
//! Regression tests run a sequence of numbered checks through
//! [`RegParams`], which records every failure and reports them all at the
//! end instead of stopping at the first one. The [`builders`] module
//! creates the synthetic input images the tests operate on.
//!
//! # Usage
//!
//! ```
//! use ximaging_test::{RegParams, builders};
//! use ximaging_core::PixelFormat;
//!
//! let image = builders::uniform(4, 4, PixelFormat::Grayscale8, 100).unwrap();
//! let mut rp = RegParams::new("example");
//! rp.compare_values(100.0, image.row(0)[0] as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: set to "display" to dump the pixels of every image
//!   comparison to stderr

pub mod builders;
mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};
