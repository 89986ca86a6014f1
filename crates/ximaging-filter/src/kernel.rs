//! Convolution kernels
//!
//! Defines the square kernel used by the 2D convolutions and the Gaussian
//! kernel builders. Separable kernels are plain `&[f32]` slices validated by
//! [`check_kernel_size`].

use tracing::trace;
use ximaging_core::Error;
use ximaging_core::check::check_range;

use crate::{FilterError, FilterResult};

/// Smallest accepted kernel size.
pub const MIN_KERNEL_SIZE: u32 = 3;
/// Largest accepted kernel size.
pub const MAX_KERNEL_SIZE: u32 = 51;

/// Radius range of the Gaussian helpers.
pub const GAUSSIAN_RADIUS_RANGE: (u32, u32) = (1, 10);
/// Sigma range of the Gaussian helpers.
pub const GAUSSIAN_SIGMA_RANGE: (f32, f32) = (0.1, 10.0);

/// A square 2D convolution kernel
///
/// The size is odd and lies in `[3, 51]`; the center is at
/// `(size / 2, size / 2)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    /// Side length of the kernel
    size: u32,
    /// Kernel data (row-major order)
    data: Vec<f32>,
}

/// Fail with [`FilterError::InvalidKernel`] unless `size` is odd and in
/// `[3, 51]`.
pub fn check_kernel_size(size: usize) -> FilterResult<()> {
    if size % 2 == 0 || size < MIN_KERNEL_SIZE as usize || size > MAX_KERNEL_SIZE as usize {
        return Err(FilterError::InvalidKernel(format!(
            "size {size} must be odd and in [{MIN_KERNEL_SIZE}, {MAX_KERNEL_SIZE}]"
        )));
    }
    Ok(())
}

/// Allocate a zeroed weight buffer, reporting allocation failure.
fn alloc_weights(len: usize) -> FilterResult<Vec<f32>> {
    let mut data = Vec::new();
    data.try_reserve_exact(len).map_err(|_| Error::OutOfMemory)?;
    data.resize(len, 0.0);
    Ok(data)
}

impl Kernel {
    /// Create a zero-filled kernel.
    pub fn new(size: u32) -> FilterResult<Self> {
        check_kernel_size(size as usize)?;
        let data = alloc_weights((size * size) as usize)?;
        Ok(Self { size, data })
    }

    /// Create a kernel from `size * size` row-major values.
    ///
    /// # Errors
    ///
    /// Returns [`ximaging_core::Error::NullParameter`] for empty data and
    /// [`FilterError::InvalidKernel`] for a bad size or a length that does
    /// not match it.
    pub fn from_slice(size: u32, data: &[f32]) -> FilterResult<Self> {
        if data.is_empty() {
            return Err(Error::NullParameter("kernel").into());
        }
        check_kernel_size(size as usize)?;
        if data.len() != (size * size) as usize {
            return Err(FilterError::InvalidKernel(format!(
                "expected {} values for size {}, got {}",
                size * size,
                size,
                data.len()
            )));
        }
        Ok(Self {
            size,
            data: data.to_vec(),
        })
    }

    /// Kernel with a single 1 at the center. Convolving with it is a copy.
    pub fn delta(size: u32) -> FilterResult<Self> {
        let mut kernel = Self::new(size)?;
        let c = size / 2;
        kernel.set(c, c, 1.0);
        Ok(kernel)
    }

    /// Create a box (averaging) kernel.
    ///
    /// All values are `1/(size*size)`.
    pub fn box_kernel(size: u32) -> FilterResult<Self> {
        let mut kernel = Self::new(size)?;
        let v = 1.0 / (size * size) as f32;
        kernel.data.fill(v);
        Ok(kernel)
    }

    /// Get the side length.
    #[inline]
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Get the radius (`size / 2`).
    #[inline]
    pub fn radius(&self) -> u32 {
        self.size / 2
    }

    /// Get the kernel data.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Get a value at (x, y).
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<f32> {
        if x < self.size && y < self.size {
            Some(self.data[(y * self.size + x) as usize])
        } else {
            None
        }
    }

    /// Set a value at (x, y). Out-of-range coordinates are ignored.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, value: f32) {
        if x < self.size && y < self.size {
            self.data[(y * self.size + x) as usize] = value;
        }
    }

    /// Get the sum of all kernel values.
    pub fn sum(&self) -> f32 {
        self.data.iter().sum()
    }
}

fn check_gaussian(sigma: f32, radius: u32) -> FilterResult<()> {
    check_range(
        "sigma",
        sigma,
        GAUSSIAN_SIGMA_RANGE.0,
        GAUSSIAN_SIGMA_RANGE.1,
    )?;
    check_range(
        "radius",
        radius,
        GAUSSIAN_RADIUS_RANGE.0,
        GAUSSIAN_RADIUS_RANGE.1,
    )?;
    Ok(())
}

/// 1D Gaussian of `2 * radius + 1` taps, `exp(-x² / 2σ²)` (center tap 1).
///
/// # Errors
///
/// Returns [`ximaging_core::Error::ArgumentOutOfRange`] unless
/// `sigma ∈ [0.1, 10]` and `radius ∈ [1, 10]`, and
/// [`ximaging_core::Error::OutOfMemory`] if the taps cannot be allocated.
pub fn gaussian_blur_kernel_1d(sigma: f32, radius: u32) -> FilterResult<Vec<f32>> {
    check_gaussian(sigma, radius)?;
    let size = (2 * radius + 1) as usize;
    let mut taps = alloc_weights(size)?;
    let r = radius as i32;
    let two_sigma2 = 2.0 * sigma * sigma;
    for (tap, x) in taps.iter_mut().zip(-r..=r) {
        *tap = (-((x * x) as f32) / two_sigma2).exp();
    }
    trace!(sigma, radius, "gaussian_blur_kernel_1d");
    Ok(taps)
}

/// 2D Gaussian: outer product of [`gaussian_blur_kernel_1d`] with itself.
pub fn gaussian_blur_kernel_2d(sigma: f32, radius: u32) -> FilterResult<Kernel> {
    let taps = gaussian_blur_kernel_1d(sigma, radius)?;
    let size = taps.len() as u32;
    let mut kernel = Kernel::new(size)?;
    for (y, &ty) in taps.iter().enumerate() {
        for (x, &tx) in taps.iter().enumerate() {
            kernel.set(x as u32, y as u32, tx * ty);
        }
    }
    Ok(kernel)
}

/// Gaussian sharpening kernel.
///
/// All taps of the blur kernel are negated and the center becomes
/// `2 * sum - center`, so the kernel keeps the blur kernel's sum and flat
/// areas are unchanged.
pub fn gaussian_sharpen_kernel_2d(sigma: f32, radius: u32) -> FilterResult<Kernel> {
    let mut kernel = gaussian_blur_kernel_2d(sigma, radius)?;
    let sum = kernel.sum();
    let c = kernel.radius();
    let center = kernel.get(c, c).unwrap_or(0.0);
    for v in kernel.data.iter_mut() {
        *v = -*v;
    }
    kernel.set(c, c, 2.0 * sum - center);
    Ok(kernel)
}
