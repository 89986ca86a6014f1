//! Convolution regression test
//!
//! Gaussian blur, delta kernels, separable versus 2D convolution and the
//! border modes of the extended convolution.

use ximaging_core::{ErrorCode, Image, PixelFormat};
use ximaging_filter::{
    BorderMode, Kernel, convolution, convolution_ex, gaussian_blur, gaussian_blur_kernel_1d,
    gaussian_blur_kernel_2d, separable_convolution,
};
use ximaging_test::{RegParams, builders};

#[test]
fn convolve_reg() {
    let mut rp = RegParams::new("convolve");

    // --- Test 1: Gaussian blur of a flat image keeps it flat ---
    let flat = builders::uniform(4, 4, PixelFormat::Grayscale8, 100).expect("flat");
    let mut blurred = flat.create_template();
    gaussian_blur(&flat, &mut blurred, 1.0, 1).expect("gaussian_blur");
    rp.compare_images(&flat, &blurred);
    eprintln!("  flat blur corner: {}", blurred.row(0)[0]);

    // --- Test 2: Delta kernel reproduces the source ---
    for format in [PixelFormat::Grayscale8, PixelFormat::Rgb24, PixelFormat::Rgba32] {
        let src = builders::pattern(13, 9, format, 5).expect("pattern");
        let delta = Kernel::delta(5).expect("delta");
        let mut dst = src.create_template();
        convolution(&src, &mut dst, &delta, true).expect("convolution");
        rp.compare_images(&src, &dst);
        convolution_ex(&src, &mut dst, &delta, 1.0, 0.0, BorderMode::Zero).expect("convolution_ex");
        rp.compare_images(&src, &dst);
    }

    // --- Test 3: Separable Gaussian matches the 2D Gaussian inside ---
    let src = builders::pattern(16, 12, PixelFormat::Rgb24, 21).expect("pattern");
    let taps = gaussian_blur_kernel_1d(1.2, 2).expect("taps");
    let kernel = gaussian_blur_kernel_2d(1.2, 2).expect("kernel");
    let mut sep = src.create_template();
    let mut full = src.create_template();
    let mut temp = Image::new(16 * 3, 12, PixelFormat::GrayscaleFloat32).expect("temp");
    separable_convolution(&src, &mut sep, &mut temp, &taps, &taps).expect("separable");
    convolution(&src, &mut full, &kernel, false).expect("convolution");
    let mut max_diff = 0i32;
    for y in 2..10 {
        let (a, b) = (sep.row(y), full.row(y));
        for i in 2 * 3..14 * 3 {
            max_diff = max_diff.max((a[i] as i32 - b[i] as i32).abs());
        }
    }
    rp.compare_values(0.0, max_diff as f64, 1.0);
    eprintln!("  separable vs 2D max interior difference: {}", max_diff);

    // --- Test 4: Crop border shrinks the destination ---
    let src = builders::gradient(10, 6, PixelFormat::Grayscale8).expect("gradient");
    let box3 = Kernel::from_slice(3, &[1.0; 9]).expect("box");
    let mut cropped = Image::new(8, 4, PixelFormat::Grayscale8).expect("cropped");
    convolution_ex(&src, &mut cropped, &box3, 9.0, 0.0, BorderMode::Crop).expect("crop");
    // mean of three gradient columns is the middle one for a linear ramp
    rp.compare_values(src.row(0)[5] as f64, cropped.row(0)[4] as f64, 1.0);
    let mut wrong = src.create_template();
    let result = convolution_ex(&src, &mut wrong, &box3, 9.0, 0.0, BorderMode::Crop);
    rp.check(
        ErrorCode::of(&result) == ErrorCode::ImageParametersMismatch,
        "crop into a same-size destination is rejected",
    );

    // --- Test 5: Argument ranges map to status codes ---
    let result = gaussian_blur(&flat, &mut blurred, 1.0, 11);
    rp.check(
        ErrorCode::of(&result) == ErrorCode::ArgumentOutOfRange,
        "radius 11 is out of range",
    );
    let result = convolution_ex(&flat, &mut blurred, &box3, 0.0, 0.0, BorderMode::Extend);
    rp.check(
        ErrorCode::of(&result) == ErrorCode::InvalidArgument,
        "zero divisor is rejected",
    );

    assert!(rp.cleanup(), "convolve regression test failed");
}
