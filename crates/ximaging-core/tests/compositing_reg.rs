//! Two-image compositing regression test
//!
//! Blend modes, thresholded difference and masking on synthetic images.

use ximaging_core::{
    BlendMode, PixelFormat, Rgba, blend_images, diff_images_thresholded, fade_images,
    mask_image, merge_images,
};
use ximaging_test::{RegParams, builders};

#[test]
fn compositing_reg() {
    let mut rp = RegParams::new("compositing");

    // --- Test 1: Multiply of mid-gray with itself ---
    for format in [PixelFormat::Grayscale8, PixelFormat::Rgb24, PixelFormat::Rgba32] {
        let mut base = builders::uniform(6, 5, format, 128).expect("base");
        let top = builders::uniform(6, 5, format, 128).expect("top");
        blend_images(&mut base, &top, BlendMode::Multiply).expect("multiply");
        let expected = builders::uniform(6, 5, format, 64).expect("expected");
        rp.compare_images(&expected, &base);
        eprintln!("  multiply {:?}: first byte {}", format, base.row(0)[0]);
    }

    // --- Test 2: Screen with black and Multiply with white are identities ---
    let source = builders::pattern(9, 7, PixelFormat::Rgb24, 11).expect("pattern");
    let mut screened = source.clone();
    let black = builders::uniform(9, 7, PixelFormat::Rgb24, 0).expect("black");
    blend_images(&mut screened, &black, BlendMode::Screen).expect("screen");
    rp.compare_images(&source, &screened);
    let mut multiplied = source.clone();
    let white = builders::uniform(9, 7, PixelFormat::Rgb24, 255).expect("white");
    blend_images(&mut multiplied, &white, BlendMode::Multiply).expect("multiply");
    rp.compare_images(&source, &multiplied);

    // --- Test 3: Difference of an image with itself ---
    for threshold in [0, 1, 100] {
        let mut dst = builders::uniform(9, 7, PixelFormat::Grayscale8, 77).expect("dst");
        let hi = diff_images_thresholded(&source, &source, &mut dst, threshold, Rgba::WHITE, Rgba::BLACK)
            .expect("diff");
        rp.compare_values(0.0, hi as f64, 0.0);
        let lo = builders::uniform(9, 7, PixelFormat::Grayscale8, 0).expect("lo");
        rp.compare_images(&lo, &dst);
    }

    // --- Test 4: Thresholded difference against a shifted copy ---
    let a = builders::gradient(16, 4, PixelFormat::Grayscale8).expect("gradient");
    let b = builders::uniform(16, 4, PixelFormat::Grayscale8, 0).expect("zero");
    let mut dst = builders::uniform(16, 4, PixelFormat::Rgb24, 0).expect("dst");
    let hi = diff_images_thresholded(&a, &b, &mut dst, 127, Rgba::RED, Rgba::BLUE).expect("diff");
    // columns 8..16 have gradient values above 127
    rp.compare_values(8.0 * 4.0, hi as f64, 0.0);
    rp.check(dst.pixel(15, 0) == Some(Rgba::RED), "bright column is hi");
    rp.check(dst.pixel(0, 3) == Some(Rgba::BLUE), "dark column is lo");

    // --- Test 5: Fade endpoints ---
    let mut faded = a.clone();
    fade_images(&mut faded, &b, 0.0).expect("fade 0");
    rp.compare_images(&a, &faded);
    fade_images(&mut faded, &b, 1.0).expect("fade 1");
    rp.compare_images(&b, &faded);

    // --- Test 6: Merge is idempotent ---
    let mut merged = source.clone();
    merge_images(&mut merged, &source).expect("merge");
    rp.compare_images(&source, &merged);

    // --- Test 7: All-keep mask leaves the image, all-fill mask paints it ---
    let keep = builders::uniform(9, 7, PixelFormat::Grayscale8, 255).expect("mask");
    let mut masked = source.clone();
    mask_image(&mut masked, &keep, Rgba::GREEN).expect("mask keep");
    rp.compare_images(&source, &masked);
    let fill = builders::uniform(9, 7, PixelFormat::Grayscale8, 0).expect("mask");
    mask_image(&mut masked, &fill, Rgba::GREEN).expect("mask fill");
    let green = builders::solid(9, 7, PixelFormat::Rgb24, Rgba::GREEN).expect("green");
    rp.compare_images(&green, &masked);

    assert!(rp.cleanup(), "compositing regression test failed");
}
