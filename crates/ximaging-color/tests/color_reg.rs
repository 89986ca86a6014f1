//! Color operations regression test
//!
//! Color filtering, identity remapping, gradients and noise on synthetic
//! images.

use ximaging_color::{
    ColorMaps, ColorRanges, DistanceType, color_filtering, color_filtering_by_distance,
    color_remapping, grayscale_remapping, grayscale_remapping_to_rgb, heat_gradient,
    rotate_rgb_channels, uniform_additive_noise_seeded,
};
use ximaging_core::{Image, PixelFormat, Rgba};
use ximaging_test::{RegParams, builders};

#[test]
fn color_reg() {
    let mut rp = RegParams::new("color");

    // --- Test 1: a pixel outside the red range is filled with black ---
    for format in [PixelFormat::Rgb24, PixelFormat::Rgba32] {
        let mut image = builders::solid(3, 2, format, Rgba::rgb(50, 128, 128)).expect("solid");
        image.set_pixel(2, 1, Rgba::rgb(200, 128, 128)).expect("set");
        let ranges = ColorRanges {
            red: (100, 255),
            ..Default::default()
        };
        color_filtering(&mut image, &ranges, true, Rgba::BLACK).expect("color_filtering");
        rp.check(image.pixel(0, 0) == Some(Rgba::BLACK), "outside pixel filled");
        rp.check(
            image.pixel(2, 1) == Some(Rgba::rgb(200, 128, 128)),
            "inside pixel kept",
        );
    }

    // --- Test 2: distance filtering with both measures agrees on a gray ramp ---
    let ramp = builders::gradient(16, 1, PixelFormat::Rgb24).expect("gradient");
    let mut euclid = ramp.clone();
    let mut manhattan = ramp.clone();
    color_filtering_by_distance(&mut euclid, Rgba::BLACK, 0, DistanceType::Euclidean, false, Rgba::WHITE)
        .expect("euclidean");
    color_filtering_by_distance(&mut manhattan, Rgba::BLACK, 0, DistanceType::Manhattan, false, Rgba::WHITE)
        .expect("manhattan");
    rp.compare_images(&euclid, &manhattan);
    rp.compare_values(255.0, euclid.row(0)[0] as f64, 0.0);

    // --- Test 3: identity remapping is a no-op ---
    let identity = ColorMaps::identity();
    let src = builders::pattern(9, 7, PixelFormat::Rgba32, 31).expect("pattern");
    let mut remapped = src.clone();
    color_remapping(&mut remapped, &identity.red, &identity.green, &identity.blue).expect("remap");
    rp.compare_images(&src, &remapped);
    let gray = builders::pattern(9, 7, PixelFormat::Grayscale8, 32).expect("pattern");
    let mut remapped = gray.clone();
    grayscale_remapping(&mut remapped, &identity.red).expect("gray remap");
    rp.compare_images(&gray, &remapped);

    // --- Test 4: three channel rotations restore the image ---
    let mut rotated = src.clone();
    for _ in 0..3 {
        rotate_rgb_channels(&mut rotated).expect("rotate");
    }
    rp.compare_images(&src, &rotated);

    // --- Test 5: heat pseudo-color of a ramp runs black to white ---
    let ramp = builders::gradient(256, 1, PixelFormat::Grayscale8).expect("gradient");
    let mut heat = Image::new(256, 1, PixelFormat::Rgb24).expect("heat");
    grayscale_remapping_to_rgb(&ramp, &mut heat, &heat_gradient()).expect("pseudo-color");
    rp.check(heat.pixel(0, 0) == Some(Rgba::BLACK), "heat starts black");
    rp.check(heat.pixel(255, 0) == Some(Rgba::WHITE), "heat ends white");

    // --- Test 6: full-amplitude noise stays in range and is reproducible ---
    let base = builders::uniform(32, 8, PixelFormat::Rgb24, 128).expect("base");
    let mut a = base.clone();
    let mut b = base.clone();
    uniform_additive_noise_seeded(&mut a, 255, 99).expect("noise");
    uniform_additive_noise_seeded(&mut b, 255, 99).expect("noise");
    rp.compare_images(&a, &b);
    let bytes: Vec<u8> = (0..8).flat_map(|y| a.row(y).to_vec()).collect();
    rp.check(bytes.contains(&0) && bytes.contains(&255), "noise clamps at both ends");
    eprintln!("  noisy first row: {:?}", &a.row(0)[..12]);

    assert!(rp.cleanup(), "color regression test failed");
}
