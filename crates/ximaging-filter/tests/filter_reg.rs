//! Neighborhood filter regression test
//!
//! Morphology, mean, mean shift, oil painting and edge detection on flat
//! and patterned synthetic images.

use ximaging_core::{Image, PixelFormat};
use ximaging_filter::{
    EdgeDetectorType, dilatation_3x3, edge_detector, erosion_3x3, mean_3x3, mean_shift,
    oil_painting,
};
use ximaging_test::{RegParams, builders};

#[test]
fn filter_reg() {
    let mut rp = RegParams::new("filter");

    // --- Test 1: Flat images are fixed points of the 3x3 filters ---
    for (w, h) in [(3, 3), (7, 5)] {
        for format in [PixelFormat::Grayscale8, PixelFormat::Rgb24, PixelFormat::Rgba32] {
            let flat = builders::uniform(w, h, format, 77).expect("flat");
            let mut dst = flat.create_template();
            dilatation_3x3(&flat, &mut dst).expect("dilatation");
            rp.compare_images(&flat, &dst);
            erosion_3x3(&flat, &mut dst).expect("erosion");
            rp.compare_images(&flat, &dst);
            mean_3x3(&flat, &mut dst).expect("mean");
            rp.compare_images(&flat, &dst);
        }
    }

    // --- Test 2: erosion <= source <= dilatation ---
    let src = builders::pattern(11, 9, PixelFormat::Rgba32, 3).expect("pattern");
    let mut lo = src.create_template();
    let mut hi = src.create_template();
    erosion_3x3(&src, &mut lo).expect("erosion");
    dilatation_3x3(&src, &mut hi).expect("dilatation");
    let ordered = (0..src.height()).all(|y| {
        src.row(y)
            .iter()
            .zip(lo.row(y))
            .zip(hi.row(y))
            .all(|((s, l), h)| l <= s && s <= h)
    });
    rp.check(ordered, "erosion <= source <= dilatation");

    // --- Test 3: Sobel of a flat image is zero ---
    let flat = builders::uniform(9, 6, PixelFormat::Grayscale8, 200).expect("flat");
    let mut edges = flat.create_template();
    for kind in [
        EdgeDetectorType::Difference,
        EdgeDetectorType::Homogeneity,
        EdgeDetectorType::Sobel,
    ] {
        edge_detector(&flat, &mut edges, kind, true).expect("edge_detector");
        rp.compare_images(&Image::new(9, 6, PixelFormat::Grayscale8).expect("zero"), &edges);
    }

    // --- Test 4: Mean shift and oil painting leave flat images alone ---
    for format in [PixelFormat::Grayscale8, PixelFormat::Rgb24, PixelFormat::Rgba32] {
        let flat = builders::uniform(8, 8, format, 140).expect("flat");
        let mut dst = flat.create_template();
        mean_shift(&flat, &mut dst, 3, 25).expect("mean_shift");
        rp.compare_images(&flat, &dst);
        oil_painting(&flat, &mut dst, 2).expect("oil_painting");
        rp.compare_images(&flat, &dst);
    }

    // --- Test 5: Edges of a checkerboard are found ---
    let board = builders::checkerboard(
        8,
        8,
        PixelFormat::Grayscale8,
        4,
        ximaging_core::Rgba::WHITE,
        ximaging_core::Rgba::BLACK,
    )
    .expect("checkerboard");
    let mut edges = board.create_template();
    edge_detector(&board, &mut edges, EdgeDetectorType::Difference, false).expect("difference");
    rp.compare_values(255.0, edges.row(2)[3] as f64, 0.0);
    rp.compare_values(0.0, edges.row(1)[1] as f64, 0.0);
    eprintln!("  checkerboard edge row 2: {:?}", edges.row(2));

    assert!(rp.cleanup(), "filter regression test failed");
}
