//! Run length smoothing
//!
//! Works on binarized Grayscale8 images: 0 is black, anything else white.
//! A white run shorter than `max_gap` with black on both ends is blackened,
//! which joins nearby black strokes (a classic step of text block
//! segmentation).

use tracing::trace;
use ximaging_core::check::check_format;
use ximaging_core::parallel::for_each_row;
use ximaging_core::{Image, PixelFormat};

use crate::EffectsResult;

/// Smooth one line in place.
///
/// Runs touching an end of the line count only when `process_border_gaps`
/// is set; a line that is white from end to end is never touched.
fn smooth_line(line: &mut [u8], max_gap: usize, process_border_gaps: bool) {
    let len = line.len();
    let mut x = 0;
    while x < len {
        if line[x] == 0 {
            x += 1;
            continue;
        }
        let start = x;
        while x < len && line[x] != 0 {
            x += 1;
        }
        let bounded = start > 0 && x < len;
        let border = (start == 0) != (x == len);
        if x - start < max_gap && (bounded || (process_border_gaps && border)) {
            line[start..x].fill(0);
        }
    }
}

/// Smooth every row.
///
/// # Errors
///
/// Format Grayscale8.
pub fn horizontal_run_length_smoothing(image: &mut Image, max_gap: u32, process_border_gaps: bool) -> EffectsResult<()> {
    check_format(image, &[PixelFormat::Grayscale8])?;
    trace!(w = image.width(), h = image.height(), max_gap, process_border_gaps, "horizontal_run_length_smoothing");
    let max_gap = max_gap as usize;
    for_each_row(image, |_, row| smooth_line(row, max_gap, process_border_gaps));
    Ok(())
}

/// Smooth every column.
///
/// Columns are gathered one at a time into a scratch line, smoothed and
/// written back.
///
/// # Errors
///
/// Format Grayscale8.
pub fn vertical_run_length_smoothing(image: &mut Image, max_gap: u32, process_border_gaps: bool) -> EffectsResult<()> {
    check_format(image, &[PixelFormat::Grayscale8])?;
    trace!(w = image.width(), h = image.height(), max_gap, process_border_gaps, "vertical_run_length_smoothing");

    let (w, h) = (image.width() as usize, image.height());
    let max_gap = max_gap as usize;
    let mut column = vec![0u8; h as usize];
    for x in 0..w {
        for (y, v) in column.iter_mut().enumerate() {
            *v = image.row(y as u32)[x];
        }
        smooth_line(&mut column, max_gap, process_border_gaps);
        for (y, &v) in column.iter().enumerate() {
            image.row_mut(y as u32)[x] = v;
        }
    }
    Ok(())
}
