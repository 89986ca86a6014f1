//! In-place translation

use tracing::{debug, trace};
use ximaging_core::check::{BYTE_FORMATS, check_format};
use ximaging_core::{Image, Rgba};

use crate::TransformResult;

/// Shift the content of `image` by `(dx, dy)` pixels in place.
///
/// Rows are processed bottom-up for `dy > 0` and top-down otherwise, so no
/// source row is overwritten before it has been moved; within a row the
/// move is an overlapping `copy_within`. The exposed area is filled with
/// `fill` when given and left as it was otherwise. Shifts of at least the
/// image size expose the whole image.
pub fn shift_image(image: &mut Image, dx: i32, dy: i32, fill: Option<Rgba>) -> TransformResult<()> {
    check_format(image, BYTE_FORMATS)?;
    let (w, h) = (image.width() as i64, image.height() as i64);
    let (dx, dy) = (dx as i64, dy as i64);
    let bpp = image.bytes_per_pixel();
    let stride = image.stride();
    let fill = fill.map(|c| c.format_bytes(image.format()));
    trace!(w, h, dx, dy, "shift_image");

    if dx.abs() >= w || dy.abs() >= h {
        debug!("shift_image: content shifted out entirely");
        if let Some(fill) = fill {
            fill_rect(image, 0, 0, w as usize, h as usize, &fill[..bpp]);
        }
        return Ok(());
    }

    // columns that keep content
    let (src_x, dst_x) = if dx >= 0 { (0, dx) } else { (-dx, 0) };
    let run = (w - dx.abs()) as usize * bpp;
    let rows: Box<dyn Iterator<Item = i64>> = if dy > 0 {
        Box::new((dy..h).rev())
    } else {
        Box::new(0..h + dy)
    };
    let data = image.data_mut();
    for y in rows {
        let from = (y - dy) as usize * stride + src_x as usize * bpp;
        let to = y as usize * stride + dst_x as usize * bpp;
        data.copy_within(from..from + run, to);
    }

    if let Some(fill) = fill {
        let fill = &fill[..bpp];
        let (kept_y0, kept_y1) = if dy >= 0 { (dy, h) } else { (0, h + dy) };
        fill_rect(image, 0, 0, w as usize, kept_y0 as usize, fill);
        fill_rect(image, 0, kept_y1 as usize, w as usize, h as usize, fill);
        let (gap_x0, gap_x1) = if dx >= 0 { (0, dx) } else { (w + dx, w) };
        for y in kept_y0..kept_y1 {
            let row = image.row_mut(y as u32);
            for px in row[gap_x0 as usize * bpp..gap_x1 as usize * bpp].chunks_exact_mut(bpp) {
                px.copy_from_slice(fill);
            }
        }
    }
    Ok(())
}

/// Fill rows `y0..y1`, columns `x0..x1` with `px`.
fn fill_rect(image: &mut Image, x0: usize, y0: usize, x1: usize, y1: usize, px: &[u8]) {
    let bpp = px.len();
    for y in y0..y1 {
        for dst in image.row_mut(y as u32)[x0 * bpp..x1 * bpp].chunks_exact_mut(bpp) {
            dst.copy_from_slice(px);
        }
    }
}
