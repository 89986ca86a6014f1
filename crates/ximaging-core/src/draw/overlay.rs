//! Drawing one image onto another

use tracing::trace;

use super::blend_pixel;
use crate::check::{BYTE_FORMATS, check_format};
use crate::error::Result;
use crate::geometry::{Point, Rect};
use crate::image::{Image, read_rgba};
use crate::parallel::for_each_row;

/// Draw `source` onto `target` with its top-left corner at `position`.
///
/// Pixels are converted between Grayscale8, RGB24 and RGBA32 as needed
/// (color to gray uses BT.709 luma). RGBA sources are alpha-blended; other
/// sources overwrite the target, an RGBA target becoming opaque. Parts
/// outside the target are clipped.
pub fn draw_image(target: &mut Image, source: &Image, position: Point) -> Result<()> {
    check_format(target, BYTE_FORMATS)?;
    check_format(source, BYTE_FORMATS)?;

    let placed = Rect::new(
        position.x,
        position.y,
        source.width() as i32,
        source.height() as i32,
    );
    let Some(r) = placed.clip(target.width(), target.height()) else {
        return Ok(());
    };
    trace!(?position, ?r, "draw_image");

    let format = target.format();
    let src_format = source.format();
    let bpp = format.bytes_per_pixel();
    let blend = src_format.has_alpha();

    for_each_row(target, |y, row| {
        let y = y as i32;
        if y < r.y || y >= r.bottom() {
            return;
        }
        let src_row = source.row((y - position.y) as u32);
        for x in r.x..r.right() {
            let color = read_rgba(src_row, (x - position.x) as u32, src_format);
            let px = &mut row[x as usize * bpp..][..bpp];
            if blend {
                blend_pixel(px, color, format);
            } else {
                px.copy_from_slice(&color.format_bytes(format)[..bpp]);
            }
        }
    });
    Ok(())
}
