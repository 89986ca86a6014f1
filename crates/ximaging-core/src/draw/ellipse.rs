//! Circles, ellipses and rings
//!
//! Outlines come from the midpoint circle / midpoint ellipse algorithms.
//! Fills use the same rasterization reduced to one half-width per row
//! offset, so a filled shape covers exactly its outline and interior.

use tracing::trace;

use super::Canvas;
use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::geometry::Point;
use crate::image::Image;

/// Visit the first-octant points `(x, y)`, `x >= y`, of a midpoint circle.
fn circle_octant<F: FnMut(i32, i32)>(radius: u32, mut visit: F) {
    let r = radius as i32;
    let (mut x, mut y, mut d) = (r, 0i32, 1 - r);
    while x >= y {
        visit(x, y);
        y += 1;
        if d < 0 {
            d += 2 * y + 1;
        } else {
            x -= 1;
            d += 2 * (y - x) + 1;
        }
    }
}

/// Half-width of a midpoint circle for each row offset `0..=radius`.
///
/// Row `cy ± dy` of a filled circle spans `cx - hw[dy] ..= cx + hw[dy]`.
pub(crate) fn circle_half_widths(radius: u32) -> Vec<i32> {
    let mut hw = vec![0i32; radius as usize + 1];
    circle_octant(radius, |x, y| {
        let (xu, yu) = (x as usize, y as usize);
        hw[yu] = hw[yu].max(x);
        hw[xu] = hw[xu].max(y);
    });
    hw
}

/// Visit the first-quadrant points of a midpoint ellipse.
fn ellipse_quadrant<F: FnMut(i32, i32)>(rx: u32, ry: u32, mut visit: F) {
    if ry == 0 {
        for x in 0..=rx as i32 {
            visit(x, 0);
        }
        return;
    }

    let rx2 = rx as f64 * rx as f64;
    let ry2 = ry as f64 * ry as f64;
    let (mut x, mut y) = (0i32, ry as i32);
    let mut px = 0.0f64;
    let mut py = 2.0 * rx2 * y as f64;

    // region 1: slope above -1
    let mut p = ry2 - rx2 * ry as f64 + 0.25 * rx2;
    visit(x, y);
    while px < py {
        x += 1;
        px += 2.0 * ry2;
        if p < 0.0 {
            p += ry2 + px;
        } else {
            y -= 1;
            py -= 2.0 * rx2;
            p += ry2 + px - py;
        }
        visit(x, y);
    }

    // region 2
    let fx = x as f64 + 0.5;
    let fy = (y - 1) as f64;
    p = ry2 * fx * fx + rx2 * fy * fy - rx2 * ry2;
    while y > 0 {
        y -= 1;
        py -= 2.0 * rx2;
        if p > 0.0 {
            p += rx2 - py;
        } else {
            x += 1;
            px += 2.0 * ry2;
            p += rx2 - py + px;
        }
        visit(x, y);
    }

    // region 2 can reach the axis short of rx on flat ellipses
    while x < rx as i32 {
        x += 1;
        visit(x, 0);
    }
}

/// Half-width of a midpoint ellipse for each row offset `0..=ry`.
pub(crate) fn ellipse_half_widths(rx: u32, ry: u32) -> Vec<i32> {
    let mut hw = vec![0i32; ry as usize + 1];
    ellipse_quadrant(rx, ry, |x, y| {
        let yu = y as usize;
        hw[yu] = hw[yu].max(x);
    });
    hw
}

fn fill_rows(canvas: &mut Canvas<'_>, center: Point, hw: &[i32]) {
    for (dy, &w) in hw.iter().enumerate() {
        let dy = dy as i32;
        canvas.hline(center.x - w, center.x + w, center.y + dy);
        if dy != 0 {
            canvas.hline(center.x - w, center.x + w, center.y - dy);
        }
    }
}

/// Draw the outline of a circle.
pub fn draw_circle(image: &mut Image, center: Point, radius: u32, color: Rgba) -> Result<()> {
    let mut canvas = Canvas::set(image, color)?;
    trace!(?center, radius, "draw_circle");
    let (cx, cy) = (center.x, center.y);
    circle_octant(radius, |x, y| {
        for (dx, dy) in [(x, y), (y, x)] {
            canvas.plot(cx + dx, cy + dy);
            canvas.plot(cx - dx, cy + dy);
            canvas.plot(cx + dx, cy - dy);
            canvas.plot(cx - dx, cy - dy);
        }
    });
    Ok(())
}

/// Fill a circle with `color`.
pub fn fill_circle(image: &mut Image, center: Point, radius: u32, color: Rgba) -> Result<()> {
    let mut canvas = Canvas::set(image, color)?;
    trace!(?center, radius, "fill_circle");
    fill_rows(&mut canvas, center, &circle_half_widths(radius));
    Ok(())
}

/// Fill a circle, alpha-blending `color`.
pub fn blend_circle(image: &mut Image, center: Point, radius: u32, color: Rgba) -> Result<()> {
    let mut canvas = Canvas::blend(image, color)?;
    trace!(?center, radius, "blend_circle");
    fill_rows(&mut canvas, center, &circle_half_widths(radius));
    Ok(())
}

/// Fill the ring between two circles, alpha-blending `color`.
///
/// The ring covers the disk of radius `r2` minus the disk of radius
/// `r1 - 1`, so both boundary circles belong to it. `r1 == 0` gives the
/// full disk.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if `r1 > r2`.
pub fn blend_ring(image: &mut Image, center: Point, r1: u32, r2: u32, color: Rgba) -> Result<()> {
    let mut canvas = Canvas::blend(image, color)?;
    if r1 > r2 {
        return Err(Error::InvalidArgument(format!(
            "inner radius {r1} exceeds outer radius {r2}"
        )));
    }
    trace!(?center, r1, r2, "blend_ring");

    for (dy, x1, x2) in ring_spans(r1, r2) {
        canvas.hline(center.x + x1, center.x + x2, center.y + dy);
    }
    Ok(())
}

/// Spans `(dy, x1, x2)` of a ring relative to its center, one or two per
/// row offset `-r2..=r2`, ordered by row then by x.
pub(crate) fn ring_spans(r1: u32, r2: u32) -> Vec<(i32, i32, i32)> {
    let outer = circle_half_widths(r2);
    let inner = (r1 > 0).then(|| circle_half_widths(r1 - 1));
    let r2 = r2 as i32;

    let mut spans = Vec::with_capacity(2 * (2 * r2 as usize + 1));
    for dy in -r2..=r2 {
        let ady = dy.unsigned_abs();
        let w = outer[ady as usize];
        match &inner {
            Some(inner) if ady < r1 => {
                let h = inner[ady as usize];
                if h < w {
                    spans.push((dy, -w, -h - 1));
                    spans.push((dy, h + 1, w));
                }
            }
            _ => spans.push((dy, -w, w)),
        }
    }
    spans
}

/// Draw the outline of an axis-aligned ellipse.
pub fn draw_ellipse(image: &mut Image, center: Point, rx: u32, ry: u32, color: Rgba) -> Result<()> {
    let mut canvas = Canvas::set(image, color)?;
    trace!(?center, rx, ry, "draw_ellipse");
    let (cx, cy) = (center.x, center.y);
    ellipse_quadrant(rx, ry, |x, y| {
        canvas.plot(cx + x, cy + y);
        canvas.plot(cx - x, cy + y);
        canvas.plot(cx + x, cy - y);
        canvas.plot(cx - x, cy - y);
    });
    Ok(())
}

/// Fill an axis-aligned ellipse with `color`.
pub fn fill_ellipse(image: &mut Image, center: Point, rx: u32, ry: u32, color: Rgba) -> Result<()> {
    let mut canvas = Canvas::set(image, color)?;
    trace!(?center, rx, ry, "fill_ellipse");
    fill_rows(&mut canvas, center, &ellipse_half_widths(rx, ry));
    Ok(())
}

/// Fill an axis-aligned ellipse, alpha-blending `color`.
pub fn blend_ellipse(image: &mut Image, center: Point, rx: u32, ry: u32, color: Rgba) -> Result<()> {
    let mut canvas = Canvas::blend(image, color)?;
    trace!(?center, rx, ry, "blend_ellipse");
    fill_rows(&mut canvas, center, &ellipse_half_widths(rx, ry));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::PixelFormat;

    #[test]
    fn test_circle_half_widths() {
        assert_eq!(circle_half_widths(0), vec![0]);
        assert_eq!(circle_half_widths(1), vec![1, 0]);
        let hw = circle_half_widths(5);
        assert_eq!(hw[0], 5);
        assert_eq!(hw, vec![5, 5, 5, 4, 3, 2]);
        // monotonically non-increasing away from the center row
        assert!(hw.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_fill_circle_symmetric() {
        let mut image = Image::new(11, 11, PixelFormat::Grayscale8).unwrap();
        fill_circle(&mut image, Point::new(5, 5), 5, Rgba::WHITE).unwrap();
        for y in 0..11 {
            for x in 0..11 {
                assert_eq!(image.pixel(x, y), image.pixel(10 - x, y));
                assert_eq!(image.pixel(x, y), image.pixel(x, 10 - y));
            }
        }
        assert_eq!(image.pixel(5, 0), Some(Rgba::WHITE));
        assert_eq!(image.pixel(0, 0), Some(Rgba::BLACK));
    }

    #[test]
    fn test_outline_inside_fill() {
        let mut outline = Image::new(13, 13, PixelFormat::Grayscale8).unwrap();
        let mut filled = outline.clone();
        draw_circle(&mut outline, Point::new(6, 6), 6, Rgba::WHITE).unwrap();
        fill_circle(&mut filled, Point::new(6, 6), 6, Rgba::WHITE).unwrap();
        for y in 0..13 {
            for x in 0..13 {
                if outline.pixel(x, y) == Some(Rgba::WHITE) {
                    assert_eq!(filled.pixel(x, y), Some(Rgba::WHITE), "({x}, {y})");
                }
            }
        }
    }

    #[test]
    fn test_ring_has_hole() {
        let mut image = Image::new(21, 21, PixelFormat::Grayscale8).unwrap();
        blend_ring(&mut image, Point::new(10, 10), 5, 8, Rgba::WHITE).unwrap();
        assert_eq!(image.pixel(10, 10), Some(Rgba::BLACK));
        assert_eq!(image.pixel(12, 10), Some(Rgba::BLACK));
        assert_eq!(image.pixel(15, 10), Some(Rgba::WHITE));
        assert_eq!(image.pixel(18, 10), Some(Rgba::WHITE));
        assert_eq!(image.pixel(19, 10), Some(Rgba::BLACK));
        assert!(blend_ring(&mut image, Point::new(10, 10), 9, 8, Rgba::WHITE).is_err());
    }

    #[test]
    fn test_ring_without_hole_is_disk() {
        let mut ring = Image::new(15, 15, PixelFormat::Rgb24).unwrap();
        let mut disk = ring.clone();
        blend_ring(&mut ring, Point::new(7, 7), 0, 6, Rgba::GREEN).unwrap();
        blend_circle(&mut disk, Point::new(7, 7), 6, Rgba::GREEN).unwrap();
        assert_eq!(ring, disk);
    }

    #[test]
    fn test_ellipse_extent() {
        let hw = ellipse_half_widths(6, 3);
        assert_eq!(hw.len(), 4);
        assert_eq!(hw[0], 6);
        assert!(hw[3] < 6);

        let mut image = Image::new(15, 9, PixelFormat::Grayscale8).unwrap();
        fill_ellipse(&mut image, Point::new(7, 4), 6, 3, Rgba::WHITE).unwrap();
        assert_eq!(image.pixel(1, 4), Some(Rgba::WHITE));
        assert_eq!(image.pixel(13, 4), Some(Rgba::WHITE));
        assert_eq!(image.pixel(0, 4), Some(Rgba::BLACK));
        assert_eq!(image.pixel(7, 1), Some(Rgba::WHITE));
        assert_eq!(image.pixel(7, 0), Some(Rgba::BLACK));
    }

    #[test]
    fn test_half_widths_reach_semi_axis() {
        for rx in 0..40 {
            for ry in 0..40 {
                let hw = ellipse_half_widths(rx, ry);
                assert_eq!(hw[0], rx as i32, "rx={rx} ry={ry}");
                assert!(hw.windows(2).all(|w| w[0] >= w[1]), "rx={rx} ry={ry}");
            }
        }

        let mut image = Image::new(19, 3, PixelFormat::Grayscale8).unwrap();
        draw_ellipse(&mut image, Point::new(9, 1), 8, 1, Rgba::WHITE).unwrap();
        assert_eq!(image.pixel(1, 1), Some(Rgba::WHITE));
        assert_eq!(image.pixel(17, 1), Some(Rgba::WHITE));
        assert_eq!(image.pixel(0, 1), Some(Rgba::BLACK));
        assert_eq!(image.pixel(18, 1), Some(Rgba::BLACK));
    }

    #[test]
    fn test_flat_ellipse() {
        let mut image = Image::new(7, 3, PixelFormat::Grayscale8).unwrap();
        draw_ellipse(&mut image, Point::new(3, 1), 3, 0, Rgba::WHITE).unwrap();
        assert_eq!(image.row(1), &[255; 7]);
        assert_eq!(image.row(0), &[0; 7]);
    }
}
