//! Lines

use tracing::trace;

use super::Canvas;
use crate::color::Rgba;
use crate::error::Result;
use crate::geometry::Point;
use crate::image::Image;

/// Bresenham line in step form.
///
/// Step `k` in `0..=last_step()` sits at `major = a + sa * k` and
/// `minor = b + sb * m(k)`, where `m(k)` counts the minor moves made before
/// step `k`. Any step can be reached directly, so a walk can start and stop
/// anywhere on the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Steps {
    steep: bool,
    a: i64,
    b: i64,
    da: i64,
    db: i64,
    sa: i64,
    sb: i64,
}

impl Steps {
    pub(crate) fn new(p1: Point, p2: Point) -> Self {
        let (x1, y1, x2, y2) = (p1.x as i64, p1.y as i64, p2.x as i64, p2.y as i64);
        let (dx, dy) = ((x2 - x1).abs(), (y2 - y1).abs());
        let sx = if x2 > x1 { 1 } else { -1 };
        let sy = if y2 > y1 { 1 } else { -1 };
        if dx >= dy {
            Self {
                steep: false,
                a: x1,
                b: y1,
                da: dx,
                db: dy,
                sa: sx,
                sb: sy,
            }
        } else {
            Self {
                steep: true,
                a: y1,
                b: x1,
                da: dy,
                db: dx,
                sa: sy,
                sb: sx,
            }
        }
    }

    /// Whether y is the major axis.
    #[inline]
    pub(crate) fn is_steep(&self) -> bool {
        self.steep
    }

    /// Index of the last step.
    #[inline]
    pub(crate) fn last_step(&self) -> i64 {
        self.da
    }

    /// Minor moves made before step `k`.
    fn minor_moves(&self, k: i64) -> i64 {
        if self.da == 0 {
            return 0;
        }
        let (k, da, db) = (k as i128, self.da as i128, self.db as i128);
        ((k * db - (da / 2) + da - 1) / da) as i64
    }

    fn at(&self, k: i64, m: i64) -> (i32, i32) {
        let major = (self.a + self.sa * k) as i32;
        let minor = (self.b + self.sb * m) as i32;
        if self.steep { (minor, major) } else { (major, minor) }
    }

    /// Point at step `k`.
    pub(crate) fn point(&self, k: i64) -> (i32, i32) {
        self.at(k, self.minor_moves(k))
    }

    /// Steps whose major coordinate lies in `lo..=hi`.
    pub(crate) fn major_range(&self, lo: i64, hi: i64) -> Option<(i64, i64)> {
        let (k0, k1) = if self.sa > 0 {
            (lo - self.a, hi - self.a)
        } else {
            (self.a - hi, self.a - lo)
        };
        let (k0, k1) = (k0.max(0), k1.min(self.da));
        (k0 <= k1).then_some((k0, k1))
    }

    /// Visit steps `k0..=k1` in order.
    pub(crate) fn walk<F: FnMut(i32, i32)>(&self, k0: i64, k1: i64, mut visit: F) {
        let mut m = self.minor_moves(k0);
        let mut err =
            (self.da / 2) as i128 - k0 as i128 * self.db as i128 + m as i128 * self.da as i128;
        for k in k0..=k1 {
            let (x, y) = self.at(k, m);
            visit(x, y);
            err -= self.db as i128;
            if err < 0 {
                m += 1;
                err += self.da as i128;
            }
        }
    }
}

/// Visit the points of the line from `p1` to `p2` (both inclusive) using
/// Bresenham's integer algorithm.
///
/// Every point is visited exactly once, in order from `p1`, with
/// 8-connectivity.
pub fn bresenham<F: FnMut(i32, i32)>(p1: Point, p2: Point, visit: F) {
    let steps = Steps::new(p1, p2);
    steps.walk(0, steps.last_step(), visit);
}

/// Render the part of the line whose major coordinate falls in the image.
fn render(canvas: &mut Canvas<'_>, p1: Point, p2: Point) {
    let steps = Steps::new(p1, p2);
    let extent = if steps.is_steep() { canvas.height() } else { canvas.width() };
    if let Some((k0, k1)) = steps.major_range(0, extent as i64 - 1) {
        steps.walk(k0, k1, |x, y| canvas.plot(x, y));
    }
}

/// Draw a line with `color`.
pub fn draw_line(image: &mut Image, p1: Point, p2: Point, color: Rgba) -> Result<()> {
    let mut canvas = Canvas::set(image, color)?;
    trace!(?p1, ?p2, "draw_line");
    render(&mut canvas, p1, p2);
    Ok(())
}

/// Draw a line alpha-blended with `color`.
pub fn blend_line(image: &mut Image, p1: Point, p2: Point, color: Rgba) -> Result<()> {
    let mut canvas = Canvas::blend(image, color)?;
    trace!(?p1, ?p2, "blend_line");
    render(&mut canvas, p1, p2);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::PixelFormat;

    fn points(p1: Point, p2: Point) -> Vec<(i32, i32)> {
        let mut v = Vec::new();
        bresenham(p1, p2, |x, y| v.push((x, y)));
        v
    }

    #[test]
    fn test_single_point() {
        assert_eq!(points(Point::new(3, 3), Point::new(3, 3)), vec![(3, 3)]);
    }

    #[test]
    fn test_diagonal_and_reverse() {
        assert_eq!(
            points(Point::new(0, 0), Point::new(3, 3)),
            vec![(0, 0), (1, 1), (2, 2), (3, 3)]
        );
        assert_eq!(
            points(Point::new(3, 0), Point::new(0, 0)),
            vec![(3, 0), (2, 0), (1, 0), (0, 0)]
        );
    }

    #[test]
    fn test_steep_line_is_connected() {
        let pts = points(Point::new(0, 0), Point::new(2, 9));
        assert_eq!(pts.len(), 10);
        for w in pts.windows(2) {
            assert!((w[1].0 - w[0].0).abs() <= 1);
            assert_eq!(w[1].1 - w[0].1, 1);
        }
        assert_eq!(*pts.last().unwrap(), (2, 9));
    }

    #[test]
    fn test_draw_line_clips() {
        let mut image = Image::new(4, 4, PixelFormat::Grayscale8).unwrap();
        draw_line(&mut image, Point::new(-2, 1), Point::new(10, 1), Rgba::WHITE).unwrap();
        assert_eq!(image.row(1), &[255; 4]);
        assert_eq!(image.row(0), &[0; 4]);
    }

    #[test]
    fn test_walk_from_any_step() {
        for (p1, p2) in [
            (Point::new(0, 0), Point::new(17, 5)),
            (Point::new(4, 9), Point::new(-3, -11)),
            (Point::new(-6, 2), Point::new(6, -2)),
        ] {
            let full = points(p1, p2);
            let steps = Steps::new(p1, p2);
            assert_eq!(steps.last_step() as usize + 1, full.len());
            for k0 in 0..full.len() {
                assert_eq!(steps.point(k0 as i64), full[k0]);
                let mut tail = Vec::new();
                steps.walk(k0 as i64, steps.last_step(), |x, y| tail.push((x, y)));
                assert_eq!(tail, full[k0..]);
            }
        }
    }

    #[test]
    fn test_far_endpoints() {
        let mut image = Image::new(8, 8, PixelFormat::Grayscale8).unwrap();
        draw_line(
            &mut image,
            Point::new(-1_500_000_000, 3),
            Point::new(1_500_000_000, 3),
            Rgba::WHITE,
        )
        .unwrap();
        assert_eq!(image.row(3), &[255; 8]);
        assert_eq!(image.row(2), &[0; 8]);

        let mut image = Image::new(8, 8, PixelFormat::Grayscale8).unwrap();
        draw_line(&mut image, Point::new(2, i32::MIN), Point::new(2, i32::MAX), Rgba::WHITE)
            .unwrap();
        for y in 0..8 {
            assert_eq!(image.row(y), &[0, 0, 255, 0, 0, 0, 0, 0]);
        }

        let mut image = Image::new(8, 8, PixelFormat::Grayscale8).unwrap();
        let far = 1_000_000_000;
        blend_line(&mut image, Point::new(-far, -far), Point::new(far, far), Rgba::WHITE).unwrap();
        for y in 0..8u32 {
            for x in 0..8u32 {
                let expected = if x == y { Rgba::WHITE } else { Rgba::BLACK };
                assert_eq!(image.pixel(x, y), Some(expected));
            }
        }
    }

    #[test]
    fn test_blend_line_half_alpha() {
        let mut image = Image::new(3, 1, PixelFormat::Grayscale8).unwrap();
        blend_line(&mut image, Point::new(0, 0), Point::new(2, 0), Rgba::new(255, 255, 255, 128))
            .unwrap();
        assert_eq!(image.row(0), &[128; 3]);
    }
}
