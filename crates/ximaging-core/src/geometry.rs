//! Point and Rect - integer geometry shared by drawing and filters

/// A point in image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Create a new point
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Clamp both coordinates into `[0, width) x [0, height)`.
    ///
    /// `width` and `height` must be non-zero.
    pub fn clamp(self, width: u32, height: u32) -> Self {
        Self {
            x: self.x.clamp(0, width as i32 - 1),
            y: self.y.clamp(0, height as i32 - 1),
        }
    }
}

/// A rectangle region
///
/// `right()` and `bottom()` are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// Left x coordinate
    pub x: i32,
    /// Top y coordinate
    pub y: i32,
    /// Width
    pub width: i32,
    /// Height
    pub height: i32,
}

impl Rect {
    /// Create a new rectangle
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Smallest rectangle containing both points (inclusive corners).
    pub fn from_points(p1: Point, p2: Point) -> Self {
        let x = p1.x.min(p2.x);
        let y = p1.y.min(p2.y);
        Self {
            x,
            y,
            width: p1.x.max(p2.x) - x + 1,
            height: p1.y.max(p2.y) - y + 1,
        }
    }

    /// Get the right x coordinate (exclusive)
    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Get the bottom y coordinate (exclusive)
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Check if the rectangle is empty (zero area)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Check if a point is inside the rectangle
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    /// Intersect with the `width x height` image area.
    ///
    /// Returns `None` when nothing of the rectangle is visible.
    pub fn clip(&self, width: u32, height: u32) -> Option<Rect> {
        let x1 = self.x.max(0);
        let y1 = self.y.max(0);
        let x2 = self.right().min(width as i32);
        let y2 = self.bottom().min(height as i32);
        if x1 >= x2 || y1 >= y2 {
            return None;
        }
        Some(Rect::new(x1, y1, x2 - x1, y2 - y1))
    }
}
