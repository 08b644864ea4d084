#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! All coordinates are in the panel container's space, with `y` increasing
//! downward. A smaller `y` therefore means a more open panel.

/// A 2D point or vector.
///
/// Used for drag translations, drag velocities (points per second) and
/// child scroll content offsets. Only the vertical component carries meaning
/// for the engine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// The origin.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new point.
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// A purely vertical vector.
    #[inline]
    #[must_use]
    pub const fn vertical(y: f64) -> Self {
        Self { x: 0.0, y }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// The empty rectangle at the origin.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Create a new rectangle.
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Top edge (alias for y).
    #[inline]
    #[must_use]
    pub const fn min_y(&self) -> f64 {
        self.y
    }

    /// Bottom edge.
    #[inline]
    #[must_use]
    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    /// The same rectangle moved vertically so its top edge sits at `y`.
    #[inline]
    #[must_use]
    pub const fn with_origin_y(mut self, y: f64) -> Self {
        self.y = y;
        self
    }

    /// Check if a point is inside the rectangle (left/top inclusive,
    /// right/bottom exclusive).
    #[inline]
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.max_y()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_half_open() {
        let r = Rect::new(0.0, 10.0, 100.0, 20.0);
        assert!(r.contains(Point::new(0.0, 10.0)));
        assert!(r.contains(Point::new(99.9, 29.9)));
        assert!(!r.contains(Point::new(100.0, 15.0)));
        assert!(!r.contains(Point::new(50.0, 30.0)));
        assert!(!r.contains(Point::new(50.0, 9.9)));
    }

    #[test]
    fn with_origin_y_keeps_size() {
        let r = Rect::new(4.0, 10.0, 320.0, 640.0).with_origin_y(250.0);
        assert_eq!(r, Rect::new(4.0, 250.0, 320.0, 640.0));
        assert_eq!(r.min_y(), 250.0);
        assert_eq!(r.max_y(), 890.0);
    }
}
