//! Device-space geometry.
//!
//! All coordinates handed to the rasterizer are already transformed into
//! device (output pixel) space: `x` grows to the right, `y` grows downwards,
//! and pixel `(i, j)` covers `[i, i + 1) × [j, j + 1)`.

/// A 2D point with floating-point coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
}

impl Point {
    /// Origin point (0, 0).
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    /// Create a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Multiply both coordinates by `factor`.
    #[must_use]
    pub fn scale(self, factor: f32) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    /// 2D cross product of the vectors `self` and `other`.
    #[must_use]
    pub fn cross(self, other: Self) -> f32 {
        self.x * other.y - self.y * other.x
    }
}

impl std::ops::Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_scale() {
        let p = Point::new(1.5, -2.0).scale(4.0);
        assert_eq!(p, Point::new(6.0, -8.0));
    }

    #[test]
    fn test_cross() {
        let a = Point::new(4.0, 0.0);
        let b = Point::new(0.0, 4.0);
        assert_eq!(a.cross(b), 16.0);
        assert_eq!(b.cross(a), -16.0);
        assert_eq!(a.cross(a), 0.0);
    }

    #[test]
    fn test_sub_and_from_tuple() {
        let p: Point = (3.0, 5.0).into();
        assert_eq!(p - Point::new(1.0, 1.0), Point::new(2.0, 4.0));
        assert_eq!(Point::ORIGIN, Point::default());
    }
}
