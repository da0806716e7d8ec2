//! Points and measured boxes shared by the mappers and the host adapter.

use serde::{Deserialize, Serialize};

/// A 2D point.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Both coordinates are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Express this point relative to `origin`.
    pub fn relative_to(&self, origin: Point) -> Point {
        Point::new(self.x - origin.x, self.y - origin.y)
    }
}

/// A box reported by the host layout system: absolute position plus size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Get the center point of this box.
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// The same size placed at the origin, i.e. the box in its own local space.
    pub fn local(&self) -> Bounds {
        Bounds::new(0.0, 0.0, self.width, self.height)
    }

    /// True when the measurement produced a usable, non-empty box.
    pub fn is_measured(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_contains_edges() {
        let b = Bounds::new(10.0, 20.0, 100.0, 50.0);
        assert!(b.contains(Point::new(10.0, 20.0)));
        assert!(b.contains(Point::new(110.0, 70.0)));
        assert!(!b.contains(Point::new(110.1, 70.0)));
        assert!(!b.contains(Point::new(9.9, 30.0)));
    }

    #[test]
    fn test_local_and_relative() {
        let b = Bounds::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(b.local(), Bounds::new(0.0, 0.0, 100.0, 50.0));
        assert_eq!(
            Point::new(15.0, 25.0).relative_to(b.position()),
            Point::new(5.0, 5.0)
        );
    }

    #[test]
    fn test_unmeasured_bounds() {
        assert!(!Bounds::default().is_measured());
        assert!(!Bounds::new(0.0, 0.0, f32::NAN, 10.0).is_measured());
        assert!(Bounds::new(0.0, 0.0, 1.0, 1.0).is_measured());
    }
}
