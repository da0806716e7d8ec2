//! Wheel and track geometry mathematics.
//!
//! This module contains the mapping between touch positions and the picker's
//! color coordinates, extracted for testability:
//! - the wheel maps a 2D point to polar `(angle, radius)`, angle being hue and
//!   radius being saturation;
//! - the track maps a point to a ratio in `[0, 1]` along its primary axis.
//!
//! All functions are pure; geometry is passed in on every call.

use serde::{Deserialize, Serialize};

use crate::layout::{Bounds, Point};

/// A position on the wheel in polar coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Polar {
    /// Degrees in `[0, 360)`, counter-clockwise from the positive x axis
    pub angle_deg: f32,
    /// Distance from the center, normalized so 1.0 is the wheel edge
    pub radius: f32,
}

/// A measured wheel: a circle in the wheel's local coordinate space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelGeometry {
    center: Point,
    radius: f32,
}

impl WheelGeometry {
    /// Create a wheel geometry. Returns `None` unless the radius is positive
    /// and everything is finite.
    pub fn new(center: Point, radius: f32) -> Option<Self> {
        (center.is_finite() && radius.is_finite() && radius > 0.0)
            .then_some(Self { center, radius })
    }

    /// The largest circle centered inside a measured box, in the box's local space.
    pub fn from_bounds(bounds: Bounds) -> Option<Self> {
        if !bounds.is_measured() {
            return None;
        }
        let local = bounds.local();
        Self::new(local.center(), local.width.min(local.height) / 2.0)
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// True if the point lies on the wheel (edge included).
    pub fn contains(&self, point: Point) -> bool {
        to_polar(point, self).radius <= 1.0
    }
}

/// Direction the value track runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Primary axis is x
    #[default]
    Horizontal,
    /// Primary axis is y
    Vertical,
}

/// A measured value track.
///
/// `origin` and `length` describe the thumb's travel along the primary axis.
/// The optional cross extent is the track's span on the other axis; without it
/// only the primary axis is checked for containment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackGeometry {
    origin: f32,
    length: f32,
    orientation: Orientation,
    cross: Option<(f32, f32)>,
}

impl TrackGeometry {
    /// Create a track geometry. Returns `None` unless the length is positive.
    pub fn new(origin: f32, length: f32, orientation: Orientation) -> Option<Self> {
        (origin.is_finite() && length.is_finite() && length > 0.0).then_some(Self {
            origin,
            length,
            orientation,
            cross: None,
        })
    }

    /// Restrict containment on the cross axis to `[start, start + thickness]`.
    pub fn with_cross_extent(mut self, start: f32, thickness: f32) -> Self {
        self.cross = Some((start, start + thickness.max(0.0)));
        self
    }

    /// Geometry for a measured slider box in its local space.
    ///
    /// The thumb is as thick as the track, so its travel is the long side
    /// minus the short side.
    pub fn from_bounds(bounds: Bounds, orientation: Orientation) -> Option<Self> {
        if !bounds.is_measured() {
            return None;
        }
        let (length, thickness) = match orientation {
            Orientation::Horizontal => (bounds.width - bounds.height, bounds.height),
            Orientation::Vertical => (bounds.height - bounds.width, bounds.width),
        };
        Self::new(0.0, length, orientation).map(|track| track.with_cross_extent(0.0, thickness))
    }

    pub fn origin(&self) -> f32 {
        self.origin
    }

    pub fn length(&self) -> f32 {
        self.length
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// The coordinate of `point` on the primary axis.
    pub fn primary(&self, point: Point) -> f32 {
        match self.orientation {
            Orientation::Horizontal => point.x,
            Orientation::Vertical => point.y,
        }
    }

    fn secondary(&self, point: Point) -> f32 {
        match self.orientation {
            Orientation::Horizontal => point.y,
            Orientation::Vertical => point.x,
        }
    }

    /// True if the point's primary coordinate lies within the thumb travel.
    pub fn contains_along(&self, point: Point) -> bool {
        let p = self.primary(point);
        p >= self.origin && p <= self.origin + self.length
    }

    /// True if the point lies on the track on both axes.
    pub fn contains(&self, point: Point) -> bool {
        if !self.contains_along(point) {
            return false;
        }
        match self.cross {
            Some((start, end)) => {
                let c = self.secondary(point);
                c >= start && c <= end
            }
            None => true,
        }
    }
}

fn wrap_degrees(deg: f32) -> f32 {
    let wrapped = deg.rem_euclid(360.0);
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Map a point to polar coordinates on the wheel.
///
/// Screen y grows downward, so the y delta is negated to keep hue increasing
/// counter-clockwise. Points outside the wheel give `radius > 1`.
pub fn to_polar(point: Point, wheel: &WheelGeometry) -> Polar {
    let dx = point.x - wheel.center.x;
    let dy = point.y - wheel.center.y;
    Polar {
        angle_deg: wrap_degrees((-dy).atan2(dx).to_degrees()),
        radius: dx.hypot(dy) / wheel.radius,
    }
}

/// Inverse of [`to_polar`]: place a point at `angle_deg` and normalized `radius`.
pub fn to_cartesian(angle_deg: f32, radius: f32, wheel: &WheelGeometry) -> Point {
    let r = radius * wheel.radius;
    let rad = angle_deg.to_radians();
    Point::new(
        wheel.center.x + r * rad.cos(),
        wheel.center.y - r * rad.sin(),
    )
}

/// Project a point onto the track, returning a ratio in `[0, 1]`.
///
/// The origin end of the track is the maximal end: ratio 1 at the origin,
/// 0 at `origin + length`.
pub fn to_ratio(point: Point, track: &TrackGeometry) -> f32 {
    let ratio = 1.0 - (track.primary(point) - track.origin) / track.length;
    if ratio.is_finite() {
        ratio.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Inverse of [`to_ratio`]: the thumb offset from the track origin.
pub fn from_ratio(ratio: f32, track: &TrackGeometry) -> f32 {
    (1.0 - ratio.clamp(0.0, 1.0)) * track.length
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn angle_eq(a: f32, b: f32) -> bool {
        let d = (a - b).abs() % 360.0;
        d.min(360.0 - d) < EPSILON * 10.0
    }

    fn wheel() -> WheelGeometry {
        WheelGeometry::new(Point::new(100.0, 100.0), 100.0).unwrap()
    }

    #[test]
    fn test_wheel_requires_positive_radius() {
        assert!(WheelGeometry::new(Point::zero(), 0.0).is_none());
        assert!(WheelGeometry::new(Point::zero(), -1.0).is_none());
        assert!(WheelGeometry::new(Point::new(f32::NAN, 0.0), 1.0).is_none());
    }

    #[test]
    fn test_polar_axes() {
        let w = wheel();
        let right = to_polar(Point::new(200.0, 100.0), &w);
        assert!(approx_eq(right.angle_deg, 0.0));
        assert!(approx_eq(right.radius, 1.0));

        // Up on screen is 90 degrees
        let up = to_polar(Point::new(100.0, 50.0), &w);
        assert!(approx_eq(up.angle_deg, 90.0));
        assert!(approx_eq(up.radius, 0.5));

        let left = to_polar(Point::new(0.0, 100.0), &w);
        assert!(approx_eq(left.angle_deg, 180.0));

        let down = to_polar(Point::new(100.0, 175.0), &w);
        assert!(approx_eq(down.angle_deg, 270.0));
        assert!(approx_eq(down.radius, 0.75));
    }

    #[test]
    fn test_polar_angle_is_never_360() {
        let w = wheel();
        // Just below the x axis on the right side
        let p = to_polar(Point::new(200.0, 100.000_01), &w);
        assert!(p.angle_deg >= 0.0 && p.angle_deg < 360.0);
    }

    #[test]
    fn test_outside_wheel_has_radius_above_one() {
        let w = wheel();
        assert!(to_polar(Point::new(0.0, 0.0), &w).radius > 1.0);
        assert!(!w.contains(Point::new(0.0, 0.0)));
        assert!(w.contains(Point::new(100.0, 0.0)));
    }

    #[test]
    fn test_polar_cartesian_round_trip() {
        let w = WheelGeometry::new(Point::new(37.0, 81.0), 64.0).unwrap();
        for deg in (0..360).step_by(15) {
            for step in 0..=10 {
                let radius = step as f32 / 10.0;
                let point = to_cartesian(deg as f32, radius, &w);
                let polar = to_polar(point, &w);
                assert!(approx_eq(polar.radius, radius), "radius {radius} at {deg}");
                if radius > 0.0 {
                    assert!(angle_eq(polar.angle_deg, deg as f32), "{} vs {deg}", polar.angle_deg);
                }
            }
        }
    }

    #[test]
    fn test_wheel_from_bounds_uses_shorter_side() {
        let w = WheelGeometry::from_bounds(Bounds::new(50.0, 50.0, 300.0, 200.0)).unwrap();
        assert_eq!(w.center(), Point::new(150.0, 100.0));
        assert_eq!(w.radius(), 100.0);
        assert!(WheelGeometry::from_bounds(Bounds::default()).is_none());
    }

    #[test]
    fn test_ratio_horizontal() {
        let t = TrackGeometry::new(10.0, 200.0, Orientation::Horizontal).unwrap();
        assert!(approx_eq(to_ratio(Point::new(10.0, 0.0), &t), 1.0));
        assert!(approx_eq(to_ratio(Point::new(210.0, 0.0), &t), 0.0));
        assert!(approx_eq(to_ratio(Point::new(60.0, 999.0), &t), 0.75));
        // Clamped beyond either end
        assert_eq!(to_ratio(Point::new(-50.0, 0.0), &t), 1.0);
        assert_eq!(to_ratio(Point::new(500.0, 0.0), &t), 0.0);
    }

    #[test]
    fn test_ratio_vertical_uses_y() {
        let t = TrackGeometry::new(0.0, 100.0, Orientation::Vertical).unwrap();
        assert!(approx_eq(to_ratio(Point::new(500.0, 25.0), &t), 0.75));
    }

    #[test]
    fn test_ratio_round_trip() {
        let t = TrackGeometry::new(20.0, 160.0, Orientation::Horizontal).unwrap();
        for step in 0..=20 {
            let ratio = step as f32 / 20.0;
            let offset = from_ratio(ratio, &t);
            let back = to_ratio(Point::new(t.origin() + offset, 0.0), &t);
            assert!(approx_eq(back, ratio));
        }
    }

    #[test]
    fn test_track_from_bounds() {
        let h = TrackGeometry::from_bounds(
            Bounds::new(0.0, 300.0, 240.0, 40.0),
            Orientation::Horizontal,
        )
        .unwrap();
        assert_eq!(h.length(), 200.0);
        assert!(h.contains(Point::new(100.0, 20.0)));
        assert!(!h.contains(Point::new(100.0, 41.0)));
        assert!(h.contains_along(Point::new(100.0, 41.0)));

        let v =
            TrackGeometry::from_bounds(Bounds::new(0.0, 0.0, 40.0, 240.0), Orientation::Vertical)
                .unwrap();
        assert_eq!(v.length(), 200.0);
        assert!(v.contains(Point::new(20.0, 150.0)));

        // A square box leaves no room for the thumb to travel
        assert!(
            TrackGeometry::from_bounds(Bounds::new(0.0, 0.0, 40.0, 40.0), Orientation::Horizontal)
                .is_none()
        );
    }
}
