//! Closest points on a line segment.

use linecast_math::Point3;

/// A finite line segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Start point.
    pub start: Point3,
    /// End point.
    pub end: Point3,
}

impl Segment {
    /// Create a segment.
    pub fn new(start: Point3, end: Point3) -> Self {
        Self { start, end }
    }

    /// Point on the segment closest to `p`, clamped to the endpoints.
    pub fn closest_point(&self, p: &Point3) -> Point3 {
        let d = self.end - self.start;
        let len2 = d.norm_squared();
        if len2 == 0.0 {
            return self.start;
        }
        let t = ((p - self.start).dot(&d) / len2).clamp(0.0, 1.0);
        self.start + d * t
    }

    /// Squared distance from `p` to the segment.
    pub fn distance_squared(&self, p: &Point3) -> f64 {
        (self.closest_point(p) - p).norm_squared()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closest_point_interior() {
        let s = Segment::new(Point3::new(0.0, 0.0, 0.0), Point3::new(10.0, 0.0, 0.0));
        let c = s.closest_point(&Point3::new(4.0, 3.0, 0.0));
        assert!((c - Point3::new(4.0, 0.0, 0.0)).norm() < 1e-12);
        assert!((s.distance_squared(&Point3::new(4.0, 3.0, 0.0)) - 9.0).abs() < 1e-12);
    }

    #[test]
    fn test_closest_point_clamps() {
        let s = Segment::new(Point3::new(0.0, 0.0, 0.0), Point3::new(10.0, 0.0, 0.0));
        assert_eq!(s.closest_point(&Point3::new(-5.0, 1.0, 0.0)), s.start);
        assert_eq!(s.closest_point(&Point3::new(15.0, 1.0, 0.0)), s.end);
        assert!((s.distance_squared(&Point3::new(13.0, 4.0, 0.0)) - 25.0).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_segment() {
        let p = Point3::new(1.0, 2.0, 3.0);
        let s = Segment::new(p, p);
        assert_eq!(s.closest_point(&Point3::origin()), p);
    }
}
