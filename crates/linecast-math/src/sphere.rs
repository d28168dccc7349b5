//! Bounding spheres.

use crate::{Point3, Transform};

/// A sphere given by center and radius.
///
/// A negative radius marks an empty sphere that contains nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    /// Center point.
    pub center: Point3,
    /// Radius (negative when empty).
    pub radius: f64,
}

impl Sphere {
    /// Create a sphere from center and radius.
    pub fn new(center: Point3, radius: f64) -> Self {
        Self { center, radius }
    }

    /// A sphere that contains no points.
    pub fn empty() -> Self {
        Self {
            center: Point3::origin(),
            radius: -1.0,
        }
    }

    /// True for the empty sphere.
    pub fn is_empty(&self) -> bool {
        self.radius < 0.0
    }

    /// True if `p` lies inside or on the sphere, with `eps` slack.
    pub fn contains_point(&self, p: &Point3, eps: f64) -> bool {
        !self.is_empty() && (p - self.center).norm() <= self.radius + eps
    }

    /// Map the sphere through `t`.
    ///
    /// The radius grows by the largest axis scale so the result still
    /// bounds the transformed contents under non-uniform scale.
    pub fn transformed(&self, t: &Transform) -> Sphere {
        if self.is_empty() {
            return *self;
        }
        Sphere::new(t.apply_point(&self.center), self.radius * t.max_scale())
    }

    /// Copy with the radius grown by `amount`.
    pub fn inflated(&self, amount: f64) -> Sphere {
        if self.is_empty() {
            return *self;
        }
        Sphere::new(self.center, self.radius + amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_point() {
        let s = Sphere::new(Point3::new(1.0, 0.0, 0.0), 2.0);
        assert!(s.contains_point(&Point3::new(3.0, 0.0, 0.0), 1e-12));
        assert!(!s.contains_point(&Point3::new(3.5, 0.0, 0.0), 1e-12));
        assert!(!Sphere::empty().contains_point(&Point3::origin(), 1e-12));
    }

    #[test]
    fn test_transformed_uses_max_scale() {
        let s = Sphere::new(Point3::new(1.0, 0.0, 0.0), 1.0);
        let t = Transform::translation(0.0, 5.0, 0.0).then(&Transform::scale(2.0, 1.0, 3.0));
        let w = s.transformed(&t);
        assert!((w.center - Point3::new(2.0, 5.0, 0.0)).norm() < 1e-12);
        assert!((w.radius - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_stays_empty() {
        let t = Transform::scale(10.0, 10.0, 10.0);
        assert!(Sphere::empty().transformed(&t).inflated(100.0).is_empty());
    }
}
