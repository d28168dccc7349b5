//! Axis-aligned bounding boxes.

use crate::{Point3, Sphere, Vec3};

/// Axis-aligned bounding box in 3D.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb3 {
    /// Minimum corner.
    pub min: Point3,
    /// Maximum corner.
    pub max: Point3,
}

impl Aabb3 {
    /// Create an AABB from min and max corners.
    pub fn new(min: Point3, max: Point3) -> Self {
        Self { min, max }
    }

    /// Create an empty (inverted) AABB suitable for expansion.
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Build the tightest box around a set of points.
    pub fn from_points<'p>(points: impl IntoIterator<Item = &'p Point3>) -> Self {
        let mut aabb = Self::empty();
        for p in points {
            aabb.include_point(p);
        }
        aabb
    }

    /// True if no point has been included yet.
    pub fn is_empty(&self) -> bool {
        self.max.x < self.min.x || self.max.y < self.min.y || self.max.z < self.min.z
    }

    /// Expand this AABB to include a point.
    pub fn include_point(&mut self, p: &Point3) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.min.z = self.min.z.min(p.z);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
        self.max.z = self.max.z.max(p.z);
    }

    /// Smallest box containing both `self` and `other`.
    pub fn union(&self, other: &Aabb3) -> Aabb3 {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        let mut out = *self;
        out.include_point(&other.min);
        out.include_point(&other.max);
        out
    }

    /// Copy of this box moved by `offset`.
    pub fn translated(&self, offset: &Vec3) -> Aabb3 {
        if self.is_empty() {
            return *self;
        }
        Aabb3::new(self.min + offset, self.max + offset)
    }

    /// Center point of the box.
    pub fn center(&self) -> Point3 {
        nalgebra::center(&self.min, &self.max)
    }

    /// Extent along each axis.
    pub fn size(&self) -> Vec3 {
        if self.is_empty() {
            return Vec3::zeros();
        }
        self.max - self.min
    }

    /// The sphere circumscribing this box: box center, half-diagonal radius.
    pub fn bounding_sphere(&self) -> Sphere {
        if self.is_empty() {
            return Sphere::empty();
        }
        Sphere::new(self.center(), self.size().norm() * 0.5)
    }
}

impl Default for Aabb3 {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_box() {
        let aabb = Aabb3::empty();
        assert!(aabb.is_empty());
        assert_eq!(aabb.size(), Vec3::zeros());
        assert!(aabb.bounding_sphere().is_empty());
    }

    #[test]
    fn test_from_points() {
        let pts = [
            Point3::new(1.0, -2.0, 0.0),
            Point3::new(-1.0, 4.0, 3.0),
            Point3::new(0.0, 0.0, -1.0),
        ];
        let aabb = Aabb3::from_points(&pts);
        assert_eq!(aabb.min, Point3::new(-1.0, -2.0, -1.0));
        assert_eq!(aabb.max, Point3::new(1.0, 4.0, 3.0));
        assert_eq!(aabb.center(), Point3::new(0.0, 1.0, 1.0));
    }

    #[test]
    fn test_union_and_translate() {
        let a = Aabb3::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
        let b = a.translated(&Vec3::new(0.0, 0.0, 5.0));
        let u = a.union(&b);
        assert_eq!(u.min, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(u.max, Point3::new(1.0, 1.0, 6.0));
        assert_eq!(Aabb3::empty().union(&a), a);
        assert!(Aabb3::empty().translated(&Vec3::x()).is_empty());
    }

    #[test]
    fn test_bounding_sphere_of_box() {
        let aabb = Aabb3::new(Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 2.0, 2.0));
        let sphere = aabb.bounding_sphere();
        assert_eq!(sphere.center, Point3::new(1.0, 1.0, 1.0));
        assert!((sphere.radius - 3.0_f64.sqrt()).abs() < 1e-12);
    }
}
