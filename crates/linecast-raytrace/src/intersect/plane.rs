//! Ray-plane intersection (closed-form).

use linecast_math::{Dir3, Point3};

use crate::Ray;

/// An infinite plane: `normal . p + constant = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Unit normal.
    pub normal: Dir3,
    /// Signed offset from the origin along `-normal`.
    pub constant: f64,
}

impl Plane {
    /// Plane through a point with the given normal.
    pub fn from_normal_and_point(normal: Dir3, point: &Point3) -> Self {
        let constant = -normal.dot(&point.coords);
        Self { normal, constant }
    }

    /// Plane through three points, or `None` if they are collinear.
    pub fn from_coplanar_points(a: &Point3, b: &Point3, c: &Point3) -> Option<Self> {
        let normal = Dir3::try_new((c - b).cross(&(a - b)), 1e-12)?;
        Some(Self::from_normal_and_point(normal, a))
    }

    /// Signed distance from `p` to the plane.
    pub fn signed_distance(&self, p: &Point3) -> f64 {
        self.normal.dot(&p.coords) + self.constant
    }

    /// Point where `ray` meets the plane, if it does (see [`intersect_plane`]).
    pub fn intersect_ray(&self, ray: &Ray) -> Option<Point3> {
        intersect_plane(ray, self).map(|t| ray.at(t))
    }
}

/// Intersect a ray with a plane.
///
/// Returns the ray parameter of the hit, or `None` if the ray is parallel
/// to the plane or meets it behind the origin.
pub fn intersect_plane(ray: &Ray, plane: &Plane) -> Option<f64> {
    let denom = ray.direction.dot(plane.normal.as_ref());

    // Ray is parallel to plane
    if denom.abs() < 1e-12 {
        return None;
    }

    let t = -plane.signed_distance(&ray.origin) / denom;

    // Intersection is behind ray origin
    if t < 0.0 {
        return None;
    }

    Some(t)
}
