//! Ray representation and hit records.

use linecast_math::{Dir3, Point3, Sphere, Transform, Vec3};
use linecast_mesh::MeshId;

/// A ray in 3D space defined by origin and direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Origin point of the ray.
    pub origin: Point3,
    /// Unit direction of the ray.
    pub direction: Dir3,
}

impl Ray {
    /// Create a new ray from origin and direction.
    ///
    /// The direction will be normalized.
    pub fn new(origin: Point3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: Dir3::new_normalize(direction),
        }
    }

    /// Evaluate the ray at parameter `t`: `origin + t * direction`.
    #[inline]
    pub fn at(&self, t: f64) -> Point3 {
        self.origin + t * self.direction.as_ref()
    }

    /// Map the ray through `t`; the new direction is renormalized.
    pub fn transformed(&self, t: &Transform) -> Ray {
        Ray::new(t.apply_point(&self.origin), t.apply_vec(self.direction.as_ref()))
    }

    /// Closest point on the ray (not the infinite line) to `p`.
    pub fn closest_point_to(&self, p: &Point3) -> Point3 {
        let t = (p - self.origin).dot(self.direction.as_ref());
        if t < 0.0 {
            self.origin
        } else {
            self.at(t)
        }
    }

    /// Squared distance from the ray to `p`.
    pub fn distance_squared_to_point(&self, p: &Point3) -> f64 {
        (self.closest_point_to(p) - p).norm_squared()
    }

    /// True if the ray passes through `sphere`. Empty spheres are never hit.
    #[inline]
    pub fn intersects_sphere(&self, sphere: &Sphere) -> bool {
        !sphere.is_empty()
            && self.distance_squared_to_point(&sphere.center) <= sphere.radius * sphere.radius
    }
}

/// One intersection between a ray and a line mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineHit {
    /// Distance from the ray origin to `point`, in world units.
    pub distance: f64,
    /// Intersection point in world space.
    pub point: Point3,
    /// Offset into the index buffer of the segment (or triangle) that was hit.
    pub segment_index: usize,
    /// The mesh that was hit.
    pub mesh: MeshId,
}

/// Sort hits nearest first. The engine itself reports hits in the order
/// it finds them.
pub fn sort_hits_by_distance(hits: &mut [LineHit]) {
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
}
