#![warn(missing_docs)]

//! Math types for the linecast line-feature intersection engine.
//!
//! Thin wrappers around nalgebra providing the points, vectors, transforms
//! and bounding volumes used to raycast extruded line meshes.

mod bbox;
mod sphere;

pub use bbox::Aabb3;
pub use sphere::Sphere;

use nalgebra::{Matrix4, Unit, Vector3, Vector4};

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A unit (normalized) direction vector in 3D space.
pub type Dir3 = Unit<Vector3<f64>>;

/// A point in 2D texture space.
pub type Point2 = nalgebra::Point2<f64>;

/// A 4x4 affine transformation matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// The underlying 4x4 matrix.
    pub matrix: Matrix4<f64>,
}

impl Transform {
    /// Identity transform.
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Build a transform from 16 values in row-major order.
    pub fn from_row_major(values: &[f64; 16]) -> Self {
        Self {
            matrix: Matrix4::from_row_slice(values),
        }
    }

    /// Translation by `(dx, dy, dz)`.
    pub fn translation(dx: f64, dy: f64, dz: f64) -> Self {
        let mut m = Matrix4::identity();
        m[(0, 3)] = dx;
        m[(1, 3)] = dy;
        m[(2, 3)] = dz;
        Self { matrix: m }
    }

    /// Non-uniform scale by `(sx, sy, sz)`.
    pub fn scale(sx: f64, sy: f64, sz: f64) -> Self {
        let mut m = Matrix4::identity();
        m[(0, 0)] = sx;
        m[(1, 1)] = sy;
        m[(2, 2)] = sz;
        Self { matrix: m }
    }

    /// Rotation about the X axis by `angle` radians.
    pub fn rotation_x(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let mut m = Matrix4::identity();
        m[(1, 1)] = c;
        m[(1, 2)] = -s;
        m[(2, 1)] = s;
        m[(2, 2)] = c;
        Self { matrix: m }
    }

    /// Rotation about the Z axis by `angle` radians.
    pub fn rotation_z(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let mut m = Matrix4::identity();
        m[(0, 0)] = c;
        m[(0, 1)] = -s;
        m[(1, 0)] = s;
        m[(1, 1)] = c;
        Self { matrix: m }
    }

    /// Compose two transforms (self * other).
    ///
    /// Applying the result is `self(other(p))`: `other` acts first.
    pub fn then(&self, other: &Transform) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }

    /// Transform a point.
    pub fn apply_point(&self, p: &Point3) -> Point3 {
        let v = self.matrix * Vector4::new(p.x, p.y, p.z, 1.0);
        Point3::new(v.x, v.y, v.z)
    }

    /// Transform a direction vector (ignores translation, applies rotation/scale).
    pub fn apply_vec(&self, v: &Vec3) -> Vec3 {
        let r = self.matrix * Vector4::new(v.x, v.y, v.z, 0.0);
        Vec3::new(r.x, r.y, r.z)
    }

    /// Inverse of this transform, if it exists.
    pub fn inverse(&self) -> Option<Self> {
        self.matrix.try_inverse().map(|matrix| Self { matrix })
    }

    /// Length of each basis column of the upper-left 3x3 block.
    pub fn axis_scales(&self) -> Vec3 {
        let m3 = self.matrix.fixed_view::<3, 3>(0, 0);
        Vec3::new(m3.column(0).norm(), m3.column(1).norm(), m3.column(2).norm())
    }

    /// Mean of the three axis scales.
    ///
    /// Used to carry a world-space width into the local frame of a mesh.
    pub fn average_scale(&self) -> f64 {
        let s = self.axis_scales();
        (s.x + s.y + s.z) / 3.0
    }

    /// Largest of the three axis scales.
    pub fn max_scale(&self) -> f64 {
        let s = self.axis_scales();
        s.x.max(s.y).max(s.z)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
