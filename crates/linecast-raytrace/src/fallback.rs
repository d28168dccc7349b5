//! Whole-mesh triangle intersection, used when no displacement is active.

use linecast_math::Point3;
use linecast_mesh::{LineGeometry, LineMesh};

use crate::engine::RaycastQuery;
use crate::intersect::intersect_triangle;
use crate::LineHit;

/// Intersects a ray with every triangle of a mesh as stored.
///
/// This is the default path for line meshes whose material does not
/// displace; the line engine hands such meshes over unchanged.
pub trait TriangleRaycaster {
    /// Append every hit of `query` on `mesh` to `hits`.
    fn raycast(&self, mesh: &LineMesh, query: &RaycastQuery, hits: &mut Vec<LineHit>);
}

/// Tests every triangle in turn, indexed or not.
///
/// `segment_index` in the produced hits is the offset of the triangle's
/// first corner (in the index buffer, or in the vertex list for
/// non-indexed geometry).
#[derive(Debug, Clone, Copy, Default)]
pub struct BruteForceTriangles;

impl TriangleRaycaster for BruteForceTriangles {
    fn raycast(&self, mesh: &LineMesh, query: &RaycastQuery, hits: &mut Vec<LineHit>) {
        let world = mesh.world_transform();
        let Some(inverse) = world.inverse() else {
            log::warn!("{}: world transform is singular, skipping", mesh.id());
            return;
        };
        let local_ray = query.ray.transformed(&inverse);
        let geometry = mesh.geometry();

        let mut test = |offset: usize, corners: [usize; 3]| {
            let [a, b, c] = corners.map(|v| geometry.position(v));
            let Some(t) = intersect_triangle(&local_ray, &a, &b, &c) else {
                return;
            };
            let point: Point3 = world.apply_point(&local_ray.at(t));
            let distance = (point - query.ray.origin).norm();
            if query.contains(distance) {
                hits.push(LineHit {
                    distance,
                    point,
                    segment_index: offset,
                    mesh: mesh.id(),
                });
            }
        };

        match geometry.indices() {
            Some(indices) => {
                for (face, tri) in indices.chunks_exact(3).enumerate() {
                    test(face * 3, [tri[0] as usize, tri[1] as usize, tri[2] as usize]);
                }
            }
            None => {
                for first in (0..geometry.vertex_count() / 3).map(|f| f * 3) {
                    test(first, [first, first + 1, first + 2]);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Ray;
    use linecast_math::{Point2, Transform, Vec3};
    use linecast_mesh::{LineMeshGeometry, MeshId, VertexAttributes};

    fn attributes(positions: Vec<Point3>) -> VertexAttributes {
        let n = positions.len();
        VertexAttributes {
            positions,
            normals: vec![Vec3::z(); n],
            uvs: vec![Point2::origin(); n],
            bitangents: vec![Vec3::y(); n],
        }
    }

    fn quad() -> Vec<Point3> {
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(2.0, 2.0, 0.0),
            Point3::new(0.0, 2.0, 0.0),
        ]
    }

    #[test]
    fn test_indexed_quad() {
        let geom = LineMeshGeometry::indexed(attributes(quad()), vec![0, 1, 2, 0, 2, 3]).unwrap();
        let mesh = LineMesh::new(MeshId(3), geom);
        let query = RaycastQuery::new(Ray::new(Point3::new(0.5, 1.5, 4.0), -Vec3::z()));
        let mut hits = Vec::new();
        BruteForceTriangles.raycast(&mesh, &query, &mut hits);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].segment_index, 3);
        assert_eq!(hits[0].mesh, MeshId(3));
        assert!((hits[0].distance - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_non_indexed_with_transform() {
        let geom = LineMeshGeometry::non_indexed(attributes(quad()[..3].to_vec())).unwrap();
        let mesh = LineMesh::new(MeshId(1), geom)
            .with_world_transform(Transform::translation(0.0, 0.0, -1.0));
        let query = RaycastQuery::new(Ray::new(Point3::new(1.5, 0.5, 4.0), -Vec3::z()));
        let mut hits = Vec::new();
        BruteForceTriangles.raycast(&mesh, &query, &mut hits);
        assert_eq!(hits.len(), 1);
        assert!((hits[0].distance - 5.0).abs() < 1e-12);
        assert!((hits[0].point - Point3::new(1.5, 0.5, -1.0)).norm() < 1e-12);
    }

    #[test]
    fn test_near_far_filter() {
        let geom = LineMeshGeometry::non_indexed(attributes(quad()[..3].to_vec())).unwrap();
        let mesh = LineMesh::new(MeshId(1), geom);
        let ray = Ray::new(Point3::new(1.5, 0.5, 4.0), -Vec3::z());
        let mut hits = Vec::new();
        BruteForceTriangles.raycast(&mesh, &RaycastQuery::new(ray).with_range(0.0, 3.0), &mut hits);
        assert!(hits.is_empty());
        BruteForceTriangles.raycast(&mesh, &RaycastQuery::new(ray).with_range(3.0, 5.0), &mut hits);
        assert_eq!(hits.len(), 1);
    }
}
