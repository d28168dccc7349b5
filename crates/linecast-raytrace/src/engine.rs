//! Ray intersection against wide, possibly displaced line features.
//!
//! Each segment of a line mesh is a ribbon: the plane through the
//! segment's centerline and its extrusion direction, limited to a band of
//! `threshold` around the centerline. A ray hits the segment if it meets
//! that plane within the band. Features are gated by a bounding sphere
//! first so that rays far from a line string cost one sphere test.

use linecast_math::Transform;
use linecast_mesh::{
    DisplacementRange, DisplacementRangeProvider, LineGeometry, LineMesh, MeshId, SEGMENT_STRIDE,
};

use crate::context::{RaycastContext, RaycastStats};
use crate::fallback::{BruteForceTriangles, TriangleRaycaster};
use crate::intersect::{Plane, Segment};
use crate::material::LineMaterial;
use crate::{LineHit, Ray};

/// A world-space ray with the accepted hit distance range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastQuery {
    /// The ray, in world space.
    pub ray: Ray,
    /// Hits closer than this are dropped.
    pub near: f64,
    /// Hits farther than this are dropped.
    pub far: f64,
}

impl RaycastQuery {
    /// A query accepting every distance from 0 to infinity.
    pub fn new(ray: Ray) -> Self {
        Self {
            ray,
            near: 0.0,
            far: f64::INFINITY,
        }
    }

    /// Restrict accepted distances to `[near, far]`.
    pub fn with_range(mut self, near: f64, far: f64) -> Self {
        self.near = near;
        self.far = far;
        self
    }

    /// True if `distance` lies in `[near, far]`.
    pub fn contains(&self, distance: f64) -> bool {
        distance >= self.near && distance <= self.far
    }
}

/// Raycasts line meshes, seeing through displacement when the material
/// asks for it.
#[derive(Debug, Clone, Default)]
pub struct LineRaycaster<F = BruteForceTriangles, R = DisplacementRange> {
    fallback: F,
    range_provider: R,
}

impl<F, R> LineRaycaster<F, R>
where
    F: TriangleRaycaster,
    R: DisplacementRangeProvider,
{
    /// Create a raycaster.
    ///
    /// `fallback` handles meshes whose material does not displace;
    /// `range_provider` is asked for the current displacement range once
    /// per displaced raycast.
    pub fn new(fallback: F, range_provider: R) -> Self {
        Self {
            fallback,
            range_provider,
        }
    }

    /// Append every hit of `query` on `mesh` to `hits`, in segment order.
    ///
    /// Without a displacement source the whole mesh goes to the fallback.
    /// Otherwise the mesh is intersected through the context's shared
    /// displaced view; the mesh itself is never modified.
    ///
    /// The range provider is polled on every call, but each feature's
    /// bounding sphere is computed once, with the range in effect the first
    /// time that feature is tested, and then kept. A later, wider range
    /// does not grow the cached spheres; call [`LineMesh::set_features`]
    /// to reset the cache after widening it.
    ///
    /// # Panics
    ///
    /// If a displaced mesh has no index buffer.
    pub fn raycast<'a, M>(
        &self,
        mesh: &'a LineMesh,
        material: &'a M,
        query: &RaycastQuery,
        ctx: &mut RaycastContext<'a>,
        hits: &mut Vec<LineHit>,
    ) where
        M: LineMaterial + ?Sized,
    {
        let Some(source) = material.displacement() else {
            ctx.stats_mut().fallback_meshes += 1;
            self.fallback.raycast(mesh, query, hits);
            return;
        };

        let range = self.range_provider.displacement_range();
        let view = *ctx.displaced_view(mesh.geometry(), source, range);
        intersect_features(
            &view,
            mesh,
            query,
            material.threshold(),
            Some(view.displacement_range()),
            ctx.stats_mut(),
            hits,
        );
    }

    /// Raycast several meshes in turn, sharing one context.
    pub fn raycast_all<'a, M, I>(
        &self,
        targets: I,
        query: &RaycastQuery,
        ctx: &mut RaycastContext<'a>,
        hits: &mut Vec<LineHit>,
    ) where
        M: LineMaterial + ?Sized + 'a,
        I: IntoIterator<Item = (&'a LineMesh, &'a M)>,
    {
        for (mesh, material) in targets {
            self.raycast(mesh, material, query, ctx, hits);
        }
    }
}

/// Intersect `query` with the features of `mesh`, reading vertex data from
/// `geometry` (the stored geometry or a displaced view of it).
///
/// `threshold` is the world-space half-band around each centerline.
/// `displacement` is the range the feature bounds must cover; pass `None`
/// for undisplaced geometry.
///
/// # Panics
///
/// If `geometry` has no index buffer.
pub fn intersect_features<G>(
    geometry: &G,
    mesh: &LineMesh,
    query: &RaycastQuery,
    threshold: f64,
    displacement: Option<DisplacementRange>,
    stats: &mut RaycastStats,
    hits: &mut Vec<LineHit>,
) where
    G: LineGeometry + ?Sized,
{
    let Some(indices) = geometry.indices() else {
        panic!("{}: line raycasting requires an indexed geometry", mesh.id());
    };

    let world = mesh.world_transform();
    let Some(inverse) = world.inverse() else {
        log::warn!("{}: world transform is singular, skipping", mesh.id());
        return;
    };

    stats.meshes += 1;
    let before = hits.len();
    let ribbon = Ribbon {
        geometry,
        indices,
        local_ray: query.ray.transformed(&inverse),
        world,
        query,
        threshold_sq: (threshold / world.average_scale()).powi(2),
        mesh: mesh.id(),
    };

    for (feature, range) in mesh.features().ranges(indices.len()).enumerate() {
        stats.features_tested += 1;
        let sphere = mesh
            .feature_sphere(feature, displacement)
            .transformed(world)
            .inflated(threshold);
        if !query.ray.intersects_sphere(&sphere) {
            stats.features_rejected += 1;
            log::trace!("{}: feature {feature} rejected by bounding sphere", mesh.id());
            continue;
        }

        for i in range.step_by(SEGMENT_STRIDE) {
            stats.segments_tested += 1;
            if let Some(hit) = ribbon.intersect_segment(i) {
                hits.push(hit);
            }
        }
    }

    let found = hits.len() - before;
    stats.hits += found;
    log::debug!(
        "{}: {} hits over {} features (displaced: {})",
        mesh.id(),
        found,
        mesh.features().len(),
        displacement.is_some()
    );
}

/// Per-call state for the exact segment test.
struct Ribbon<'q, G: ?Sized> {
    geometry: &'q G,
    indices: &'q [u32],
    local_ray: Ray,
    world: &'q Transform,
    query: &'q RaycastQuery,
    threshold_sq: f64,
    mesh: MeshId,
}

impl<G: LineGeometry + ?Sized> Ribbon<'_, G> {
    /// Test the segment whose six indices start at offset `i`.
    fn intersect_segment(&self, i: usize) -> Option<LineHit> {
        let a = self.indices[i] as usize;
        let b = self.indices[i + 2] as usize;
        let start = self.geometry.position(a);
        let end = self.geometry.position(b);
        let extrusion = self.geometry.bitangent(a);

        let plane = Plane::from_coplanar_points(&start, &(start + extrusion), &end)?;
        let local_point = plane.intersect_ray(&self.local_ray)?;

        if Segment::new(start, end).distance_squared(&local_point) > self.threshold_sq {
            return None;
        }

        let point = self.world.apply_point(&local_point);
        let distance = (point - self.query.ray.origin).norm();
        if !self.query.contains(distance) {
            return None;
        }

        Some(LineHit {
            distance,
            point,
            segment_index: i,
            mesh: self.mesh,
        })
    }
}
