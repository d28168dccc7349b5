//! A line mesh instance with its feature partition and bounds cache.

use linecast_math::{Sphere, Transform, Vec3};

use crate::bounds::{compute_feature_sphere, FeatureBounds};
use crate::displacement::DisplacementRange;
use crate::error::Result;
use crate::features::FeatureTable;
use crate::geometry::{LineGeometry, LineMeshGeometry};

/// Caller-chosen identifier attached to every hit on a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct MeshId(pub u32);

impl std::fmt::Display for MeshId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "mesh#{}", self.0)
    }
}

/// An extruded line mesh placed in the world.
///
/// Owns its stored geometry, the feature partition of its index buffer,
/// and a lazily filled bounding sphere per feature. The geometry is never
/// modified after construction.
#[derive(Debug, Clone)]
pub struct LineMesh {
    id: MeshId,
    geometry: LineMeshGeometry,
    world: Transform,
    features: FeatureTable,
    bounds: FeatureBounds,
}

impl LineMesh {
    /// A mesh with the default single feature and identity transform.
    pub fn new(id: MeshId, geometry: LineMeshGeometry) -> Self {
        let features = FeatureTable::default();
        let bounds = FeatureBounds::new(features.len());
        Self {
            id,
            geometry,
            world: Transform::identity(),
            features,
            bounds,
        }
    }

    /// Replace the feature partition from a list of start offsets.
    ///
    /// Cached bounds belong to the old partition and are dropped.
    pub fn set_features(&mut self, starts: Vec<usize>) -> Result<()> {
        let features = FeatureTable::new(starts, self.geometry.index_count())?;
        self.bounds = FeatureBounds::new(features.len());
        self.features = features;
        Ok(())
    }

    /// Builder form of [`LineMesh::set_features`].
    pub fn with_features(mut self, starts: Vec<usize>) -> Result<Self> {
        self.set_features(starts)?;
        Ok(self)
    }

    /// Place the mesh in the world. Cached bounds are local and stay valid.
    pub fn set_world_transform(&mut self, world: Transform) {
        self.world = world;
    }

    /// Builder form of [`LineMesh::set_world_transform`].
    pub fn with_world_transform(mut self, world: Transform) -> Self {
        self.world = world;
        self
    }

    /// Identifier reported in hits.
    pub fn id(&self) -> MeshId {
        self.id
    }

    /// The stored, undisplaced geometry.
    pub fn geometry(&self) -> &LineMeshGeometry {
        &self.geometry
    }

    /// Local-to-world transform.
    pub fn world_transform(&self) -> &Transform {
        &self.world
    }

    /// The feature partition.
    pub fn features(&self) -> &FeatureTable {
        &self.features
    }

    /// The bounding sphere cache.
    pub fn bounds(&self) -> &FeatureBounds {
        &self.bounds
    }

    /// Local-space bounding sphere of `feature`, computed on first use.
    ///
    /// Bounds always come from the stored positions. When `displacement`
    /// is given the sphere covers the whole range along the normal of the
    /// feature's first vertex. Whatever is computed first is kept for the
    /// lifetime of the partition.
    pub fn feature_sphere(
        &self,
        feature: usize,
        displacement: Option<DisplacementRange>,
    ) -> Sphere {
        self.bounds.get_or_compute(feature, || {
            let Some(indices) = self.geometry.indices() else {
                return Sphere::empty();
            };
            let range = self.features.range(feature, indices.len());
            let attributes = self.geometry.attributes();
            let normal = indices
                .get(range.start)
                .map_or_else(Vec3::zeros, |&v| attributes.normals[v as usize]);
            compute_feature_sphere(&attributes.positions, indices, range, &normal, displacement)
        })
    }
}
