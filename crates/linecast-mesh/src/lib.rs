#![warn(missing_docs)]

//! Extruded line meshes for the linecast intersection engine.
//!
//! A line mesh stores the centerline of wide line features (roads,
//! borders) as an indexed triangle buffer where every segment is two
//! triangles. This crate provides:
//!
//! - [`LineMeshGeometry`] - stored attribute and index buffers
//! - [`LineGeometry`] - the read interface shared by stored and displaced geometry
//! - [`FeatureTable`] - partition of the index buffer into line strings
//! - [`DisplacedGeometry`] - a resettable displaced overlay (no copies, no mutation)
//! - [`compute_feature_sphere`] / [`FeatureBounds`] - cached per-feature bounds
//! - [`LineMesh`] - a mesh instance tying the above together

mod bounds;
mod displaced;
mod displacement;
mod error;
mod features;
mod geometry;
mod mesh;

pub use bounds::{compute_feature_sphere, FeatureBounds};
pub use displaced::{DisplacedAttributes, DisplacedGeometry};
pub use displacement::{
    ConstantDisplacement, DisplacementMap, DisplacementRange, DisplacementRangeProvider,
    DisplacementSource,
};
pub use error::{MeshError, Result};
pub use features::FeatureTable;
pub use geometry::{LineGeometry, LineMeshGeometry, VertexAttributes, SEGMENT_STRIDE};
pub use mesh::{LineMesh, MeshId};
