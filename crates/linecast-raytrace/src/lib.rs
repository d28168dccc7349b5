#![warn(missing_docs)]

//! Ray intersection for wide, displaced line features.
//!
//! Line meshes are raycast as ribbons around their centerlines rather than
//! as the thin triangles they are stored as. When the line material
//! displaces vertices, rays are tested against the displaced positions
//! through a shared view instead of a displaced copy of the mesh.
//!
//! # Architecture
//!
//! - [`Ray`] - Ray representation with origin and direction
//! - [`LineHit`] - Intersection result with distance, point and segment
//! - [`intersect`] - Closed-form plane, segment and triangle tests
//! - [`LineRaycaster`] - Per-feature sphere culling and exact ribbon tests
//! - [`RaycastContext`] - Scratch state (the shared displaced view) for a batch
//! - [`TriangleRaycaster`] - Whole-mesh path for undisplaced materials
//!
//! # Example
//!
//! ```ignore
//! use linecast_raytrace::{LineRaycaster, LineStyle, RaycastContext, RaycastQuery, Ray};
//!
//! let style = LineStyle::new(2.0, 0.5).with_displacement(heightmap);
//! let raycaster = LineRaycaster::new(BruteForceTriangles, heightmap.range());
//!
//! let mut ctx = RaycastContext::new();
//! let mut hits = Vec::new();
//! let query = RaycastQuery::new(Ray::new(eye, direction));
//! raycaster.raycast(&road, &style, &query, &mut ctx, &mut hits);
//! ```

mod context;
mod engine;
mod fallback;
pub mod intersect;
mod material;
mod ray;

pub use context::{RaycastContext, RaycastStats};
pub use engine::{intersect_features, LineRaycaster, RaycastQuery};
pub use fallback::{BruteForceTriangles, TriangleRaycaster};
pub use material::{LineMaterial, LineStyle};
pub use ray::{sort_hits_by_distance, LineHit, Ray};
