//! Ray intersection primitives.
//!
//! Closed-form tests used by the line engine (ribbon plane, centerline
//! segment) and by the whole-mesh triangle fallback.

mod plane;
mod segment;
mod triangle;

pub use plane::{intersect_plane, Plane};
pub use segment::Segment;
pub use triangle::intersect_triangle;
