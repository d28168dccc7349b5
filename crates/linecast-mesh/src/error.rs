//! Error types for line mesh construction.

use thiserror::Error;

/// Errors raised while assembling a line mesh or its companion data.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeshError {
    /// A per-vertex attribute does not have one entry per vertex.
    #[error("attribute `{attribute}` has {actual} entries, expected {expected}")]
    AttributeLength {
        /// Attribute name.
        attribute: &'static str,
        /// Vertex count taken from the position attribute.
        expected: usize,
        /// Actual number of entries.
        actual: usize,
    },

    /// The index buffer does not hold whole segments.
    #[error("index count {0} is not a multiple of 6")]
    PartialSegment(usize),

    /// An index references a vertex that does not exist.
    #[error("index {index} at offset {offset} is out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        /// Offset into the index buffer.
        offset: usize,
        /// The offending vertex index.
        index: u32,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },

    /// The feature start list does not partition the index buffer.
    #[error("invalid feature start {start} at position {position}: {reason}")]
    InvalidFeatureStart {
        /// Position within the start list.
        position: usize,
        /// The offending start offset.
        start: usize,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// Displacement map texel count does not match its dimensions.
    #[error("displacement map is {width}x{height} but has {len} texels")]
    DisplacementMapSize {
        /// Width in texels.
        width: usize,
        /// Height in texels.
        height: usize,
        /// Number of texel values supplied.
        len: usize,
    },
}

/// Result type for mesh operations.
pub type Result<T> = std::result::Result<T, MeshError>;
