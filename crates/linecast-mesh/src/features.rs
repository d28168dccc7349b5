//! Partitioning an index buffer into features.
//!
//! A feature is one logical line string: a contiguous run of segments in
//! the index buffer. Features are described by their start offsets, in
//! ascending order; each one runs until the next start (or the end of the
//! buffer).

use std::ops::Range;

use crate::error::{MeshError, Result};
use crate::geometry::SEGMENT_STRIDE;

/// Ordered feature start offsets into an index buffer.
///
/// The default is a single feature starting at 0, i.e. the whole mesh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureTable {
    starts: Vec<usize>,
}

impl FeatureTable {
    /// Validate `starts` against an index buffer of `index_count` entries.
    ///
    /// An empty list is treated as the default single feature.
    pub fn new(starts: Vec<usize>, index_count: usize) -> Result<Self> {
        if starts.is_empty() {
            return Ok(Self::default());
        }
        for (position, &start) in starts.iter().enumerate() {
            let reason = if position == 0 && start != 0 {
                Some("first feature must start at 0")
            } else if position > 0 && start <= starts[position - 1] {
                Some("starts must be strictly ascending")
            } else if start % SEGMENT_STRIDE != 0 {
                Some("start is not on a segment boundary")
            } else if start >= index_count && !(start == 0 && index_count == 0) {
                Some("start is past the end of the index buffer")
            } else {
                None
            };
            if let Some(reason) = reason {
                return Err(MeshError::InvalidFeatureStart {
                    position,
                    start,
                    reason,
                });
            }
        }
        Ok(Self { starts })
    }

    /// Number of features.
    pub fn len(&self) -> usize {
        self.starts.len()
    }

    /// Always false: a table holds at least one feature.
    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }

    /// The start offsets.
    pub fn starts(&self) -> &[usize] {
        &self.starts
    }

    /// Index range `[begin, end)` of feature `feature`.
    pub fn range(&self, feature: usize, index_count: usize) -> Range<usize> {
        let begin = self.starts[feature];
        let end = self.starts.get(feature + 1).copied().unwrap_or(index_count);
        begin..end
    }

    /// All feature ranges, in ascending order.
    pub fn ranges(&self, index_count: usize) -> impl Iterator<Item = Range<usize>> + '_ {
        (0..self.starts.len()).map(move |f| self.range(f, index_count))
    }
}

impl Default for FeatureTable {
    fn default() -> Self {
        Self { starts: vec![0] }
    }
}
