//! Reusable scratch state for a batch of raycasts.

use linecast_mesh::{DisplacedGeometry, DisplacementRange, DisplacementSource, LineMeshGeometry};

/// Counters accumulated over the lifetime of a [`RaycastContext`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RaycastStats {
    /// Meshes handed to the line engine.
    pub meshes: usize,
    /// Meshes delegated to the triangle fallback.
    pub fallback_meshes: usize,
    /// Features whose bounding sphere was tested.
    pub features_tested: usize,
    /// Features skipped because the ray missed their bounding sphere.
    pub features_rejected: usize,
    /// Segments given the exact ribbon test.
    pub segments_tested: usize,
    /// Hits produced by the line engine.
    pub hits: usize,
    /// Times the displaced view was built.
    pub view_builds: usize,
    /// Times the displaced view was rebound to another mesh.
    pub view_rebinds: usize,
}

/// Scratch state shared by every raycast of one batch.
///
/// Holds the single displaced view that all displaced line meshes of the
/// batch are seen through: it is built by the first displaced query and
/// rebound for each later one. The context borrows the meshes and
/// materials it is used with for `'a`, and is neither `Send` nor `Sync`;
/// give each thread its own context.
#[derive(Debug, Default)]
pub struct RaycastContext<'a> {
    view: Option<DisplacedGeometry<'a>>,
    stats: RaycastStats,
}

impl<'a> RaycastContext<'a> {
    /// An empty context; nothing is allocated until first use.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counters so far.
    pub fn stats(&self) -> &RaycastStats {
        &self.stats
    }

    pub(crate) fn stats_mut(&mut self) -> &mut RaycastStats {
        &mut self.stats
    }

    /// Zero the counters; the displaced view is kept.
    pub fn reset_stats(&mut self) {
        self.stats = RaycastStats::default();
    }

    /// The displaced view bound to `original`, building it on first use and
    /// rebinding it afterwards.
    pub fn displaced_view(
        &mut self,
        original: &'a LineMeshGeometry,
        source: &'a dyn DisplacementSource,
        range: DisplacementRange,
    ) -> &DisplacedGeometry<'a> {
        let reused = self.view.is_some();
        let view = self
            .view
            .get_or_insert_with(|| DisplacedGeometry::new(original, source, range));
        if reused {
            view.reset(original, source, range);
            self.stats.view_rebinds += 1;
        } else {
            log::debug!("building shared displaced view");
            self.stats.view_builds += 1;
        }
        view
    }
}
