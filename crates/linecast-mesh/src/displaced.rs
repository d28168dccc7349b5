//! Displaced views over stored line geometry.
//!
//! A displaced view answers "where is vertex `i` after displacement"
//! without copying or mutating the stored buffers. Views are meant to be
//! built once and then rebound with `reset` for every mesh that needs
//! one, so a single instance can serve a whole batch of queries.

use linecast_math::{Point2, Point3, Vec3};

use crate::displacement::{DisplacementRange, DisplacementSource};
use crate::geometry::{LineGeometry, LineMeshGeometry};

/// Displaced positions computed on demand from base attributes.
///
/// `displaced_position(i) = position[i] + normal[i] * source.sample(uv[i])`.
#[derive(Clone, Copy)]
pub struct DisplacedAttributes<'a> {
    positions: &'a [Point3],
    normals: &'a [Vec3],
    uvs: &'a [Point2],
    source: &'a dyn DisplacementSource,
}

impl<'a> DisplacedAttributes<'a> {
    /// Bind a view to base attributes and a displacement source.
    pub fn new(
        positions: &'a [Point3],
        normals: &'a [Vec3],
        uvs: &'a [Point2],
        source: &'a dyn DisplacementSource,
    ) -> Self {
        Self {
            positions,
            normals,
            uvs,
            source,
        }
    }

    /// Rebind to new attributes and source without allocating.
    pub fn reset(
        &mut self,
        positions: &'a [Point3],
        normals: &'a [Vec3],
        uvs: &'a [Point2],
        source: &'a dyn DisplacementSource,
    ) {
        self.positions = positions;
        self.normals = normals;
        self.uvs = uvs;
        self.source = source;
    }

    /// Number of vertices in the bound attributes.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// True if the bound attributes are empty.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Position of vertex `i` after displacement.
    pub fn displaced_position(&self, i: usize) -> Point3 {
        let magnitude = self.source.sample(&self.uvs[i]);
        self.positions[i] + self.normals[i] * magnitude
    }

    /// Write every displaced position into `out`, replacing its contents.
    ///
    /// This is the only way to obtain a full copy; `out` keeps its
    /// allocation between calls.
    pub fn materialize_into(&self, out: &mut Vec<Point3>) {
        out.clear();
        out.extend((0..self.len()).map(|i| self.displaced_position(i)));
    }
}

impl std::fmt::Debug for DisplacedAttributes<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DisplacedAttributes")
            .field("vertices", &self.positions.len())
            .finish_non_exhaustive()
    }
}

/// A stored line geometry seen through a displacement source.
///
/// Indices and bitangents pass straight through to the original geometry;
/// positions are displaced along the normals.
#[derive(Debug, Clone, Copy)]
pub struct DisplacedGeometry<'a> {
    original: &'a LineMeshGeometry,
    attributes: DisplacedAttributes<'a>,
    range: DisplacementRange,
}

impl<'a> DisplacedGeometry<'a> {
    /// Build a view over `original`.
    pub fn new(
        original: &'a LineMeshGeometry,
        source: &'a dyn DisplacementSource,
        range: DisplacementRange,
    ) -> Self {
        let a = original.attributes();
        Self {
            original,
            attributes: DisplacedAttributes::new(&a.positions, &a.normals, &a.uvs, source),
            range,
        }
    }

    /// Rebind the view to another geometry, source and range.
    pub fn reset(
        &mut self,
        original: &'a LineMeshGeometry,
        source: &'a dyn DisplacementSource,
        range: DisplacementRange,
    ) {
        let a = original.attributes();
        self.original = original;
        self.attributes.reset(&a.positions, &a.normals, &a.uvs, source);
        self.range = range;
    }

    /// The undisplaced geometry this view overlays.
    pub fn original(&self) -> &'a LineMeshGeometry {
        self.original
    }

    /// The displacement range the view was bound with.
    pub fn displacement_range(&self) -> DisplacementRange {
        self.range
    }

    /// The per-vertex displaced attribute view.
    pub fn attributes(&self) -> &DisplacedAttributes<'a> {
        &self.attributes
    }
}

impl LineGeometry for DisplacedGeometry<'_> {
    fn indices(&self) -> Option<&[u32]> {
        self.original.indices()
    }

    fn vertex_count(&self) -> usize {
        self.original.vertex_count()
    }

    fn position(&self, i: usize) -> Point3 {
        self.attributes.displaced_position(i)
    }

    fn bitangent(&self, i: usize) -> Vec3 {
        self.original.bitangent(i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::displacement::{ConstantDisplacement, DisplacementMap};
    use crate::geometry::VertexAttributes;

    fn geometry(offset: f64) -> LineMeshGeometry {
        let attributes = VertexAttributes {
            positions: vec![Point3::new(offset, 0.0, 0.0), Point3::new(offset + 1.0, 0.0, 0.0)],
            normals: vec![Vec3::z(), Vec3::new(0.0, 1.0, 0.0)],
            uvs: vec![Point2::new(0.25, 0.5), Point2::new(0.75, 0.5)],
            bitangents: vec![Vec3::y(), Vec3::x()],
        };
        LineMeshGeometry::indexed(attributes, vec![0, 0, 1, 0, 1, 1]).unwrap()
    }

    #[test]
    fn test_displaced_position_follows_normal() {
        let geom = geometry(0.0);
        let source = ConstantDisplacement(2.0);
        let view = DisplacedGeometry::new(&geom, &source, DisplacementRange::new(0.0, 2.0));
        assert_eq!(view.position(0), Point3::new(0.0, 0.0, 2.0));
        assert_eq!(view.position(1), Point3::new(1.0, 2.0, 0.0));
    }

    #[test]
    fn test_passes_through_indices_and_bitangents() {
        let geom = geometry(0.0);
        let source = ConstantDisplacement(5.0);
        let view = DisplacedGeometry::new(&geom, &source, DisplacementRange::zero());
        assert!(std::ptr::eq(
            view.indices().unwrap().as_ptr(),
            geom.indices().unwrap().as_ptr()
        ));
        assert_eq!(view.bitangent(1), Vec3::x());
        assert_eq!(view.vertex_count(), 2);
        assert!(std::ptr::eq(view.original(), &geom));
    }

    #[test]
    fn test_reset_rebinds_everything() {
        let first = geometry(0.0);
        let second = geometry(10.0);
        let low = ConstantDisplacement(1.0);
        let map = DisplacementMap::new(2, 1, vec![0.0, 1.0], 3.0, 0.0).unwrap();

        let mut view = DisplacedGeometry::new(&first, &low, DisplacementRange::new(0.0, 1.0));
        assert_eq!(view.position(0), Point3::new(0.0, 0.0, 1.0));

        view.reset(&second, &map, map.range());
        assert!(std::ptr::eq(view.original(), &second));
        assert_eq!(view.displacement_range(), DisplacementRange::new(0.0, 3.0));
        assert_eq!(view.position(0), Point3::new(10.0, 0.0, 0.0));
        assert_eq!(view.position(1), Point3::new(11.0, 3.0, 0.0));
    }

    #[test]
    fn test_view_does_not_touch_base() {
        let geom = geometry(0.0);
        let before = geom.clone();
        let source = ConstantDisplacement(7.0);
        let view = DisplacedGeometry::new(&geom, &source, DisplacementRange::new(0.0, 7.0));
        let _ = view.position(0);
        assert_eq!(geom, before);
    }

    #[test]
    fn test_materialize_reuses_buffer() {
        let geom = geometry(0.0);
        let source = ConstantDisplacement(1.0);
        let view = DisplacedGeometry::new(&geom, &source, DisplacementRange::new(0.0, 1.0));
        let mut out = vec![Point3::origin(); 8];
        view.attributes().materialize_into(&mut out);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0], view.position(0));
        assert_eq!(out[1], view.position(1));
    }
}
