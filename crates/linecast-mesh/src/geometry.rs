//! Indexed line geometry and the read interface shared with displaced views.

use linecast_math::{Point2, Point3, Vec3};

use crate::error::{MeshError, Result};

/// Number of indices describing one extruded segment (two triangles).
pub const SEGMENT_STRIDE: usize = 6;

/// Read access to an indexed line mesh.
///
/// Implemented by the stored geometry and by displaced overlays, so
/// intersection code never needs to know which one it is looking at.
pub trait LineGeometry {
    /// The index buffer, or `None` for non-indexed geometry.
    fn indices(&self) -> Option<&[u32]>;

    /// Number of vertices.
    fn vertex_count(&self) -> usize;

    /// Position of vertex `i` in local space.
    fn position(&self, i: usize) -> Point3;

    /// Extrusion direction of vertex `i` in local space.
    fn bitangent(&self, i: usize) -> Vec3;
}

/// Parallel per-vertex attribute arrays.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VertexAttributes {
    /// Centerline positions.
    pub positions: Vec<Point3>,
    /// Normals; displacement is applied along these.
    pub normals: Vec<Vec3>,
    /// Texture coordinates used to sample the displacement source.
    pub uvs: Vec<Point2>,
    /// Direction the ribbon is extruded along to give it width.
    pub bitangents: Vec<Vec3>,
}

impl VertexAttributes {
    /// Number of vertices, taken from the position attribute.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// True if there are no vertices.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Check that every attribute has one entry per position.
    pub fn validate(&self) -> Result<()> {
        let expected = self.positions.len();
        let lengths = [
            ("normal", self.normals.len()),
            ("uv", self.uvs.len()),
            ("bitangent", self.bitangents.len()),
        ];
        for (attribute, actual) in lengths {
            if actual != expected {
                return Err(MeshError::AttributeLength {
                    attribute,
                    expected,
                    actual,
                });
            }
        }
        Ok(())
    }
}

/// Stored geometry of an extruded line mesh.
///
/// Each segment is two triangles (six indices). `indices[i]` and
/// `indices[i + 2]` are the centerline start and end of the segment
/// starting at offset `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct LineMeshGeometry {
    attributes: VertexAttributes,
    indices: Option<Vec<u32>>,
}

impl LineMeshGeometry {
    /// Build an indexed geometry, validating attribute and index buffers.
    pub fn indexed(attributes: VertexAttributes, indices: Vec<u32>) -> Result<Self> {
        attributes.validate()?;
        if indices.len() % SEGMENT_STRIDE != 0 {
            return Err(MeshError::PartialSegment(indices.len()));
        }
        let vertex_count = attributes.len();
        if let Some((offset, &index)) = indices
            .iter()
            .enumerate()
            .find(|(_, i)| **i as usize >= vertex_count)
        {
            return Err(MeshError::IndexOutOfRange {
                offset,
                index,
                vertex_count,
            });
        }
        Ok(Self {
            attributes,
            indices: Some(indices),
        })
    }

    /// Build a geometry without an index buffer.
    ///
    /// Line raycasting rejects such geometry; only the whole-mesh triangle
    /// path can consume it.
    pub fn non_indexed(attributes: VertexAttributes) -> Result<Self> {
        attributes.validate()?;
        Ok(Self {
            attributes,
            indices: None,
        })
    }

    /// The per-vertex attributes.
    pub fn attributes(&self) -> &VertexAttributes {
        &self.attributes
    }

    /// Number of entries in the index buffer (zero if non-indexed).
    pub fn index_count(&self) -> usize {
        self.indices.as_ref().map_or(0, Vec::len)
    }

    /// Number of segments in the index buffer.
    pub fn segment_count(&self) -> usize {
        self.index_count() / SEGMENT_STRIDE
    }
}

impl LineGeometry for LineMeshGeometry {
    fn indices(&self) -> Option<&[u32]> {
        self.indices.as_deref()
    }

    fn vertex_count(&self) -> usize {
        self.attributes.len()
    }

    fn position(&self, i: usize) -> Point3 {
        self.attributes.positions[i]
    }

    fn bitangent(&self, i: usize) -> Vec3 {
        self.attributes.bitangents[i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(n: usize) -> VertexAttributes {
        VertexAttributes {
            positions: (0..n).map(|i| Point3::new(i as f64, 0.0, 0.0)).collect(),
            normals: vec![Vec3::z(); n],
            uvs: vec![Point2::origin(); n],
            bitangents: vec![Vec3::y(); n],
        }
    }

    #[test]
    fn test_indexed_geometry() {
        let geom = LineMeshGeometry::indexed(attrs(2), vec![0, 0, 1, 0, 1, 1]).unwrap();
        assert_eq!(geom.index_count(), 6);
        assert_eq!(geom.segment_count(), 1);
        assert_eq!(geom.vertex_count(), 2);
        assert_eq!(geom.position(1), Point3::new(1.0, 0.0, 0.0));
        assert_eq!(geom.bitangent(0), Vec3::y());
    }

    #[test]
    fn test_partial_segment_rejected() {
        let err = LineMeshGeometry::indexed(attrs(2), vec![0, 0, 1]).unwrap_err();
        assert_eq!(err, MeshError::PartialSegment(3));
    }

    #[test]
    fn test_index_out_of_range() {
        let err = LineMeshGeometry::indexed(attrs(2), vec![0, 0, 1, 0, 1, 2]).unwrap_err();
        assert!(matches!(
            err,
            MeshError::IndexOutOfRange {
                offset: 5,
                index: 2,
                vertex_count: 2
            }
        ));
    }

    #[test]
    fn test_attribute_length_mismatch() {
        let mut a = attrs(3);
        a.uvs.pop();
        let err = LineMeshGeometry::non_indexed(a).unwrap_err();
        assert!(matches!(
            err,
            MeshError::AttributeLength {
                attribute: "uv",
                expected: 3,
                actual: 2
            }
        ));
    }

    #[test]
    fn test_non_indexed_has_no_indices() {
        let geom = LineMeshGeometry::non_indexed(attrs(3)).unwrap();
        assert!(geom.indices().is_none());
        assert_eq!(geom.index_count(), 0);
    }
}
