//! JSON scene files: line meshes with their materials.

use std::path::Path;

use anyhow::{bail, Context, Result};
use linecast_math::{Point2, Point3, Transform, Vec3};
use linecast_mesh::{
    DisplacementMap, DisplacementRange, LineMesh, LineMeshGeometry, MeshId, VertexAttributes,
};
use linecast_raytrace::LineStyle;
use serde::Deserialize;

/// A scene file as stored on disk.
#[derive(Debug, Deserialize)]
pub struct SceneFile {
    pub meshes: Vec<MeshFile>,
}

#[derive(Debug, Deserialize)]
pub struct MeshFile {
    pub id: u32,
    pub positions: Vec<[f64; 3]>,
    pub normals: Vec<[f64; 3]>,
    pub uvs: Vec<[f64; 2]>,
    pub bitangents: Vec<[f64; 3]>,
    /// Absent for non-indexed meshes.
    #[serde(default)]
    pub indices: Option<Vec<u32>>,
    /// Feature start offsets; absent means one feature.
    #[serde(default)]
    pub features: Option<Vec<usize>>,
    /// Row-major 4x4 matrix.
    #[serde(default)]
    pub world: Option<[f64; 16]>,
    pub material: MaterialFile,
}

#[derive(Debug, Deserialize)]
pub struct MaterialFile {
    pub line_width: f64,
    #[serde(default)]
    pub outline_width: f64,
    #[serde(default)]
    pub displacement: Option<DisplacementFile>,
}

#[derive(Debug, Deserialize)]
pub struct DisplacementFile {
    pub width: usize,
    pub height: usize,
    pub values: Vec<f32>,
    #[serde(default = "default_scale")]
    pub scale: f64,
    #[serde(default)]
    pub bias: f64,
}

fn default_scale() -> f64 {
    1.0
}

/// A mesh ready to raycast.
#[derive(Debug)]
pub struct SceneMesh {
    pub mesh: LineMesh,
    pub style: LineStyle,
    /// Range of the material's displacement map, if it has one.
    pub displacement: Option<DisplacementRange>,
}

/// Read and build the scene at `path`.
pub fn load(path: &Path) -> Result<Vec<SceneMesh>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read scene {}", path.display()))?;
    let file: SceneFile = serde_json::from_str(&json)
        .with_context(|| format!("failed to parse scene {}", path.display()))?;
    let meshes = build(file)?;
    log::info!("loaded {} meshes from {}", meshes.len(), path.display());
    Ok(meshes)
}

/// Turn a parsed scene into meshes and styles.
pub fn build(file: SceneFile) -> Result<Vec<SceneMesh>> {
    file.meshes
        .into_iter()
        .map(|m| {
            let id = MeshId(m.id);
            build_mesh(m).with_context(|| format!("invalid {id}"))
        })
        .collect()
}

fn build_mesh(file: MeshFile) -> Result<SceneMesh> {
    let point3 = |p: &[f64; 3]| Point3::new(p[0], p[1], p[2]);
    let vec3 = |v: &[f64; 3]| Vec3::new(v[0], v[1], v[2]);
    let attributes = VertexAttributes {
        positions: file.positions.iter().map(point3).collect(),
        normals: file.normals.iter().map(vec3).collect(),
        uvs: file.uvs.iter().map(|uv| Point2::new(uv[0], uv[1])).collect(),
        bitangents: file.bitangents.iter().map(vec3).collect(),
    };

    let displaced = file.material.displacement.is_some();
    let geometry = match file.indices {
        Some(indices) => LineMeshGeometry::indexed(attributes, indices)?,
        None if displaced => bail!("a displaced line mesh needs an index buffer"),
        None => LineMeshGeometry::non_indexed(attributes)?,
    };

    let mut mesh = LineMesh::new(MeshId(file.id), geometry);
    if let Some(starts) = file.features {
        mesh.set_features(starts)?;
    }
    if let Some(world) = &file.world {
        mesh.set_world_transform(Transform::from_row_major(world));
    }

    let material = file.material;
    let mut style = LineStyle::new(material.line_width, material.outline_width);
    let mut displacement = None;
    if let Some(d) = material.displacement {
        let map = DisplacementMap::new(d.width, d.height, d.values, d.scale, d.bias)?;
        displacement = Some(map.range());
        style = style.with_displacement(map);
    }

    Ok(SceneMesh {
        mesh,
        style,
        displacement,
    })
}

/// Smallest range covering every displacement map in the scene.
pub fn combined_range(meshes: &[SceneMesh]) -> DisplacementRange {
    meshes
        .iter()
        .filter_map(|m| m.displacement)
        .reduce(|a, b| DisplacementRange::new(a.min.min(b.min), a.max.max(b.max)))
        .unwrap_or_default()
}
