//! linecast CLI - raycast line-mesh scenes
//!
//! Loads a JSON scene of extruded line meshes and reports where a ray hits
//! them, seeing through each material's displacement map.

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use linecast_math::{Point3, Vec3};
use linecast_mesh::DisplacementRange;
use linecast_raytrace::{
    sort_hits_by_distance, BruteForceTriangles, LineHit, LineRaycaster, Ray, RaycastContext,
    RaycastQuery,
};
use serde::Serialize;
use std::path::{Path, PathBuf};

mod config;
mod scene;

use config::Config;
use scene::SceneMesh;

#[derive(Parser)]
#[command(name = "linecast")]
#[command(about = "Raycast wide, displaced line features", long_about = None)]
struct Cli {
    /// Log at debug level regardless of RUST_LOG
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Cast one ray into a scene and print the hits as JSON
    Raycast(RaycastArgs),
    /// Display per-mesh counts, features and feature bounds
    Info {
        /// Path to the JSON scene
        #[arg(long)]
        scene: PathBuf,
    },
}

#[derive(Args)]
struct RaycastArgs {
    /// Path to the JSON scene
    #[arg(long)]
    scene: PathBuf,
    /// Optional TOML config
    #[arg(long)]
    config: Option<PathBuf>,
    /// Ray origin as x,y,z
    #[arg(long, value_parser = parse_triple, allow_hyphen_values = true)]
    origin: [f64; 3],
    /// Ray direction as x,y,z
    #[arg(long, value_parser = parse_triple, allow_hyphen_values = true)]
    direction: [f64; 3],
    /// Drop hits closer than this
    #[arg(long)]
    near: Option<f64>,
    /// Drop hits farther than this
    #[arg(long)]
    far: Option<f64>,
    /// Sort hits nearest first
    #[arg(long)]
    sort: bool,
}

/// A hit as printed.
#[derive(Debug, Serialize)]
struct HitRecord {
    mesh: u32,
    segment_index: usize,
    distance: f64,
    point: [f64; 3],
}

impl From<&LineHit> for HitRecord {
    fn from(hit: &LineHit) -> Self {
        Self {
            mesh: hit.mesh.0,
            segment_index: hit.segment_index,
            distance: hit.distance,
            point: [hit.point.x, hit.point.y, hit.point.z],
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Raycast(args) => run_raycast(&args)?,
        Commands::Info { scene } => show_info(&scene)?,
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

fn parse_triple(s: &str) -> std::result::Result<[f64; 3], String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [x, y, z] = parts.as_slice() else {
        return Err(format!("expected x,y,z, got {s:?}"));
    };
    let num = |p: &str| p.parse::<f64>().map_err(|e| format!("{p:?}: {e}"));
    Ok([num(*x)?, num(*y)?, num(*z)?])
}

fn run_raycast(args: &RaycastArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let meshes = scene::load(&args.scene)?;

    let direction = Vec3::from(args.direction);
    if direction.norm() == 0.0 {
        bail!("ray direction must be non-zero");
    }
    let near = args.near.or(config.raycast.near).unwrap_or(0.0);
    let far = args.far.or(config.raycast.far).unwrap_or(f64::INFINITY);
    if near > far {
        bail!("near ({near}) is beyond far ({far})");
    }
    let ray = Ray::new(Point3::from(args.origin), direction);
    let query = RaycastQuery::new(ray).with_range(near, far);

    let range = match config.displacement {
        Some(fixed) => fixed.into(),
        None => scene::combined_range(&meshes),
    };
    let hits = cast(&meshes, &query, range, args.sort || config.raycast.sort);

    let records: Vec<HitRecord> = hits.iter().map(HitRecord::from).collect();
    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}

/// Raycast every mesh of the scene with one shared context.
fn cast(
    meshes: &[SceneMesh],
    query: &RaycastQuery,
    range: DisplacementRange,
    sort: bool,
) -> Vec<LineHit> {
    let raycaster = LineRaycaster::new(BruteForceTriangles, range);
    let mut ctx = RaycastContext::new();
    let mut hits = Vec::new();
    raycaster.raycast_all(
        meshes.iter().map(|m| (&m.mesh, &m.style)),
        query,
        &mut ctx,
        &mut hits,
    );
    log::debug!("{:?}", ctx.stats());

    if sort {
        sort_hits_by_distance(&mut hits);
    }
    hits
}

fn show_info(path: &Path) -> Result<()> {
    let meshes = scene::load(path)?;

    println!("linecast scene: {}", path.display());
    println!("  Meshes: {}", meshes.len());

    for SceneMesh { mesh, displacement, .. } in &meshes {
        let geometry = mesh.geometry();
        println!("\n{}:", mesh.id());
        println!("  Vertices: {}", geometry.attributes().len());
        println!("  Indices: {}", geometry.index_count());
        println!("  Segments: {}", geometry.segment_count());
        if let Some(range) = displacement {
            println!("  Displacement: {} to {}", range.min, range.max);
        }

        let index_count = geometry.index_count();
        for (f, range) in mesh.features().ranges(index_count).enumerate() {
            let sphere = mesh.feature_sphere(f, *displacement);
            if sphere.is_empty() {
                println!("  Feature {f}: indices {range:?}, empty");
            } else {
                let c = sphere.center;
                println!(
                    "  Feature {f}: indices {range:?}, sphere ({:.3}, {:.3}, {:.3}) r {:.3}",
                    c.x, c.y, c.z, sphere.radius
                );
            }
        }
    }

    Ok(())
}
