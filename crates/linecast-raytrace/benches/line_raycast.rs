use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use linecast_math::{Point2, Point3, Vec3};
use linecast_mesh::{
    ConstantDisplacement, DisplacementRange, LineMesh, LineMeshGeometry, MeshId, VertexAttributes,
};
use linecast_raytrace::{
    BruteForceTriangles, LineRaycaster, LineStyle, Ray, RaycastContext, RaycastQuery,
};

/// A winding road of `segments` segments, split into features of 16 segments.
fn winding_road(segments: usize) -> LineMesh {
    let n = segments + 1;
    let positions: Vec<Point3> = (0..n)
        .map(|i| {
            let x = i as f64;
            Point3::new(x, (x * 0.1).sin() * 20.0, 0.0)
        })
        .collect();
    let bitangents = (0..n)
        .map(|i| {
            let dir = if i + 1 < n {
                positions[i + 1] - positions[i]
            } else {
                positions[i] - positions[i - 1]
            };
            Vec3::z().cross(&dir).normalize()
        })
        .collect();
    let attributes = VertexAttributes {
        normals: vec![Vec3::z(); n],
        uvs: (0..n).map(|i| Point2::new(i as f64 / segments as f64, 0.5)).collect(),
        bitangents,
        positions,
    };
    let indices = (0..segments as u32)
        .flat_map(|s| [s, s, s + 1, s, s + 1, s + 1])
        .collect();
    let geometry = LineMeshGeometry::indexed(attributes, indices).expect("valid road");
    let starts = (0..segments).step_by(16).map(|s| s * 6).collect();
    LineMesh::new(MeshId(0), geometry)
        .with_features(starts)
        .expect("valid features")
}

fn bench_line_raycast(c: &mut Criterion) {
    let mut group = c.benchmark_group("line_raycast");

    for segments in [256usize, 4096] {
        let mesh = winding_road(segments);
        let query = RaycastQuery::new(Ray::new(
            Point3::new(segments as f64 / 2.0, 0.0, 50.0),
            Vec3::new(0.05, 0.0, -1.0),
        ));
        let raycaster = LineRaycaster::new(BruteForceTriangles, DisplacementRange::new(0.0, 2.0));

        let displaced = LineStyle::new(1.0, 0.25).with_displacement(ConstantDisplacement(2.0));
        group.bench_with_input(BenchmarkId::new("displaced", segments), &mesh, |b, mesh| {
            b.iter(|| {
                let mut ctx = RaycastContext::new();
                let mut hits = Vec::new();
                raycaster.raycast(mesh, &displaced, black_box(&query), &mut ctx, &mut hits);
                hits
            })
        });

        let flat = LineStyle::new(1.0, 0.25);
        group.bench_with_input(BenchmarkId::new("fallback", segments), &mesh, |b, mesh| {
            b.iter(|| {
                let mut ctx = RaycastContext::new();
                let mut hits = Vec::new();
                raycaster.raycast(mesh, &flat, black_box(&query), &mut ctx, &mut hits);
                hits
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_line_raycast);
criterion_main!(benches);
