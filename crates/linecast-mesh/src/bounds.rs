//! Per-feature bounding spheres.

use std::cell::OnceCell;
use std::ops::Range;

use linecast_math::{Aabb3, Point3, Sphere, Vec3};

use crate::displacement::DisplacementRange;
use crate::geometry::SEGMENT_STRIDE;

/// Centerline vertices of every segment in `range`: `indices[i]` and
/// `indices[i + 2]` for each segment offset `i`.
fn spine_vertices<'p>(
    positions: &'p [Point3],
    indices: &'p [u32],
    range: Range<usize>,
) -> impl Iterator<Item = &'p Point3> + 'p {
    range
        .step_by(SEGMENT_STRIDE)
        .flat_map(move |i| [indices[i], indices[i + 2]])
        .map(move |v| &positions[v as usize])
}

/// Bounding sphere of one feature.
///
/// Without a displacement range the sphere is centered on the box of the
/// spine vertices, with the radius reaching the farthest vertex. With a
/// range, the box is swept along `normal` from `range.min` to `range.max`
/// and the sphere circumscribes the swept box.
///
/// Returns [`Sphere::empty`] for a feature with no segments.
pub fn compute_feature_sphere(
    positions: &[Point3],
    indices: &[u32],
    range: Range<usize>,
    normal: &Vec3,
    displacement: Option<DisplacementRange>,
) -> Sphere {
    let aabb = Aabb3::from_points(spine_vertices(positions, indices, range.clone()));
    if aabb.is_empty() {
        return Sphere::empty();
    }

    match displacement {
        Some(d) => {
            let low = aabb.translated(&(normal * d.min));
            let high = aabb.translated(&(normal * d.max));
            low.union(&high).bounding_sphere()
        }
        None => {
            let center = aabb.center();
            let radius = spine_vertices(positions, indices, range)
                .map(|p| (p - center).norm_squared())
                .fold(0.0_f64, f64::max)
                .sqrt();
            Sphere::new(center, radius)
        }
    }
}

/// Lazily computed bounding sphere per feature.
///
/// A slot is filled the first time its feature is tested and never
/// recomputed afterwards.
#[derive(Debug, Clone, Default)]
pub struct FeatureBounds {
    spheres: Vec<OnceCell<Sphere>>,
}

impl FeatureBounds {
    /// An empty cache with one slot per feature.
    pub fn new(feature_count: usize) -> Self {
        Self {
            spheres: (0..feature_count).map(|_| OnceCell::new()).collect(),
        }
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.spheres.len()
    }

    /// True if there are no slots.
    pub fn is_empty(&self) -> bool {
        self.spheres.is_empty()
    }

    /// The cached sphere for `feature`, if computed.
    pub fn get(&self, feature: usize) -> Option<&Sphere> {
        self.spheres.get(feature).and_then(OnceCell::get)
    }

    /// Number of features whose sphere has been computed.
    pub fn computed(&self) -> usize {
        self.spheres.iter().filter(|s| s.get().is_some()).count()
    }

    /// The sphere for `feature`, computing it with `compute` if missing.
    pub fn get_or_compute(&self, feature: usize, compute: impl FnOnce() -> Sphere) -> Sphere {
        *self.spheres[feature].get_or_init(|| {
            let sphere = compute();
            log::trace!(
                "feature {feature}: bounding sphere center={:?} radius={}",
                sphere.center,
                sphere.radius
            );
            sphere
        })
    }
}
