//! Ray-triangle intersection (Möller–Trumbore).

use linecast_math::Point3;

use crate::Ray;

/// Intersect a ray with a triangle, from either side.
///
/// Returns the ray parameter of the hit, or `None` for a miss, a hit
/// behind the origin, or a degenerate triangle.
pub fn intersect_triangle(ray: &Ray, a: &Point3, b: &Point3, c: &Point3) -> Option<f64> {
    let e1 = b - a;
    let e2 = c - a;
    let p = ray.direction.cross(&e2);
    let det = e1.dot(&p);
    if det.abs() < 1e-12 {
        return None;
    }

    let inv_det = 1.0 / det;
    let s = ray.origin - a;
    let u = s.dot(&p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(&e1);
    let v = ray.direction.dot(&q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = e2.dot(&q) * inv_det;
    (t >= 0.0).then_some(t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use linecast_math::Vec3;

    fn tri() -> [Point3; 3] {
        [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(4.0, 0.0, 0.0),
            Point3::new(0.0, 4.0, 0.0),
        ]
    }

    #[test]
    fn test_hit_from_both_sides() {
        let [a, b, c] = tri();
        let down = Ray::new(Point3::new(1.0, 1.0, 3.0), Vec3::new(0.0, 0.0, -1.0));
        assert!((intersect_triangle(&down, &a, &b, &c).unwrap() - 3.0).abs() < 1e-12);
        let up = Ray::new(Point3::new(1.0, 1.0, -2.0), Vec3::new(0.0, 0.0, 1.0));
        assert!((intersect_triangle(&up, &a, &b, &c).unwrap() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_miss_outside() {
        let [a, b, c] = tri();
        let ray = Ray::new(Point3::new(3.0, 3.0, 3.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(intersect_triangle(&ray, &a, &b, &c).is_none());
    }

    #[test]
    fn test_behind_and_degenerate() {
        let [a, b, c] = tri();
        let away = Ray::new(Point3::new(1.0, 1.0, 3.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(intersect_triangle(&away, &a, &b, &c).is_none());
        let down = Ray::new(Point3::new(1.0, 1.0, 3.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(intersect_triangle(&down, &a, &a, &c).is_none());
    }
}
