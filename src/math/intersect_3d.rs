use super::{Point3, Ray, Vector3, TOLERANCE};

/// Smallest ray parameter accepted as a hit.
///
/// Hits closer than this to the ray origin are discarded so that a ray
/// starting exactly on a surface does not report that surface again.
pub const MIN_HIT_DISTANCE: f64 = 1e-9;

/// Intersects a ray with the plane through `origin` with unit `normal`.
///
/// Returns the ray parameter of the crossing, or `None` if the ray is
/// parallel to the plane or the crossing lies behind the ray origin.
#[must_use]
pub fn ray_plane(ray: &Ray, origin: &Point3, normal: &Vector3) -> Option<f64> {
    let denom = normal.dot(ray.direction());
    if denom.abs() < TOLERANCE {
        return None;
    }

    let t = (origin - ray.origin()).dot(normal) / denom;
    (t >= MIN_HIT_DISTANCE).then_some(t)
}

/// Intersects a ray with a sphere, returning the nearest ray parameter in
/// front of the origin.
///
/// Solves `|O + t*D - C|^2 = r^2`. When the origin is inside the sphere the
/// far root is returned.
#[must_use]
pub fn ray_sphere(ray: &Ray, center: &Point3, radius: f64) -> Option<f64> {
    let dp = ray.origin() - center;
    let dir = ray.direction();

    // `dir` is unit length, so the quadratic's `a` term is 1.
    let half_b = dp.dot(dir);
    let c = dp.dot(&dp) - radius * radius;
    let disc = half_b * half_b - c;
    if disc < -TOLERANCE {
        return None;
    }
    let root = disc.max(0.0).sqrt();

    let near = -half_b - root;
    if near >= MIN_HIT_DISTANCE {
        return Some(near);
    }
    let far = -half_b + root;
    (far >= MIN_HIT_DISTANCE).then_some(far)
}

/// Intersects a ray with the triangle `(a, b, c)` (Möller–Trumbore).
///
/// The triangle is two-sided. Returns the ray parameter of the hit.
#[must_use]
pub fn ray_triangle(ray: &Ray, a: &Point3, b: &Point3, c: &Point3) -> Option<f64> {
    let edge1 = b - a;
    let edge2 = c - a;
    let dir = ray.direction();

    let pvec = dir.cross(&edge2);
    let det = edge1.dot(&pvec);
    if det.abs() < TOLERANCE {
        return None;
    }
    let inv_det = 1.0 / det;

    let tvec = ray.origin() - a;
    let u = tvec.dot(&pvec) * inv_det;
    if !(-TOLERANCE..=1.0 + TOLERANCE).contains(&u) {
        return None;
    }

    let qvec = tvec.cross(&edge1);
    let v = dir.dot(&qvec) * inv_det;
    if v < -TOLERANCE || u + v > 1.0 + TOLERANCE {
        return None;
    }

    let t = edge2.dot(&qvec) * inv_det;
    (t >= MIN_HIT_DISTANCE).then_some(t)
}

/// Returns `normal` flipped, if needed, so that it opposes `direction`.
#[must_use]
pub fn face_forward(normal: Vector3, direction: &Vector3) -> Vector3 {
    if normal.dot(direction) > 0.0 {
        -normal
    } else {
        normal
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn v(x: f64, y: f64, z: f64) -> Vector3 {
        Vector3::new(x, y, z)
    }

    fn ray(origin: Point3, dir: Vector3) -> Ray {
        Ray::new(origin, dir).unwrap()
    }

    // ── ray_plane ──

    #[test]
    fn ray_hits_plane() {
        let r = ray(p(0.0, 5.0, 0.0), v(0.0, -1.0, 0.0));
        let t = ray_plane(&r, &p(0.0, 0.0, 0.0), &v(0.0, 1.0, 0.0)).unwrap();
        assert!((t - 5.0).abs() < TOLERANCE);
    }

    #[test]
    fn ray_parallel_to_plane_misses() {
        let r = ray(p(0.0, 5.0, 0.0), v(1.0, 0.0, 0.0));
        assert!(ray_plane(&r, &p(0.0, 0.0, 0.0), &v(0.0, 1.0, 0.0)).is_none());
    }

    #[test]
    fn plane_behind_ray_misses() {
        let r = ray(p(0.0, 5.0, 0.0), v(0.0, 1.0, 0.0));
        assert!(ray_plane(&r, &p(0.0, 0.0, 0.0), &v(0.0, 1.0, 0.0)).is_none());
    }

    #[test]
    fn grazing_ray_still_hits_plane() {
        let r = ray(p(0.0, 1.0, 0.0), v(1.0, -1e-4, 0.0));
        let t = ray_plane(&r, &p(0.0, 0.0, 0.0), &v(0.0, 1.0, 0.0)).unwrap();
        assert!(r.at(t).y.abs() < 1e-6);
    }

    // ── ray_sphere ──

    #[test]
    fn ray_hits_sphere_front() {
        let r = ray(p(0.0, 0.0, -10.0), v(0.0, 0.0, 1.0));
        let t = ray_sphere(&r, &p(0.0, 0.0, 0.0), 2.0).unwrap();
        assert!((t - 8.0).abs() < 1e-9);
    }

    #[test]
    fn ray_inside_sphere_hits_far_side() {
        let r = ray(p(0.0, 0.0, 0.0), v(0.0, 0.0, 1.0));
        let t = ray_sphere(&r, &p(0.0, 0.0, 0.0), 2.0).unwrap();
        assert!((t - 2.0).abs() < 1e-9);
    }

    #[test]
    fn ray_misses_sphere() {
        let r = ray(p(0.0, 3.0, -10.0), v(0.0, 0.0, 1.0));
        assert!(ray_sphere(&r, &p(0.0, 0.0, 0.0), 2.0).is_none());
    }

    // ── ray_triangle ──

    #[test]
    fn ray_hits_triangle_interior() {
        let r = ray(p(0.2, 1.0, 0.2), v(0.0, -1.0, 0.0));
        let t = ray_triangle(&r, &p(0.0, 0.0, 0.0), &p(1.0, 0.0, 0.0), &p(0.0, 0.0, 1.0)).unwrap();
        assert!((t - 1.0).abs() < 1e-9);
    }

    #[test]
    fn ray_misses_triangle_outside() {
        let r = ray(p(0.8, 1.0, 0.8), v(0.0, -1.0, 0.0));
        assert!(
            ray_triangle(&r, &p(0.0, 0.0, 0.0), &p(1.0, 0.0, 0.0), &p(0.0, 0.0, 1.0)).is_none()
        );
    }

    #[test]
    fn triangle_is_two_sided() {
        let r = ray(p(0.2, -1.0, 0.2), v(0.0, 1.0, 0.0));
        assert!(
            ray_triangle(&r, &p(0.0, 0.0, 0.0), &p(1.0, 0.0, 0.0), &p(0.0, 0.0, 1.0)).is_some()
        );
    }

    // ── face_forward ──

    #[test]
    fn face_forward_flips_toward_ray() {
        let n = face_forward(v(0.0, -1.0, 0.0), &v(0.0, -1.0, 0.0));
        assert!((n.y - 1.0).abs() < TOLERANCE);
        let n = face_forward(v(0.0, 1.0, 0.0), &v(0.0, -1.0, 0.0));
        assert!((n.y - 1.0).abs() < TOLERANCE);
    }
}
