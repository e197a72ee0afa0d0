use crate::error::{GeometryError, Result};
use crate::math::intersect_3d::{face_forward, ray_sphere};
use crate::math::{Point3, Ray, TOLERANCE};

use super::{SceneQuery, SurfaceHit};

/// A solid sphere.
///
/// The outward normal at a surface point `P` is `(P - center) / radius`.
/// Hits from inside report the inward-facing normal.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Point3,
    radius: f64,
}

impl Sphere {
    /// Creates a new sphere.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is non-positive or not finite.
    pub fn new(center: Point3, radius: f64) -> Result<Self> {
        if !radius.is_finite() {
            return Err(GeometryError::NonFinite("sphere radius").into());
        }
        if radius < TOLERANCE {
            return Err(
                GeometryError::Degenerate("sphere radius must be positive".into()).into(),
            );
        }
        Ok(Self { center, radius })
    }

    /// Returns the center of the sphere.
    #[must_use]
    pub fn center(&self) -> &Point3 {
        &self.center
    }

    /// Returns the radius.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl SceneQuery for Sphere {
    fn cast(&self, ray: &Ray) -> Option<SurfaceHit> {
        let t = ray_sphere(ray, &self.center, self.radius)?;
        let point = ray.at(t);
        let outward = (point - self.center) / self.radius;
        Some(SurfaceHit {
            point,
            normal: face_forward(outward, ray.direction()),
            distance: t,
        })
    }
}
