use crate::error::{GeometryError, Result};
use crate::math::{Point3, Ray, Vector3, TOLERANCE};

use super::{Plane, SceneQuery, SurfaceHit};

/// A finite rectangular patch of a plane.
///
/// Covers `center + u * u_dir + v * v_dir` for `|u| <= half_u` and
/// `|v| <= half_v`. Rays crossing the supporting plane outside the patch
/// miss.
#[derive(Debug, Clone)]
pub struct Rect {
    plane: Plane,
    half_u: f64,
    half_v: f64,
}

impl Rect {
    /// Creates a rectangle centered at `center`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directions are degenerate or either half
    /// extent is not positive.
    pub fn new(
        center: Point3,
        u_dir: Vector3,
        v_dir: Vector3,
        half_u: f64,
        half_v: f64,
    ) -> Result<Self> {
        if half_u < TOLERANCE || half_v < TOLERANCE {
            return Err(
                GeometryError::Degenerate("rectangle extents must be positive".into()).into(),
            );
        }
        let plane = Plane::new(center, u_dir, v_dir)?;
        Ok(Self {
            plane,
            half_u,
            half_v,
        })
    }

    /// Creates an axis-aligned, upward-facing square of side `2 * half_size`.
    ///
    /// # Errors
    ///
    /// Returns an error if `half_size` is not positive.
    pub fn horizontal(center: Point3, half_size: f64) -> Result<Self> {
        // z x x = +y
        Self::new(center, Vector3::z(), Vector3::x(), half_size, half_size)
    }

    /// Returns the supporting plane.
    #[must_use]
    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    /// Returns the half extents along U and V.
    #[must_use]
    pub fn half_extents(&self) -> (f64, f64) {
        (self.half_u, self.half_v)
    }

    /// Returns `true` if a point on the supporting plane lies inside the patch.
    #[must_use]
    pub fn contains(&self, point: &Point3) -> bool {
        let (u, v) = self.plane.inverse(point);
        u.abs() <= self.half_u + TOLERANCE && v.abs() <= self.half_v + TOLERANCE
    }
}

impl SceneQuery for Rect {
    fn cast(&self, ray: &Ray) -> Option<SurfaceHit> {
        self.plane.cast(ray).filter(|hit| self.contains(&hit.point))
    }
}
