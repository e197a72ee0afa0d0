use crate::error::Result;

use super::{try_unit, Point3, UnitVector3, Vector3};

/// A half-line `origin + t * direction` for `t >= 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    origin: Point3,
    direction: UnitVector3,
}

impl Ray {
    /// Creates a ray, normalizing `direction`.
    ///
    /// # Errors
    ///
    /// Returns an error if `direction` is zero-length or non-finite.
    pub fn new(origin: Point3, direction: Vector3) -> Result<Self> {
        let direction = try_unit(direction, "ray direction")?;
        Ok(Self { origin, direction })
    }

    /// Creates a ray from an already normalized direction.
    #[must_use]
    pub fn from_unit(origin: Point3, direction: UnitVector3) -> Self {
        Self { origin, direction }
    }

    /// Returns the ray origin.
    #[must_use]
    pub fn origin(&self) -> &Point3 {
        &self.origin
    }

    /// Returns the unit direction.
    #[must_use]
    pub fn direction(&self) -> &Vector3 {
        self.direction.as_ref()
    }

    /// Evaluates the point at parameter `t`.
    #[must_use]
    pub fn at(&self, t: f64) -> Point3 {
        self.origin + self.direction.as_ref() * t
    }
}
