pub mod intersect_3d;
mod ray;

pub use ray::Ray;

use crate::error::{GeometryError, Result};

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Unit-length 3D vector type.
pub type UnitVector3 = nalgebra::Unit<Vector3>;

/// Unit quaternion used for orientations.
pub type UnitQuaternion = nalgebra::UnitQuaternion<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Normalizes `v`, failing on zero-length or non-finite input.
///
/// # Errors
///
/// Returns [`GeometryError::ZeroVector`] if `v` is shorter than
/// [`TOLERANCE`], or [`GeometryError::NonFinite`] if any component is NaN or
/// infinite.
pub fn try_unit(v: Vector3, what: &'static str) -> Result<UnitVector3> {
    if !v.iter().all(|c| c.is_finite()) {
        return Err(GeometryError::NonFinite(what).into());
    }
    UnitVector3::try_new(v, TOLERANCE).ok_or_else(|| GeometryError::ZeroVector.into())
}
