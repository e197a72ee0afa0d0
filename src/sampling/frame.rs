use nalgebra::Rotation3;
use tracing::debug;

use crate::error::Result;
use crate::math::{try_unit, Point2, UnitQuaternion, Vector3};

/// Below this `|normal x up|` the reference up is treated as parallel to
/// the normal and a world axis is substituted.
pub const FRAME_EPSILON: f64 = 1e-6;

/// An orthonormal basis built at a surface point.
///
/// `tangent = normalize(normal x up)` and `bitangent = normal x tangent`,
/// so `(tangent, bitangent, normal)` is right-handed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TangentFrame {
    normal: Vector3,
    tangent: Vector3,
    bitangent: Vector3,
    fallback: bool,
}

impl TangentFrame {
    /// Builds a frame around `normal`, using `reference_up` to orient the
    /// tangent.
    ///
    /// When `reference_up` is (nearly) parallel to `normal`, or zero, a world
    /// axis that is not parallel to `normal` is used instead, so every
    /// non-zero normal yields a valid frame.
    ///
    /// # Errors
    ///
    /// Returns an error if `normal` is zero-length or not finite.
    pub fn new(normal: Vector3, reference_up: Vector3) -> Result<Self> {
        let normal = try_unit(normal, "surface normal")?.into_inner();

        let cross = normal.cross(&reference_up);
        let cross_len = cross.norm();
        let (tangent, fallback) = if cross_len.is_finite() && cross_len >= FRAME_EPSILON {
            (cross / cross_len, false)
        } else {
            let axis = fallback_axis(&normal);
            debug!(?normal, ?reference_up, ?axis, "degenerate tangent frame, using fallback axis");
            (normal.cross(&axis).normalize(), true)
        };
        let bitangent = normal.cross(&tangent);

        Ok(Self {
            normal,
            tangent,
            bitangent,
            fallback,
        })
    }

    /// Returns the unit normal.
    #[must_use]
    pub fn normal(&self) -> &Vector3 {
        &self.normal
    }

    /// Returns the unit tangent.
    #[must_use]
    pub fn tangent(&self) -> &Vector3 {
        &self.tangent
    }

    /// Returns the unit bitangent.
    #[must_use]
    pub fn bitangent(&self) -> &Vector3 {
        &self.bitangent
    }

    /// Returns `true` if the reference up was replaced by a world axis.
    #[must_use]
    pub fn used_fallback(&self) -> bool {
        self.fallback
    }

    /// Maps a 2D disc offset into a world-space offset in the tangent plane.
    #[must_use]
    pub fn to_world(&self, p: &Point2) -> Vector3 {
        self.tangent * p.x + self.bitangent * p.y
    }

    /// Returns the rotation taking local `(x, y, z)` to
    /// `(tangent, bitangent, normal)`.
    #[must_use]
    pub fn rotation(&self) -> UnitQuaternion {
        let basis = Rotation3::from_basis_unchecked(&[self.tangent, self.bitangent, self.normal]);
        UnitQuaternion::from_rotation_matrix(&basis)
    }
}

/// Picks a world axis that is far from parallel to `normal`.
fn fallback_axis(normal: &Vector3) -> Vector3 {
    if normal.x.abs() < 0.9 {
        Vector3::x()
    } else {
        Vector3::y()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn v(x: f64, y: f64, z: f64) -> Vector3 {
        Vector3::new(x, y, z)
    }

    fn assert_orthonormal(frame: &TangentFrame) {
        let (n, t, b) = (frame.normal(), frame.tangent(), frame.bitangent());
        for axis in [n, t, b] {
            assert!(axis.iter().all(|c| c.is_finite()), "non-finite axis {axis:?}");
            assert_relative_eq!(axis.norm(), 1.0, epsilon = 1e-9);
        }
        assert!(n.dot(t).abs() < 1e-9, "n.t = {}", n.dot(t));
        assert!(n.dot(b).abs() < 1e-9, "n.b = {}", n.dot(b));
        assert!(t.dot(b).abs() < 1e-9, "t.b = {}", t.dot(b));
    }

    #[test]
    fn regular_frame_follows_definition() {
        let frame = TangentFrame::new(v(0.0, 0.0, 1.0), v(0.0, 1.0, 0.0)).unwrap();
        assert!(!frame.used_fallback());
        // z x y = -x
        assert_relative_eq!(*frame.tangent(), v(-1.0, 0.0, 0.0), epsilon = 1e-12);
        // z x -x = -y
        assert_relative_eq!(*frame.bitangent(), v(0.0, -1.0, 0.0), epsilon = 1e-12);
        assert_orthonormal(&frame);
    }

    #[test]
    fn orthonormal_for_many_normals() {
        let up = v(0.0, 1.0, 0.0);
        for i in 0..24 {
            for j in 1..12 {
                let theta = f64::from(i) * std::f64::consts::TAU / 24.0;
                let phi = f64::from(j) * std::f64::consts::PI / 12.0;
                let n = v(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin());
                let frame = TangentFrame::new(n, up).unwrap();
                assert_relative_eq!(*frame.normal(), n, epsilon = 1e-12);
                assert_orthonormal(&frame);
            }
        }
    }

    #[test]
    fn normal_equal_to_up_uses_fallback() {
        let frame = TangentFrame::new(v(0.0, 1.0, 0.0), v(0.0, 1.0, 0.0)).unwrap();
        assert!(frame.used_fallback());
        assert_orthonormal(&frame);
    }

    #[test]
    fn normal_opposite_to_up_uses_fallback() {
        let frame = TangentFrame::new(v(0.0, -1.0, 0.0), v(0.0, 1.0, 0.0)).unwrap();
        assert!(frame.used_fallback());
        assert_orthonormal(&frame);
    }

    #[test]
    fn nearly_parallel_up_uses_fallback() {
        let frame = TangentFrame::new(v(1.0, 0.0, 0.0), v(1.0, 1e-9, 0.0)).unwrap();
        assert!(frame.used_fallback());
        assert_orthonormal(&frame);
    }

    #[test]
    fn zero_up_uses_fallback() {
        let frame = TangentFrame::new(v(0.3, 0.4, 0.5), Vector3::zeros()).unwrap();
        assert!(frame.used_fallback());
        assert_orthonormal(&frame);
    }

    #[test]
    fn unnormalized_normal_is_normalized() {
        let frame = TangentFrame::new(v(0.0, 0.0, 5.0), v(0.0, 1.0, 0.0)).unwrap();
        assert_relative_eq!(*frame.normal(), v(0.0, 0.0, 1.0), epsilon = 1e-12);
    }

    #[test]
    fn zero_normal_fails() {
        assert!(TangentFrame::new(Vector3::zeros(), v(0.0, 1.0, 0.0)).is_err());
    }

    #[test]
    fn to_world_stays_in_tangent_plane() {
        let frame = TangentFrame::new(v(1.0, 1.0, 0.0), v(0.0, 1.0, 0.0)).unwrap();
        let offset = frame.to_world(&Point2::new(0.6, -0.8));
        assert!(offset.dot(frame.normal()).abs() < 1e-12);
        assert_relative_eq!(offset.norm(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn rotation_maps_local_axes_onto_frame() {
        let frame = TangentFrame::new(v(0.2, 0.9, -0.4), v(0.0, 1.0, 0.0)).unwrap();
        let rot = frame.rotation();
        assert_relative_eq!(rot * Vector3::x(), *frame.tangent(), epsilon = 1e-9);
        assert_relative_eq!(rot * Vector3::y(), *frame.bitangent(), epsilon = 1e-9);
        assert_relative_eq!(rot * Vector3::z(), *frame.normal(), epsilon = 1e-9);
    }
}
