use crate::math::{Point2, Ray, UnitVector3};
use crate::scene::{SceneQuery, SurfaceHit};

use super::{SampleDisc, TangentFrame};

/// Default height above the surface at which projection rays start.
pub const DEFAULT_CLEARANCE: f64 = 2.0;

/// Projects 2D disc samples onto scene geometry.
///
/// Each sample becomes a ray that starts `clearance` above the primary hit's
/// tangent plane and points back down along the frame normal. The nearest
/// hit of that ray is where the sample lands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceProjector {
    clearance: f64,
}

impl Default for SurfaceProjector {
    fn default() -> Self {
        Self {
            clearance: DEFAULT_CLEARANCE,
        }
    }
}

impl SurfaceProjector {
    /// Creates a projector with the given clearance.
    #[must_use]
    pub fn new(clearance: f64) -> Self {
        Self { clearance }
    }

    /// Returns the clearance.
    #[must_use]
    pub fn clearance(&self) -> f64 {
        self.clearance
    }

    /// Builds the projection ray for one disc sample.
    #[must_use]
    pub fn ray(
        &self,
        disc_point: &Point2,
        frame: &TangentFrame,
        primary: &SurfaceHit,
        radius: f64,
    ) -> Ray {
        let offset = frame.to_world(disc_point) * radius;
        let origin = primary.point + offset + frame.normal() * self.clearance;
        Ray::from_unit(origin, UnitVector3::new_unchecked(-frame.normal()))
    }

    /// Projects one disc sample, returning `None` if its ray misses.
    pub fn project<S: SceneQuery + ?Sized>(
        &self,
        scene: &S,
        disc_point: &Point2,
        frame: &TangentFrame,
        primary: &SurfaceHit,
        radius: f64,
    ) -> Option<SurfaceHit> {
        scene.cast(&self.ray(disc_point, frame, primary, radius))
    }

    /// Projects every point of `disc`, one slot per sample in order.
    pub fn project_all<S: SceneQuery + ?Sized>(
        &self,
        scene: &S,
        disc: &SampleDisc,
        frame: &TangentFrame,
        primary: &SurfaceHit,
        radius: f64,
    ) -> Vec<Option<SurfaceHit>> {
        disc.points()
            .iter()
            .map(|p| self.project(scene, p, frame, primary, radius))
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::Cell;

    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::math::{Point3, Vector3};
    use crate::scene::{Plane, Rect, Sphere};

    fn floor_hit() -> SurfaceHit {
        SurfaceHit {
            point: Point3::origin(),
            normal: Vector3::y(),
            distance: 10.0,
        }
    }

    fn floor_frame() -> TangentFrame {
        TangentFrame::new(Vector3::y(), Vector3::z()).unwrap()
    }

    #[test]
    fn ray_starts_above_offset_point() {
        let projector = SurfaceProjector::default();
        let frame = floor_frame();
        let ray = projector.ray(&Point2::new(0.5, 0.0), &frame, &floor_hit(), 4.0);

        let expected = Point3::origin() + frame.tangent() * 2.0 + Vector3::y() * 2.0;
        assert_relative_eq!(*ray.origin(), expected, epsilon = 1e-12);
        assert_relative_eq!(*ray.direction(), -Vector3::y(), epsilon = 1e-12);
    }

    #[test]
    fn projects_onto_plane() {
        let plane = Plane::from_normal(Point3::origin(), Vector3::y()).unwrap();
        let projector = SurfaceProjector::default();
        let hit = projector
            .project(&plane, &Point2::new(0.0, -1.0), &floor_frame(), &floor_hit(), 3.0)
            .unwrap();

        assert!(hit.point.y.abs() < 1e-12);
        assert_relative_eq!(hit.point.coords.norm(), 3.0, epsilon = 1e-12);
        assert!((hit.distance - DEFAULT_CLEARANCE).abs() < 1e-12);
    }

    #[test]
    fn conforms_to_curved_surface() {
        let sphere = Sphere::new(Point3::origin(), 10.0).unwrap();
        let top = SurfaceHit {
            point: Point3::new(0.0, 10.0, 0.0),
            normal: Vector3::y(),
            distance: 1.0,
        };
        let projector = SurfaceProjector::default();
        let hit = projector
            .project(&sphere, &Point2::new(1.0, 0.0), &floor_frame(), &top, 3.0)
            .unwrap();

        // lands on the sphere, below the tangent plane
        assert_relative_eq!(hit.point.coords.norm(), 10.0, epsilon = 1e-9);
        assert!(hit.point.y < 10.0);
        assert_relative_eq!(hit.normal, hit.point.coords / 10.0, epsilon = 1e-9);
    }

    #[test]
    fn miss_past_edge_is_none() {
        let rect = Rect::horizontal(Point3::origin(), 1.0).unwrap();
        let projector = SurfaceProjector::default();
        let frame = floor_frame();

        assert!(projector
            .project(&rect, &Point2::new(1.0, 0.0), &frame, &floor_hit(), 5.0)
            .is_none());
        assert!(projector
            .project(&rect, &Point2::new(0.1, 0.0), &frame, &floor_hit(), 5.0)
            .is_some());
    }

    #[test]
    fn repeated_projection_is_deterministic() {
        let calls = Cell::new(0);
        let scene = |ray: &Ray| {
            calls.set(calls.get() + 1);
            crate::math::intersect_3d::ray_plane(ray, &Point3::origin(), &Vector3::y())
                .map(|t| SurfaceHit::along(ray, t, Vector3::y()))
        };
        let projector = SurfaceProjector::new(1.5);
        let frame = TangentFrame::new(Vector3::new(0.1, 1.0, 0.0), Vector3::y()).unwrap();
        let p = Point2::new(0.3, -0.4);

        let first = projector.project(&scene, &p, &frame, &floor_hit(), 2.0);
        let second = projector.project(&scene, &p, &frame, &floor_hit(), 2.0);
        assert!(first.is_some());
        assert_eq!(first, second);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn project_all_keeps_one_slot_per_sample() {
        let rect = Rect::horizontal(Point3::origin(), 1.0).unwrap();
        let projector = SurfaceProjector::default();
        let mut rng = StdRng::seed_from_u64(11);
        let disc = SampleDisc::generate(32, &mut rng);

        let slots = projector.project_all(&rect, &disc, &floor_frame(), &floor_hit(), 3.0);
        assert_eq!(slots.len(), 32);
        for (p, slot) in disc.points().iter().zip(&slots) {
            let world = floor_frame().to_world(p) * 3.0;
            let inside = world.x.abs() <= 1.0 && world.z.abs() <= 1.0;
            assert_eq!(slot.is_some(), inside, "sample {p:?}");
        }
    }
}
