//! Scene queries: the ray-cast interface the sampling engine consumes, and a
//! handful of reference shapes implementing it.

mod plane;
mod rect;
mod sphere;
mod terrain;

pub use plane::Plane;
pub use rect::Rect;
pub use sphere::Sphere;
pub use terrain::Terrain;

use std::fmt;

use crate::math::{Point3, Ray, Vector3};

/// The nearest intersection of a ray with scene geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    /// World-space intersection point.
    pub point: Point3,
    /// Unit surface normal, facing back toward the ray origin.
    pub normal: Vector3,
    /// Ray parameter of the hit (distance from the ray origin).
    pub distance: f64,
}

impl SurfaceHit {
    /// Builds a hit at parameter `t` along `ray` with the given normal.
    #[must_use]
    pub fn along(ray: &Ray, t: f64, normal: Vector3) -> Self {
        Self {
            point: ray.at(t),
            normal,
            distance: t,
        }
    }
}

/// Casts rays into a scene.
///
/// Implementations must return the nearest hit in front of the ray origin
/// with a unit-length normal, or `None` on a miss.
pub trait SceneQuery {
    /// Returns the nearest intersection of `ray` with the scene.
    fn cast(&self, ray: &Ray) -> Option<SurfaceHit>;
}

impl<F> SceneQuery for F
where
    F: Fn(&Ray) -> Option<SurfaceHit>,
{
    fn cast(&self, ray: &Ray) -> Option<SurfaceHit> {
        self(ray)
    }
}

/// A collection of shapes queried as one scene.
#[derive(Default)]
pub struct Scene {
    shapes: Vec<Box<dyn SceneQuery>>,
}

impl Scene {
    /// Creates an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a shape to the scene.
    pub fn add(&mut self, shape: impl SceneQuery + 'static) {
        self.shapes.push(Box::new(shape));
    }

    /// Adds a shape and returns the scene, for chained construction.
    #[must_use]
    pub fn with(mut self, shape: impl SceneQuery + 'static) -> Self {
        self.add(shape);
        self
    }

    /// Returns the number of shapes in the scene.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Returns `true` if the scene holds no shapes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

impl fmt::Debug for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scene")
            .field("shapes", &self.shapes.len())
            .finish()
    }
}

impl SceneQuery for Scene {
    fn cast(&self, ray: &Ray) -> Option<SurfaceHit> {
        self.shapes
            .iter()
            .filter_map(|shape| shape.cast(ray))
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}
