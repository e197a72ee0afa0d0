use std::f64::consts::TAU;

use crate::math::{Point2, Point3};
use crate::scene::{SceneQuery, SurfaceHit};

use super::{SurfaceProjector, TangentFrame};

/// Default number of points on the ring outline.
pub const DEFAULT_RING_SEGMENTS: usize = 128;

/// Default distance the outline is lifted off the surface.
pub const DEFAULT_SURFACE_OFFSET: f64 = 0.02;

/// The disc boundary conformed to the surface, as a cyclic polyline.
///
/// The last point connects back to the first; no closing duplicate is
/// stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RingOutline {
    points: Vec<Point3>,
}

impl RingOutline {
    /// Returns the outline points.
    #[must_use]
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    /// Returns the number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the outline has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterates over consecutive point pairs, including the wrap-around
    /// segment from the last point to the first.
    pub fn edges(&self) -> impl Iterator<Item = (&Point3, &Point3)> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| (&self.points[i], &self.points[(i + 1) % n]))
    }
}

/// Builds [`RingOutline`]s.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingBuilder {
    segments: usize,
    surface_offset: f64,
}

impl Default for RingBuilder {
    fn default() -> Self {
        Self {
            segments: DEFAULT_RING_SEGMENTS,
            surface_offset: DEFAULT_SURFACE_OFFSET,
        }
    }
}

impl RingBuilder {
    /// Creates a builder producing `segments` points lifted by
    /// `surface_offset` along the hit normal.
    #[must_use]
    pub fn new(segments: usize, surface_offset: f64) -> Self {
        Self {
            segments,
            surface_offset,
        }
    }

    /// Returns the number of points per outline.
    #[must_use]
    pub fn segments(&self) -> usize {
        self.segments
    }

    /// Projects `segments` points of the disc boundary onto the scene.
    ///
    /// A boundary sample whose ray misses falls back to the ray origin, so
    /// the outline degrades to the flat disc rim instead of leaving a gap.
    pub fn build<S: SceneQuery + ?Sized>(
        &self,
        scene: &S,
        projector: &SurfaceProjector,
        frame: &TangentFrame,
        primary: &SurfaceHit,
        radius: f64,
    ) -> RingOutline {
        #[allow(clippy::cast_precision_loss)]
        let step = TAU / self.segments as f64;

        let points = (0..self.segments)
            .map(|i| {
                #[allow(clippy::cast_precision_loss)]
                let angle = step * i as f64;
                let rim = Point2::new(angle.cos(), angle.sin());
                let ray = projector.ray(&rim, frame, primary, radius);
                match scene.cast(&ray) {
                    Some(hit) => hit.point + hit.normal * self.surface_offset,
                    None => *ray.origin(),
                }
            })
            .collect();

        RingOutline { points }
    }
}
