use spade::{DelaunayTriangulation, HasPosition, InsertionError, Point2 as SpadePoint2, Triangulation};
use tracing::debug;

use crate::error::{Result, SceneError};
use crate::math::intersect_3d::{face_forward, ray_triangle};
use crate::math::{Point3, Ray, Vector3, TOLERANCE};

use super::{SceneQuery, SurfaceHit};

/// A height sample; triangulated by its `(x, z)` position.
#[derive(Debug, Clone, Copy)]
struct HeightSample {
    point: Point3,
}

impl HasPosition for HeightSample {
    type Scalar = f64;

    fn position(&self) -> SpadePoint2<f64> {
        SpadePoint2::new(self.point.x, self.point.z)
    }
}

#[derive(Debug, Clone, Copy)]
struct Facet {
    vertices: [Point3; 3],
    normal: Vector3,
}

/// A heightfield surface built from scattered height samples.
///
/// Samples are triangulated over the XZ plane with a Delaunay
/// triangulation. Facet normals point toward +Y; hits report them facing
/// the incoming ray.
#[derive(Debug, Clone)]
pub struct Terrain {
    facets: Vec<Facet>,
    min: Point3,
    max: Point3,
}

impl Terrain {
    /// Triangulates scattered `(x, height, z)` samples.
    ///
    /// Samples sharing an `(x, z)` position replace each other.
    ///
    /// # Errors
    ///
    /// Returns an error if a sample is not finite or the samples do not span
    /// at least one non-degenerate triangle.
    pub fn from_samples(samples: &[Point3]) -> Result<Self> {
        if samples.len() < 3 {
            return Err(SceneError::InvalidInput(format!(
                "terrain needs at least 3 samples, got {}",
                samples.len()
            ))
            .into());
        }

        let mut dt = DelaunayTriangulation::<HeightSample>::new();
        for &point in samples {
            if !point.iter().all(|c| c.is_finite()) {
                return Err(SceneError::InvalidInput(format!(
                    "non-finite terrain sample {point:?}"
                ))
                .into());
            }
            dt.insert(HeightSample { point })
                .map_err(|e: InsertionError| SceneError::Triangulation(e.to_string()))?;
        }

        let mut facets = Vec::with_capacity(dt.num_inner_faces());
        for face in dt.inner_faces() {
            let [a, b, c] = face.vertices().map(|vh| vh.data().point);
            let cross = (b - a).cross(&(c - a));
            let len = cross.norm();
            if len < TOLERANCE {
                continue;
            }
            let normal = if cross.y < 0.0 { -cross / len } else { cross / len };
            facets.push(Facet {
                vertices: [a, b, c],
                normal,
            });
        }

        if facets.is_empty() {
            return Err(SceneError::Triangulation(
                "samples are collinear; no facets produced".into(),
            )
            .into());
        }

        let (min, max) = bounds(&facets);
        debug!(
            samples = samples.len(),
            facets = facets.len(),
            "triangulated terrain"
        );
        Ok(Self { facets, min, max })
    }

    /// Samples `height(x, z)` on a regular grid over
    /// `[-half_extent, half_extent]^2` with `resolution` cells per side and
    /// triangulates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if `resolution` is zero, `half_extent` is not
    /// positive, or `height` produces non-finite values.
    pub fn from_fn(
        half_extent: f64,
        resolution: usize,
        height: impl Fn(f64, f64) -> f64,
    ) -> Result<Self> {
        if resolution == 0 || half_extent.is_nan() || half_extent < TOLERANCE {
            return Err(SceneError::InvalidInput(format!(
                "invalid terrain grid: half_extent = {half_extent}, resolution = {resolution}"
            ))
            .into());
        }

        #[allow(clippy::cast_precision_loss)]
        let step = 2.0 * half_extent / resolution as f64;
        let mut samples = Vec::with_capacity((resolution + 1) * (resolution + 1));
        for i in 0..=resolution {
            for j in 0..=resolution {
                #[allow(clippy::cast_precision_loss)]
                let (x, z) = (-half_extent + step * i as f64, -half_extent + step * j as f64);
                samples.push(Point3::new(x, height(x, z), z));
            }
        }
        Self::from_samples(&samples)
    }

    /// Returns the number of triangles.
    #[must_use]
    pub fn facet_count(&self) -> usize {
        self.facets.len()
    }

    /// Returns the axis-aligned bounds as `(min, max)`.
    #[must_use]
    pub fn bounds(&self) -> (Point3, Point3) {
        (self.min, self.max)
    }

    /// Slab test against the bounding box.
    fn ray_hits_bounds(&self, ray: &Ray) -> bool {
        let mut t_near = 0.0_f64;
        let mut t_far = f64::INFINITY;
        for axis in 0..3 {
            let o = ray.origin()[axis];
            let d = ray.direction()[axis];
            let (lo, hi) = (self.min[axis] - TOLERANCE, self.max[axis] + TOLERANCE);
            if d.abs() < TOLERANCE {
                if o < lo || o > hi {
                    return false;
                }
                continue;
            }
            let (t0, t1) = ((lo - o) / d, (hi - o) / d);
            t_near = t_near.max(t0.min(t1));
            t_far = t_far.min(t0.max(t1));
            if t_near > t_far {
                return false;
            }
        }
        true
    }
}

impl SceneQuery for Terrain {
    fn cast(&self, ray: &Ray) -> Option<SurfaceHit> {
        if !self.ray_hits_bounds(ray) {
            return None;
        }

        let (t, facet) = self
            .facets
            .iter()
            .filter_map(|f| {
                let [a, b, c] = &f.vertices;
                ray_triangle(ray, a, b, c).map(|t| (t, f))
            })
            .min_by(|a, b| a.0.total_cmp(&b.0))?;

        Some(SurfaceHit::along(
            ray,
            t,
            face_forward(facet.normal, ray.direction()),
        ))
    }
}

fn bounds(facets: &[Facet]) -> (Point3, Point3) {
    let mut min = Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY);
    let mut max = Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY);
    for p in facets.iter().flat_map(|f| f.vertices.iter()) {
        min = min.inf(p);
        max = max.sup(p);
    }
    (min, max)
}
