use std::f64::consts::TAU;

use rand::Rng;
use tracing::debug;

use crate::math::Point2;

/// Draws one point uniformly (by area) from the unit disc.
///
/// The radius is `sqrt(u)` so samples do not cluster at the center.
pub fn sample_unit_disc<R: Rng + ?Sized>(rng: &mut R) -> Point2 {
    let u1: f64 = rng.gen();
    let u2: f64 = rng.gen();

    let r = u1.sqrt();
    let theta = TAU * u2;
    Point2::new(r * theta.cos(), r * theta.sin())
}

/// The cached set of 2D sample points inside the unit disc.
///
/// Its length always equals the sample count it was last generated with.
/// Points are only replaced wholesale, by [`SampleDisc::regenerate`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleDisc {
    points: Vec<Point2>,
}

impl SampleDisc {
    /// Draws `count` fresh points.
    pub fn generate<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Self {
        let points = (0..count).map(|_| sample_unit_disc(rng)).collect();
        Self { points }
    }

    /// Replaces every point with `count` freshly drawn ones.
    pub fn regenerate<R: Rng + ?Sized>(&mut self, count: usize, rng: &mut R) {
        debug!(count, "regenerating sample disc");
        *self = Self::generate(count, rng);
    }

    /// Returns the sample points.
    #[must_use]
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    /// Returns the number of sample points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the disc holds no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
