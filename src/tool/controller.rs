use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, trace};

use crate::math::{Point3, Ray, Vector3};
use crate::sampling::{RingBuilder, RingOutline, SampleDisc, SurfaceProjector, TangentFrame};
use crate::scene::{SceneQuery, SurfaceHit};

use super::draw::{Color, DrawSurface};
use super::input::{EventResponse, InputEvent};
use super::placement::{self, PlacementHost};
use super::{PrefabHandle, ScatterConfig, ToolParameters};

/// Everything the host provides for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameInput {
    /// The pointing ray (cursor or camera forward).
    pub ray: Ray,
    /// Reference up used to orient the tangent frame, usually the camera up.
    pub reference_up: Vector3,
    /// Input events received since the previous frame, in order.
    pub events: Vec<InputEvent>,
}

impl FrameInput {
    /// Creates a frame input without events.
    #[must_use]
    pub fn new(ray: Ray, reference_up: Vector3) -> Self {
        Self {
            ray,
            reference_up,
            events: Vec::new(),
        }
    }

    /// Adds an event, for chained construction.
    #[must_use]
    pub fn with_event(mut self, event: InputEvent) -> Self {
        self.events.push(event);
        self
    }
}

/// The sampling result for one frame with a primary hit.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSample {
    /// Intersection of the pointing ray.
    pub primary: SurfaceHit,
    /// Tangent frame at the primary hit.
    pub frame: TangentFrame,
    /// One slot per disc sample; `None` where the projection ray missed.
    pub slots: Vec<Option<SurfaceHit>>,
    /// Disc boundary conformed to the surface.
    pub ring: RingOutline,
}

impl FrameSample {
    /// Returns the successful projections, in sample order.
    #[must_use]
    pub fn hits(&self) -> Vec<SurfaceHit> {
        self.slots.iter().flatten().copied().collect()
    }
}

/// What one [`ScatterTool::tick`] did.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    /// The frame's sampling result, or `None` if the pointing ray missed.
    pub sample: Option<FrameSample>,
    /// The response to each input event, in order.
    pub responses: Vec<EventResponse>,
    /// Number of prefab instances requested from the host.
    pub spawned: usize,
    /// Whether the viewport should be redrawn.
    pub repaint: bool,
}

/// The interactive scatter tool.
///
/// Owns the parameters, the cached [`SampleDisc`] and the random source. All
/// state changes go through [`commit_parameters`](Self::commit_parameters),
/// [`set_prefab`](Self::set_prefab) or the events passed to
/// [`tick`](Self::tick); sampling itself only reads.
#[derive(Debug)]
pub struct ScatterTool<R = StdRng> {
    config: ScatterConfig,
    params: ToolParameters,
    disc: SampleDisc,
    projector: SurfaceProjector,
    ring: RingBuilder,
    rng: R,
    repaint: bool,
}

impl ScatterTool<StdRng> {
    /// Creates a tool with default parameters and an entropy-seeded source.
    #[must_use]
    pub fn new(config: ScatterConfig) -> Self {
        Self::with_rng(config, ToolParameters::default(), StdRng::from_entropy())
    }
}

impl<R: Rng> ScatterTool<R> {
    /// Creates a tool drawing its randomness from `rng`.
    ///
    /// `params` are clamped and the disc is generated immediately.
    pub fn with_rng(config: ScatterConfig, params: ToolParameters, mut rng: R) -> Self {
        let params = params.clamped(&config);
        let disc = SampleDisc::generate(params.sample_count, &mut rng);
        Self {
            projector: SurfaceProjector::new(config.clearance),
            ring: RingBuilder::new(config.ring_segments, config.surface_offset),
            config,
            params,
            disc,
            rng,
            repaint: false,
        }
    }

    /// Returns the fixed configuration.
    #[must_use]
    pub fn config(&self) -> &ScatterConfig {
        &self.config
    }

    /// Returns the current parameters.
    #[must_use]
    pub fn parameters(&self) -> &ToolParameters {
        &self.params
    }

    /// Returns the cached disc samples.
    #[must_use]
    pub fn disc(&self) -> &SampleDisc {
        &self.disc
    }

    /// Commits edited parameters.
    ///
    /// Values are clamped into range. The disc is regenerated only if the
    /// sample count changed. Always requests a repaint.
    pub fn commit_parameters(&mut self, params: ToolParameters) -> EventResponse {
        let clamped = params.clamped(&self.config);
        if clamped != params {
            debug!(?params, ?clamped, "clamped tool parameters");
        }

        if clamped.sample_count != self.params.sample_count {
            self.disc.regenerate(clamped.sample_count, &mut self.rng);
        }
        self.params = clamped;
        self.repaint = true;
        EventResponse::Repaint
    }

    /// Sets the prefab spawned on trigger.
    pub fn set_prefab(&mut self, prefab: Option<PrefabHandle>) -> EventResponse {
        self.commit_parameters(ToolParameters {
            prefab,
            ..self.params
        })
    }

    /// Runs the sampling pipeline for `ray` without touching tool state.
    ///
    /// Returns `None` if the ray misses or the hit normal is unusable.
    pub fn sample<S: SceneQuery + ?Sized>(
        &self,
        scene: &S,
        ray: &Ray,
        reference_up: &Vector3,
    ) -> Option<FrameSample> {
        let Some(primary) = scene.cast(ray) else {
            trace!("primary ray missed");
            return None;
        };

        let frame = match TangentFrame::new(primary.normal, *reference_up) {
            Ok(frame) => frame,
            Err(e) => {
                debug!(?primary, error = %e, "unusable primary hit");
                return None;
            }
        };

        let radius = self.params.radius;
        let slots = self
            .projector
            .project_all(scene, &self.disc, &frame, &primary, radius);
        let ring = self
            .ring
            .build(scene, &self.projector, &frame, &primary, radius);

        Some(FrameSample {
            primary,
            frame,
            slots,
            ring,
        })
    }

    /// Advances the tool by one frame.
    ///
    /// Applies `input.events`, samples the scene under `input.ray`, draws the
    /// result and, if the spawn key was pressed and the ray hit something,
    /// spawns at every successful projection.
    pub fn tick<S, D, H>(
        &mut self,
        input: &FrameInput,
        scene: &S,
        draw: &mut D,
        host: &mut H,
    ) -> FrameReport
    where
        S: SceneQuery + ?Sized,
        D: DrawSurface + ?Sized,
        H: PlacementHost + ?Sized,
    {
        let mut spawn_requested = false;
        let responses = input
            .events
            .iter()
            .map(|event| {
                let (response, spawn) = self.handle_event(event);
                spawn_requested |= spawn;
                response
            })
            .collect();

        let sample = self.sample(scene, &input.ray, &input.reference_up);

        let mut spawned = 0;
        if let Some(sample) = &sample {
            self.draw(sample, draw);
            if spawn_requested {
                let hits = sample.hits();
                spawned = placement::spawn(&hits, self.params.prefab, host, &mut self.rng);
                info!(candidates = hits.len(), spawned, "spawned prefabs");
            }
        } else if spawn_requested {
            debug!("spawn ignored: no surface under the pointer");
        }

        FrameReport {
            sample,
            responses,
            spawned,
            repaint: std::mem::take(&mut self.repaint),
        }
    }

    /// Applies one event. Returns the response and whether it asks to spawn.
    fn handle_event(&mut self, event: &InputEvent) -> (EventResponse, bool) {
        match *event {
            InputEvent::MouseMove { .. } => {
                self.repaint = true;
                (EventResponse::Repaint, false)
            }
            InputEvent::Scroll { delta, modifiers } => {
                if modifiers.has(self.config.camera_modifier) {
                    return (EventResponse::Ignored, false);
                }
                let direction = if delta > 0.0 {
                    1.0
                } else if delta < 0.0 {
                    -1.0
                } else {
                    return (EventResponse::Ignored, false);
                };
                let radius = self.params.radius * (1.0 + direction * self.config.scroll_step);
                self.commit_parameters(ToolParameters {
                    radius,
                    ..self.params
                });
                (EventResponse::Consumed, false)
            }
            InputEvent::KeyDown { key, .. } if key == self.config.spawn_key => {
                (EventResponse::Consumed, true)
            }
            InputEvent::KeyDown { .. } | InputEvent::MouseDown { .. } => {
                (EventResponse::Ignored, false)
            }
        }
    }

    /// Draws the frame axes, a marker and normal per hit, and the ring.
    fn draw<D: DrawSurface + ?Sized>(&self, sample: &FrameSample, draw: &mut D) {
        let origin = sample.primary.point;
        let len = self.config.axis_length;
        let axis_end = |axis: &Vector3| -> Point3 { origin + axis * len };

        draw.line(&origin, &axis_end(sample.frame.normal()), Color::BLUE);
        draw.line(&origin, &axis_end(sample.frame.bitangent()), Color::GREEN);
        draw.line(&origin, &axis_end(sample.frame.tangent()), Color::RED);

        for hit in sample.slots.iter().flatten() {
            draw.sphere(&hit.point, self.config.marker_size, Color::WHITE);
            draw.line(&hit.point, &(hit.point + hit.normal * len), Color::BLUE);
        }

        draw.closed_polyline(sample.ring.points(), Color::WHITE);
    }
}
