use crate::sampling::{DEFAULT_CLEARANCE, DEFAULT_RING_SEGMENTS, DEFAULT_SURFACE_OFFSET};

use super::input::{KeyCode, Modifier};

/// Fixed settings of a [`ScatterTool`](super::ScatterTool).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterConfig {
    /// Height above the surface at which projection rays start.
    pub clearance: f64,
    /// Distance the ring outline is lifted off the surface.
    pub surface_offset: f64,
    /// Number of points on the ring outline.
    pub ring_segments: usize,
    /// Relative radius change per scroll notch.
    pub scroll_step: f64,
    /// Smallest radius a commit may store.
    pub min_radius: f64,
    /// Smallest sample count a commit may store (at least 1).
    pub min_sample_count: usize,
    /// While held, scroll events are left to the host instead of resizing.
    pub camera_modifier: Modifier,
    /// Key that spawns prefabs at the current hits.
    pub spawn_key: KeyCode,
    /// Radius of the sphere drawn at each projected hit.
    pub marker_size: f64,
    /// Length of the drawn frame axes and hit normals.
    pub axis_length: f64,
}

impl Default for ScatterConfig {
    fn default() -> Self {
        Self {
            clearance: DEFAULT_CLEARANCE,
            surface_offset: DEFAULT_SURFACE_OFFSET,
            ring_segments: DEFAULT_RING_SEGMENTS,
            scroll_step: 0.1,
            min_radius: 1.0,
            min_sample_count: 1,
            camera_modifier: Modifier::Alt,
            spawn_key: KeyCode::Space,
            marker_size: 0.1,
            axis_length: 1.0,
        }
    }
}
