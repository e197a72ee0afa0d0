use super::ScatterConfig;

/// Opaque host handle to a spawnable prefab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PrefabHandle(u64);

impl PrefabHandle {
    /// Wraps a host-side prefab identifier.
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the host-side identifier.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// User-editable tool parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolParameters {
    /// Disc radius in world units.
    pub radius: f64,
    /// Number of disc samples.
    pub sample_count: usize,
    /// Prefab spawned on trigger; spawning is skipped while `None`.
    pub prefab: Option<PrefabHandle>,
}

impl Default for ToolParameters {
    fn default() -> Self {
        Self {
            radius: 2.0,
            sample_count: 8,
            prefab: None,
        }
    }
}

impl ToolParameters {
    /// Returns a copy with radius and sample count forced into their valid
    /// ranges. Non-finite radii fall back to the minimum.
    #[must_use]
    pub fn clamped(self, config: &ScatterConfig) -> Self {
        let min_radius = config.min_radius.max(f64::MIN_POSITIVE);
        let radius = if self.radius.is_finite() {
            self.radius.max(min_radius)
        } else {
            min_radius
        };
        Self {
            radius,
            sample_count: self.sample_count.max(config.min_sample_count).max(1),
            prefab: self.prefab,
        }
    }
}
