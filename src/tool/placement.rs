use std::f64::consts::{FRAC_PI_2, TAU};

use rand::Rng;
use slotmap::{new_key_type, SlotMap};
use tracing::{debug, warn};

use crate::error::Result;
use crate::math::{Point3, UnitQuaternion, Vector3};
use crate::sampling::TangentFrame;
use crate::scene::SurfaceHit;

use super::PrefabHandle;

/// Where and how one prefab instance is placed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// World-space position of the instance origin.
    pub position: Point3,
    /// World-space orientation of the instance.
    pub rotation: UnitQuaternion,
}

impl Placement {
    /// Places an instance on `hit`, spun by `spin` radians about the normal.
    ///
    /// The rotation first tilts the prefab 90 degrees about its local X so its
    /// +Y axis takes the place of +Z, spins it about that axis, then aligns
    /// +Z with the surface normal. The prefab's up axis therefore ends on the
    /// normal.
    ///
    /// # Errors
    ///
    /// Returns an error if the hit normal is zero-length or not finite.
    pub fn on_surface(hit: &SurfaceHit, spin: f64) -> Result<Self> {
        let look = TangentFrame::new(hit.normal, Vector3::y())?.rotation();
        let spin = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), spin);
        let tilt = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), FRAC_PI_2);

        Ok(Self {
            position: hit.point,
            rotation: look * spin * tilt,
        })
    }

    /// Returns the instance's local +Y axis in world space.
    #[must_use]
    pub fn up(&self) -> Vector3 {
        self.rotation * Vector3::y()
    }
}

/// Host-side prefab instantiation.
pub trait PlacementHost {
    /// Instantiates `prefab` at `placement`.
    fn instantiate(&mut self, prefab: PrefabHandle, placement: Placement);
}

/// Instantiates `prefab` once per hit, each with a random spin about the
/// surface normal drawn uniformly from `[0, 2*pi)`.
///
/// Returns the number of instances requested from `host`. Without a prefab
/// nothing is spawned.
pub fn spawn<H, R>(
    hits: &[SurfaceHit],
    prefab: Option<PrefabHandle>,
    host: &mut H,
    rng: &mut R,
) -> usize
where
    H: PlacementHost + ?Sized,
    R: Rng + ?Sized,
{
    let Some(prefab) = prefab else {
        debug!(hits = hits.len(), "spawn skipped: no prefab configured");
        return 0;
    };

    let mut spawned = 0;
    for hit in hits {
        let spin = rng.gen_range(0.0..TAU);
        match Placement::on_surface(hit, spin) {
            Ok(placement) => {
                host.instantiate(prefab, placement);
                spawned += 1;
            }
            Err(e) => warn!(?hit, error = %e, "skipping placement"),
        }
    }
    spawned
}

new_key_type! {
    /// Key of a spawned instance in a [`PlacementStore`].
    pub struct InstanceId;
}

/// A prefab instance recorded by [`PlacementStore`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnedInstance {
    pub prefab: PrefabHandle,
    pub placement: Placement,
}

/// An in-memory [`PlacementHost`] that keeps every spawned instance.
#[derive(Debug, Default)]
pub struct PlacementStore {
    instances: SlotMap<InstanceId, SpawnedInstance>,
}

impl PlacementStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the instance with the given ID.
    #[must_use]
    pub fn get(&self, id: InstanceId) -> Option<&SpawnedInstance> {
        self.instances.get(id)
    }

    /// Removes and returns the instance with the given ID.
    pub fn remove(&mut self, id: InstanceId) -> Option<SpawnedInstance> {
        self.instances.remove(id)
    }

    /// Returns the number of instances.
    #[must_use]
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Returns `true` if nothing has been spawned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Iterates over all instances.
    pub fn iter(&self) -> impl Iterator<Item = (InstanceId, &SpawnedInstance)> {
        self.instances.iter()
    }
}

impl PlacementHost for PlacementStore {
    fn instantiate(&mut self, prefab: PrefabHandle, placement: Placement) {
        self.instances.insert(SpawnedInstance { prefab, placement });
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn hit(point: Point3, normal: Vector3) -> SurfaceHit {
        SurfaceHit {
            point,
            normal: normal.normalize(),
            distance: 1.0,
        }
    }

    #[test]
    fn prefab_up_follows_normal() {
        let normals = [
            Vector3::y(),
            -Vector3::y(),
            Vector3::x(),
            Vector3::new(0.3, 0.8, -0.5).normalize(),
        ];
        for normal in normals {
            for spin in [0.0, 1.0, 4.0] {
                let placement = Placement::on_surface(&hit(Point3::origin(), normal), spin).unwrap();
                assert_relative_eq!(placement.up(), normal, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn spin_rotates_about_normal() {
        let h = hit(Point3::new(1.0, 2.0, 3.0), Vector3::y());
        let a = Placement::on_surface(&h, 0.0).unwrap();
        let b = Placement::on_surface(&h, FRAC_PI_2).unwrap();

        let forward_a = a.rotation * Vector3::z();
        let forward_b = b.rotation * Vector3::z();
        assert!(forward_a.dot(&Vector3::y()).abs() < 1e-9);
        assert!(forward_a.dot(&forward_b).abs() < 1e-9);
        assert_relative_eq!(a.position, h.point);
    }

    #[test]
    fn spawn_without_prefab_is_a_no_op() {
        let mut store = PlacementStore::new();
        let mut rng = StdRng::seed_from_u64(1);
        let hits = [hit(Point3::origin(), Vector3::y()); 4];

        assert_eq!(spawn(&hits, None, &mut store, &mut rng), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn spawn_instantiates_one_per_hit() {
        let mut store = PlacementStore::new();
        let mut rng = StdRng::seed_from_u64(2);
        let hits = [
            hit(Point3::new(0.0, 0.0, 0.0), Vector3::y()),
            hit(Point3::new(1.0, 0.0, 0.0), Vector3::y()),
            hit(Point3::new(0.0, 0.0, 1.0), Vector3::new(1.0, 1.0, 0.0)),
        ];
        let prefab = PrefabHandle::new(42);

        assert_eq!(spawn(&hits, Some(prefab), &mut store, &mut rng), 3);
        assert_eq!(store.len(), 3);
        for (_, instance) in store.iter() {
            assert_eq!(instance.prefab, prefab);
            let source = hits
                .iter()
                .find(|h| (h.point - instance.placement.position).norm() < 1e-12)
                .unwrap();
            assert_relative_eq!(instance.placement.up(), source.normal, epsilon = 1e-9);
        }
    }

    #[test]
    fn spawn_skips_degenerate_normals() {
        let mut store = PlacementStore::new();
        let mut rng = StdRng::seed_from_u64(3);
        let hits = [
            SurfaceHit {
                point: Point3::origin(),
                normal: Vector3::zeros(),
                distance: 1.0,
            },
            hit(Point3::origin(), Vector3::y()),
        ];

        assert_eq!(spawn(&hits, Some(PrefabHandle::new(1)), &mut store, &mut rng), 1);
    }

    #[test]
    fn store_removes_instances() {
        let mut store = PlacementStore::new();
        let placement = Placement::on_surface(&hit(Point3::origin(), Vector3::y()), 0.0).unwrap();
        store.instantiate(PrefabHandle::new(5), placement);
        let id = store.iter().map(|(id, _)| id).next().unwrap();

        assert_eq!(store.get(id).map(|i| i.prefab.id()), Some(5));
        assert!(store.remove(id).is_some());
        assert!(store.get(id).is_none());
    }
}
