//! The rope world: anchors, every live rope and the collision registry in
//! one owned value.
//!
//! ```
//! use knotty::{NoOpStepObserver, RopeConfig, RopeWorld, Vec3};
//!
//! let mut world = RopeWorld::<f32>::new();
//! let a = world.add_anchor(Vec3::new(-1.0, 0.0, 0.0));
//! let b = world.add_anchor(Vec3::new(1.0, 0.0, 0.0));
//! let rope = world.create_simulation(a, b, RopeConfig::new().with_segments(10)).unwrap();
//!
//! let mut obs = NoOpStepObserver;
//! let report = world.warm_start(150, 0.02, &mut obs);
//! assert_eq!(report.steps, 150);
//! assert!(world.rope(rope).unwrap().is_active());
//!
//! world.step(1.0 / 60.0, &mut obs);
//! assert_eq!(world.positions(rope).unwrap().len(), 11);
//! ```

use crate::anchor::{AnchorId, AnchorSet};
use crate::collision::CollisionRegistry;
use crate::config::RopeConfig;
use crate::error::RopeError;
use crate::float::Float;
use crate::observer::StepObserver;
use crate::particle::Particle;
use crate::rope::RopeSimulation;
use crate::store::{RopeHandle, RopeStore};
use crate::vec::Vec3;
use crate::warm_start::{self, WarmStartReport};
use alloc::vec::Vec as AllocVec;

#[derive(Clone, Debug)]
pub struct RopeWorld<F: Float> {
    anchors: AnchorSet<F>,
    ropes: RopeStore<F>,
    registry: CollisionRegistry,
    collisions_enabled: bool,
}

impl<F: Float> RopeWorld<F> {
    pub fn new() -> Self {
        RopeWorld {
            anchors: AnchorSet::new(),
            ropes: RopeStore::new(),
            registry: CollisionRegistry::new(),
            collisions_enabled: true,
        }
    }

    pub fn add_anchor(&mut self, pos: Vec3<F>) -> AnchorId {
        self.anchors.insert(pos)
    }

    /// Move an anchor. Attached rope endpoints follow on their next tick.
    pub fn move_anchor(&mut self, id: AnchorId, pos: Vec3<F>) -> Result<(), RopeError> {
        self.anchors.set(id, pos)
    }

    pub fn anchor(&self, id: AnchorId) -> Option<Vec3<F>> {
        self.anchors.get(id)
    }

    pub fn anchors(&self) -> &AnchorSet<F> {
        &self.anchors
    }

    /// Build a rope between two anchors and register it for collision.
    pub fn create_simulation(
        &mut self,
        start: AnchorId,
        end: AnchorId,
        config: RopeConfig<F>,
    ) -> Result<RopeHandle, RopeError> {
        let rope = RopeSimulation::new(start, end, &self.anchors, config)?;
        let handle = self.ropes.insert(rope);
        self.registry.register(handle);
        Ok(handle)
    }

    /// Unregister and remove a rope, handing it back to the caller.
    pub fn destroy_simulation(&mut self, handle: RopeHandle) -> Result<RopeSimulation<F>, RopeError> {
        let rope = self.ropes.remove(handle)?;
        self.registry.unregister(handle);
        Ok(rope)
    }

    /// Integrate, pin and relax one rope, whether active or not.
    pub fn tick<O: StepObserver<F> + ?Sized>(
        &mut self,
        handle: RopeHandle,
        dt: F,
        observer: &mut O,
    ) -> Result<(), RopeError> {
        let rope = self.ropes.require_mut(handle)?;
        rope.step(dt, &self.anchors, observer);
        Ok(())
    }

    /// The live fixed tick: step every active rope, resolve collisions,
    /// then refresh ropes whose output cadence has elapsed. Returns the
    /// number of collision corrections.
    pub fn step<O: StepObserver<F> + ?Sized>(&mut self, dt: F, observer: &mut O) -> usize {
        let mut ticked = 0;
        for &handle in self.registry.handles() {
            if let Some(rope) = self.ropes.get_mut(handle) {
                if rope.is_active() {
                    rope.step(dt, &self.anchors, observer);
                    ticked += 1;
                }
            }
        }

        let corrections = if self.collisions_enabled {
            self.registry.resolve_all(&mut self.ropes, observer)
        } else {
            0
        };

        for &handle in self.registry.handles() {
            if let Some(rope) = self.ropes.get_mut(handle) {
                if rope.is_active() && rope.refresh_due() {
                    observer.on_refresh(handle, rope);
                }
            }
        }

        log::trace!("step: {} ropes ticked, {} collision corrections", ticked, corrections);
        corrections
    }

    /// One collision response over every registered pair.
    pub fn resolve_all_collisions<O: StepObserver<F> + ?Sized>(&mut self, observer: &mut O) -> usize {
        self.registry.resolve_all(&mut self.ropes, observer)
    }

    pub fn any_collisions(&self) -> bool {
        self.registry.any_collisions(&self.ropes)
    }

    pub fn colliding_pairs(&self) -> AllocVec<(RopeHandle, RopeHandle)> {
        self.registry.colliding_pairs(&self.ropes)
    }

    /// Silently run `steps` ticks plus collision passes over every
    /// registered rope. Ropes stay inactive; see [`activate`](Self::activate).
    pub fn pre_simulate<O: StepObserver<F> + ?Sized>(&mut self, steps: usize, dt: F, observer: &mut O) -> WarmStartReport {
        warm_start::pre_simulate(&self.anchors, &mut self.ropes, &self.registry, steps, dt, observer)
    }

    pub fn activate(&mut self, handle: RopeHandle) -> Result<(), RopeError> {
        self.ropes.require_mut(handle)?.activate();
        Ok(())
    }

    pub fn activate_all(&mut self) -> usize {
        warm_start::activate_registered(&mut self.ropes, &self.registry)
    }

    /// [`pre_simulate`](Self::pre_simulate) followed by [`activate_all`](Self::activate_all).
    pub fn warm_start<O: StepObserver<F> + ?Sized>(&mut self, steps: usize, dt: F, observer: &mut O) -> WarmStartReport {
        let report = self.pre_simulate(steps, dt, observer);
        self.activate_all();
        report
    }

    /// Hand a rope to the observer now and restart its refresh cadence.
    pub fn force_refresh<O: StepObserver<F> + ?Sized>(&mut self, handle: RopeHandle, observer: &mut O) -> Result<(), RopeError> {
        let rope = self.ropes.require_mut(handle)?;
        rope.mark_refreshed();
        observer.on_refresh(handle, rope);
        Ok(())
    }

    /// Turn the live collision pass on or off. Warm start always collides.
    pub fn set_collisions_enabled(&mut self, enabled: bool) {
        self.collisions_enabled = enabled;
    }

    pub fn collisions_enabled(&self) -> bool {
        self.collisions_enabled
    }

    pub fn positions(&self, handle: RopeHandle) -> Result<AllocVec<Vec3<F>>, RopeError> {
        Ok(self.ropes.require(handle)?.positions())
    }

    pub fn particles(&self, handle: RopeHandle) -> Result<&[Particle<F>], RopeError> {
        Ok(self.ropes.require(handle)?.particles())
    }

    pub fn rope(&self, handle: RopeHandle) -> Option<&RopeSimulation<F>> {
        self.ropes.get(handle)
    }

    pub fn rope_mut(&mut self, handle: RopeHandle) -> Option<&mut RopeSimulation<F>> {
        self.ropes.get_mut(handle)
    }

    /// Reattach a rope to different anchors.
    pub fn rebind(&mut self, handle: RopeHandle, start: AnchorId, end: AnchorId) -> Result<(), RopeError> {
        let rope = self.ropes.require_mut(handle)?;
        rope.rebind_anchors(start, end, &self.anchors)
    }

    pub fn registry(&self) -> &CollisionRegistry {
        &self.registry
    }

    /// Live ropes in registration order.
    pub fn handles(&self) -> &[RopeHandle] {
        self.registry.handles()
    }

    pub fn rope_count(&self) -> usize {
        self.ropes.len()
    }
}

impl<F: Float> Default for RopeWorld<F> {
    fn default() -> Self {
        Self::new()
    }
}
