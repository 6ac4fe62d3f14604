//! Silent pre-simulation so a level's ropes start out settled instead of
//! popping into place on the first visible frame.

use crate::anchor::AnchorSet;
use crate::collision::CollisionRegistry;
use crate::float::Float;
use crate::observer::StepObserver;
use crate::store::RopeStore;

/// Summary of a [`pre_simulate`] run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WarmStartReport {
    /// Steps actually run.
    pub steps: usize,
    /// Collision corrections summed over every step.
    pub corrections: usize,
    /// Collision corrections made during the final step.
    pub last_step_corrections: usize,
    /// Whether any registered pair still overlaps afterwards.
    pub colliding: bool,
}

impl WarmStartReport {
    /// True when the run ended with every registered pair apart.
    pub fn is_settled(&self) -> bool {
        !self.colliding
    }
}

/// Run `steps` ticks of every registered rope followed by a full collision
/// pass, then hand each rope to the observer once.
///
/// Ropes are ticked whether or not they have been activated, and no output
/// refresh happens inside the loop. Stale handles in the registry are
/// skipped.
pub fn pre_simulate<F: Float, O: StepObserver<F> + ?Sized>(
    anchors: &AnchorSet<F>,
    store: &mut RopeStore<F>,
    registry: &CollisionRegistry,
    steps: usize,
    dt: F,
    observer: &mut O,
) -> WarmStartReport {
    let mut report = WarmStartReport::default();

    for _ in 0..steps {
        for &handle in registry.handles() {
            if let Some(rope) = store.get_mut(handle) {
                rope.step(dt, anchors, observer);
            }
        }
        report.last_step_corrections = registry.resolve_all(store, observer);
        report.corrections += report.last_step_corrections;
        report.steps += 1;
    }

    for &handle in registry.handles() {
        if let Some(rope) = store.get_mut(handle) {
            rope.mark_refreshed();
            observer.on_refresh(handle, rope);
        }
    }

    report.colliding = registry.any_collisions(store);
    log::info!(
        "warm start: {} steps, {} corrections ({} in last step), colliding={}",
        report.steps,
        report.corrections,
        report.last_step_corrections,
        report.colliding
    );
    report
}

/// Activate every registered rope. Returns how many were activated.
pub fn activate_registered<F: Float>(store: &mut RopeStore<F>, registry: &CollisionRegistry) -> usize {
    let mut count = 0;
    for &handle in registry.handles() {
        if let Some(rope) = store.get_mut(handle) {
            rope.activate();
            count += 1;
        }
    }
    count
}
