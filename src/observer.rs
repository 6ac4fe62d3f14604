//! Step observer trait for monitoring simulation progress and driving output.

use crate::float::Float;
use crate::rope::RopeSimulation;
use crate::store::RopeHandle;

/// Hooks into the simulation loop.
///
/// All methods default to no-ops. A renderer implements
/// [`on_refresh`](StepObserver::on_refresh) to rebuild its tube mesh from the
/// particle positions on the rope's refresh cadence. The trait is object
/// safe, so `&mut dyn StepObserver<f32>` works wherever an observer is taken.
pub trait StepObserver<F: Float> {
    /// Called after a rope's particles have been integrated.
    fn on_integrate(&mut self) {}

    /// Called after each constraint relaxation pass.
    fn on_constraint_iteration(&mut self, _iteration: usize) {}

    /// Called after a rope tick is fully complete.
    fn on_step_complete(&mut self) {}

    /// Called after each collision pass over one rope pair.
    fn on_collision_iteration(&mut self, _iteration: usize, _corrections: usize) {}

    /// Called when a rope's output is due for a refresh.
    fn on_refresh(&mut self, _handle: RopeHandle, _rope: &RopeSimulation<F>) {}
}

/// Observer that ignores everything.
pub struct NoOpStepObserver;

impl<F: Float> StepObserver<F> for NoOpStepObserver {}
