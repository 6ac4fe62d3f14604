//! Verlet particles making up a rope.

use crate::float::Float;
use crate::vec::Vec3;

/// A Verlet point mass with implicit velocity (`pos - prev_pos`).
///
/// Locked particles are the rope endpoints: integration and constraint
/// relaxation leave them alone and the rope pins them to its anchors.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle<F: Float> {
    pub pos: Vec3<F>,
    pub prev_pos: Vec3<F>,
    pub locked: bool,
}

impl<F: Float> Particle<F> {
    pub fn new(pos: Vec3<F>) -> Self {
        Particle { pos, prev_pos: pos, locked: false }
    }

    pub fn locked(pos: Vec3<F>) -> Self {
        Particle { pos, prev_pos: pos, locked: true }
    }

    /// Damped Verlet step. `gravity` is an acceleration; it is added after
    /// damping so damping only bleeds carried momentum.
    pub fn integrate(&mut self, dt: F, damping: F, gravity: Option<Vec3<F>>) {
        if self.locked {
            return;
        }
        let velocity = (self.pos - self.prev_pos).scale(damping);
        self.prev_pos = self.pos;
        self.pos = self.pos + velocity;
        if let Some(g) = gravity {
            self.pos = self.pos + g.scale(dt * dt);
        }
    }

    /// Force-set position and previous position, zeroing implicit velocity.
    pub fn pin_to(&mut self, pos: Vec3<F>) {
        self.pos = pos;
        self.prev_pos = pos;
    }

    /// Displacement per tick.
    pub fn velocity_raw(&self) -> Vec3<F> {
        self.pos - self.prev_pos
    }

    /// Drop carried momentum.
    pub fn settle(&mut self) {
        self.prev_pos = self.pos;
    }
}
