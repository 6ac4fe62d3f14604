//! Rest-length constraint between consecutive rope particles.

use crate::float::Float;
use crate::particle::Particle;

/// Rest lengths at or below this are treated as degenerate and not corrected.
pub const MIN_REST_LENGTH: f32 = 1e-3;

/// Keeps particles `a` and `b` at `rest_length` apart.
///
/// Unlike a mass-weighted distance constraint, the correction is split by
/// the `locked` flags alone: 50/50 between two free particles, all of it to
/// the free one when the other is locked, nothing when both are locked.
#[derive(Clone, Debug, PartialEq)]
pub struct LinkConstraint<F: Float> {
    pub a: usize,
    pub b: usize,
    pub rest_length: F,
}

impl<F: Float> LinkConstraint<F> {
    pub fn new(a: usize, b: usize, rest_length: F) -> Self {
        LinkConstraint { a, b, rest_length }
    }

    /// Project the pair back toward `rest_length`. Returns the absolute
    /// length error seen before the correction.
    pub fn solve(&self, particles: &mut [Particle<F>]) -> F {
        if self.rest_length <= F::from_f32(MIN_REST_LENGTH) {
            return F::zero();
        }

        let a_locked = particles[self.a].locked;
        let b_locked = particles[self.b].locked;
        if a_locked && b_locked {
            return F::zero();
        }

        let delta = particles[self.a].pos - particles[self.b].pos;
        let dist = delta.length();
        if dist.is_near_zero(F::from_f32(1e-10)) {
            return F::zero(); // coincident
        }

        let error = dist - self.rest_length;
        let correction = delta.scale(error / dist);

        if !a_locked && !b_locked {
            let half = correction.scale(F::half());
            particles[self.a].pos = particles[self.a].pos - half;
            particles[self.b].pos = particles[self.b].pos + half;
        } else if !a_locked {
            particles[self.a].pos = particles[self.a].pos - correction;
        } else {
            particles[self.b].pos = particles[self.b].pos + correction;
        }

        error.abs()
    }

    /// Current absolute length error, without correcting anything.
    pub fn error(&self, particles: &[Particle<F>]) -> F {
        let dist = particles[self.a].pos.distance(particles[self.b].pos);
        (dist - self.rest_length).abs()
    }
}
