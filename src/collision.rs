//! Rope-to-rope collision: pairwise penetration response and the global
//! "is anything still intersecting" query.
//!
//! Each rope is approximated by spheres around a strided sample of its free
//! particles. Endpoints are never tested, so ropes sharing an anchor do not
//! report contact at the shared point.

use crate::config::CollisionConfig;
use crate::float::Float;
use crate::observer::StepObserver;
use crate::particle::Particle;
use crate::rope::RopeSimulation;
use crate::store::{RopeHandle, RopeStore};
use alloc::vec::Vec as AllocVec;

/// Indices `step, 2*step, ...` strictly below `len - step`.
fn sample_indices(len: usize, step: usize) -> impl Iterator<Item = usize> {
    (step..len.saturating_sub(step)).step_by(step)
}

/// Push two overlapping particles apart and damp their approach velocity.
/// Returns whether a correction was applied.
fn resolve_contact<F: Float>(
    a: &mut Particle<F>,
    b: &mut Particle<F>,
    min_dist: F,
    params: &CollisionConfig<F>,
) -> bool {
    let delta = a.pos - b.pos;
    let dist = delta.length();
    if !(dist > params.threshold && dist < min_dist) {
        return false;
    }

    let normal = delta.scale(F::one() / dist);
    let half = normal.scale((min_dist - dist) * params.stiffness * F::half());
    a.pos = a.pos + half;
    b.pos = b.pos - half;

    // Only prev_pos changes here: current positions stay put and the
    // approach component of the implicit velocity shrinks.
    let normal_velocity = (a.velocity_raw() - b.velocity_raw()).dot(normal);
    if normal_velocity < F::zero() {
        let damped = normal.scale(normal_velocity * params.velocity_damping * F::half());
        a.prev_pos = a.prev_pos + damped;
        b.prev_pos = b.prev_pos - damped;
    }
    true
}

/// Resolve penetrations between two ropes. Returns the number of particle
/// corrections applied across all passes.
///
/// Ropes on different depth layers never interact. Stiffness, velocity
/// damping, threshold and pass count are taken from `a`; the contact
/// distance is the sum of both radii.
pub fn resolve_pair<F: Float, O: StepObserver<F> + ?Sized>(
    a: &mut RopeSimulation<F>,
    b: &mut RopeSimulation<F>,
    observer: &mut O,
) -> usize {
    if a.depth_layer() != b.depth_layer() {
        return 0;
    }

    let params = *a.collision();
    let min_dist = a.collision_radius() + b.collision_radius();
    let step_a = a.sample_step();
    let step_b = b.sample_step();
    let pa = a.particles_mut();
    let pb = b.particles_mut();

    let mut total = 0;
    for iteration in 0..params.iterations {
        let mut corrections = 0;
        for i in sample_indices(pa.len(), step_a) {
            if pa[i].locked {
                continue;
            }
            for j in sample_indices(pb.len(), step_b) {
                if pb[j].locked {
                    continue;
                }
                if resolve_contact(&mut pa[i], &mut pb[j], min_dist, &params) {
                    corrections += 1;
                }
            }
        }
        observer.on_collision_iteration(iteration, corrections);
        total += corrections;

        if corrections == 0 && iteration > 0 {
            break;
        }
    }
    total
}

/// Read-only contact test with the same sampling as [`resolve_pair`].
pub fn ropes_collide<F: Float>(a: &RopeSimulation<F>, b: &RopeSimulation<F>) -> bool {
    if a.depth_layer() != b.depth_layer() {
        return false;
    }

    let min_dist = a.collision_radius() + b.collision_radius();
    let pa = a.particles();
    let pb = b.particles();
    for i in sample_indices(pa.len(), a.sample_step()) {
        if pa[i].locked {
            continue;
        }
        for j in sample_indices(pb.len(), b.sample_step()) {
            if pb[j].locked {
                continue;
            }
            if pa[i].pos.distance(pb[j].pos) < min_dist {
                return true;
            }
        }
    }
    false
}

/// The set of ropes taking part in collision, in registration order.
///
/// Holds handles only; the ropes themselves live in a [`RopeStore`]. Pairs
/// are always visited in registration order so identical inputs give
/// identical results.
#[derive(Clone, Debug, Default)]
pub struct CollisionRegistry {
    ropes: AllocVec<RopeHandle>,
}

impl CollisionRegistry {
    pub fn new() -> Self {
        CollisionRegistry { ropes: AllocVec::new() }
    }

    /// Add a rope. Registering twice is a no-op; returns whether it was added.
    pub fn register(&mut self, handle: RopeHandle) -> bool {
        if self.ropes.contains(&handle) {
            return false;
        }
        self.ropes.push(handle);
        log::debug!("registered rope {:?}, total {}", handle, self.ropes.len());
        true
    }

    /// Remove a rope, keeping the order of the rest. Returns whether it was present.
    pub fn unregister(&mut self, handle: RopeHandle) -> bool {
        match self.ropes.iter().position(|h| *h == handle) {
            Some(index) => {
                self.ropes.remove(index);
                log::debug!("unregistered rope {:?}, total {}", handle, self.ropes.len());
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, handle: RopeHandle) -> bool {
        self.ropes.contains(&handle)
    }

    pub fn handles(&self) -> &[RopeHandle] {
        &self.ropes
    }

    pub fn len(&self) -> usize {
        self.ropes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ropes.is_empty()
    }

    pub fn clear(&mut self) {
        self.ropes.clear();
    }

    /// Every unordered pair `(i, j)` with `i` registered before `j`.
    pub fn pairs(&self) -> impl Iterator<Item = (RopeHandle, RopeHandle)> + '_ {
        let ropes = &self.ropes;
        (0..ropes.len()).flat_map(move |i| (i + 1..ropes.len()).map(move |j| (ropes[i], ropes[j])))
    }

    /// One collision response over all registered pairs. Stale handles are
    /// skipped. Returns the total number of corrections.
    pub fn resolve_all<F: Float, O: StepObserver<F> + ?Sized>(
        &self,
        store: &mut RopeStore<F>,
        observer: &mut O,
    ) -> usize {
        let mut total = 0;
        for (ha, hb) in self.pairs() {
            if let Some((a, b)) = store.pair_mut(ha, hb) {
                total += resolve_pair(a, b, observer);
            }
        }
        total
    }

    /// True as soon as any registered pair is in contact. Never mutates.
    pub fn any_collisions<F: Float>(&self, store: &RopeStore<F>) -> bool {
        self.pairs().any(|(ha, hb)| match (store.get(ha), store.get(hb)) {
            (Some(a), Some(b)) => ropes_collide(a, b),
            _ => false,
        })
    }

    /// All pairs currently in contact, in registration order.
    pub fn colliding_pairs<F: Float>(&self, store: &RopeStore<F>) -> AllocVec<(RopeHandle, RopeHandle)> {
        self.pairs()
            .filter(|&(ha, hb)| match (store.get(ha), store.get(hb)) {
                (Some(a), Some(b)) => ropes_collide(a, b),
                _ => false,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vec::Vec3;

    #[test]
    fn sample_indices_skip_both_ends() {
        let v: AllocVec<usize> = sample_indices(11, 1).collect();
        assert_eq!(v, (1..10).collect::<AllocVec<_>>());
        let v: AllocVec<usize> = sample_indices(51, 5).collect();
        assert_eq!(v, [5, 10, 15, 20, 25, 30, 35, 40, 45]);
        assert_eq!(sample_indices(3, 2).count(), 0);
    }

    #[test]
    fn contact_pushes_to_min_distance() {
        let mut a = Particle::new(Vec3::new(0.0f64, 0.05, 0.0));
        let mut b = Particle::new(Vec3::new(0.0f64, -0.05, 0.0));
        let params = CollisionConfig::new();
        assert!(resolve_contact(&mut a, &mut b, 0.2, &params));
        assert!((a.pos.distance(b.pos) - 0.2).abs() < 1e-12);
        assert!((a.pos.y - 0.1).abs() < 1e-12);
        assert!((b.pos.y + 0.1).abs() < 1e-12);
    }

    #[test]
    fn approach_velocity_is_damped() {
        // a sits above b and both move toward each other at 0.1 per tick.
        let mut a = Particle::new(Vec3::new(0.0f64, 0.09, 0.0));
        a.prev_pos = Vec3::new(0.0, 0.19, 0.0);
        let mut b = Particle::new(Vec3::new(0.0f64, -0.09, 0.0));
        b.prev_pos = Vec3::new(0.0, -0.19, 0.0);
        let params = CollisionConfig::new().with_velocity_damping(0.5);

        let before = (a.velocity_raw() - b.velocity_raw()).y;
        assert!(resolve_contact(&mut a, &mut b, 0.2, &params));
        let after = (a.velocity_raw() - b.velocity_raw()).y;
        assert!(before < 0.0);
        assert!(after > before, "approach should slow: {} -> {}", before, after);
    }

    #[test]
    fn below_threshold_is_ignored() {
        let p = Vec3::new(1.0f32, 1.0, 1.0);
        let mut a = Particle::new(p);
        let mut b = Particle::new(p);
        assert!(!resolve_contact(&mut a, &mut b, 0.2, &CollisionConfig::new()));
        assert_eq!(a.pos, p);
        assert_eq!(b.pos, p);
    }
}
