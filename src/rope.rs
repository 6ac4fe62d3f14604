//! A single rope: a Verlet particle chain pinned between two anchors.

use crate::anchor::{AnchorId, AnchorSet};
use crate::config::{CollisionConfig, RopeConfig};
use crate::constraint::LinkConstraint;
use crate::error::RopeError;
use crate::float::Float;
use crate::observer::StepObserver;
use crate::particle::Particle;
use crate::vec::Vec3;
use alloc::vec::Vec as AllocVec;

/// One rope's physics state.
///
/// Particle 0 tracks the start anchor and the last particle tracks the end
/// anchor; both are locked. The segment rest length is fixed at creation, so
/// dragging the anchors apart stretches the rope and pushing them together
/// adds slack.
#[derive(Clone, Debug)]
pub struct RopeSimulation<F: Float> {
    particles: AllocVec<Particle<F>>,
    links: AllocVec<LinkConstraint<F>>,
    start: AnchorId,
    end: AnchorId,
    rest_segment_length: F,
    total_length: F,
    config: RopeConfig<F>,
    gravity_enabled: bool,
    active: bool,
    ticks_since_refresh: usize,
}

impl<F: Float> RopeSimulation<F> {
    /// Build a straight rope between two anchors.
    ///
    /// Fails when the config is invalid, either anchor is missing from
    /// `anchors`, or the derived segment length is not positive (for
    /// instance slack-length ropes between coincident anchors).
    pub fn new(
        start: AnchorId,
        end: AnchorId,
        anchors: &AnchorSet<F>,
        config: RopeConfig<F>,
    ) -> Result<Self, RopeError> {
        config.validate()?;
        let start_pos = anchors.require(start)?;
        let end_pos = anchors.require(end)?;

        let segments = config.segments;
        let distance = start_pos.distance(end_pos);
        let total_length = config.length.total(distance);
        let rest_segment_length = total_length / F::from_usize(segments);
        if !rest_segment_length.is_finite() || rest_segment_length <= F::zero() {
            return Err(RopeError::InvalidRestLength);
        }
        if distance > total_length {
            log::warn!(
                "anchor distance {:?} exceeds rope length {:?}; rope starts stretched",
                distance,
                total_length
            );
        }

        let mut particles = AllocVec::with_capacity(segments + 1);
        for i in 0..=segments {
            let t = F::from_usize(i) / F::from_usize(segments);
            let pos = start_pos.lerp(end_pos, t);
            if i == 0 || i == segments {
                particles.push(Particle::locked(pos));
            } else {
                particles.push(Particle::new(pos));
            }
        }

        let links = (0..segments)
            .map(|i| LinkConstraint::new(i, i + 1, rest_segment_length))
            .collect();

        log::debug!(
            "rope created: distance={:?} length={:?} segments={} layer={}",
            distance,
            total_length,
            segments,
            config.depth_layer
        );

        Ok(RopeSimulation {
            particles,
            links,
            start,
            end,
            rest_segment_length,
            total_length,
            gravity_enabled: config.gravity > F::zero(),
            config,
            active: false,
            ticks_since_refresh: 0,
        })
    }

    /// Damped Verlet step for every free particle.
    pub fn integrate(&mut self, dt: F) {
        let damping = self.config.damping;
        let gravity = if self.gravity_enabled {
            Some(Vec3::down().scale(self.config.gravity))
        } else {
            None
        };
        for p in self.particles.iter_mut() {
            p.integrate(dt, damping, gravity);
        }
    }

    /// Snap both endpoints onto their anchors, zeroing their velocity.
    ///
    /// # Panics
    /// If `anchors` is not the set this rope was created against.
    pub fn pin_endpoints(&mut self, anchors: &AnchorSet<F>) {
        let last = self.particles.len() - 1;
        self.particles[0].pin_to(anchors[self.start]);
        self.particles[last].pin_to(anchors[self.end]);
    }

    /// Sequential relaxation passes over consecutive particle pairs, low
    /// index to high. Returns the summed length error seen on the last pass.
    pub fn relax_constraints<O: StepObserver<F> + ?Sized>(&mut self, observer: &mut O) -> F {
        let mut last_error = F::zero();
        for i in 0..self.config.constraint_iterations {
            last_error = F::zero();
            for link in self.links.iter() {
                last_error = last_error + link.solve(&mut self.particles);
            }
            observer.on_constraint_iteration(i);
        }
        last_error
    }

    /// One tick: integrate, pin, relax. The order matters: relaxation has to
    /// see the current anchor positions.
    pub fn step<O: StepObserver<F> + ?Sized>(&mut self, dt: F, anchors: &AnchorSet<F>, observer: &mut O) {
        self.integrate(dt);
        observer.on_integrate();
        self.pin_endpoints(anchors);
        self.relax_constraints(observer);
        observer.on_step_complete();
    }

    /// Enter gameplay: mark active and drop whatever momentum the
    /// pre-simulation left behind.
    pub fn activate(&mut self) {
        self.active = true;
        for p in self.particles.iter_mut() {
            p.settle();
        }
        log::debug!("rope activated");
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn gravity_enabled(&self) -> bool {
        self.gravity_enabled
    }

    pub fn set_gravity_enabled(&mut self, enabled: bool) {
        self.gravity_enabled = enabled;
    }

    /// Displace one free particle by `offset`. `None` targets the middle
    /// particle. Locked or out-of-range particles are left alone; returns
    /// whether anything moved.
    pub fn apply_impulse(&mut self, index: Option<usize>, offset: Vec3<F>) -> bool {
        let index = index.unwrap_or(self.particles.len() / 2);
        match self.particles.get_mut(index) {
            Some(p) if !p.locked => {
                p.pos = p.pos + offset;
                true
            }
            _ => false,
        }
    }

    /// Displace the particle next to the end anchor, the one a drag pulls on.
    pub fn nudge(&mut self, offset: Vec3<F>) -> bool {
        let index = self.particles.len() - 2;
        self.apply_impulse(Some(index), offset)
    }

    /// Attach the rope to different anchors, e.g. after an endpoint was
    /// dropped on another pin. The segment rest length is kept.
    pub fn rebind_anchors(
        &mut self,
        start: AnchorId,
        end: AnchorId,
        anchors: &AnchorSet<F>,
    ) -> Result<(), RopeError> {
        anchors.require(start)?;
        anchors.require(end)?;
        self.start = start;
        self.end = end;
        Ok(())
    }

    /// Advance the refresh counter; true when output is due this tick.
    pub(crate) fn refresh_due(&mut self) -> bool {
        self.ticks_since_refresh += 1;
        if self.ticks_since_refresh >= self.config.refresh_interval {
            self.ticks_since_refresh = 0;
            true
        } else {
            false
        }
    }

    pub(crate) fn mark_refreshed(&mut self) {
        self.ticks_since_refresh = 0;
    }

    /// Collision sampling stride: every `step`-th particle is tested.
    pub fn sample_step(&self) -> usize {
        (self.particles.len() / self.config.collision.sample_segments.max(1)).max(1)
    }

    /// Summed absolute length error over all links.
    pub fn constraint_error(&self) -> F {
        self.links
            .iter()
            .fold(F::zero(), |acc, link| acc + link.error(&self.particles))
    }

    pub fn positions(&self) -> AllocVec<Vec3<F>> {
        self.particles.iter().map(|p| p.pos).collect()
    }

    pub fn particles(&self) -> &[Particle<F>] {
        &self.particles
    }

    pub(crate) fn particles_mut(&mut self) -> &mut [Particle<F>] {
        &mut self.particles
    }

    pub fn particle(&self, index: usize) -> &Particle<F> {
        &self.particles[index]
    }

    pub fn particle_mut(&mut self, index: usize) -> &mut Particle<F> {
        &mut self.particles[index]
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn segment_count(&self) -> usize {
        self.links.len()
    }

    pub fn rest_segment_length(&self) -> F {
        self.rest_segment_length
    }

    pub fn total_length(&self) -> F {
        self.total_length
    }

    pub fn depth_layer(&self) -> i32 {
        self.config.depth_layer
    }

    pub fn collision(&self) -> &CollisionConfig<F> {
        &self.config.collision
    }

    pub fn collision_radius(&self) -> F {
        self.config.collision.radius
    }

    pub fn config(&self) -> &RopeConfig<F> {
        &self.config
    }

    pub fn start_anchor(&self) -> AnchorId {
        self.start
    }

    pub fn end_anchor(&self) -> AnchorId {
        self.end
    }
}
