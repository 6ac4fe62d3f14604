//! Per-rope configuration.
//!
//! Everything is set through builder methods or, with the `serde` feature,
//! deserialized from level data:
//!
//! ```
//! use knotty::config::{RopeConfig, RopeLength, CollisionConfig};
//!
//! let config: RopeConfig<f32> = RopeConfig::new()
//!     .with_segments(20)
//!     .with_length(RopeLength::Slack(1.1))
//!     .with_damping(0.98)
//!     .with_gravity(9.81)
//!     .with_collision(CollisionConfig::from_rope_width(0.15, 0.02).with_stiffness(0.8))
//!     .with_depth_layer(1);
//! assert!(config.validate().is_ok());
//! ```

use crate::error::RopeError;
use crate::float::Float;

#[cfg(feature = "serde")]
use serde::Deserialize;

/// How the total rope length is chosen at creation time.
///
/// The length is computed once; moving the anchors afterwards leaves the
/// segment rest length alone.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize), serde(rename_all = "snake_case"))]
pub enum RopeLength<F: Float> {
    /// Anchor distance times this multiplier (1.2 = 20% extra for sag).
    Slack(F),
    /// A fixed total length, regardless of anchor distance.
    Fixed(F),
}

impl<F: Float> RopeLength<F> {
    /// Total length for ropes whose anchors start `anchor_distance` apart.
    pub fn total(&self, anchor_distance: F) -> F {
        match *self {
            RopeLength::Slack(multiplier) => anchor_distance * multiplier,
            RopeLength::Fixed(length) => length,
        }
    }
}

/// Rope-to-rope collision settings.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize), serde(default))]
pub struct CollisionConfig<F: Float> {
    /// Sphere radius around each sampled particle. Default: 0.095.
    pub radius: F,
    /// Fraction of the penetration corrected per contact, in [0, 1]. Default: 1.0.
    pub stiffness: F,
    /// Fraction of the approach velocity removed per contact, in [0, 1]. Default: 0.9.
    pub velocity_damping: F,
    /// Max detection/response passes per pair. Default: 2.
    pub iterations: usize,
    /// Distances at or below this are ignored (no usable normal). Default: 0.001.
    pub threshold: F,
    /// Roughly how many particles per rope take part in collision tests. Default: 10.
    pub sample_segments: usize,
}

impl<F: Float> CollisionConfig<F> {
    pub fn new() -> Self {
        CollisionConfig {
            radius: F::from_f32(0.095),
            stiffness: F::one(),
            velocity_damping: F::from_f32(0.9),
            iterations: 2,
            threshold: F::from_f32(0.001),
            sample_segments: 10,
        }
    }

    /// Radius derived from the rendered rope width plus a safety padding.
    pub fn from_rope_width(width: F, padding: F) -> Self {
        Self::new().with_radius(width * F::half() + padding)
    }

    pub fn with_radius(mut self, radius: F) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_stiffness(mut self, stiffness: F) -> Self {
        self.stiffness = stiffness;
        self
    }

    pub fn with_velocity_damping(mut self, damping: F) -> Self {
        self.velocity_damping = damping;
        self
    }

    /// Set the pass count (at least one).
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations.max(1);
        self
    }

    pub fn with_threshold(mut self, threshold: F) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_sample_segments(mut self, segments: usize) -> Self {
        self.sample_segments = segments;
        self
    }

    pub fn validate(&self) -> Result<(), RopeError> {
        if !self.radius.is_finite() || self.radius < F::zero() {
            return Err(RopeError::InvalidCollisionRadius);
        }
        if !(self.stiffness >= F::zero() && self.stiffness <= F::one()) {
            return Err(RopeError::InvalidStiffness);
        }
        if !(self.velocity_damping >= F::zero() && self.velocity_damping <= F::one()) {
            return Err(RopeError::InvalidCollisionDamping);
        }
        if self.sample_segments == 0 {
            return Err(RopeError::InvalidSampleSegments);
        }
        if self.iterations == 0 {
            return Err(RopeError::InvalidCollisionIterations);
        }
        Ok(())
    }
}

impl<F: Float> Default for CollisionConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration for one rope simulation.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize), serde(default))]
pub struct RopeConfig<F: Float> {
    /// Number of segments; the rope has `segments + 1` particles. Default: 50.
    pub segments: usize,
    /// Total length rule. Default: `Slack(1.2)`.
    pub length: RopeLength<F>,
    /// Velocity damping per tick; 1.0 = none. Default: 0.98.
    pub damping: F,
    /// Gravity acceleration magnitude along `-y`, non-negative; zero disables it. Default: 9.81.
    pub gravity: F,
    /// Relaxation passes per tick. Default: 15.
    pub constraint_iterations: usize,
    pub collision: CollisionConfig<F>,
    /// Ropes only collide with ropes on the same layer. Default: 0.
    pub depth_layer: i32,
    /// Ticks between output refreshes (1 = every tick). Default: 1.
    pub refresh_interval: usize,
}

impl<F: Float> RopeConfig<F> {
    pub fn new() -> Self {
        RopeConfig {
            segments: 50,
            length: RopeLength::Slack(F::from_f32(1.2)),
            damping: F::from_f32(0.98),
            gravity: F::from_f32(9.81),
            constraint_iterations: 15,
            collision: CollisionConfig::new(),
            depth_layer: 0,
            refresh_interval: 1,
        }
    }

    pub fn with_segments(mut self, segments: usize) -> Self {
        self.segments = segments;
        self
    }

    pub fn with_length(mut self, length: RopeLength<F>) -> Self {
        self.length = length;
        self
    }

    pub fn with_damping(mut self, damping: F) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_gravity(mut self, gravity: F) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_constraint_iterations(mut self, iterations: usize) -> Self {
        self.constraint_iterations = iterations;
        self
    }

    pub fn with_collision(mut self, collision: CollisionConfig<F>) -> Self {
        self.collision = collision;
        self
    }

    pub fn with_collision_radius(mut self, radius: F) -> Self {
        self.collision.radius = radius;
        self
    }

    pub fn with_depth_layer(mut self, layer: i32) -> Self {
        self.depth_layer = layer;
        self
    }

    /// Set the refresh cadence (at least every tick).
    pub fn with_refresh_interval(mut self, interval: usize) -> Self {
        self.refresh_interval = interval.max(1);
        self
    }

    /// Cheaper preset for weak devices: half the segments (at least 20)
    /// and half the relaxation passes (at least 5).
    pub fn with_low_quality(mut self) -> Self {
        self.segments = (self.segments / 2).max(20);
        self.constraint_iterations = (self.constraint_iterations / 2).max(5);
        self
    }

    /// Checks everything that does not depend on anchor positions.
    pub fn validate(&self) -> Result<(), RopeError> {
        if self.segments < 2 {
            return Err(RopeError::InvalidSegmentCount { segments: self.segments });
        }
        let length_ok = match self.length {
            RopeLength::Slack(m) => m.is_finite() && m > F::zero(),
            RopeLength::Fixed(l) => l.is_finite() && l > F::zero(),
        };
        if !length_ok {
            return Err(RopeError::InvalidRestLength);
        }
        if !(self.damping > F::zero() && self.damping <= F::one()) {
            return Err(RopeError::InvalidDamping);
        }
        if !self.gravity.is_finite() || self.gravity < F::zero() {
            return Err(RopeError::InvalidGravity);
        }
        if self.refresh_interval == 0 {
            return Err(RopeError::InvalidRefreshInterval);
        }
        self.collision.validate()
    }
}

impl<F: Float> Default for RopeConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Timing for the debounced "level solved" check, in simulated seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize), serde(default))]
pub struct WinCheckConfig<F: Float> {
    /// Wait before the first poll so the warm-started ropes can settle. Default: 1.0.
    pub settle_delay: F,
    /// How long a clear result must hold before it counts. Default: 0.5.
    pub stability_window: F,
}

impl<F: Float> WinCheckConfig<F> {
    /// Shortest allowed stability window.
    pub const MIN_STABILITY_WINDOW: f32 = 0.1;

    pub fn new() -> Self {
        WinCheckConfig { settle_delay: F::one(), stability_window: F::half() }
    }

    pub fn with_settle_delay(mut self, delay: F) -> Self {
        self.settle_delay = delay.max(F::zero());
        self
    }

    /// Set the stability window, clamped to at least 0.1s.
    pub fn with_stability_window(mut self, window: F) -> Self {
        self.stability_window = window.max(F::from_f32(Self::MIN_STABILITY_WINDOW));
        self
    }
}

impl<F: Float> Default for WinCheckConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(RopeConfig::<f32>::default().validate().is_ok());
    }

    #[test]
    fn single_segment_is_rejected() {
        let config = RopeConfig::<f32>::new().with_segments(1);
        assert_eq!(config.validate(), Err(RopeError::InvalidSegmentCount { segments: 1 }));
    }

    #[test]
    fn non_positive_lengths_are_rejected() {
        let fixed = RopeConfig::<f32>::new().with_length(RopeLength::Fixed(0.0));
        assert_eq!(fixed.validate(), Err(RopeError::InvalidRestLength));
        let slack = RopeConfig::<f32>::new().with_length(RopeLength::Slack(-1.0));
        assert_eq!(slack.validate(), Err(RopeError::InvalidRestLength));
    }

    #[test]
    fn damping_out_of_range_is_rejected() {
        assert_eq!(
            RopeConfig::<f64>::new().with_damping(1.5).validate(),
            Err(RopeError::InvalidDamping)
        );
        assert_eq!(
            RopeConfig::<f64>::new().with_damping(0.0).validate(),
            Err(RopeError::InvalidDamping)
        );
    }

    #[test]
    fn collision_settings_are_checked() {
        let bad_stiffness = RopeConfig::<f32>::new()
            .with_collision(CollisionConfig::new().with_stiffness(2.0));
        assert_eq!(bad_stiffness.validate(), Err(RopeError::InvalidStiffness));

        let bad_radius = RopeConfig::<f32>::new().with_collision_radius(-0.1);
        assert_eq!(bad_radius.validate(), Err(RopeError::InvalidCollisionRadius));

        let no_samples = RopeConfig::<f32>::new()
            .with_collision(CollisionConfig::new().with_sample_segments(0));
        assert_eq!(no_samples.validate(), Err(RopeError::InvalidSampleSegments));
    }

    #[test]
    fn radius_from_width_adds_padding() {
        let c = CollisionConfig::<f32>::from_rope_width(0.15, 0.02);
        assert!((c.radius - 0.095).abs() < 1e-6);
    }

    #[test]
    fn slack_length_scales_anchor_distance() {
        assert!((RopeLength::Slack(1.5f32).total(2.0) - 3.0).abs() < 1e-6);
        assert_eq!(RopeLength::Fixed(4.0f32).total(2.0), 4.0);
    }

    #[test]
    fn iteration_builders_clamp_to_one() {
        assert_eq!(CollisionConfig::<f32>::new().with_iterations(0).iterations, 1);
        assert_eq!(RopeConfig::<f32>::new().with_refresh_interval(0).refresh_interval, 1);
    }

    #[test]
    fn zero_iterations_and_refresh_are_rejected() {
        let mut config = RopeConfig::<f32>::new();
        config.collision.iterations = 0;
        assert_eq!(config.validate(), Err(RopeError::InvalidCollisionIterations));

        let mut config = RopeConfig::<f32>::new();
        config.refresh_interval = 0;
        assert_eq!(config.validate(), Err(RopeError::InvalidRefreshInterval));
    }

    #[test]
    fn negative_gravity_is_rejected() {
        let config = RopeConfig::<f64>::new().with_gravity(-9.81);
        assert_eq!(config.validate(), Err(RopeError::InvalidGravity));
        assert!(RopeConfig::<f64>::new().with_gravity(0.0).validate().is_ok());
    }

    #[test]
    fn low_quality_halves_with_floors() {
        let config = RopeConfig::<f32>::new().with_low_quality();
        assert_eq!(config.segments, 25);
        assert_eq!(config.constraint_iterations, 7);

        let small = RopeConfig::<f32>::new()
            .with_segments(30)
            .with_constraint_iterations(8)
            .with_low_quality();
        assert_eq!(small.segments, 20);
        assert_eq!(small.constraint_iterations, 5);
    }

    #[test]
    fn stability_window_has_a_floor() {
        let c = WinCheckConfig::<f32>::new().with_stability_window(0.0);
        assert!((c.stability_window - 0.1).abs() < 1e-6);
        let c = WinCheckConfig::<f32>::new().with_settle_delay(-1.0);
        assert_eq!(c.settle_delay, 0.0);
    }
}
