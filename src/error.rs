//! Error types for rope creation and handle lookups.
//!
//! Ticks never fail: degenerate geometry is skipped and heals over later
//! ticks. Everything here is raised when a rope is created or addressed.

use crate::store::RopeHandle;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RopeError {
    /// A rope needs at least two segments (three particles).
    #[error("rope needs at least 2 segments, got {segments}")]
    InvalidSegmentCount { segments: usize },
    /// Total length / segment count must come out positive and finite.
    #[error("segment rest length must be positive and finite")]
    InvalidRestLength,
    /// Damping must be in (0, 1].
    #[error("damping must be in (0, 1]")]
    InvalidDamping,
    /// Gravity is a magnitude along `-y`; it cannot be negative.
    #[error("gravity must be a non-negative finite magnitude")]
    InvalidGravity,
    /// Output refreshes need at least one tick between them.
    #[error("refresh interval must be at least 1 tick")]
    InvalidRefreshInterval,
    /// Collision stiffness must be in [0, 1].
    #[error("collision stiffness must be in [0, 1]")]
    InvalidStiffness,
    /// Collision velocity damping must be in [0, 1].
    #[error("collision velocity damping must be in [0, 1]")]
    InvalidCollisionDamping,
    /// Collision radius must be non-negative and finite.
    #[error("collision radius must be non-negative")]
    InvalidCollisionRadius,
    /// Collision sampling needs at least one segment.
    #[error("collision sample segments must be at least 1")]
    InvalidSampleSegments,
    /// Zero passes would switch collision response off.
    #[error("collision iterations must be at least 1")]
    InvalidCollisionIterations,
    /// The anchor id does not belong to this anchor set.
    #[error("anchor {index} does not exist")]
    MissingAnchor { index: usize },
    /// The rope was destroyed, or the handle came from another world.
    #[error("rope handle {handle:?} is stale or unknown")]
    UnknownRope { handle: RopeHandle },
}
