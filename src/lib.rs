//! Verlet rope physics for rope-untangling puzzles.
//!
//! `knotty` simulates ropes strung between movable anchors and keeps them
//! from passing through each other. The player drags anchors around; the
//! level is solved once no two ropes on the same depth layer touch.
//!
//! # Features
//!
//! - **Verlet ropes**: Damped position-based integration with locked endpoints
//! - **Constraint relaxation**: Sequential distance passes toward a fixed rest length
//! - **Rope-to-rope collision**: Sampled sphere contacts with velocity damping, per depth layer
//! - **Warm start**: Silent pre-simulation so levels open already settled
//! - **Win check**: Tick-driven, debounced and cancellable
//! - **Observable**: Monitor physics steps and render refreshes via the `StepObserver` trait
//! - **`no_std` compatible**: Works in embedded and WASM environments

#![no_std]

extern crate alloc;

pub mod float;
pub mod vec;
pub mod particle;
pub mod constraint;
pub mod anchor;
pub mod rope;
pub mod store;
pub mod collision;
pub mod warm_start;
pub mod win_check;
pub mod world;
pub mod observer;
pub mod config;
pub mod error;

// Re-export primary API
pub use float::Float;
pub use vec::Vec3;
pub use particle::Particle;
pub use constraint::LinkConstraint;
pub use anchor::{AnchorId, AnchorSet};
pub use rope::RopeSimulation;
pub use store::{RopeHandle, RopeStore};
pub use collision::{resolve_pair, ropes_collide, CollisionRegistry};
pub use warm_start::WarmStartReport;
pub use win_check::{CancelHandle, WinCheck, WinStatus};
pub use world::RopeWorld;
pub use config::{CollisionConfig, RopeConfig, RopeLength, WinCheckConfig};
pub use observer::{StepObserver, NoOpStepObserver};
pub use error::RopeError;
