//! Debounced, cancellable "are the ropes untangled" check.
//!
//! Driven from the game's fixed tick: call [`WinCheck::poll`] once per tick
//! with the elapsed time. The check waits for the ropes to settle, polls the
//! collision query, and only reports [`WinStatus::Won`] when a clear result
//! still holds after the stability window.

use crate::config::WinCheckConfig;
use crate::float::Float;
use crate::world::RopeWorld;
use alloc::rc::Rc;
use core::cell::Cell;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WinStatus {
    Pending,
    Won,
    Cancelled,
}

/// Shared cancel flag. Clones refer to the same check.
#[derive(Clone, Debug, Default)]
pub struct CancelHandle(Rc<Cell<bool>>);

impl CancelHandle {
    pub fn new() -> Self {
        CancelHandle(Rc::new(Cell::new(false)))
    }

    /// Stop the check. Calling it again does nothing.
    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Phase<F> {
    Settling { remaining: F },
    Polling,
    Confirming { remaining: F },
    Finished(WinStatus),
}

#[derive(Clone, Debug)]
pub struct WinCheck<F: Float> {
    config: WinCheckConfig<F>,
    phase: Phase<F>,
    cancel: CancelHandle,
}

impl<F: Float> WinCheck<F> {
    pub fn new(config: WinCheckConfig<F>) -> Self {
        WinCheck {
            phase: Phase::Settling { remaining: config.settle_delay },
            config,
            cancel: CancelHandle::new(),
        }
    }

    /// A handle another owner (level teardown, a fail condition) can use to
    /// stop this check.
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn status(&self) -> WinStatus {
        match self.phase {
            Phase::Finished(status) => status,
            _ if self.cancel.is_cancelled() => WinStatus::Cancelled,
            _ => WinStatus::Pending,
        }
    }

    /// Advance by `dt` seconds. `is_clear` is evaluated at most once, and
    /// only when a poll is due.
    pub fn poll(&mut self, dt: F, is_clear: impl FnOnce() -> bool) -> WinStatus {
        if let Phase::Finished(status) = self.phase {
            return status;
        }
        if self.cancel.is_cancelled() {
            self.phase = Phase::Finished(WinStatus::Cancelled);
            log::debug!("win check cancelled");
            return WinStatus::Cancelled;
        }

        self.phase = match self.phase {
            Phase::Settling { remaining } => {
                let remaining = remaining - dt;
                if remaining > F::zero() {
                    Phase::Settling { remaining }
                } else {
                    self.after_poll(is_clear())
                }
            }
            Phase::Polling => self.after_poll(is_clear()),
            Phase::Confirming { remaining } => {
                let remaining = remaining - dt;
                if remaining > F::zero() {
                    Phase::Confirming { remaining }
                } else if is_clear() {
                    log::info!("win confirmed");
                    Phase::Finished(WinStatus::Won)
                } else {
                    log::debug!("win re-check failed, polling again");
                    Phase::Polling
                }
            }
            Phase::Finished(status) => Phase::Finished(status),
        };
        self.status()
    }

    /// [`poll`](Self::poll) against a world: clear means no registered pair
    /// is in contact.
    pub fn poll_world(&mut self, dt: F, world: &RopeWorld<F>) -> WinStatus {
        self.poll(dt, || !world.any_collisions())
    }

    /// Start over with the same config and a fresh cancel flag.
    pub fn reset(&mut self) {
        *self = WinCheck::new(self.config);
    }

    fn after_poll(&self, clear: bool) -> Phase<F> {
        if clear {
            Phase::Confirming { remaining: self.config.stability_window }
        } else {
            Phase::Polling
        }
    }
}

impl<F: Float> Default for WinCheck<F> {
    fn default() -> Self {
        Self::new(WinCheckConfig::new())
    }
}
