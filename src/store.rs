//! Generational storage for live rope simulations.

use crate::error::RopeError;
use crate::float::Float;
use crate::rope::RopeSimulation;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle to a rope in a [`RopeStore`].
    ///
    /// Slots are reused after a rope is destroyed; the version baked into
    /// the key makes any handle to the old occupant stale.
    pub struct RopeHandle;
}

/// Owns every live rope; other parts of the crate refer to them by handle.
#[derive(Clone, Debug)]
pub struct RopeStore<F: Float> {
    ropes: SlotMap<RopeHandle, RopeSimulation<F>>,
}

impl<F: Float> RopeStore<F> {
    pub fn new() -> Self {
        RopeStore { ropes: SlotMap::with_key() }
    }

    pub fn insert(&mut self, rope: RopeSimulation<F>) -> RopeHandle {
        self.ropes.insert(rope)
    }

    pub fn remove(&mut self, handle: RopeHandle) -> Result<RopeSimulation<F>, RopeError> {
        self.ropes.remove(handle).ok_or(RopeError::UnknownRope { handle })
    }

    pub fn get(&self, handle: RopeHandle) -> Option<&RopeSimulation<F>> {
        self.ropes.get(handle)
    }

    pub fn get_mut(&mut self, handle: RopeHandle) -> Option<&mut RopeSimulation<F>> {
        self.ropes.get_mut(handle)
    }

    pub fn require(&self, handle: RopeHandle) -> Result<&RopeSimulation<F>, RopeError> {
        self.get(handle).ok_or(RopeError::UnknownRope { handle })
    }

    pub fn require_mut(&mut self, handle: RopeHandle) -> Result<&mut RopeSimulation<F>, RopeError> {
        self.get_mut(handle).ok_or(RopeError::UnknownRope { handle })
    }

    pub fn contains(&self, handle: RopeHandle) -> bool {
        self.ropes.contains_key(handle)
    }

    /// Mutable access to two different ropes at once, in argument order.
    /// `None` if the handles are equal or either is stale.
    pub fn pair_mut(
        &mut self,
        a: RopeHandle,
        b: RopeHandle,
    ) -> Option<(&mut RopeSimulation<F>, &mut RopeSimulation<F>)> {
        let [ra, rb] = self.ropes.get_disjoint_mut([a, b])?;
        Some((ra, rb))
    }

    /// Live ropes in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (RopeHandle, &RopeSimulation<F>)> + '_ {
        self.ropes.iter()
    }

    pub fn len(&self) -> usize {
        self.ropes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ropes.is_empty()
    }
}

impl<F: Float> Default for RopeStore<F> {
    fn default() -> Self {
        Self::new()
    }
}
