//! Externally owned anchor positions that rope endpoints track.

use crate::error::RopeError;
use crate::float::Float;
use crate::vec::Vec3;
use alloc::vec::Vec as AllocVec;
use core::ops::Index;

/// Identifies an anchor inside the [`AnchorSet`] that minted it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnchorId(usize);

impl AnchorId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Append-only list of anchor positions.
///
/// Anchors can be moved at any time between ticks but never removed, so an
/// id handed out by a set stays valid for as long as the set lives.
#[derive(Clone, Debug, Default)]
pub struct AnchorSet<F: Float> {
    positions: AllocVec<Vec3<F>>,
}

impl<F: Float> AnchorSet<F> {
    pub fn new() -> Self {
        AnchorSet { positions: AllocVec::new() }
    }

    pub fn insert(&mut self, pos: Vec3<F>) -> AnchorId {
        self.positions.push(pos);
        AnchorId(self.positions.len() - 1)
    }

    pub fn get(&self, id: AnchorId) -> Option<Vec3<F>> {
        self.positions.get(id.0).copied()
    }

    /// Like [`get`](Self::get), but a missing anchor is an error.
    pub fn require(&self, id: AnchorId) -> Result<Vec3<F>, RopeError> {
        self.get(id).ok_or(RopeError::MissingAnchor { index: id.0 })
    }

    pub fn set(&mut self, id: AnchorId, pos: Vec3<F>) -> Result<(), RopeError> {
        let slot = self
            .positions
            .get_mut(id.0)
            .ok_or(RopeError::MissingAnchor { index: id.0 })?;
        *slot = pos;
        Ok(())
    }

    pub fn contains(&self, id: AnchorId) -> bool {
        id.0 < self.positions.len()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

impl<F: Float> Index<AnchorId> for AnchorSet<F> {
    type Output = Vec3<F>;

    fn index(&self, id: AnchorId) -> &Vec3<F> {
        &self.positions[id.0]
    }
}
