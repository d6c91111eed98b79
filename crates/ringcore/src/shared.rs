//! Lock-wrapped shared handle for the ring.
//!
//! [`HashRing`] itself is single-writer by construction (`&mut self`). When
//! membership changes and lookups come from different threads, `SharedRing`
//! supplies the mutual-exclusion discipline: writes take an exclusive lock,
//! lookups a shared one, so a lookup never observes a partially-updated ring
//! (a torn replica set or an unsorted index).

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard};

use crate::error::Result;
use crate::node::NodeId;
use crate::partitioner::{Partitioner, Xxh3Partitioner};
use crate::ring::position::RingPosition;
use crate::ring::ring::HashRing;

/// Cloneable, thread-safe handle to a [`HashRing`].
///
/// All clones point at the same ring. Lookup results are returned by value
/// so no lock is held after a call returns; use [`read`](SharedRing::read)
/// for multi-step reads (such as a candidate walk) under one consistent
/// snapshot.
#[derive(Clone, Debug)]
pub struct SharedRing<P: Partitioner = Xxh3Partitioner> {
    inner: Arc<RwLock<HashRing<P>>>,
}

impl SharedRing {
    /// Empty shared ring with the default replica count and partitioner.
    pub fn new() -> Self {
        Self::from_ring(HashRing::new())
    }
}

impl Default for SharedRing {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Partitioner> SharedRing<P> {
    /// Wrap an already-built ring.
    pub fn from_ring(ring: HashRing<P>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ring)),
        }
    }

    /// See [`HashRing::add_node`]. Takes the write lock.
    pub fn add_node(&self, node: impl Into<NodeId>) {
        self.inner.write().add_node(node);
    }

    /// See [`HashRing::remove_node`]. Takes the write lock; the
    /// all-or-nothing contract carries over unchanged.
    pub fn remove_node(&self, node: impl Into<NodeId>) -> Result<()> {
        self.inner.write().remove_node(node)
    }

    /// See [`HashRing::locate`].
    pub fn locate(&self, key: &[u8]) -> Option<NodeId> {
        self.inner.read().locate(key).cloned()
    }

    /// See [`HashRing::locate_with_position`].
    pub fn locate_with_position(&self, key: &[u8]) -> Option<(NodeId, usize)> {
        self.inner
            .read()
            .locate_with_position(key)
            .map(|(node, index)| (node.clone(), index))
    }

    /// See [`HashRing::unique_candidates`].
    pub fn unique_candidates(&self, key: &[u8], count: usize) -> Vec<NodeId> {
        self.inner.read().unique_candidates(key, count)
    }

    /// See [`HashRing::node_positions`].
    pub fn node_positions(&self, node: impl AsRef<str>) -> Vec<RingPosition> {
        self.inner.read().node_positions(node)
    }

    /// See [`HashRing::contains_node`].
    pub fn contains_node(&self, node: impl Into<NodeId>) -> bool {
        self.inner.read().contains_node(node)
    }

    /// Total number of virtual positions currently on the ring.
    pub fn position_count(&self) -> usize {
        self.inner.read().position_count()
    }

    /// True if no node is on the ring.
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Shared-lock guard over the ring, for multi-step reads against one
    /// consistent snapshot. Writers block until the guard drops.
    pub fn read(&self) -> RwLockReadGuard<'_, HashRing<P>> {
        self.inner.read()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_one_ring() {
        let ring = SharedRing::new();
        let other = ring.clone();
        ring.add_node("a");
        assert!(other.contains_node("a"));
        assert_eq!(other.position_count(), ring.position_count());
    }

    #[test]
    fn test_candidate_walk_under_read_guard() {
        let ring = SharedRing::new();
        ring.add_node("a");
        ring.add_node("b");
        let guard = ring.read();
        let first_lap: Vec<NodeId> = guard.candidates(b"k").take(6).cloned().collect();
        assert_eq!(first_lap.len(), 6);
    }
}
