//! Consistent hash ring implementation.
//!
//! The ring owns a mapping from virtual positions to nodes plus a sorted
//! index of those positions, and routes every membership change and lookup
//! through its own methods. Keys and virtual nodes share one circular
//! 128-bit keyspace; a key belongs to the first virtual position at or after
//! its hash, wrapping past the largest position back to the smallest.

use std::collections::{BTreeSet, HashMap};

use crate::error::{Error, Result};
use crate::node::NodeId;
use crate::partitioner::{Partitioner, Xxh3Partitioner};
use crate::ring::position::RingPosition;

/// Default number of virtual positions per node.
///
/// Higher values smooth key distribution at the cost of more stored
/// positions; three matches the historical default of the systems this ring
/// was built for and is deliberately conservative.
pub const DEFAULT_REPLICAS: usize = 3;

/// A consistent hash ring mapping keys onto member nodes.
///
/// Each node occupies `replicas` virtual positions derived from hashing
/// `"{node}:{index}"`, which spreads its ownership around the ring so that
/// adding or removing one node only remaps the keyspace slices adjacent to
/// its own positions.
///
/// # Invariants
///
/// - The sorted index and the mapping's key set are identical in membership.
/// - Every member node owns exactly `replicas` positions, unless a position
///   collision between two nodes overwrote one (last write wins; accepted
///   and logged, not corrected).
///
/// # Concurrency
///
/// The ring is a plain in-memory structure: mutation requires `&mut self`,
/// so the borrow checker serializes writers against readers. Wrap it in
/// [`SharedRing`](crate::shared::SharedRing) when multiple threads need it.
///
/// # Performance
///
/// - Lookup: O(log(n·r)) binary search over the sorted index
/// - Add/remove: O(n·r) dominated by the index re-sort / compaction
#[derive(Clone, Debug)]
pub struct HashRing<P: Partitioner = Xxh3Partitioner> {
    /// Virtual positions per node.
    replicas: usize,
    /// Virtual position -> owning node.
    ring: HashMap<RingPosition, NodeId>,
    /// All virtual positions, ascending.
    sorted_positions: Vec<RingPosition>,
    /// Key hasher; stateless and deterministic across runs.
    partitioner: P,
}

impl HashRing {
    /// Create an empty ring with [`DEFAULT_REPLICAS`] positions per node.
    pub fn new() -> Self {
        Self::with_replicas(DEFAULT_REPLICAS)
    }

    /// Create an empty ring with a custom replica count.
    ///
    /// `replicas` must be at least 1; this is a documented precondition, not
    /// a validated one. A zero-replica ring can never own any key.
    pub fn with_replicas(replicas: usize) -> Self {
        Self::with_partitioner(Xxh3Partitioner, replicas)
    }

    /// Create a ring pre-populated with `nodes`, added in input order.
    pub fn with_nodes<I, N>(nodes: I, replicas: usize) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<NodeId>,
    {
        let mut ring = Self::with_replicas(replicas);
        for node in nodes {
            ring.add_node(node);
        }
        ring
    }
}

impl Default for HashRing {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Partitioner> HashRing<P> {
    /// Create an empty ring using a custom partitioner.
    pub fn with_partitioner(partitioner: P, replicas: usize) -> Self {
        Self {
            replicas,
            ring: HashMap::new(),
            sorted_positions: Vec::new(),
            partitioner,
        }
    }

    /// Add a node to the ring, claiming its `replicas` virtual positions.
    ///
    /// If a derived position is already occupied, the new node overwrites the
    /// previous owner (last write wins). Two distinct nodes colliding in a
    /// 128-bit space is statistically negligible; it is logged at WARN and
    /// otherwise accepted. Re-adding a node that is already present derives
    /// the same positions again and leaves the ring unchanged.
    pub fn add_node(&mut self, node: impl Into<NodeId>) {
        let node = node.into();
        for index in 0..self.replicas {
            let position = self.vnode_position(node.as_str(), index);
            if let Some(previous) = self.ring.insert(position, node.clone()) {
                if previous != node {
                    tracing::warn!(
                        %position,
                        displaced = %previous,
                        owner = %node,
                        "virtual position collision, last write wins"
                    );
                }
            }
            self.sorted_positions.push(position);
        }
        self.sorted_positions.sort_unstable();
        // keep the index set-equal to the mapping when an add repeated or
        // collided with an existing position
        self.sorted_positions.dedup();
        tracing::debug!(
            node = %node,
            replicas = self.replicas,
            total_positions = self.sorted_positions.len(),
            "node added to ring"
        );
    }

    /// Remove a node and all of its virtual positions.
    ///
    /// All-or-nothing: every one of the node's `replicas` positions must be
    /// present and still owned by it, otherwise [`Error::NodeNotFound`] is
    /// returned and the ring is left exactly as it was. Partial removal is
    /// never observable.
    pub fn remove_node(&mut self, node: impl Into<NodeId>) -> Result<()> {
        let node = node.into();
        let positions = self.node_positions(&node);
        for position in &positions {
            if self.ring.get(position) != Some(&node) {
                return Err(Error::NodeNotFound(node));
            }
        }
        for position in &positions {
            self.ring.remove(position);
        }
        self.sorted_positions
            .retain(|position| !positions.contains(position));
        tracing::debug!(
            node = %node,
            total_positions = self.sorted_positions.len(),
            "node removed from ring"
        );
        Ok(())
    }

    /// The virtual positions a node occupies (or would occupy), in replica
    /// order.
    ///
    /// Pure function of the node's textual representation and the ring's
    /// replica count; current membership is not consulted. Useful for
    /// reasoning about a node's footprint before adding it.
    pub fn node_positions(&self, node: impl AsRef<str>) -> Vec<RingPosition> {
        let node = node.as_ref();
        (0..self.replicas)
            .map(|index| self.vnode_position(node, index))
            .collect()
    }

    /// The node owning `key`, or `None` if the ring is empty.
    pub fn locate(&self, key: &[u8]) -> Option<&NodeId> {
        self.locate_with_position(key).map(|(node, _)| node)
    }

    /// The node owning `key` together with the index of its virtual position
    /// in the sorted index. `None` if the ring is empty.
    ///
    /// Walks clockwise to the first virtual position at or after the hashed
    /// key; a key hashing past the largest stored position wraps around to
    /// the smallest (index 0). The keyspace is circular, never linear.
    pub fn locate_with_position(&self, key: &[u8]) -> Option<(&NodeId, usize)> {
        if self.sorted_positions.is_empty() {
            return None;
        }
        let target = self.partitioner.position(key);
        let index = self.first_at_or_after(target);
        let position = self.sorted_positions[index];
        self.ring.get(&position).map(|node| (node, index))
    }

    /// Candidate nodes for `key` in ring order, as an endless iterator.
    ///
    /// Starts at the position that owns `key` and walks the sorted index
    /// forward, wrapping at the end and continuing indefinitely. Intended for
    /// client-side failover: take nodes until a healthy one answers, and
    /// always bound consumption (`take`, or [`unique_candidates`]). On an
    /// empty ring the iterator is immediately exhausted rather than spinning.
    ///
    /// Each call starts an independent cursor; two walks over an unchanged
    /// ring yield the same sequence.
    ///
    /// [`unique_candidates`]: HashRing::unique_candidates
    pub fn candidates(&self, key: &[u8]) -> Candidates<'_, P> {
        let cursor = self.locate_with_position(key).map(|(_, index)| index);
        Candidates { ring: self, cursor }
    }

    /// The first `count` distinct nodes in candidate order for `key`.
    ///
    /// Bounded to one full lap of the ring, so fewer than `count` nodes are
    /// returned when the ring has fewer distinct members.
    pub fn unique_candidates(&self, key: &[u8], count: usize) -> Vec<NodeId> {
        let mut unique: Vec<NodeId> = Vec::with_capacity(count.min(self.position_count()));
        for node in self.candidates(key).take(self.position_count()) {
            if unique.len() >= count {
                break;
            }
            if !unique.iter().any(|seen| seen == node) {
                unique.push(node.clone());
            }
        }
        unique
    }

    /// True if `node` currently owns all of its virtual positions.
    pub fn contains_node(&self, node: impl Into<NodeId>) -> bool {
        let node = node.into();
        self.node_positions(&node)
            .iter()
            .all(|position| self.ring.get(position) == Some(&node))
    }

    /// Number of virtual positions per node.
    pub fn replicas(&self) -> usize {
        self.replicas
    }

    /// Total number of virtual positions currently on the ring.
    pub fn position_count(&self) -> usize {
        self.sorted_positions.len()
    }

    /// True if no node is on the ring.
    pub fn is_empty(&self) -> bool {
        self.sorted_positions.is_empty()
    }

    /// All virtual positions, ascending.
    pub fn positions(&self) -> &[RingPosition] {
        &self.sorted_positions
    }

    /// The distinct member nodes, in identifier order.
    pub fn nodes(&self) -> Vec<NodeId> {
        let unique: BTreeSet<&NodeId> = self.ring.values().collect();
        unique.into_iter().cloned().collect()
    }

    /// The owner of each virtual position, in ring order.
    pub fn owners(&self) -> impl Iterator<Item = (RingPosition, &NodeId)> {
        self.sorted_positions
            .iter()
            .filter_map(|position| self.ring.get(position).map(|node| (*position, node)))
    }

    /// Name of the partitioner hashing keys onto this ring.
    pub fn partitioner_name(&self) -> &'static str {
        self.partitioner.name()
    }

    /// Position of the `index`-th virtual node of `node`.
    fn vnode_position(&self, node: &str, index: usize) -> RingPosition {
        self.partitioner
            .position(format!("{}:{}", node, index).as_bytes())
    }

    /// Index of the first stored position `>= target`, wrapping to 0 when
    /// `target` lies past the end. Ring must be non-empty.
    fn first_at_or_after(&self, target: RingPosition) -> usize {
        match self.sorted_positions.binary_search(&target) {
            Ok(index) => index,
            Err(index) if index == self.sorted_positions.len() => 0,
            Err(index) => index,
        }
    }
}

/// Endless clockwise walk over a ring's nodes, starting at a key's owner.
///
/// Created by [`HashRing::candidates`]. Holds a shared borrow of the ring, so
/// membership cannot change mid-walk.
#[derive(Clone, Debug)]
pub struct Candidates<'a, P: Partitioner = Xxh3Partitioner> {
    ring: &'a HashRing<P>,
    /// Next index into the sorted position index; `None` on an empty ring.
    cursor: Option<usize>,
}

impl<'a, P: Partitioner> Iterator for Candidates<'a, P> {
    type Item = &'a NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.cursor?;
        let position = self.ring.sorted_positions[index];
        self.cursor = Some((index + 1) % self.ring.sorted_positions.len());
        self.ring.ring.get(&position)
    }
}

/// Builder for a [`HashRing`].
///
/// # Example
///
/// ```rust
/// use ringcore::ring::RingBuilder;
///
/// let ring = RingBuilder::new()
///     .replicas(8)
///     .node("cache-01")
///     .node("cache-02")
///     .build();
/// assert_eq!(ring.position_count(), 16);
/// ```
#[derive(Clone, Debug)]
pub struct RingBuilder<P: Partitioner = Xxh3Partitioner> {
    replicas: usize,
    nodes: Vec<NodeId>,
    partitioner: P,
}

impl RingBuilder {
    pub fn new() -> Self {
        Self {
            replicas: DEFAULT_REPLICAS,
            nodes: Vec::new(),
            partitioner: Xxh3Partitioner,
        }
    }
}

impl Default for RingBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Partitioner> RingBuilder<P> {
    /// Virtual positions per node (default [`DEFAULT_REPLICAS`]).
    pub fn replicas(mut self, replicas: usize) -> Self {
        self.replicas = replicas;
        self
    }

    /// Add one initial node.
    pub fn node(mut self, node: impl Into<NodeId>) -> Self {
        self.nodes.push(node.into());
        self
    }

    /// Add several initial nodes, preserving input order.
    pub fn nodes<I, N>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<NodeId>,
    {
        self.nodes.extend(nodes.into_iter().map(Into::into));
        self
    }

    /// Swap in a different partitioner.
    pub fn partitioner<Q: Partitioner>(self, partitioner: Q) -> RingBuilder<Q> {
        RingBuilder {
            replicas: self.replicas,
            nodes: self.nodes,
            partitioner,
        }
    }

    pub fn build(self) -> HashRing<P> {
        let mut ring = HashRing::with_partitioner(self.partitioner, self.replicas);
        for node in self.nodes {
            ring.add_node(node);
        }
        ring
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Ring with hand-placed positions, bypassing the hash, so lookup edge
    /// cases can be pinned to exact values.
    fn ring_at(positions: &[(u128, &str)]) -> HashRing {
        let mut ring = HashRing::new();
        for (raw, owner) in positions {
            let position = RingPosition(*raw);
            ring.ring.insert(position, NodeId::from(*owner));
            ring.sorted_positions.push(position);
        }
        ring.sorted_positions.sort_unstable();
        ring
    }

    #[test]
    fn test_first_at_or_after_exact_hit() {
        let ring = ring_at(&[(100, "a"), (200, "b")]);
        assert_eq!(ring.first_at_or_after(RingPosition(200)), 1);
    }

    #[test]
    fn test_first_at_or_after_between_positions() {
        let ring = ring_at(&[(100, "a"), (200, "b")]);
        assert_eq!(ring.first_at_or_after(RingPosition(150)), 1);
        assert_eq!(ring.first_at_or_after(RingPosition(50)), 0);
    }

    #[test]
    fn test_first_at_or_after_wraps_to_zero() {
        let ring = ring_at(&[(100, "a"), (200, "b")]);
        assert_eq!(ring.first_at_or_after(RingPosition(201)), 0);
        assert_eq!(ring.first_at_or_after(RingPosition::MAX), 0);
    }

    #[test]
    fn test_candidates_walk_wraps() {
        let ring = ring_at(&[(100, "a"), (200, "b"), (300, "c")]);
        let mut walk = Candidates {
            ring: &ring,
            cursor: Some(1),
        };
        let seen: Vec<String> = walk.by_ref().take(5).map(|n| n.to_string()).collect();
        assert_eq!(seen, ["b", "c", "a", "b", "c"]);
    }

    #[test]
    fn test_candidates_empty_ring_exhausts_immediately() {
        let ring = HashRing::new();
        let mut walk = ring.candidates(b"anything");
        assert!(walk.next().is_none());
        assert!(walk.next().is_none());
    }

    #[test]
    fn test_readd_leaves_ring_unchanged() {
        let mut ring = HashRing::new();
        ring.add_node("a");
        let positions = ring.sorted_positions.clone();
        ring.add_node("a");
        assert_eq!(ring.sorted_positions, positions);
        assert_eq!(ring.ring.len(), positions.len());
    }

    #[test]
    fn test_index_matches_mapping_membership() {
        let mut ring = HashRing::new();
        for node in ["a", "b", "c"] {
            ring.add_node(node);
        }
        ring.remove_node("b").unwrap();
        let mut mapped: Vec<RingPosition> = ring.ring.keys().copied().collect();
        mapped.sort_unstable();
        assert_eq!(mapped, ring.sorted_positions);
    }
}
