//! Core partitioner trait definition.

use crate::ring::position::RingPosition;

/// A partitioner converts keys into positions on the hash ring.
///
/// Partitioners are stateless and thread-safe, allowing concurrent position
/// generation without synchronization overhead. They must be deterministic
/// across process runs (no randomized seed): independent clients with
/// identical membership have to agree on placement without coordination.
pub trait Partitioner: Send + Sync + 'static {
    /// Converts a key into a position on the ring.
    fn position(&self, key: &[u8]) -> RingPosition;

    /// Returns the name of this partitioner.
    fn name(&self) -> &'static str;
}
