//! xxh3-based partitioner (the default).

use xxhash_rust::xxh3::xxh3_128;

use crate::partitioner::traits::Partitioner;
use crate::ring::position::RingPosition;

/// Partitioner hashing keys with unseeded 128-bit xxh3.
///
/// Not cryptographic, but well-distributed over the full `u128` space and
/// stable across runs and architectures, which is all the ring needs.
#[derive(Clone, Copy, Debug, Default)]
pub struct Xxh3Partitioner;

impl Partitioner for Xxh3Partitioner {
    fn position(&self, key: &[u8]) -> RingPosition {
        RingPosition(xxh3_128(key))
    }

    fn name(&self) -> &'static str {
        "Xxh3Partitioner"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic_across_calls() {
        let p = Xxh3Partitioner;
        assert_eq!(p.position(b"shard-key"), p.position(b"shard-key"));
    }

    #[test]
    fn test_different_keys_differ() {
        let p = Xxh3Partitioner;
        assert_ne!(p.position(b"a"), p.position(b"b"));
    }
}
