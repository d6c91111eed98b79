//! Core library for consistent hashing.
//!
//! This crate provides the fundamental pieces of a consistent-hash ring:
//! - Ring positions in a circular 128-bit keyspace
//! - Partitioner abstraction (key -> position hashing)
//! - Node identifiers
//! - The ring itself: membership changes, key lookup, candidate walks
//! - A lock-wrapped shared handle for multi-threaded use
//!
//! Failure detection of nodes, data migration on rebalance, transport, and
//! persistence are the caller's responsibility; the ring is a pure in-memory
//! placement structure.

pub mod error;
pub mod node;
pub mod partitioner;
pub mod ring;
pub mod shared;

pub use error::{Error, Result};
pub use node::NodeId;
pub use partitioner::{Partitioner, Xxh3Partitioner};
pub use ring::{Candidates, HashRing, RingBuilder, RingPosition, DEFAULT_REPLICAS};
pub use shared::SharedRing;
