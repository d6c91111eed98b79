//! Consistent hash ring.
//!
//! The ring manages virtual positions and provides the lookup operations
//! that decide which node is responsible for a key.

pub mod position;
pub mod ring;

pub use position::RingPosition;
pub use ring::{Candidates, HashRing, RingBuilder, DEFAULT_REPLICAS};
