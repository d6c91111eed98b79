//! Ring position type.
//!
//! Positions are points in the circular 128-bit keyspace. Both virtual nodes
//! and looked-up keys are mapped into this space; ordering over it is what the
//! sorted index binary-searches.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A position on the consistent hash ring.
///
/// Newtype over `u128` covering the full output space of the 128-bit key hash.
/// Positions are immutable, comparable, and cheap to copy.
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize,
)]
pub struct RingPosition(pub u128);

impl RingPosition {
    /// Minimum position (start of the ring).
    pub const ZERO: RingPosition = RingPosition(0);

    /// Maximum position (end of the ring, immediately before wrap-around).
    pub const MAX: RingPosition = RingPosition(u128::MAX);

    /// Clockwise distance from `self` to `other`.
    ///
    /// The ring is circular: when `other` sits behind `self` numerically, the
    /// distance runs forward through the wrap-around point.
    pub fn distance_to(&self, other: &RingPosition) -> RingPosition {
        if other.0 >= self.0 {
            RingPosition(other.0 - self.0)
        } else {
            RingPosition((u128::MAX - self.0) + other.0 + 1)
        }
    }
}

impl fmt::Display for RingPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", self.0)
    }
}

impl From<u128> for RingPosition {
    fn from(raw: u128) -> Self {
        RingPosition(raw)
    }
}

impl From<RingPosition> for u128 {
    fn from(position: RingPosition) -> Self {
        position.0
    }
}
