//! Partitioner abstraction for consistent hashing.
//!
//! Partitioners are responsible for converting keys into ring positions.

pub mod traits;
pub mod xxh3;

pub use traits::Partitioner;
pub use xxh3::Xxh3Partitioner;
