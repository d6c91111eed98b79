//! Error types for the core library.

use crate::node::NodeId;

/// Result type alias for the core library.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the core library.
///
/// Lookups against an empty ring are not errors; they return `None`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Removal was requested for a node whose virtual positions are not all
    /// present on the ring (never added, already removed, or lost to a
    /// collision overwrite). The ring is left untouched.
    #[error("node not found on ring: {0}")]
    NodeNotFound(NodeId),
}
