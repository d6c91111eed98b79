//! Node identifiers for the consistent hash ring.
//!
//! Nodes represent physical backends (cache shards, storage servers). The ring
//! never interprets their internal structure; only the textual representation
//! matters, because it is what gets hashed onto the ring.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Opaque, stably-comparable identifier for a node.
///
/// Newtype over `Arc<str>` so the ring can hold one copy per virtual position
/// without duplicating the backing string. Heavy per-node state (connections,
/// health, metrics) should live elsewhere, keyed by this id.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct NodeId(Arc<str>);

impl NodeId {
    pub fn new(id: impl AsRef<str>) -> Self {
        NodeId(Arc::from(id.as_ref()))
    }

    /// The textual representation that is hashed onto the ring.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        NodeId::new(s)
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        NodeId(Arc::from(s))
    }
}

impl From<&NodeId> for NodeId {
    fn from(id: &NodeId) -> Self {
        id.clone()
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for NodeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for NodeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(NodeId::from(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_display_matches_input() {
        let id = NodeId::new("cache-01");
        assert_eq!(id.to_string(), "cache-01");
        assert_eq!(id.as_str(), "cache-01");
    }

    #[test]
    fn test_node_id_equality() {
        assert_eq!(NodeId::from("a"), NodeId::new(String::from("a")));
        assert_ne!(NodeId::from("a"), NodeId::from("b"));
    }
}
