use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Identifies a level node. The string comes straight from the world file
/// (`"1-1"`, `"1-Castle"`, ...) and is unique within a graph.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Canonical key of an undirected path. The two endpoints are stored in
/// sorted order so `A -> B` and `B -> A` map to the same key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PathKey {
    low: NodeId,
    high: NodeId,
}

impl PathKey {
    pub fn new(a: NodeId, b: NodeId) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    /// Both endpoints, lower id first.
    pub fn endpoints(&self) -> (&NodeId, &NodeId) {
        (&self.low, &self.high)
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        &self.low == id || &self.high == id
    }

    /// The endpoint opposite `id`, or `None` if `id` is not on this path.
    pub fn other(&self, id: &NodeId) -> Option<&NodeId> {
        if &self.low == id {
            Some(&self.high)
        } else if &self.high == id {
            Some(&self.low)
        } else {
            None
        }
    }
}

impl fmt::Display for PathKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}<->{}", self.low, self.high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_key_is_direction_independent() {
        let forward = PathKey::new(NodeId::from("1-1"), NodeId::from("1-2"));
        let backward = PathKey::new(NodeId::from("1-2"), NodeId::from("1-1"));
        assert_eq!(forward, backward);
        assert_eq!(forward.endpoints().0.as_str(), "1-1");
    }

    #[test]
    fn path_key_other_endpoint() {
        let key = PathKey::new(NodeId::from("b"), NodeId::from("a"));
        assert_eq!(key.other(&NodeId::from("a")), Some(&NodeId::from("b")));
        assert_eq!(key.other(&NodeId::from("b")), Some(&NodeId::from("a")));
        assert_eq!(key.other(&NodeId::from("c")), None);
        assert!(key.contains(&NodeId::from("a")));
    }

    #[test]
    fn node_id_serializes_as_plain_string() {
        let id = NodeId::from("1-Castle");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"1-Castle\"");
    }
}
