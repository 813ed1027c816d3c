use serde::{Deserialize, Serialize};

use crate::id::{NodeId, PathKey};
use crate::node::NodeState;

/// An undirected connector between two level nodes. Created once while the
/// graph is built; its visual tier is derived from the endpoints on demand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelPath {
    key: PathKey,
    /// Positions of `key.endpoints()`, in the same order.
    positions: ([f32; 3], [f32; 3]),
}

impl LevelPath {
    pub(crate) fn new(key: PathKey, positions: ([f32; 3], [f32; 3])) -> Self {
        Self { key, positions }
    }

    pub fn key(&self) -> &PathKey {
        &self.key
    }

    pub fn endpoints(&self) -> (&NodeId, &NodeId) {
        self.key.endpoints()
    }

    pub fn positions(&self) -> ([f32; 3], [f32; 3]) {
        self.positions
    }
}

/// Endpoint facts a path tier is derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub state: NodeState,
    pub is_current: bool,
}

impl Endpoint {
    pub fn new(state: NodeState, is_current: bool) -> Self {
        Self { state, is_current }
    }
}

/// Visual classification of a path, brightest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PathTier {
    /// Both ends open and one of them is the current node.
    Highlighted,
    /// Both ends unlocked, neither current.
    Open,
    /// Both ends open with at least one completed, neither current.
    Established,
    /// One end locked, the other open: the next reachable branch.
    Frontier,
    /// Both ends locked.
    Hidden,
}

impl PathTier {
    pub fn classify(a: Endpoint, b: Endpoint) -> Self {
        match (a.state.is_open(), b.state.is_open()) {
            (true, true) if a.is_current || b.is_current => PathTier::Highlighted,
            (true, true) => {
                if a.state == NodeState::Unlocked && b.state == NodeState::Unlocked {
                    PathTier::Open
                } else {
                    PathTier::Established
                }
            }
            (true, false) | (false, true) => PathTier::Frontier,
            (false, false) => PathTier::Hidden,
        }
    }

    /// Both endpoints are open.
    pub fn is_active(self) -> bool {
        matches!(
            self,
            PathTier::Highlighted | PathTier::Open | PathTier::Established
        )
    }

    pub fn is_visible(self) -> bool {
        self != PathTier::Hidden
    }
}
