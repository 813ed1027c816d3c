use serde::{Deserialize, Serialize};
use std::fmt;

use crate::color::Rgba;
use crate::config::{InitialState, NodeConfig};
use crate::id::NodeId;

/// Progress state of a level node. Ordered: a node only ever moves forward
/// through `Locked < Unlocked < Completed`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum NodeState {
    #[default]
    Locked,
    Unlocked,
    Completed,
}

impl NodeState {
    pub fn is_locked(self) -> bool {
        self == NodeState::Locked
    }

    /// Unlocked or completed.
    pub fn is_open(self) -> bool {
        !self.is_locked()
    }

    pub fn label(self) -> &'static str {
        match self {
            NodeState::Locked => "Locked",
            NodeState::Unlocked => "Unlocked",
            NodeState::Completed => "Completed",
        }
    }
}

impl fmt::Display for NodeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<InitialState> for NodeState {
    fn from(s: InitialState) -> Self {
        match s {
            InitialState::Locked => NodeState::Locked,
            InitialState::Unlocked => NodeState::Unlocked,
        }
    }
}

/// A level on the map: static identity plus its mutable progress state.
///
/// State only changes through [`LevelNode::unlock`] and
/// [`LevelNode::complete`], both of which refuse to move backwards. The
/// node holds no renderer handle; renderers key their objects by [`NodeId`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelNode {
    id: NodeId,
    name: String,
    position: [f32; 3],
    base_color: Rgba,
    unlocks: Vec<NodeId>,
    state: NodeState,
    is_bonus: bool,
    is_castle: bool,
    /// `"<id>: <name>\nState: <Label>"`, kept in step with `state`.
    status_text: String,
}

impl LevelNode {
    pub(crate) fn from_config(cfg: &NodeConfig, base_color: Rgba) -> Self {
        let mut node = Self {
            id: cfg.id.clone(),
            name: cfg.name.clone(),
            position: cfg.position,
            base_color,
            unlocks: cfg.unlocks.clone(),
            state: cfg.initial_state.into(),
            is_bonus: cfg.is_bonus(),
            is_castle: cfg.is_castle(),
            status_text: String::new(),
        };
        node.refresh_status();
        node
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> [f32; 3] {
        self.position
    }

    pub fn base_color(&self) -> Rgba {
        self.base_color
    }

    pub fn unlocks(&self) -> &[NodeId] {
        &self.unlocks
    }

    pub fn state(&self) -> NodeState {
        self.state
    }

    pub fn is_bonus(&self) -> bool {
        self.is_bonus
    }

    pub fn is_castle(&self) -> bool {
        self.is_castle
    }

    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    /// `Locked -> Unlocked`. Returns whether the state changed.
    pub(crate) fn unlock(&mut self) -> bool {
        self.advance(NodeState::Locked, NodeState::Unlocked)
    }

    /// `Unlocked -> Completed`. Returns whether the state changed.
    pub(crate) fn complete(&mut self) -> bool {
        self.advance(NodeState::Unlocked, NodeState::Completed)
    }

    fn advance(&mut self, from: NodeState, to: NodeState) -> bool {
        if self.state != from {
            return false;
        }
        self.state = to;
        self.refresh_status();
        true
    }

    fn refresh_status(&mut self) {
        self.status_text = format!("{}: {}\nState: {}", self.id, self.name, self.state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(state: InitialState) -> LevelNode {
        let mut cfg = NodeConfig::new("1-2", "World 1-2").color("green");
        cfg.initial_state = state;
        LevelNode::from_config(&cfg, Rgba::rgb(0.0, 1.0, 0.0))
    }

    #[test]
    fn state_order_is_forward_progress() {
        assert!(NodeState::Locked < NodeState::Unlocked);
        assert!(NodeState::Unlocked < NodeState::Completed);
    }

    #[test]
    fn unlock_then_complete() {
        let mut n = node(InitialState::Locked);
        assert_eq!(n.status_text(), "1-2: World 1-2\nState: Locked");

        assert!(n.unlock());
        assert_eq!(n.state(), NodeState::Unlocked);
        assert_eq!(n.status_text(), "1-2: World 1-2\nState: Unlocked");

        assert!(n.complete());
        assert_eq!(n.state(), NodeState::Completed);
        assert_eq!(n.status_text(), "1-2: World 1-2\nState: Completed");
    }

    #[test]
    fn transitions_never_regress_or_skip() {
        let mut locked = node(InitialState::Locked);
        assert!(!locked.complete(), "locked node cannot jump to completed");
        assert_eq!(locked.state(), NodeState::Locked);

        let mut done = node(InitialState::Unlocked);
        done.complete();
        assert!(!done.unlock());
        assert!(!done.complete());
        assert_eq!(done.state(), NodeState::Completed);
        assert_eq!(done.status_text(), "1-2: World 1-2\nState: Completed");
    }

    #[test]
    fn classification_comes_from_config() {
        let cfg = NodeConfig::new("1-A", "World 1-A (Bonus)").color("gold");
        let n = LevelNode::from_config(&cfg, Rgba::GOLD);
        assert!(n.is_bonus());
        assert!(!n.is_castle());
    }
}
