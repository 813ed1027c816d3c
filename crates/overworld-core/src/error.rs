use crate::id::NodeId;

/// Non-fatal problems found while building a [`crate::graph::LevelGraph`]
/// or checking a [`crate::visual::VisualStyle`]. The offending record or
/// value is skipped (or repaired) and the build carries on.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigIssue {
    #[error("node '{from}' unlocks non-existent node '{to}'")]
    DanglingUnlock { from: NodeId, to: NodeId },

    #[error("node '{node}' lists itself in its unlocks")]
    SelfUnlock { node: NodeId },

    #[error("duplicate node id '{id}'; later record ignored")]
    DuplicateNode { id: NodeId },

    #[error("record #{index} has an empty id")]
    EmptyId { index: usize },

    #[error("node '{node}' has unknown color '{color}'; using gray")]
    UnknownColor { node: NodeId, color: String },

    #[error("no node starts unlocked; forcing '{node}' open")]
    ForcedStart { node: NodeId },

    #[error("highlighted path thickness {thickness} is not positive; using {used}")]
    HighlightedThickness { thickness: f32, used: f32 },

    #[error(
        "{tier} path thickness {thickness} is not below the highlighted {highlighted}; using {used}"
    )]
    PathThickness {
        tier: &'static str,
        thickness: f32,
        highlighted: f32,
        used: f32,
    },
}

/// Why a click did not move the player. Purely a feedback signal: the
/// controller state is untouched when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClickRejection {
    #[error("{0} is locked")]
    Locked(NodeId),

    #[error("cannot reach {target} from {from}")]
    Unreachable { from: NodeId, target: NodeId },

    #[error("no level named {0}")]
    UnknownNode(NodeId),
}

/// Errors from constructing or directly driving a controller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProgressionError {
    #[error("level graph has no nodes")]
    EmptyGraph,

    #[error("node not found: {0}")]
    UnknownNode(NodeId),
}
