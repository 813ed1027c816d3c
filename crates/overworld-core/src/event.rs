use crate::error::ClickRejection;
use crate::id::NodeId;

/// Events emitted by the progression controller, drained by the caller
/// (usually to surface toasts and logs).
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressionEvent {
    /// The player moved onto a new node.
    Moved {
        from: Option<NodeId>,
        to: NodeId,
        name: String,
    },

    /// The player clicked the node they are already on.
    LevelEntered { node: NodeId, name: String },

    /// A node went from locked to unlocked.
    NodeUnlocked { node: NodeId },

    /// A node was vacated and marked completed.
    NodeCompleted { node: NodeId },

    /// A click was refused. No state changed.
    MoveRejected { reason: ClickRejection },
}

impl ProgressionEvent {
    /// Short on-screen text for events that deserve a notification.
    pub fn notification(&self) -> Option<String> {
        match self {
            ProgressionEvent::Moved { name, .. } => Some(format!("Moved to: {name}")),
            ProgressionEvent::LevelEntered { name, .. } => {
                Some(format!("Entering Level: {name}"))
            }
            ProgressionEvent::MoveRejected { reason } => Some(reason.to_string()),
            ProgressionEvent::NodeUnlocked { .. } | ProgressionEvent::NodeCompleted { .. } => None,
        }
    }
}
