use serde::{Deserialize, Serialize};

use crate::color::ColorSpec;
use crate::id::NodeId;

/// State a node starts the session in. Only the two entry states are
/// configurable; `completed` is always earned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitialState {
    #[default]
    Locked,
    Unlocked,
}

/// One level record of a world file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeConfig {
    pub id: NodeId,
    pub name: String,
    /// World-space position; only used for path geometry.
    pub position: [f32; 3],
    pub color: ColorSpec,
    /// Node ids this level enables when the player arrives on it.
    #[serde(default)]
    pub unlocks: Vec<NodeId>,
    #[serde(default)]
    pub initial_state: InitialState,
    /// Overrides the gold-color bonus detection.
    #[serde(default)]
    pub bonus: Option<bool>,
    /// Overrides the `Castle`-in-id detection.
    #[serde(default)]
    pub castle: Option<bool>,
}

impl NodeConfig {
    pub fn new(id: impl Into<NodeId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            position: [0.0, 0.5, 0.0],
            color: ColorSpec::from("white"),
            unlocks: Vec::new(),
            initial_state: InitialState::Locked,
            bonus: None,
            castle: None,
        }
    }

    pub fn at(mut self, x: f32, y: f32, z: f32) -> Self {
        self.position = [x, y, z];
        self
    }

    pub fn color(mut self, color: impl Into<ColorSpec>) -> Self {
        self.color = color.into();
        self
    }

    pub fn unlocks<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<NodeId>,
    {
        self.unlocks = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn unlocked(mut self) -> Self {
        self.initial_state = InitialState::Unlocked;
        self
    }

    /// Bonus classification: explicit override, else gold identity color.
    pub fn is_bonus(&self) -> bool {
        self.bonus.unwrap_or_else(|| self.color.is_gold())
    }

    /// Castle classification: explicit override, else `Castle` in the id.
    pub fn is_castle(&self) -> bool {
        self.castle
            .unwrap_or_else(|| self.id.as_str().contains("Castle"))
    }
}
