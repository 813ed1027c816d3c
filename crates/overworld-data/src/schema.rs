//! Serde data file structs for world definitions.
//!
//! A world file holds a title, optional session settings and the level
//! records. It is deserialized from RON, JSON or TOML and then turned into
//! a ready [`ProgressionController`] by [`WorldFile::into_controller`].

use serde::{Deserialize, Serialize};

use overworld_core::animation::AnimationTuning;
use overworld_core::config::NodeConfig;
use overworld_core::visual::VisualStyle;
use overworld_core::{ConfigIssue, LevelGraph, MovementPolicy, ProgressionController};

use crate::loader::DataLoadError;

// ===========================================================================
// World file
// ===========================================================================

/// One map as written on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldFile {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub settings: WorldSettings,
    pub nodes: Vec<NodeConfig>,
}

/// Session knobs. Every field falls back to the built-in default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldSettings {
    pub movement_policy: MovementPolicy,
    pub style: VisualStyle,
    pub tuning: AnimationTuning,
}

impl WorldFile {
    /// Build the level graph and place the player on its start node.
    ///
    /// Configuration issues are returned alongside the controller; the only
    /// failure is a world with no usable level at all.
    pub fn into_controller(
        self,
    ) -> Result<(ProgressionController, Vec<ConfigIssue>), DataLoadError> {
        let (graph, mut issues) = LevelGraph::build(&self.nodes);

        let WorldSettings {
            movement_policy,
            mut style,
            tuning,
        } = self.settings;
        issues.extend(style.sanitize());

        // Construction only fails on an empty graph.
        let controller = ProgressionController::new(graph, movement_policy, style, tuning)
            .map_err(|_| DataLoadError::EmptyWorld { title: self.title })?;
        Ok((controller, issues))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use overworld_core::test_utils::world_one;

    #[test]
    fn settings_default_to_strict_adjacency() {
        let settings = WorldSettings::default();
        assert_eq!(settings.movement_policy, MovementPolicy::StrictAdjacency);
        assert_eq!(settings.tuning, AnimationTuning::default());
    }

    #[test]
    fn into_controller_applies_settings() {
        let world = WorldFile {
            title: "World 1".to_string(),
            description: String::new(),
            settings: WorldSettings {
                movement_policy: MovementPolicy::FreeRoam,
                ..WorldSettings::default()
            },
            nodes: world_one(),
        };
        let (controller, issues) = world.into_controller().unwrap();
        assert!(issues.is_empty());
        assert_eq!(controller.policy(), MovementPolicy::FreeRoam);
        assert_eq!(controller.current().as_str(), "1-1");
    }

    #[test]
    fn oversized_path_tiers_are_reported_and_repaired() {
        let mut settings = WorldSettings::default();
        settings.style.frontier_path.thickness = 20.0;
        let world = WorldFile {
            title: "World 1".to_string(),
            description: String::new(),
            settings,
            nodes: world_one(),
        };
        let (controller, issues) = world.into_controller().unwrap();
        assert!(matches!(
            issues.as_slice(),
            [ConfigIssue::PathThickness { tier: "frontier", .. }]
        ));
        let style = controller.style();
        assert!(style.frontier_path.thickness < style.highlighted_path.thickness);
    }

    #[test]
    fn world_without_usable_levels_is_rejected() {
        let world = WorldFile {
            title: "Void".to_string(),
            description: String::new(),
            settings: WorldSettings::default(),
            nodes: vec![NodeConfig::new("", "Nameless")],
        };
        assert!(matches!(
            world.into_controller(),
            Err(DataLoadError::EmptyWorld { title }) if title == "Void"
        ));
    }
}
