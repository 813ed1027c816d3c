use std::path::Path;

use bevy::prelude::*;
use overworld_core::{ConfigIssue, NodeId, ProgressionController};
use overworld_data::{DataLoadError, load_world};

pub struct StatePlugin;

impl Plugin for StatePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HoveredLevel>()
            .add_event::<MapNotice>();
    }
}

/// The loaded world and its progression controller.
#[derive(Resource)]
pub struct MapState {
    pub map: ProgressionController,
    pub title: String,
    pub description: String,
    pub issues: Vec<ConfigIssue>,
}

impl MapState {
    pub fn load(path: &Path) -> Result<Self, DataLoadError> {
        let world = load_world(path)?;
        let title = world.title.clone();
        let description = world.description.clone();
        let (map, issues) = world.into_controller()?;
        info!(
            %title,
            levels = map.graph().node_count(),
            issues = issues.len(),
            "map ready"
        );
        Ok(Self {
            map,
            title,
            description,
            issues,
        })
    }
}

/// The level under the cursor, if any.
#[derive(Resource, Default)]
pub struct HoveredLevel {
    pub id: Option<NodeId>,
}

/// A line of player-facing feedback ("Moved to: World 1-2").
#[derive(Event, Debug, Clone)]
pub struct MapNotice(pub String);
