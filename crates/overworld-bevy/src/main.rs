mod animation;
mod camera;
mod rendering;
mod scenery;
mod state;
mod ui;

use std::path::PathBuf;

use bevy::prelude::*;

fn main() -> AppExit {
    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(overworld_data::BUNDLED_WORLD));

    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Overworld".into(),
            resolution: (1280.0, 720.0).into(),
            ..default()
        }),
        ..default()
    }));

    // Loaded after DefaultPlugins so configuration warnings reach the log.
    match state::MapState::load(&path) {
        Ok(map) => {
            app.insert_resource(map);
        }
        Err(err) => {
            error!(file = %path.display(), %err, "failed to load world");
            return AppExit::error();
        }
    }

    app.init_state::<AppState>()
        .configure_sets(
            Update,
            (MapSet::Input, MapSet::Advance, MapSet::Present)
                .chain()
                .run_if(in_state(AppState::Playing)),
        )
        .add_plugins((
            state::StatePlugin,
            camera::CameraPlugin,
            scenery::SceneryPlugin,
            ui::UiPlugin,
            rendering::RenderingPlugin,
            animation::AnimationPlugin,
        ))
        .run()
}

#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AppState {
    #[default]
    Menu,
    Playing,
}

/// Per-frame ordering while the map is on screen: clicks reach the
/// controller, the controller advances and its output is turned into
/// tweens, then transforms and UI are written.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum MapSet {
    Input,
    Advance,
    Present,
}
