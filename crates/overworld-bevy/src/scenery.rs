//! Static dressing around the map: sky, ground and lights.

use bevy::prelude::*;

use crate::AppState;
use crate::rendering::SceneEntity;

const SKY: Color = Color::srgb(0.53, 0.81, 0.92);
const GROUND: Color = Color::srgb(0.36, 0.62, 0.3);

pub struct SceneryPlugin;

impl Plugin for SceneryPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(SKY))
            .insert_resource(AmbientLight {
                color: Color::WHITE,
                brightness: 400.0,
            })
            .add_systems(OnEnter(AppState::Playing), spawn_scenery);
    }
}

fn spawn_scenery(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(40.0, 40.0))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: GROUND,
            perceptual_roughness: 1.0,
            ..default()
        })),
        Transform::from_xyz(0.0, -0.05, 0.0),
        SceneEntity,
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 8_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 10.0, -6.0).looking_at(Vec3::ZERO, Vec3::Y),
        SceneEntity,
    ));
}
