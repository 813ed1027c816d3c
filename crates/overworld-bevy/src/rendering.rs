use bevy::prelude::*;
use overworld_core::animation::Easing;
use overworld_core::color::Rgba;
use overworld_core::visual::RenderDirectives;
use overworld_core::{ClickOutcome, NodeId, PathKey};

use crate::animation::ScaleTween;
use crate::camera::MainCamera;
use crate::state::{HoveredLevel, MapState};
use crate::{AppState, MapSet};

pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AppliedDirectives>()
            .add_systems(OnEnter(AppState::Playing), spawn_map_entities)
            .add_systems(OnExit(AppState::Playing), despawn_map_entities)
            .add_systems(Update, (hover_level, handle_level_click).in_set(MapSet::Input))
            .add_systems(
                Update,
                apply_directives
                    .in_set(MapSet::Advance)
                    .before(crate::animation::apply_animation_requests),
            );
    }
}

/// Anything spawned for the map view; cleared when leaving it.
#[derive(Component)]
pub struct SceneEntity;

#[derive(Component)]
pub struct LevelEntity {
    pub id: NodeId,
    /// Configured position; bob and shake offsets are added on top.
    pub home: Vec3,
}

#[derive(Component)]
pub struct PathEntity {
    pub key: PathKey,
    pub length: f32,
}

const NODE_RADIUS: f32 = 0.5;
/// World units of path width per directive thickness unit.
const PATH_WIDTH: f32 = 0.02;
const PATH_DROP: f32 = 0.2;

pub fn to_color(c: Rgba) -> Color {
    Color::srgba(c.r, c.g, c.b, c.a)
}

fn spawn_map_entities(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    state: Res<MapState>,
    mut last_applied: ResMut<AppliedDirectives>,
) {
    let map = &state.map;
    let directives = map.directives();
    let sphere = meshes.add(Sphere::new(NODE_RADIUS).mesh().uv(32, 18));
    let cube = meshes.add(Cuboid::new(1.0, 1.0, 1.0));
    let cone = meshes.add(Cone {
        radius: 0.35,
        height: 0.6,
    });
    let pole = meshes.add(Cuboid::new(0.03, 0.5, 0.03));
    let banner = meshes.add(Cuboid::new(0.25, 0.15, 0.02));
    let castle_roof = materials.add(Color::srgb(0.45, 0.45, 0.5));
    let flag = materials.add(Color::srgb(0.9, 0.1, 0.1));

    for node in map.graph().nodes() {
        let Some(directive) = directives.node(node.id()) else {
            continue;
        };
        let [x, y, z] = node.position();
        let home = Vec3::new(x, y, z);

        let mut level = commands.spawn((
            Mesh3d(sphere.clone()),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: to_color(directive.color),
                ..default()
            })),
            Transform::from_translation(home).with_scale(Vec3::splat(directive.scale)),
            visibility(directive.visible),
            LevelEntity {
                id: node.id().clone(),
                home,
            },
            SceneEntity,
        ));

        if node.is_castle() {
            level.with_children(|parent| {
                parent.spawn((
                    Mesh3d(cone.clone()),
                    MeshMaterial3d(castle_roof.clone()),
                    Transform::from_xyz(0.0, 0.65, 0.0),
                ));
                parent.spawn((
                    Mesh3d(pole.clone()),
                    MeshMaterial3d(castle_roof.clone()),
                    Transform::from_xyz(0.0, 1.15, 0.0),
                ));
                parent.spawn((
                    Mesh3d(banner.clone()),
                    MeshMaterial3d(flag.clone()),
                    Transform::from_xyz(0.14, 1.3, 0.0),
                ));
            });
        }
    }

    for path in map.graph().paths() {
        let Some(directive) = directives.path(path.key()) else {
            continue;
        };
        let (a, b) = path.positions();
        let (a, b) = (Vec3::from_array(a), Vec3::from_array(b));
        let span = b - a;
        let length = span.length();
        let rotation = Quat::from_rotation_arc(Vec3::X, span.try_normalize().unwrap_or(Vec3::X));
        let width = directive.thickness * PATH_WIDTH;

        commands.spawn((
            Mesh3d(cube.clone()),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: to_color(directive.color),
                unlit: true,
                ..default()
            })),
            Transform {
                translation: (a + b) / 2.0 - Vec3::Y * PATH_DROP,
                rotation,
                scale: Vec3::new(length, width, width),
            },
            visibility(directive.visible),
            PathEntity {
                key: path.key().clone(),
                length,
            },
            SceneEntity,
        ));
    }

    last_applied.0 = Some(directives.clone());
}

fn despawn_map_entities(
    mut commands: Commands,
    entities: Query<Entity, With<SceneEntity>>,
    mut last_applied: ResMut<AppliedDirectives>,
) {
    for entity in &entities {
        commands.entity(entity).despawn_recursive();
    }
    last_applied.0 = None;
}

fn visibility(visible: bool) -> Visibility {
    if visible {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    }
}

/// The directives the scene currently reflects.
#[derive(Resource, Default)]
pub struct AppliedDirectives(pub Option<RenderDirectives>);

/// Push changed directives onto the scene: colors and visibility at once,
/// node scale as a short tween.
fn apply_directives(
    mut commands: Commands,
    state: Res<MapState>,
    mut last_applied: ResMut<AppliedDirectives>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut levels: Query<(
        Entity,
        &LevelEntity,
        &Transform,
        &MeshMaterial3d<StandardMaterial>,
        &mut Visibility,
    )>,
    mut paths: Query<
        (
            &PathEntity,
            &mut Transform,
            &MeshMaterial3d<StandardMaterial>,
            &mut Visibility,
        ),
        Without<LevelEntity>,
    >,
) {
    let directives = state.map.directives();
    if last_applied.0.as_ref() == Some(directives) {
        return;
    }
    let previous = last_applied.0.take();
    let tween_seconds = state.map.tuning().scale_duration;

    for (entity, level, transform, material, mut vis) in &mut levels {
        let Some(d) = directives.node(&level.id) else {
            continue;
        };
        if previous.as_ref().and_then(|p| p.node(&level.id)) == Some(d) {
            continue;
        }
        if let Some(mat) = materials.get_mut(&material.0) {
            mat.base_color = to_color(d.color);
        }
        *vis = visibility(d.visible);
        commands.entity(entity).insert(ScaleTween::new(
            transform.scale.x,
            d.scale,
            tween_seconds,
            Easing::OutQuad,
        ));
    }

    for (path, mut transform, material, mut vis) in &mut paths {
        let Some(d) = directives.path(&path.key) else {
            continue;
        };
        if let Some(mat) = materials.get_mut(&material.0) {
            mat.base_color = to_color(d.color);
        }
        let width = d.thickness * PATH_WIDTH;
        transform.scale = Vec3::new(path.length, width, width);
        *vis = visibility(d.visible);
    }

    last_applied.0 = Some(directives.clone());
}

// -----------------------------------------------------------------------
// Picking
// -----------------------------------------------------------------------

/// Nearest level whose sphere the cursor ray hits. With `interactive_only`,
/// levels whose directive disables hit-testing are skipped.
fn pick_level(
    windows: &Query<&Window>,
    camera_q: &Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    levels: &Query<(&LevelEntity, &GlobalTransform)>,
    directives: &RenderDirectives,
    interactive_only: bool,
) -> Option<NodeId> {
    let window = windows.get_single().ok()?;
    let (camera, cam_transform) = camera_q.get_single().ok()?;
    let cursor = window.cursor_position()?;
    let ray = camera.viewport_to_world(cam_transform, cursor).ok()?;

    levels
        .iter()
        .filter_map(|(level, transform)| {
            let d = directives.node(&level.id)?;
            if !d.visible || (interactive_only && !d.interactive) {
                return None;
            }
            let (scale, _, center) = transform.to_scale_rotation_translation();
            let t = ray_sphere(ray.origin, *ray.direction, center, NODE_RADIUS * scale.x)?;
            Some((t, level.id.clone()))
        })
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, id)| id)
}

/// Distance along a unit-direction ray to its first hit on a sphere.
fn ray_sphere(origin: Vec3, dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let to_center = center - origin;
    let along = to_center.dot(dir);
    let miss_sq = to_center.length_squared() - along * along;
    let radius_sq = radius * radius;
    if miss_sq > radius_sq {
        return None;
    }
    let half_chord = (radius_sq - miss_sq).sqrt();
    let t = if along - half_chord >= 0.0 {
        along - half_chord
    } else {
        along + half_chord
    };
    (t >= 0.0).then_some(t)
}

fn hover_level(
    windows: Query<&Window>,
    camera_q: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    levels: Query<(&LevelEntity, &GlobalTransform)>,
    state: Res<MapState>,
    mut hovered: ResMut<HoveredLevel>,
) {
    let id = pick_level(&windows, &camera_q, &levels, state.map.directives(), false);
    if hovered.id != id {
        hovered.id = id;
    }
}

fn handle_level_click(
    mouse: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    camera_q: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    levels: Query<(&LevelEntity, &GlobalTransform)>,
    mut state: ResMut<MapState>,
) {
    if !mouse.just_pressed(MouseButton::Left) {
        return;
    }
    let Some(target) = pick_level(&windows, &camera_q, &levels, state.map.directives(), true)
    else {
        return;
    };

    match state.map.handle_click(&target) {
        Ok(ClickOutcome::Entered(id)) => info!(level = %id, "entering level"),
        Ok(ClickOutcome::Moved(report)) => debug!(
            from = %report.from,
            to = %report.to,
            unlocked = report.unlocked.len(),
            "moved"
        ),
        Err(reason) => debug!(%reason, "click refused"),
    }
}
