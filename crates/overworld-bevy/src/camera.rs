use std::f32::consts::{FRAC_PI_4, PI};

use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;

use crate::AppState;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_camera).add_systems(
            Update,
            (camera_drag, camera_zoom, apply_rig)
                .chain()
                .run_if(in_state(AppState::Playing)),
        );
    }
}

#[derive(Component)]
pub struct MainCamera;

/// Orbit camera around a focus point on the ground.
#[derive(Component, Debug, Clone)]
pub struct OrbitRig {
    pub focus: Vec3,
    pub distance: f32,
    /// Radians about +Y; `PI` looks down +Z from behind the map.
    pub yaw: f32,
    /// Radians above the ground plane.
    pub pitch: f32,
}

impl Default for OrbitRig {
    fn default() -> Self {
        // Same framing as a camera at (0, 15, -15) looking at the origin.
        Self {
            focus: Vec3::ZERO,
            distance: 15.0 * 2f32.sqrt(),
            yaw: PI,
            pitch: FRAC_PI_4,
        }
    }
}

impl OrbitRig {
    const MIN_DISTANCE: f32 = 5.0;
    const MAX_DISTANCE: f32 = 60.0;
    const MIN_PITCH: f32 = 0.2;
    const MAX_PITCH: f32 = 1.45;

    fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, -self.pitch, 0.0)
    }

    pub fn transform(&self) -> Transform {
        let eye = self.focus + self.rotation() * Vec3::new(0.0, 0.0, self.distance);
        Transform::from_translation(eye).looking_at(self.focus, Vec3::Y)
    }

    /// Move the focus along the ground, in screen-space directions.
    fn pan(&mut self, delta: Vec2) {
        let rotation = Quat::from_rotation_y(self.yaw);
        let right = rotation * Vec3::X;
        let back = rotation * Vec3::Z;
        let speed = self.distance * 0.002;
        self.focus += (-right * delta.x + back * -delta.y) * speed;
    }

    fn orbit(&mut self, delta: Vec2) {
        self.yaw -= delta.x * 0.005;
        self.pitch = (self.pitch + delta.y * 0.005).clamp(Self::MIN_PITCH, Self::MAX_PITCH);
    }

    fn zoom(&mut self, amount: f32) {
        self.distance =
            (self.distance * (1.0 - amount)).clamp(Self::MIN_DISTANCE, Self::MAX_DISTANCE);
    }
}

fn setup_camera(mut commands: Commands) {
    let rig = OrbitRig::default();
    commands.spawn((Camera3d::default(), rig.transform(), rig, MainCamera));
}

/// Middle drag pans, right drag orbits.
fn camera_drag(
    mouse: Res<ButtonInput<MouseButton>>,
    mut motion: EventReader<CursorMoved>,
    mut camera_q: Query<&mut OrbitRig, With<MainCamera>>,
    mut last_pos: Local<Option<Vec2>>,
) {
    let panning = mouse.pressed(MouseButton::Middle);
    let orbiting = mouse.pressed(MouseButton::Right);
    if !panning && !orbiting {
        *last_pos = None;
        motion.clear();
        return;
    }

    let Some(current) = motion.read().last().map(|e| e.position) else {
        return;
    };
    if let Some(prev) = *last_pos
        && let Ok(mut rig) = camera_q.get_single_mut()
    {
        let delta = current - prev;
        if panning {
            rig.pan(delta);
        } else {
            rig.orbit(delta);
        }
    }
    *last_pos = Some(current);
}

fn camera_zoom(
    mut scroll: EventReader<MouseWheel>,
    mut camera_q: Query<&mut OrbitRig, With<MainCamera>>,
) {
    for event in scroll.read() {
        let scroll_amount = match event.unit {
            MouseScrollUnit::Line => event.y * 0.1,
            MouseScrollUnit::Pixel => event.y * 0.001,
        };

        if let Ok(mut rig) = camera_q.get_single_mut() {
            rig.zoom(scroll_amount);
        }
    }
}

fn apply_rig(mut camera_q: Query<(&OrbitRig, &mut Transform), Changed<OrbitRig>>) {
    for (rig, mut transform) in &mut camera_q {
        *transform = rig.transform();
    }
}
