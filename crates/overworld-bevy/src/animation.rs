//! The animator: drives the controller's clock and turns its animation
//! requests into tweens on level entities.

use std::collections::HashMap;
use std::f32::consts::TAU;

use bevy::prelude::*;
use overworld_core::NodeId;
use overworld_core::animation::{AnimationRequest, CosmeticPose, Easing};

use crate::MapSet;
use crate::rendering::LevelEntity;
use crate::state::{MapNotice, MapState};

pub struct AnimationPlugin;

impl Plugin for AnimationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CosmeticPoses>()
            .add_systems(
                Update,
                (advance_controller, apply_animation_requests, forward_events)
                    .chain()
                    .in_set(MapSet::Advance),
            )
            .add_systems(
                Update,
                (tick_scale_tweens, compose_level_transforms).in_set(MapSet::Present),
            );
    }
}

/// Uniform-scale tween on a level entity.
#[derive(Component, Debug, Clone)]
pub struct ScaleTween {
    from: f32,
    to: f32,
    duration: f32,
    elapsed: f32,
    easing: Easing,
}

impl ScaleTween {
    pub fn new(from: f32, to: f32, duration: f32, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: 0.0,
            easing,
        }
    }

    /// Advance by `dt` and return the scale to show, plus whether the tween
    /// has run its course.
    fn step(&mut self, dt: f32) -> (f32, bool) {
        self.elapsed += dt;
        if self.duration <= 0.0 || self.elapsed >= self.duration {
            return (self.to, true);
        }
        let t = self.easing.apply(self.elapsed / self.duration);
        (self.from + (self.to - self.from) * t, false)
    }
}

/// Side-to-side wobble after a refused click.
#[derive(Component, Debug, Clone)]
pub struct Shake {
    duration: f32,
    magnitude: f32,
    speed: f32,
    elapsed: f32,
}

impl Shake {
    /// Horizontal offset at the current time; fades out over the duration.
    fn offset(&self) -> f32 {
        let fade = 1.0 - (self.elapsed / self.duration).clamp(0.0, 1.0);
        (self.elapsed * self.speed * TAU).sin() * self.magnitude * fade
    }
}

/// This frame's bob and spin per level.
#[derive(Resource, Default)]
pub struct CosmeticPoses(HashMap<NodeId, CosmeticPose>);

fn advance_controller(
    time: Res<Time>,
    mut state: ResMut<MapState>,
    mut poses: ResMut<CosmeticPoses>,
) {
    let frame = state.map.frame(time.elapsed_secs_f64(), time.delta_secs());
    poses.0 = frame.into_iter().map(|pose| (pose.node.clone(), pose)).collect();
}

pub fn apply_animation_requests(
    mut commands: Commands,
    mut state: ResMut<MapState>,
    levels: Query<(Entity, &LevelEntity, &Transform)>,
) {
    let requests = state.map.drain_animation_requests();
    if requests.is_empty() {
        return;
    }

    let by_id: HashMap<&NodeId, (Entity, f32)> = levels
        .iter()
        .map(|(entity, level, transform)| (&level.id, (entity, transform.scale.x)))
        .collect();

    for request in requests {
        let Some(&(entity, current_scale)) = by_id.get(request.node()) else {
            continue;
        };
        match request {
            AnimationRequest::ScaleTo {
                scale,
                duration,
                easing,
                ..
            } => {
                commands
                    .entity(entity)
                    .insert(ScaleTween::new(current_scale, scale, duration, easing));
            }
            AnimationRequest::Shake {
                duration,
                magnitude,
                speed,
                ..
            } => {
                commands.entity(entity).insert(Shake {
                    duration,
                    magnitude,
                    speed,
                    elapsed: 0.0,
                });
            }
        }
    }
}

fn forward_events(mut state: ResMut<MapState>, mut notices: EventWriter<MapNotice>) {
    for event in state.map.drain_events() {
        if let Some(text) = event.notification() {
            notices.send(MapNotice(text));
        }
    }
}

fn tick_scale_tweens(
    mut commands: Commands,
    time: Res<Time>,
    mut tweens: Query<(Entity, &mut ScaleTween, &mut Transform)>,
) {
    for (entity, mut tween, mut transform) in &mut tweens {
        let (scale, done) = tween.step(time.delta_secs());
        transform.scale = Vec3::splat(scale);
        if done {
            commands.entity(entity).remove::<ScaleTween>();
        }
    }
}

/// Position = home + bob + shake; spin accumulates.
fn compose_level_transforms(
    mut commands: Commands,
    time: Res<Time>,
    poses: Res<CosmeticPoses>,
    mut levels: Query<(Entity, &LevelEntity, &mut Transform, Option<&mut Shake>)>,
) {
    let dt = time.delta_secs();
    for (entity, level, mut transform, shake) in &mut levels {
        let pose = poses.0.get(&level.id);
        let bob = pose.map_or(0.0, |p| p.bob_offset);

        let mut wobble = 0.0;
        if let Some(mut shake) = shake {
            shake.elapsed += dt;
            if shake.elapsed >= shake.duration {
                commands.entity(entity).remove::<Shake>();
            } else {
                wobble = shake.offset();
            }
        }

        transform.translation = level.home + Vec3::new(wobble, bob, 0.0);
        if let Some(spin) = pose.map(|p| p.spin_degrees).filter(|d| *d != 0.0) {
            transform.rotate_y(spin.to_radians());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tween_lands_on_target() {
        let mut tween = ScaleTween::new(1.0, 1.5, 0.2, Easing::OutBounce);
        let (mid, done) = tween.step(0.1);
        assert!(!done);
        assert!(mid > 1.0 && mid <= 1.5);
        let (end, done) = tween.step(0.2);
        assert!(done);
        assert_eq!(end, 1.5);
    }

    #[test]
    fn zero_length_tween_snaps() {
        let mut tween = ScaleTween::new(1.0, 0.56, 0.0, Easing::Linear);
        assert_eq!(tween.step(0.0), (0.56, true));
    }

    #[test]
    fn shake_fades_out() {
        let shake = Shake {
            duration: 0.3,
            magnitude: 0.05,
            speed: 20.0,
            elapsed: 0.3,
        };
        assert!(shake.offset().abs() < 1e-6);

        let early = Shake {
            elapsed: 0.0125,
            ..shake
        };
        assert!(early.offset().abs() <= 0.05);
        assert!(early.offset().abs() > 0.0);
    }
}
