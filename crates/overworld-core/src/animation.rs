//! Animation requests, the deferred-settle queue, and the per-frame
//! cosmetic sweep.
//!
//! None of this feeds back into progression state. Requests are
//! fire-and-forget instructions for whatever tweening the renderer has; the
//! queue only exists so the "pop then settle" sequence is explicit data
//! rather than a dangling timer.

use serde::{Deserialize, Serialize};
use slotmap::{SlotMap, new_key_type};

use crate::graph::LevelGraph;
use crate::id::NodeId;
use crate::node::NodeState;

new_key_type! {
    /// Handle to a queued deferred animation.
    pub struct ScheduledId;
}

/// Interpolation curve for scale tweens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    #[default]
    Linear,
    OutQuad,
    OutBounce,
}

impl Easing {
    /// Map linear progress `t` in 0..=1 onto the curve.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::OutQuad => t * (2.0 - t),
            Easing::OutBounce => {
                const N: f32 = 7.5625;
                const D: f32 = 2.75;
                if t < 1.0 / D {
                    N * t * t
                } else if t < 2.0 / D {
                    let t = t - 1.5 / D;
                    N * t * t + 0.75
                } else if t < 2.5 / D {
                    let t = t - 2.25 / D;
                    N * t * t + 0.9375
                } else {
                    let t = t - 2.625 / D;
                    N * t * t + 0.984375
                }
            }
        }
    }
}

/// Timings and magnitudes of the cosmetic animations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationTuning {
    /// Duration of the tween towards a node's directive scale after a sync.
    pub scale_duration: f32,
    pub pop_factor: f32,
    pub pop_duration: f32,
    pub settle_delay: f32,
    pub settle_duration: f32,
    pub shake_duration: f32,
    pub shake_magnitude: f32,
    pub shake_speed: f32,
    pub bob_amplitude: f32,
    /// Angular frequency of the bob, radians per second.
    pub bob_frequency: f32,
    pub spin_degrees_per_second: f32,
    pub notification_seconds: f32,
}

impl Default for AnimationTuning {
    fn default() -> Self {
        Self {
            scale_duration: 0.2,
            pop_factor: 1.5,
            pop_duration: 0.2,
            settle_delay: 0.21,
            settle_duration: 0.1,
            shake_duration: 0.3,
            shake_magnitude: 0.05,
            shake_speed: 20.0,
            bob_amplitude: 0.15,
            bob_frequency: 3.0,
            spin_degrees_per_second: 60.0,
            notification_seconds: 2.0,
        }
    }
}

/// An instruction for the renderer's tweening.
#[derive(Debug, Clone, PartialEq)]
pub enum AnimationRequest {
    /// Tween a node's uniform scale.
    ScaleTo {
        node: NodeId,
        scale: f32,
        duration: f32,
        easing: Easing,
    },
    /// Rejected-click feedback.
    Shake {
        node: NodeId,
        duration: f32,
        magnitude: f32,
        speed: f32,
    },
}

impl AnimationRequest {
    pub fn node(&self) -> &NodeId {
        match self {
            AnimationRequest::ScaleTo { node, .. } | AnimationRequest::Shake { node, .. } => node,
        }
    }
}

/// A deferred return-to-baseline for a node that just popped.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledSettle {
    pub node: NodeId,
    /// State the node was put into when the settle was queued. The settle
    /// is dropped if the node has left this state by the time it is due.
    pub end_state: NodeState,
    /// Session time, in seconds, at which the settle becomes due.
    pub fire_at: f64,
}

/// Deferred settles keyed by node. Scheduling a settle for a node that
/// already has one pending replaces it.
#[derive(Debug, Clone, Default)]
pub struct AnimationQueue {
    entries: SlotMap<ScheduledId, ScheduledSettle>,
}

impl AnimationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, settle: ScheduledSettle) -> ScheduledId {
        self.cancel_for(&settle.node);
        self.entries.insert(settle)
    }

    /// Drop any pending settle for `node`. Returns how many were removed.
    pub fn cancel_for(&mut self, node: &NodeId) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, s| &s.node != node);
        before - self.entries.len()
    }

    pub fn cancel(&mut self, id: ScheduledId) -> Option<ScheduledSettle> {
        self.entries.remove(id)
    }

    /// Remove and return every settle with `fire_at <= now`, earliest first.
    pub fn pop_due(&mut self, now: f64) -> Vec<ScheduledSettle> {
        let due: Vec<ScheduledId> = self
            .entries
            .iter()
            .filter(|(_, s)| s.fire_at <= now)
            .map(|(id, _)| id)
            .collect();

        let mut fired: Vec<ScheduledSettle> = due
            .into_iter()
            .filter_map(|id| self.entries.remove(id))
            .collect();
        fired.sort_by(|a, b| a.fire_at.total_cmp(&b.fire_at));
        fired
    }

    pub fn get(&self, id: ScheduledId) -> Option<&ScheduledSettle> {
        self.entries.get(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Time-based cosmetic offsets for one node.
#[derive(Debug, Clone, PartialEq)]
pub struct CosmeticPose {
    pub node: NodeId,
    /// Vertical offset from the node's configured height.
    pub bob_offset: f32,
    /// Rotation about the vertical axis to add this frame, in degrees.
    pub spin_degrees: f32,
}

/// One sweep over the nodes that animate on their own: the current node
/// bobs, open bonus nodes spin. Everything else is left out.
pub fn cosmetic_sweep(
    graph: &LevelGraph,
    current: Option<&NodeId>,
    elapsed: f64,
    dt: f32,
    tuning: &AnimationTuning,
) -> Vec<CosmeticPose> {
    graph
        .nodes()
        .filter_map(|node| {
            let bobbing = current == Some(node.id());
            let spinning = node.is_bonus() && node.state() != NodeState::Locked;
            if !bobbing && !spinning {
                return None;
            }

            let bob_offset = if bobbing {
                (elapsed * f64::from(tuning.bob_frequency)).sin() as f32 * tuning.bob_amplitude
            } else {
                0.0
            };
            let spin_degrees = if spinning {
                tuning.spin_degrees_per_second * dt
            } else {
                0.0
            };

            Some(CosmeticPose {
                node: node.id().clone(),
                bob_offset,
                spin_degrees,
            })
        })
        .collect()
}
