//! The progression state machine.
//!
//! [`ProgressionController`] owns the [`LevelGraph`] and the current-node
//! pointer. It is the only mutator of node state: clicks come in through
//! [`ProgressionController::handle_click`], time comes in through
//! [`ProgressionController::frame`]. After every mutation the render
//! directives are recomputed; renderers read them via
//! [`ProgressionController::directives`] and drain events and animation
//! requests at their own pace.

use serde::{Deserialize, Serialize};

use crate::animation::{
    AnimationQueue, AnimationRequest, AnimationTuning, CosmeticPose, Easing, ScheduledSettle,
    cosmetic_sweep,
};
use crate::error::{ClickRejection, ProgressionError};
use crate::event::ProgressionEvent;
use crate::graph::LevelGraph;
use crate::id::NodeId;
use crate::node::{LevelNode, NodeState};
use crate::visual::{RenderDirectives, VisualStyle, sync};

/// Which open nodes the player may move to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementPolicy {
    /// Only nodes joined to the current node by a path.
    #[default]
    StrictAdjacency,
    /// Any unlocked or completed node.
    FreeRoam,
}

/// What a successful move changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveReport {
    pub from: NodeId,
    pub to: NodeId,
    /// The vacated node, if it went from unlocked to completed.
    pub completed: Option<NodeId>,
    /// Nodes from the destination's unlock list that were locked before.
    pub unlocked: Vec<NodeId>,
}

/// Result of an accepted click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    Moved(MoveReport),
    /// The click was on the current node.
    Entered(NodeId),
}

pub struct ProgressionController {
    graph: LevelGraph,
    current: NodeId,
    policy: MovementPolicy,
    style: VisualStyle,
    tuning: AnimationTuning,
    directives: RenderDirectives,
    settles: AnimationQueue,
    requests: Vec<AnimationRequest>,
    events: Vec<ProgressionEvent>,
    /// Session time in seconds, as last reported to `frame`.
    clock: f64,
}

impl ProgressionController {
    /// Put the player on the graph's start node and open its unlock list,
    /// as if they had just arrived there. Path thicknesses in `style` are
    /// repaired so the highlighted tier stays the thickest. Fails only when
    /// the graph has no nodes at all.
    pub fn new(
        graph: LevelGraph,
        policy: MovementPolicy,
        style: VisualStyle,
        tuning: AnimationTuning,
    ) -> Result<Self, ProgressionError> {
        let current = graph.start().cloned().ok_or(ProgressionError::EmptyGraph)?;
        let mut style = style;
        for issue in style.sanitize() {
            tracing::warn!(%issue, "visual style repaired");
        }

        let mut controller = Self {
            graph,
            current: current.clone(),
            policy,
            style,
            tuning,
            directives: RenderDirectives::default(),
            settles: AnimationQueue::new(),
            requests: Vec::new(),
            events: Vec::new(),
            clock: 0.0,
        };
        let opened = controller.unlock_cascade(&current);
        controller.resync();

        tracing::debug!(
            start = %current,
            ?policy,
            opened = opened.len(),
            "progression controller ready"
        );
        Ok(controller)
    }

    /// [`ProgressionController::new`] with the default policy and looks.
    pub fn with_defaults(graph: LevelGraph) -> Result<Self, ProgressionError> {
        Self::new(
            graph,
            MovementPolicy::default(),
            VisualStyle::default(),
            AnimationTuning::default(),
        )
    }

    // -- Queries --

    pub fn graph(&self) -> &LevelGraph {
        &self.graph
    }

    pub fn current(&self) -> &NodeId {
        &self.current
    }

    pub fn current_node(&self) -> Option<&LevelNode> {
        self.graph.node(&self.current)
    }

    pub fn state_of(&self, id: &NodeId) -> Option<NodeState> {
        self.graph.node(id).map(LevelNode::state)
    }

    pub fn policy(&self) -> MovementPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: MovementPolicy) {
        self.policy = policy;
    }

    pub fn style(&self) -> &VisualStyle {
        &self.style
    }

    pub fn tuning(&self) -> &AnimationTuning {
        &self.tuning
    }

    /// Directives from the most recent sync.
    pub fn directives(&self) -> &RenderDirectives {
        &self.directives
    }

    pub fn pending_settles(&self) -> &AnimationQueue {
        &self.settles
    }

    /// Whether a click on `target` would move the player under the
    /// current policy.
    pub fn can_move_to(&self, target: &NodeId) -> bool {
        let Some(node) = self.graph.node(target) else {
            return false;
        };
        if node.state().is_locked() || target == &self.current {
            return false;
        }
        match self.policy {
            MovementPolicy::StrictAdjacency => self.graph.is_adjacent(&self.current, target),
            MovementPolicy::FreeRoam => true,
        }
    }

    // -- Input --

    /// Handle a click on `target`.
    ///
    /// Locked, unknown and unreachable targets are refused with a shake
    /// request and a `MoveRejected` event; nothing else changes. Clicking
    /// the current node enters the level. Anything else moves the player.
    pub fn handle_click(&mut self, target: &NodeId) -> Result<ClickOutcome, ClickRejection> {
        let Some(node) = self.graph.node(target) else {
            return Err(self.reject(ClickRejection::UnknownNode(target.clone())));
        };

        if node.state().is_locked() {
            return Err(self.reject(ClickRejection::Locked(target.clone())));
        }

        if target == &self.current {
            let name = node.name().to_string();
            tracing::debug!(node = %target, "entering level");
            self.events.push(ProgressionEvent::LevelEntered {
                node: target.clone(),
                name,
            });
            return Ok(ClickOutcome::Entered(target.clone()));
        }

        if !self.can_move_to(target) {
            return Err(self.reject(ClickRejection::Unreachable {
                from: self.current.clone(),
                target: target.clone(),
            }));
        }

        self.move_to(target)
            .map(ClickOutcome::Moved)
            .map_err(|_| ClickRejection::UnknownNode(target.clone()))
    }

    /// Move the player onto `target` without checking the movement policy.
    ///
    /// Completes the vacated node, unlocks the destination's unlock list,
    /// queues a pop for each newly opened node and resyncs directives.
    /// Moving onto the current node changes nothing and emits no event.
    pub fn move_to(&mut self, target: &NodeId) -> Result<MoveReport, ProgressionError> {
        if !self.graph.contains(target) {
            return Err(ProgressionError::UnknownNode(target.clone()));
        }
        if target == &self.current {
            return Ok(MoveReport {
                from: target.clone(),
                to: target.clone(),
                completed: None,
                unlocked: Vec::new(),
            });
        }

        let from = std::mem::replace(&mut self.current, target.clone());

        let completed = self
            .graph
            .node_mut(&from)
            .is_some_and(|node| node.complete())
            .then(|| from.clone());
        if let Some(node) = &completed {
            self.events
                .push(ProgressionEvent::NodeCompleted { node: node.clone() });
        }

        let Some(destination) = self.graph.node_mut(target) else {
            return Err(ProgressionError::UnknownNode(target.clone()));
        };
        if destination.unlock() {
            tracing::warn!(node = %target, "moved onto a locked node; forcing it open");
            self.events
                .push(ProgressionEvent::NodeUnlocked { node: target.clone() });
        }
        let name = destination.name().to_string();

        let unlocked = self.unlock_cascade(target);
        self.resync();

        for id in &unlocked {
            self.queue_pop(id);
        }

        tracing::debug!(
            %from,
            to = %target,
            completed = completed.as_ref().map(NodeId::as_str),
            unlocked = unlocked.len(),
            "moved"
        );
        self.events.push(ProgressionEvent::Moved {
            from: Some(from.clone()),
            to: target.clone(),
            name,
        });

        Ok(MoveReport {
            from,
            to: target.clone(),
            completed,
            unlocked,
        })
    }

    // -- Time --

    /// Per-frame hook. Records the session time, releases due settles as
    /// scale requests and returns cosmetic poses for bobbing and spinning
    /// nodes. Never touches node state or the current pointer.
    pub fn frame(&mut self, elapsed: f64, dt: f32) -> Vec<CosmeticPose> {
        self.clock = elapsed;

        for settle in self.settles.pop_due(elapsed) {
            let Some(directive) = self.directives.node(&settle.node) else {
                continue;
            };
            if directive.state != settle.end_state {
                tracing::debug!(
                    node = %settle.node,
                    queued_for = ?settle.end_state,
                    now = ?directive.state,
                    "dropping settle for a node that changed state"
                );
                continue;
            }
            self.requests.push(AnimationRequest::ScaleTo {
                node: settle.node,
                scale: directive.scale,
                duration: self.tuning.settle_duration,
                easing: Easing::Linear,
            });
        }

        cosmetic_sweep(
            &self.graph,
            Some(&self.current),
            elapsed,
            dt,
            &self.tuning,
        )
    }

    pub fn clock(&self) -> f64 {
        self.clock
    }

    // -- Output --

    pub fn drain_events(&mut self) -> Vec<ProgressionEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn pending_events(&self) -> &[ProgressionEvent] {
        &self.events
    }

    pub fn drain_animation_requests(&mut self) -> Vec<AnimationRequest> {
        std::mem::take(&mut self.requests)
    }

    pub fn pending_animation_requests(&self) -> &[AnimationRequest] {
        &self.requests
    }

    // -- Internal helpers --

    /// Open every locked node in `id`'s unlock list. Not transitive.
    fn unlock_cascade(&mut self, id: &NodeId) -> Vec<NodeId> {
        let cascade = match self.graph.node(id) {
            Some(node) => node.unlocks().to_vec(),
            None => return Vec::new(),
        };

        let mut unlocked = Vec::new();
        for next in cascade {
            if self.graph.node_mut(&next).is_some_and(|node| node.unlock()) {
                self.events
                    .push(ProgressionEvent::NodeUnlocked { node: next.clone() });
                unlocked.push(next);
            }
        }
        unlocked
    }

    fn resync(&mut self) {
        self.directives = sync(&self.graph, Some(&self.current), &self.style);
    }

    fn reject(&mut self, reason: ClickRejection) -> ClickRejection {
        tracing::debug!(%reason, "click rejected");
        let target = match &reason {
            ClickRejection::Locked(node) => Some(node),
            ClickRejection::Unreachable { target, .. } => Some(target),
            ClickRejection::UnknownNode(_) => None,
        };
        if let Some(node) = target {
            self.requests.push(AnimationRequest::Shake {
                node: node.clone(),
                duration: self.tuning.shake_duration,
                magnitude: self.tuning.shake_magnitude,
                speed: self.tuning.shake_speed,
            });
        }
        self.events.push(ProgressionEvent::MoveRejected {
            reason: reason.clone(),
        });
        reason
    }

    fn queue_pop(&mut self, id: &NodeId) {
        let Some(directive) = self.directives.node(id) else {
            return;
        };
        self.requests.push(AnimationRequest::ScaleTo {
            node: id.clone(),
            scale: directive.scale * self.tuning.pop_factor,
            duration: self.tuning.pop_duration,
            easing: Easing::OutBounce,
        });
        self.settles.schedule(ScheduledSettle {
            node: id.clone(),
            end_state: directive.state,
            fire_at: self.clock + f64::from(self.tuning.settle_delay),
        });
    }
}
