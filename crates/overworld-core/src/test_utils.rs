//! Shared test helpers for unit tests, integration tests and benchmarks.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]`.

use crate::config::NodeConfig;
use crate::controller::{MovementPolicy, ProgressionController};
use crate::graph::LevelGraph;
use crate::id::NodeId;
use crate::node::NodeState;

// ===========================================================================
// Node record builders
// ===========================================================================

pub fn node(id: &str) -> NodeConfig {
    NodeConfig::new(id, format!("Level {id}"))
}

/// The six-level "World 1" map: a short main line, a gold bonus branch off
/// 1-2, and a castle that opens the first level of World 2.
pub fn world_one() -> Vec<NodeConfig> {
    vec![
        NodeConfig::new("1-1", "World 1-1")
            .at(-6.0, 0.5, 0.0)
            .color("lime")
            .unlocks(["1-2"])
            .unlocked(),
        NodeConfig::new("1-2", "World 1-2")
            .at(-3.0, 0.5, 1.5)
            .color("green")
            .unlocks(["1-A", "1-3"]),
        NodeConfig::new("1-A", "World 1-A (Bonus)")
            .at(-3.0, 0.5, -2.0)
            .color("gold"),
        NodeConfig::new("1-3", "World 1-3")
            .at(0.0, 0.5, 1.0)
            .color("olive")
            .unlocks(["1-Castle"]),
        NodeConfig::new("1-Castle", "World 1-Castle")
            .at(3.0, 0.5, 0.0)
            .color("red")
            .unlocks(["2-1"]),
        NodeConfig::new("2-1", "World 2-1")
            .at(6.0, 0.5, 0.0)
            .color("blue"),
    ]
}

/// `n` nodes in a line, each unlocking the next; the first starts open.
pub fn chain(n: usize) -> Vec<NodeConfig> {
    (0..n)
        .map(|i| {
            let mut cfg = node(&format!("n{i}")).at(i as f32 * 3.0, 0.5, 0.0);
            if i + 1 < n {
                cfg = cfg.unlocks([format!("n{}", i + 1)]);
            }
            if i == 0 {
                cfg = cfg.unlocked();
            }
            cfg
        })
        .collect()
}

// ===========================================================================
// Controller helpers
// ===========================================================================

pub fn controller_for(configs: &[NodeConfig], policy: MovementPolicy) -> ProgressionController {
    let (graph, _) = LevelGraph::build(configs);
    let mut controller = ProgressionController::with_defaults(graph).expect("non-empty graph");
    controller.set_policy(policy);
    controller
}

pub fn world_one_controller() -> ProgressionController {
    controller_for(&world_one(), MovementPolicy::StrictAdjacency)
}

/// Every node's state, in configuration order.
pub fn states(controller: &ProgressionController) -> Vec<(NodeId, NodeState)> {
    controller
        .graph()
        .nodes()
        .map(|n| (n.id().clone(), n.state()))
        .collect()
}

pub fn state(controller: &ProgressionController, id: &str) -> NodeState {
    controller
        .state_of(&NodeId::from(id))
        .unwrap_or_else(|| panic!("no node {id}"))
}
