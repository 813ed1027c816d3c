//! Property-based tests for the progression controller.
//!
//! Uses proptest to generate random level maps and click sequences, then
//! verify the state machine's structural invariants after every click.

use std::collections::HashMap;

use overworld_core::animation::AnimationTuning;
use overworld_core::config::NodeConfig;
use overworld_core::path::PathTier;
use overworld_core::test_utils::*;
use overworld_core::visual::VisualStyle;
use overworld_core::{
    ClickOutcome, LevelGraph, MovementPolicy, NodeId, NodeState, ProgressionController,
};
use proptest::prelude::*;

// ===========================================================================
// Generators
// ===========================================================================

/// A random map of up to `max_nodes` nodes: arbitrary unlock edges
/// (self-loops and duplicates included) and arbitrary starting flags.
fn arb_map(max_nodes: usize) -> impl Strategy<Value = Vec<NodeConfig>> {
    (1..=max_nodes).prop_flat_map(|n| {
        (
            proptest::collection::vec(any::<bool>(), n),
            proptest::collection::vec((0..n, 0..n), 0..n * 2),
        )
            .prop_map(move |(open, edges)| {
                (0..n)
                    .map(|i| {
                        let targets = edges
                            .iter()
                            .filter(|(from, _)| *from == i)
                            .map(|(_, to)| format!("n{to}"));
                        let cfg = node(&format!("n{i}")).unlocks(targets);
                        if open[i] { cfg.unlocked() } else { cfg }
                    })
                    .collect()
            })
    })
}

/// Click targets by index. Indices past the node count name unknown nodes.
fn arb_clicks(max: usize) -> impl Strategy<Value = Vec<usize>> {
    proptest::collection::vec(0..16usize, 1..=max)
}

fn arb_policy() -> impl Strategy<Value = MovementPolicy> {
    prop_oneof![
        Just(MovementPolicy::StrictAdjacency),
        Just(MovementPolicy::FreeRoam),
    ]
}

/// Default looks with every tier's thickness drawn at random, so tiers
/// can come out thicker than the highlighted one.
fn arb_style() -> impl Strategy<Value = VisualStyle> {
    proptest::collection::vec(0.5f32..12.0, 4).prop_map(|t| {
        let mut style = VisualStyle::default();
        style.highlighted_path.thickness = t[0];
        style.open_path.thickness = t[1];
        style.established_path.thickness = t[2];
        style.frontier_path.thickness = t[3];
        style
    })
}

fn state_map(c: &ProgressionController) -> HashMap<NodeId, NodeState> {
    states(c).into_iter().collect()
}

// ===========================================================================
// Properties
// ===========================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Exactly one node is current, and it is never locked.
    #[test]
    fn single_open_current(map in arb_map(10), clicks in arb_clicks(30), policy in arb_policy()) {
        let mut c = controller_for(&map, policy);
        for i in clicks {
            let _ = c.handle_click(&NodeId::from(format!("n{i}")));

            let flagged: Vec<_> = c.directives().nodes.iter().filter(|d| d.is_current).collect();
            prop_assert_eq!(flagged.len(), 1);
            prop_assert_eq!(&flagged[0].id, c.current());
            prop_assert!(c.state_of(c.current()).is_some_and(NodeState::is_open));
        }
    }

    /// States only move forward: locked -> unlocked -> completed.
    #[test]
    fn states_are_monotonic(map in arb_map(10), clicks in arb_clicks(30), policy in arb_policy()) {
        let mut c = controller_for(&map, policy);
        let mut previous = state_map(&c);
        for i in clicks {
            let _ = c.handle_click(&NodeId::from(format!("n{i}")));
            let now = state_map(&c);
            for (id, before) in &previous {
                prop_assert!(now[id] >= *before, "{} went from {:?} to {:?}", id, before, now[id]);
            }
            previous = now;
        }
    }

    /// A move completes the vacated node, opens exactly the destination's
    /// locked unlock targets and touches nothing else.
    #[test]
    fn move_effects_are_local(map in arb_map(10), clicks in arb_clicks(30), policy in arb_policy()) {
        let mut c = controller_for(&map, policy);
        for i in clicks {
            let target = NodeId::from(format!("n{i}"));
            let before = state_map(&c);
            let origin = c.current().clone();

            let Ok(ClickOutcome::Moved(report)) = c.handle_click(&target) else {
                continue;
            };
            let after = state_map(&c);

            prop_assert_eq!(&report.from, &origin);
            prop_assert_eq!(c.current(), &target);
            prop_assert_eq!(after[&origin], NodeState::Completed);

            let unlock_list = c.graph().node(&target).map(|n| n.unlocks().to_vec()).unwrap_or_default();
            for next in &unlock_list {
                if let Some(state) = after.get(next) {
                    prop_assert!(state.is_open(), "{} not opened by arrival at {}", next, target);
                }
            }

            for (id, was) in &before {
                if id == &origin || id == &target || unlock_list.contains(id) {
                    continue;
                }
                prop_assert_eq!(after[id], *was, "{} changed without cause", id);
            }
        }
    }

    /// Rejected clicks change nothing, however often they repeat.
    #[test]
    fn rejections_are_inert(map in arb_map(10), clicks in arb_clicks(30), policy in arb_policy()) {
        let mut c = controller_for(&map, policy);
        for i in clicks {
            let target = NodeId::from(format!("n{i}"));
            let before = state_map(&c);
            let origin = c.current().clone();
            let directives = c.directives().clone();

            if c.handle_click(&target).is_err() {
                prop_assert_eq!(state_map(&c), before);
                prop_assert_eq!(c.current(), &origin);
                prop_assert_eq!(c.directives(), &directives);
            }
        }
    }

    /// A path is drawn iff at least one end is open; active paths never
    /// touch a locked node.
    #[test]
    fn path_visibility_tracks_endpoints(map in arb_map(10), clicks in arb_clicks(20), policy in arb_policy()) {
        let mut c = controller_for(&map, policy);
        for i in clicks {
            let _ = c.handle_click(&NodeId::from(format!("n{i}")));
            let states = state_map(&c);
            for path in &c.directives().paths {
                let (a, b) = path.key.endpoints();
                let any_open = states[a].is_open() || states[b].is_open();
                let both_open = states[a].is_open() && states[b].is_open();
                prop_assert_eq!(path.visible, any_open);
                prop_assert_eq!(path.tier.is_active(), both_open);
            }
        }
    }

    /// Locked nodes are never hit-testable; open nodes always are.
    #[test]
    fn interactivity_matches_state(map in arb_map(10), clicks in arb_clicks(20)) {
        let mut c = controller_for(&map, MovementPolicy::FreeRoam);
        for i in clicks {
            let _ = c.handle_click(&NodeId::from(format!("n{i}")));
            for d in &c.directives().nodes {
                prop_assert_eq!(d.interactive, d.state.is_open());
            }
        }
    }

    /// Strict adjacency only ever moves along an existing path.
    #[test]
    fn strict_moves_follow_paths(map in arb_map(10), clicks in arb_clicks(30)) {
        let mut c = controller_for(&map, MovementPolicy::StrictAdjacency);
        for i in clicks {
            let origin = c.current().clone();
            if let Ok(ClickOutcome::Moved(report)) = c.handle_click(&NodeId::from(format!("n{i}"))) {
                prop_assert!(c.graph().is_adjacent(&origin, &report.to));
            }
        }
    }

    /// Only highlighted paths are drawn at the highlighted thickness, and
    /// every other path is thinner, whatever thicknesses the style asks for.
    #[test]
    fn highlighted_paths_are_thickest(
        map in arb_map(10),
        clicks in arb_clicks(20),
        policy in arb_policy(),
        style in arb_style(),
    ) {
        let (graph, _) = LevelGraph::build(&map);
        let mut c = ProgressionController::new(graph, policy, style, AnimationTuning::default())
            .unwrap();
        let max = c.style().highlighted_path.thickness;
        for i in clicks {
            let _ = c.handle_click(&NodeId::from(format!("n{i}")));
            for path in &c.directives().paths {
                prop_assert_eq!(path.thickness == max, path.tier == PathTier::Highlighted);
                prop_assert!(path.thickness <= max);
            }
        }
    }
}
