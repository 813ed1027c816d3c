//! The bundled `levels/` files load cleanly and match the in-code fixtures.

use std::path::Path;

use overworld_core::test_utils::world_one;
use overworld_core::{MovementPolicy, NodeId, NodeState};
use overworld_data::{BUNDLED_WORLD, load_world};

fn level(name: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("levels").join(name)
}

#[test]
fn world_one_file_matches_fixture() {
    let world = load_world(Path::new(BUNDLED_WORLD)).unwrap();
    assert_eq!(world.title, "World 1");
    assert_eq!(world.nodes, world_one());
    assert_eq!(world.settings.movement_policy, MovementPolicy::StrictAdjacency);
}

#[test]
fn world_one_file_builds_without_issues() {
    let world = load_world(&level("world1.ron")).unwrap();
    let (mut controller, issues) = world.into_controller().unwrap();
    assert!(issues.is_empty(), "{issues:?}");
    assert_eq!(controller.graph().path_count(), 5);

    controller.handle_click(&NodeId::from("1-2")).unwrap();
    assert_eq!(
        controller.state_of(&NodeId::from("1-A")),
        Some(NodeState::Unlocked)
    );
}

#[test]
fn world_two_file_is_free_roam() {
    let world = load_world(&level("world2.toml")).unwrap();
    assert_eq!(world.settings.movement_policy, MovementPolicy::FreeRoam);
    assert_eq!(world.settings.tuning.bob_amplitude, 0.2);

    let (controller, issues) = world.into_controller().unwrap();
    assert!(issues.is_empty(), "{issues:?}");
    let graph = controller.graph();
    assert!(graph.node(&NodeId::from("2-B")).is_some_and(|n| n.is_bonus()));
    assert!(graph.node(&NodeId::from("2-Castle")).is_some_and(|n| n.is_castle()));
}

#[test]
fn headless_walk_over_world_one() {
    let world = load_world(Path::new(BUNDLED_WORLD)).unwrap();
    let (mut map, _) = world.into_controller().unwrap();

    let locked = map
        .graph()
        .nodes()
        .find(|n| n.state() == NodeState::Locked)
        .map(|n| n.id().clone());
    if let Some(locked) = locked {
        assert!(map.handle_click(&locked).is_err());
    }
    assert_eq!(map.current().as_str(), "1-1");

    let mut steps = 0;
    loop {
        let next = map
            .graph()
            .neighbors(map.current())
            .find(|id| map.state_of(id) == Some(NodeState::Unlocked) && map.can_move_to(id))
            .cloned();
        let Some(next) = next else {
            break;
        };
        map.handle_click(&next).unwrap();
        steps += 1;
        assert!(steps <= map.graph().node_count(), "walk did not stop");
    }

    assert!(steps >= 2);
    assert_eq!(map.state_of(&NodeId::from("1-1")), Some(NodeState::Completed));
    assert_eq!(map.state_of(&NodeId::from("1-2")), Some(NodeState::Completed));
}
