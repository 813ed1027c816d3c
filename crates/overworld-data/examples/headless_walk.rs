//! Headless walk: load a world file and play it without a renderer.
//!
//! Loads the bundled World 1 map (or the file given as the first argument),
//! tries a locked level, then keeps stepping onto the first adjacent level
//! not yet completed until none is left. Every player-facing notification
//! is printed; set `RUST_LOG=debug` to see the controller's own logs.
//!
//! Run with: `cargo run -p overworld-data --example headless_walk [world.ron]`

use std::path::PathBuf;

use overworld_core::NodeState;
use overworld_core::animation::AnimationRequest;
use overworld_data::{BUNDLED_WORLD, DataLoadError, load_world};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), DataLoadError> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(BUNDLED_WORLD));

    let world = load_world(&path)?;
    println!("=== {} ===", world.title);
    if !world.description.is_empty() {
        println!("{}", world.description);
    }

    let (mut map, issues) = world.into_controller()?;
    for issue in &issues {
        println!("  config issue: {issue}");
    }
    println!("Start: {}", map.current());

    // Clicking something far ahead is refused with a shake.
    let locked = map
        .graph()
        .nodes()
        .find(|n| n.state() == NodeState::Locked)
        .map(|n| n.id().clone());
    if let Some(locked) = locked {
        let _ = map.handle_click(&locked);
    }

    let mut clock = 0.0;
    loop {
        let next = map
            .graph()
            .neighbors(map.current())
            .find(|id| map.state_of(id) == Some(NodeState::Unlocked) && map.can_move_to(id))
            .cloned();
        let Some(next) = next else {
            break;
        };
        let _ = map.handle_click(&next);

        // Let the pop animations settle.
        clock += 0.5;
        map.frame(clock, 0.5);

        for event in map.drain_events() {
            if let Some(text) = event.notification() {
                println!("  {text}");
            }
        }
        let pops = map
            .drain_animation_requests()
            .iter()
            .filter(|r| matches!(r, AnimationRequest::ScaleTo { .. }))
            .count();
        if pops > 0 {
            println!("    ({pops} scale animations)");
        }
    }

    // Entering the final level.
    let here = map.current().clone();
    let _ = map.handle_click(&here);
    for event in map.drain_events() {
        if let Some(text) = event.notification() {
            println!("  {text}");
        }
    }

    println!("\n--- Final map ---");
    for node in map.graph().nodes() {
        let marker = if node.id() == map.current() { " <" } else { "" };
        println!("  {:<10} {:<10}{marker}", node.id().as_str(), node.state().label());
    }

    Ok(())
}
