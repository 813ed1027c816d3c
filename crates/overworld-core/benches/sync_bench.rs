//! Criterion benchmarks for the progression core.
//!
//! Two benchmark groups:
//! - `sync`: directive projection over long chains and a dense grid
//! - `walk`: a full walk down a chain, click by click

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use overworld_core::config::NodeConfig;
use overworld_core::graph::LevelGraph;
use overworld_core::test_utils::*;
use overworld_core::visual::{VisualStyle, sync};
use overworld_core::{MovementPolicy, NodeId};

// ===========================================================================
// Map builders
// ===========================================================================

/// A `side` x `side` grid where every node unlocks its right and lower
/// neighbours.
fn grid(side: usize) -> Vec<NodeConfig> {
    let name = |x: usize, y: usize| format!("g{x}_{y}");
    let mut configs = Vec::with_capacity(side * side);
    for y in 0..side {
        for x in 0..side {
            let mut targets = Vec::new();
            if x + 1 < side {
                targets.push(name(x + 1, y));
            }
            if y + 1 < side {
                targets.push(name(x, y + 1));
            }
            let mut cfg = node(&name(x, y))
                .at(x as f32 * 2.0, 0.5, y as f32 * 2.0)
                .unlocks(targets);
            if x == 0 && y == 0 {
                cfg = cfg.unlocked();
            }
            configs.push(cfg);
        }
    }
    configs
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_sync(c: &mut Criterion) {
    let mut group = c.benchmark_group("sync");
    let style = VisualStyle::default();

    for n in [10usize, 100, 1000] {
        let (graph, _) = LevelGraph::build(&chain(n));
        let start = NodeId::from("n0");
        group.bench_with_input(BenchmarkId::new("chain", n), &graph, |b, graph| {
            b.iter(|| sync(graph, Some(&start), &style));
        });
    }

    let (graph, _) = LevelGraph::build(&grid(30));
    let start = NodeId::from("g0_0");
    group.bench_function("grid_30x30", |b| {
        b.iter(|| sync(&graph, Some(&start), &style));
    });

    group.finish();
}

fn bench_walk(c: &mut Criterion) {
    let configs = chain(200);
    c.bench_function("walk/chain_200", |b| {
        b.iter(|| {
            let mut controller = controller_for(&configs, MovementPolicy::StrictAdjacency);
            for i in 1..200 {
                let _ = controller.handle_click(&NodeId::from(format!("n{i}")));
            }
            controller.drain_animation_requests().len()
        });
    });
}

criterion_group!(benches, bench_sync, bench_walk);
criterion_main!(benches);
