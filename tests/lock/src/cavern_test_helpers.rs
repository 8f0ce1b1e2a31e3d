//! Seeded random caverns and brute-force oracles.
//!
//! Everything here is deterministic in its seed so that a failing property
//! test can be replayed by seed alone.

use std::collections::{BTreeMap, BTreeSet};

use cavern_harness::heuristic::Heuristic;
use cavern_harness::world::{CavernWorld, WorldLayout};
use cavern_kernel::graph::cavern::Cavern;
use cavern_kernel::graph::node::{NodeId, Tile};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Columns used to lay random nodes out on distinct tiles.
const LAYOUT_COLS: u64 = 4;

fn tile_for(id: u64, gold: u32) -> Tile {
    // Ids are small in every caller; the casts cannot truncate.
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    let (row, col) = ((id / LAYOUT_COLS) as i32, (id % LAYOUT_COLS) as i32);
    Tile::at(row, col).with_gold(gold)
}

/// Connected random cavern with ids `1..=nodes`.
///
/// A random spanning tree guarantees connectivity; `extra_edges` more edges
/// are then attempted between random pairs (duplicates are skipped).
/// Weights are drawn from `0..=max_weight`.
///
/// # Panics
///
/// Panics if `nodes` is zero.
#[must_use]
pub fn random_cavern(seed: u64, nodes: u64, extra_edges: usize, max_weight: u64) -> Cavern {
    assert!(nodes > 0, "a cavern needs at least one node");
    let mut rng = StdRng::seed_from_u64(seed);
    let mut builder = Cavern::builder();
    for id in 1..=nodes {
        builder = builder.node(id, tile_for(id, rng.gen_range(0..4)));
    }

    let mut seen: BTreeSet<(u64, u64)> = BTreeSet::new();
    for id in 2..=nodes {
        let parent = rng.gen_range(1..id);
        seen.insert((parent, id));
        builder = builder.edge(parent, id, rng.gen_range(0..=max_weight));
    }
    for _ in 0..extra_edges {
        let a = rng.gen_range(1..=nodes);
        let b = rng.gen_range(1..=nodes);
        let key = (a.min(b), a.max(b));
        if a == b || !seen.insert(key) {
            continue;
        }
        builder = builder.edge(a, b, rng.gen_range(0..=max_weight));
    }
    builder.build().unwrap()
}

/// Random world over [`random_cavern`] with a Manhattan heuristic.
///
/// # Panics
///
/// Panics if the generated world fails validation (it cannot: tiles are
/// distinct and the cavern is connected).
#[must_use]
pub fn random_world(seed: u64, nodes: u64, extra_edges: usize) -> CavernWorld {
    let cavern = random_cavern(seed, nodes, extra_edges, 9);
    let mut rng = StdRng::seed_from_u64(seed ^ 0x5eed);
    let layout = WorldLayout {
        start: NodeId(rng.gen_range(1..=nodes)),
        orb: NodeId(rng.gen_range(1..=nodes)),
        exit: NodeId(rng.gen_range(1..=nodes)),
        heuristic: Heuristic::Manhattan,
        time_budget: None,
    };
    CavernWorld::new(format!("random-{seed}"), cavern, layout).unwrap()
}

/// True shortest distances by enumerating every simple path from `source`.
///
/// Exponential; only for graphs of a handful of nodes.
#[must_use]
pub fn brute_force_distances(cavern: &Cavern, source: NodeId) -> BTreeMap<NodeId, u64> {
    fn walk(
        cavern: &Cavern,
        at: NodeId,
        cost: u64,
        on_path: &mut BTreeSet<NodeId>,
        best: &mut BTreeMap<NodeId, u64>,
    ) {
        let entry = best.entry(at).or_insert(u64::MAX);
        *entry = (*entry).min(cost);
        let Some(node) = cavern.node(at) else { return };
        for edge in node.edges() {
            if on_path.insert(edge.to) {
                walk(cavern, edge.to, cost + edge.weight, on_path, best);
                on_path.remove(&edge.to);
            }
        }
    }

    let mut best = BTreeMap::new();
    let mut on_path = BTreeSet::from([source]);
    walk(cavern, source, 0, &mut on_path, &mut best);
    best
}

/// Sum of the initial gold on the given nodes.
#[must_use]
pub fn gold_on(cavern: &Cavern, nodes: impl IntoIterator<Item = NodeId>) -> u64 {
    nodes
        .into_iter()
        .filter_map(|id| cavern.node(id))
        .map(|n| u64::from(n.gold()))
        .sum()
}
