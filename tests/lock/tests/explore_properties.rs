//! Exploration properties over seeded random caverns.

use std::collections::BTreeSet;

use cavern_harness::heuristic::Heuristic;
use cavern_harness::world::{CavernWorld, WorldLayout};
use cavern_kernel::graph::cavern::Cavern;
use cavern_kernel::graph::node::{NodeId, Tile};
use cavern_search::error::ExploreError;
use cavern_search::explore::explore;
use cavern_search::policy::ExplorePolicy;
use cavern_search::trace::ExploreEvent;
use lock_tests::cavern_test_helpers::random_world;

const SEEDS: u64 = 200;

#[test]
fn random_worlds_reach_the_orb_entering_each_node_once() {
    for seed in 0..SEEDS {
        let mut world = random_world(seed, 3 + seed % 10, usize::try_from(seed % 7).unwrap());
        let layout = world.layout().clone();
        let outcome = explore(&mut world.exploration().unwrap(), &ExplorePolicy::default())
            .unwrap_or_else(|e| panic!("seed {seed}: {e}"));

        assert_eq!(outcome.target, layout.orb, "seed {seed}");
        assert_eq!(world.position(), layout.orb, "seed {seed}");
        assert_eq!(outcome.moves, world.moves(), "seed {seed}");
        assert_eq!(
            usize::try_from(outcome.moves).unwrap(),
            outcome.trace.len(),
            "seed {seed}"
        );

        let mut entered = BTreeSet::from([layout.start]);
        let mut at = layout.start;
        for event in outcome.trace.events() {
            match *event {
                ExploreEvent::Advance { from, to, .. } => {
                    assert_eq!(from, at, "seed {seed}: advance from elsewhere");
                    assert!(entered.insert(to), "seed {seed}: {to} entered twice");
                    assert!(world.cavern().are_adjacent(from, to), "seed {seed}");
                }
                ExploreEvent::Backtrack { from, to } => {
                    assert_eq!(from, at, "seed {seed}: backtrack from elsewhere");
                    assert!(entered.contains(&to), "seed {seed}");
                }
            }
            at = event.to();
        }
        assert_eq!(at, layout.orb, "seed {seed}");
        assert_eq!(entered.len(), outcome.visited, "seed {seed}");
    }
}

#[test]
fn backtracks_never_outnumber_advances() {
    for seed in 0..SEEDS {
        let mut world = random_world(seed, 12, 2);
        let outcome = explore(&mut world.exploration().unwrap(), &ExplorePolicy::default())
            .unwrap_or_else(|e| panic!("seed {seed}: {e}"));
        assert!(
            outcome.trace.backtrack_count() < outcome.trace.advance_count()
                || outcome.trace.is_empty(),
            "seed {seed}"
        );
        assert!(outcome.max_depth <= world.cavern().len(), "seed {seed}");
    }
}

/// Start in a three-node island; orb and exit on a separate pair.
fn split_world() -> CavernWorld {
    let cavern = Cavern::builder()
        .node(1, Tile::at(0, 0))
        .node(2, Tile::at(0, 1))
        .node(3, Tile::at(1, 0))
        .node(10, Tile::at(5, 5))
        .node(11, Tile::at(5, 6))
        .edge(1, 2, 1)
        .edge(1, 3, 1)
        .edge(10, 11, 1)
        .build()
        .unwrap();
    let layout = WorldLayout {
        start: NodeId(1),
        orb: NodeId(10),
        exit: NodeId(11),
        heuristic: Heuristic::Manhattan,
        time_budget: None,
    };
    CavernWorld::new("split", cavern, layout).unwrap()
}

#[test]
fn orb_outside_the_start_component_is_unreachable() {
    let mut world = split_world();
    let err = explore(&mut world.exploration().unwrap(), &ExplorePolicy::default()).unwrap_err();
    assert_eq!(
        err,
        ExploreError::TargetUnreachable {
            start: NodeId(1),
            explored: 3,
        }
    );
    // Every branch was walked back.
    assert_eq!(world.position(), NodeId(1));
    assert_eq!(world.moves(), 4);
}

#[test]
fn tight_move_budget_stops_exploration() {
    let mut world = split_world();
    let err = explore(
        &mut world.exploration().unwrap(),
        &ExplorePolicy { max_moves: 3 },
    )
    .unwrap_err();
    assert_eq!(err, ExploreError::MoveBudgetExceeded { max_moves: 3 });
    assert_eq!(world.moves(), 3);
}
