//! Escape properties over seeded random worlds.

use cavern_harness::fixture::CavernFixture;
use cavern_harness::runner::{run_episode, RunConfig, RunError};
use cavern_search::error::EscapeError;
use cavern_search::policy::{BudgetCheck, EscapePolicy};
use lock_tests::cavern_test_helpers::{brute_force_distances, gold_on, random_world};

const SEEDS: u64 = 200;

#[test]
fn escape_takes_a_shortest_route_and_all_its_gold() {
    for seed in 0..SEEDS {
        let mut world = random_world(seed, 4 + seed % 5, 4);
        let cavern = world.cavern().clone();
        let layout = world.layout().clone();
        let run = run_episode(&mut world, &RunConfig::default())
            .unwrap_or_else(|e| panic!("seed {seed}: {e}"));

        let expected = brute_force_distances(&cavern, layout.orb)[&layout.exit];
        assert_eq!(run.escaped.path.total_weight, expected, "seed {seed}");
        assert_eq!(run.escaped.time_spent, expected, "seed {seed}");
        assert_eq!(world.position(), layout.exit, "seed {seed}");
        assert_eq!(world.time_remaining(), 0, "seed {seed}");

        let hops = run.escaped.path.steps.iter().map(|s| s.node);
        assert_eq!(run.escaped.gold_collected, gold_on(&cavern, hops), "seed {seed}");
        assert_eq!(world.gold_collected(), run.escaped.gold_collected, "seed {seed}");
        assert_eq!(
            world.gold_at(layout.orb),
            cavern.node(layout.orb).unwrap().gold(),
            "seed {seed}: orb gold was touched"
        );
    }
}

#[test]
fn dry_walk_collects_nothing_but_arrives() {
    for seed in 0..50 {
        let mut world = random_world(seed, 7, 3);
        let exit = world.layout().exit;
        let config = RunConfig {
            escape: EscapePolicy {
                collect_gold: false,
                ..EscapePolicy::default()
            },
            ..RunConfig::default()
        };
        let run = run_episode(&mut world, &config).unwrap();
        assert_eq!(run.escaped.gold_collected, 0, "seed {seed}");
        assert!(run.escaped.trace.steps().iter().all(|s| s.gold == 0));
        assert_eq!(world.position(), exit, "seed {seed}");
    }
}

#[test]
fn generous_budget_leaves_time_over() {
    for seed in 0..50 {
        let world = random_world(seed, 6, 2);
        let mut fixture = CavernFixture::from_world(&world);
        fixture.time_budget = Some(world.time_budget() + 5);
        let mut world = fixture.into_world().unwrap();
        let run = run_episode(&mut world, &RunConfig::default()).unwrap();
        assert_eq!(world.time_remaining(), 5, "seed {seed}");
        assert_eq!(run.report.escape.time_remaining, 5, "seed {seed}");
    }
}

#[test]
fn verified_budget_refuses_a_route_that_does_not_fit() {
    // Seeds whose orb and exit coincide have nothing to refuse.
    let mut checked = 0;
    for seed in 0..50 {
        let world = random_world(seed, 6, 2);
        let needed = world.time_budget();
        if needed == 0 {
            continue;
        }
        let mut fixture = CavernFixture::from_world(&world);
        fixture.time_budget = Some(needed - 1);
        let mut world = fixture.into_world().unwrap();
        let config = RunConfig {
            escape: EscapePolicy {
                budget_check: BudgetCheck::Verify,
                ..EscapePolicy::default()
            },
            ..RunConfig::default()
        };
        let err = run_episode(&mut world, &config).unwrap_err();
        assert_eq!(
            err,
            RunError::Escape(EscapeError::InsufficientTime {
                needed,
                remaining: needed - 1,
            }),
            "seed {seed}"
        );
        assert_eq!(world.position(), world.layout().orb, "seed {seed}");
        checked += 1;
    }
    assert!(checked > 0);
}
