//! In-process determinism: the same world and policy give byte-identical
//! reports and traces, run after run.

use cavern_harness::runner::{run_episode, RunConfig};
use cavern_harness::worlds;
use cavern_search::policy::{EscapePolicy, SelectionStrategy};
use lock_tests::cavern_test_helpers::random_world;

const RUNS: usize = 10;

#[test]
fn canned_worlds_repeat_exactly() {
    for &name in worlds::NAMES {
        let baseline = run_episode(
            &mut worlds::by_name(name).unwrap().into_world().unwrap(),
            &RunConfig::default(),
        )
        .unwrap();
        let report_bytes = baseline.report.canonical_bytes().unwrap();
        let explore_bytes = baseline.explored.trace.canonical_bytes().unwrap();
        let escape_bytes = baseline.escaped.trace.canonical_bytes().unwrap();

        for _ in 1..RUNS {
            let again = run_episode(
                &mut worlds::by_name(name).unwrap().into_world().unwrap(),
                &RunConfig::default(),
            )
            .unwrap();
            assert_eq!(again.report_digest, baseline.report_digest, "{name}");
            assert_eq!(again.report.canonical_bytes().unwrap(), report_bytes, "{name}");
            assert_eq!(
                again.explored.trace.canonical_bytes().unwrap(),
                explore_bytes,
                "{name}"
            );
            assert_eq!(
                again.escaped.trace.canonical_bytes().unwrap(),
                escape_bytes,
                "{name}"
            );
        }
    }
}

#[test]
fn selection_strategy_only_changes_the_policy_digest() {
    for seed in 0..40 {
        let linear = run_episode(&mut random_world(seed, 9, 5), &RunConfig::default()).unwrap();
        let heap_config = RunConfig {
            escape: EscapePolicy {
                selection: SelectionStrategy::BinaryHeap,
                ..EscapePolicy::default()
            },
            ..RunConfig::default()
        };
        let heap = run_episode(&mut random_world(seed, 9, 5), &heap_config).unwrap();

        assert_eq!(linear.escaped.trace, heap.escaped.trace, "seed {seed}");
        assert_eq!(linear.explored.trace, heap.explored.trace, "seed {seed}");
        assert_ne!(linear.report.policy_digest, heap.report.policy_digest);
        assert_ne!(linear.report_digest, heap.report_digest);
    }
}

#[test]
fn different_worlds_have_different_digests() {
    let digests: std::collections::BTreeSet<String> = worlds::NAMES
        .iter()
        .map(|name| {
            run_episode(
                &mut worlds::by_name(name).unwrap().into_world().unwrap(),
                &RunConfig::default(),
            )
            .unwrap()
            .report_digest
            .as_str()
            .to_string()
        })
        .collect();
    assert_eq!(digests.len(), worlds::NAMES.len());
}
