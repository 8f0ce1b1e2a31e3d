//! Fixtures on disk: canned worlds written out and loaded back.

use cavern_harness::fixture::{CavernFixture, FixtureError};
use cavern_harness::runner::{run_episode, RunConfig};
use cavern_harness::world::WorldError;
use cavern_harness::worlds;
use cavern_kernel::graph::node::NodeId;

#[test]
fn canned_worlds_survive_a_trip_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    for &name in worlds::NAMES {
        let fixture = worlds::by_name(name).unwrap();
        let path = dir.path().join(format!("{name}.json"));
        std::fs::write(&path, fixture.to_json_pretty().unwrap()).unwrap();

        let loaded = CavernFixture::load(&path).unwrap();
        assert_eq!(loaded, fixture, "{name}");

        let from_memory = run_episode(&mut fixture.into_world().unwrap(), &RunConfig::default())
            .unwrap();
        let from_disk =
            run_episode(&mut loaded.into_world().unwrap(), &RunConfig::default()).unwrap();
        assert_eq!(from_memory.report_digest, from_disk.report_digest, "{name}");
    }
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");
    match CavernFixture::load(&path) {
        Err(FixtureError::Io { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected Io error, got {other:?}"),
    }
}

#[test]
fn heuristic_table_drives_exploration() {
    // Manhattan would pull toward node 2 first; the table sends the agent
    // through node 3 instead.
    let text = r#"{
        "name": "steered",
        "nodes": [
            {"id": 1, "row": 0, "col": 0},
            {"id": 2, "row": 0, "col": 1},
            {"id": 3, "row": 1, "col": 0},
            {"id": 4, "row": 1, "col": 1}
        ],
        "edges": [
            {"a": 1, "b": 2, "weight": 1},
            {"a": 1, "b": 3, "weight": 1},
            {"a": 2, "b": 4, "weight": 1},
            {"a": 3, "b": 4, "weight": 1}
        ],
        "start": 1, "orb": 4, "exit": 1,
        "heuristic": {"1": 9, "2": 8, "3": 1, "4": 0}
    }"#;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("steered.json");
    std::fs::write(&path, text).unwrap();

    let mut world = CavernFixture::load(&path).unwrap().into_world().unwrap();
    let run = run_episode(&mut world, &RunConfig::default()).unwrap();
    let first = run.explored.trace.events()[0].to();
    assert_eq!(first, NodeId(3));
    assert_eq!(run.report.heuristic, "table");
}

#[test]
fn table_with_false_zero_is_rejected() {
    let mut fixture = worlds::by_name("ring4").unwrap();
    fixture.heuristic = Some([(1, 2), (2, 0), (3, 0), (4, 1)].into_iter().collect());
    assert!(matches!(
        fixture.into_world(),
        Err(FixtureError::World(WorldError::HeuristicFalseZero(NodeId(2))))
    ));
}
