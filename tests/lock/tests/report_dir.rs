//! Report directory round trip and fail-closed verification.

use std::path::Path;

use cavern_harness::report_dir::{
    read_report_dir, write_report_dir, ReportDirError, ESCAPE_TRACE_FILENAME,
    EXPLORE_TRACE_FILENAME, REPORT_FILENAME,
};
use cavern_harness::runner::{run_episode, EpisodeRun, RunConfig};
use cavern_harness::worlds;

fn episode(name: &str) -> EpisodeRun {
    let mut world = worlds::by_name(name).unwrap().into_world().unwrap();
    run_episode(&mut world, &RunConfig::default()).unwrap()
}

fn written(name: &str) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    write_report_dir(&episode(name), dir.path()).unwrap();
    dir
}

fn rewrite_json(path: &Path, edit: impl FnOnce(&mut serde_json::Value)) {
    let mut value: serde_json::Value =
        serde_json::from_slice(&std::fs::read(path).unwrap()).unwrap();
    edit(&mut value);
    let bytes = cavern_kernel::proof::canon::canonical_json_bytes(&value).unwrap();
    std::fs::write(path, bytes).unwrap();
}

#[test]
fn every_canned_world_round_trips() {
    for &name in worlds::NAMES {
        let run = episode(name);
        let dir = tempfile::tempdir().unwrap();
        let digest = write_report_dir(&run, dir.path()).unwrap();
        let loaded = read_report_dir(dir.path()).unwrap();
        assert_eq!(loaded.report_digest, digest, "{name}");
        assert_eq!(loaded.report["world"], name);
    }
}

#[test]
fn rewriting_is_idempotent() {
    let run = episode("grid8");
    let dir = tempfile::tempdir().unwrap();
    write_report_dir(&run, dir.path()).unwrap();
    let first = std::fs::read(dir.path().join(REPORT_FILENAME)).unwrap();
    write_report_dir(&run, dir.path()).unwrap();
    let second = std::fs::read(dir.path().join(REPORT_FILENAME)).unwrap();
    assert_eq!(first, second);
    read_report_dir(dir.path()).unwrap();
}

#[test]
fn missing_trace_is_rejected() {
    let dir = written("line5");
    std::fs::remove_file(dir.path().join(ESCAPE_TRACE_FILENAME)).unwrap();
    assert!(matches!(
        read_report_dir(dir.path()),
        Err(ReportDirError::MissingFile(name)) if name == ESCAPE_TRACE_FILENAME
    ));
}

#[test]
fn edited_trace_fails_its_artifact_hash() {
    let dir = written("line5");
    rewrite_json(&dir.path().join(EXPLORE_TRACE_FILENAME), |v| {
        v["events"] = serde_json::json!([]);
    });
    assert!(matches!(
        read_report_dir(dir.path()),
        Err(ReportDirError::HashMismatch { name, .. }) if name == EXPLORE_TRACE_FILENAME
    ));
}

#[test]
fn non_canonical_bytes_are_rejected() {
    let dir = written("ring4");
    let path = dir.path().join(REPORT_FILENAME);
    let value: serde_json::Value = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
    std::fs::write(&path, serde_json::to_vec_pretty(&value).unwrap()).unwrap();
    // The artifact hash is checked first and already differs.
    assert!(matches!(
        read_report_dir(dir.path()),
        Err(ReportDirError::HashMismatch { .. } | ReportDirError::NonCanonical(_))
    ));
}

#[test]
fn garbage_manifest_is_a_parse_error() {
    let dir = written("ring4");
    std::fs::write(dir.path().join("report_manifest.json"), b"{not json").unwrap();
    assert!(matches!(
        read_report_dir(dir.path()),
        Err(ReportDirError::Parse { .. })
    ));
}

#[test]
fn manifest_schema_is_checked() {
    let dir = written("ring4");
    rewrite_json(&dir.path().join("report_manifest.json"), |v| {
        v["schema_version"] = serde_json::json!("report_dir.v0");
    });
    assert!(matches!(
        read_report_dir(dir.path()),
        Err(ReportDirError::SchemaMismatch { found }) if found == "report_dir.v0"
    ));
}

#[test]
fn dropping_a_manifest_entry_is_rejected() {
    let dir = written("ring4");
    rewrite_json(&dir.path().join("report_manifest.json"), |v| {
        let artifacts = v["artifacts"].as_array_mut().unwrap();
        artifacts.retain(|a| a["name"] != ESCAPE_TRACE_FILENAME);
    });
    assert!(matches!(
        read_report_dir(dir.path()),
        Err(ReportDirError::ManifestEntryInvalid(_))
    ));
}

#[test]
fn traces_swapped_between_episodes_are_caught() {
    // Copy a whole consistent trace (with a matching manifest hash) from a
    // different world: only the digest bound in the report can catch it.
    let dir = written("ring4");
    let other = written("line5");
    std::fs::copy(
        other.path().join(ESCAPE_TRACE_FILENAME),
        dir.path().join(ESCAPE_TRACE_FILENAME),
    )
    .unwrap();
    let manifest = dir.path().join("report_manifest.json");
    let other_manifest: serde_json::Value = serde_json::from_slice(
        &std::fs::read(other.path().join("report_manifest.json")).unwrap(),
    )
    .unwrap();
    rewrite_json(&manifest, |v| {
        let artifacts = v["artifacts"].as_array_mut().unwrap();
        for (mine, theirs) in artifacts
            .iter_mut()
            .zip(other_manifest["artifacts"].as_array().unwrap())
        {
            if mine["name"] == ESCAPE_TRACE_FILENAME {
                *mine = theirs.clone();
            }
        }
    });
    assert!(matches!(
        read_report_dir(dir.path()),
        Err(ReportDirError::HashMismatch { name, .. }) if name == ESCAPE_TRACE_FILENAME
    ));
}
