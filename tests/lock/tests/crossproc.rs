//! Cross-process determinism.
//!
//! Spawns the `episode_fixture` binary under several environment variants
//! and asserts that all produce identical output, so that nothing in an
//! episode depends on cwd, locale or stray environment variables.

use std::path::Path;
use std::process::Command;

use cavern_harness::worlds;

/// Path to the compiled `episode_fixture` binary next to this test binary.
///
/// No `.exe` suffix handling; Windows is not a target.
fn binary_path() -> String {
    let mut path = std::env::current_exe()
        .expect("can resolve test binary path")
        .parent()
        .expect("binary dir exists")
        .parent()
        .expect("deps parent exists")
        .to_path_buf();
    path.push("episode_fixture");
    path.to_string_lossy().to_string()
}

fn workspace_root() -> String {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("tests/ exists")
        .parent()
        .expect("workspace root exists")
        .to_string_lossy()
        .to_string()
}

fn run_variant(work_dir: &str, env_overrides: &[(&str, &str)]) -> String {
    let bin = binary_path();

    let mut command = Command::new(&bin);
    command
        .current_dir(work_dir)
        .env_remove("LC_ALL")
        .env_remove("LC_COLLATE")
        .env_remove("LANG")
        .env_remove("LANGUAGE")
        .env_remove("RUST_LOG");
    for &(key, val) in env_overrides {
        command.env(key, val);
    }

    let output = command.output().unwrap_or_else(|e| {
        panic!("failed to spawn {bin} (work_dir={work_dir}, overrides={env_overrides:?}): {e}")
    });
    assert!(
        output.status.success(),
        "episode_fixture exited with {}: stderr={}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("stdout is valid UTF-8")
}

#[test]
fn crossproc_output_is_environment_independent() {
    let root = workspace_root();
    let baseline = run_variant(&root, &[]);

    assert_eq!(baseline.lines().count(), worlds::NAMES.len());
    for (line, name) in baseline.lines().zip(worlds::NAMES) {
        assert!(line.starts_with(&format!("world={name} ")), "{line}");
        assert!(line.contains("report_digest=sha256:"), "{line}");
    }

    let variant_cwd = run_variant("/tmp", &[]);
    assert_eq!(baseline, variant_cwd, "output differs when cwd changes from {root}");

    let variant_locale = run_variant(&root, &[("LC_ALL", "C"), ("LANG", "C")]);
    assert_eq!(baseline, variant_locale, "output differs when LC_ALL=C LANG=C");

    let variant_noise = run_variant(
        &root,
        &[
            ("CAVERN_NOISE", "should_not_matter"),
            ("TZ", "America/New_York"),
            ("HOME", "/nonexistent"),
        ],
    );
    assert_eq!(baseline, variant_noise, "output differs with spurious env vars");

    // Logging goes to stderr only; turning it up must not touch stdout.
    let variant_logging = run_variant(&root, &[("RUST_LOG", "trace")]);
    assert_eq!(baseline, variant_logging, "output differs with RUST_LOG=trace");
}
