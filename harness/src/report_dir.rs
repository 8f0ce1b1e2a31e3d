//! Report directory persistence: write, read and verify an episode on disk.
//!
//! # Directory layout (`report_dir.v1`)
//!
//! ```text
//! <dir>/
//!   report_manifest.json   canonical JSON, artifact listing
//!   report_digest.txt      "sha256:..." digest of episode_report.json
//!   episode_report.json    canonical JSON
//!   explore_trace.json     canonical JSON
//!   escape_trace.json      canonical JSON
//! ```
//!
//! The directory path is never part of any hash surface.
//!
//! # Fail-closed semantics
//!
//! - Missing metadata or artifact files are errors.
//! - Undeclared extra files are errors.
//! - Any artifact whose bytes are not canonical JSON is an error.
//! - Artifact hashes, the report digest and the trace digests bound inside
//!   the report must all match what is on disk.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use cavern_kernel::proof::canon::{canonical_json_bytes, CanonError};
use cavern_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};
use tracing::debug;

use crate::runner::EpisodeRun;

pub const REPORT_DIR_SCHEMA_VERSION: &str = "report_dir.v1";

const MANIFEST_FILENAME: &str = "report_manifest.json";
const DIGEST_FILENAME: &str = "report_digest.txt";
pub const REPORT_FILENAME: &str = "episode_report.json";
pub const EXPLORE_TRACE_FILENAME: &str = "explore_trace.json";
pub const ESCAPE_TRACE_FILENAME: &str = "escape_trace.json";

const ARTIFACT_FILENAMES: &[&str] = &[
    REPORT_FILENAME,
    EXPLORE_TRACE_FILENAME,
    ESCAPE_TRACE_FILENAME,
];

#[derive(Debug, thiserror::Error)]
pub enum ReportDirError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Canon(#[from] CanonError),

    #[error("missing file: {0}")]
    MissingFile(String),

    #[error("undeclared extra file: {0}")]
    ExtraFile(String),

    #[error("{name} is not valid JSON: {detail}")]
    Parse { name: String, detail: String },

    #[error("{0} is not in canonical form")]
    NonCanonical(String),

    #[error("manifest schema {found:?} is not {}", REPORT_DIR_SCHEMA_VERSION)]
    SchemaMismatch { found: String },

    #[error("manifest entry invalid: {0}")]
    ManifestEntryInvalid(String),

    #[error("{name}: declared {declared}, recomputed {recomputed}")]
    HashMismatch {
        name: String,
        declared: String,
        recomputed: String,
    },
}

/// An episode as read back from disk, after every check passed.
#[derive(Debug, Clone)]
pub struct LoadedReport {
    pub report: serde_json::Value,
    pub report_digest: ContentHash,
    pub explore_trace: serde_json::Value,
    pub escape_trace: serde_json::Value,
}

/// Write an episode's report and traces to `dir`, creating it if needed.
///
/// # Errors
///
/// Returns [`ReportDirError::Io`] or [`ReportDirError::Canon`].
pub fn write_report_dir(run: &EpisodeRun, dir: &Path) -> Result<ContentHash, ReportDirError> {
    std::fs::create_dir_all(dir).map_err(|source| ReportDirError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let artifacts = [
        (REPORT_FILENAME, run.report.canonical_bytes()?),
        (EXPLORE_TRACE_FILENAME, run.explored.trace.canonical_bytes()?),
        (ESCAPE_TRACE_FILENAME, run.escaped.trace.canonical_bytes()?),
    ];

    let mut entries = Vec::with_capacity(artifacts.len());
    for (name, bytes) in &artifacts {
        write_atomic(&dir.join(name), bytes)?;
        entries.push(serde_json::json!({
            "content_hash": canonical_hash(HashDomain::ReportArtifact, bytes).as_str(),
            "name": name,
        }));
    }

    let manifest = serde_json::json!({
        "artifacts": entries,
        "schema_version": REPORT_DIR_SCHEMA_VERSION,
    });
    write_atomic(&dir.join(MANIFEST_FILENAME), &canonical_json_bytes(&manifest)?)?;
    write_atomic(
        &dir.join(DIGEST_FILENAME),
        run.report_digest.as_str().as_bytes(),
    )?;

    debug!(dir = %dir.display(), digest = %run.report_digest, "report directory written");
    Ok(run.report_digest.clone())
}

/// Read and verify a report directory.
///
/// # Errors
///
/// Returns [`ReportDirError`] on the first failed check.
pub fn read_report_dir(dir: &Path) -> Result<LoadedReport, ReportDirError> {
    let manifest_bytes = read_required(dir, MANIFEST_FILENAME)?;
    let manifest = parse_canonical(MANIFEST_FILENAME, &manifest_bytes)?;

    let found = manifest["schema_version"].as_str().unwrap_or_default();
    if found != REPORT_DIR_SCHEMA_VERSION {
        return Err(ReportDirError::SchemaMismatch {
            found: found.to_string(),
        });
    }

    let entries = manifest["artifacts"].as_array().ok_or_else(|| {
        ReportDirError::ManifestEntryInvalid("\"artifacts\" is not an array".into())
    })?;

    let mut declared: BTreeSet<String> = BTreeSet::new();
    for entry in entries {
        let name = entry["name"]
            .as_str()
            .ok_or_else(|| ReportDirError::ManifestEntryInvalid("missing \"name\"".into()))?;
        let hash = entry["content_hash"].as_str().ok_or_else(|| {
            ReportDirError::ManifestEntryInvalid(format!("missing \"content_hash\" for {name}"))
        })?;
        let bytes = read_required(dir, name)?;
        let recomputed = canonical_hash(HashDomain::ReportArtifact, &bytes);
        if recomputed.as_str() != hash {
            return Err(ReportDirError::HashMismatch {
                name: name.to_string(),
                declared: hash.to_string(),
                recomputed: recomputed.as_str().to_string(),
            });
        }
        declared.insert(name.to_string());
    }

    for required in ARTIFACT_FILENAMES {
        if !declared.contains(*required) {
            return Err(ReportDirError::ManifestEntryInvalid(format!(
                "{required} not declared"
            )));
        }
    }

    for name in list_files(dir)? {
        if !declared.contains(&name) && name != MANIFEST_FILENAME && name != DIGEST_FILENAME {
            return Err(ReportDirError::ExtraFile(name));
        }
    }

    let report_bytes = read_required(dir, REPORT_FILENAME)?;
    let report = parse_canonical(REPORT_FILENAME, &report_bytes)?;
    let report_digest = canonical_hash(HashDomain::EpisodeReport, &report_bytes);
    let stored = String::from_utf8_lossy(&read_required(dir, DIGEST_FILENAME)?)
        .trim()
        .to_string();
    if stored != report_digest.as_str() {
        return Err(ReportDirError::HashMismatch {
            name: DIGEST_FILENAME.to_string(),
            declared: stored,
            recomputed: report_digest.as_str().to_string(),
        });
    }

    let explore_trace = read_bound_trace(
        dir,
        EXPLORE_TRACE_FILENAME,
        HashDomain::ExploreTrace,
        &report["explore"]["trace_digest"],
    )?;
    let escape_trace = read_bound_trace(
        dir,
        ESCAPE_TRACE_FILENAME,
        HashDomain::EscapeTrace,
        &report["escape"]["trace_digest"],
    )?;

    Ok(LoadedReport {
        report,
        report_digest,
        explore_trace,
        escape_trace,
    })
}

/// A trace file must hash to the digest the report binds for it.
fn read_bound_trace(
    dir: &Path,
    name: &str,
    domain: HashDomain,
    bound: &serde_json::Value,
) -> Result<serde_json::Value, ReportDirError> {
    let bytes = read_required(dir, name)?;
    let value = parse_canonical(name, &bytes)?;
    let recomputed = canonical_hash(domain, &bytes);
    let declared = bound.as_str().unwrap_or_default();
    if recomputed.as_str() != declared {
        return Err(ReportDirError::HashMismatch {
            name: name.to_string(),
            declared: declared.to_string(),
            recomputed: recomputed.as_str().to_string(),
        });
    }
    Ok(value)
}

fn parse_canonical(name: &str, bytes: &[u8]) -> Result<serde_json::Value, ReportDirError> {
    let value: serde_json::Value =
        serde_json::from_slice(bytes).map_err(|e| ReportDirError::Parse {
            name: name.to_string(),
            detail: e.to_string(),
        })?;
    if canonical_json_bytes(&value)? != bytes {
        return Err(ReportDirError::NonCanonical(name.to_string()));
    }
    Ok(value)
}

/// Write via temp file + rename so a crash never leaves a half-written file.
fn write_atomic(path: &Path, content: &[u8]) -> Result<(), ReportDirError> {
    let io = |source| ReportDirError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file_name = path.file_name().unwrap_or_default().to_string_lossy();
    let temp = path.with_file_name(format!(".tmp_{file_name}"));
    std::fs::write(&temp, content).map_err(io)?;
    std::fs::rename(&temp, path).map_err(io)
}

fn read_required(dir: &Path, name: &str) -> Result<Vec<u8>, ReportDirError> {
    std::fs::read(dir.join(name)).map_err(|_| ReportDirError::MissingFile(name.to_string()))
}

fn list_files(dir: &Path) -> Result<BTreeSet<String>, ReportDirError> {
    let io = |source| ReportDirError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut files = BTreeSet::new();
    for entry in std::fs::read_dir(dir).map_err(io)? {
        let entry = entry.map_err(io)?;
        if !entry.file_type().map_err(io)?.is_file() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            if !name.starts_with(".tmp_") {
                files.insert(name.to_string());
            }
        }
    }
    Ok(files)
}
