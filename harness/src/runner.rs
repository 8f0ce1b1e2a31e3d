//! Episode runner: explore, then escape, then report.
//!
//! # Pipeline
//!
//! ```text
//! validate policies → explore(ExplorationView) → begin_escape()
//!   → escape(EscapeView) → EpisodeReport::assemble()
//! ```
//!
//! The two search entry points never call each other; this module is the
//! only place that sequences them.

use cavern_kernel::proof::canon::CanonError;
use cavern_kernel::proof::hash::ContentHash;
use cavern_search::error::{EscapeError, ExploreError, PolicyError};
use cavern_search::escape::{escape, EscapeOutcome};
use cavern_search::explore::{explore, ExploreOutcome};
use cavern_search::policy::{EscapePolicy, ExplorePolicy};
use tracing::{info, info_span};

use crate::report::EpisodeReport;
use crate::world::{CavernWorld, WorldError};

/// Policies for one episode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunConfig {
    pub explore: ExplorePolicy,
    pub escape: EscapePolicy,
}

impl RunConfig {
    /// # Errors
    ///
    /// Returns [`PolicyError`] if the exploration policy is invalid. Escape
    /// policies have no invalid states.
    pub fn validate(&self) -> Result<(), PolicyError> {
        self.explore.validate()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RunError {
    #[error("invalid run configuration: {0}")]
    Policy(#[from] PolicyError),

    #[error("exploration failed: {0}")]
    Explore(#[from] ExploreError),

    #[error("escape failed: {0}")]
    Escape(#[from] EscapeError),

    #[error(transparent)]
    World(#[from] WorldError),

    #[error("report serialization failed: {0}")]
    Canon(#[from] CanonError),
}

/// Everything one episode produced.
#[derive(Debug, Clone)]
pub struct EpisodeRun {
    pub explored: ExploreOutcome,
    pub escaped: EscapeOutcome,
    pub report: EpisodeReport,
    pub report_digest: ContentHash,
}

/// Run both phases against `world`.
///
/// The world is consumed phase-wise: on success it is left in the escape
/// phase with the agent on the exit.
///
/// # Errors
///
/// Returns the first [`RunError`] raised. The world is left wherever the
/// failing phase stopped.
pub fn run_episode(world: &mut CavernWorld, config: &RunConfig) -> Result<EpisodeRun, RunError> {
    config.validate()?;
    let span = info_span!("episode", world = %world.name());
    let _guard = span.enter();

    let explored = explore(&mut world.exploration()?, &config.explore)?;
    let escaped = escape(&mut world.begin_escape()?, &config.escape)?;

    let report = EpisodeReport::assemble(
        world,
        &config.explore,
        &config.escape,
        &explored,
        &escaped,
    )?;
    let report_digest = report.digest()?;
    info!(
        digest = %report_digest,
        explore_moves = explored.moves,
        gold = escaped.gold_collected,
        "episode complete"
    );
    Ok(EpisodeRun {
        explored,
        escaped,
        report,
        report_digest,
    })
}
