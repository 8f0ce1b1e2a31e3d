//! Episode report: what happened in one explore-then-escape run.
//!
//! The report binds the cavern digest, the policy digest and both trace
//! digests, so its own digest changes if any input or any recorded move
//! does. Only integers and strings appear in the projection.

use cavern_kernel::graph::node::NodeId;
use cavern_kernel::proof::canon::{canonical_json_bytes, CanonError};
use cavern_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};
use cavern_search::escape::EscapeOutcome;
use cavern_search::explore::ExploreOutcome;
use cavern_search::policy::{EscapePolicy, ExplorePolicy};

use crate::world::CavernWorld;

pub const EPISODE_REPORT_SCHEMA_VERSION: &str = "episode_report.v1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExploreSummary {
    pub moves: u64,
    pub advances: usize,
    pub backtracks: usize,
    pub visited: usize,
    pub max_depth: usize,
    pub trace_digest: ContentHash,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscapeSummary {
    /// Route taken, orb excluded.
    pub path: Vec<NodeId>,
    pub path_weight: u64,
    pub gold_collected: u64,
    pub time_budget: u64,
    pub time_spent: u64,
    pub time_remaining: u64,
    pub trace_digest: ContentHash,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeReport {
    pub world: String,
    pub cavern_digest: ContentHash,
    pub start: NodeId,
    pub orb: NodeId,
    pub exit: NodeId,
    pub heuristic: &'static str,
    pub explore_policy: ExplorePolicy,
    pub escape_policy: EscapePolicy,
    pub policy_digest: ContentHash,
    pub explore: ExploreSummary,
    pub escape: EscapeSummary,
}

/// Digest of both policies together.
///
/// # Errors
///
/// Returns [`CanonError`] if canonicalization fails.
pub fn policy_digest(
    explore: &ExplorePolicy,
    escape: &EscapePolicy,
) -> Result<ContentHash, CanonError> {
    let basis = serde_json::json!({
        "escape": escape.to_json(),
        "explore": explore.to_json(),
    });
    Ok(canonical_hash(HashDomain::Policy, &canonical_json_bytes(&basis)?))
}

impl EpisodeReport {
    /// Assemble a report from a finished world and both outcomes.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if any digest cannot be computed.
    pub fn assemble(
        world: &CavernWorld,
        explore_policy: &ExplorePolicy,
        escape_policy: &EscapePolicy,
        explored: &ExploreOutcome,
        escaped: &EscapeOutcome,
    ) -> Result<Self, CanonError> {
        let layout = world.layout();
        Ok(Self {
            world: world.name().to_string(),
            cavern_digest: world.cavern().digest()?,
            start: layout.start,
            orb: layout.orb,
            exit: layout.exit,
            heuristic: layout.heuristic.as_str(),
            explore_policy: explore_policy.clone(),
            escape_policy: escape_policy.clone(),
            policy_digest: policy_digest(explore_policy, escape_policy)?,
            explore: ExploreSummary {
                moves: explored.moves,
                advances: explored.trace.advance_count(),
                backtracks: explored.trace.backtrack_count(),
                visited: explored.visited,
                max_depth: explored.max_depth,
                trace_digest: explored.trace.digest()?,
            },
            escape: EscapeSummary {
                path: escaped.path.steps.iter().map(|s| s.node).collect(),
                path_weight: escaped.path.total_weight,
                gold_collected: escaped.gold_collected,
                time_budget: world.time_budget(),
                time_spent: escaped.time_spent,
                time_remaining: world.time_remaining(),
                trace_digest: escaped.trace.digest()?,
            },
        })
    }

    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        let path: Vec<u64> = self.escape.path.iter().map(|id| id.get()).collect();
        serde_json::json!({
            "cavern_digest": self.cavern_digest.as_str(),
            "escape": {
                "gold_collected": self.escape.gold_collected,
                "path": path,
                "path_weight": self.escape.path_weight,
                "time_budget": self.escape.time_budget,
                "time_remaining": self.escape.time_remaining,
                "time_spent": self.escape.time_spent,
                "trace_digest": self.escape.trace_digest.as_str(),
            },
            "exit": self.exit.get(),
            "explore": {
                "advances": self.explore.advances,
                "backtracks": self.explore.backtracks,
                "max_depth": self.explore.max_depth,
                "moves": self.explore.moves,
                "trace_digest": self.explore.trace_digest.as_str(),
                "visited": self.explore.visited,
            },
            "heuristic": self.heuristic,
            "orb": self.orb.get(),
            "policy": {
                "digest": self.policy_digest.as_str(),
                "escape": self.escape_policy.to_json(),
                "explore": self.explore_policy.to_json(),
            },
            "schema_version": EPISODE_REPORT_SCHEMA_VERSION,
            "start": self.start.get(),
            "world": self.world,
        })
    }

    /// # Errors
    ///
    /// Returns [`CanonError`] if canonicalization fails.
    pub fn canonical_bytes(&self) -> Result<Vec<u8>, CanonError> {
        canonical_json_bytes(&self.to_json())
    }

    /// # Errors
    ///
    /// Returns [`CanonError`] if canonicalization fails.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        Ok(canonical_hash(
            HashDomain::EpisodeReport,
            &self.canonical_bytes()?,
        ))
    }
}
