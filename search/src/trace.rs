//! Audit logs for both phases.
//!
//! The event order is the normative surface: two runs of the same cavern and
//! policy must produce byte-identical canonical JSON, and therefore identical
//! digests.

use cavern_kernel::graph::node::{NodeId, Weight};
use cavern_kernel::proof::canon::{canonical_json_bytes, CanonError};
use cavern_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};

/// Schema tag for [`ExploreTrace::to_json`].
pub const EXPLORE_TRACE_SCHEMA_VERSION: &str = "explore_trace.v1";

/// Schema tag for [`EscapeTrace::to_json`].
pub const ESCAPE_TRACE_SCHEMA_VERSION: &str = "escape_trace.v1";

/// A single exploration move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExploreEvent {
    /// Moved into an unvisited neighbour.
    Advance {
        from: NodeId,
        to: NodeId,
        /// Heuristic distance of `to` as sensed from `from`.
        heuristic: u64,
    },
    /// Dead end: moved back to the node this branch was entered from.
    Backtrack { from: NodeId, to: NodeId },
}

impl ExploreEvent {
    #[must_use]
    pub fn to(&self) -> NodeId {
        match self {
            Self::Advance { to, .. } | Self::Backtrack { to, .. } => *to,
        }
    }

    fn to_json(self, index: usize) -> serde_json::Value {
        match self {
            Self::Advance {
                from,
                to,
                heuristic,
            } => serde_json::json!({
                "from": from.get(),
                "heuristic": heuristic,
                "index": index,
                "kind": "advance",
                "to": to.get(),
            }),
            Self::Backtrack { from, to } => serde_json::json!({
                "from": from.get(),
                "index": index,
                "kind": "backtrack",
                "to": to.get(),
            }),
        }
    }
}

/// Ordered exploration log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExploreTrace {
    events: Vec<ExploreEvent>,
}

impl ExploreTrace {
    pub(crate) fn push(&mut self, event: ExploreEvent) {
        self.events.push(event);
    }

    #[must_use]
    pub fn events(&self) -> &[ExploreEvent] {
        &self.events
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    #[must_use]
    pub fn advance_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, ExploreEvent::Advance { .. }))
            .count()
    }

    #[must_use]
    pub fn backtrack_count(&self) -> usize {
        self.events.len() - self.advance_count()
    }

    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        let events: Vec<serde_json::Value> = self
            .events
            .iter()
            .enumerate()
            .map(|(i, e)| e.to_json(i))
            .collect();
        serde_json::json!({
            "event_count": events.len(),
            "events": events,
            "schema_version": EXPLORE_TRACE_SCHEMA_VERSION,
        })
    }

    /// Canonical JSON bytes of [`ExploreTrace::to_json`].
    ///
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
            HashDomain::ExploreTrace,
            &self.canonical_bytes()?,
        ))
    }
}

/// One step of the escape walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EscapeStep {
    pub node: NodeId,
    /// Weight of the edge taken to reach `node`.
    pub weight: Weight,
    /// Gold collected on arrival (0 if none or collection disabled).
    pub gold: u32,
    /// Time left after the move, as reported by the handle.
    pub time_remaining: u64,
}

/// Ordered escape log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EscapeTrace {
    steps: Vec<EscapeStep>,
}

impl EscapeTrace {
    pub(crate) fn push(&mut self, step: EscapeStep) {
        self.steps.push(step);
    }

    #[must_use]
    pub fn steps(&self) -> &[EscapeStep] {
        &self.steps
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        let steps: Vec<serde_json::Value> = self
            .steps
            .iter()
            .enumerate()
            .map(|(i, s)| {
                serde_json::json!({
                    "gold": s.gold,
                    "index": i,
                    "node": s.node.get(),
                    "time_remaining": s.time_remaining,
                    "weight": s.weight,
                })
            })
            .collect();
        serde_json::json!({
            "schema_version": ESCAPE_TRACE_SCHEMA_VERSION,
            "step_count": steps.len(),
            "steps": steps,
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
        Ok(canonical_hash(HashDomain::EscapeTrace, &self.canonical_bytes()?))
    }
}
