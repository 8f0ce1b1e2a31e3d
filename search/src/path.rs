//! Turning a shortest-path tree into a walkable route.

use cavern_kernel::graph::cavern::Cavern;
use cavern_kernel::graph::node::{NodeId, Weight};

use crate::error::EscapeError;
use crate::shortest::ShortestPathTree;

/// One hop of an escape route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathStep {
    /// Node reached by this hop.
    pub node: NodeId,
    /// Weight of the edge taken.
    pub weight: Weight,
}

/// Route from the source (exclusive) to the exit (inclusive).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscapePath {
    pub source: NodeId,
    pub steps: Vec<PathStep>,
    pub total_weight: u64,
}

impl EscapePath {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Last node of the route; the source itself for an empty route.
    #[must_use]
    pub fn destination(&self) -> NodeId {
        self.steps.last().map_or(self.source, |s| s.node)
    }

    /// Every node on the route, source first.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::once(self.source).chain(self.steps.iter().map(|s| s.node))
    }

    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        let steps: Vec<serde_json::Value> = self
            .steps
            .iter()
            .map(|s| serde_json::json!({ "node": s.node.get(), "weight": s.weight }))
            .collect();
        serde_json::json!({
            "source": self.source.get(),
            "steps": steps,
            "total_weight": self.total_weight,
        })
    }
}

/// Walk predecessors back from `exit` and emit the route in walking order.
///
/// # Errors
///
/// - [`EscapeError::ExitUnreachable`] if `exit` has no predecessor chain.
/// - [`EscapeError::PredecessorCycle`] if the chain does not reach the
///   source within one hop per node.
/// - [`EscapeError::BrokenPredecessor`] if a hop names a non-adjacent node.
/// - [`EscapeError::WeightOverflow`] if every route to `exit` weighs more
///   than `u64::MAX`.
pub fn reconstruct_path(
    cavern: &Cavern,
    tree: &ShortestPathTree,
    exit: NodeId,
) -> Result<EscapePath, EscapeError> {
    let source = tree.source();
    let unreachable = EscapeError::ExitUnreachable {
        source_node: source,
        exit,
    };
    if tree.distance(exit).is_none() {
        if tree.overflows(exit) {
            return Err(EscapeError::WeightOverflow { node: exit });
        }
        return Err(unreachable);
    }

    let mut reversed: Vec<PathStep> = Vec::new();
    let mut current = exit;
    while current != source {
        if reversed.len() >= cavern.len() {
            return Err(EscapeError::PredecessorCycle {
                source_node: source,
                exit,
            });
        }
        let Some(prev) = tree.predecessor(current) else {
            return Err(unreachable);
        };
        let weight = cavern
            .edge_weight(prev, current)
            .ok_or(EscapeError::BrokenPredecessor {
                node: current,
                predecessor: prev,
            })?;
        reversed.push(PathStep {
            node: current,
            weight,
        });
        current = prev;
    }

    reversed.reverse();
    let total_weight = reversed
        .iter()
        .try_fold(0u64, |acc, s| acc.checked_add(s.weight))
        .ok_or(EscapeError::WeightOverflow { node: exit })?;
    Ok(EscapePath {
        source,
        steps: reversed,
        total_weight,
    })
}
