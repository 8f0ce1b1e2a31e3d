//! Neighbour status and the candidate ordering used during exploration.

use std::cmp::Ordering;

use cavern_kernel::graph::node::NodeId;

/// One open neighbour of the agent's current node, as sensed this step.
///
/// Transient: produced by the handle on every call and never stored past the
/// frame that consumes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NeighborStatus {
    /// The neighbour.
    pub id: NodeId,
    /// Heuristic distance from the neighbour to the orb.
    pub distance: u64,
}

impl NeighborStatus {
    #[must_use]
    pub fn new(id: impl Into<NodeId>, distance: u64) -> Self {
        Self {
            id: id.into(),
            distance,
        }
    }

    /// Candidate order: lower heuristic distance first, ties broken by the
    /// lower node id.
    ///
    /// Not an `Ord` impl: two statuses with the same id but different
    /// distances are different observations.
    #[must_use]
    pub fn by_heuristic(a: &Self, b: &Self) -> Ordering {
        a.distance.cmp(&b.distance).then_with(|| a.id.cmp(&b.id))
    }
}
