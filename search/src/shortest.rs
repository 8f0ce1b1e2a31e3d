//! Single-source shortest paths over the full cavern.

use std::collections::{BTreeMap, BTreeSet};

use cavern_kernel::graph::cavern::Cavern;
use cavern_kernel::graph::node::NodeId;
use tracing::{debug, trace, warn};

use crate::error::EscapeError;
use crate::frontier::{Frontier, HeapFrontier, LinearFrontier};
use crate::policy::SelectionStrategy;

/// Distances, predecessors and settle order from one source.
///
/// A node absent from the distance table is unreachable. The source has
/// distance 0 and no predecessor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortestPathTree {
    source: NodeId,
    dist: BTreeMap<NodeId, u64>,
    pred: BTreeMap<NodeId, NodeId>,
    settle_order: Vec<NodeId>,
    overflowed: BTreeSet<NodeId>,
}

impl ShortestPathTree {
    #[must_use]
    pub fn source(&self) -> NodeId {
        self.source
    }

    /// Shortest distance from the source, `None` if unreachable.
    #[must_use]
    pub fn distance(&self, id: NodeId) -> Option<u64> {
        self.dist.get(&id).copied()
    }

    /// Node preceding `id` on its shortest path.
    #[must_use]
    pub fn predecessor(&self, id: NodeId) -> Option<NodeId> {
        self.pred.get(&id).copied()
    }

    /// Nodes in the order they were settled, source first.
    #[must_use]
    pub fn settle_order(&self) -> &[NodeId] {
        &self.settle_order
    }

    /// True if `id` is connected to the source but every route to it weighs
    /// more than `u64::MAX`.
    #[must_use]
    pub fn overflows(&self, id: NodeId) -> bool {
        self.overflowed.contains(&id)
    }

    #[must_use]
    pub fn reachable_count(&self) -> usize {
        self.dist.len()
    }

    #[must_use]
    pub fn distances(&self) -> &BTreeMap<NodeId, u64> {
        &self.dist
    }

    #[must_use]
    pub fn predecessors(&self) -> &BTreeMap<NodeId, NodeId> {
        &self.pred
    }

    /// Assemble a tree directly, bypassing Dijkstra.
    #[cfg(test)]
    pub(crate) fn from_parts(
        source: NodeId,
        dist: BTreeMap<NodeId, u64>,
        pred: BTreeMap<NodeId, NodeId>,
    ) -> Self {
        Self {
            source,
            dist,
            pred,
            settle_order: Vec::new(),
            overflowed: BTreeSet::new(),
        }
    }
}

/// Dijkstra from `source` with the chosen selection strategy.
///
/// Relaxation uses strict `<`, so the first predecessor to reach a distance
/// keeps it. A candidate distance past `u64::MAX` never improves anything;
/// nodes only reachable that way are left out of the distance table and
/// reported by [`ShortestPathTree::overflows`]. Stops once nothing unsettled
/// has a finite distance; the rest of the cavern is left out of the tree.
///
/// # Errors
///
/// Returns [`EscapeError::UnknownNode`] if `source` is not in the cavern.
pub fn shortest_paths(
    cavern: &Cavern,
    source: NodeId,
    strategy: SelectionStrategy,
) -> Result<ShortestPathTree, EscapeError> {
    if !cavern.contains(source) {
        return Err(EscapeError::UnknownNode(source));
    }
    let tree = match strategy {
        SelectionStrategy::LinearScan => {
            run(cavern, source, LinearFrontier::new(cavern.node_ids()))
        }
        SelectionStrategy::BinaryHeap => run(cavern, source, HeapFrontier::new(source)),
    };
    debug!(
        source = %source,
        strategy = strategy.as_str(),
        settled = tree.settle_order.len(),
        nodes = cavern.len(),
        "shortest paths computed"
    );
    Ok(tree)
}

fn run<F: Frontier>(cavern: &Cavern, source: NodeId, mut frontier: F) -> ShortestPathTree {
    let mut dist: BTreeMap<NodeId, u64> = BTreeMap::from([(source, 0)]);
    let mut pred: BTreeMap<NodeId, NodeId> = BTreeMap::new();
    let mut settle_order = Vec::with_capacity(cavern.len());
    let mut overflowed: BTreeSet<NodeId> = BTreeSet::new();

    while let Some(u) = frontier.pop_min(&dist) {
        let Some(&du) = dist.get(&u) else { continue };
        settle_order.push(u);
        trace!(node = %u, distance = du, "settled");

        let Some(node) = cavern.node(u) else { continue };
        for edge in node.edges() {
            let Some(candidate) = du.checked_add(edge.weight) else {
                if !dist.contains_key(&edge.to) {
                    overflowed.insert(edge.to);
                }
                continue;
            };
            if !matches!(dist.get(&edge.to), Some(&dv) if dv <= candidate) {
                dist.insert(edge.to, candidate);
                pred.insert(edge.to, u);
                frontier.decreased(edge.to, candidate);
            }
        }
    }

    overflowed.retain(|id| !dist.contains_key(id));
    if !overflowed.is_empty() {
        warn!(source = %source, count = overflowed.len(), "route weights overflow u64");
    }
    ShortestPathTree {
        source,
        dist,
        pred,
        settle_order,
        overflowed,
    }
}
