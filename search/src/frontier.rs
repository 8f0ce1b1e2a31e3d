//! Dijkstra frontiers: which unsettled node to settle next.
//!
//! Both implementations answer the same question with the same tie-break
//! (smallest tentative distance, then lowest node id) so that the settle
//! order is a property of the graph and not of the strategy chosen.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet, BinaryHeap};

use cavern_kernel::graph::node::NodeId;

/// Selection seam between the Dijkstra loop and its priority structure.
///
/// `dist` holds the tentative distances; a node absent from it is at
/// infinity and must never be returned.
pub trait Frontier {
    /// Remove and return the next node to settle, or `None` when no unsettled
    /// node has a finite distance.
    fn pop_min(&mut self, dist: &BTreeMap<NodeId, u64>) -> Option<NodeId>;

    /// `id` just had its tentative distance lowered to `distance`.
    fn decreased(&mut self, id: NodeId, distance: u64);
}

/// Quadratic selection: every pop scans every unsettled node.
#[derive(Debug, Clone)]
pub struct LinearFrontier {
    unsettled: BTreeSet<NodeId>,
}

impl LinearFrontier {
    #[must_use]
    pub fn new(nodes: impl IntoIterator<Item = NodeId>) -> Self {
        Self {
            unsettled: nodes.into_iter().collect(),
        }
    }
}

impl Frontier for LinearFrontier {
    fn pop_min(&mut self, dist: &BTreeMap<NodeId, u64>) -> Option<NodeId> {
        let mut best: Option<(u64, NodeId)> = None;
        // Ascending id order plus strict `<` keeps the lowest id on ties.
        for &id in &self.unsettled {
            let Some(&d) = dist.get(&id) else { continue };
            match best {
                Some((bd, _)) if d >= bd => {}
                _ => best = Some((d, id)),
            }
        }
        let (_, id) = best?;
        self.unsettled.remove(&id);
        Some(id)
    }

    fn decreased(&mut self, _id: NodeId, _distance: u64) {}
}

/// Lazy-deletion min-heap keyed by `(distance, id)`.
///
/// A decrease pushes a fresh entry; stale entries (already settled, or whose
/// distance no longer matches the table) are discarded on pop.
#[derive(Debug, Clone)]
pub struct HeapFrontier {
    heap: BinaryHeap<Reverse<(u64, NodeId)>>,
    settled: BTreeSet<NodeId>,
}

impl HeapFrontier {
    #[must_use]
    pub fn new(source: NodeId) -> Self {
        let mut heap = BinaryHeap::new();
        heap.push(Reverse((0, source)));
        Self {
            heap,
            settled: BTreeSet::new(),
        }
    }
}

impl Frontier for HeapFrontier {
    fn pop_min(&mut self, dist: &BTreeMap<NodeId, u64>) -> Option<NodeId> {
        while let Some(Reverse((d, id))) = self.heap.pop() {
            if self.settled.contains(&id) || dist.get(&id) != Some(&d) {
                continue;
            }
            self.settled.insert(id);
            return Some(id);
        }
        None
    }

    fn decreased(&mut self, id: NodeId, distance: u64) {
        self.heap.push(Reverse((distance, id)));
    }
}
