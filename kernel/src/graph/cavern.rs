//! `Cavern`: the static, undirected, weighted graph.
//!
//! Built once through [`CavernBuilder`], then read-only. Nodes are kept in a
//! `BTreeMap` (not `HashMap`) so that every iteration over the graph is in
//! ascending id order.

use std::collections::{BTreeMap, BTreeSet};

use super::error::GraphError;
use super::node::{Edge, Node, NodeId, Tile, Weight};
use crate::proof::canon::{canonical_json_bytes, CanonError};
use crate::proof::hash::{canonical_hash, ContentHash, HashDomain};

/// Schema tag written into the cavern's JSON projection.
pub const CAVERN_SCHEMA_VERSION: &str = "cavern.v1";

/// The complete cavern graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cavern {
    nodes: BTreeMap<NodeId, Node>,
    edge_count: usize,
}

impl Cavern {
    /// Start building a cavern.
    #[must_use]
    pub fn builder() -> CavernBuilder {
        CavernBuilder::default()
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// All nodes, ascending by id.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = &Node> + '_ {
        self.nodes.values()
    }

    /// All node ids, ascending.
    pub fn node_ids(&self) -> impl ExactSizeIterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of undirected edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Weight of the edge between `a` and `b`, if they are adjacent.
    #[must_use]
    pub fn edge_weight(&self, a: NodeId, b: NodeId) -> Option<Weight> {
        self.nodes.get(&a)?.edge_weight(b)
    }

    #[must_use]
    pub fn are_adjacent(&self, a: NodeId, b: NodeId) -> bool {
        self.edge_weight(a, b).is_some()
    }

    /// Sum of the initial gold on every tile.
    #[must_use]
    pub fn total_gold(&self) -> u64 {
        self.nodes.values().map(|n| u64::from(n.gold())).sum()
    }

    /// JSON projection of the cavern (nodes ascending by id, each undirected
    /// edge once with `a < b`).
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        let nodes: Vec<serde_json::Value> = self
            .nodes
            .values()
            .map(|n| {
                serde_json::json!({
                    "col": n.tile.col,
                    "gold": n.tile.gold,
                    "id": n.id.get(),
                    "row": n.tile.row,
                })
            })
            .collect();

        let edges: Vec<serde_json::Value> = self
            .nodes
            .values()
            .flat_map(|n| {
                n.edges
                    .iter()
                    .filter(move |e| n.id < e.to)
                    .map(move |e| {
                        serde_json::json!({
                            "a": n.id.get(),
                            "b": e.to.get(),
                            "weight": e.weight,
                        })
                    })
            })
            .collect();

        serde_json::json!({
            "edges": edges,
            "nodes": nodes,
            "schema_version": CAVERN_SCHEMA_VERSION,
        })
    }

    /// Content digest of the cavern's canonical JSON projection.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if the projection cannot be canonicalized.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        let bytes = canonical_json_bytes(&self.to_json())?;
        Ok(canonical_hash(HashDomain::CavernGraph, &bytes))
    }
}

/// Validating builder for [`Cavern`].
///
/// Nodes and edges may be declared in any order; validation happens in
/// [`CavernBuilder::build`].
#[derive(Debug, Clone, Default)]
pub struct CavernBuilder {
    nodes: Vec<(NodeId, Tile)>,
    edges: Vec<(NodeId, NodeId, Weight)>,
}

impl CavernBuilder {
    /// Declare a node.
    #[must_use]
    pub fn node(mut self, id: impl Into<NodeId>, tile: Tile) -> Self {
        self.nodes.push((id.into(), tile));
        self
    }

    /// Declare an undirected edge.
    #[must_use]
    pub fn edge(mut self, a: impl Into<NodeId>, b: impl Into<NodeId>, weight: Weight) -> Self {
        self.edges.push((a.into(), b.into(), weight));
        self
    }

    /// Validate the declarations and build the cavern.
    ///
    /// # Errors
    ///
    /// Returns the first [`GraphError`] found: duplicate node ids, edges to
    /// undeclared nodes, self-loops, or duplicate edges.
    pub fn build(self) -> Result<Cavern, GraphError> {
        let mut nodes: BTreeMap<NodeId, Node> = BTreeMap::new();
        for (id, tile) in self.nodes {
            if nodes.contains_key(&id) {
                return Err(GraphError::DuplicateNode(id));
            }
            nodes.insert(
                id,
                Node {
                    id,
                    tile,
                    edges: Vec::new(),
                },
            );
        }

        let mut seen: BTreeSet<(NodeId, NodeId)> = BTreeSet::new();
        for &(a, b, weight) in &self.edges {
            if a == b {
                return Err(GraphError::SelfLoop(a));
            }
            for endpoint in [a, b] {
                if !nodes.contains_key(&endpoint) {
                    return Err(GraphError::UnknownEndpoint {
                        a,
                        b,
                        missing: endpoint,
                    });
                }
            }
            if !seen.insert((a.min(b), a.max(b))) {
                return Err(GraphError::DuplicateEdge { a, b });
            }
            for (from, to) in [(a, b), (b, a)] {
                if let Some(node) = nodes.get_mut(&from) {
                    node.edges.push(Edge { to, weight });
                }
            }
        }

        for node in nodes.values_mut() {
            node.edges.sort_by_key(|e| e.to);
        }

        Ok(Cavern {
            nodes,
            edge_count: seen.len(),
        })
    }
}
