//! Node identity, tile payload and adjacency entries.

use std::fmt;

/// Traversal cost of an edge, in time units.
pub type Weight = u64;

/// Unique node identifier.
///
/// The total order on `NodeId` is the deterministic tie-break used by every
/// search structure in the workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

impl NodeId {
    /// The raw integer value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for NodeId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// Payload attached to every node.
///
/// `gold` is the quantity present when the cavern was built. Live gold (after
/// collection) is tracked by the environment, not by the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tile {
    /// Grid row, used by coordinate-based heuristics.
    pub row: i32,
    /// Grid column, used by coordinate-based heuristics.
    pub col: i32,
    /// Initial gold on this tile.
    pub gold: u32,
}

impl Tile {
    #[must_use]
    pub const fn at(row: i32, col: i32) -> Self {
        Self { row, col, gold: 0 }
    }

    /// Same tile with `gold` replaced.
    #[must_use]
    pub const fn with_gold(self, gold: u32) -> Self {
        Self { gold, ..self }
    }

    /// Manhattan distance between two tiles' coordinates.
    #[must_use]
    pub fn manhattan(&self, other: &Tile) -> u64 {
        u64::from(self.row.abs_diff(other.row)) + u64::from(self.col.abs_diff(other.col))
    }
}

/// One adjacency entry: the neighbour reached and the cost of getting there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub to: NodeId,
    pub weight: Weight,
}

/// A node of the cavern.
///
/// Edges are sorted by neighbour id so that iteration order is a property of
/// the graph, not of the order edges were declared in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub(crate) id: NodeId,
    pub(crate) tile: Tile,
    pub(crate) edges: Vec<Edge>,
}

impl Node {
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    #[must_use]
    pub fn tile(&self) -> &Tile {
        &self.tile
    }

    /// Gold present on this node when the cavern was built.
    #[must_use]
    pub fn gold(&self) -> u32 {
        self.tile.gold
    }

    /// Adjacency entries, ascending by neighbour id.
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Neighbour ids, ascending.
    pub fn neighbors(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.edges.iter().map(|e| e.to)
    }

    /// Weight of the edge to `to`, if the two nodes are adjacent.
    #[must_use]
    pub fn edge_weight(&self, to: NodeId) -> Option<Weight> {
        self.edges
            .binary_search_by(|e| e.to.cmp(&to))
            .ok()
            .map(|i| self.edges[i].weight)
    }
}
