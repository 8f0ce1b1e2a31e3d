//! JSON cavern fixtures.
//!
//! ```json
//! {
//!   "name": "ring4",
//!   "nodes": [{"id": 1, "row": 0, "col": 0, "gold": 5}, ...],
//!   "edges": [{"a": 1, "b": 2, "weight": 1}, ...],
//!   "start": 1, "orb": 3, "exit": 1,
//!   "time_budget": 10,
//!   "heuristic": {"1": 2, "2": 1, "3": 0}
//! }
//! ```
//!
//! `gold`, `time_budget` and `heuristic` are optional. Without a heuristic
//! table the world senses Manhattan distance over tile coordinates. Unknown
//! fields are ignored so that fixtures can carry annotations.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use cavern_kernel::graph::cavern::Cavern;
use cavern_kernel::graph::error::GraphError;
use cavern_kernel::graph::node::{NodeId, Tile};
use serde::{Deserialize, Serialize};

use crate::heuristic::Heuristic;
use crate::world::{CavernWorld, WorldError, WorldLayout};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeFixture {
    pub id: u64,
    pub row: i32,
    pub col: i32,
    #[serde(default)]
    pub gold: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeFixture {
    pub a: u64,
    pub b: u64,
    pub weight: u64,
}

/// On-disk description of one episode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CavernFixture {
    pub name: String,
    pub nodes: Vec<NodeFixture>,
    pub edges: Vec<EdgeFixture>,
    pub start: u64,
    pub orb: u64,
    pub exit: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_budget: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heuristic: Option<BTreeMap<u64, u64>>,
}

#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    #[error("cannot read fixture {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed fixture JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid cavern: {0}")]
    Graph(#[from] GraphError),

    #[error("invalid world: {0}")]
    World(#[from] WorldError),
}

impl CavernFixture {
    /// # Errors
    ///
    /// Returns [`FixtureError::Parse`] on malformed JSON.
    pub fn from_json(text: &str) -> Result<Self, FixtureError> {
        Ok(serde_json::from_str(text)?)
    }

    /// # Errors
    ///
    /// Returns [`FixtureError::Io`] or [`FixtureError::Parse`].
    pub fn load(path: &Path) -> Result<Self, FixtureError> {
        let text = std::fs::read_to_string(path).map_err(|source| FixtureError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Pretty JSON, for writing fixtures by hand or from canned worlds.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::Parse`] if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, FixtureError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// # Errors
    ///
    /// Returns [`FixtureError::Graph`] for structural problems.
    pub fn cavern(&self) -> Result<Cavern, FixtureError> {
        let mut builder = Cavern::builder();
        for n in &self.nodes {
            builder = builder.node(n.id, Tile::at(n.row, n.col).with_gold(n.gold));
        }
        for e in &self.edges {
            builder = builder.edge(e.a, e.b, e.weight);
        }
        Ok(builder.build()?)
    }

    #[must_use]
    pub fn layout(&self) -> WorldLayout {
        let heuristic = match &self.heuristic {
            Some(table) => Heuristic::Table(
                table.iter().map(|(&id, &d)| (NodeId(id), d)).collect(),
            ),
            None => Heuristic::Manhattan,
        };
        WorldLayout {
            start: NodeId(self.start),
            orb: NodeId(self.orb),
            exit: NodeId(self.exit),
            heuristic,
            time_budget: self.time_budget,
        }
    }

    /// Build and validate the world this fixture describes.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::Graph`] or [`FixtureError::World`].
    pub fn into_world(self) -> Result<CavernWorld, FixtureError> {
        let cavern = self.cavern()?;
        let layout = self.layout();
        Ok(CavernWorld::new(self.name, cavern, layout)?)
    }

    /// Describe an existing world (its initial state) as a fixture.
    #[must_use]
    pub fn from_world(world: &CavernWorld) -> Self {
        let layout = world.layout();
        let nodes = world
            .cavern()
            .nodes()
            .map(|n| NodeFixture {
                id: n.id().get(),
                row: n.tile().row,
                col: n.tile().col,
                gold: n.gold(),
            })
            .collect();
        let mut edges = Vec::new();
        for node in world.cavern().nodes() {
            for edge in node.edges() {
                if node.id() < edge.to {
                    edges.push(EdgeFixture {
                        a: node.id().get(),
                        b: edge.to.get(),
                        weight: edge.weight,
                    });
                }
            }
        }
        let heuristic = match &layout.heuristic {
            Heuristic::Manhattan => None,
            Heuristic::Table(table) => Some(table.iter().map(|(id, &d)| (id.get(), d)).collect()),
        };
        Self {
            name: world.name().to_string(),
            nodes,
            edges,
            start: layout.start.get(),
            orb: layout.orb.get(),
            exit: layout.exit.get(),
            time_budget: layout.time_budget,
            heuristic,
        }
    }
}
