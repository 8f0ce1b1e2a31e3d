//! Heuristic distance to the orb, as sensed by the exploring agent.

use std::collections::BTreeMap;

use cavern_kernel::graph::cavern::Cavern;
use cavern_kernel::graph::node::NodeId;

/// How the world answers "how far is the orb from here?".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Heuristic {
    /// Manhattan distance between tile coordinates.
    #[default]
    Manhattan,
    /// Explicit per-node distances. Must cover every node.
    Table(BTreeMap<NodeId, u64>),
}

impl Heuristic {
    /// Distance from `node` to `orb`, `None` if the heuristic cannot answer
    /// (unknown node, or a table with no entry).
    #[must_use]
    pub fn distance(&self, cavern: &Cavern, node: NodeId, orb: NodeId) -> Option<u64> {
        match self {
            Self::Manhattan => {
                let here = cavern.node(node)?.tile();
                let there = cavern.node(orb)?.tile();
                Some(here.manhattan(there))
            }
            Self::Table(table) => table.get(&node).copied(),
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Manhattan => "manhattan",
            Self::Table(_) => "table",
        }
    }

    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Manhattan => serde_json::json!({ "kind": "manhattan" }),
            Self::Table(table) => {
                let entries: serde_json::Map<String, serde_json::Value> = table
                    .iter()
                    .map(|(id, d)| (id.to_string(), serde_json::json!(d)))
                    .collect();
                serde_json::json!({ "kind": "table", "distances": entries })
            }
        }
    }
}
