//! Environment handle contracts.
//!
//! The search core owns no environment state. Position, remaining time and
//! gold live behind these traits and are re-queried every step; the core
//! never caches them across a move.

use cavern_kernel::graph::cavern::Cavern;
use cavern_kernel::graph::node::{NodeId, Weight};

use crate::status::NeighborStatus;

/// Failure reported by a handle when asked to do something illegal.
///
/// These are environment contract violations from the core's point of view;
/// the core never retries them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HandleError {
    /// `move_to` targeted a node that is not an open neighbour.
    #[error("node {to} is not adjacent to {from}")]
    NotAdjacent { from: NodeId, to: NodeId },

    /// `move_to` targeted a node the environment does not know.
    #[error("unknown node {0}")]
    UnknownNode(NodeId),

    /// `collect_gold` was called where there is none.
    #[error("no gold to collect at node {0}")]
    NoGold(NodeId),

    /// The move would drive the time budget below zero.
    #[error("move to {to} costs {cost} but only {remaining} time remains")]
    OutOfTime {
        to: NodeId,
        cost: Weight,
        remaining: u64,
    },
}

/// What the agent can sense and do while looking for the orb.
///
/// # Contract
///
/// - `neighbor_statuses` describes the open neighbours of the *current*
///   position, freshly computed on every call.
/// - `distance_to_target` is exactly `0` on the orb and only there.
/// - `move_to` succeeds only for ids returned by the latest
///   `neighbor_statuses` call.
pub trait ExplorationHandle {
    /// Id of the node the agent stands on.
    fn current_location(&self) -> NodeId;

    /// Open neighbours of the current node with their heuristic distance.
    fn neighbor_statuses(&self) -> Vec<NeighborStatus>;

    /// Heuristic distance from the current node to the orb.
    fn distance_to_target(&self) -> u64;

    /// Step to an adjacent node.
    ///
    /// # Errors
    ///
    /// Returns [`HandleError`] if `to` is not an open neighbour.
    fn move_to(&mut self, to: NodeId) -> Result<(), HandleError>;
}

/// What the agent can see and do while escaping.
///
/// # Contract
///
/// - `cavern` is the complete graph and does not change during the escape.
/// - Each `move_to` charges the edge weight against `time_remaining`.
/// - `gold_here` reports the gold currently on the agent's node, which may
///   differ from the tile's initial gold.
pub trait EscapeHandle {
    /// Id of the node the agent stands on.
    fn current_node(&self) -> NodeId;

    /// Id of the exit node.
    fn exit_node(&self) -> NodeId;

    /// The full graph.
    fn cavern(&self) -> &Cavern;

    /// Time units left before the cavern collapses.
    fn time_remaining(&self) -> u64;

    /// Gold currently lying on the agent's node.
    fn gold_here(&self) -> u32;

    /// Step to an adjacent node, spending the edge weight.
    ///
    /// # Errors
    ///
    /// Returns [`HandleError`] if `to` is not adjacent or the move would
    /// exceed the remaining time.
    fn move_to(&mut self, to: NodeId) -> Result<(), HandleError>;

    /// Pick up all gold on the agent's node, returning the amount.
    ///
    /// # Errors
    ///
    /// Returns [`HandleError::NoGold`] if the node holds none.
    fn collect_gold(&mut self) -> Result<u32, HandleError>;
}
