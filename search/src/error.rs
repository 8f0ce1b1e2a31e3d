//! Typed search and escape errors.
//!
//! [`PolicyError`] is pre-flight: nothing has moved yet. [`ExploreError`] and
//! [`EscapeError`] may be raised mid-run, in which case the handle is left
//! wherever the last successful move put it.

use cavern_kernel::graph::node::NodeId;

use crate::contract::HandleError;

/// A policy was rejected before the run started.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolicyError {
    #[error("max_moves must be greater than zero")]
    ZeroMoveBudget,
}

/// Exploration failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExploreError {
    #[error(transparent)]
    Policy(#[from] PolicyError),

    /// Every node reachable from the start was entered without finding the
    /// orb. The agent is back on the start node.
    #[error("orb unreachable from {start}: explored {explored} nodes")]
    TargetUnreachable { start: NodeId, explored: usize },

    /// The move cap was hit before the orb was found.
    #[error("move budget of {max_moves} exhausted before reaching the orb")]
    MoveBudgetExceeded { max_moves: u64 },

    #[error("exploration handle refused a move: {0}")]
    Handle(#[from] HandleError),
}

/// Escape failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EscapeError {
    /// Source or exit is not a node of the cavern.
    #[error("node {0} is not part of the cavern")]
    UnknownNode(NodeId),

    /// Dijkstra never reached the exit: the cavern is disconnected.
    #[error("exit {exit} is unreachable from {source_node}")]
    ExitUnreachable { source_node: NodeId, exit: NodeId },

    /// Following predecessors from the exit did not reach the source within
    /// one step per node.
    #[error("predecessor chain from {exit} does not terminate at {source_node}")]
    PredecessorCycle { source_node: NodeId, exit: NodeId },

    /// A predecessor link names a node that is not adjacent.
    #[error("predecessor {predecessor} of {node} is not adjacent to it")]
    BrokenPredecessor { node: NodeId, predecessor: NodeId },

    /// A route's total weight does not fit in a `u64`.
    #[error("distance to {node} overflows u64")]
    WeightOverflow { node: NodeId },

    /// The path is longer than the time left (only checked on request).
    #[error("escape path needs {needed} time but only {remaining} remains")]
    InsufficientTime { needed: u64, remaining: u64 },

    /// The walk finished somewhere other than the exit.
    #[error("walk ended on {actual}, expected exit {exit}")]
    NotOnExit { actual: NodeId, exit: NodeId },

    #[error("escape handle refused an action: {0}")]
    Handle(#[from] HandleError),
}
