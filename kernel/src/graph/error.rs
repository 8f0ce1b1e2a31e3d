//! Typed cavern construction errors.

use super::node::NodeId;

/// Why a [`super::cavern::CavernBuilder`] refused to build.
///
/// Construction is fail-closed: the first violation found is reported and no
/// cavern is produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// Two nodes were declared with the same id.
    #[error("node {0} declared more than once")]
    DuplicateNode(NodeId),

    /// An edge references a node that was never declared.
    #[error("edge {a}-{b} references undeclared node {missing}")]
    UnknownEndpoint {
        a: NodeId,
        b: NodeId,
        missing: NodeId,
    },

    /// An edge connects a node to itself.
    #[error("self-loop on node {0}")]
    SelfLoop(NodeId),

    /// The same unordered pair was connected twice.
    #[error("edge {a}-{b} declared more than once")]
    DuplicateEdge { a: NodeId, b: NodeId },
}
