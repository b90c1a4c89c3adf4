//! Graph-specific error types.

use pr_core::{NodeId, PrError};
use thiserror::Error;

pub type GraphResult<T> = Result<T, GraphError>;

/// Graph construction, validation and edge-cost lookup errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    /// A graph needs at least one node (the source).
    #[error("Graph has no nodes")]
    Empty,

    /// An edge refers to a node that doesn't exist.
    #[error("Edge {from} -> {to} refers to a non-existent node (node count {node_count})")]
    InvalidNodeRef {
        from: u32,
        to: u32,
        node_count: usize,
    },

    #[error("Self-loop on node {node}")]
    SelfLoop { node: NodeId },

    #[error("Duplicate edge {from} -> {to}")]
    DuplicateEdge { from: NodeId, to: NodeId },

    /// An edge runs from a later strip back to an earlier one.
    #[error("Edge {from} -> {to} runs from strip {from_strip} back to strip {to_strip}")]
    NotLayered {
        from: NodeId,
        to: NodeId,
        from_strip: u32,
        to_strip: u32,
    },

    #[error("Source node has an inbound edge from {from}")]
    SourceHasInbound { from: NodeId },

    #[error("Sink node has an outbound edge to {to}")]
    SinkHasOutbound { to: NodeId },

    /// Forward and backward adjacency disagree about an edge.
    #[error("Adjacency views disagree about edge {from} -> {to}")]
    InconsistentAdjacency { from: NodeId, to: NodeId },

    /// Kahn's algorithm could not order every node.
    #[error("Cycle detected: {unordered} node(s) could not be ordered")]
    Cycle { unordered: usize },

    #[error("Sink {sink} cannot be reached from the source")]
    SinkUnreachable { sink: NodeId },

    #[error("No cost recorded for edge {from} -> {to}")]
    MissingEdgeCost { from: NodeId, to: NodeId },

    #[error("Invalid cost for edge {from} -> {to}: {source}")]
    InvalidEdgeCost {
        from: NodeId,
        to: NodeId,
        source: PrError,
    },
}

impl From<GraphError> for PrError {
    fn from(err: GraphError) -> Self {
        PrError::Invariant {
            what: err.to_string(),
        }
    }
}
