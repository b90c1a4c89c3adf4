//! Error types for route solving.

use pr_core::{NodeId, PrError};
use pr_graph::GraphError;
use thiserror::Error;

/// Errors that can occur while solving over a route graph.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Sink {sink} is unreachable from the source")]
    UnreachableSink { sink: NodeId },

    #[error("No reached predecessor while tracing back through node {node}")]
    NoPredecessor { node: NodeId },

    #[error("Quantization resolution must be a positive integer")]
    InvalidResolution,

    #[error("Target pressure loss must be finite, got {value}")]
    InvalidTarget { value: f64 },

    #[error("Feasibility set of node {node} grew to {size} entries (limit {limit})")]
    FrontierTooLarge {
        node: NodeId,
        size: usize,
        limit: usize,
    },

    #[error("No predecessor of node {node} has a frontier entry")]
    FrontierExhausted { node: NodeId },

    #[error("Frontier covers {actual} nodes but the graph has {expected}")]
    FrontierMismatch { expected: usize, actual: usize },
}

pub type SolverResult<T> = Result<T, SolverError>;

impl From<SolverError> for PrError {
    fn from(e: SolverError) -> Self {
        match e {
            SolverError::Graph(inner) => inner.into(),
            SolverError::InvalidResolution => PrError::InvalidArg {
                what: "resolution",
            },
            SolverError::InvalidTarget { value } => PrError::NonFinite {
                what: "target pressure loss",
                value,
            },
            other => PrError::Invariant {
                what: other.to_string(),
            },
        }
    }
}
