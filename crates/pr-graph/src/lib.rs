//! pr-graph: layered route graph for piperoute.
//!
//! Provides:
//! - Core graph data structures (Node, StripRef, RouteGraph)
//! - Incremental graph builder with validation
//! - Explicit topological order and layers (Kahn's algorithm)
//! - Per-edge cost records keyed by `(from, to)`
//!
//! # Example
//!
//! ```
//! use pr_graph::{GraphBuilder, Position, StripRef};
//!
//! let mut builder = GraphBuilder::new();
//! let a = builder.add_node(Position::new(0.0, 0.0, 0.0), StripRef::new(0, 0));
//! let b = builder.add_node(Position::new(3.0, 4.0, 0.0), StripRef::new(1, 0));
//! builder.add_edge(a, b);
//! let graph = builder.build().unwrap();
//!
//! assert_eq!(graph.node_count(), 2);
//! assert_eq!(graph.successors(a), &[b]);
//! assert_eq!(graph.predecessors(b), &[a]);
//! ```

pub mod builder;
pub mod costs;
pub mod error;
pub mod graph;
pub mod topology;
pub(crate) mod validate;

// Re-exports for ergonomics
pub use builder::GraphBuilder;
pub use costs::{EdgeCost, EdgeCosts};
pub use error::{GraphError, GraphResult};
pub use graph::{Node, Position, RouteGraph, StripRef};
pub use topology::Topology;
