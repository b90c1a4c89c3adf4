//! Incremental graph builder.

use pr_core::NodeId;

use crate::error::GraphResult;
use crate::graph::{Node, Position, RouteGraph, StripRef};
use crate::topology::Topology;
use crate::validate;

/// Builder for constructing a route graph incrementally.
///
/// Use `add_node` and `add_edge` to build up the graph, then call `build()`
/// to validate and freeze it into an immutable `RouteGraph`. The first node
/// added is the source, the last one the sink.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    nodes: Vec<Node>,
    edges: Vec<(NodeId, NodeId)>,
}

impl GraphBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(nodes),
            edges: Vec::with_capacity(edges),
        }
    }

    /// Add a node to the graph and return its ID.
    pub fn add_node(&mut self, position: Position, strip: StripRef) -> NodeId {
        let id = NodeId::from_usize(self.nodes.len());
        self.nodes.push(Node {
            id,
            position,
            strip,
        });
        id
    }

    /// Add a directed edge. Checked by `build()`.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId) {
        self.edges.push((from, to));
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Build and validate the graph, returning an immutable `RouteGraph`.
    ///
    /// This validates references and layering, constructs compact forward and
    /// backward adjacency, checks that the two agree, and computes the
    /// topological order.
    pub fn build(self) -> GraphResult<RouteGraph> {
        validate::validate_structure(&self.nodes, &self.edges)?;

        let n = self.nodes.len();
        let (fwd_offsets, fwd) = Self::build_adjacency(n, self.edges.iter().copied());
        let (bwd_offsets, bwd) =
            Self::build_adjacency(n, self.edges.iter().map(|&(from, to)| (to, from)));

        validate::validate_adjacency(n, &fwd_offsets, &fwd, &bwd_offsets, &bwd)?;

        let topology = Topology::compute(n, &fwd_offsets, &fwd, &bwd_offsets)?;

        tracing::debug!(
            nodes = n,
            edges = self.edges.len(),
            layers = topology.layer_count(),
            "route graph built"
        );

        Ok(RouteGraph {
            nodes: self.nodes,
            edges: self.edges,
            fwd_offsets,
            fwd,
            bwd_offsets,
            bwd,
            topology,
        })
    }

    /// Build compact adjacency: for each key node, its neighbours in the
    /// order the pairs were supplied.
    fn build_adjacency(
        node_count: usize,
        pairs: impl Iterator<Item = (NodeId, NodeId)> + Clone,
    ) -> (Vec<usize>, Vec<NodeId>) {
        let mut offsets = vec![0_usize; node_count + 1];
        for (key, _) in pairs.clone() {
            offsets[key.idx() + 1] += 1;
        }
        for i in 0..node_count {
            offsets[i + 1] += offsets[i];
        }

        let mut cursor = offsets.clone();
        let mut flat = vec![NodeId::from_index(0); offsets[node_count]];
        for (key, neighbour) in pairs {
            flat[cursor[key.idx()]] = neighbour;
            cursor[key.idx()] += 1;
        }

        (offsets, flat)
    }
}
