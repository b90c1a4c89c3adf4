//! Explicit topological order for the relaxation sweeps.
//!
//! Every solver pass walks nodes in the order computed here, so a node is
//! only ever relaxed from predecessors that are already final. The order is
//! computed once, when the graph is built, with Kahn's algorithm; a cycle is a
//! build error rather than a silently wrong sweep.

use std::collections::VecDeque;

use pr_core::NodeId;

use crate::error::{GraphError, GraphResult};

/// Topological order plus layering of a route graph.
///
/// A node's layer is the length of the longest edge path reaching it from a
/// node without predecessors. All predecessors of a layer-`k` node sit in
/// layers `< k`, so the nodes of one layer are mutually independent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topology {
    /// Nodes in dependency order (index -> NodeId).
    order: Vec<NodeId>,

    /// Reverse lookup: NodeId -> position in `order`.
    rank: Vec<usize>,

    /// NodeId -> layer.
    layer_of: Vec<u32>,

    /// Nodes grouped by layer, each group in `order` order.
    layers: Vec<Vec<NodeId>>,
}

impl Topology {
    /// Run Kahn's algorithm over compact forward adjacency.
    ///
    /// Initially-free nodes are queued in index order and the queue is FIFO,
    /// so the result is deterministic for a given edge insertion order.
    pub(crate) fn compute(
        node_count: usize,
        fwd_offsets: &[usize],
        fwd: &[NodeId],
        bwd_offsets: &[usize],
    ) -> GraphResult<Self> {
        let mut in_degree: Vec<usize> = (0..node_count)
            .map(|i| bwd_offsets[i + 1] - bwd_offsets[i])
            .collect();
        let mut layer_of = vec![0_u32; node_count];
        let mut order = Vec::with_capacity(node_count);
        let mut queue: VecDeque<usize> = (0..node_count).filter(|&i| in_degree[i] == 0).collect();

        while let Some(f) = queue.pop_front() {
            order.push(NodeId::from_usize(f));
            for &t in &fwd[fwd_offsets[f]..fwd_offsets[f + 1]] {
                let t = t.idx();
                layer_of[t] = layer_of[t].max(layer_of[f] + 1);
                in_degree[t] -= 1;
                if in_degree[t] == 0 {
                    queue.push_back(t);
                }
            }
        }

        if order.len() != node_count {
            return Err(GraphError::Cycle {
                unordered: node_count - order.len(),
            });
        }

        let mut rank = vec![0; node_count];
        for (position, id) in order.iter().enumerate() {
            rank[id.idx()] = position;
        }

        let layer_count = layer_of.iter().max().map_or(0, |&max| max as usize + 1);
        let mut layers = vec![Vec::new(); layer_count];
        for &id in &order {
            layers[layer_of[id.idx()] as usize].push(id);
        }

        Ok(Self {
            order,
            rank,
            layer_of,
            layers,
        })
    }

    /// Nodes in dependency order.
    pub fn order(&self) -> &[NodeId] {
        &self.order
    }

    /// Position of `id` in [`Topology::order`].
    pub fn rank(&self, id: NodeId) -> Option<usize> {
        self.rank.get(id.idx()).copied()
    }

    pub fn layer_of(&self, id: NodeId) -> Option<u32> {
        self.layer_of.get(id.idx()).copied()
    }

    /// Nodes grouped by layer, shallowest first.
    pub fn layers(&self) -> &[Vec<NodeId>] {
        &self.layers
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }
}
