//! Core graph data structures.

use pr_core::{NodeId, Real};

use crate::error::{GraphError, GraphResult};
use crate::topology::Topology;

/// 3-D survey position of a candidate node.
pub type Position = nalgebra::Point3<Real>;

/// Back-reference to the survey strip and the slot within it a node came from.
///
/// Diagnostic only; the solver never looks at it. The builder uses the strip
/// number to reject edges that run backwards across strips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StripRef {
    pub strip: u32,
    pub slot: u32,
}

impl StripRef {
    pub fn new(strip: u32, slot: u32) -> Self {
        Self { strip, slot }
    }
}

/// A candidate point the pipeline may pass through.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub position: Position,
    pub strip: StripRef,
}

impl Node {
    /// Straight-line 3-D distance to `other`.
    pub fn distance_to(&self, other: &Node) -> Real {
        nalgebra::distance(&self.position, &other.position)
    }

    /// Elevation gained going from `self` to `other`, clamped at zero.
    pub fn rise_to(&self, other: &Node) -> Real {
        (other.position.z - self.position.z).max(0.0)
    }
}

/// The graph: a validated, immutable layered DAG.
///
/// The graph stores:
/// - All nodes in a vector indexed by their IDs. Node 0 is the source and
///   the last node the sink.
/// - Compact forward and backward adjacency: node i's successors are in
///   `fwd[fwd_offsets[i]..fwd_offsets[i+1]]`, likewise for predecessors.
///   Both views list neighbours in edge insertion order.
/// - The topological order and layering computed at build time.
#[derive(Debug, Clone)]
pub struct RouteGraph {
    pub(crate) nodes: Vec<Node>,
    pub(crate) edges: Vec<(NodeId, NodeId)>,

    pub(crate) fwd_offsets: Vec<usize>,
    pub(crate) fwd: Vec<NodeId>,

    pub(crate) bwd_offsets: Vec<usize>,
    pub(crate) bwd: Vec<NodeId>,

    pub(crate) topology: Topology,
}

impl RouteGraph {
    /// Return all nodes.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get a node by ID (returns None if ID out of bounds).
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.idx())
    }

    /// All edges in insertion order.
    pub fn edges(&self) -> &[(NodeId, NodeId)] {
        &self.edges
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Node 0.
    pub fn source(&self) -> NodeId {
        NodeId::from_index(0)
    }

    /// Node `N-1`.
    pub fn sink(&self) -> NodeId {
        NodeId::from_usize(self.nodes.len().saturating_sub(1))
    }

    /// Forward adjacency of `id`.
    pub fn successors(&self, id: NodeId) -> &[NodeId] {
        slice(&self.fwd_offsets, &self.fwd, id)
    }

    /// Backward adjacency of `id`.
    pub fn predecessors(&self, id: NodeId) -> &[NodeId] {
        slice(&self.bwd_offsets, &self.bwd, id)
    }

    pub fn contains_edge(&self, from: NodeId, to: NodeId) -> bool {
        self.successors(from).contains(&to)
    }

    /// Topological order and layers.
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// Every node, each after all of its predecessors.
    pub fn topological_order(&self) -> &[NodeId] {
        self.topology.order()
    }

    /// Nodes reachable from the source, by index.
    pub fn reachable_from_source(&self) -> Vec<bool> {
        let mut reached = vec![false; self.nodes.len()];
        if let Some(first) = reached.first_mut() {
            *first = true;
        }
        for &f in self.topological_order() {
            if reached[f.idx()] {
                for &t in self.successors(f) {
                    reached[t.idx()] = true;
                }
            }
        }
        reached
    }

    /// Reject graphs whose sink has no path from the source.
    pub fn ensure_sink_reachable(&self) -> GraphResult<()> {
        let sink = self.sink();
        if self.reachable_from_source()[sink.idx()] {
            Ok(())
        } else {
            Err(GraphError::SinkUnreachable { sink })
        }
    }
}

fn slice<'a>(offsets: &[usize], flat: &'a [NodeId], id: NodeId) -> &'a [NodeId] {
    let idx = id.idx();
    if idx + 1 >= offsets.len() {
        return &[];
    }
    &flat[offsets[idx]..offsets[idx + 1]]
}
