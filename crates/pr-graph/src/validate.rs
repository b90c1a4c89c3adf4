//! Graph validation logic.

use std::collections::HashSet;

use pr_core::NodeId;

use crate::error::{GraphError, GraphResult};
use crate::graph::Node;

/// Validate nodes and the raw edge list before adjacency is built.
pub(crate) fn validate_structure(nodes: &[Node], edges: &[(NodeId, NodeId)]) -> GraphResult<()> {
    if nodes.is_empty() {
        return Err(GraphError::Empty);
    }

    // Node IDs must be contiguous and match their indices
    for (i, node) in nodes.iter().enumerate() {
        if node.id.idx() != i {
            return Err(GraphError::InvalidNodeRef {
                from: node.id.index(),
                to: node.id.index(),
                node_count: nodes.len(),
            });
        }
    }

    let source = NodeId::from_index(0);
    let sink = NodeId::from_usize(nodes.len() - 1);
    let mut seen: HashSet<(NodeId, NodeId)> = HashSet::with_capacity(edges.len());

    for &(from, to) in edges {
        if from.idx() >= nodes.len() || to.idx() >= nodes.len() {
            return Err(GraphError::InvalidNodeRef {
                from: from.index(),
                to: to.index(),
                node_count: nodes.len(),
            });
        }
        if from == to {
            return Err(GraphError::SelfLoop { node: from });
        }
        if !seen.insert((from, to)) {
            return Err(GraphError::DuplicateEdge { from, to });
        }

        // Strips only ever advance along an edge
        let from_strip = nodes[from.idx()].strip.strip;
        let to_strip = nodes[to.idx()].strip.strip;
        if from_strip > to_strip {
            return Err(GraphError::NotLayered {
                from,
                to,
                from_strip,
                to_strip,
            });
        }

        if to == source {
            return Err(GraphError::SourceHasInbound { from });
        }
        if from == sink && nodes.len() > 1 {
            return Err(GraphError::SinkHasOutbound { to });
        }
    }

    Ok(())
}

/// Validate that forward and backward adjacency describe the same edge set.
pub(crate) fn validate_adjacency(
    node_count: usize,
    fwd_offsets: &[usize],
    fwd: &[NodeId],
    bwd_offsets: &[usize],
    bwd: &[NodeId],
) -> GraphResult<()> {
    let placeholder = NodeId::from_index(0);

    // Offsets arrays must have node_count + 1 entries and cover the same number of edges
    if fwd_offsets.len() != node_count + 1
        || bwd_offsets.len() != node_count + 1
        || fwd.len() != bwd.len()
    {
        return Err(GraphError::InconsistentAdjacency {
            from: placeholder,
            to: placeholder,
        });
    }

    let successors = |i: usize| &fwd[fwd_offsets[i]..fwd_offsets[i + 1]];
    let predecessors = |i: usize| &bwd[bwd_offsets[i]..bwd_offsets[i + 1]];

    // Every (f, t) forward must appear backward, and vice versa
    for f in 0..node_count {
        let from = NodeId::from_usize(f);
        for &to in successors(f) {
            if to.idx() >= node_count || !predecessors(to.idx()).contains(&from) {
                return Err(GraphError::InconsistentAdjacency { from, to });
            }
        }
    }
    for t in 0..node_count {
        let to = NodeId::from_usize(t);
        for &from in predecessors(t) {
            if from.idx() >= node_count || !successors(from.idx()).contains(&to) {
                return Err(GraphError::InconsistentAdjacency { from, to });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Position, StripRef};

    fn nodes(strips: &[u32]) -> Vec<Node> {
        strips
            .iter()
            .enumerate()
            .map(|(i, &strip)| Node {
                id: NodeId::from_usize(i),
                position: Position::origin(),
                strip: StripRef::new(strip, 0),
            })
            .collect()
    }

    fn edge(f: u32, t: u32) -> (NodeId, NodeId) {
        (NodeId::from_index(f), NodeId::from_index(t))
    }

    #[test]
    fn validate_empty_graph() {
        assert_eq!(validate_structure(&[], &[]), Err(GraphError::Empty));
    }

    #[test]
    fn validate_single_node() {
        assert!(validate_structure(&nodes(&[0]), &[]).is_ok());
    }

    #[test]
    fn validate_invalid_node_ref() {
        let result = validate_structure(&nodes(&[0, 1]), &[edge(0, 99)]);
        assert!(matches!(
            result,
            Err(GraphError::InvalidNodeRef { to: 99, .. })
        ));
    }

    #[test]
    fn validate_backwards_strip() {
        let result = validate_structure(&nodes(&[0, 2, 1, 3]), &[edge(0, 1), edge(1, 2), edge(2, 3)]);
        assert!(matches!(
            result,
            Err(GraphError::NotLayered {
                from_strip: 2,
                to_strip: 1,
                ..
            })
        ));
    }

    #[test]
    fn validate_terminal_edges() {
        let n = nodes(&[0, 1, 2]);
        assert!(matches!(
            validate_structure(&n, &[edge(0, 1), edge(1, 0)]),
            Err(GraphError::NotLayered { .. })
        ));

        let same_strip = nodes(&[0, 0, 1]);
        assert!(matches!(
            validate_structure(&same_strip, &[edge(1, 0)]),
            Err(GraphError::SourceHasInbound { .. })
        ));
        assert!(matches!(
            validate_structure(&nodes(&[0, 1, 1]), &[edge(2, 1)]),
            Err(GraphError::SinkHasOutbound { .. })
        ));
    }

    #[test]
    fn validate_duplicates_and_loops() {
        let n = nodes(&[0, 1, 2]);
        assert!(matches!(
            validate_structure(&n, &[edge(0, 1), edge(0, 1)]),
            Err(GraphError::DuplicateEdge { .. })
        ));
        assert!(matches!(
            validate_structure(&n, &[edge(1, 1)]),
            Err(GraphError::SelfLoop { .. })
        ));
    }

    #[test]
    fn validate_adjacency_mismatch() {
        // Forward says 0 -> 1, backward says 0 -> 2.
        let fwd_offsets = vec![0, 1, 1, 1];
        let fwd = vec![NodeId::from_index(1)];
        let bwd_offsets = vec![0, 0, 0, 1];
        let bwd = vec![NodeId::from_index(0)];
        let result = validate_adjacency(3, &fwd_offsets, &fwd, &bwd_offsets, &bwd);
        assert!(matches!(
            result,
            Err(GraphError::InconsistentAdjacency { .. })
        ));
    }
}
