//! Per-edge cost records.

use std::collections::HashMap;

use pr_core::{Metrics, NodeId};

use crate::error::{GraphError, GraphResult};
use crate::graph::{Node, RouteGraph};

/// Immutable `{cost, length, hill, pressure_loss}` record of one edge.
pub type EdgeCost = Metrics;

/// Edge costs keyed by `(from, to)`.
///
/// Every stored record is finite and non-negative. A lookup for an edge with
/// no record is an error: callers must supply a cost for every edge of the
/// graph they solve over.
#[derive(Debug, Clone, Default)]
pub struct EdgeCosts {
    costs: HashMap<(NodeId, NodeId), EdgeCost>,
}

impl EdgeCosts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            costs: HashMap::with_capacity(capacity),
        }
    }

    /// Derive a cost for every edge of `graph` from its endpoint nodes.
    pub fn from_graph(
        graph: &RouteGraph,
        mut cost_of: impl FnMut(&Node, &Node) -> EdgeCost,
    ) -> GraphResult<Self> {
        let mut costs = Self::with_capacity(graph.edge_count());
        for &(from, to) in graph.edges() {
            let cost = cost_of(&graph.nodes()[from.idx()], &graph.nodes()[to.idx()]);
            costs.insert(from, to, cost)?;
        }
        Ok(costs)
    }

    /// Record the cost of `from -> to`, returning any record it replaces.
    pub fn insert(
        &mut self,
        from: NodeId,
        to: NodeId,
        cost: EdgeCost,
    ) -> GraphResult<Option<EdgeCost>> {
        let cost = cost
            .validated()
            .map_err(|source| GraphError::InvalidEdgeCost { from, to, source })?;
        Ok(self.costs.insert((from, to), cost))
    }

    /// Cost of `from -> to`.
    pub fn get(&self, from: NodeId, to: NodeId) -> GraphResult<&EdgeCost> {
        self.costs
            .get(&(from, to))
            .ok_or(GraphError::MissingEdgeCost { from, to })
    }

    pub fn len(&self) -> usize {
        self.costs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }

    /// Check that every edge of `graph` has a record.
    pub fn ensure_covers(&self, graph: &RouteGraph) -> GraphResult<()> {
        for &(from, to) in graph.edges() {
            self.get(from, to)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pr_core::PrError;

    fn id(i: u32) -> NodeId {
        NodeId::from_index(i)
    }

    #[test]
    fn insert_and_get() {
        let mut costs = EdgeCosts::new();
        let edge = EdgeCost::new(10.0, 5.0, 1.0, 0.2);
        assert_eq!(costs.insert(id(0), id(1), edge).unwrap(), None);
        assert_eq!(costs.get(id(0), id(1)).unwrap(), &edge);
        assert_eq!(costs.len(), 1);
    }

    #[test]
    fn missing_lookup_is_an_error() {
        let costs = EdgeCosts::new();
        assert_eq!(
            costs.get(id(2), id(3)).unwrap_err(),
            GraphError::MissingEdgeCost {
                from: id(2),
                to: id(3)
            }
        );
    }

    #[test]
    fn negative_cost_is_rejected() {
        let mut costs = EdgeCosts::new();
        let err = costs
            .insert(id(0), id(1), EdgeCost::new(-1.0, 0.0, 0.0, 0.0))
            .unwrap_err();
        assert!(matches!(
            err,
            GraphError::InvalidEdgeCost {
                source: PrError::Negative { what: "cost", .. },
                ..
            }
        ));
        assert!(costs.is_empty());
    }

    #[test]
    fn zero_cost_is_valid() {
        let mut costs = EdgeCosts::new();
        assert!(costs.insert(id(0), id(1), EdgeCost::ZERO).is_ok());
    }
}
