//! Per-node envelopes of every metric over all source-to-node paths.

use pr_core::{Metric, Metrics, Real};
use pr_graph::{EdgeCost, EdgeCosts, RouteGraph};

use crate::error::SolverResult;

/// Tightest `[min, max]` of each metric over all paths reaching a node.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NodeBounds {
    pub min: Metrics,
    pub max: Metrics,
}

impl NodeBounds {
    /// Empty envelope of a node no path has reached yet.
    pub const UNREACHED: NodeBounds = NodeBounds {
        min: Metrics::splat(Real::INFINITY),
        max: Metrics::splat(Real::NEG_INFINITY),
    };

    pub const ZERO: NodeBounds = NodeBounds {
        min: Metrics::ZERO,
        max: Metrics::ZERO,
    };

    pub fn is_reached(&self) -> bool {
        self.min.cost <= self.max.cost
    }

    /// `(min, max)` of `metric`, or `None` if the node is unreachable.
    pub fn range(&self, metric: Metric) -> Option<(Real, Real)> {
        self.is_reached()
            .then(|| (self.min.get(metric), self.max.get(metric)))
    }

    pub fn contains(&self, metric: Metric, value: Real) -> bool {
        self.range(metric)
            .is_some_and(|(lo, hi)| lo <= value && value <= hi)
    }

    /// Widen `self` by the paths arriving from `from` over `edge`.
    fn relax(&mut self, from: &NodeBounds, edge: &EdgeCost) {
        self.min = self.min.min(from.min + *edge);
        self.max = self.max.max(from.max + *edge);
    }
}

/// Propagate bounds from the source through the graph in topological order.
///
/// Every predecessor of a node is final before the node is relaxed, so the
/// result is the exact envelope. Unreachable nodes keep
/// [`NodeBounds::UNREACHED`].
pub fn build_bounds(graph: &RouteGraph, costs: &EdgeCosts) -> SolverResult<Vec<NodeBounds>> {
    let mut bounds = vec![NodeBounds::UNREACHED; graph.node_count()];
    bounds[graph.source().idx()] = NodeBounds::ZERO;

    for &f in graph.topological_order() {
        let from = bounds[f.idx()];
        for &t in graph.successors(f) {
            let edge = costs.get(f, t)?;
            bounds[t.idx()].relax(&from, edge);
        }
    }

    tracing::debug!(
        nodes = graph.node_count(),
        reached = bounds.iter().filter(|b| b.is_reached()).count(),
        "node bounds propagated"
    );
    Ok(bounds)
}
