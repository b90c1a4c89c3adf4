//! Greedy backward match of a target cumulative pressure loss.

use pr_core::{NodeId, Real};
use pr_graph::{EdgeCosts, RouteGraph};

use crate::error::{SolverError, SolverResult};
use crate::frontier::Frontier;
use crate::route::{Route, RouteGoal};

/// Walk back from the sink, at each node picking the predecessor whose
/// frontier value plus edge loss lands closest to the loss still to cover.
///
/// The choice is local to each step; the result approximates `target` and
/// is not guaranteed to be the closest route overall.
pub fn select_target_route(
    graph: &RouteGraph,
    costs: &EdgeCosts,
    frontier: &Frontier,
    target: Real,
) -> SolverResult<Route> {
    if !target.is_finite() {
        return Err(SolverError::InvalidTarget { value: target });
    }
    if frontier.node_count() != graph.node_count() {
        return Err(SolverError::FrontierMismatch {
            expected: graph.node_count(),
            actual: frontier.node_count(),
        });
    }

    let source = graph.source();
    let mut t = graph.sink();
    let mut remaining = target;
    let mut nodes = vec![t];

    while t != source {
        let (f, edge_loss) = closest_predecessor(graph, costs, frontier, t, remaining)?;
        remaining -= edge_loss;
        nodes.push(f);
        t = f;
    }
    nodes.reverse();

    let route = Route::replay(costs, RouteGoal::TargetPressureLoss(target), &nodes)?;
    tracing::debug!(
        target,
        achieved = route.totals().pressure_loss,
        hops = route.hops(),
        "target route selected"
    );
    Ok(route)
}

/// Returns the chosen predecessor and the real loss of its edge into `t`.
fn closest_predecessor(
    graph: &RouteGraph,
    costs: &EdgeCosts,
    frontier: &Frontier,
    t: NodeId,
    remaining: Real,
) -> SolverResult<(NodeId, Real)> {
    let mut best: Option<(NodeId, Real, Real)> = None;

    for &f in graph.predecessors(t) {
        let edge_loss = costs.get(f, t)?.pressure_loss;
        let Some(set) = frontier.set(f) else { continue };
        for &bucket in set {
            let gap = (remaining - (frontier.value_of(bucket) + edge_loss)).abs();
            if best.is_none_or(|(_, _, best_gap)| gap < best_gap) {
                best = Some((f, edge_loss, gap));
            }
        }
    }

    best.map(|(f, edge_loss, _)| (f, edge_loss))
        .ok_or(SolverError::FrontierExhausted { node: t })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontier::{FrontierConfig, build_frontier};
    use pr_graph::{EdgeCost, GraphBuilder, Position, StripRef};

    /// Two parallel routes, losses 1.0 and 3.0.
    fn two_routes() -> (RouteGraph, EdgeCosts) {
        let mut builder = GraphBuilder::new();
        let s = builder.add_node(Position::origin(), StripRef::new(0, 0));
        let a = builder.add_node(Position::origin(), StripRef::new(1, 0));
        let b = builder.add_node(Position::origin(), StripRef::new(1, 1));
        let t = builder.add_node(Position::origin(), StripRef::new(2, 0));
        for (f, to) in [(s, a), (s, b), (a, t), (b, t)] {
            builder.add_edge(f, to);
        }
        let graph = builder.build().unwrap();

        let mut costs = EdgeCosts::new();
        costs.insert(s, a, EdgeCost::new(1.0, 1.0, 0.0, 0.5)).unwrap();
        costs.insert(a, t, EdgeCost::new(1.0, 1.0, 0.0, 0.5)).unwrap();
        costs.insert(s, b, EdgeCost::new(2.0, 2.0, 1.0, 1.5)).unwrap();
        costs.insert(b, t, EdgeCost::new(2.0, 2.0, 1.0, 1.5)).unwrap();
        (graph, costs)
    }

    #[test]
    fn picks_the_route_nearest_the_target() {
        let (graph, costs) = two_routes();
        let frontier = build_frontier(&graph, &costs, &FrontierConfig::default()).unwrap();

        let low = select_target_route(&graph, &costs, &frontier, 1.2).unwrap();
        assert_eq!(low.steps[1].node, NodeId::from_index(1));
        assert_eq!(low.totals().pressure_loss, 1.0);

        let high = select_target_route(&graph, &costs, &frontier, 2.9).unwrap();
        assert_eq!(high.steps[1].node, NodeId::from_index(2));
        assert_eq!(high.totals().pressure_loss, 3.0);
        assert_eq!(high.goal, RouteGoal::TargetPressureLoss(2.9));
    }

    #[test]
    fn rejects_non_finite_targets() {
        let (graph, costs) = two_routes();
        let frontier = build_frontier(&graph, &costs, &FrontierConfig::default()).unwrap();
        let err = select_target_route(&graph, &costs, &frontier, Real::NAN).unwrap_err();
        assert!(matches!(err, SolverError::InvalidTarget { .. }));
    }
}
