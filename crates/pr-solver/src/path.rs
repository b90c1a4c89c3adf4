//! Single-objective route solve: forward labels, backward trace.

use pr_core::{Metrics, NodeId, Real};
use pr_graph::{EdgeCosts, RouteGraph};

use crate::error::{SolverError, SolverResult};
use crate::objective::Objective;
use crate::route::{Route, RouteGoal};

/// Best known way to reach a node for one objective.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Label {
    /// Minimal cumulative objective from the source.
    pub value: Real,
    /// Node the minimal value arrived from; `None` at the source and at
    /// unreached nodes.
    pub predecessor: Option<NodeId>,
    /// All four cumulative metrics along the route achieving `value`.
    /// The non-objective entries follow that route; they are not minima.
    pub totals: Metrics,
}

impl Label {
    pub const UNREACHED: Label = Label {
        value: Real::INFINITY,
        predecessor: None,
        totals: Metrics::splat(Real::INFINITY),
    };

    pub const SOURCE: Label = Label {
        value: 0.0,
        predecessor: None,
        totals: Metrics::ZERO,
    };

    pub fn is_reached(&self) -> bool {
        self.value.is_finite()
    }
}

/// Forward label-setting sweep in topological order.
///
/// A label is overwritten only on a strictly smaller candidate, so among
/// equal candidates the first relaxed predecessor keeps the label.
pub fn forward_labels(
    graph: &RouteGraph,
    costs: &EdgeCosts,
    objective: Objective,
) -> SolverResult<Vec<Label>> {
    let mut labels = vec![Label::UNREACHED; graph.node_count()];
    labels[graph.source().idx()] = Label::SOURCE;

    for &f in graph.topological_order() {
        let from = labels[f.idx()];
        for &t in graph.successors(f) {
            let edge = costs.get(f, t)?;
            let candidate = from.value + objective.value(edge);
            if candidate < labels[t.idx()].value {
                labels[t.idx()] = Label {
                    value: candidate,
                    predecessor: Some(f),
                    totals: from.totals + *edge,
                };
            }
        }
    }

    Ok(labels)
}

/// Minimize `objective` from source to sink.
///
/// Returns the route with cumulative totals for all four metrics; only the
/// objective is minimized.
pub fn solve_objective(
    graph: &RouteGraph,
    costs: &EdgeCosts,
    objective: Objective,
) -> SolverResult<Route> {
    let labels = forward_labels(graph, costs, objective)?;

    let sink = graph.sink();
    if !labels[sink.idx()].is_reached() {
        return Err(SolverError::UnreachableSink { sink });
    }

    let nodes = trace_back(graph, costs, &labels, objective)?;
    let route = Route::replay(costs, RouteGoal::Minimize(objective), &nodes)?;

    tracing::debug!(
        %objective,
        value = labels[sink.idx()].value,
        hops = route.hops(),
        "objective route solved"
    );
    Ok(route)
}

/// Walk back from the sink, at each node stepping to the reached predecessor
/// with the smallest `label + edge` (first in backward adjacency on ties).
fn trace_back(
    graph: &RouteGraph,
    costs: &EdgeCosts,
    labels: &[Label],
    objective: Objective,
) -> SolverResult<Vec<NodeId>> {
    let source = graph.source();
    let mut t = graph.sink();
    let mut nodes = vec![t];

    while t != source {
        let mut best: Option<(NodeId, Real)> = None;
        for &f in graph.predecessors(t) {
            let label = &labels[f.idx()];
            if !label.is_reached() {
                continue;
            }
            let through = label.value + objective.value(costs.get(f, t)?);
            if best.is_none_or(|(_, value)| through < value) {
                best = Some((f, through));
            }
        }

        let (f, _) = best.ok_or(SolverError::NoPredecessor { node: t })?;
        nodes.push(f);
        t = f;
    }

    nodes.reverse();
    Ok(nodes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pr_graph::{EdgeCost, GraphBuilder, Position, StripRef};

    /// 0 -> 1 -> 2 plus a pricier shortcut 0 -> 2.
    fn triangle() -> (RouteGraph, EdgeCosts) {
        let mut builder = GraphBuilder::new();
        let s = builder.add_node(Position::origin(), StripRef::new(0, 0));
        let m = builder.add_node(Position::origin(), StripRef::new(1, 0));
        let t = builder.add_node(Position::origin(), StripRef::new(2, 0));
        builder.add_edge(s, t);
        builder.add_edge(s, m);
        builder.add_edge(m, t);
        let graph = builder.build().unwrap();

        let mut costs = EdgeCosts::new();
        costs.insert(s, t, EdgeCost::new(10.0, 1.0, 0.0, 5.0)).unwrap();
        costs.insert(s, m, EdgeCost::new(2.0, 3.0, 1.0, 1.0)).unwrap();
        costs.insert(m, t, EdgeCost::new(2.0, 3.0, 2.0, 1.0)).unwrap();
        (graph, costs)
    }

    #[test]
    fn labels_track_the_chosen_route() {
        let (graph, costs) = triangle();
        let labels = forward_labels(&graph, &costs, Objective::Cost).unwrap();

        let sink = &labels[2];
        assert_eq!(sink.value, 4.0);
        assert_eq!(sink.predecessor, Some(NodeId::from_index(1)));
        assert_eq!(sink.totals, Metrics::new(4.0, 6.0, 3.0, 2.0));
    }

    #[test]
    fn objective_changes_the_route() {
        let (graph, costs) = triangle();

        let by_cost = solve_objective(&graph, &costs, Objective::Cost).unwrap();
        assert_eq!(by_cost.hops(), 2);

        let by_length = solve_objective(&graph, &costs, Objective::Length).unwrap();
        assert_eq!(by_length.nodes(), vec![NodeId::from_index(0), NodeId::from_index(2)]);
        assert_eq!(by_length.totals(), Metrics::new(10.0, 1.0, 0.0, 5.0));
        assert_eq!(by_length.goal, RouteGoal::Minimize(Objective::Length));
    }

    #[test]
    fn single_node_graph_is_its_own_route() {
        let mut builder = GraphBuilder::new();
        builder.add_node(Position::origin(), StripRef::new(0, 0));
        let graph = builder.build().unwrap();

        let route = solve_objective(&graph, &EdgeCosts::new(), Objective::Cost).unwrap();
        assert_eq!(route.steps.len(), 1);
        assert_eq!(route.steps[0].predecessor, None);
        assert_eq!(route.totals(), Metrics::ZERO);
    }
}
