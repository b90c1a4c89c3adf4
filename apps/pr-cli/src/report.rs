//! Plain-text reports written to stdout.

use std::fmt::Write;

use pr_core::{Metric, NodeId};
use pr_graph::{EdgeCosts, RouteGraph};
use pr_solver::{Frontier, NodeBounds, PressureTable, Route, RouteGoal};

use crate::error::AppResult;

fn range(bounds: &NodeBounds, metric: Metric) -> String {
    match bounds.range(metric) {
        Some((lo, hi)) => format!("{lo:.1}..{hi:.1}"),
        None => "unreached".to_string(),
    }
}

/// One line per node in topological order: its envelopes, then each outgoing
/// edge with its cost.
pub fn limits_and_linkages(
    graph: &RouteGraph,
    costs: &EdgeCosts,
    bounds: &[NodeBounds],
) -> AppResult<String> {
    let mut out = String::from("Node limits and linkages:\n");
    for &f in graph.topological_order() {
        let b = &bounds[f.idx()];
        let _ = write!(
            out,
            "{f} len {} hill {} pl {}",
            range(b, Metric::Length),
            range(b, Metric::Hill),
            range(b, Metric::PressureLoss),
        );
        let successors = graph.successors(f);
        if !successors.is_empty() {
            out.push_str(" :");
        }
        for &t in successors {
            let _ = write!(out, " {t} cost {:.1}", costs.get(f, t)?.cost);
        }
        out.push('\n');
    }
    Ok(out)
}

fn goal_label(goal: &RouteGoal) -> String {
    match goal {
        RouteGoal::Minimize(objective) => format!("minimum {objective}"),
        RouteGoal::TargetPressureLoss(target) => format!("pressure loss near {target:.3}"),
    }
}

/// The route with cumulative values at every step.
pub fn route(route: &Route) -> String {
    let mut out = format!("Route for {} and cumulative values:\n", goal_label(&route.goal));
    let _ = writeln!(
        out,
        "{:>5} {:>12} {:>12} {:>8} {:>12}",
        "node", "cost", "length", "hill", "pl"
    );
    for step in route.steps() {
        let t = &step.totals;
        let _ = writeln!(
            out,
            "{:>5} {:>12.1} {:>12.1} {:>8.1} {:>12.3}",
            step.node, t.cost, t.length, t.hill, t.pressure_loss
        );
    }
    out
}

pub fn frontier_summary(frontier: &Frontier, sink: NodeId) -> String {
    let sink_entries = frontier.set(sink).map_or(0, |s| s.len());
    format!(
        "Frontier at resolution {}: {} entries over {} nodes, {} at the sink\n",
        frontier.resolution(),
        frontier.total_entries(),
        frontier.node_count(),
        sink_entries
    )
}

/// Rows are length samples, columns hill samples.
pub fn pressure_table(node: NodeId, table: &PressureTable) -> String {
    let mut out = format!("Pressure table for node {node}:\n{:>10}", "len\\hill");
    for h in table.hills() {
        let _ = write!(out, " {h:>9.1}");
    }
    out.push('\n');
    for (i, l) in table.lengths().iter().enumerate() {
        let _ = write!(out, "{l:>10.1}");
        for j in 0..table.hills().len() {
            let loss = table.get(i, j).unwrap_or(f64::NAN);
            let _ = write!(out, " {loss:>9.3}");
        }
        out.push('\n');
    }
    out
}
