//! Solved routes.

use pr_core::{Metrics, NodeId, Real};
use pr_graph::EdgeCosts;

use crate::error::SolverResult;
use crate::objective::Objective;

/// What a route was solved for.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RouteGoal {
    Minimize(Objective),
    TargetPressureLoss(Real),
}

/// One node of a solved route.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PathStep {
    pub node: NodeId,
    /// `None` for the source step.
    pub predecessor: Option<NodeId>,
    /// Cumulative metrics from the source to `node` along this route.
    pub totals: Metrics,
}

/// A source-to-sink route, ordered from the source.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Route {
    pub goal: RouteGoal,
    pub steps: Vec<PathStep>,
}

impl Route {
    /// Recompute cumulative totals along `nodes` (source first).
    pub(crate) fn replay(
        costs: &EdgeCosts,
        goal: RouteGoal,
        nodes: &[NodeId],
    ) -> SolverResult<Route> {
        let mut steps: Vec<PathStep> = Vec::with_capacity(nodes.len());
        let mut previous: Option<PathStep> = None;

        for &node in nodes {
            let step = match previous {
                None => PathStep {
                    node,
                    predecessor: None,
                    totals: Metrics::ZERO,
                },
                Some(prev) => PathStep {
                    node,
                    predecessor: Some(prev.node),
                    totals: prev.totals + *costs.get(prev.node, node)?,
                },
            };
            steps.push(step);
            previous = Some(step);
        }

        Ok(Route { goal, steps })
    }

    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    /// Node sequence from source to sink.
    pub fn nodes(&self) -> Vec<NodeId> {
        self.steps.iter().map(|step| step.node).collect()
    }

    /// Cumulative metrics at the sink.
    pub fn totals(&self) -> Metrics {
        self.steps.last().map_or(Metrics::ZERO, |step| step.totals)
    }

    /// Number of edges on the route.
    pub fn hops(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }
}
