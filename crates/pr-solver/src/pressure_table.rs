//! Per-node grids of pressure loss across the node's length and hill bounds.

use pr_core::{Metric, NodeId, PressureCoefficients, Real};
use pr_graph::RouteGraph;

use crate::bounds::NodeBounds;

/// Grid steps per axis when no other count is requested.
pub const DEFAULT_INCREMENTS: usize = 10;

/// `alpha * L_i + beta * H_j` sampled on an evenly spaced
/// `(n + 1) x (n + 1)` grid spanning a node's length and hill envelopes.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PressureTable {
    lengths: Vec<Real>,
    hills: Vec<Real>,
    /// Row-major, one row per length sample.
    table: Vec<Real>,
}

impl PressureTable {
    /// Returns `None` for unreached nodes and for nodes with zero maximum
    /// length (the source).
    pub fn from_bounds(
        bounds: &NodeBounds,
        coefficients: PressureCoefficients,
        increments: usize,
    ) -> Option<Self> {
        let (min_len, max_len) = bounds.range(Metric::Length)?;
        let (min_hill, max_hill) = bounds.range(Metric::Hill)?;
        if max_len == 0.0 {
            return None;
        }

        let n = increments.max(1);
        let lengths = spaced(min_len, max_len, n);
        let hills = spaced(min_hill, max_hill, n);
        let table = lengths
            .iter()
            .flat_map(|&l| hills.iter().map(move |&h| coefficients.loss(l, h)))
            .collect();

        Some(Self {
            lengths,
            hills,
            table,
        })
    }

    pub fn lengths(&self) -> &[Real] {
        &self.lengths
    }

    pub fn hills(&self) -> &[Real] {
        &self.hills
    }

    /// Loss at length sample `i` and hill sample `j`.
    pub fn get(&self, i: usize, j: usize) -> Option<Real> {
        let width = self.hills.len();
        if j >= width {
            return None;
        }
        self.table.get(i * width + j).copied()
    }

    /// Smallest and largest tabulated loss.
    pub fn envelope(&self) -> (Real, Real) {
        self.table
            .iter()
            .fold((Real::INFINITY, Real::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }
}

fn spaced(min: Real, max: Real, n: usize) -> Vec<Real> {
    let step = (max - min) / n as Real;
    (0..=n).map(|i| min + i as Real * step).collect()
}

/// Tables for every node that has one, in node order.
pub fn build_pressure_tables(
    graph: &RouteGraph,
    bounds: &[NodeBounds],
    coefficients: PressureCoefficients,
    increments: usize,
) -> Vec<(NodeId, PressureTable)> {
    graph
        .nodes()
        .iter()
        .zip(bounds)
        .filter_map(|(node, b)| {
            PressureTable::from_bounds(b, coefficients, increments).map(|table| (node.id, table))
        })
        .collect()
}
