//! Quantized feasibility frontier of cumulative pressure loss.
//!
//! Each node carries the set of distinct buckets `floor(loss * R)` reachable
//! from the source. Every edge contributes its own floored loss, so a bucket
//! sum can undershoot the real cumulative loss by up to one unit per hop.

use std::collections::BTreeSet;

use pr_core::{NodeId, Real};
use pr_graph::{EdgeCosts, RouteGraph};
use rayon::prelude::*;

use crate::error::{SolverError, SolverResult};

/// Distinct quantized cumulative pressure losses reachable at one node.
pub type FeasibilitySet = BTreeSet<i64>;

/// Tunables for [`build_frontier`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FrontierConfig {
    /// Buckets per unit of pressure loss.
    pub resolution: u32,
    /// Fail instead of growing any set beyond this many entries.
    pub max_set_size: Option<usize>,
    /// Build each topological layer with rayon.
    pub parallel_layers: bool,
}

impl Default for FrontierConfig {
    fn default() -> Self {
        Self {
            resolution: 10,
            max_set_size: None,
            parallel_layers: false,
        }
    }
}

impl FrontierConfig {
    pub fn with_resolution(resolution: u32) -> Self {
        Self {
            resolution,
            ..Self::default()
        }
    }
}

/// Per-node feasibility sets plus the resolution that produced them.
#[derive(Clone, Debug, PartialEq)]
pub struct Frontier {
    resolution: u32,
    sets: Vec<FeasibilitySet>,
}

impl Frontier {
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    pub fn set(&self, node: NodeId) -> Option<&FeasibilitySet> {
        self.sets.get(node.idx())
    }

    pub fn sets(&self) -> &[FeasibilitySet] {
        &self.sets
    }

    pub fn node_count(&self) -> usize {
        self.sets.len()
    }

    pub fn total_entries(&self) -> usize {
        self.sets.iter().map(BTreeSet::len).sum()
    }

    /// Pressure loss a bucket stands for.
    pub fn value_of(&self, bucket: i64) -> Real {
        bucket as Real / Real::from(self.resolution)
    }
}

/// `floor(value * resolution)`.
pub fn quantize(value: Real, resolution: u32) -> i64 {
    (value * Real::from(resolution)).floor() as i64
}

/// Build the feasibility frontier for every node.
///
/// Sets are never pruned. With `parallel_layers` the nodes of each
/// topological layer pull from their predecessors concurrently; the sets are
/// identical to the sequential sweep.
pub fn build_frontier(
    graph: &RouteGraph,
    costs: &EdgeCosts,
    config: &FrontierConfig,
) -> SolverResult<Frontier> {
    if config.resolution == 0 {
        return Err(SolverError::InvalidResolution);
    }

    let sets = if config.parallel_layers {
        build_layered(graph, costs, config)?
    } else {
        build_sequential(graph, costs, config)?
    };

    let frontier = Frontier {
        resolution: config.resolution,
        sets,
    };

    let largest = frontier.sets.iter().map(BTreeSet::len).max().unwrap_or(0);
    if let Some(limit) = config.max_set_size {
        if largest.saturating_mul(4) >= limit.saturating_mul(3) {
            tracing::warn!(largest, limit, "feasibility set close to its size limit");
        }
    }
    tracing::debug!(
        resolution = config.resolution,
        parallel = config.parallel_layers,
        entries = frontier.total_entries(),
        largest,
        "feasibility frontier built"
    );
    Ok(frontier)
}

fn check_size(node: NodeId, set: &FeasibilitySet, config: &FrontierConfig) -> SolverResult<()> {
    match config.max_set_size {
        Some(limit) if set.len() > limit => Err(SolverError::FrontierTooLarge {
            node,
            size: set.len(),
            limit,
        }),
        _ => Ok(()),
    }
}

/// Push sweep in topological order. A node's set is final when it is visited.
///
/// The size guard runs after every merge, so no set grows past the limit by
/// more than one predecessor's worth of entries.
fn build_sequential(
    graph: &RouteGraph,
    costs: &EdgeCosts,
    config: &FrontierConfig,
) -> SolverResult<Vec<FeasibilitySet>> {
    let source = graph.source();
    let mut sets = vec![FeasibilitySet::new(); graph.node_count()];
    sets[source.idx()].insert(0);
    check_size(source, &sets[source.idx()], config)?;

    for &f in graph.topological_order() {
        if sets[f.idx()].is_empty() {
            // Still look the costs up so gaps surface regardless of reachability.
            for &t in graph.successors(f) {
                costs.get(f, t)?;
            }
            continue;
        }

        for &t in graph.successors(f) {
            let shift = quantize(costs.get(f, t)?.pressure_loss, config.resolution);
            let shifted: Vec<i64> = sets[f.idx()].iter().map(|v| v + shift).collect();
            sets[t.idx()].extend(shifted);
            check_size(t, &sets[t.idx()], config)?;
        }
    }

    Ok(sets)
}

/// Pull sweep, one rayon pass per topological layer.
fn build_layered(
    graph: &RouteGraph,
    costs: &EdgeCosts,
    config: &FrontierConfig,
) -> SolverResult<Vec<FeasibilitySet>> {
    let source = graph.source();
    let mut sets = vec![FeasibilitySet::new(); graph.node_count()];

    for layer in graph.topology().layers() {
        let built: Vec<(NodeId, FeasibilitySet)> = layer
            .par_iter()
            .map(|&t| -> SolverResult<(NodeId, FeasibilitySet)> {
                let mut set = FeasibilitySet::new();
                if t == source {
                    set.insert(0);
                }
                check_size(t, &set, config)?;
                for &f in graph.predecessors(t) {
                    let shift = quantize(costs.get(f, t)?.pressure_loss, config.resolution);
                    set.extend(sets[f.idx()].iter().map(|v| v + shift));
                    check_size(t, &set, config)?;
                }
                Ok((t, set))
            })
            .collect::<SolverResult<_>>()?;

        for (t, set) in built {
            sets[t.idx()] = set;
        }
    }

    Ok(sets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pr_graph::{EdgeCost, GraphBuilder, Position, StripRef};

    fn pl(value: Real) -> EdgeCost {
        EdgeCost::new(0.0, 0.0, 0.0, value)
    }

    /// 0 -> {1, 2} -> 3 with losses chosen to collide after flooring.
    fn fork() -> (RouteGraph, EdgeCosts) {
        let mut builder = GraphBuilder::new();
        let ids: Vec<NodeId> = [(0, 0), (1, 0), (1, 1), (2, 0)]
            .into_iter()
            .map(|(strip, slot)| builder.add_node(Position::origin(), StripRef::new(strip, slot)))
            .collect();
        for (f, t) in [(0, 1), (0, 2), (1, 3), (2, 3)] {
            builder.add_edge(ids[f], ids[t]);
        }
        let graph = builder.build().unwrap();

        let mut costs = EdgeCosts::new();
        costs.insert(ids[0], ids[1], pl(0.12)).unwrap();
        costs.insert(ids[0], ids[2], pl(0.31)).unwrap();
        costs.insert(ids[1], ids[3], pl(0.25)).unwrap();
        costs.insert(ids[2], ids[3], pl(0.05)).unwrap();
        (graph, costs)
    }

    #[test]
    fn quantize_floors() {
        assert_eq!(quantize(0.0, 10), 0);
        assert_eq!(quantize(0.19, 10), 1);
        assert_eq!(quantize(2.5, 4), 10);
    }

    #[test]
    fn sets_are_deduplicated_sums_of_floored_edges() {
        let (graph, costs) = fork();
        let frontier = build_frontier(&graph, &costs, &FrontierConfig::default()).unwrap();

        let set = |i: u32| frontier.set(NodeId::from_index(i)).unwrap().iter().copied().collect::<Vec<_>>();
        assert_eq!(set(0), vec![0]);
        assert_eq!(set(1), vec![1]);
        assert_eq!(set(2), vec![3]);
        // 1 + 2 and 3 + 0 land in the same bucket.
        assert_eq!(set(3), vec![3]);
        assert_eq!(frontier.total_entries(), 4);
        assert_eq!(frontier.value_of(3), 0.3);
    }

    #[test]
    fn zero_resolution_is_rejected() {
        let (graph, costs) = fork();
        let err = build_frontier(&graph, &costs, &FrontierConfig::with_resolution(0)).unwrap_err();
        assert_eq!(err, SolverError::InvalidResolution);
    }

    #[test]
    fn layered_build_matches_sequential() {
        let (graph, costs) = fork();
        for resolution in [1, 10, 100, 1000] {
            let sequential =
                build_frontier(&graph, &costs, &FrontierConfig::with_resolution(resolution)).unwrap();
            let layered = build_frontier(
                &graph,
                &costs,
                &FrontierConfig {
                    parallel_layers: true,
                    ..FrontierConfig::with_resolution(resolution)
                },
            )
            .unwrap();
            assert_eq!(sequential, layered);
        }
    }

    #[test]
    fn size_guard_trips_on_the_first_oversized_node() {
        let (graph, costs) = fork();
        let config = FrontierConfig {
            max_set_size: Some(1),
            ..FrontierConfig::with_resolution(100)
        };
        let err = build_frontier(&graph, &costs, &config).unwrap_err();
        assert_eq!(
            err,
            SolverError::FrontierTooLarge {
                node: NodeId::from_index(3),
                size: 2,
                limit: 1,
            }
        );
    }

    /// 0 -> {1, 2, 3} -> 4, each middle node landing in its own bucket.
    fn fan() -> (RouteGraph, EdgeCosts) {
        let mut builder = GraphBuilder::new();
        let ids: Vec<NodeId> = [(0, 0), (1, 0), (1, 1), (1, 2), (2, 0)]
            .into_iter()
            .map(|(strip, slot)| builder.add_node(Position::origin(), StripRef::new(strip, slot)))
            .collect();
        for (f, t) in [(0, 1), (0, 2), (0, 3), (1, 4), (2, 4), (3, 4)] {
            builder.add_edge(ids[f], ids[t]);
        }
        let graph = builder.build().unwrap();

        let mut costs = EdgeCosts::new();
        for middle in 1..=3 {
            costs.insert(ids[0], ids[middle], pl(0.0)).unwrap();
            costs.insert(ids[middle], ids[4], pl(0.25 * middle as Real)).unwrap();
        }
        (graph, costs)
    }

    #[test]
    fn size_guard_stops_at_the_merge_that_crosses_the_limit() {
        let (graph, costs) = fan();
        let unguarded = build_frontier(&graph, &costs, &FrontierConfig::with_resolution(4)).unwrap();
        assert_eq!(unguarded.set(NodeId::from_index(4)).unwrap().len(), 3);

        for parallel_layers in [false, true] {
            let config = FrontierConfig {
                max_set_size: Some(1),
                parallel_layers,
                ..FrontierConfig::with_resolution(4)
            };
            let err = build_frontier(&graph, &costs, &config).unwrap_err();
            assert_eq!(
                err,
                SolverError::FrontierTooLarge {
                    node: NodeId::from_index(4),
                    size: 2,
                    limit: 1,
                }
            );
        }
    }

    #[test]
    fn size_guard_covers_the_source() {
        let (graph, costs) = fork();
        for parallel_layers in [false, true] {
            let config = FrontierConfig {
                max_set_size: Some(0),
                parallel_layers,
                ..FrontierConfig::default()
            };
            let err = build_frontier(&graph, &costs, &config).unwrap_err();
            assert_eq!(
                err,
                SolverError::FrontierTooLarge {
                    node: NodeId::from_index(0),
                    size: 1,
                    limit: 0,
                }
            );
        }
    }
}
