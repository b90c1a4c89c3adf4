//! Route optimization over a layered pipeline corridor graph.
//!
//! Every pass walks the graph's explicit topological order:
//! - [`build_bounds`] propagates min/max envelopes of all four metrics;
//! - [`solve_objective`] runs forward labels and a backward trace for one
//!   scalar objective;
//! - [`build_frontier`] collects the quantized cumulative pressure losses
//!   reachable at each node;
//! - [`select_target_route`] walks the frontier back from the sink to match a
//!   target pressure loss.

pub mod bounds;
pub mod error;
pub mod frontier;
pub mod objective;
pub mod path;
pub mod pressure_table;
pub mod route;
pub mod target;

pub use bounds::{NodeBounds, build_bounds};
pub use error::{SolverError, SolverResult};
pub use frontier::{FeasibilitySet, Frontier, FrontierConfig, build_frontier, quantize};
pub use objective::Objective;
pub use path::{Label, forward_labels, solve_objective};
pub use pressure_table::{DEFAULT_INCREMENTS, PressureTable, build_pressure_tables};
pub use route::{PathStep, Route, RouteGoal};
pub use target::select_target_route;
