//! pr-core: shared foundation for piperoute.
//!
//! Contains:
//! - ids (compact node identifiers)
//! - numeric (Real + tolerances + float helpers)
//! - metrics (the four per-edge route metrics and their sums)
//! - hydraulics (pressure-loss coefficients)
//! - units (uom imperial constructors used by the survey layer)
//! - error (shared error types)

pub mod error;
pub mod hydraulics;
pub mod ids;
pub mod metrics;
pub mod numeric;
pub mod units;

pub use error::{PrError, PrResult};
pub use hydraulics::PressureCoefficients;
pub use ids::*;
pub use metrics::{Metric, Metrics};
pub use numeric::*;
