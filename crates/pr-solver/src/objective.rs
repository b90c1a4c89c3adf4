//! Scalar objectives a solve can minimize.

use core::fmt;
use core::str::FromStr;

use pr_core::{Metric, Metrics, Real};

/// The metric a single solve minimizes. Hill is tracked but never optimized.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Objective {
    Cost,
    Length,
    PressureLoss,
}

impl Objective {
    pub const ALL: [Objective; 3] = [Objective::Cost, Objective::Length, Objective::PressureLoss];

    pub fn metric(self) -> Metric {
        match self {
            Objective::Cost => Metric::Cost,
            Objective::Length => Metric::Length,
            Objective::PressureLoss => Metric::PressureLoss,
        }
    }

    /// Extract the objective's field from an edge or cumulative record.
    #[inline]
    pub fn value(self, metrics: &Metrics) -> Real {
        metrics.get(self.metric())
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.metric().name())
    }
}

impl FromStr for Objective {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "cost" => Ok(Objective::Cost),
            "length" => Ok(Objective::Length),
            "pressure_loss" | "pressure" => Ok(Objective::PressureLoss),
            other => Err(format!("unknown objective '{other}'")),
        }
    }
}
