//! The four route metrics carried by every edge and accumulated along routes.

use core::fmt;
use core::ops::{Add, AddAssign};

use crate::numeric::{Real, ensure_non_negative};
use crate::PrResult;

/// Selector for one of the four metrics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Metric {
    /// Construction cost (terrain and vegetation weighted length).
    Cost,
    /// Geometric 3-D length.
    Length,
    /// Positive elevation gain.
    Hill,
    /// Hydraulic pressure loss.
    PressureLoss,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::Cost,
        Metric::Length,
        Metric::Hill,
        Metric::PressureLoss,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Metric::Cost => "cost",
            Metric::Length => "length",
            Metric::Hill => "hill",
            Metric::PressureLoss => "pressure_loss",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One value per metric.
///
/// Used both as the immutable cost record of a single edge and as the
/// cumulative sum along a route.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Metrics {
    pub cost: Real,
    pub length: Real,
    pub hill: Real,
    pub pressure_loss: Real,
}

impl Metrics {
    pub const ZERO: Metrics = Metrics::splat(0.0);

    pub const fn new(cost: Real, length: Real, hill: Real, pressure_loss: Real) -> Self {
        Self {
            cost,
            length,
            hill,
            pressure_loss,
        }
    }

    /// All four metrics set to `v`.
    pub const fn splat(v: Real) -> Self {
        Self::new(v, v, v, v)
    }

    pub fn get(&self, metric: Metric) -> Real {
        match metric {
            Metric::Cost => self.cost,
            Metric::Length => self.length,
            Metric::Hill => self.hill,
            Metric::PressureLoss => self.pressure_loss,
        }
    }

    pub fn get_mut(&mut self, metric: Metric) -> &mut Real {
        match metric {
            Metric::Cost => &mut self.cost,
            Metric::Length => &mut self.length,
            Metric::Hill => &mut self.hill,
            Metric::PressureLoss => &mut self.pressure_loss,
        }
    }

    /// Combine two records metric by metric.
    pub fn zip_with(self, other: Metrics, f: impl Fn(Real, Real) -> Real) -> Metrics {
        Metrics::new(
            f(self.cost, other.cost),
            f(self.length, other.length),
            f(self.hill, other.hill),
            f(self.pressure_loss, other.pressure_loss),
        )
    }

    pub fn min(self, other: Metrics) -> Metrics {
        self.zip_with(other, Real::min)
    }

    pub fn max(self, other: Metrics) -> Metrics {
        self.zip_with(other, Real::max)
    }

    /// Check the edge-cost invariant: every component finite and `>= 0`.
    pub fn validated(self) -> PrResult<Metrics> {
        for metric in Metric::ALL {
            ensure_non_negative(self.get(metric), metric.name())?;
        }
        Ok(self)
    }
}

impl Add for Metrics {
    type Output = Metrics;

    fn add(self, rhs: Metrics) -> Metrics {
        self.zip_with(rhs, |a, b| a + b)
    }
}

impl AddAssign for Metrics {
    fn add_assign(&mut self, rhs: Metrics) {
        *self = *self + rhs;
    }
}
