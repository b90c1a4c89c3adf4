//! Linear pressure-loss model shared by the survey compiler and the solver.

use crate::numeric::{Real, ensure_finite};
use crate::PrResult;

/// Pressure loss per unit length (`alpha`) and per unit of positive
/// elevation gain (`beta`).
///
/// A segment of length `L` that climbs `H` loses `alpha * L + beta * H`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PressureCoefficients {
    pub alpha: Real,
    pub beta: Real,
}

impl PressureCoefficients {
    pub fn new(alpha: Real, beta: Real) -> PrResult<Self> {
        Ok(Self {
            alpha: ensure_finite(alpha, "alpha")?,
            beta: ensure_finite(beta, "beta")?,
        })
    }

    /// Pressure loss for a segment of `length` climbing `hill`.
    #[inline]
    pub fn loss(&self, length: Real, hill: Real) -> Real {
        self.alpha * length + self.beta * hill
    }
}
