//! Flanigan two-phase pressure-loss coefficients.
//!
//! Friction loss follows the Panhandle form with Flanigan's efficiency
//! factor; elevation loss uses the liquid holdup in uphill sections. Both are
//! linearized around the average line pressure into psi per foot.

use pr_core::PressureCoefficients;
use pr_core::units::{self, Length, Pressure, Temperature, constants::FT_PER_MILE};

use crate::SurveyResult;
use crate::schema::FlowConditions;

impl FlowConditions {
    pub fn inlet_pressure(&self) -> Pressure {
        units::psi(self.inlet_pressure_psi)
    }

    pub fn outlet_pressure(&self) -> Pressure {
        units::psi(self.outlet_pressure_psi)
    }

    pub fn average_pressure(&self) -> Pressure {
        (self.inlet_pressure() + self.outlet_pressure()) / 2.0
    }

    pub fn diameter(&self) -> Length {
        units::inch(self.diameter_in)
    }

    pub fn temperature(&self) -> Temperature {
        units::degf(self.temperature_f)
    }

    /// Superficial gas velocity, ft/s.
    pub fn superficial_velocity(&self) -> f64 {
        let pav = units::to_psi(self.average_pressure());
        let d = units::to_inch(self.diameter());
        31194.0 * self.gas_rate_mmcfd * self.compressibility / (pav * d * d)
    }
}

/// Flanigan efficiency factor for the given superficial velocity.
fn efficiency(velocity: f64, gas_oil_ratio: f64) -> f64 {
    let x = (velocity / gas_oil_ratio.powf(0.32)).ln();
    (-0.7464 * x * x + 0.4772 * x - 0.8003).exp()
}

/// Fraction of the uphill rise that acts as static liquid head.
fn hill_holdup(velocity: f64) -> f64 {
    1.0 / (1.0 + 0.3264 * velocity.powf(1.006))
}

/// Length (`alpha`) and rise (`beta`) pressure-loss coefficients, psi/ft.
pub fn flanigan_coefficients(flow: &FlowConditions) -> SurveyResult<PressureCoefficients> {
    let pav = units::to_psi(flow.average_pressure());
    let d = units::to_inch(flow.diameter());
    let rankine = units::to_rankine(flow.temperature());
    let velocity = flow.superficial_velocity();

    let e = efficiency(velocity, flow.gas_oil_ratio);
    let c = 20500.0 / (flow.gas_gravity.powf(0.46) * rankine.powf(0.54));
    let squared_drop_per_mile = (flow.gas_rate_mmcfd * 1e6 / (c * d.powf(2.6182) * e)).powf(1.853);
    let alpha = squared_drop_per_mile / (2.0 * pav) / FT_PER_MILE;
    let beta = flow.liquid_density * hill_holdup(velocity) / 144.0;

    tracing::debug!(velocity, efficiency = e, alpha, beta, "flanigan coefficients");
    Ok(PressureCoefficients::new(alpha, beta)?)
}
