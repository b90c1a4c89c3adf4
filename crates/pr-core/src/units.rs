// pr-core/src/units.rs
//
// Survey data and the two-phase flow correlations are imperial; keep the
// conversions behind uom so callers never juggle raw factors.

use uom::si::f64::{
    Length as UomLength, Pressure as UomPressure,
    ThermodynamicTemperature as UomThermodynamicTemperature,
};

pub type Length = UomLength;
pub type Pressure = UomPressure;
pub type Temperature = UomThermodynamicTemperature;

#[inline]
pub fn ft(v: f64) -> Length {
    use uom::si::length::foot;
    Length::new::<foot>(v)
}

#[inline]
pub fn inch(v: f64) -> Length {
    use uom::si::length::inch;
    Length::new::<inch>(v)
}

#[inline]
pub fn psi(v: f64) -> Pressure {
    use uom::si::pressure::pound_force_per_square_inch;
    Pressure::new::<pound_force_per_square_inch>(v)
}

#[inline]
pub fn degf(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::degree_fahrenheit;
    Temperature::new::<degree_fahrenheit>(v)
}

#[inline]
pub fn to_ft(v: Length) -> f64 {
    use uom::si::length::foot;
    v.get::<foot>()
}

#[inline]
pub fn to_inch(v: Length) -> f64 {
    use uom::si::length::inch;
    v.get::<inch>()
}

#[inline]
pub fn to_psi(v: Pressure) -> f64 {
    use uom::si::pressure::pound_force_per_square_inch;
    v.get::<pound_force_per_square_inch>()
}

#[inline]
pub fn to_rankine(v: Temperature) -> f64 {
    use uom::si::thermodynamic_temperature::degree_rankine;
    v.get::<degree_rankine>()
}

pub mod constants {
    pub const FT_PER_MILE: f64 = 5280.0;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_round_trip() {
        assert!((to_ft(ft(5280.0)) - 5280.0).abs() < 1e-9);
        assert!((to_inch(inch(12.17)) - 12.17).abs() < 1e-9);
        assert!((to_psi(psi(880.0)) - 880.0).abs() < 1e-6);
    }

    #[test]
    fn fahrenheit_to_rankine() {
        assert!((to_rankine(degf(90.0)) - 549.67).abs() < 1e-6);
    }
}
