use crate::PrError;

/// Floating point type used throughout the engine.
pub type Real = f64;

/// Absolute/relative tolerance pair for float comparisons.
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-9,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, PrError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(PrError::NonFinite { what, value: v })
    }
}

/// Finite and `>= 0`. Edge metrics must satisfy this.
pub fn ensure_non_negative(v: Real, what: &'static str) -> Result<Real, PrError> {
    let v = ensure_finite(v, what)?;
    if v < 0.0 {
        Err(PrError::Negative { what, value: v })
    } else {
        Ok(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearly_equal_basic() {
        let tol = Tolerances {
            abs: 1e-12,
            rel: 1e-9,
        };
        assert!(nearly_equal(1.0, 1.0 + 1e-12, tol));
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(!nearly_equal(1.0, 1.0 + 1e-6, tol));
    }

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn ensure_non_negative_rejects_negative_and_infinite() {
        assert_eq!(ensure_non_negative(0.0, "zero").unwrap(), 0.0);
        assert!(matches!(
            ensure_non_negative(-1.0, "neg"),
            Err(PrError::Negative { what: "neg", .. })
        ));
        assert!(matches!(
            ensure_non_negative(Real::INFINITY, "inf"),
            Err(PrError::NonFinite { .. })
        ));
    }
}
