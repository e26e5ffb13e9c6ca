//! Closed-form nuclear physics helpers shared by the presentation layer.
//!
//! Everything here is a pure function of its arguments. Inputs outside the
//! physical domain are rejected with a `PhysicsError` instead of producing NaN.

pub mod criticality;
pub mod decay;
pub mod dose;
pub mod shielding;
pub mod units;

use crate::error::FormulaError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PhysicsError {
    #[error("{quantity} must be a finite number, got {value}")]
    NonFinite { quantity: &'static str, value: f64 },

    #[error("{quantity} must be positive, got {value}")]
    NonPositive { quantity: &'static str, value: f64 },

    #[error("{quantity} must lie in [{min}, {max}], got {value}")]
    OutOfRange {
        quantity: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Undefined result: {0}")]
    Undefined(String),

    #[error("Unknown unit '{0}'")]
    UnknownUnit(String),

    #[error("Formula error: {0}")]
    Formula(#[from] FormulaError),
}

pub type PhysicsResult<T> = Result<T, PhysicsError>;

pub(crate) fn finite(quantity: &'static str, value: f64) -> PhysicsResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PhysicsError::NonFinite { quantity, value })
    }
}

pub(crate) fn positive(quantity: &'static str, value: f64) -> PhysicsResult<f64> {
    if finite(quantity, value)? > 0.0 {
        Ok(value)
    } else {
        Err(PhysicsError::NonPositive { quantity, value })
    }
}

pub(crate) fn non_negative(quantity: &'static str, value: f64) -> PhysicsResult<f64> {
    in_range(quantity, value, 0.0, f64::INFINITY)
}

pub(crate) fn in_range(quantity: &'static str, value: f64, min: f64, max: f64) -> PhysicsResult<f64> {
    if (min..=max).contains(&finite(quantity, value)?) {
        Ok(value)
    } else {
        Err(PhysicsError::OutOfRange {
            quantity,
            value,
            min,
            max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validators() {
        assert_eq!(positive("x", 2.0), Ok(2.0));
        assert!(matches!(
            positive("x", 0.0),
            Err(PhysicsError::NonPositive { quantity: "x", .. })
        ));
        assert!(matches!(
            positive("x", f64::NAN),
            Err(PhysicsError::NonFinite { .. })
        ));
        assert_eq!(non_negative("x", 0.0), Ok(0.0));
        assert!(matches!(
            in_range("fraction", 1.5, 0.0, 1.0),
            Err(PhysicsError::OutOfRange { .. })
        ));
    }
}
