use crate::ast::{Binding, Evaluator, SampleRange, SampleSet, SymbolTable};
use crate::config::{EvaluatorConfig, FailurePolicy};
use crate::physics::{finite, non_negative, positive, PhysicsError, PhysicsResult};
use std::f64::consts::LN_2;

/// The exponential decay law, in the notation formula authors use.
pub const DECAY_FORMULA: &str = "N(t) = N0 * exp(-λ * t)";

/// λ = ln 2 / T½
pub fn decay_constant(half_life: f64) -> PhysicsResult<f64> {
    Ok(LN_2 / positive("half-life", half_life)?)
}

/// T½ = ln 2 / λ
pub fn half_life(decay_constant: f64) -> PhysicsResult<f64> {
    Ok(LN_2 / positive("decay constant", decay_constant)?)
}

/// N = N0·e^(−λt)
pub fn remaining_quantity(initial: f64, decay_constant: f64, time: f64) -> PhysicsResult<f64> {
    let initial = non_negative("initial quantity", initial)?;
    let decay_constant = non_negative("decay constant", decay_constant)?;
    let time = finite("time", time)?;
    finite("remaining quantity", initial * (-decay_constant * time).exp())
}

/// Time for `initial` to decay to `remaining`, the age of a sample.
pub fn elapsed_time(initial: f64, remaining: f64, half_life: f64) -> PhysicsResult<f64> {
    let ratio = positive("initial quantity", initial)? / positive("remaining quantity", remaining)?;
    Ok(ratio.ln() / decay_constant(half_life)?)
}

/// Half-life implied by two measurements `time` apart.
pub fn estimate_half_life(initial: f64, remaining: f64, time: f64) -> PhysicsResult<f64> {
    let ratio = positive("initial quantity", initial)? / positive("remaining quantity", remaining)?;
    let time = finite("time", time)?;
    if ratio == 1.0 {
        return Err(PhysicsError::Undefined(
            "no decay between the two measurements".to_string(),
        ));
    }
    Ok(time * LN_2 / ratio.ln())
}

/// Samples the decay law over `range` through the formula evaluator.
pub fn decay_curve(initial: f64, decay_constant: f64, range: SampleRange) -> PhysicsResult<SampleSet> {
    let initial = non_negative("initial quantity", initial)?;
    let decay_constant = non_negative("decay constant", decay_constant)?;

    let symbols = SymbolTable::with_constants(["N0", "λ"])?;
    let config = EvaluatorConfig::default().with_policy(FailurePolicy::Abort);
    let evaluator = Evaluator::with_symbols(symbols, config);

    let formula = evaluator.parse(DECAY_FORMULA)?;
    let binding = Binding::new()
        .with("N0", initial)
        .with("λ", decay_constant);
    Ok(evaluator.evaluate_range(&formula, &binding, range)?.samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FormulaError;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_decay_constant_round_trip() {
        let lambda = decay_constant(5730.0).unwrap();
        assert_close(lambda, 1.2096809433e-4);
        assert_close(half_life(lambda).unwrap(), 5730.0);
    }

    #[test]
    fn test_one_half_life_halves_the_quantity() {
        let lambda = decay_constant(8.02).unwrap();
        assert_close(remaining_quantity(200.0, lambda, 8.02).unwrap(), 100.0);
        assert_close(remaining_quantity(200.0, lambda, 0.0).unwrap(), 200.0);
    }

    #[test]
    fn test_elapsed_time() {
        assert_close(elapsed_time(100.0, 25.0, 10.0).unwrap(), 20.0);
    }

    #[test]
    fn test_estimate_half_life() {
        assert_close(estimate_half_life(100.0, 12.5, 30.0).unwrap(), 10.0);
        assert!(matches!(
            estimate_half_life(100.0, 100.0, 30.0),
            Err(PhysicsError::Undefined(_))
        ));
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(
            decay_constant(0.0),
            Err(PhysicsError::NonPositive { .. })
        ));
        assert!(matches!(
            decay_constant(f64::INFINITY),
            Err(PhysicsError::NonFinite { .. })
        ));
        assert!(elapsed_time(100.0, 0.0, 10.0).is_err());
        assert!(remaining_quantity(-1.0, 0.1, 1.0).is_err());
    }

    #[test]
    fn test_decay_curve_matches_closed_form() {
        let curve = decay_curve(100.0, 0.1, SampleRange::new(0.0, 50.0, 300)).unwrap();
        assert_eq!(curve.len(), 300);
        for sample in &curve {
            assert_close(
                sample.output,
                remaining_quantity(100.0, 0.1, sample.input).unwrap(),
            );
        }
    }

    #[test]
    fn test_decay_curve_rejects_empty_range() {
        assert!(matches!(
            decay_curve(100.0, 0.1, SampleRange::new(0.0, 1.0, 0)),
            Err(PhysicsError::Formula(FormulaError::InvalidRange(_)))
        ));
    }
}
