pub mod ast;
pub mod config;
pub mod error;
pub mod functions;
pub mod physics;

pub use ast::{Binding, Evaluation, Evaluator, Formula, SampleRange, SampleSet, SymbolTable};
pub use config::{EvaluatorConfig, FailurePolicy};
pub use error::{FormulaError, FormulaResult, NumericError, NumericErrorKind};

use std::collections::HashMap;

/// Parses `formula` with the keys of `constants` as its whitelist and samples it
/// over `range` using the default configuration.
pub fn evaluate_formula(
    formula: &str,
    constants: &HashMap<String, f64>,
    range: SampleRange,
) -> FormulaResult<Evaluation> {
    let symbols = SymbolTable::with_constants(constants.keys())?;
    let evaluator = Evaluator::with_symbols(symbols, EvaluatorConfig::default());

    let formula = evaluator.parse(formula)?;
    let binding = Binding::from(constants.clone());
    evaluator.evaluate_range(&formula, &binding, range)
}

/// Installs the `pretty_env_logger` backend. Safe to call more than once.
pub fn init_logging() {
    let _ = pretty_env_logger::try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluate_formula() {
        let constants = HashMap::from([("N0".to_string(), 100.0), ("λ".to_string(), 0.1)]);
        let result = evaluate_formula(
            "N(t) = N0 * exp(-λ * t)",
            &constants,
            SampleRange::new(0.0, 10.0, 2),
        )
        .unwrap();

        let outputs = result.samples.outputs();
        assert!((outputs[0] - 100.0).abs() < 1e-6);
        assert!((outputs[1] - 36.788).abs() < 1e-3);
    }

    #[test]
    fn test_constants_define_the_whitelist() {
        let constants = HashMap::from([("k".to_string(), 2.0)]);
        let result = evaluate_formula("f(t) = k * t + c", &constants, SampleRange::new(0.0, 1.0, 2));
        assert_eq!(result, Err(FormulaError::UnknownSymbol("c".to_string())));
    }

    #[test]
    fn test_builtin_name_cannot_be_bound() {
        let constants = HashMap::from([("sqrt".to_string(), 2.0)]);
        let result = evaluate_formula("f(t) = t", &constants, SampleRange::new(0.0, 1.0, 2));
        assert_eq!(result, Err(FormulaError::ReservedSymbol("sqrt".to_string())));
    }

    #[test]
    fn test_init_logging_is_idempotent() {
        init_logging();
        init_logging();
    }
}
