use crate::ast::{Binding, Formula, FormulaParser, Sample, SampleRange, SampleSet, SymbolTable};
use crate::config::{EvaluatorConfig, FailurePolicy};
use crate::error::{FormulaError, NumericError};
use log::{debug, warn};
use serde::Serialize;

/// Result of sampling one formula.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub samples: SampleSet,
    /// Samples left out under `FailurePolicy::Skip`, in input order.
    pub failures: Vec<NumericError>,
}

impl Evaluation {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Parses formulas against a fixed whitelist and samples them.
///
/// The evaluator holds no per-request state, so one instance can serve any number
/// of requests.
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    symbols: SymbolTable,
    config: EvaluatorConfig,
}

impl Evaluator {
    /// Creates a new `Evaluator` with an empty constant whitelist.
    pub fn new(config: EvaluatorConfig) -> Self {
        Self {
            symbols: SymbolTable::new(),
            config,
        }
    }

    pub fn with_symbols(symbols: SymbolTable, config: EvaluatorConfig) -> Self {
        Self { symbols, config }
    }

    /// Whitelists a constant for every formula parsed afterwards.
    pub fn declare_constant(&mut self, name: &str) -> Result<(), FormulaError> {
        self.symbols.declare_constant(name)
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Parse a formula definition into a `Formula`.
    pub fn parse(&self, input: &str) -> Result<Formula, FormulaError> {
        let found = input.chars().count();
        if found > self.config.max_formula_len {
            return Err(FormulaError::TooLong {
                limit: self.config.max_formula_len,
                found,
            });
        }
        FormulaParser::parse_formula(input, &self.symbols)
    }

    /// Evaluates `formula` at every value in `samples`.
    ///
    /// Constants are checked and substituted once, before the first sample. A
    /// failing sample is skipped or aborts the call depending on the configured
    /// `FailurePolicy`.
    pub fn evaluate(
        &self,
        formula: &Formula,
        binding: &Binding,
        samples: &[f64],
    ) -> Result<Evaluation, FormulaError> {
        self.check_sample_count(samples.len())?;
        binding.require(&formula.constants())?;
        let resolved = formula.body.resolve_constants(binding)?;
        debug!(
            "Evaluating {}({}) at {} samples",
            formula.name,
            formula.variable,
            samples.len()
        );

        let mut points = Vec::with_capacity(samples.len());
        let mut failures = Vec::new();

        for &input in samples {
            match resolved.evaluate(input) {
                Ok(output) => points.push(Sample { input, output }),
                Err(kind) => {
                    let error = NumericError { input, kind };
                    match self.config.failure_policy {
                        FailurePolicy::Abort => return Err(error.into()),
                        FailurePolicy::Skip => {
                            warn!("Skipping sample of {}: {}", formula.name, error);
                            failures.push(error);
                        }
                    }
                }
            }
        }

        Ok(Evaluation {
            samples: SampleSet::from_samples(points),
            failures,
        })
    }

    pub fn evaluate_range(
        &self,
        formula: &Formula,
        binding: &Binding,
        range: SampleRange,
    ) -> Result<Evaluation, FormulaError> {
        self.check_sample_count(range.count)?;
        let samples = range.values()?;
        self.evaluate(formula, binding, &samples)
    }

    fn check_sample_count(&self, count: usize) -> Result<(), FormulaError> {
        if count == 0 {
            return Err(FormulaError::InvalidRange(
                "at least one sample is required".to_string(),
            ));
        }
        if count > self.config.max_samples {
            return Err(FormulaError::InvalidRange(format!(
                "{} samples requested, limit is {}",
                count, self.config.max_samples
            )));
        }
        Ok(())
    }
}
