use crate::error::{FormulaError, FormulaResult};
use serde::{Deserialize, Serialize};

/// What the evaluator does when one sample fails.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Leave the sample out, record it in `Evaluation::failures` and keep going.
    #[default]
    Skip,
    /// Stop at the first failing sample and return it as the error.
    Abort,
}

/// Evaluator settings. Every field has a default, so a partial JSON object is enough.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluatorConfig {
    pub failure_policy: FailurePolicy,
    /// Upper bound on the number of sample points in one request.
    pub max_samples: usize,
    /// Upper bound on the formula length, in characters.
    pub max_formula_len: usize,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            failure_policy: FailurePolicy::Skip,
            max_samples: 10_000,
            max_formula_len: 1_024,
        }
    }
}

impl EvaluatorConfig {
    pub fn from_json(json: &str) -> FormulaResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| FormulaError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_policy(mut self, failure_policy: FailurePolicy) -> Self {
        self.failure_policy = failure_policy;
        self
    }

    pub fn validate(&self) -> FormulaResult<()> {
        if self.max_samples == 0 {
            return Err(FormulaError::Config(
                "max_samples must be at least 1".to_string(),
            ));
        }
        if self.max_formula_len == 0 {
            return Err(FormulaError::Config(
                "max_formula_len must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
