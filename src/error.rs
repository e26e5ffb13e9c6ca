use serde::Serialize;
use thiserror::Error;

/// Why a single sample could not be evaluated.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericErrorKind {
    #[error("division by zero")]
    DivisionByZero,

    #[error("overflow")]
    Overflow,

    #[error("invalid operation")]
    InvalidOperation,
}

/// A sample that failed, tagged with the independent-variable value that produced it.
#[derive(Error, Debug, Copy, Clone, PartialEq, Serialize)]
#[error("{kind} at input {input}")]
pub struct NumericError {
    pub input: f64,
    pub kind: NumericErrorKind,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormulaError {
    #[error("Format error: {0}")]
    Format(String),

    #[error("Unknown symbol '{0}'")]
    UnknownSymbol(String),

    #[error("Syntax error: {0}")]
    Syntax(String),

    #[error("Function '{function}' expects {expected} argument(s), got {found}")]
    Arity {
        function: String,
        expected: usize,
        found: usize,
    },

    #[error("Missing binding for constant '{0}'")]
    MissingBinding(String),

    #[error("Binding for '{symbol}' is not a finite number: {value}")]
    NonFiniteBinding { symbol: String, value: f64 },

    #[error("Reserved symbol '{0}' cannot be declared as a constant")]
    ReservedSymbol(String),

    #[error("Invalid sample range: {0}")]
    InvalidRange(String),

    #[error("Formula is {found} characters long, limit is {limit}")]
    TooLong { limit: usize, found: usize },

    #[error("Numeric error: {0}")]
    Numeric(#[from] NumericError),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type FormulaResult<T> = Result<T, FormulaError>;
