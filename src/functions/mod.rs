pub mod elementary;

use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CallError {
    #[error("Function '{function}' expects {expected} argument(s), got {found}")]
    Arity {
        function: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Function '{0}' is not a builtin")]
    Unknown(String),
}

pub type BuiltinCall = fn(&[f64]) -> Result<f64, CallError>;

/// A function callable from formula bodies.
#[derive(Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub arity: usize,
    pub call: BuiltinCall,
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builtin")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish()
    }
}

static BUILTINS: &[Builtin] = &[
    Builtin {
        name: "exp",
        arity: elementary::EXP_ARITY,
        call: elementary::exp,
    },
    Builtin {
        name: "ln",
        arity: elementary::LN_ARITY,
        call: elementary::ln,
    },
    Builtin {
        name: "log",
        arity: elementary::LOG_ARITY,
        call: elementary::log,
    },
    Builtin {
        name: "log10",
        arity: elementary::LOG10_ARITY,
        call: elementary::log10,
    },
    Builtin {
        name: "sqrt",
        arity: elementary::SQRT_ARITY,
        call: elementary::sqrt,
    },
    Builtin {
        name: "sin",
        arity: elementary::SIN_ARITY,
        call: elementary::sin,
    },
    Builtin {
        name: "cos",
        arity: elementary::COS_ARITY,
        call: elementary::cos,
    },
    Builtin {
        name: "tan",
        arity: elementary::TAN_ARITY,
        call: elementary::tan,
    },
    Builtin {
        name: "abs",
        arity: elementary::ABS_ARITY,
        call: elementary::abs,
    },
    Builtin {
        name: "min",
        arity: elementary::MIN_ARITY,
        call: elementary::min,
    },
    Builtin {
        name: "max",
        arity: elementary::MAX_ARITY,
        call: elementary::max,
    },
];

pub fn lookup(name: &str) -> Option<&'static Builtin> {
    BUILTINS.iter().find(|builtin| builtin.name == name)
}

pub fn names() -> impl Iterator<Item = &'static str> {
    BUILTINS.iter().map(|builtin| builtin.name)
}

/// Calls a builtin by name. The result is not checked for finiteness.
pub fn call(name: &str, args: &[f64]) -> Result<f64, CallError> {
    let builtin = lookup(name).ok_or_else(|| CallError::Unknown(name.to_string()))?;
    (builtin.call)(args)
}
