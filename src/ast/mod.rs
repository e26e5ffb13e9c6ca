use crate::error::{FormulaError, NumericErrorKind};
use crate::functions;
use std::collections::BTreeSet;

mod binding;
mod evaluator;
mod parser;
mod sample;
mod symbols;

pub use binding::Binding;
pub use evaluator::{Evaluation, Evaluator};
pub use parser::FormulaParser;
pub use sample::{Sample, SampleRange, SampleSet};
pub use symbols::{SymbolKind, SymbolTable};

#[derive(Debug, Clone, PartialEq)]
pub enum ASTNode {
    Number(f64),
    /// The independent variable of the formula.
    Variable,
    /// A declared constant, resolved from a `Binding` before sampling.
    Constant(String),
    BinaryOperation {
        left: Box<ASTNode>,
        operator: Operator,
        right: Box<ASTNode>,
    },
    Negate(Box<ASTNode>),
    FunctionCall {
        name: String,
        args: Vec<ASTNode>,
    },
}

impl ASTNode {
    /// Replaces every constant with its bound value. The receiver is left untouched.
    pub fn resolve_constants(&self, binding: &Binding) -> Result<ASTNode, FormulaError> {
        match self {
            ASTNode::Constant(name) => binding.value(name).map(ASTNode::Number),
            ASTNode::BinaryOperation {
                left,
                operator,
                right,
            } => Ok(ASTNode::BinaryOperation {
                left: Box::new(left.resolve_constants(binding)?),
                operator: *operator,
                right: Box::new(right.resolve_constants(binding)?),
            }),
            ASTNode::Negate(inner) => Ok(ASTNode::Negate(Box::new(
                inner.resolve_constants(binding)?,
            ))),
            ASTNode::FunctionCall { name, args } => Ok(ASTNode::FunctionCall {
                name: name.clone(),
                args: args
                    .iter()
                    .map(|arg| arg.resolve_constants(binding))
                    .collect::<Result<Vec<_>, _>>()?,
            }),
            ASTNode::Number(value) => Ok(ASTNode::Number(*value)),
            ASTNode::Variable => Ok(ASTNode::Variable),
        }
    }

    /// Evaluates the tree with the independent variable set to `variable`.
    ///
    /// Every intermediate result must be finite. A constant that was never resolved
    /// cannot be evaluated and reports `InvalidOperation`.
    pub fn evaluate(&self, variable: f64) -> Result<f64, NumericErrorKind> {
        match self {
            ASTNode::Number(value) => finite(*value),
            ASTNode::Variable => finite(variable),
            ASTNode::Constant(_) => Err(NumericErrorKind::InvalidOperation),
            ASTNode::BinaryOperation {
                left,
                operator,
                right,
            } => {
                let left_value = left.evaluate(variable)?;
                let right_value = right.evaluate(variable)?;
                operator.apply(left_value, right_value)
            }
            ASTNode::Negate(inner) => Ok(-inner.evaluate(variable)?),
            ASTNode::FunctionCall { name, args } => {
                let values = args
                    .iter()
                    .map(|arg| arg.evaluate(variable))
                    .collect::<Result<Vec<_>, _>>()?;
                let value = functions::call(name, &values)
                    .map_err(|_| NumericErrorKind::InvalidOperation)?;
                finite(value)
            }
        }
    }

    /// Names of the constants referenced anywhere in the tree.
    pub fn constants(&self) -> BTreeSet<String> {
        let mut names = BTreeSet::new();
        self.collect_constants(&mut names);
        names
    }

    fn collect_constants(&self, names: &mut BTreeSet<String>) {
        match self {
            ASTNode::Constant(name) => {
                names.insert(name.clone());
            }
            ASTNode::BinaryOperation { left, right, .. } => {
                left.collect_constants(names);
                right.collect_constants(names);
            }
            ASTNode::Negate(inner) => inner.collect_constants(names),
            ASTNode::FunctionCall { args, .. } => {
                for arg in args {
                    arg.collect_constants(names);
                }
            }
            ASTNode::Number(_) | ASTNode::Variable => {}
        }
    }
}

fn finite(value: f64) -> Result<f64, NumericErrorKind> {
    if value.is_nan() {
        Err(NumericErrorKind::InvalidOperation)
    } else if value.is_infinite() {
        Err(NumericErrorKind::Overflow)
    } else {
        Ok(value)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

impl Operator {
    pub fn apply(&self, left: f64, right: f64) -> Result<f64, NumericErrorKind> {
        match self {
            Operator::Add => finite(left + right),
            Operator::Subtract => finite(left - right),
            Operator::Multiply => finite(left * right),
            Operator::Divide => {
                if right == 0.0 {
                    Err(NumericErrorKind::DivisionByZero)
                } else {
                    finite(left / right)
                }
            }
            Operator::Power => {
                if left == 0.0 && right < 0.0 {
                    Err(NumericErrorKind::DivisionByZero)
                } else if left < 0.0 && right.fract() != 0.0 {
                    Err(NumericErrorKind::InvalidOperation)
                } else {
                    finite(left.powf(right))
                }
            }
        }
    }
}

impl TryFrom<&str> for Operator {
    type Error = FormulaError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "+" => Ok(Operator::Add),
            "-" => Ok(Operator::Subtract),
            "*" => Ok(Operator::Multiply),
            "/" => Ok(Operator::Divide),
            "^" | "**" => Ok(Operator::Power),
            _ => Err(FormulaError::Syntax(format!("Unknown operator: {}", value))),
        }
    }
}

/// A parsed definition `name(variable) = body`.
#[derive(Debug, Clone, PartialEq)]
pub struct Formula {
    pub name: String,
    pub variable: String,
    pub body: ASTNode,
}

impl Formula {
    pub fn constants(&self) -> BTreeSet<String> {
        self.body.constants()
    }
}
