use crate::ast::FormulaParser;
use crate::error::FormulaError;
use crate::functions;
use std::collections::BTreeSet;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SymbolKind {
    Variable,
    Constant,
    Function,
}

/// The identifiers a formula is allowed to use, besides its own variable.
///
/// Builtin function names are always present. Constants are declared by the caller
/// before any formula is parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTable {
    constants: BTreeSet<String>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_constants<I, S>(names: I) -> Result<Self, FormulaError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = Self::new();
        for name in names {
            table.declare_constant(name.as_ref())?;
        }
        Ok(table)
    }

    /// Adds a constant to the whitelist. Builtin names and non-identifiers are refused.
    pub fn declare_constant(&mut self, name: &str) -> Result<(), FormulaError> {
        if !FormulaParser::is_identifier(name) || functions::lookup(name).is_some() {
            return Err(FormulaError::ReservedSymbol(name.to_string()));
        }
        self.constants.insert(name.to_string());
        Ok(())
    }

    pub fn is_constant(&self, name: &str) -> bool {
        self.constants.contains(name)
    }

    pub fn is_function(&self, name: &str) -> bool {
        functions::lookup(name).is_some()
    }

    pub fn constants(&self) -> impl Iterator<Item = &str> {
        self.constants.iter().map(String::as_str)
    }

    /// Classifies `name` for a formula whose independent variable is `variable`.
    pub fn classify(&self, name: &str, variable: &str) -> Option<SymbolKind> {
        if name == variable {
            Some(SymbolKind::Variable)
        } else if self.is_constant(name) {
            Some(SymbolKind::Constant)
        } else if self.is_function(name) {
            Some(SymbolKind::Function)
        } else {
            None
        }
    }

    /// The variable must not shadow a constant or a builtin.
    pub fn check_variable(&self, variable: &str) -> Result<(), FormulaError> {
        if self.is_constant(variable) || self.is_function(variable) {
            Err(FormulaError::Format(format!(
                "independent variable '{}' collides with a declared symbol",
                variable
            )))
        } else {
            Ok(())
        }
    }
}
