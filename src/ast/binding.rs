use crate::error::FormulaError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Values for the named constants of one evaluation request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Binding {
    values: HashMap<String, f64>,
}

impl Binding {
    /// Creates a new empty Binding
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Builder-style insert
    pub fn with(mut self, name: &str, value: f64) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: &str, value: f64) {
        self.values.insert(name.to_string(), value);
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    /// Retrieves a bound value, which must be present and finite
    pub fn value(&self, name: &str) -> Result<f64, FormulaError> {
        let value = self
            .get(name)
            .ok_or_else(|| FormulaError::MissingBinding(name.to_string()))?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(FormulaError::NonFiniteBinding {
                symbol: name.to_string(),
                value,
            })
        }
    }

    /// Checks every required constant in name order and reports the first problem.
    pub fn require(&self, constants: &BTreeSet<String>) -> Result<(), FormulaError> {
        constants
            .iter()
            .try_for_each(|name| self.value(name).map(|_| ()))
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<HashMap<String, f64>> for Binding {
    fn from(values: HashMap<String, f64>) -> Self {
        Self { values }
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for Binding {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        }
    }
}
