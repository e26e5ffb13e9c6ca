use crate::error::FormulaError;
use serde::{Deserialize, Serialize};

/// One evaluated point.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub input: f64,
    pub output: f64,
}

/// Ordered (input, output) pairs. Every output is finite.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SampleSet {
    samples: Vec<Sample>,
}

impl SampleSet {
    pub(crate) fn from_samples(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    pub fn as_slice(&self) -> &[Sample] {
        &self.samples
    }

    pub fn inputs(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.input).collect()
    }

    pub fn outputs(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.output).collect()
    }

    /// Output recorded for exactly `input`, if that sample survived.
    pub fn output_at(&self, input: f64) -> Option<f64> {
        self.samples
            .iter()
            .find(|s| s.input == input)
            .map(|s| s.output)
    }
}

impl<'a> IntoIterator for &'a SampleSet {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

/// `count` evenly spaced values from `start` to `end`, both included.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleRange {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl SampleRange {
    pub fn new(start: f64, end: f64, count: usize) -> Self {
        Self { start, end, count }
    }

    pub fn values(&self) -> Result<Vec<f64>, FormulaError> {
        if !self.start.is_finite() || !self.end.is_finite() {
            return Err(FormulaError::InvalidRange(format!(
                "bounds must be finite, got {}..{}",
                self.start, self.end
            )));
        }
        match self.count {
            0 => Err(FormulaError::InvalidRange(
                "count must be at least 1".to_string(),
            )),
            1 => Ok(vec![self.start]),
            count => {
                let step = (self.end - self.start) / (count - 1) as f64;
                if !step.is_finite() {
                    return Err(FormulaError::InvalidRange(format!(
                        "span of {}..{} is too wide to sample",
                        self.start, self.end
                    )));
                }
                let mut values: Vec<f64> = (0..count)
                    .map(|i| self.start + step * i as f64)
                    .collect();
                values[count - 1] = self.end;
                Ok(values)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_includes_endpoints() {
        let values = SampleRange::new(0.0, 50.0, 300).values().unwrap();
        assert_eq!(values.len(), 300);
        assert_eq!(values[0], 0.0);
        assert_eq!(values[299], 50.0);
        assert!(values.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn test_range_integer_steps_are_exact() {
        let values = SampleRange::new(0.0, 10.0, 11).values().unwrap();
        assert_eq!(values[5], 5.0);
    }

    #[test]
    fn test_single_point_range() {
        assert_eq!(SampleRange::new(3.0, 9.0, 1).values().unwrap(), vec![3.0]);
    }

    #[test]
    fn test_descending_range() {
        let values = SampleRange::new(1.0, 0.0, 3).values().unwrap();
        assert_eq!(values, vec![1.0, 0.5, 0.0]);
    }

    #[test]
    fn test_invalid_ranges() {
        assert!(SampleRange::new(0.0, 1.0, 0).values().is_err());
        assert!(SampleRange::new(f64::NAN, 1.0, 10).values().is_err());
        assert!(SampleRange::new(0.0, f64::INFINITY, 10).values().is_err());
    }

    #[test]
    fn test_overflowing_span_rejected() {
        assert!(matches!(
            SampleRange::new(-1e308, 1e308, 3).values(),
            Err(FormulaError::InvalidRange(_))
        ));
        assert_eq!(SampleRange::new(-1e308, 1e308, 1).values().unwrap(), vec![-1e308]);
    }

    #[test]
    fn test_sample_set_accessors() {
        let set = SampleSet::from_samples(vec![
            Sample {
                input: 0.0,
                output: 1.0,
            },
            Sample {
                input: 1.0,
                output: 2.0,
            },
        ]);
        assert_eq!(set.inputs(), vec![0.0, 1.0]);
        assert_eq!(set.outputs(), vec![1.0, 2.0]);
        assert_eq!(set.output_at(1.0), Some(2.0));
        assert_eq!(set.output_at(0.5), None);
        assert_eq!(
            serde_json::to_string(&set).unwrap(),
            r#"[{"input":0.0,"output":1.0},{"input":1.0,"output":2.0}]"#
        );
    }
}
