use ndarray::{Array2, Array3};

use crate::{FunctionError, NumericFunction};

/// A function that returns the same value everywhere.
///
/// Its gradient and Hessian are identically zero.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantFunction {
    name: String,
    input_dimension: usize,
    value: Vec<f64>,
}

impl ConstantFunction {
    /// Creates a constant function of `input_dimension` variables.
    pub fn new(name: impl Into<String>, input_dimension: usize, value: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            input_dimension,
            value,
        }
    }

    #[must_use]
    pub fn value(&self) -> &[f64] {
        &self.value
    }
}

impl NumericFunction for ConstantFunction {
    fn name(&self) -> &str {
        &self.name
    }

    fn input_dimension(&self) -> usize {
        self.input_dimension
    }

    fn output_dimension(&self) -> usize {
        self.value.len()
    }

    fn evaluate(&self, _x: &[f64]) -> Result<Vec<f64>, FunctionError> {
        Ok(self.value.clone())
    }

    fn gradient(&self, _x: &[f64]) -> Result<Array2<f64>, FunctionError> {
        Ok(Array2::zeros((self.input_dimension, self.value.len())))
    }

    fn hessian(&self, _x: &[f64]) -> Result<Array3<f64>, FunctionError> {
        let n = self.input_dimension;
        Ok(Array3::zeros((n, n, self.value.len())))
    }
}
