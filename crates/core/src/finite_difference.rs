use ndarray::Array2;
use thiserror::Error;

use crate::{FunctionError, NumericFunction};

/// Configuration for centred finite-difference gradients.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FiniteDifference {
    step: f64,
}

/// Errors that can occur when validating a finite-difference config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FiniteDifferenceError {
    #[error("step must be finite and strictly positive")]
    Step,
}

impl Default for FiniteDifference {
    fn default() -> Self {
        Self { step: 1e-5 }
    }
}

impl FiniteDifference {
    /// Creates a config with the given step.
    ///
    /// # Errors
    ///
    /// Returns an error if `step` is non-finite or not strictly positive.
    pub fn new(step: f64) -> Result<Self, FiniteDifferenceError> {
        if !step.is_finite() || step <= 0.0 {
            return Err(FiniteDifferenceError::Step);
        }
        Ok(Self { step })
    }

    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Approximates the `(input, output)` Jacobian of `function` at `x`.
    ///
    /// Entry `[i, k]` is `(f_k(x + h e_i) - f_k(x - h e_i)) / 2h`.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by an evaluation of `function`, or
    /// [`FunctionError::InvalidOutput`] if an evaluation returns a number of
    /// values other than `function.output_dimension()`.
    pub fn gradient<F>(&self, function: &F, x: &[f64]) -> Result<Array2<f64>, FunctionError>
    where
        F: NumericFunction + ?Sized,
    {
        let h = self.step;
        let mut gradient = Array2::zeros((x.len(), function.output_dimension()));
        let mut shifted = x.to_vec();

        for i in 0..x.len() {
            shifted[i] = x[i] + h;
            let forward = checked_evaluate(function, &shifted)?;
            shifted[i] = x[i] - h;
            let backward = checked_evaluate(function, &shifted)?;
            shifted[i] = x[i];

            for (k, (f, b)) in forward.iter().zip(&backward).enumerate() {
                gradient[[i, k]] = (f - b) / (2.0 * h);
            }
        }

        Ok(gradient)
    }
}

fn checked_evaluate<F>(function: &F, x: &[f64]) -> Result<Vec<f64>, FunctionError>
where
    F: NumericFunction + ?Sized,
{
    let y = function.evaluate(x)?;
    if y.len() != function.output_dimension() {
        return Err(FunctionError::InvalidOutput {
            expected: vec![function.output_dimension()],
            actual: vec![y.len()],
        });
    }
    Ok(y)
}
