mod closure;
mod constant;

use std::{fmt, sync::Arc};

use ndarray::{Array2, Array3, ArrayView2};

use crate::FunctionError;

pub use closure::ClosureFunction;
pub use constant::ConstantFunction;

/// A multivariate, vector-valued numeric function.
///
/// Implementations must be deterministic, always producing the same result
/// for a given point, which lets level sets and surrogates treat them as
/// immutable values.
///
/// Implementations may assume that `x` has length [`input_dimension`], since
/// the [`Function`] handle checks it before every call.
///
/// [`input_dimension`]: NumericFunction::input_dimension
pub trait NumericFunction: Send + Sync {
    /// A stable identifier, used for display and as a persistence key.
    fn name(&self) -> &str;

    fn input_dimension(&self) -> usize;

    fn output_dimension(&self) -> usize;

    /// Evaluates the function at `x`.
    ///
    /// # Errors
    ///
    /// Returns [`FunctionError::Evaluation`] if the function is undefined at `x`.
    fn evaluate(&self, x: &[f64]) -> Result<Vec<f64>, FunctionError>;

    /// Returns the Jacobian at `x` as an `(input, output)` matrix.
    ///
    /// Entry `[i, k]` is the partial derivative of output `k` with respect to
    /// input `i`.
    ///
    /// # Errors
    ///
    /// The default implementation returns [`FunctionError::GradientUnavailable`].
    fn gradient(&self, _x: &[f64]) -> Result<Array2<f64>, FunctionError> {
        Err(FunctionError::GradientUnavailable {
            function: self.name().to_owned(),
        })
    }

    /// Returns the second derivatives at `x` as an `(input, input, output)` tensor.
    ///
    /// # Errors
    ///
    /// The default implementation returns [`FunctionError::HessianUnavailable`].
    fn hessian(&self, _x: &[f64]) -> Result<Array3<f64>, FunctionError> {
        Err(FunctionError::HessianUnavailable {
            function: self.name().to_owned(),
        })
    }

    /// Labels of the output components.
    fn output_description(&self) -> Vec<String> {
        (0..self.output_dimension()).map(|k| format!("y{k}")).collect()
    }
}

/// A shared handle to a [`NumericFunction`].
///
/// Cloning is cheap and never duplicates the underlying function. Two handles
/// compare equal only if they point to the same function.
///
/// Every call through the handle validates the input dimension and the shape
/// of whatever the function returns.
#[derive(Clone)]
pub struct Function(Arc<dyn NumericFunction>);

impl Function {
    /// Wraps a function in a shared handle.
    pub fn new(function: impl NumericFunction + 'static) -> Self {
        Self(Arc::new(function))
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.0.name()
    }

    #[must_use]
    pub fn input_dimension(&self) -> usize {
        self.0.input_dimension()
    }

    #[must_use]
    pub fn output_dimension(&self) -> usize {
        self.0.output_dimension()
    }

    #[must_use]
    pub fn output_description(&self) -> Vec<String> {
        self.0.output_description()
    }

    /// Returns true if both handles refer to the same function.
    #[must_use]
    pub fn same_as(&self, other: &Function) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Evaluates the function at `x`.
    ///
    /// # Errors
    ///
    /// Returns [`FunctionError::DimensionMismatch`] if `x` has the wrong length,
    /// [`FunctionError::InvalidOutput`] if the function returns the wrong number
    /// of values, or whatever error the function itself raises.
    pub fn evaluate(&self, x: &[f64]) -> Result<Vec<f64>, FunctionError> {
        self.check_input(x)?;
        let y = self.0.evaluate(x)?;
        if y.len() != self.output_dimension() {
            return Err(FunctionError::InvalidOutput {
                expected: vec![self.output_dimension()],
                actual: vec![y.len()],
            });
        }
        Ok(y)
    }

    /// Evaluates the function on every row of `sample`, preserving row order.
    ///
    /// The column count is checked once for the whole sample.
    ///
    /// # Errors
    ///
    /// Returns [`FunctionError::DimensionMismatch`] if the sample has the wrong
    /// number of columns, or the first error raised by a row evaluation.
    pub fn evaluate_sample(&self, sample: ArrayView2<'_, f64>) -> Result<Array2<f64>, FunctionError> {
        if sample.ncols() != self.input_dimension() {
            return Err(FunctionError::DimensionMismatch {
                expected: self.input_dimension(),
                actual: sample.ncols(),
            });
        }

        let mut output = Array2::zeros((sample.nrows(), self.output_dimension()));
        for (row, mut out) in sample.rows().into_iter().zip(output.rows_mut()) {
            let x = row.to_vec();
            let y = self.evaluate(&x)?;
            out.iter_mut().zip(y).for_each(|(o, v)| *o = v);
        }
        Ok(output)
    }

    /// Returns the `(input, output)` Jacobian at `x`.
    ///
    /// # Errors
    ///
    /// Returns [`FunctionError::DimensionMismatch`] if `x` has the wrong length,
    /// [`FunctionError::InvalidOutput`] if the matrix has the wrong shape, or
    /// whatever error the function itself raises.
    pub fn gradient(&self, x: &[f64]) -> Result<Array2<f64>, FunctionError> {
        self.check_input(x)?;
        let gradient = self.0.gradient(x)?;
        let expected = [self.input_dimension(), self.output_dimension()];
        if gradient.shape() != expected {
            return Err(FunctionError::InvalidOutput {
                expected: expected.to_vec(),
                actual: gradient.shape().to_vec(),
            });
        }
        Ok(gradient)
    }

    /// Returns the `(input, input, output)` Hessian at `x`.
    ///
    /// # Errors
    ///
    /// Returns [`FunctionError::DimensionMismatch`] if `x` has the wrong length,
    /// [`FunctionError::InvalidOutput`] if the tensor has the wrong shape, or
    /// whatever error the function itself raises.
    pub fn hessian(&self, x: &[f64]) -> Result<Array3<f64>, FunctionError> {
        self.check_input(x)?;
        let hessian = self.0.hessian(x)?;
        let n = self.input_dimension();
        let expected = [n, n, self.output_dimension()];
        if hessian.shape() != expected {
            return Err(FunctionError::InvalidOutput {
                expected: expected.to_vec(),
                actual: hessian.shape().to_vec(),
            });
        }
        Ok(hessian)
    }

    fn check_input(&self, x: &[f64]) -> Result<(), FunctionError> {
        if x.len() == self.input_dimension() {
            Ok(())
        } else {
            Err(FunctionError::DimensionMismatch {
                expected: self.input_dimension(),
                actual: x.len(),
            })
        }
    }
}

impl<F: NumericFunction + 'static> From<F> for Function {
    fn from(function: F) -> Self {
        Self::new(function)
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.name())
            .field("input_dimension", &self.input_dimension())
            .field("output_dimension", &self.output_dimension())
            .finish()
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (R^{} -> R^{})",
            self.name(),
            self.input_dimension(),
            self.output_dimension()
        )
    }
}
