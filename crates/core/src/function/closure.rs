use ndarray::Array2;

use crate::{FiniteDifference, FunctionError, NumericFunction};

type Evaluation = Box<dyn Fn(&[f64]) -> Vec<f64> + Send + Sync>;
type Gradient = Box<dyn Fn(&[f64]) -> Array2<f64> + Send + Sync>;

/// A [`NumericFunction`] backed by closures.
///
/// Without an analytic gradient, [`gradient`](NumericFunction::gradient) falls
/// back to centred finite differences using the configured
/// [`FiniteDifference`] step.
///
/// # Example
///
/// ```
/// use ndarray::array;
/// use strata_core::{ClosureFunction, Function};
///
/// let f = Function::new(
///     ClosureFunction::new("sum", 2, 1, |x| vec![x[0] + x[1]])
///         .with_gradient(|_| array![[1.0], [1.0]]),
/// );
///
/// assert_eq!(f.evaluate(&[1.0, 2.0]).unwrap(), vec![3.0]);
/// ```
pub struct ClosureFunction {
    name: String,
    input_dimension: usize,
    output_dimension: usize,
    evaluation: Evaluation,
    gradient: Option<Gradient>,
    description: Option<Vec<String>>,
    finite_difference: FiniteDifference,
}

impl ClosureFunction {
    /// Creates a function from an evaluation closure.
    ///
    /// The closure receives points of length `input_dimension` and must return
    /// `output_dimension` values.
    pub fn new<F>(
        name: impl Into<String>,
        input_dimension: usize,
        output_dimension: usize,
        evaluation: F,
    ) -> Self
    where
        F: Fn(&[f64]) -> Vec<f64> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            input_dimension,
            output_dimension,
            evaluation: Box::new(evaluation),
            gradient: None,
            description: None,
            finite_difference: FiniteDifference::default(),
        }
    }

    /// Sets an analytic gradient returning an `(input, output)` matrix.
    #[must_use]
    pub fn with_gradient<G>(mut self, gradient: G) -> Self
    where
        G: Fn(&[f64]) -> Array2<f64> + Send + Sync + 'static,
    {
        self.gradient = Some(Box::new(gradient));
        self
    }

    /// Sets the output labels.
    #[must_use]
    pub fn with_description<S: Into<String>>(mut self, labels: impl IntoIterator<Item = S>) -> Self {
        self.description = Some(labels.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the step used when no analytic gradient is given.
    #[must_use]
    pub fn with_finite_difference(mut self, finite_difference: FiniteDifference) -> Self {
        self.finite_difference = finite_difference;
        self
    }
}

impl NumericFunction for ClosureFunction {
    fn name(&self) -> &str {
        &self.name
    }

    fn input_dimension(&self) -> usize {
        self.input_dimension
    }

    fn output_dimension(&self) -> usize {
        self.output_dimension
    }

    fn evaluate(&self, x: &[f64]) -> Result<Vec<f64>, FunctionError> {
        Ok((self.evaluation)(x))
    }

    fn gradient(&self, x: &[f64]) -> Result<Array2<f64>, FunctionError> {
        match &self.gradient {
            Some(gradient) => Ok(gradient(x)),
            None => self.finite_difference.gradient(self, x),
        }
    }

    fn output_description(&self) -> Vec<String> {
        match &self.description {
            Some(labels) => labels.clone(),
            None => (0..self.output_dimension).map(|k| format!("y{k}")).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn uses_analytic_gradient() {
        let f = ClosureFunction::new("product", 2, 1, |x| vec![x[0] * x[1]])
            .with_gradient(|x| array![[x[1]], [x[0]]]);

        let gradient = f.gradient(&[2.0, 3.0]).expect("gradient");

        assert_eq!(gradient, array![[3.0], [2.0]]);
    }

    #[test]
    fn falls_back_to_finite_differences() {
        let f = ClosureFunction::new("product", 2, 1, |x| vec![x[0] * x[1]]);

        let gradient = f.gradient(&[2.0, 3.0]).expect("gradient");

        assert_relative_eq!(gradient[[0, 0]], 3.0, epsilon = 1e-8);
        assert_relative_eq!(gradient[[1, 0]], 2.0, epsilon = 1e-8);
    }

    #[test]
    fn custom_description() {
        let f = ClosureFunction::new("pair", 1, 2, |x| vec![x[0], -x[0]])
            .with_description(["up", "down"]);

        assert_eq!(f.output_description(), vec!["up", "down"]);
    }
}
