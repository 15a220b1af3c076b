use ndarray::{Array1, Array2, Array3};
use strata_core::{FunctionError, NumericFunction};

use crate::TaylorError;

/// The affine map `x -> constant + linear^T (x - center)`.
///
/// `linear` is an `(input, output)` matrix, matching the gradient convention
/// of [`NumericFunction`], so the gradient of this function is `linear` itself
/// everywhere and its Hessian is identically zero.
#[derive(Debug, Clone, PartialEq)]
pub struct AffineFunction {
    name: String,
    center: Vec<f64>,
    constant: Vec<f64>,
    linear: Array2<f64>,
    description: Vec<String>,
}

impl AffineFunction {
    /// Creates an affine function from its center, value at the center, and
    /// `(input, output)` linear term.
    ///
    /// # Errors
    ///
    /// Returns [`TaylorError::DimensionMismatch`] if `linear` does not have
    /// `center.len()` rows and `constant.len()` columns.
    pub fn new(
        center: Vec<f64>,
        constant: Vec<f64>,
        linear: Array2<f64>,
    ) -> Result<Self, TaylorError> {
        if linear.nrows() != center.len() {
            return Err(TaylorError::DimensionMismatch {
                expected: center.len(),
                actual: linear.nrows(),
            });
        }
        if linear.ncols() != constant.len() {
            return Err(TaylorError::DimensionMismatch {
                expected: constant.len(),
                actual: linear.ncols(),
            });
        }

        let description = (0..constant.len()).map(|k| format!("y{k}")).collect();
        Ok(Self {
            name: "affine".to_owned(),
            center,
            constant,
            linear,
            description,
        })
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the output labels. Labels beyond the output dimension are ignored.
    #[must_use]
    pub fn with_description(mut self, labels: Vec<String>) -> Self {
        self.description = labels;
        self.description.truncate(self.constant.len());
        self
    }

    #[must_use]
    pub fn center(&self) -> &[f64] {
        &self.center
    }

    #[must_use]
    pub fn constant(&self) -> &[f64] {
        &self.constant
    }

    #[must_use]
    pub fn linear(&self) -> &Array2<f64> {
        &self.linear
    }
}

impl NumericFunction for AffineFunction {
    fn name(&self) -> &str {
        &self.name
    }

    fn input_dimension(&self) -> usize {
        self.center.len()
    }

    fn output_dimension(&self) -> usize {
        self.constant.len()
    }

    fn evaluate(&self, x: &[f64]) -> Result<Vec<f64>, FunctionError> {
        let dx: Array1<f64> = x.iter().zip(&self.center).map(|(x, c)| x - c).collect();
        let shift = self.linear.t().dot(&dx);

        Ok(self
            .constant
            .iter()
            .zip(shift.iter())
            .map(|(c, s)| c + s)
            .collect())
    }

    fn gradient(&self, _x: &[f64]) -> Result<Array2<f64>, FunctionError> {
        Ok(self.linear.clone())
    }

    fn hessian(&self, _x: &[f64]) -> Result<Array3<f64>, FunctionError> {
        let n = self.center.len();
        Ok(Array3::zeros((n, n, self.constant.len())))
    }

    fn output_description(&self) -> Vec<String> {
        self.description.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn evaluates_affine_map() {
        // Two inputs, two outputs: y0 = 1 + 2 dx0 - dx1, y1 = -3 + 4 dx1.
        let f = AffineFunction::new(
            vec![1.0, 1.0],
            vec![1.0, -3.0],
            array![[2.0, 0.0], [-1.0, 4.0]],
        )
        .unwrap();

        let y = f.evaluate(&[2.0, 3.0]).unwrap();

        assert_relative_eq!(y[0], 1.0 + 2.0 - 2.0);
        assert_relative_eq!(y[1], -3.0 + 8.0);
    }

    #[test]
    fn value_at_center_is_constant() {
        let f = AffineFunction::new(vec![0.3, -0.7], vec![0.1], array![[3.0], [5.0]]).unwrap();

        assert_eq!(f.evaluate(&[0.3, -0.7]).unwrap(), vec![0.1]);
    }

    #[test]
    fn rejects_inconsistent_shapes() {
        assert!(matches!(
            AffineFunction::new(vec![0.0, 0.0], vec![1.0], array![[1.0]]),
            Err(TaylorError::DimensionMismatch {
                expected: 2,
                actual: 1
            })
        ));
        assert!(matches!(
            AffineFunction::new(vec![0.0], vec![1.0], array![[1.0, 2.0]]),
            Err(TaylorError::DimensionMismatch {
                expected: 1,
                actual: 2
            })
        ));
    }

    #[test]
    fn description_is_truncated() {
        let f = AffineFunction::new(vec![0.0], vec![1.0], array![[1.0]])
            .unwrap()
            .with_description(vec!["a".into(), "b".into()]);

        assert_eq!(f.output_description(), vec!["a"]);
    }
}
