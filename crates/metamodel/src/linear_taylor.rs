use std::fmt;

use ndarray::Array2;
use strata_core::Function;
use tracing::debug;

use crate::{AffineFunction, TaylorError};

/// First-order Taylor expansion of a function about a center point.
///
/// Construction only stores the inputs. [`run`](Self::run) evaluates the
/// function and its gradient at the center and builds the response surface.
/// Until then [`constant`](Self::constant) is empty, [`linear`](Self::linear)
/// has shape `(0, 0)`, and [`response_surface`](Self::response_surface) is
/// `None`; nothing is computed lazily.
///
/// # Example
///
/// ```
/// use ndarray::array;
/// use strata_core::{ClosureFunction, Function};
/// use strata_metamodel::LinearTaylor;
///
/// let f = Function::new(
///     ClosureFunction::new("sum", 2, 1, |x| vec![x[0] + x[1]])
///         .with_gradient(|_| array![[1.0], [1.0]]),
/// );
///
/// let mut taylor = LinearTaylor::new(vec![1.0, 1.0], f).unwrap();
/// taylor.run().unwrap();
///
/// let surface = taylor.response_surface().unwrap();
/// assert_eq!(surface.evaluate(&[2.0, 2.0]).unwrap(), vec![4.0]);
/// ```
#[derive(Debug, Clone)]
pub struct LinearTaylor {
    center: Vec<f64>,
    input_function: Function,
    constant: Vec<f64>,
    linear: Array2<f64>,
    response_surface: Option<Function>,
}

impl LinearTaylor {
    /// Stores the center and the function to approximate.
    ///
    /// # Errors
    ///
    /// Returns [`TaylorError::DimensionMismatch`] if `center` does not have the
    /// function's input dimension. The check is done here rather than in
    /// [`run`](Self::run).
    pub fn new(center: Vec<f64>, input_function: Function) -> Result<Self, TaylorError> {
        if center.len() != input_function.input_dimension() {
            return Err(TaylorError::DimensionMismatch {
                expected: input_function.input_dimension(),
                actual: center.len(),
            });
        }

        Ok(Self {
            center,
            input_function,
            constant: Vec::new(),
            linear: Array2::zeros((0, 0)),
            response_surface: None,
        })
    }

    /// Computes the value and gradient at the center and builds the
    /// response surface.
    ///
    /// Running again recomputes everything from the same inputs.
    ///
    /// # Errors
    ///
    /// Returns [`TaylorError::Evaluation`] or [`TaylorError::Gradient`] if the
    /// function fails at the center. On error the previous state is kept.
    pub fn run(&mut self) -> Result<(), TaylorError> {
        debug!(
            function = self.input_function.name(),
            center = ?self.center,
            "building linear Taylor expansion"
        );

        let constant = self
            .input_function
            .evaluate(&self.center)
            .map_err(TaylorError::Evaluation)?;
        let linear = self
            .input_function
            .gradient(&self.center)
            .map_err(TaylorError::Gradient)?;

        let surface = AffineFunction::new(self.center.clone(), constant.clone(), linear.clone())?
            .with_name(format!("taylor1({})", self.input_function.name()))
            .with_description(self.input_function.output_description());

        self.constant = constant;
        self.linear = linear;
        self.response_surface = Some(Function::new(surface));
        Ok(())
    }

    #[must_use]
    pub fn center(&self) -> &[f64] {
        &self.center
    }

    #[must_use]
    pub fn input_function(&self) -> &Function {
        &self.input_function
    }

    /// Value of the function at the center, empty before [`run`](Self::run).
    #[must_use]
    pub fn constant(&self) -> &[f64] {
        &self.constant
    }

    /// `(input, output)` gradient at the center, `(0, 0)` before [`run`](Self::run).
    #[must_use]
    pub fn linear(&self) -> &Array2<f64> {
        &self.linear
    }

    /// The affine surrogate, `None` before [`run`](Self::run).
    #[must_use]
    pub fn response_surface(&self) -> Option<&Function> {
        self.response_surface.as_ref()
    }
}

impl fmt::Display for LinearTaylor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let linear: Vec<Vec<f64>> = self
            .linear
            .rows()
            .into_iter()
            .map(|row| row.to_vec())
            .collect();
        write!(
            f,
            "LinearTaylor(center={:?}, function={}, constant={:?}, linear={:?})",
            self.center,
            self.input_function.name(),
            self.constant,
            linear,
        )
    }
}
