use thiserror::Error;

/// Errors that can occur when calling a [`NumericFunction`].
///
/// [`NumericFunction`]: crate::NumericFunction
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FunctionError {
    /// The input point does not have the function's input dimension.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// The function returned a value of the wrong size or shape.
    ///
    /// Indicates a bug in the [`NumericFunction`](crate::NumericFunction)
    /// implementation rather than in the caller.
    #[error("function returned an output of shape {actual:?}, expected {expected:?}")]
    InvalidOutput {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    /// The evaluation itself failed, for example outside the function's
    /// domain of definition.
    #[error("evaluation of `{function}` failed: {reason}")]
    Evaluation { function: String, reason: String },

    /// The function does not provide a gradient.
    #[error("gradient of `{function}` is not available")]
    GradientUnavailable { function: String },

    /// The function does not provide a Hessian.
    #[error("hessian of `{function}` is not available")]
    HessianUnavailable { function: String },
}
