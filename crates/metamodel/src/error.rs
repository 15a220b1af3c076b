use strata_core::FunctionError;
use thiserror::Error;

/// Errors that can occur when building a Taylor surrogate.
#[derive(Debug, Error)]
pub enum TaylorError {
    /// The center, constant, or linear term does not match the function dimensions.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Evaluating the function at the center failed.
    #[error("failed to evaluate the function at the center")]
    Evaluation(#[source] FunctionError),

    /// Computing the gradient at the center failed.
    #[error("failed to compute the gradient at the center")]
    Gradient(#[source] FunctionError),
}
