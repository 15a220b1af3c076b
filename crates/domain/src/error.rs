use strata_core::FunctionError;
use thiserror::Error;

/// Errors that can occur when building or querying a domain.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A point, sample, bound, or function does not match the domain dimension.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// A level set needs a scalar-valued function.
    #[error("function `{function}` has {outputs} outputs, a level set needs exactly one")]
    NotScalar { function: String, outputs: usize },

    /// The underlying function failed while evaluating a query.
    #[error("function evaluation failed")]
    Function(#[from] FunctionError),

    /// A persisted record names a function that is not registered.
    #[error("no function named `{name}` is registered")]
    UnknownFunction { name: String },

    /// A persisted record uses a format version this build cannot read.
    #[error("unsupported record version {version}")]
    UnsupportedVersion { version: u32 },

    /// A persisted record could not be encoded or decoded.
    #[error("invalid record encoding")]
    Encoding(#[from] serde_json::Error),
}
