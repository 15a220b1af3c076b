use std::error::Error as StdError;

use thiserror::Error;

/// Errors that can occur when running a hypothesis test.
#[derive(Debug, Error)]
pub enum Error {
    #[error("confidence level must lie in (0, 1), got {value}")]
    InvalidLevel { value: f64 },

    #[error("{which} sample is empty")]
    EmptySample { which: &'static str },

    #[error("{which} sample contains a non-finite value at row {row}, column {column}")]
    NonFiniteSample {
        which: &'static str,
        row: usize,
        column: usize,
    },

    #[error("{which} sample must be one-dimensional, got dimension {dimension}")]
    DimensionMismatch { which: &'static str, dimension: usize },

    #[error("samples must have the same size, got {first} and {second}")]
    SizeMismatch { first: usize, second: usize },

    #[error("selection is empty")]
    EmptySelection,

    #[error("selection index {index} is out of bounds for dimension {dimension}")]
    SelectionOutOfBounds { index: usize, dimension: usize },

    #[error("statistical backend failed: {0}")]
    Backend(#[source] Box<dyn StdError + Send + Sync>),

    #[error("backend returned {actual} results, expected {expected}")]
    MalformedResponse { expected: usize, actual: usize },
}
