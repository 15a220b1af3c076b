//! Surrogate models for Strata.
//!
//! - [`LinearTaylor`]: builds a first-order Taylor expansion of a function
//!   about a center point
//! - [`AffineFunction`]: the resulting response surface,
//!   `x -> constant + linear^T (x - center)`

mod affine;
mod error;
mod linear_taylor;

pub use affine::AffineFunction;
pub use error::TaylorError;
pub use linear_taylor::LinearTaylor;
