//! Core traits and types for Strata.
//!
//! This crate defines the numeric function abstraction that the domain,
//! meta-model, and statistical crates consume:
//!
//! - [`NumericFunction`]: a multivariate, vector-valued function with
//!   optional derivatives
//! - [`Function`]: a cheap-to-clone shared handle that validates every call
//! - [`ClosureFunction`] and [`ConstantFunction`]: ready-made implementations
//! - [`FiniteDifference`]: centred finite-difference gradients
//!
//! Points are passed as `&[f64]`. Gradients are `(input, output)` matrices and
//! Hessians are `(input, input, output)` tensors.

mod error;
mod finite_difference;
mod function;

pub use error::FunctionError;
pub use finite_difference::{FiniteDifference, FiniteDifferenceError};
pub use function::{ClosureFunction, ConstantFunction, Function, NumericFunction};
