//! Hypothesis tests over sample data.
//!
//! The functions in this crate validate their inputs, package them into a
//! [`Request`], and hand it to a [`Backend`] that performs the actual
//! statistical computation. The crate never depends on how a backend is
//! reached: [`ProcessBackend`] exchanges JSON with an external program, and
//! callers can implement [`Backend`] for any other transport.
//!
//! # Tests
//!
//! Two scalar samples:
//!
//! - [`chi_squared`]: independence of two discrete samples (paired)
//! - [`pearson`]: linear relation of a Gaussian pair (paired)
//! - [`spearman`]: monotonic relation (paired)
//! - [`smirnov`]: equality of two continuous distributions (sizes may differ)
//!
//! A multivariate sample against a scalar one, coordinate by coordinate:
//!
//! - [`partial_pearson`], [`partial_regression`], [`partial_spearman`]: on
//!   selected coordinates
//! - [`full_pearson`], [`full_regression`], [`full_spearman`]: on every
//!   coordinate
//!
//! Samples are `ndarray` matrices with one observation per row. Every test
//! takes a confidence `level` in the open interval `(0, 1)`;
//! [`DEFAULT_LEVEL`] is `0.95`.

mod backend;
mod error;
mod hypothesis;
mod level;
mod result;
mod wire;

pub use backend::{Backend, ProcessBackend, ProcessError};
pub use error::Error;
pub use hypothesis::{
    chi_squared, full_pearson, full_regression, full_spearman, partial_pearson,
    partial_regression, partial_spearman, pearson, smirnov, spearman,
};
pub use level::{DEFAULT_LEVEL, Level};
pub use result::TestResult;
pub use wire::{Request, Response, TestName, WIRE_VERSION};
