mod algebra;
mod persist;

use std::fmt;

use ndarray::ArrayView2;
use strata_core::{ConstantFunction, Function, FunctionError};

use crate::{BoundingBox, DomainError};

pub use persist::{FunctionRegistry, LevelSetRecord, RECORD_VERSION};

/// The set `{x : f(x) <= level}`, optionally restricted to a bounding box.
///
/// The dimension of a level set is the input dimension of its function, which
/// must be scalar-valued. Cloning shares the function rather than copying it.
///
/// Queries take `&self` and are safe to run from several threads at once.
/// Setters need `&mut self`, so concurrent mutation must be synchronised by
/// the caller.
#[derive(Clone)]
pub struct LevelSet {
    function: Function,
    level: f64,
    bounds: BoundingBox,
}

impl LevelSet {
    /// Creates `{x : f(x) <= level}` with no bounding box.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NotScalar`] if `function` has more or fewer than
    /// one output.
    pub fn new(function: Function, level: f64) -> Result<Self, DomainError> {
        check_scalar(&function)?;
        Ok(Self {
            function,
            level,
            bounds: BoundingBox::unbounded(),
        })
    }

    /// Creates a placeholder level set of the given dimension.
    ///
    /// Its function is the constant `1` and its level is `0`, so it contains
    /// no point until a real function or level is set.
    #[must_use]
    pub fn with_dimension(dimension: usize) -> Self {
        Self {
            function: Function::new(ConstantFunction::new("1", dimension, vec![1.0])),
            level: 0.0,
            bounds: BoundingBox::unbounded(),
        }
    }

    #[must_use]
    pub fn dimension(&self) -> usize {
        self.function.input_dimension()
    }

    #[must_use]
    pub fn function(&self) -> &Function {
        &self.function
    }

    /// Replaces the function, keeping the level and the bounding box.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::DimensionMismatch`] if the new function has a
    /// different input dimension, or [`DomainError::NotScalar`] if it is not
    /// scalar-valued.
    pub fn set_function(&mut self, function: Function) -> Result<(), DomainError> {
        check_dimension(self.dimension(), function.input_dimension())?;
        check_scalar(&function)?;
        self.function = function;
        Ok(())
    }

    #[must_use]
    pub fn level(&self) -> f64 {
        self.level
    }

    pub fn set_level(&mut self, level: f64) {
        self.level = level;
    }

    #[must_use]
    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    /// Lower corner of the bounding box, empty if unbounded below.
    #[must_use]
    pub fn lower_bound(&self) -> &[f64] {
        self.bounds.lower()
    }

    /// Sets the lower corner. An empty vector removes the bound.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::DimensionMismatch`] if `bound` is neither empty
    /// nor of the level set's dimension.
    pub fn set_lower_bound(&mut self, bound: Vec<f64>) -> Result<(), DomainError> {
        check_bound(self.dimension(), &bound)?;
        self.bounds.set_lower(bound);
        Ok(())
    }

    /// Upper corner of the bounding box, empty if unbounded above.
    #[must_use]
    pub fn upper_bound(&self) -> &[f64] {
        self.bounds.upper()
    }

    /// Sets the upper corner. An empty vector removes the bound.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::DimensionMismatch`] if `bound` is neither empty
    /// nor of the level set's dimension.
    pub fn set_upper_bound(&mut self, bound: Vec<f64>) -> Result<(), DomainError> {
        check_bound(self.dimension(), &bound)?;
        self.bounds.set_upper(bound);
        Ok(())
    }

    /// Returns true if `point` lies in the bounding box and `f(point) <= level`.
    ///
    /// Points outside the bounding box are rejected without evaluating the
    /// function.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::DimensionMismatch`] if `point` has the wrong
    /// length, or [`DomainError::Function`] if the evaluation fails.
    pub fn contains(&self, point: &[f64]) -> Result<bool, DomainError> {
        check_dimension(self.dimension(), point.len())?;
        Ok(self.margin(point)? <= 0.0)
    }

    /// Applies [`contains`](Self::contains) to every row, preserving order.
    ///
    /// All rows are checked before any evaluation, so a single row of the
    /// wrong length fails the whole batch.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::DimensionMismatch`] for the first row of the
    /// wrong length, or the first evaluation failure.
    pub fn contains_sample<R: AsRef<[f64]>>(&self, rows: &[R]) -> Result<Vec<bool>, DomainError> {
        let dimension = self.dimension();
        for row in rows {
            check_dimension(dimension, row.as_ref().len())?;
        }

        rows.iter()
            .map(|row| -> Result<bool, DomainError> {
                Ok(self.margin(row.as_ref())? <= 0.0)
            })
            .collect()
    }

    /// Applies [`contains`](Self::contains) to every row of a rectangular sample.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::DimensionMismatch`] if the sample has the wrong
    /// number of columns, or the first evaluation failure.
    pub fn contains_array(&self, sample: ArrayView2<'_, f64>) -> Result<Vec<bool>, DomainError> {
        check_dimension(self.dimension(), sample.ncols())?;

        sample
            .rows()
            .into_iter()
            .map(|row| -> Result<bool, DomainError> {
                Ok(self.margin(&row.to_vec())? <= 0.0)
            })
            .collect()
    }

    /// Signed distance to the level in function units, `+inf` outside the box.
    ///
    /// Non-positive exactly when the point belongs to the set.
    pub(crate) fn margin(&self, point: &[f64]) -> Result<f64, FunctionError> {
        if !self.bounds.contains(point) {
            return Ok(f64::INFINITY);
        }
        let value = self.function.evaluate(point)?[0];
        if value <= self.level {
            Ok((value - self.level).min(0.0))
        } else {
            Ok((value - self.level).max(f64::MIN_POSITIVE))
        }
    }
}

impl TryFrom<Function> for LevelSet {
    type Error = DomainError;

    /// Creates `{x : f(x) <= 0}` with no bounding box.
    fn try_from(function: Function) -> Result<Self, Self::Error> {
        Self::new(function, 0.0)
    }
}

impl PartialEq for LevelSet {
    /// Two level sets are equal when they share the same function handle,
    /// level, and bounds.
    fn eq(&self, other: &Self) -> bool {
        self.dimension() == other.dimension()
            && self.function == other.function
            && self.level.to_bits() == other.level.to_bits()
            && self.bounds == other.bounds
    }
}

impl fmt::Debug for LevelSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LevelSet")
            .field("function", &self.function)
            .field("level", &self.level)
            .field("bounds", &self.bounds)
            .finish()
    }
}

impl fmt::Display for LevelSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LevelSet(dimension={}, function={}, level={}, lower={:?}, upper={:?})",
            self.dimension(),
            self.function.name(),
            self.level,
            self.bounds.lower(),
            self.bounds.upper(),
        )
    }
}

fn check_dimension(expected: usize, actual: usize) -> Result<(), DomainError> {
    if expected == actual {
        Ok(())
    } else {
        Err(DomainError::DimensionMismatch { expected, actual })
    }
}

fn check_bound(dimension: usize, bound: &[f64]) -> Result<(), DomainError> {
    if bound.is_empty() {
        Ok(())
    } else {
        check_dimension(dimension, bound.len())
    }
}

fn check_scalar(function: &Function) -> Result<(), DomainError> {
    if function.output_dimension() == 1 {
        Ok(())
    } else {
        Err(DomainError::NotScalar {
            function: function.name().to_owned(),
            outputs: function.output_dimension(),
        })
    }
}
