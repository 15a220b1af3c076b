use ndarray::ArrayView2;
use tracing::debug;

use crate::{Backend, Error, Level, Request, TestName, TestResult};

/// Tests whether two discrete samples are independent.
///
/// Both samples must be scalar, non-empty, and of the same size.
///
/// # Errors
///
/// Returns an [`Error`] if the inputs are invalid, the backend fails, or
/// the backend does not return exactly one result.
pub fn chi_squared<B: Backend>(
    backend: &B,
    first: ArrayView2<'_, f64>,
    second: ArrayView2<'_, f64>,
    level: f64,
) -> Result<TestResult, Error> {
    paired(backend, TestName::ChiSquared, first, second, level)
}

/// Tests whether two scalar samples from a Gaussian pair are linearly
/// uncorrelated.
///
/// Both samples must be scalar, non-empty, and of the same size.
///
/// # Errors
///
/// See [`chi_squared`].
pub fn pearson<B: Backend>(
    backend: &B,
    first: ArrayView2<'_, f64>,
    second: ArrayView2<'_, f64>,
    level: f64,
) -> Result<TestResult, Error> {
    paired(backend, TestName::Pearson, first, second, level)
}

/// Tests whether two scalar samples have no monotonic relation.
///
/// Both samples must be scalar, non-empty, and of the same size.
///
/// # Errors
///
/// See [`chi_squared`].
pub fn spearman<B: Backend>(
    backend: &B,
    first: ArrayView2<'_, f64>,
    second: ArrayView2<'_, f64>,
    level: f64,
) -> Result<TestResult, Error> {
    paired(backend, TestName::Spearman, first, second, level)
}

/// Tests whether two scalar samples come from the same continuous
/// distribution.
///
/// The samples may have different sizes.
///
/// # Errors
///
/// See [`chi_squared`].
pub fn smirnov<B: Backend>(
    backend: &B,
    first: ArrayView2<'_, f64>,
    second: ArrayView2<'_, f64>,
    level: f64,
) -> Result<TestResult, Error> {
    let level = Level::new(level)?;
    check_scalar("first", first)?;
    check_scalar("second", second)?;

    single(backend, Request::new(TestName::Smirnov, first, second, None, level))
}

/// Pearson test between each selected coordinate of `first` and the scalar
/// sample `second`.
///
/// Returns one result per entry of `selection`, in the same order.
///
/// # Errors
///
/// Returns an [`Error`] if the inputs are invalid, the backend fails, or
/// the backend returns the wrong number of results.
pub fn partial_pearson<B: Backend>(
    backend: &B,
    first: ArrayView2<'_, f64>,
    second: ArrayView2<'_, f64>,
    selection: &[usize],
    level: f64,
) -> Result<Vec<TestResult>, Error> {
    partial(backend, TestName::PartialPearson, first, second, selection, level)
}

/// Tests the significance of the regression coefficient of each selected
/// coordinate of `first` in a linear model for `second`.
///
/// # Errors
///
/// See [`partial_pearson`].
pub fn partial_regression<B: Backend>(
    backend: &B,
    first: ArrayView2<'_, f64>,
    second: ArrayView2<'_, f64>,
    selection: &[usize],
    level: f64,
) -> Result<Vec<TestResult>, Error> {
    partial(backend, TestName::PartialRegression, first, second, selection, level)
}

/// Spearman test between each selected coordinate of `first` and the scalar
/// sample `second`.
///
/// # Errors
///
/// See [`partial_pearson`].
pub fn partial_spearman<B: Backend>(
    backend: &B,
    first: ArrayView2<'_, f64>,
    second: ArrayView2<'_, f64>,
    selection: &[usize],
    level: f64,
) -> Result<Vec<TestResult>, Error> {
    partial(backend, TestName::PartialSpearman, first, second, selection, level)
}

/// [`partial_pearson`] over every coordinate of `first`.
///
/// # Errors
///
/// See [`partial_pearson`].
pub fn full_pearson<B: Backend>(
    backend: &B,
    first: ArrayView2<'_, f64>,
    second: ArrayView2<'_, f64>,
    level: f64,
) -> Result<Vec<TestResult>, Error> {
    partial_pearson(backend, first, second, &all_columns(first), level)
}

/// [`partial_regression`] over every coordinate of `first`.
///
/// # Errors
///
/// See [`partial_pearson`].
pub fn full_regression<B: Backend>(
    backend: &B,
    first: ArrayView2<'_, f64>,
    second: ArrayView2<'_, f64>,
    level: f64,
) -> Result<Vec<TestResult>, Error> {
    partial_regression(backend, first, second, &all_columns(first), level)
}

/// [`partial_spearman`] over every coordinate of `first`.
///
/// # Errors
///
/// See [`partial_pearson`].
pub fn full_spearman<B: Backend>(
    backend: &B,
    first: ArrayView2<'_, f64>,
    second: ArrayView2<'_, f64>,
    level: f64,
) -> Result<Vec<TestResult>, Error> {
    partial_spearman(backend, first, second, &all_columns(first), level)
}

fn paired<B: Backend>(
    backend: &B,
    test: TestName,
    first: ArrayView2<'_, f64>,
    second: ArrayView2<'_, f64>,
    level: f64,
) -> Result<TestResult, Error> {
    let level = Level::new(level)?;
    check_scalar("first", first)?;
    check_scalar("second", second)?;
    check_same_size(first, second)?;

    single(backend, Request::new(test, first, second, None, level))
}

fn partial<B: Backend>(
    backend: &B,
    test: TestName,
    first: ArrayView2<'_, f64>,
    second: ArrayView2<'_, f64>,
    selection: &[usize],
    level: f64,
) -> Result<Vec<TestResult>, Error> {
    let level = Level::new(level)?;
    check_sample("first", first)?;
    check_scalar("second", second)?;
    check_same_size(first, second)?;

    if selection.is_empty() {
        return Err(Error::EmptySelection);
    }
    let dimension = first.ncols();
    if let Some(&index) = selection.iter().find(|&&index| index >= dimension) {
        return Err(Error::SelectionOutOfBounds { index, dimension });
    }

    let request = Request::new(test, first, second, Some(selection.to_vec()), level);
    let results = dispatch(backend, &request)?;

    if results.len() != selection.len() {
        return Err(Error::MalformedResponse {
            expected: selection.len(),
            actual: results.len(),
        });
    }
    Ok(results)
}

fn single<B: Backend>(backend: &B, request: Request) -> Result<TestResult, Error> {
    let results = dispatch(backend, &request)?;

    match <[TestResult; 1]>::try_from(results) {
        Ok([result]) => Ok(result),
        Err(results) => Err(Error::MalformedResponse {
            expected: 1,
            actual: results.len(),
        }),
    }
}

fn dispatch<B: Backend>(backend: &B, request: &Request) -> Result<Vec<TestResult>, Error> {
    debug!(
        test = ?request.test,
        first = request.first.len(),
        second = request.second.len(),
        level = request.level,
        "dispatching hypothesis test"
    );

    backend
        .run(request)
        .map_err(|error| Error::Backend(Box::new(error)))
}

/// Rejects empty samples and samples holding NaN or infinite values, which
/// have no JSON representation.
fn check_sample(which: &'static str, sample: ArrayView2<'_, f64>) -> Result<(), Error> {
    if sample.is_empty() {
        return Err(Error::EmptySample { which });
    }
    if let Some(((row, column), _)) = sample.indexed_iter().find(|(_, value)| !value.is_finite()) {
        return Err(Error::NonFiniteSample { which, row, column });
    }
    Ok(())
}

fn check_scalar(which: &'static str, sample: ArrayView2<'_, f64>) -> Result<(), Error> {
    check_sample(which, sample)?;
    if sample.ncols() != 1 {
        return Err(Error::DimensionMismatch {
            which,
            dimension: sample.ncols(),
        });
    }
    Ok(())
}

fn check_same_size(first: ArrayView2<'_, f64>, second: ArrayView2<'_, f64>) -> Result<(), Error> {
    if first.nrows() != second.nrows() {
        return Err(Error::SizeMismatch {
            first: first.nrows(),
            second: second.nrows(),
        });
    }
    Ok(())
}

fn all_columns(sample: ArrayView2<'_, f64>) -> Vec<usize> {
    (0..sample.ncols()).collect()
}
