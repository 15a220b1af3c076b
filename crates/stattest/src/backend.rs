mod process;

pub use process::{ProcessBackend, ProcessError};

use crate::{Request, TestResult};

/// Performs the statistical computation behind a hypothesis test.
///
/// Requests reaching a backend have already been validated: samples are
/// non-empty, sizes agree where the test requires it, the selection is in
/// bounds, and the level lies in `(0, 1)`.
pub trait Backend {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Runs the requested test.
    ///
    /// Must return one result per selected coordinate for partial tests and
    /// exactly one result otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the backend cannot compute the test.
    fn run(&self, request: &Request) -> Result<Vec<TestResult>, Self::Error>;
}

impl<B: Backend + ?Sized> Backend for &B {
    type Error = B::Error;

    fn run(&self, request: &Request) -> Result<Vec<TestResult>, Self::Error> {
        (**self).run(request)
    }
}
