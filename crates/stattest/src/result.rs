use serde::{Deserialize, Serialize};

/// The outcome of a hypothesis test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    /// Name of the test as reported by the backend.
    pub description: String,

    /// True if the null hypothesis is not rejected at the requested level.
    pub passed: bool,

    pub p_value: f64,

    /// Significance threshold, `1 - level`.
    pub threshold: f64,

    pub statistic: f64,
}
