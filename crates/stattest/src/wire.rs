use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};

use crate::{Level, TestResult};

/// Current version of the request format.
pub const WIRE_VERSION: u32 = 1;

/// The tests a backend must know how to run.
///
/// The full variants are sent as partial tests over every coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestName {
    ChiSquared,
    Pearson,
    Smirnov,
    Spearman,
    PartialPearson,
    PartialRegression,
    PartialSpearman,
}

/// A validated test request, as sent to a [`Backend`](crate::Backend).
///
/// Samples are stored row by row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub version: u32,
    pub test: TestName,
    pub first: Vec<Vec<f64>>,
    pub second: Vec<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection: Option<Vec<usize>>,
    pub level: f64,
}

impl Request {
    pub(crate) fn new(
        test: TestName,
        first: ArrayView2<'_, f64>,
        second: ArrayView2<'_, f64>,
        selection: Option<Vec<usize>>,
        level: Level,
    ) -> Self {
        Self {
            version: WIRE_VERSION,
            test,
            first: rows(first),
            second: rows(second),
            selection,
            level: level.value(),
        }
    }

    /// Number of results the backend must return.
    #[must_use]
    pub fn expected_results(&self) -> usize {
        self.selection.as_ref().map_or(1, Vec::len)
    }
}

/// A backend's answer to a [`Request`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Response {
    Ok { results: Vec<TestResult> },
    Failure { message: String },
}

fn rows(sample: ArrayView2<'_, f64>) -> Vec<Vec<f64>> {
    sample.rows().into_iter().map(|row| row.to_vec()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use ndarray::array;

    fn level(value: f64) -> Level {
        Level::new(value).unwrap()
    }

    #[test]
    fn request_json_layout() {
        let first = array![[1.0], [2.0]];
        let second = array![[3.0], [4.0]];
        let request = Request::new(TestName::Pearson, first.view(), second.view(), None, level(0.9));

        let json = serde_json::to_string(&request).unwrap();

        assert_eq!(
            json,
            r#"{"version":1,"test":"pearson","first":[[1.0],[2.0]],"second":[[3.0],[4.0]],"level":0.9}"#
        );
        assert_eq!(request.expected_results(), 1);
    }

    #[test]
    fn partial_request_carries_selection() {
        let first = array![[1.0, 2.0, 3.0]];
        let second = array![[4.0]];
        let request = Request::new(
            TestName::PartialRegression,
            first.view(),
            second.view(),
            Some(vec![0, 2]),
            Level::default(),
        );

        let json = serde_json::to_string(&request).unwrap();
        let decoded: Request = serde_json::from_str(&json).unwrap();

        assert!(json.contains(r#""test":"partial_regression""#));
        assert!(json.contains(r#""selection":[0,2]"#));
        assert_eq!(decoded, request);
        assert_eq!(request.expected_results(), 2);
    }

    #[test]
    fn decodes_responses() {
        let ok: Response = serde_json::from_str(
            r#"{"status":"ok","results":[{"description":"Spearman","passed":false,"p_value":0.01,"threshold":0.05,"statistic":0.8}]}"#,
        )
        .unwrap();
        let Response::Ok { results } = ok else {
            panic!("expected results");
        };
        assert_eq!(results.len(), 1);
        assert!(!results[0].passed);

        let failure: Response =
            serde_json::from_str(r#"{"status":"failure","message":"singular matrix"}"#).unwrap();
        assert_eq!(
            failure,
            Response::Failure {
                message: "singular matrix".into()
            }
        );
    }
}
