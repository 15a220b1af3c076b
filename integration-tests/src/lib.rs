//! Shared fixtures for the cross-crate tests under `tests/`.

pub mod functions {
    use ndarray::array;
    use strata_core::{ClosureFunction, Function};

    /// Squared distance to `(cx, cy)`, with an analytic gradient.
    pub fn disk(cx: f64, cy: f64) -> Function {
        Function::new(
            ClosureFunction::new(format!("disk({cx}, {cy})"), 2, 1, move |x| {
                vec![(x[0] - cx).powi(2) + (x[1] - cy).powi(2)]
            })
            .with_gradient(move |x| array![[2.0 * (x[0] - cx)], [2.0 * (x[1] - cy)]])
            .with_description(["distance2"]),
        )
    }

    /// `x0^2 + 3 x1 + sin(x0 x1)`, differentiated numerically.
    pub fn wavy() -> Function {
        Function::new(ClosureFunction::new("wavy", 2, 1, |x| {
            vec![x[0] * x[0] + 3.0 * x[1] + (x[0] * x[1]).sin()]
        }))
    }
}

pub mod backends {
    use std::cell::RefCell;

    use strata_stattest::{Backend, Request, TestResult};

    /// In-process backend computing a Pearson-style correlation and a
    /// crude p-value, enough to exercise the dispatch path end to end.
    #[derive(Debug, Default)]
    pub struct Correlation {
        requests: RefCell<Vec<Request>>,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("constant sample has no correlation")]
    pub struct Degenerate;

    impl Correlation {
        pub fn requests(&self) -> Vec<Request> {
            self.requests.borrow().clone()
        }
    }

    impl Backend for Correlation {
        type Error = Degenerate;

        fn run(&self, request: &Request) -> Result<Vec<TestResult>, Self::Error> {
            self.requests.borrow_mut().push(request.clone());

            let second: Vec<f64> = request.second.iter().map(|row| row[0]).collect();
            let columns = request.selection.clone().unwrap_or_else(|| vec![0]);
            let threshold = 1.0 - request.level;

            columns
                .into_iter()
                .map(|j| -> Result<TestResult, Degenerate> {
                    let first: Vec<f64> = request.first.iter().map(|row| row[j]).collect();
                    let r = correlation(&first, &second).ok_or(Degenerate)?;
                    // Strong correlation means the independence hypothesis fails.
                    let p_value = 1.0 - r.abs();
                    Ok(TestResult {
                        description: format!("{:?}[{j}]", request.test),
                        passed: p_value >= threshold,
                        p_value,
                        threshold,
                        statistic: r,
                    })
                })
                .collect()
        }
    }

    fn correlation(x: &[f64], y: &[f64]) -> Option<f64> {
        let n = x.len() as f64;
        let mx = x.iter().sum::<f64>() / n;
        let my = y.iter().sum::<f64>() / n;
        let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
        for (a, b) in x.iter().zip(y) {
            sxy += (a - mx) * (b - my);
            sxx += (a - mx) * (a - mx);
            syy += (b - my) * (b - my);
        }
        if sxx == 0.0 || syy == 0.0 {
            None
        } else {
            Some(sxy / (sxx * syy).sqrt())
        }
    }
}
