use std::{
    ffi::OsString,
    io::{self, Write},
    path::{Path, PathBuf},
    process::{Command, Stdio},
    thread,
};

use thiserror::Error;
use tracing::debug;

use crate::{Backend, Request, Response, TestResult};

/// A backend that runs an external program once per request.
///
/// The request is written to the program's standard input as JSON and a
/// [`Response`] is read back from its standard output. The program must exit
/// successfully; anything it writes to standard error is kept for the error
/// message.
///
/// ```no_run
/// use ndarray::array;
/// use strata_stattest::{DEFAULT_LEVEL, ProcessBackend, pearson};
///
/// let backend = ProcessBackend::new("python3").arg("-m").arg("strata_backend");
/// let x = array![[1.0], [2.0], [3.0]];
/// let y = array![[2.0], [4.1], [5.9]];
///
/// let result = pearson(&backend, x.view(), y.view(), DEFAULT_LEVEL).unwrap();
/// println!("p-value: {}", result.p_value);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessBackend {
    program: PathBuf,
    args: Vec<OsString>,
}

/// Errors raised by [`ProcessBackend`].
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("failed to start `{program}`")]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("i/o with backend process failed")]
    Io(#[from] io::Error),

    #[error("backend exited with {status}: {stderr}")]
    Status { status: String, stderr: String },

    #[error("backend reported failure: {message}")]
    Failure { message: String },

    #[error("invalid backend payload")]
    Encoding(#[from] serde_json::Error),
}

impl ProcessBackend {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Appends a command-line argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Appends several command-line arguments.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl Backend for ProcessBackend {
    type Error = ProcessError;

    fn run(&self, request: &Request) -> Result<Vec<TestResult>, Self::Error> {
        let payload = serde_json::to_vec(request)?;

        debug!(
            program = %self.program.display(),
            test = ?request.test,
            bytes = payload.len(),
            "running backend process"
        );

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| ProcessError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        // Stdin is fed from its own thread while stdout is drained here.
        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| io::Error::other("backend stdin was not captured"))?;
        let writer = thread::spawn(move || stdin.write_all(&payload));

        let output = child.wait_with_output()?;
        let written = writer
            .join()
            .map_err(|_| io::Error::other("stdin writer panicked"))?;

        if !output.status.success() {
            return Err(ProcessError::Status {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            });
        }
        // A child may exit successfully without reading all of its input.
        if let Err(error) = written {
            if error.kind() != io::ErrorKind::BrokenPipe {
                return Err(error.into());
            }
        }

        match serde_json::from_slice(&output.stdout)? {
            Response::Ok { results } => Ok(results),
            Response::Failure { message } => Err(ProcessError::Failure { message }),
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    use ndarray::array;

    use crate::{Level, TestName};

    fn request() -> Request {
        let x = array![[1.0], [2.0], [3.0]];
        let y = array![[1.5], [2.5], [2.0]];
        Request::new(TestName::Spearman, x.view(), y.view(), None, Level::default())
    }

    fn shell(script: &str) -> ProcessBackend {
        ProcessBackend::new("sh").args(["-c", script])
    }

    #[test]
    fn reads_results_from_stdout() {
        let backend = shell(
            r#"cat > /dev/null; printf '%s' '{"status":"ok","results":[{"description":"Spearman","passed":true,"p_value":0.5,"threshold":0.05,"statistic":0.5}]}'"#,
        );

        let results = backend.run(&request()).unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].description, "Spearman");
        assert!(results[0].passed);
    }

    #[test]
    fn receives_the_request_on_stdin() {
        // Echo the request back as the failure message.
        let backend = shell(
            r#"payload=$(cat); printf '{"status":"failure","message":"%s"}' "$(printf '%s' "$payload" | grep -o '"test":"[a-z_]*"' | tr -d '"')""#,
        );

        let error = backend.run(&request()).unwrap_err();

        assert!(
            matches!(&error, ProcessError::Failure { message } if message == "test:spearman"),
            "unexpected error: {error:?}"
        );
    }

    #[test]
    fn non_zero_exit_is_an_error() {
        let backend = shell("cat > /dev/null; echo 'no such test' >&2; exit 3");

        let error = backend.run(&request()).unwrap_err();

        assert!(matches!(&error, ProcessError::Status { stderr, .. } if stderr == "no such test"));
    }

    #[test]
    fn garbage_output_is_an_encoding_error() {
        let backend = shell("cat > /dev/null; echo 'not json'");

        assert!(matches!(
            backend.run(&request()),
            Err(ProcessError::Encoding(_))
        ));
    }

    #[test]
    fn missing_program_fails_to_spawn() {
        let backend = ProcessBackend::new("/nonexistent/strata-backend");

        assert!(matches!(
            backend.run(&request()),
            Err(ProcessError::Spawn { .. })
        ));
        assert_eq!(backend.program(), Path::new("/nonexistent/strata-backend"));
    }
}
