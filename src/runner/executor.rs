//! Subprocess invocation of the external test runner.

use std::path::PathBuf;
use std::process::{Command, Stdio};

use thiserror::Error;

use crate::config::RunnerConfig;
use crate::Status;

/// Errors starting the test runner. A runner that starts and exits nonzero
/// is not an error; it is a [`RunOutput`] with a failing code.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// `runner.program` is empty.
    #[error("No test runner program configured")]
    EmptyProgram,

    /// The process could not be started.
    #[error("Failed to start test runner '{program}': {source}")]
    Spawn {
        /// Program that failed to start.
        program: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// What a finished runner process left behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutput {
    /// Exit code, `None` when the process was killed by a signal.
    pub exit_code: Option<i32>,
    /// Captured stdout followed by stderr, decoded lossily.
    pub output: String,
}

impl RunOutput {
    /// Pass/fail verdict for the exit code.
    pub fn status(&self) -> Status {
        Status::from_exit_code(self.exit_code)
    }
}

/// Something that can run one path-scoped target.
pub trait TestRunner {
    /// Runs `target` to completion and returns its exit code and output.
    fn run(&self, target: &str) -> Result<RunOutput, RunnerError>;
}

/// Runs targets by spawning `program [args..] target`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRunner {
    program: String,
    args: Vec<String>,
    collect_args: Vec<String>,
    working_dir: Option<PathBuf>,
}

impl CommandRunner {
    /// A runner for `program` with no extra arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            collect_args: Vec::new(),
            working_dir: None,
        }
    }

    /// Builds a runner from the `[runner]` config section.
    pub fn from_config(config: &RunnerConfig) -> Self {
        Self {
            program: config.program.clone(),
            args: config.args.clone(),
            collect_args: config.collect_args.clone(),
            working_dir: config.working_dir(),
        }
    }

    /// Arguments placed before the target on every run.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Arguments used by [`CommandRunner::collect`].
    pub fn with_collect_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.collect_args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Starts the runner in `dir` instead of the current directory.
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Program name.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Directory runs start in, if set.
    pub fn working_dir(&self) -> Option<&PathBuf> {
        self.working_dir.as_ref()
    }

    /// Runs `program [collect_args..]` and returns its listing output.
    ///
    /// A nonzero exit is logged but still returned; collection errors in one
    /// module should not hide the rest of the listing.
    pub fn collect(&self) -> Result<RunOutput, RunnerError> {
        let result = self.execute(&self.collect_args)?;
        if result.exit_code != Some(0) {
            tracing::warn!(
                program = %self.program,
                exit_code = ?result.exit_code,
                "collection exited with failure"
            );
        }
        Ok(result)
    }

    fn execute(&self, args: &[String]) -> Result<RunOutput, RunnerError> {
        if self.program.is_empty() {
            return Err(RunnerError::EmptyProgram);
        }

        let mut command = Command::new(&self.program);
        command.args(args).stdin(Stdio::null());
        if let Some(dir) = &self.working_dir {
            command.current_dir(dir);
        }

        tracing::debug!(program = %self.program, ?args, dir = ?self.working_dir, "spawning runner");
        let output = command.output().map_err(|e| RunnerError::Spawn {
            program: self.program.clone(),
            source: e,
        })?;

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));
        Ok(RunOutput {
            exit_code: output.status.code(),
            output: text,
        })
    }
}

impl TestRunner for CommandRunner {
    fn run(&self, target: &str) -> Result<RunOutput, RunnerError> {
        let mut args = self.args.clone();
        args.push(target.to_string());
        self.execute(&args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shell(script: &str) -> CommandRunner {
        // `sh -c script sh TARGET` exposes the target as $1
        CommandRunner::new("sh").with_args(["-c", script, "sh"])
    }

    #[test]
    fn test_from_config_copies_fields() {
        let config = RunnerConfig {
            program: "python".to_string(),
            args: vec!["-m".to_string(), "pytest".to_string()],
            collect_args: vec!["--co".to_string()],
            working_dir: "/srv".to_string(),
        };
        let runner = CommandRunner::from_config(&config);
        assert_eq!(runner.program(), "python");
        assert_eq!(runner.working_dir(), Some(&PathBuf::from("/srv")));
        assert_eq!(
            runner,
            CommandRunner::new("python")
                .with_args(["-m", "pytest"])
                .with_collect_args(["--co"])
                .in_dir("/srv")
        );
    }

    #[test]
    fn test_empty_program_is_rejected() {
        let err = CommandRunner::new("").run("t").expect_err("should fail");
        assert!(matches!(err, RunnerError::EmptyProgram));
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let runner = CommandRunner::new("testree-no-such-runner-binary");
        match runner.run("tests/test_a.py") {
            Err(RunnerError::Spawn { program, .. }) => {
                assert_eq!(program, "testree-no-such-runner-binary");
            }
            other => panic!("expected Spawn error, got: {other:?}"),
        }
    }

    #[test]
    fn test_spawn_error_display_names_program() {
        let err = RunnerError::Spawn {
            program: "pytest".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.to_string().contains("'pytest'"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_run_output_status() {
        let passed = RunOutput {
            exit_code: Some(0),
            output: String::new(),
        };
        let failed = RunOutput {
            exit_code: Some(1),
            output: String::new(),
        };
        assert_eq!(passed.status(), Status::Passed);
        assert_eq!(failed.status(), Status::Failed);
    }

    #[cfg(unix)]
    #[test]
    fn test_run_passes_target_last_and_captures_output() {
        let result = shell("echo \"ran $1\"; echo oops >&2")
            .run("tests/test_a.py::test_one")
            .expect("sh should start");
        assert_eq!(result.exit_code, Some(0));
        assert_eq!(result.output, "ran tests/test_a.py::test_one\noops\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_run_reports_nonzero_exit() {
        let result = shell("exit 5").run("t").expect("sh should start");
        assert_eq!(result.exit_code, Some(5));
        assert_eq!(result.status(), Status::Failed);
    }

    #[cfg(unix)]
    #[test]
    fn test_run_killed_by_signal_has_no_code() {
        let result = shell("kill -9 $$").run("t").expect("sh should start");
        assert_eq!(result.exit_code, None);
        assert_eq!(result.status(), Status::Failed);
    }

    #[cfg(unix)]
    #[test]
    fn test_run_uses_working_dir() {
        let tmp = tempfile::tempdir().expect("failed to create temp dir");
        let result = shell("pwd")
            .in_dir(tmp.path())
            .run("t")
            .expect("sh should start");
        let reported = PathBuf::from(result.output.trim());
        assert_eq!(
            reported.canonicalize().expect("canonical pwd"),
            tmp.path().canonicalize().expect("canonical tmp")
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_collect_uses_collect_args_and_tolerates_failure() {
        let runner = CommandRunner::new("sh").with_collect_args([
            "-c",
            "echo '<Module a.py>'; echo '<Function t>'; exit 2",
        ]);
        let result = runner.collect().expect("sh should start");
        assert_eq!(result.exit_code, Some(2));
        assert!(result.output.contains("<Function t>"));
    }
}
