//! Scripted [`TestRunner`] for unit tests.

use std::cell::RefCell;
use std::rc::Rc;

use super::executor::{RunOutput, RunnerError, TestRunner};

#[derive(Debug, Clone)]
enum Script {
    Exit(Option<i32>, String),
    SpawnFailure,
}

/// Returns a fixed result and records every target it was asked to run.
///
/// Clones share the call log, so a test can keep one clone while the other
/// is boxed into an `App`.
#[derive(Debug, Clone)]
pub(crate) struct FakeRunner {
    script: Script,
    calls: Rc<RefCell<Vec<String>>>,
}

impl FakeRunner {
    pub(crate) fn exiting(code: i32, output: &str) -> Self {
        Self::new(Script::Exit(Some(code), output.to_string()))
    }

    pub(crate) fn signaled() -> Self {
        Self::new(Script::Exit(None, "Killed".to_string()))
    }

    pub(crate) fn unstartable() -> Self {
        Self::new(Script::SpawnFailure)
    }

    fn new(script: Script) -> Self {
        Self {
            script,
            calls: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Targets run so far, oldest first.
    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl TestRunner for FakeRunner {
    fn run(&self, target: &str) -> Result<RunOutput, RunnerError> {
        self.calls.borrow_mut().push(target.to_string());
        match &self.script {
            Script::Exit(exit_code, output) => Ok(RunOutput {
                exit_code: *exit_code,
                output: output.clone(),
            }),
            Script::SpawnFailure => Err(RunnerError::Spawn {
                program: "pytest".to_string(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "No such file or directory",
                ),
            }),
        }
    }
}
