//! Turns "run the node under the cursor" into a runner call and folds the
//! verdict back into the tree.

use super::executor::{RunnerError, TestRunner};
use crate::tree::{NodeId, Tree};
use crate::Status;

/// Separator between a module path and a test name in a runner target.
pub const TARGET_SEPARATOR: &str = "::";

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Node whose status was updated.
    pub node: NodeId,
    /// Argument handed to the runner.
    pub target: String,
    /// Status now recorded on `node`.
    pub status: Status,
    /// Raw exit code, `None` for a signal.
    pub exit_code: Option<i32>,
    /// Captured runner output.
    pub output: String,
}

/// Path-scoping argument for a node.
///
/// A leaf becomes `module/path.py::test_name`; a directory is its own path.
pub fn run_target(tree: &Tree, id: NodeId) -> String {
    let node = tree.node(id);
    match node.parent() {
        Some(parent) if !node.is_directory() => {
            format!("{}{}{}", tree.path(parent), TARGET_SEPARATOR, node.name())
        }
        _ => tree.path(id),
    }
}

/// Runs the tests under `id` and records the verdict on that node only.
///
/// When the runner cannot be started the tree is left untouched and the
/// error is returned.
pub fn run_selected<R>(tree: &mut Tree, id: NodeId, runner: &R) -> Result<RunReport, RunnerError>
where
    R: TestRunner + ?Sized,
{
    let target = run_target(tree, id);
    let result = match runner.run(&target) {
        Ok(result) => result,
        Err(e) => {
            tracing::warn!(%target, error = %e, "runner failed to start");
            return Err(e);
        }
    };

    let status = result.status();
    tree.set_status(id, status);
    tracing::info!(%target, %status, exit_code = ?result.exit_code, "run finished");

    Ok(RunReport {
        node: id,
        target,
        status,
        exit_code: result.exit_code,
        output: result.output,
    })
}
