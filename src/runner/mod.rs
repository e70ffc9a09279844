//! Test runner collaborator.
//!
//! [`executor`] spawns the external runner; [`coordinator`] maps a tree node
//! to a runner target and records the verdict.

/// Maps nodes to runner targets and folds results into the tree.
pub mod coordinator;

/// Subprocess invocation and the [`TestRunner`] seam.
pub mod executor;

pub use coordinator::{run_selected, run_target, RunReport, TARGET_SEPARATOR};
pub use executor::{CommandRunner, RunOutput, RunnerError, TestRunner};

#[cfg(test)]
pub(crate) mod testing;
