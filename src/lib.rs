//! testree library
//!
//! Core pieces of the interactive test-suite navigator: the test tree and its
//! construction from `pytest --collect-only` output, cursor navigation, row
//! layout with a shared status column, and the run coordinator that folds
//! test-runner results back into the tree.
//!
//! The terminal front end in [`tui`] is a thin layer over these pieces.

use std::fmt;

/// Configuration loading, schema, and XDG path resolution.
pub mod config;

/// Tracing subscriber setup.
pub mod logging;

/// Test-runner invocation and result folding.
pub mod runner;

/// Test tree model, listing parser, navigation, and layout.
pub mod tree;

/// Terminal user interface built on ratatui and crossterm.
pub mod tui;

/// A user command, independent of the key that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Previous sibling, or the parent on a first child.
    Up,
    /// Next sibling.
    Down,
    /// Parent.
    Left,
    /// First child of an expanded directory.
    Right,
    /// Toggle a directory open or closed.
    Enter,
    /// Run the test or directory under the cursor.
    RunSelected,
    /// Leave the session.
    Quit,
}

/// Last-run status of a tree node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Status {
    /// The node has not been run in this session.
    #[default]
    NotRun,
    /// The last run of this node exited with code 0.
    Passed,
    /// The last run of this node exited with any other code.
    Failed,
}

impl Status {
    /// Maps a runner exit code to a status.
    ///
    /// `None` means the process was terminated by a signal and counts as a
    /// failure, like every code other than 0.
    pub fn from_exit_code(code: Option<i32>) -> Self {
        match code {
            Some(0) => Status::Passed,
            _ => Status::Failed,
        }
    }
}

/// Lowercase name used in run summaries, output titles and log fields.
impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Status::NotRun => "not-run",
            Status::Passed => "passed",
            Status::Failed => "failed",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests;
