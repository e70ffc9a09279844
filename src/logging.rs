//! Logging initialization.
//!
//! Configures the `tracing` subscriber with level filtering via the
//! `TESTREE_LOG` environment variable, falling back to the configured
//! `[log] level` when the variable is unset or invalid.
//!
//! ```bash
//! # Debug level for everything
//! TESTREE_LOG=debug testree list
//!
//! # Module-specific filtering
//! TESTREE_LOG=testree::runner=debug,warn testree run tests/test_a.py
//! ```
//!
//! The TUI owns the terminal while it runs, so interactive sessions only log
//! when `[log] file` is set.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{xdg, LogConfig, LogLevel};

/// Environment variable holding filter directives.
pub const LOG_ENV_VAR: &str = "TESTREE_LOG";

/// Where log output goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Standard error.
    Stderr,
    /// Appended to a file.
    File(PathBuf),
    /// No subscriber is installed.
    Disabled,
}

/// Picks the log destination for a session.
pub fn log_target(config: &LogConfig, interactive: bool) -> LogTarget {
    if !config.file.is_empty() {
        LogTarget::File(PathBuf::from(&config.file))
    } else if interactive {
        LogTarget::Disabled
    } else {
        LogTarget::Stderr
    }
}

/// Filter from `TESTREE_LOG`, or `level` when the variable is unset or invalid.
pub fn env_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(level.as_filter()))
}

/// Initialize the tracing subscriber.
///
/// Fails only when the log file cannot be opened. Should be called once, at
/// startup; a second call leaves the first subscriber in place.
pub fn init(config: &LogConfig, interactive: bool) -> std::io::Result<()> {
    let filter = env_filter(config.level);
    match log_target(config, interactive) {
        LogTarget::Disabled => {}
        LogTarget::Stderr => {
            let _ = fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .try_init();
        }
        LogTarget::File(path) => {
            let file = open_log_file(&path)?;
            let _ = fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
        }
    }
    Ok(())
}

fn open_log_file(path: &Path) -> std::io::Result<File> {
    xdg::ensure_parent_dir(path)?;
    OpenOptions::new().create(true).append(true).open(path)
}
