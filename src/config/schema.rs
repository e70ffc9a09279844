//! TOML configuration schema types for testree.
//!
//! All structs derive `Deserialize` and `Serialize` with defaults via
//! `#[serde(default)]`, so a partial file only overrides what it names.
//!
//! Duration fields use human-readable strings (e.g. `"250ms"`) parsed by the
//! `humantime` crate at the call site.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::tree::{SymbolSet, DEFAULT_INDENT_WIDTH};

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root configuration encompassing all sections.
///
/// ```toml
/// [runner]
/// [tui]
/// [log]
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Test runner invocation.
    pub runner: RunnerConfig,
    /// Terminal front end settings.
    pub tui: TuiConfig,
    /// Logging settings.
    pub log: LogConfig,
}

// ---------------------------------------------------------------------------
// Runner
// ---------------------------------------------------------------------------

/// How the external test runner is invoked.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct RunnerConfig {
    /// Executable to spawn, looked up on `PATH`.
    pub program: String,
    /// Extra arguments placed before the target.
    pub args: Vec<String>,
    /// Arguments that make the runner print its collection listing.
    pub collect_args: Vec<String>,
    /// Directory the runner is started in. Empty means the current directory.
    pub working_dir: String,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            program: "pytest".to_string(),
            args: Vec::new(),
            collect_args: vec!["--collect-only".to_string()],
            working_dir: String::new(),
        }
    }
}

impl RunnerConfig {
    /// Working directory as a path, `None` when unset.
    pub fn working_dir(&self) -> Option<PathBuf> {
        if self.working_dir.is_empty() {
            None
        } else {
            Some(PathBuf::from(&self.working_dir))
        }
    }
}

// ---------------------------------------------------------------------------
// TUI
// ---------------------------------------------------------------------------

/// Terminal front end configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TuiConfig {
    /// Input poll interval as a human-readable duration (e.g. `"250ms"`).
    pub tick_rate: String,
    /// Columns of indentation per tree level.
    pub indent_width: usize,
    /// Glyphs used for status indicators and tree guides.
    pub symbols: SymbolSet,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            tick_rate: "250ms".to_string(),
            indent_width: DEFAULT_INDENT_WIDTH,
            symbols: SymbolSet::Unicode,
        }
    }
}

/// Shortest accepted input poll interval.
pub const MIN_TICK_RATE: Duration = Duration::from_millis(10);

impl TuiConfig {
    /// Parses `tick_rate`, falling back to 250ms when it is not a valid
    /// duration. Rates below [`MIN_TICK_RATE`] are raised to it.
    pub fn tick_rate(&self) -> Duration {
        match humantime::parse_duration(&self.tick_rate) {
            Ok(rate) if rate < MIN_TICK_RATE => {
                tracing::warn!(tick_rate = %self.tick_rate, "tick_rate too short, using 10ms");
                MIN_TICK_RATE
            }
            Ok(rate) => rate,
            Err(e) => {
                tracing::warn!(tick_rate = %self.tick_rate, error = %e, "invalid tick_rate, using 250ms");
                Duration::from_millis(250)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Log
// ---------------------------------------------------------------------------

/// Logging configuration from the `[log]` section.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    /// Logging verbosity. `TESTREE_LOG` overrides it.
    pub level: LogLevel,
    /// Path to log file. Empty string means stderr for non-interactive
    /// commands and no output while the TUI owns the terminal.
    pub file: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            file: String::new(),
        }
    }
}

/// Log verbosity levels (kebab-case in TOML).
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum LogLevel {
    /// Only errors.
    Error,
    /// Errors and warnings.
    Warn,
    /// Informational messages (default).
    Info,
    /// Debug-level detail.
    Debug,
    /// Full trace output.
    Trace,
}

impl LogLevel {
    /// Directive string understood by `EnvFilter`.
    pub fn as_filter(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
