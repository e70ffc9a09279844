//! Default configuration template and file creation.
//!
//! Provides a commented TOML template that matches `Config::default()` and
//! a function to write it to the XDG config path.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::error::ConfigError;
use crate::config::xdg;

// ---------------------------------------------------------------------------
// Default TOML template
// ---------------------------------------------------------------------------

/// A commented TOML template with all default values.
///
/// Every value here must match `Config::default()` from `schema.rs`.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# testree configuration
#
# All values shown below are the built-in defaults.
# Location: $XDG_CONFIG_HOME/testree/config.toml

# ==============================================================================
# Test runner
# ==============================================================================

[runner]

# Executable used both to collect the test listing and to run targets.
program = "pytest"

# Extra arguments placed before the target on every run.
# Example: ["-x", "--tb=short"]
args = []

# Arguments that make the runner print its collection listing.
# The listing must contain "<Module path>" and "<Function name>" lines.
collect_args = ["--collect-only"]

# Directory the runner is started in. Empty means the current directory.
working_dir = ""

# ==============================================================================
# Terminal UI
# ==============================================================================

[tui]

# How often the UI polls for input, as a human-readable duration.
# Examples: "100ms", "250ms", "1s"
tick_rate = "250ms"

# Columns of indentation per tree level.
indent_width = 4

# Status glyphs and tree guides.
# Options: "unicode", "ascii"
symbols = "unicode"

# ==============================================================================
# Logging
# ==============================================================================

[log]

# Logging verbosity level. TESTREE_LOG overrides this.
# Options: "error", "warn", "info", "debug", "trace"
level = "info"

# Path to log file. Empty string means stderr for non-interactive commands
# and no log output while the TUI is running.
file = ""
"#;

// ---------------------------------------------------------------------------
// File creation
// ---------------------------------------------------------------------------

/// Creates (or force-overwrites) the default config file at the XDG path.
///
/// - If the file exists and `force` is `false`, returns `ConfigError::AlreadyExists`.
/// - If the file exists and `force` is `true`, backs it up to `.toml.backup` first.
/// - Returns the path where the config was written.
pub fn create_default_config(force: bool) -> Result<PathBuf, ConfigError> {
    let path = xdg::config_path();
    create_config_at(&path, force)?;
    Ok(path)
}

/// Writes the template to `path` following the same rules as
/// [`create_default_config`].
pub fn create_config_at(path: &Path, force: bool) -> Result<(), ConfigError> {
    if path.exists() {
        if !force {
            return Err(ConfigError::AlreadyExists {
                path: path.to_path_buf(),
            });
        }
        let backup_path = path.with_extension("toml.backup");
        fs::rename(path, &backup_path).map_err(|e| ConfigError::WriteError {
            path: backup_path.clone(),
            source: e,
        })?;
        tracing::info!("Backed up existing config to {}", backup_path.display());
    }

    write_template(path)?;
    tracing::info!("Created default configuration at {}", path.display());
    Ok(())
}

/// Writes the template to `path`, creating parent dirs and setting 0600 permissions.
fn write_template(path: &Path) -> Result<(), ConfigError> {
    let write_error = |source| ConfigError::WriteError {
        path: path.to_path_buf(),
        source,
    };

    xdg::ensure_parent_dir(path).map_err(write_error)?;
    fs::write(path, DEFAULT_CONFIG_TEMPLATE).map_err(write_error)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(write_error)?;
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::Config;
    use serial_test::serial;

    // -- Template validity --------------------------------------------------

    #[test]
    fn template_values_match_config_default() {
        let from_template: Config =
            toml::from_str(DEFAULT_CONFIG_TEMPLATE).expect("template should parse");
        assert_eq!(from_template, Config::default());
    }

    #[test]
    fn template_contains_all_section_headers() {
        for section in ["[runner]", "[tui]", "[log]"] {
            assert!(
                DEFAULT_CONFIG_TEMPLATE.contains(section),
                "missing {section} section"
            );
        }
    }

    // -- create_config_at ---------------------------------------------------

    #[test]
    fn create_writes_template_and_parent_dirs() {
        let tmp = tempfile::tempdir().expect("failed to create temp dir");
        let path = tmp.path().join("nested/dir/config.toml");
        create_config_at(&path, false).expect("should succeed");
        let content = fs::read_to_string(&path).expect("should read");
        assert_eq!(content, DEFAULT_CONFIG_TEMPLATE);
    }

    #[test]
    fn create_without_force_returns_already_exists() {
        let tmp = tempfile::tempdir().expect("failed to create temp dir");
        let path = tmp.path().join("config.toml");
        create_config_at(&path, false).expect("first call should succeed");
        let err = create_config_at(&path, false).expect_err("should fail with AlreadyExists");
        match err {
            ConfigError::AlreadyExists { path: p } => assert_eq!(p, path),
            other => panic!("expected AlreadyExists, got: {other:?}"),
        }
    }

    #[test]
    fn create_with_force_creates_backup() {
        let tmp = tempfile::tempdir().expect("failed to create temp dir");
        let path = tmp.path().join("config.toml");
        fs::write(&path, "# custom content\n").expect("write custom config");

        create_config_at(&path, true).expect("force should succeed");

        let backup = path.with_extension("toml.backup");
        let backup_content = fs::read_to_string(&backup).expect("read backup");
        assert_eq!(backup_content, "# custom content\n");
        let content = fs::read_to_string(&path).expect("read new");
        assert_eq!(content, DEFAULT_CONFIG_TEMPLATE);
    }

    #[cfg(unix)]
    #[test]
    fn file_permissions_are_0600() {
        use std::os::unix::fs::PermissionsExt;
        let tmp = tempfile::tempdir().expect("failed to create temp dir");
        let path = tmp.path().join("config.toml");
        create_config_at(&path, false).expect("should succeed");
        let mode = fs::metadata(&path).expect("metadata").permissions().mode();
        assert_eq!(mode & 0o777, 0o600, "file should be owner-only read/write");
    }

    // -- create_default_config ----------------------------------------------

    #[test]
    #[serial]
    fn create_default_config_uses_xdg_path() {
        let tmp = tempfile::tempdir().expect("failed to create temp dir");
        let original = std::env::var("XDG_CONFIG_HOME").ok();
        std::env::set_var("XDG_CONFIG_HOME", tmp.path());

        let result = create_default_config(false);

        match original {
            Some(v) => std::env::set_var("XDG_CONFIG_HOME", v),
            None => std::env::remove_var("XDG_CONFIG_HOME"),
        }
        let path = result.expect("should succeed");
        assert_eq!(path, tmp.path().join("testree/config.toml"));
        assert!(path.exists());
    }
}
