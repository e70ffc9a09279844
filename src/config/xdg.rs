//! Platform-aware config path resolution for testree.
//!
//! On **Linux**, follows the XDG Base Directory Specification:
//! `$XDG_CONFIG_HOME/testree` or `~/.config/testree`.
//!
//! On **macOS**, `$XDG_CONFIG_HOME/testree` or
//! `~/Library/Application Support/testree`.

use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "testree";

/// Returns the configuration directory for testree.
///
/// Resolution order:
/// 1. `$XDG_CONFIG_HOME/testree` (if env var set and non-empty, any platform)
/// 2. Platform default (`~/.config/testree` on Linux)
/// 3. `./.testree` when no home directory can be determined
pub fn config_dir() -> PathBuf {
    match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg).join(APP_NAME),
        _ => match platform_config_dir() {
            Some(base) => base.join(APP_NAME),
            None => PathBuf::from(format!(".{APP_NAME}")),
        },
    }
}

/// Platform-native config base directory (without XDG override).
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        dirs::config_dir()
    }
    #[cfg(not(target_os = "macos"))]
    {
        dirs::home_dir().map(|home| home.join(".config"))
    }
}

/// Returns the path to the main configuration file: `config_dir()/config.toml`.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Creates a directory and all parent directories with mode 0700.
pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    fs::create_dir_all(path)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o700))?;
    }
    Ok(())
}

/// Creates the directory that holds `path`, if it has one.
pub fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => ensure_dir(parent),
        _ => Ok(()),
    }
}
