//! Environment overrides and platform default locations.

use std::env;
use std::path::PathBuf;

use super::error::PathError;

/// Environment variable naming the data root.
pub const DATA_DIR_ENV: &str = "HERALD_DATA_DIR";
/// Environment variable naming the configuration directory.
pub const CONFIG_DIR_ENV: &str = "HERALD_CONFIG_DIR";
/// Environment variable naming the PID file.
pub const PID_FILE_ENV: &str = "HERALD_PIDFILE";
/// Environment variable naming the server log file.
pub const LOG_FILE_ENV: &str = "HERALD_LOG";
/// Environment variable naming the notification server script.
pub const SERVER_SCRIPT_ENV: &str = "HERALD_SERVER_SCRIPT";

/// Explicit path overrides, normally captured from the environment.
///
/// Kept as plain data so resolution can be tested without mutating the
/// process environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathOverrides {
    pub data_dir: Option<PathBuf>,
    pub config_dir: Option<PathBuf>,
    pub pid_file: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
    pub server_script: Option<PathBuf>,
}

impl PathOverrides {
    /// Capture overrides from `HERALD_*` environment variables.
    ///
    /// Empty values are ignored.
    pub fn from_env() -> Self {
        Self {
            data_dir: env_path(DATA_DIR_ENV),
            config_dir: env_path(CONFIG_DIR_ENV),
            pid_file: env_path(PID_FILE_ENV),
            log_file: env_path(LOG_FILE_ENV),
            server_script: env_path(SERVER_SCRIPT_ENV),
        }
    }
}

fn env_path(key: &str) -> Option<PathBuf> {
    env::var_os(key)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Get the root directory for supervisor data (PID file, logs, configuration).
///
/// Resolution order:
/// 1. `overrides.data_dir` (normally `HERALD_DATA_DIR`)
/// 2. System data directory (e.g., `~/.local/share/herald`)
pub fn data_root(overrides: &PathOverrides) -> Result<PathBuf, PathError> {
    if let Some(path) = &overrides.data_dir {
        return Ok(path.clone());
    }

    let data_dir = dirs::data_local_dir().ok_or(PathError::NoDataDir)?;
    Ok(data_dir.join("herald"))
}
