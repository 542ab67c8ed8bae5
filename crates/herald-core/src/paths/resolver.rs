//! Resolution of every path the supervisor touches, captured in one struct.

use std::path::PathBuf;

use super::platform::{PathOverrides, data_root};
use super::PathError;

/// All resolved paths captured in a single struct.
///
/// Used by the `paths` command and by every lifecycle command so that the
/// invoking process and the detached supervisor agree on locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    /// Root directory for supervisor data
    pub data_root: PathBuf,
    /// Directory searched for `herald.custom.json` / `herald.default.json`
    pub config_dir: PathBuf,
    /// PID file recording the running supervisor
    pub pid_file: PathBuf,
    /// Log file handed to the notification server
    pub log_file: PathBuf,
    /// Notification server script run by the Node.js runtime
    pub server_script: PathBuf,
}

impl ResolvedPaths {
    /// Resolve all paths using the current environment.
    pub fn resolve() -> Result<Self, PathError> {
        Self::resolve_with(&PathOverrides::from_env())
    }

    /// Resolve all paths from explicit overrides, falling back to locations
    /// under the data root.
    pub fn resolve_with(overrides: &PathOverrides) -> Result<Self, PathError> {
        let data_root = data_root(overrides)?;

        let config_dir = overrides
            .config_dir
            .clone()
            .unwrap_or_else(|| data_root.join("conf"));
        let pid_file = overrides
            .pid_file
            .clone()
            .unwrap_or_else(|| data_root.join("run").join("herald.pid"));
        let log_file = overrides
            .log_file
            .clone()
            .unwrap_or_else(|| data_root.join("logs").join("herald.log"));
        let server_script = overrides
            .server_script
            .clone()
            .unwrap_or_else(|| data_root.join("server").join("herald_server.js"));

        Ok(Self {
            data_root,
            config_dir,
            pid_file,
            log_file,
            server_script,
        })
    }
}

impl std::fmt::Display for ResolvedPaths {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "data_root = {}", self.data_root.display())?;
        writeln!(f, "config_dir = {}", self.config_dir.display())?;
        writeln!(f, "pid_file = {}", self.pid_file.display())?;
        writeln!(f, "log_file = {}", self.log_file.display())?;
        write!(f, "server_script = {}", self.server_script.display())
    }
}
