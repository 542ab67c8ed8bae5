//! CLI-specific error types and mappings.
//!
//! Every library error is folded into [`CliError`], which decides the
//! process exit code. `main` prints the single message and exits once.

use herald_core::{ConfigError, PathError, SettingsError};
use herald_runtime::SupervisorError;
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// The command cannot be carried out as requested (already running, run as root).
    #[error("{0}")]
    Usage(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (PID file, log file, directories).
    #[error("IO error: {0}")]
    Io(String),

    /// Operating system facility missing or failing.
    #[error("{0}")]
    Os(String),

    /// Internal invariant violated.
    #[error("Internal error: {0}")]
    Software(String),

    #[error("{0}")]
    General(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow sysexits.h where a category fits:
    /// - 1: General error
    /// - 64: Usage
    /// - 70: Internal software error
    /// - 71: OS error
    /// - 74: I/O error
    /// - 78: Configuration error
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::General(_) => 1,
            Self::Usage(_) => 64,
            Self::Software(_) => 70,
            Self::Os(_) => 71,
            Self::Io(_) => 74,
            Self::Config(_) => 78,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::ConfigIo { .. } => Self::Io(err.to_string()),
            _ => Self::Config(err.to_string()),
        }
    }
}

impl From<PathError> for CliError {
    fn from(err: PathError) -> Self {
        match err {
            PathError::NoDataDir => Self::Config(err.to_string()),
            _ => Self::Io(err.to_string()),
        }
    }
}

impl From<SettingsError> for CliError {
    fn from(err: SettingsError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<SupervisorError> for CliError {
    fn from(err: SupervisorError) -> Self {
        let message = err.to_string();
        match err {
            SupervisorError::AlreadyRunning { .. } | SupervisorError::RefusedAsRoot => {
                Self::Usage(message)
            }
            SupervisorError::ConfigRejectedByServer { .. } => Self::Config(message),
            SupervisorError::MissingRuntimeBinary { .. }
            | SupervisorError::MissingCapability(_)
            | SupervisorError::Spawn { .. }
            | SupervisorError::Signal { .. } => Self::Os(message),
            SupervisorError::PidFile { .. } => Self::Io(message),
            SupervisorError::Path(path_err) => path_err.into(),
            SupervisorError::InvalidTransition { .. } => Self::Software(message),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_exit_78() {
        let err: CliError = ConfigError::NoAdminServer.into();
        assert_eq!(err.exit_code(), 78);
    }

    #[test]
    fn unreadable_config_is_io() {
        let err: CliError = ConfigError::ConfigIo {
            path: "/etc/herald.json".into(),
            reason: "No such file or directory".to_string(),
        }
        .into();
        assert_eq!(err.exit_code(), 74);
    }

    #[test]
    fn already_running_is_usage() {
        let err: CliError = SupervisorError::AlreadyRunning { pid: 42 }.into();
        assert_eq!(err.exit_code(), 64);
        assert!(err.to_string().contains("herald restart"));
    }

    #[test]
    fn missing_runtime_is_os_error() {
        let err: CliError = SupervisorError::MissingRuntimeBinary {
            tried: "`nodejs` or `node`".to_string(),
        }
        .into();
        assert_eq!(err.exit_code(), 71);
    }

    #[test]
    fn nested_path_error_keeps_its_category() {
        let err: CliError = SupervisorError::Path(PathError::NoDataDir).into();
        assert_eq!(err.exit_code(), 78);
    }
}
