//! Reporting whether a supervisor is running.

use std::fmt;
use std::io;

use crate::SupervisorError;
use crate::pidfile::{PidFile, pid_exists};

/// State of the instance recorded in the PID file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstanceStatus {
    Running { pid: u32 },
    NotRunning,
    /// The PID file names a process that no longer exists.
    Stale { pid: u32 },
    /// The PID file content is not a usable pid.
    Corrupt { reason: String },
}

impl InstanceStatus {
    pub const fn is_running(&self) -> bool {
        matches!(self, Self::Running { .. })
    }
}

impl fmt::Display for InstanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Running { pid } => write!(f, "Notification server is running (pid {pid})."),
            Self::NotRunning => write!(f, "Notification server is not running."),
            Self::Stale { pid } => write!(
                f,
                "Notification server is not running (stale PID file names pid {pid})."
            ),
            Self::Corrupt { reason } => {
                write!(f, "Notification server status unknown: corrupt PID file ({reason}).")
            }
        }
    }
}

/// Inspect the PID file without changing anything.
pub fn instance_status(pid_file: &PidFile) -> Result<InstanceStatus, SupervisorError> {
    match pid_file.read() {
        Ok(Some(pid)) if pid_exists(pid) => Ok(InstanceStatus::Running { pid }),
        Ok(Some(pid)) => Ok(InstanceStatus::Stale { pid }),
        Ok(None) => Ok(InstanceStatus::NotRunning),
        Err(e) if e.kind() == io::ErrorKind::InvalidData => Ok(InstanceStatus::Corrupt {
            reason: e.to_string(),
        }),
        Err(e) => Err(SupervisorError::pid_file(pid_file.path(), e)),
    }
}
