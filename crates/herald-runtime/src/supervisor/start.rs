//! The `start` sequence run in the invoking process.

use std::io;

use herald_core::SupervisorSettings;
use tracing::{info, warn};

use super::foreground::run_foreground;
use super::state::{LifecyclePhase, SupervisorState};
use crate::SupervisorError;
use crate::detach::{DetachRequest, spawn_detached};
use crate::launcher::ServerInvocation;
use crate::pidfile::{PidFile, is_superuser, pid_exists};
use crate::preflight::check_capabilities;

/// How the server should run once the checks pass.
#[derive(Debug, Clone)]
pub enum StartMode {
    /// Hand over to a detached supervisor started from this request.
    Detached(DetachRequest),
    /// Run the server once, attached to the terminal.
    Foreground,
}

impl StartMode {
    const fn is_debug(&self) -> bool {
        matches!(self, Self::Foreground)
    }
}

/// Result of a successful `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// The detached supervisor is running with this pid.
    Detached { pid: u32 },
    /// The foreground server exited with this code.
    Foreground { exit_code: i32 },
}

/// Fail with [`SupervisorError::AlreadyRunning`] when the PID file names a live process.
///
/// Stale and corrupt PID files are reported and otherwise ignored; the
/// supervisor overwrites them once it is running.
pub fn ensure_not_running(pid_file: &PidFile) -> Result<(), SupervisorError> {
    match pid_file.read() {
        Ok(Some(pid)) if pid_exists(pid) => Err(SupervisorError::AlreadyRunning { pid }),
        Ok(Some(pid)) => {
            warn!(
                "Ignoring stale PID file {} (pid {pid} is not running)",
                pid_file.path().display()
            );
            Ok(())
        }
        Ok(None) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::InvalidData => {
            warn!("Ignoring corrupt PID file {}: {e}", pid_file.path().display());
            Ok(())
        }
        Err(e) => Err(SupervisorError::pid_file(pid_file.path(), e)),
    }
}

/// The checks that must pass before anything is created or looked up:
/// no live instance, and not running as root.
pub fn ensure_launch_allowed(pid_file: &PidFile) -> Result<(), SupervisorError> {
    ensure_not_running(pid_file)?;
    if is_superuser() {
        return Err(SupervisorError::RefusedAsRoot);
    }
    Ok(())
}

/// Validate, test-launch and then run or detach the server.
///
/// Checks, in order: capabilities, an already running instance, root, PID
/// file writability (detached mode only) and the server's own configuration
/// test. Nothing is launched for real until all of them pass.
pub async fn start(
    invocation: &ServerInvocation,
    pid_file: &PidFile,
    mode: StartMode,
    settings: &SupervisorSettings,
) -> Result<StartOutcome, SupervisorError> {
    let mut state = SupervisorState::new(pid_file.path(), &invocation.log_path, mode.is_debug());
    state.transition(LifecyclePhase::Starting)?;

    check_capabilities(invocation)?;
    ensure_launch_allowed(pid_file)?;

    if state.records_pid() {
        pid_file
            .truncate()
            .map_err(|e| SupervisorError::pid_file(pid_file.path(), e))?;
    }

    invocation.test_launch().await?;

    let outcome = match mode {
        StartMode::Detached(request) => {
            let pid = spawn_detached(&request).await?;
            info!("Notification server supervisor started (pid {pid})");
            StartOutcome::Detached { pid }
        }
        StartMode::Foreground => {
            state.transition(LifecyclePhase::Running)?;
            let exit_code = run_foreground(invocation, settings.child_grace).await?;
            StartOutcome::Foreground { exit_code }
        }
    };

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn live_pid_is_already_running() {
        let dir = TempDir::new().unwrap();
        let pid_file = PidFile::new(dir.path().join("herald.pid"));
        pid_file.write(std::process::id()).unwrap();

        let err = ensure_not_running(&pid_file).unwrap_err();
        assert!(matches!(err, SupervisorError::AlreadyRunning { pid } if pid == std::process::id()));
    }

    #[test]
    #[cfg(unix)]
    fn stale_pid_is_ignored() {
        let dir = TempDir::new().unwrap();
        let pid_file = PidFile::new(dir.path().join("herald.pid"));
        pid_file.write(999_999_999).unwrap();

        ensure_not_running(&pid_file).expect("stale pid ignored");
    }

    #[test]
    fn corrupt_pid_file_is_ignored() {
        let dir = TempDir::new().unwrap();
        let pid_file = PidFile::new(dir.path().join("herald.pid"));
        std::fs::write(pid_file.path(), "garbage").unwrap();

        ensure_not_running(&pid_file).expect("corrupt file ignored");
    }

    #[test]
    fn launch_allowed_only_for_unprivileged_users() {
        let dir = TempDir::new().unwrap();
        let result = ensure_launch_allowed(&PidFile::new(dir.path().join("herald.pid")));
        if is_superuser() {
            assert!(matches!(result, Err(SupervisorError::RefusedAsRoot)));
        } else {
            result.expect("launch allowed");
        }
    }

    #[test]
    fn live_instance_reported_before_root() {
        let dir = TempDir::new().unwrap();
        let pid_file = PidFile::new(dir.path().join("herald.pid"));
        pid_file.write(std::process::id()).unwrap();

        let err = ensure_launch_allowed(&pid_file).unwrap_err();
        assert!(matches!(err, SupervisorError::AlreadyRunning { .. }));
    }

    #[test]
    fn missing_pid_file_is_not_running() {
        let dir = TempDir::new().unwrap();
        ensure_not_running(&PidFile::new(dir.path().join("herald.pid"))).expect("not running");
    }
}
