//! Stopping a running supervisor from a separate invocation.
//!
//! # Strategy
//! 1. Send SIGINT so the supervisor runs its own cleanup
//! 2. Poll for exit every `stop_poll_interval`, up to `stop_timeout`
//! 3. If still alive, send SIGKILL exactly once
//! 4. Remove the PID file in every outcome

use std::fmt;
use std::io;

use herald_core::SupervisorSettings;
use tokio::time::{Instant, sleep};
use tracing::{debug, info, warn};

use crate::SupervisorError;
use crate::pidfile::{PidFile, pid_exists};
use crate::process::{SignalDelivery, force_kill_pid, interrupt_pid};

/// Signal delivery used by [`stop`].
#[cfg_attr(test, mockall::automock)]
pub trait ProcessSignaller {
    /// Request graceful shutdown. `Ok(false)` means the process was already gone.
    fn interrupt(&self, pid: u32) -> io::Result<bool>;

    /// Kill outright. `Ok(false)` means the process was already gone.
    fn force_kill(&self, pid: u32) -> io::Result<bool>;

    fn is_alive(&self, pid: u32) -> bool;
}

/// Production signaller backed by `kill(2)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NixSignaller;

impl ProcessSignaller for NixSignaller {
    fn interrupt(&self, pid: u32) -> io::Result<bool> {
        interrupt_pid(pid).map(|d| d == SignalDelivery::Delivered)
    }

    fn force_kill(&self, pid: u32) -> io::Result<bool> {
        force_kill_pid(pid).map(|d| d == SignalDelivery::Delivered)
    }

    fn is_alive(&self, pid: u32) -> bool {
        pid_exists(pid)
    }
}

/// What `stop` found and did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopOutcome {
    /// No PID file, or an empty one. Nothing was signalled.
    NotRunning,
    /// The PID file could not be parsed. It was removed, nothing was signalled.
    Corrupt { reason: String },
    /// The recorded pid was not alive. The file was removed, nothing was signalled.
    Stale { pid: u32 },
    /// The supervisor exited after the interrupt.
    Exited { pid: u32 },
    /// The supervisor outlived the timeout and was killed.
    Killed { pid: u32 },
}

impl fmt::Display for StopOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotRunning => write!(f, "Notification server is not running."),
            Self::Corrupt { reason } => {
                write!(f, "PID file was corrupt ({reason}); removed it.")
            }
            Self::Stale { pid } => write!(
                f,
                "Notification server (pid {pid}) was not running; removed stale PID file."
            ),
            Self::Exited { pid } => write!(f, "Notification server ({pid}) exited normally."),
            Self::Killed { pid } => write!(
                f,
                "Notification server ({pid}) did not exit in time; sent SIGKILL."
            ),
        }
    }
}

/// Stop the supervisor recorded in `pid_file`.
pub async fn stop<S>(
    pid_file: &PidFile,
    signaller: &S,
    settings: &SupervisorSettings,
) -> Result<StopOutcome, SupervisorError>
where
    S: ProcessSignaller + ?Sized,
{
    let pid = match pid_file.read() {
        Ok(Some(pid)) => pid,
        Ok(None) => return Ok(StopOutcome::NotRunning),
        Err(e) if e.kind() == io::ErrorKind::InvalidData => {
            warn!("Corrupt PID file {}: {e}", pid_file.path().display());
            remove_pid_file(pid_file)?;
            return Ok(StopOutcome::Corrupt {
                reason: e.to_string(),
            });
        }
        Err(e) => return Err(SupervisorError::pid_file(pid_file.path(), e)),
    };

    let outcome = signal_and_wait(pid, signaller, settings).await;
    remove_pid_file(pid_file)?;
    outcome
}

async fn signal_and_wait<S>(
    pid: u32,
    signaller: &S,
    settings: &SupervisorSettings,
) -> Result<StopOutcome, SupervisorError>
where
    S: ProcessSignaller + ?Sized,
{
    if !signaller.is_alive(pid) {
        warn!("PID file names pid {pid}, which is not running");
        return Ok(StopOutcome::Stale { pid });
    }

    info!("Stopping notification server ({pid})...");
    let delivered = signaller.interrupt(pid).map_err(|e| SupervisorError::Signal {
        pid,
        reason: e.to_string(),
    })?;
    if !delivered {
        // Exited between the liveness probe and the signal
        return Ok(StopOutcome::Exited { pid });
    }

    let deadline = Instant::now() + settings.stop_timeout;
    loop {
        if !signaller.is_alive(pid) {
            info!("Notification server ({pid}) exited normally");
            return Ok(StopOutcome::Exited { pid });
        }
        if Instant::now() >= deadline {
            break;
        }
        debug!("Waiting for pid {pid} to exit");
        sleep(settings.stop_poll_interval).await;
    }

    warn!("Sending {pid} a SIGKILL");
    signaller.force_kill(pid).map_err(|e| SupervisorError::Signal {
        pid,
        reason: e.to_string(),
    })?;
    Ok(StopOutcome::Killed { pid })
}

fn remove_pid_file(pid_file: &PidFile) -> Result<(), SupervisorError> {
    pid_file
        .remove()
        .map_err(|e| SupervisorError::pid_file(pid_file.path(), e))
}
