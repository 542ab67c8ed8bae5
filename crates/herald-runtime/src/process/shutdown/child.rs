//! Graceful shutdown for `tokio::process::Child` with SIGTERM → SIGKILL escalation.

use std::io;
use std::process::ExitStatus;
use std::time::Duration;

use tokio::process::Child;

#[cfg(unix)]
use tokio::time::timeout;

#[cfg(unix)]
use nix::sys::signal::{self, Signal};
#[cfg(unix)]
use nix::unistd::Pid;

/// Shut down a child process with SIGTERM, escalating to SIGKILL after `grace`.
///
/// # Strategy
/// 1. Send SIGTERM and wait up to `grace` for the process to exit
/// 2. If still running, send SIGKILL
/// 3. Wait for process reaping (required to avoid zombies)
///
/// # Returns
/// - `Ok(ExitStatus)` once the process has been reaped
/// - `Err` if process operations fail
pub async fn shutdown_child(child: &mut Child, grace: Duration) -> io::Result<ExitStatus> {
    #[cfg(unix)]
    {
        shutdown_unix(child, grace).await
    }

    #[cfg(not(unix))]
    {
        let _ = grace;
        child.kill().await?;
        child.wait().await
    }
}

#[cfg(unix)]
async fn shutdown_unix(child: &mut Child, grace: Duration) -> io::Result<ExitStatus> {
    // Already reaped: `wait` returns the cached status
    let Some(pid) = child.id() else {
        return child.wait().await;
    };
    let raw = i32::try_from(pid).map_err(io::Error::other)?;

    // Phase 1: SIGTERM with grace period
    if let Err(e) = signal::kill(Pid::from_raw(raw), Signal::SIGTERM) {
        // Process may have already exited
        if e == nix::errno::Errno::ESRCH {
            return child.wait().await;
        }
        return Err(io::Error::other(e));
    }

    if let Ok(result) = timeout(grace, child.wait()).await {
        return result;
    }

    // Phase 2: SIGKILL (via Child::kill which uses SIGKILL on Unix and reaps)
    tracing::warn!("Server (pid {pid}) ignored SIGTERM for {grace:?}; sending SIGKILL");
    child.kill().await?;
    child.wait().await
}
