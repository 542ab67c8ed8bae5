//! Signal a process known only by its pid (no `Child` handle, no reaping).

use std::io;

#[cfg(unix)]
use nix::errno::Errno;
#[cfg(unix)]
use nix::sys::signal::{self, Signal};
#[cfg(unix)]
use nix::unistd::Pid;

/// Outcome of delivering a signal to a pid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalDelivery {
    Delivered,
    /// The process was already gone (`ESRCH`).
    NoSuchProcess,
}

/// Ask the process to shut down gracefully (SIGINT).
pub fn interrupt_pid(pid: u32) -> io::Result<SignalDelivery> {
    #[cfg(unix)]
    {
        send(pid, Signal::SIGINT)
    }

    #[cfg(not(unix))]
    {
        unsupported(pid)
    }
}

/// Kill the process outright (SIGKILL).
pub fn force_kill_pid(pid: u32) -> io::Result<SignalDelivery> {
    #[cfg(unix)]
    {
        send(pid, Signal::SIGKILL)
    }

    #[cfg(not(unix))]
    {
        unsupported(pid)
    }
}

#[cfg(unix)]
fn send(pid: u32, sig: Signal) -> io::Result<SignalDelivery> {
    let raw = i32::try_from(pid)
        .ok()
        .filter(|raw| *raw > 0)
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, format!("invalid pid {pid}")))?;

    match signal::kill(Pid::from_raw(raw), sig) {
        Ok(()) => Ok(SignalDelivery::Delivered),
        Err(Errno::ESRCH) => Ok(SignalDelivery::NoSuchProcess),
        Err(e) => Err(io::Error::other(e)),
    }
}

#[cfg(not(unix))]
fn unsupported(_pid: u32) -> io::Result<SignalDelivery> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "signalling by pid is not implemented on this platform",
    ))
}
