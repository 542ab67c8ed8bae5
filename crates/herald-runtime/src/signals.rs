//! OS signal handling for the supervisor.
//!
//! Handlers are installed before any child is launched and converted into a
//! [`CancellationToken`], so a signal is observed by the monitor loop at its
//! next `select!` instead of interrupting it mid-restart.
//!
//! ## Unix
//! - **SIGINT** and **SIGTERM** request shutdown
//! - **SIGHUP** is logged and ignored (the supervisor has no terminal)
//!
//! ## Other platforms
//! Only [`tokio::signal::ctrl_c`] is awaited.

use std::fmt;
use std::io;

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Which signal requested shutdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReason {
    Interrupt,
    Terminate,
}

impl fmt::Display for ShutdownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Interrupt => write!(f, "SIGINT"),
            Self::Terminate => write!(f, "SIGTERM"),
        }
    }
}

/// Installed shutdown signal streams.
#[cfg(unix)]
pub struct ShutdownSignals {
    interrupt: tokio::signal::unix::Signal,
    terminate: tokio::signal::unix::Signal,
    hangup: tokio::signal::unix::Signal,
}

#[cfg(not(unix))]
pub struct ShutdownSignals;

impl ShutdownSignals {
    /// Install handlers. Must be called from within a tokio runtime.
    #[cfg(unix)]
    pub fn install() -> io::Result<Self> {
        use tokio::signal::unix::{SignalKind, signal};

        Ok(Self {
            interrupt: signal(SignalKind::interrupt())?,
            terminate: signal(SignalKind::terminate())?,
            hangup: signal(SignalKind::hangup())?,
        })
    }

    #[cfg(not(unix))]
    pub fn install() -> io::Result<Self> {
        Ok(Self)
    }

    /// Wait for the next shutdown request.
    #[cfg(unix)]
    pub async fn recv(&mut self) -> ShutdownReason {
        loop {
            tokio::select! {
                _ = self.interrupt.recv() => return ShutdownReason::Interrupt,
                _ = self.terminate.recv() => return ShutdownReason::Terminate,
                _ = self.hangup.recv() => warn!("Received SIGHUP; ignoring"),
            }
        }
    }

    #[cfg(not(unix))]
    pub async fn recv(&mut self) -> ShutdownReason {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
        ShutdownReason::Interrupt
    }

    /// Hand the streams to a background task that cancels the returned token
    /// on the first shutdown request.
    pub fn into_token(mut self) -> CancellationToken {
        let token = CancellationToken::new();
        let trigger = token.clone();
        tokio::spawn(async move {
            tokio::select! {
                reason = self.recv() => {
                    info!("Received {reason}; shutting down");
                    trigger.cancel();
                }
                () = trigger.cancelled() => {}
            }
        });
        token
    }
}
