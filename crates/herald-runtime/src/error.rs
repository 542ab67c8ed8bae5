//! Error types for process supervision.

use std::path::PathBuf;

use herald_core::PathError;
use thiserror::Error;

use crate::supervisor::LifecyclePhase;

/// Errors raised while starting, supervising or stopping the notification server.
///
/// Every variant maps to a single operator-facing line; none of them are
/// retried by the supervisor itself.
#[derive(Debug, Error)]
pub enum SupervisorError {
    // === Start checks ===
    /// The PID file names a live process.
    #[error(
        "Unable to start notification server because it is already running (pid {pid}). Use `herald restart` to restart it."
    )]
    AlreadyRunning { pid: u32 },

    /// The effective user is root.
    #[error("The notification server should not be run as root.")]
    RefusedAsRoot,

    /// Neither `nodejs` nor `node` is on `$PATH`.
    #[error(
        "No {tried} binary was found in $PATH. You must install Node.js to start the notification server."
    )]
    MissingRuntimeBinary { tried: String },

    /// The server's `--test=true` dry run exited unsuccessfully.
    ///
    /// `output` is the server's stderr, or its stdout when stderr was empty.
    #[error("Notification server rejected the configuration ({status}): {output}")]
    ConfigRejectedByServer { status: String, output: String },

    /// An OS facility the supervisor depends on is unavailable.
    #[error("Missing required capability: {0}")]
    MissingCapability(String),

    // === I/O ===
    /// The PID file could not be read, written or removed.
    #[error("PID file {path}: {source}")]
    PidFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The server or supervisor process could not be launched.
    #[error("Failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Path(#[from] PathError),

    /// Delivering a signal failed for a reason other than the target being gone.
    #[error("Failed to signal process {pid}: {reason}")]
    Signal { pid: u32, reason: String },

    // === Lifecycle ===
    #[error("Invalid lifecycle transition: {from} -> {to}")]
    InvalidTransition {
        from: LifecyclePhase,
        to: LifecyclePhase,
    },
}

impl SupervisorError {
    pub(crate) fn pid_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::PidFile {
            path: path.into(),
            source,
        }
    }
}
