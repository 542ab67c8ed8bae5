//! Process runtime and OS-level concerns for herald.
//!
//! Everything that touches processes, signals or the PID file lives here;
//! the configuration schema and path resolution come from `herald-core`.

#![deny(unsafe_code)]

pub mod detach;
mod error;
pub mod launcher;
pub mod pidfile;
pub mod preflight;
pub mod process;
pub mod signals;
pub mod supervisor;

pub use error::SupervisorError;

// Re-export the pieces the CLI composes
pub use detach::{DetachRequest, spawn_detached};
pub use launcher::{RUNTIME_CANDIDATES, ServerInvocation, ServerSpawner, resolve_runtime_binary};
pub use pidfile::PidFile;
pub use signals::{ShutdownReason, ShutdownSignals};
pub use supervisor::{
    InstanceStatus, LifecyclePhase, Monitor, NixSignaller, ProcessSignaller, StartMode,
    StartOutcome, StopOutcome, SupervisorExit, SupervisorState, ensure_launch_allowed,
    instance_status, start, stop,
};
