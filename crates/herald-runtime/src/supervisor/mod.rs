//! Supervision of the notification server.
//!
//! - [`start`]: checks and test launch in the invoking process, then detach or run in the foreground
//! - [`Monitor`]: the detached supervisor's restart loop
//! - [`stop`]: graceful shutdown with escalation, from a separate invocation
//! - [`instance_status`]: read-only view of the PID file

mod cleanup;
mod foreground;
mod monitor;
mod start;
mod state;
mod status;
mod stop;

pub use cleanup::Cleanup;
pub use foreground::run_foreground;
pub use monitor::{Monitor, SupervisorExit};
pub use start::{StartMode, StartOutcome, ensure_launch_allowed, ensure_not_running, start};
pub use state::{LifecyclePhase, SupervisorState};
pub use status::{InstanceStatus, instance_status};
pub use stop::{NixSignaller, ProcessSignaller, StopOutcome, stop};
