//! Graceful process shutdown.
//!
//! Provides two shutdown paths:
//! - `shutdown_child`: for the supervised server, owned through a `Child` handle (includes reaping)
//! - `interrupt_pid` / `force_kill_pid`: for the supervisor, known only by the pid in the PID file

mod child;
mod pid;

pub use child::shutdown_child;
pub use pid::{SignalDelivery, force_kill_pid, interrupt_pid};
