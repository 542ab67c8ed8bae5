//! OS process control shared by the monitor loop and the stop command.

pub mod shutdown;

pub use shutdown::{SignalDelivery, force_kill_pid, interrupt_pid, shutdown_child};
