//! PID file management for the single running supervisor.
//!
//! Provides atomic I/O and liveness probes.
//!
//! # Guarantees
//! - Atomic writes via temp file + rename
//! - A pid of `0` or unparsable content is reported as corrupt and never signalled
//! - Removal is idempotent

mod io;
mod verify;

pub use io::PidFile;
pub use verify::{is_superuser, pid_exists};
