//! Teardown owned by the detached supervisor.

use std::time::Duration;

use tokio::process::Child;
use tracing::{info, warn};

use crate::pidfile::PidFile;
use crate::process::shutdown_child;

/// Owns the tracked server process and the PID file for one supervisor.
///
/// [`Cleanup::run`] terminates the server and removes the PID file exactly
/// once. The `Drop` impl covers every path that skips it.
#[derive(Debug)]
pub struct Cleanup {
    child: Option<Child>,
    pid_file: PidFile,
    grace: Duration,
    done: bool,
}

impl Cleanup {
    pub const fn new(pid_file: PidFile, grace: Duration) -> Self {
        Self {
            child: None,
            pid_file,
            grace,
            done: false,
        }
    }

    /// Start tracking a freshly launched server.
    pub fn track(&mut self, child: Child) {
        self.child = Some(child);
    }

    /// The tracked server, if any.
    pub const fn child_mut(&mut self) -> Option<&mut Child> {
        self.child.as_mut()
    }

    /// Drop the handle of a server that has already exited.
    pub fn forget_child(&mut self) {
        self.child = None;
    }

    pub const fn pid_file(&self) -> &PidFile {
        &self.pid_file
    }

    pub const fn is_done(&self) -> bool {
        self.done
    }

    /// Terminate the tracked server and remove the PID file. Idempotent.
    pub async fn run(&mut self) {
        if self.done {
            return;
        }
        self.done = true;

        if let Some(mut child) = self.child.take() {
            match shutdown_child(&mut child, self.grace).await {
                Ok(status) => info!("Server exited during shutdown ({status})"),
                Err(e) => warn!("Failed to shut down server: {e}"),
            }
        }

        if let Err(e) = self.pid_file.remove() {
            warn!(
                "Failed to remove PID file {}: {e}",
                self.pid_file.path().display()
            );
        }
    }
}

impl Drop for Cleanup {
    fn drop(&mut self) {
        if self.done {
            return;
        }

        if let Some(child) = self.child.as_mut() {
            let _ = child.start_kill();
        }
        let _ = self.pid_file.remove();
    }
}
