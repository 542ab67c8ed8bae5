//! The detached supervisor's monitor-and-restart loop.

use herald_core::SupervisorSettings;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::cleanup::Cleanup;
use super::state::{LifecyclePhase, SupervisorState};
use crate::SupervisorError;
use crate::launcher::ServerSpawner;
use crate::pidfile::PidFile;

/// Why the monitor loop returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisorExit {
    /// Shutdown was requested; the server was stopped and the PID file removed.
    Terminated,
}

impl SupervisorExit {
    /// Process exit status the supervisor should terminate with.
    pub const fn status(self) -> u8 {
        match self {
            Self::Terminated => 1,
        }
    }
}

enum Event {
    Exited,
    Shutdown,
}

/// Keeps one server process running until shutdown is requested.
pub struct Monitor<S> {
    spawner: S,
    state: SupervisorState,
    settings: SupervisorSettings,
}

impl<S: ServerSpawner> Monitor<S> {
    pub const fn new(spawner: S, state: SupervisorState, settings: SupervisorSettings) -> Self {
        Self {
            spawner,
            state,
            settings,
        }
    }

    /// Record our pid, then launch the server and relaunch it after every
    /// exit until `shutdown` is cancelled.
    ///
    /// Signal handlers must already feed `shutdown` before this is called.
    /// The loop has no terminal condition other than shutdown: spawn
    /// failures are treated like exits and retried after the throttle.
    pub async fn run(
        mut self,
        shutdown: CancellationToken,
    ) -> Result<SupervisorExit, SupervisorError> {
        self.state.transition(LifecyclePhase::Starting)?;

        let pid_file = PidFile::new(&self.state.pid_file);
        pid_file
            .write(self.state.pid)
            .map_err(|e| SupervisorError::pid_file(pid_file.path(), e))?;
        let mut cleanup = Cleanup::new(pid_file, self.settings.child_grace);

        self.state.transition(LifecyclePhase::Running)?;
        info!(
            "Supervisor running (pid {}, server log {})",
            self.state.pid,
            self.state.log_file.display()
        );

        loop {
            if shutdown.is_cancelled() {
                break;
            }

            match self.spawner.spawn() {
                Ok(child) => {
                    info!("Launched notification server (pid {:?})", child.id());
                    cleanup.track(child);
                }
                Err(e) => warn!("Failed to launch notification server: {e}"),
            }

            if let Some(child) = cleanup.child_mut() {
                let event = tokio::select! {
                    status = child.wait() => {
                        match status {
                            Ok(status) => warn!("Notification server exited ({status})"),
                            Err(e) => warn!("Lost track of notification server: {e}"),
                        }
                        Event::Exited
                    }
                    () = shutdown.cancelled() => Event::Shutdown,
                };
                if matches!(event, Event::Shutdown) {
                    break;
                }
                cleanup.forget_child();
            }

            self.state.transition(LifecyclePhase::Restarting)?;
            info!(
                "Restarting notification server in {:?}",
                self.settings.restart_delay
            );
            tokio::select! {
                () = tokio::time::sleep(self.settings.restart_delay) => {}
                () = shutdown.cancelled() => break,
            }
            self.state.transition(LifecyclePhase::Running)?;
        }

        self.state.transition(LifecyclePhase::Stopping)?;
        cleanup.run().await;
        self.state.transition(LifecyclePhase::NotRunning)?;
        info!("Supervisor stopped");

        Ok(SupervisorExit::Terminated)
    }
}
