//! Supervisor lifecycle phases and the running-instance record.

use std::fmt;
use std::path::PathBuf;

use crate::SupervisorError;

/// Lifecycle of one supervised instance.
///
/// ```text
/// NotRunning -> Starting -> Running -> Stopping -> NotRunning
///                           Running <-> Restarting
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecyclePhase {
    #[default]
    NotRunning,
    Starting,
    Running,
    Restarting,
    Stopping,
}

impl LifecyclePhase {
    pub const fn can_transition(self, to: Self) -> bool {
        matches!(
            (self, to),
            (Self::NotRunning, Self::Starting)
                | (Self::Starting, Self::Running)
                | (Self::Starting, Self::Stopping)
                | (Self::Running, Self::Restarting)
                | (Self::Restarting, Self::Running)
                | (Self::Running, Self::Stopping)
                | (Self::Restarting, Self::Stopping)
                | (Self::Stopping, Self::NotRunning)
        )
    }

    /// Validate and perform a transition.
    pub fn transition(&mut self, to: Self) -> Result<(), SupervisorError> {
        if self.can_transition(to) {
            tracing::debug!("Lifecycle transition: {self} -> {to}");
            *self = to;
            Ok(())
        } else {
            Err(SupervisorError::InvalidTransition { from: *self, to })
        }
    }
}

impl fmt::Display for LifecyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NotRunning => "not running",
            Self::Starting => "starting",
            Self::Running => "running",
            Self::Restarting => "restarting",
            Self::Stopping => "stopping",
        };
        f.write_str(name)
    }
}

/// The running-instance record, owned by the supervisor for one `start`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupervisorState {
    pub pid: u32,
    pub pid_file: PathBuf,
    pub log_file: PathBuf,
    pub debug: bool,
    pub phase: LifecyclePhase,
}

impl SupervisorState {
    /// Record for the current process, not yet started.
    pub fn new(pid_file: impl Into<PathBuf>, log_file: impl Into<PathBuf>, debug: bool) -> Self {
        Self {
            pid: std::process::id(),
            pid_file: pid_file.into(),
            log_file: log_file.into(),
            debug,
            phase: LifecyclePhase::NotRunning,
        }
    }

    pub fn transition(&mut self, to: LifecyclePhase) -> Result<(), SupervisorError> {
        self.phase.transition(to)
    }

    /// Whether this instance owns the PID file. Foreground runs never touch it.
    pub const fn records_pid(&self) -> bool {
        !self.debug
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_transitions() {
        let mut phase = LifecyclePhase::default();
        assert_eq!(phase, LifecyclePhase::NotRunning);
        phase.transition(LifecyclePhase::Starting).unwrap();
        phase.transition(LifecyclePhase::Running).unwrap();
        phase.transition(LifecyclePhase::Restarting).unwrap();
        phase.transition(LifecyclePhase::Running).unwrap();
        phase.transition(LifecyclePhase::Stopping).unwrap();
        phase.transition(LifecyclePhase::NotRunning).unwrap();
    }

    #[test]
    fn invalid_transition_is_rejected() {
        let mut phase = LifecyclePhase::NotRunning;
        let err = phase.transition(LifecyclePhase::Running).unwrap_err();
        assert!(matches!(
            err,
            SupervisorError::InvalidTransition {
                from: LifecyclePhase::NotRunning,
                to: LifecyclePhase::Running
            }
        ));
        // Phase unchanged after a rejected transition
        assert_eq!(phase, LifecyclePhase::NotRunning);
    }

    #[test]
    fn restart_can_be_interrupted_by_stop() {
        let mut phase = LifecyclePhase::Restarting;
        phase.transition(LifecyclePhase::Stopping).unwrap();
    }

    #[test]
    fn state_records_current_process() {
        let state = SupervisorState::new("/run/herald.pid", "/var/log/herald.log", false);
        assert_eq!(state.pid, std::process::id());
        assert_eq!(state.phase, LifecyclePhase::NotRunning);
        assert!(state.records_pid());
    }

    #[test]
    fn foreground_state_leaves_pid_file_alone() {
        let state = SupervisorState::new("/run/herald.pid", "/var/log/herald.log", true);
        assert!(!state.records_pid());
    }
}
