//! Supervisor timing policy and its validation.
//!
//! Pure data: the runtime crate reads these values, the CLI uses the
//! defaults, and tests shrink them to keep the monitor loop fast.

use std::time::Duration;

/// Default pause between an unexpected server exit and the relaunch.
pub const DEFAULT_RESTART_DELAY: Duration = Duration::from_secs(2);

/// Default time `stop` waits for the supervisor to exit after an interrupt.
pub const DEFAULT_STOP_TIMEOUT: Duration = Duration::from_secs(5);

/// Default interval between liveness probes while stopping.
pub const DEFAULT_STOP_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Default grace period for the supervised server during cleanup.
pub const DEFAULT_CHILD_GRACE: Duration = Duration::from_secs(1);

/// Timing knobs for the monitor loop and the stop command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupervisorSettings {
    /// Throttle between a server exit and its relaunch.
    pub restart_delay: Duration,
    /// Upper bound on the graceful phase of `stop` before escalating to a kill.
    pub stop_timeout: Duration,
    /// How often `stop` checks whether the supervisor has gone.
    pub stop_poll_interval: Duration,
    /// How long cleanup waits after terminating the server before killing it.
    pub child_grace: Duration,
}

impl Default for SupervisorSettings {
    fn default() -> Self {
        Self {
            restart_delay: DEFAULT_RESTART_DELAY,
            stop_timeout: DEFAULT_STOP_TIMEOUT,
            stop_poll_interval: DEFAULT_STOP_POLL_INTERVAL,
            child_grace: DEFAULT_CHILD_GRACE,
        }
    }
}

impl SupervisorSettings {
    /// Set the restart throttle.
    #[must_use]
    pub const fn with_restart_delay(mut self, delay: Duration) -> Self {
        self.restart_delay = delay;
        self
    }

    /// Set the stop timeout.
    #[must_use]
    pub const fn with_stop_timeout(mut self, timeout: Duration) -> Self {
        self.stop_timeout = timeout;
        self
    }

    /// Set the stop poll interval.
    #[must_use]
    pub const fn with_stop_poll_interval(mut self, interval: Duration) -> Self {
        self.stop_poll_interval = interval;
        self
    }

    /// Set the cleanup grace period.
    #[must_use]
    pub const fn with_child_grace(mut self, grace: Duration) -> Self {
        self.child_grace = grace;
        self
    }
}

/// Settings validation error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),

    #[error("Stop poll interval ({poll:?}) must not exceed the stop timeout ({timeout:?})")]
    PollExceedsTimeout { poll: Duration, timeout: Duration },
}

/// Validate supervisor settings.
pub fn validate_settings(settings: &SupervisorSettings) -> Result<(), SettingsError> {
    let durations = [
        ("restart_delay", settings.restart_delay),
        ("stop_timeout", settings.stop_timeout),
        ("stop_poll_interval", settings.stop_poll_interval),
        ("child_grace", settings.child_grace),
    ];
    if let Some((name, _)) = durations.iter().find(|(_, d)| d.is_zero()) {
        return Err(SettingsError::ZeroDuration(name));
    }

    if settings.stop_poll_interval > settings.stop_timeout {
        return Err(SettingsError::PollExceedsTimeout {
            poll: settings.stop_poll_interval,
            timeout: settings.stop_timeout,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = SupervisorSettings::default();
        assert_eq!(settings.restart_delay, Duration::from_secs(2));
        assert_eq!(settings.stop_timeout, Duration::from_secs(5));
        assert_eq!(settings.stop_poll_interval, Duration::from_millis(100));
        assert_eq!(settings.child_grace, Duration::from_secs(1));
        assert!(validate_settings(&settings).is_ok());
    }

    #[test]
    fn test_builders_override_fields() {
        let settings = SupervisorSettings::default()
            .with_restart_delay(Duration::from_millis(10))
            .with_stop_timeout(Duration::from_millis(500))
            .with_stop_poll_interval(Duration::from_millis(5))
            .with_child_grace(Duration::from_millis(50));

        assert_eq!(settings.restart_delay, Duration::from_millis(10));
        assert_eq!(settings.stop_timeout, Duration::from_millis(500));
        assert_eq!(settings.stop_poll_interval, Duration::from_millis(5));
        assert_eq!(settings.child_grace, Duration::from_millis(50));
        assert!(validate_settings(&settings).is_ok());
    }

    #[test]
    fn test_zero_restart_delay_rejected() {
        let settings = SupervisorSettings::default().with_restart_delay(Duration::ZERO);
        assert_eq!(
            validate_settings(&settings),
            Err(SettingsError::ZeroDuration("restart_delay"))
        );
    }

    #[test]
    fn test_poll_longer_than_timeout_rejected() {
        let settings = SupervisorSettings::default()
            .with_stop_timeout(Duration::from_millis(50))
            .with_stop_poll_interval(Duration::from_millis(100));
        assert!(matches!(
            validate_settings(&settings),
            Err(SettingsError::PollExceedsTimeout { .. })
        ));
    }
}
