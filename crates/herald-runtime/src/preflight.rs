//! Capability checks run before any process is launched.
//!
//! Every facility `start` relies on is verified up front so that a missing
//! one is reported on the operator's terminal instead of in a detached
//! supervisor's log.

use tracing::debug;

use crate::SupervisorError;
use crate::launcher::ServerInvocation;
use crate::pidfile::pid_exists;

/// Verify signal delivery, re-execution and the server's files are available.
pub fn check_capabilities(invocation: &ServerInvocation) -> Result<(), SupervisorError> {
    // The null signal to ourselves must succeed for liveness probes and stop to work
    if !pid_exists(std::process::id()) {
        return Err(SupervisorError::MissingCapability(
            "process signals are not supported on this platform".to_string(),
        ));
    }

    let exe = std::env::current_exe().map_err(|e| {
        SupervisorError::MissingCapability(format!(
            "cannot resolve the current executable for detachment: {e}"
        ))
    })?;
    debug!("Supervisor executable: {}", exe.display());

    let binary = which::which(&invocation.binary).map_err(|e| {
        SupervisorError::MissingCapability(format!(
            "runtime binary {} is not executable: {e}",
            invocation.binary.display()
        ))
    })?;
    debug!("Runtime binary: {}", binary.display());

    if !invocation.script.is_file() {
        return Err(SupervisorError::MissingCapability(format!(
            "notification server script not found at {}",
            invocation.script.display()
        )));
    }

    Ok(())
}
