//! Detaching the supervisor from the invoking terminal.
//!
//! The current executable is re-run with the hidden supervise entry point in
//! its own process group with all standard streams pointed at the null
//! device, so a parent waiting for our descriptors to close is not blocked
//! by the long-lived supervisor.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Duration;

use tracing::debug;

use crate::SupervisorError;

/// How long the invoking process watches the new supervisor before trusting it.
const CONFIRM_DELAY: Duration = Duration::from_millis(200);

/// Command line for the detached supervisor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetachRequest {
    pub program: PathBuf,
    pub args: Vec<OsString>,
}

impl DetachRequest {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Re-run the current executable with `args`.
    pub fn current_exe(args: impl IntoIterator<Item = OsString>) -> Result<Self, SupervisorError> {
        let program = std::env::current_exe().map_err(|e| {
            SupervisorError::MissingCapability(format!("cannot resolve current executable: {e}"))
        })?;
        Ok(Self {
            program,
            args: args.into_iter().collect(),
        })
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

/// Launch the detached supervisor and confirm it is still alive.
///
/// Returns the supervisor's pid. The child is not reaped: once the invoking
/// process exits it is adopted by init.
pub async fn spawn_detached(request: &DetachRequest) -> Result<u32, SupervisorError> {
    let mut cmd = Command::new(&request.program);
    cmd.args(&request.args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        cmd.process_group(0);
    }

    let mut child = cmd.spawn().map_err(|source| SupervisorError::Spawn {
        program: request.program.display().to_string(),
        source,
    })?;
    let pid = child.id();
    debug!("Spawned detached supervisor (pid {pid})");

    tokio::time::sleep(CONFIRM_DELAY).await;
    match child.try_wait() {
        Ok(None) => Ok(pid),
        Ok(Some(status)) => Err(SupervisorError::Spawn {
            program: request.program.display().to_string(),
            source: std::io::Error::other(format!(
                "supervisor exited immediately ({status}); see the log file for details"
            )),
        }),
        Err(source) => Err(SupervisorError::Spawn {
            program: request.program.display().to_string(),
            source,
        }),
    }
}
