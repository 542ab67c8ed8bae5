//! Debug mode: run the server once, attached to the terminal.

use std::process::ExitStatus;
use std::time::Duration;

use tracing::info;

use crate::SupervisorError;
use crate::launcher::ServerInvocation;
use crate::process::shutdown_child;
use crate::signals::ShutdownSignals;

/// Run the server in the foreground and return its exit code.
///
/// An interrupt reaches the server through the terminal's process group; the
/// supervisor then gives it `grace` to finish before escalating.
pub async fn run_foreground(
    invocation: &ServerInvocation,
    grace: Duration,
) -> Result<i32, SupervisorError> {
    let mut signals = ShutdownSignals::install()
        .map_err(|e| SupervisorError::MissingCapability(format!("signal handlers: {e}")))?;

    let mut child = invocation
        .command()
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| invocation.spawn_error(e))?;

    let interrupted = tokio::select! {
        status = child.wait() => Err(status),
        reason = signals.recv() => Ok(reason),
    };

    let status = match interrupted {
        Err(status) => status,
        Ok(reason) => {
            info!("Received {reason}; waiting for the server to exit");
            shutdown_child(&mut child, grace).await
        }
    }
    .map_err(|e| invocation.spawn_error(e))?;

    info!("Server exited ({status})");
    Ok(exit_code(status))
}

/// Shell-style exit code: the process's own code, or `128 + signal`.
pub(crate) fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[cfg(unix)]
    async fn exit_code_is_propagated() {
        // `sh <script> --config=... --log=...` runs the script file
        let dir = tempfile::TempDir::new().unwrap();
        let script = dir.path().join("server.sh");
        std::fs::write(&script, "exit 7\n").unwrap();

        let invocation = ServerInvocation::new("sh", &script, "/tmp/c.json", "/tmp/h.log");
        let code = run_foreground(&invocation, Duration::from_secs(1))
            .await
            .expect("ran");
        assert_eq!(code, 7);
    }

    #[tokio::test]
    #[cfg(unix)]
    async fn killed_process_maps_to_128_plus_signal() {
        let mut child = tokio::process::Command::new("sleep")
            .arg("30")
            .spawn()
            .unwrap();
        child.start_kill().unwrap();
        let status = child.wait().await.unwrap();
        assert_eq!(exit_code(status), 137);
    }
}
