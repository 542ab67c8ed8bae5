//! Server command line and process spawning.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::{Child, Command};
use tracing::{debug, info};

use crate::SupervisorError;

/// Argument that puts the server into configuration test mode.
const TEST_MODE_ARG: &str = "--test=true";

/// Something that can launch a fresh server process.
///
/// The monitor loop only talks to the server through this trait.
pub trait ServerSpawner {
    fn spawn(&self) -> io::Result<Child>;
}

/// Everything needed to start the notification server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerInvocation {
    pub binary: PathBuf,
    pub script: PathBuf,
    pub config_path: PathBuf,
    pub log_path: PathBuf,
    pub extra_args: Vec<OsString>,
}

impl ServerInvocation {
    pub fn new(
        binary: impl Into<PathBuf>,
        script: impl Into<PathBuf>,
        config_path: impl Into<PathBuf>,
        log_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            binary: binary.into(),
            script: script.into(),
            config_path: config_path.into(),
            log_path: log_path.into(),
            extra_args: Vec::new(),
        }
    }

    /// Append an argument after the standard ones.
    #[must_use]
    pub fn with_arg(mut self, arg: impl Into<OsString>) -> Self {
        self.extra_args.push(arg.into());
        self
    }

    /// Arguments passed to the runtime binary, script first.
    pub fn args(&self) -> Vec<OsString> {
        let mut args = Vec::with_capacity(3 + self.extra_args.len());
        args.push(self.script.clone().into_os_string());
        args.push(prefixed("--config=", &self.config_path));
        args.push(prefixed("--log=", &self.log_path));
        args.extend(self.extra_args.iter().cloned());
        args
    }

    /// Build the server command. Standard streams are inherited.
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.args(self.args());
        cmd
    }

    /// Human-readable command line for operator output.
    pub fn display_command(&self) -> String {
        std::iter::once(self.binary.as_os_str().to_os_string())
            .chain(self.args())
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Run the server once in configuration test mode and wait for it.
    ///
    /// Surfaces missing modules or a rejected configuration while the
    /// operator's terminal is still attached.
    pub async fn test_launch(&self) -> Result<(), SupervisorError> {
        let mut cmd = self.command();
        cmd.arg(TEST_MODE_ARG)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        debug!("Testing server configuration: {} {TEST_MODE_ARG}", self.display_command());
        let output = cmd.output().await.map_err(|source| self.spawn_error(source))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let diagnostics = if stderr.is_empty() {
                String::from_utf8_lossy(&output.stdout).trim().to_string()
            } else {
                stderr
            };
            return Err(SupervisorError::ConfigRejectedByServer {
                status: output.status.to_string(),
                output: diagnostics,
            });
        }

        info!("Server accepted configuration {}", self.config_path.display());
        Ok(())
    }

    pub(crate) fn spawn_error(&self, source: io::Error) -> SupervisorError {
        SupervisorError::Spawn {
            program: self.binary.display().to_string(),
            source,
        }
    }
}

impl ServerSpawner for ServerInvocation {
    fn spawn(&self) -> io::Result<Child> {
        self.command().kill_on_drop(true).spawn()
    }
}

fn prefixed(prefix: &str, path: &Path) -> OsString {
    let mut arg = OsString::from(prefix);
    arg.push(path.as_os_str());
    arg
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invocation(binary: &str) -> ServerInvocation {
        ServerInvocation::new(
            binary,
            "/opt/herald/server/herald_server.js",
            "/etc/herald/herald.custom.json",
            "/var/log/herald.log",
        )
    }

    #[test]
    fn args_follow_server_convention() {
        let args = invocation("node").args();
        assert_eq!(
            args,
            vec![
                OsString::from("/opt/herald/server/herald_server.js"),
                OsString::from("--config=/etc/herald/herald.custom.json"),
                OsString::from("--log=/var/log/herald.log"),
            ]
        );
    }

    #[test]
    fn extra_args_come_last() {
        let inv = invocation("node").with_arg("--verbose");
        assert_eq!(inv.args().last(), Some(&OsString::from("--verbose")));
    }

    #[test]
    fn display_command_starts_with_binary() {
        let line = invocation("nodejs").display_command();
        assert!(line.starts_with("nodejs /opt/herald/server/herald_server.js --config="));
    }

    #[tokio::test]
    #[cfg(unix)]
    async fn test_launch_accepts_zero_exit() {
        invocation("true").test_launch().await.expect("accepted");
    }

    #[tokio::test]
    #[cfg(unix)]
    async fn test_launch_rejects_non_zero_exit() {
        let err = invocation("false").test_launch().await.unwrap_err();
        assert!(matches!(err, SupervisorError::ConfigRejectedByServer { .. }));
    }

    #[tokio::test]
    #[cfg(unix)]
    async fn rejection_carries_stdout_when_stderr_is_silent() {
        let dir = tempfile::TempDir::new().unwrap();
        let script = dir.path().join("server.sh");
        std::fs::write(&script, "echo 'Cannot find module ws'\nexit 1\n").unwrap();

        let err = ServerInvocation::new("sh", &script, "/tmp/c.json", "/tmp/h.log")
            .test_launch()
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SupervisorError::ConfigRejectedByServer { ref output, .. }
                if output == "Cannot find module ws"
        ));
    }

    #[tokio::test]
    #[cfg(unix)]
    async fn rejection_prefers_stderr() {
        let dir = tempfile::TempDir::new().unwrap();
        let script = dir.path().join("server.sh");
        std::fs::write(&script, "echo checking\necho 'bad port' >&2\nexit 1\n").unwrap();

        let err = ServerInvocation::new("sh", &script, "/tmp/c.json", "/tmp/h.log")
            .test_launch()
            .await
            .unwrap_err();
        assert!(err.to_string().ends_with("bad port"));
    }

    #[tokio::test]
    async fn test_launch_reports_missing_binary() {
        let err = invocation("/nonexistent/herald-node")
            .test_launch()
            .await
            .unwrap_err();
        assert!(matches!(err, SupervisorError::Spawn { .. }));
    }
}
