//! Hidden `supervise` handler: the detached supervisor's entry point.

use std::path::Path;

use herald_core::load_config;
use herald_runtime::{Monitor, ShutdownSignals, SupervisorError, SupervisorState};
use tracing::info;

use crate::bootstrap::{CliContext, build_invocation};
use crate::error::CliError;

/// Run the monitor loop until a shutdown signal arrives.
///
/// Signal handlers are installed before anything is launched. Returns the
/// supervisor's exit status.
pub async fn execute(ctx: &CliContext, config_path: &Path) -> Result<u8, CliError> {
    let shutdown = ShutdownSignals::install()
        .map_err(|e| SupervisorError::MissingCapability(format!("signal handlers: {e}")))?
        .into_token();

    let config = load_config(config_path)?;
    info!(
        "Supervising notification server with {} endpoint(s) from {}",
        config.endpoints().len(),
        config_path.display()
    );

    let invocation = build_invocation(ctx, config_path)?;
    let state = SupervisorState::new(&ctx.paths.pid_file, &ctx.paths.log_file, false);
    let exit = Monitor::new(invocation, state, ctx.settings)
        .run(shutdown)
        .await?;

    Ok(exit.status())
}
