//! Stop command handler.

use herald_runtime::{InstanceStatus, NixSignaller, StopOutcome, instance_status, stop};

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Stop the supervisor and report what happened.
pub async fn stop_instance(ctx: &CliContext) -> Result<StopOutcome, CliError> {
    let pid_file = ctx.pid_file();
    if let Ok(InstanceStatus::Running { pid }) = instance_status(&pid_file) {
        eprintln!("Stopping notification server ({pid})...");
    }

    let outcome = stop(&pid_file, &NixSignaller, &ctx.settings).await?;
    eprintln!("{outcome}");
    Ok(outcome)
}

/// Execute the stop command.
///
/// Stopping is idempotent, so this always exits 0; failures are reported.
pub async fn execute(ctx: &CliContext) -> Result<u8, CliError> {
    if let Err(err) = stop_instance(ctx).await {
        eprintln!("Error: {err}");
    }
    Ok(0)
}
