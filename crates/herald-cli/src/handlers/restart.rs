//! Restart command handler.

use crate::bootstrap::CliContext;
use crate::commands::LaunchArgs;
use crate::error::CliError;

use super::{start, stop};

/// Stop any running supervisor, then start a new detached one.
pub async fn execute(ctx: &CliContext, launch: &LaunchArgs) -> Result<u8, CliError> {
    stop::stop_instance(ctx).await?;
    start::execute(ctx, launch, false).await
}
