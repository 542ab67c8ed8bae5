//! Paths command handler.
//!
//! Displays all resolved paths for diagnostics and debugging.

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Print every resolved path in `key = value` format.
pub fn execute(ctx: &CliContext) -> Result<u8, CliError> {
    println!("{}", ctx.paths);
    Ok(0)
}
