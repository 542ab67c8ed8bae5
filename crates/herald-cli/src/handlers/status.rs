//! Status command handler.

use herald_runtime::instance_status;

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Exit code when the server is not running (LSB "program is not running").
pub const NOT_RUNNING_EXIT_CODE: u8 = 3;

/// Report whether the supervisor is running.
///
/// Exits 0 when it is, [`NOT_RUNNING_EXIT_CODE`] otherwise. The PID file is
/// never modified.
pub fn execute(ctx: &CliContext) -> Result<u8, CliError> {
    let status = instance_status(&ctx.pid_file())?;
    println!("{status}");

    Ok(if status.is_running() {
        0
    } else {
        NOT_RUNNING_EXIT_CODE
    })
}
