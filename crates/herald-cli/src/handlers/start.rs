//! Start command handler (detached and foreground).

use std::ffi::OsString;
use std::path::Path;

use herald_core::ServerConfig;
use herald_runtime::{DetachRequest, StartMode, StartOutcome, start};

use crate::bootstrap::{CliContext, prepare_launch};
use crate::commands::{LaunchArgs, SUPERVISE_COMMAND};
use crate::error::CliError;

/// Execute the start command.
///
/// Without `debug` the invoking process exits 0 once the detached supervisor
/// is confirmed alive. With `debug` the server runs attached to the terminal
/// and its exit code is returned.
pub async fn execute(ctx: &CliContext, launch: &LaunchArgs, debug: bool) -> Result<u8, CliError> {
    let plan = prepare_launch(ctx, launch.config.as_deref())?;
    describe(&plan.config);

    let mode = if debug {
        println!("Starting notification server in foreground...");
        println!(
            "Launching server:\n\n    $ {}\n",
            plan.invocation.display_command()
        );
        StartMode::Foreground
    } else {
        StartMode::Detached(supervise_request(ctx, &plan.config_path)?)
    };

    match start(&plan.invocation, &ctx.pid_file(), mode, &ctx.settings).await? {
        StartOutcome::Detached { pid } => {
            eprintln!("Notification server started (supervisor pid {pid}).");
            Ok(0)
        }
        StartOutcome::Foreground { exit_code } => {
            println!(">>> Server exited!");
            Ok(u8::try_from(exit_code).unwrap_or(1))
        }
    }
}

/// Command line of the detached supervisor.
pub fn supervise_args(config_path: &Path, verbose: bool) -> Vec<OsString> {
    let mut args = vec![
        OsString::from(SUPERVISE_COMMAND),
        OsString::from("--config"),
        config_path.as_os_str().to_os_string(),
    ];
    if verbose {
        args.push(OsString::from("--verbose"));
    }
    args
}

fn supervise_request(ctx: &CliContext, config_path: &Path) -> Result<DetachRequest, CliError> {
    Ok(DetachRequest::current_exe(supervise_args(
        config_path,
        ctx.verbose,
    ))?)
}

fn describe(config: &ServerConfig) {
    for endpoint in config.endpoints() {
        tracing::debug!(
            "Configured {} server on {}:{}{}",
            endpoint.server_type,
            endpoint.listen.as_deref().unwrap_or("*"),
            endpoint.port,
            if endpoint.tls.is_some() { " (TLS)" } else { "" }
        );
    }
}
