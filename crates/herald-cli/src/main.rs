//! CLI entry point - the composition root.
//!
//! Parses arguments, bootstraps the context, installs logging and routes to
//! a handler. This is the only place the process exits.

use std::process::ExitCode;

use clap::{CommandFactory, Parser};

use herald_cli::{
    Cli, CliError, Commands, bootstrap, handlers, init_file_logging, init_terminal_logging,
};

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(err.downcast_ref::<CliError>().map_or(1, CliError::exit_code))
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<u8> {
    let Some(command) = cli.command else {
        // No command provided - show help
        Cli::command().print_help()?;
        return Ok(0);
    };

    let ctx = bootstrap(cli.verbose)?;

    if matches!(command, Commands::Supervise { .. }) {
        init_file_logging(cli.verbose, &ctx.paths.log_file)?;
    } else {
        init_terminal_logging(cli.verbose)?;
    }

    let code = match command {
        Commands::Start { launch, debug } => handlers::start::execute(&ctx, &launch, debug).await?,
        Commands::Debug { launch } => handlers::start::execute(&ctx, &launch, true).await?,
        Commands::Stop => handlers::stop::execute(&ctx).await?,
        Commands::Restart { launch } => handlers::restart::execute(&ctx, &launch).await?,
        Commands::Status => handlers::status::execute(&ctx)?,
        Commands::Paths => handlers::paths::execute(&ctx)?,
        Commands::Supervise { config } => handlers::supervise::execute(&ctx, &config).await?,
    };

    Ok(code)
}
