//! Main commands enum and shared arguments.

use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Name of the hidden subcommand the detached supervisor runs.
pub const SUPERVISE_COMMAND: &str = "supervise";

/// Options shared by every command that launches the server.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchArgs {
    /// Use a specific configuration file instead of the default search
    #[arg(long, value_name = "FILE", env = "HERALD_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available commands.
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Start the notification server in the background
    Start {
        #[command(flatten)]
        launch: LaunchArgs,
        /// Run in the foreground attached to this terminal
        #[arg(long)]
        debug: bool,
    },

    /// Stop the running notification server
    Stop,

    /// Stop the notification server, then start it again
    Restart {
        #[command(flatten)]
        launch: LaunchArgs,
    },

    /// Start the notification server in the foreground (same as `start --debug`)
    Debug {
        #[command(flatten)]
        launch: LaunchArgs,
    },

    /// Report whether the notification server is running
    Status,

    /// Show resolved paths for the PID file, log file and configuration
    Paths,

    /// Run the monitor loop (used internally by `start`)
    #[command(name = SUPERVISE_COMMAND, hide = true)]
    Supervise {
        /// Validated configuration file, as an absolute path
        #[arg(long, value_name = "FILE")]
        config: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use crate::Cli;
    use clap::{CommandFactory, Parser};

    use super::*;

    #[test]
    fn start_accepts_config_and_debug() {
        let cli = Cli::parse_from(["herald", "start", "--config", "/etc/herald.json", "--debug"]);
        assert_eq!(
            cli.command,
            Some(Commands::Start {
                launch: LaunchArgs {
                    config: Some(PathBuf::from("/etc/herald.json")),
                },
                debug: true,
            })
        );
    }

    #[test]
    fn supervise_is_hidden_from_help() {
        let cmd = Cli::command();
        let supervise = cmd
            .get_subcommands()
            .find(|c| c.get_name() == SUPERVISE_COMMAND)
            .expect("supervise subcommand registered");
        assert!(supervise.is_hide_set());

        // The about line mentions supervising, so match listing entries only
        let help = Cli::command().render_help().to_string();
        let listed: Vec<&str> = help
            .lines()
            .filter_map(|line| line.strip_prefix("  "))
            .filter_map(|entry| entry.split_whitespace().next())
            .collect();
        assert!(listed.contains(&"restart"));
        assert!(!listed.contains(&SUPERVISE_COMMAND));
    }

    #[test]
    fn supervise_requires_config() {
        assert!(Cli::try_parse_from(["herald", "supervise"]).is_err());
        let cli = Cli::parse_from(["herald", "supervise", "--config", "/tmp/c.json"]);
        assert!(matches!(cli.command, Some(Commands::Supervise { .. })));
    }
}
