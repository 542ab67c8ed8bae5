//! Command-line adapter for the herald notification server supervisor.
//!
//! `main.rs` is the composition root; everything it dispatches to lives here
//! so it can be tested without spawning the binary.

#![deny(unsafe_code)]

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;

// Re-export primary types for convenient access
pub use bootstrap::{
    CliContext, LaunchPlan, bootstrap, init_file_logging, init_terminal_logging, prepare_launch,
};
pub use commands::{Commands, LaunchArgs};
pub use error::CliError;
pub use parser::Cli;
