//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where the CLI wires things together:
//! - Path resolution (via herald-core)
//! - Supervisor timing policy (via herald-core)
//! - Server invocation and runtime binary lookup (via herald-runtime)
//! - Logging destination
//!
//! Command handlers receive a [`CliContext`] and never resolve paths themselves.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use herald_core::{
    ConfigSource, ResolvedPaths, ServerConfig, SupervisorSettings,
    ensure_parent_dir, load_config, resolve_config_path, validate_settings, verify_writable,
};
use herald_runtime::{
    PidFile, RUNTIME_CANDIDATES, ServerInvocation, ensure_launch_allowed, resolve_runtime_binary,
};
use tracing_subscriber::EnvFilter;

use crate::error::CliError;

/// Everything command handlers need, resolved once per invocation.
#[derive(Debug, Clone)]
pub struct CliContext {
    pub paths: ResolvedPaths,
    pub settings: SupervisorSettings,
    pub verbose: bool,
}

impl CliContext {
    /// Build a context from explicit paths and settings.
    pub fn new(
        paths: ResolvedPaths,
        settings: SupervisorSettings,
        verbose: bool,
    ) -> Result<Self, CliError> {
        validate_settings(&settings)?;
        Ok(Self {
            paths,
            settings,
            verbose,
        })
    }

    pub fn pid_file(&self) -> PidFile {
        PidFile::new(&self.paths.pid_file)
    }
}

/// Resolve paths from the environment and use default timings.
pub fn bootstrap(verbose: bool) -> Result<CliContext, CliError> {
    let paths = ResolvedPaths::resolve()?;
    CliContext::new(paths, SupervisorSettings::default(), verbose)
}

/// A validated configuration and the command that will run the server with it.
#[derive(Debug, Clone)]
pub struct LaunchPlan {
    pub config: ServerConfig,
    pub config_path: PathBuf,
    pub invocation: ServerInvocation,
}

/// Locate and validate the configuration, then build the server invocation.
///
/// Announces which configuration file is read. A running instance or a root
/// user is refused before the log directory is created or the runtime binary
/// is looked up.
pub fn prepare_launch(ctx: &CliContext, explicit: Option<&Path>) -> Result<LaunchPlan, CliError> {
    let resolution = resolve_config_path(explicit, &ctx.paths.config_dir);
    println!(
        "Reading configuration from: {}",
        resolution.path.display()
    );
    if resolution.source == ConfigSource::Default {
        tracing::debug!("No herald.custom.json found; using the default configuration");
    }

    let config = load_config(&resolution.path)?;
    ensure_launch_allowed(&ctx.pid_file())?;
    let invocation = build_invocation(ctx, &resolution.path)?;

    Ok(LaunchPlan {
        config,
        config_path: resolution.path,
        invocation,
    })
}

/// Server invocation for an already validated configuration file.
pub fn build_invocation(ctx: &CliContext, config_path: &Path) -> Result<ServerInvocation, CliError> {
    ensure_parent_dir(&ctx.paths.log_file)?;
    if let Some(dir) = ctx.paths.log_file.parent().filter(|d| !d.as_os_str().is_empty()) {
        verify_writable(dir)?;
    }
    let binary = resolve_runtime_binary(&RUNTIME_CANDIDATES)?;
    Ok(ServerInvocation::new(
        binary,
        &ctx.paths.server_script,
        config_path,
        &ctx.paths.log_file,
    ))
}

fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }))
}

/// Log to stderr for interactive commands.
pub fn init_terminal_logging(verbose: bool) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))
}

/// Append log lines to `log_file` for the detached supervisor, whose
/// standard streams are closed.
pub fn init_file_logging(verbose: bool, log_file: &Path) -> Result<()> {
    ensure_parent_dir(log_file)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("failed to open log file {}", log_file.display()))?;

    // At least `info` so restarts are recorded even without RUST_LOG
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))
}
