//! Core domain types for the herald notification server supervisor.
//!
//! This crate has no knowledge of processes or signals. It provides:
//! - The server configuration schema and its validation ([`config`])
//! - Canonical path resolution for the PID file, log file and configuration ([`paths`])
//! - Timing policy for the supervisor loop ([`settings`])

pub mod config;
pub mod paths;
pub mod settings;

// Re-export commonly used types for convenience
pub use config::{
    CONFIG_FILE_CANDIDATES, ConfigError, ConfigResolution, ConfigSource, ServerConfig,
    ServerEndpoint, ServerType, TlsPair, load_config, resolve_config_path, validate_config,
};
pub use paths::{
    PathError, PathOverrides, ResolvedPaths, data_root, ensure_parent_dir, verify_writable,
};
pub use settings::{SettingsError, SupervisorSettings, validate_settings};
