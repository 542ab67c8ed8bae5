//! Path utilities for herald data directories and operator-configurable locations.
//!
//! This module provides the canonical path resolution for:
//! - The PID file used for single-instance enforcement
//! - The log file handed to the notification server
//! - The configuration search directory
//! - The notification server script
//!
//! # Design
//!
//! - Returns `PathBuf` and `PathError` for clear error handling
//! - No terminal I/O - the CLI decides how to report failures
//! - Environment lookups are captured once in [`PathOverrides`]

mod ensure;
mod error;
mod platform;
mod resolver;

// Error type
pub use error::PathError;

// Environment overrides and roots
pub use platform::{
    CONFIG_DIR_ENV, DATA_DIR_ENV, LOG_FILE_ENV, PID_FILE_ENV, PathOverrides, SERVER_SCRIPT_ENV,
    data_root,
};

// Directory operations
pub use ensure::{ensure_parent_dir, verify_writable};

// Resolver for every command and the `paths` diagnostics
pub use resolver::ResolvedPaths;
