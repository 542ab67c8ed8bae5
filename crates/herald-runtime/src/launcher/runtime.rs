//! Locating the Node.js runtime.

use std::path::PathBuf;

use tracing::debug;

use crate::SupervisorError;

/// Binary names tried, in order, when looking for the Node.js runtime.
///
/// Some distributions ship the interpreter as `nodejs` to avoid a name clash.
pub const RUNTIME_CANDIDATES: [&str; 2] = ["nodejs", "node"];

/// Return the first of `candidates` found on `$PATH`.
pub fn resolve_runtime_binary(candidates: &[&str]) -> Result<PathBuf, SupervisorError> {
    for candidate in candidates {
        if let Ok(path) = which::which(candidate) {
            debug!("Using runtime binary {}", path.display());
            return Ok(path);
        }
    }

    Err(SupervisorError::MissingRuntimeBinary {
        tried: candidates
            .iter()
            .map(|c| format!("`{c}`"))
            .collect::<Vec<_>>()
            .join(" or "),
    })
}
