//! Directory creation and verification utilities.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use super::error::PathError;

/// Permission bits for directories created on behalf of the PID and log files.
#[cfg(unix)]
const DIR_MODE: u32 = 0o755;

/// Ensure the parent directory of `file` exists, creating it (and its
/// ancestors) if missing.
///
/// A path with an empty parent (a bare file name) refers to the current
/// directory and is accepted as-is.
pub fn ensure_parent_dir(file: &Path) -> Result<(), PathError> {
    let parent = file
        .parent()
        .ok_or_else(|| PathError::NoParent(file.to_path_buf()))?;

    if parent.as_os_str().is_empty() {
        return Ok(());
    }

    if parent.exists() {
        if !parent.is_dir() {
            return Err(PathError::NotADirectory(parent.to_path_buf()));
        }
        return Ok(());
    }

    create_dir_all(parent).map_err(|e| PathError::CreateFailed {
        path: parent.to_path_buf(),
        reason: e.to_string(),
    })?;
    tracing::debug!("Created directory {}", parent.display());
    Ok(())
}

#[cfg(unix)]
fn create_dir_all(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;

    fs::DirBuilder::new()
        .recursive(true)
        .mode(DIR_MODE)
        .create(path)
}

#[cfg(not(unix))]
fn create_dir_all(path: &Path) -> std::io::Result<()> {
    fs::create_dir_all(path)
}

/// Verify a directory is writable by attempting to create a test file.
pub fn verify_writable(path: &Path) -> Result<(), PathError> {
    let test_file = path.join(".herald_write_test");
    let result = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&test_file);

    match result {
        Ok(mut file) => {
            file.write_all(b"test")
                .map_err(|e| PathError::NotWritable {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                })?;
            drop(file);
            let _ = fs::remove_file(&test_file);
            Ok(())
        }
        Err(err) => Err(PathError::NotWritable {
            path: path.to_path_buf(),
            reason: err.to_string(),
        }),
    }
}
