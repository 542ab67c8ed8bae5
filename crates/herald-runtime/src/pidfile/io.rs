//! Atomic PID file I/O operations.
//!
//! Format: a single line holding the decimal pid of the supervisor.
//! An absent or blank file means "not running".

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use herald_core::ensure_parent_dir;

/// Handle to the PID file at a fixed location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PidFile {
    path: PathBuf,
}

impl PidFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the recorded pid.
    ///
    /// Returns `Ok(None)` when the file is absent or blank. Content that is not
    /// a positive decimal integer yields [`io::ErrorKind::InvalidData`]. No
    /// liveness check is performed.
    pub fn read(&self) -> io::Result<Option<u32>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e),
        };

        parse_pid(&content)
    }

    /// Write `pid` atomically using temp file + rename.
    ///
    /// Missing parent directories are created first.
    ///
    /// # Atomicity
    /// 1. Write to `<name>.tmp`
    /// 2. Rename over `<name>` (atomic on Unix/macOS)
    pub fn write(&self, pid: u32) -> io::Result<()> {
        ensure_parent_dir(&self.path).map_err(io::Error::other)?;

        let temp_path = self.temp_path();
        fs::write(&temp_path, format!("{pid}\n"))?;
        fs::rename(&temp_path, &self.path)
    }

    /// Replace the file with an empty one.
    ///
    /// Used as a writability probe before the server is launched.
    pub fn truncate(&self) -> io::Result<()> {
        ensure_parent_dir(&self.path).map_err(io::Error::other)?;
        fs::write(&self.path, "")
    }

    /// Delete the PID file (idempotent - no error if missing).
    pub fn remove(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

fn parse_pid(content: &str) -> io::Result<Option<u32>> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    match trimmed.parse::<u32>() {
        Ok(0) => Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "PID file records pid 0",
        )),
        Ok(pid) => Ok(Some(pid)),
        Err(_) => Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("PID file content is not a pid: {trimmed:?}"),
        )),
    }
}
