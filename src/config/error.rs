use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by a settings backend.
///
/// Reasons are carried as text so the error stays `Clone` and comparable;
/// backends are free to wrap whatever transport they sit on.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum BackendError {
    /// Reading a single key failed.
    #[error("Failed to read setting '{key}': {reason}")]
    Read { key: String, reason: String },
    /// Writing or deleting a single key failed.
    #[error("Failed to write setting '{key}': {reason}")]
    Write { key: String, reason: String },
    /// Settings file exists but could not be loaded.
    #[error("Failed to load settings from {path}: {reason}")]
    Load { path: PathBuf, reason: String },
    /// Backup directory cannot be created or written to.
    #[error("Backup directory not writable: {0}")]
    BackupDirNotWritable(PathBuf),
    /// Failed to create backup file.
    #[error("Failed to create backup: {0}")]
    BackupFailed(String),
}
