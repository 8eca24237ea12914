//! Error types for the weekly tracker
//!
//! Errors are classified by where they can be recovered:
//! - Input: rejected edits (bad week number, rating, empty task text)
//! - Storage: I/O and serialization failures from the persistence backend

use std::path::PathBuf;
use thiserror::Error;

/// Error types for tracker operations
#[derive(Debug, Error)]
pub enum TrackerError {
    // Input errors
    #[error("Week number must be 1 or greater, got {0}")]
    InvalidWeek(i32),

    #[error("Tripti Index must be between 0 and 5, got {0}")]
    InvalidTriptiIndex(u8),

    #[error("Week start day must be between 0 (Sunday) and 6 (Saturday), got {0}")]
    InvalidWeekStartDay(String),

    #[error("Task description cannot be empty")]
    EmptyTaskDescription,

    #[error("Week {week} of {year} falls outside the supported date range")]
    DateOutOfRange { week: i32, year: i32 },

    // Storage errors
    #[error("IO error at {path}: {message}")]
    Io { path: PathBuf, message: String },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Could not find home directory")]
    HomeDirNotFound,
}

impl TrackerError {
    /// Returns true if the error came from the persistence backend rather than the input
    pub fn is_storage_error(&self) -> bool {
        matches!(
            self,
            TrackerError::Io { .. } | TrackerError::Serialization(_) | TrackerError::HomeDirNotFound
        )
    }

    pub(crate) fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        TrackerError::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for TrackerError {
    fn from(err: serde_json::Error) -> Self {
        TrackerError::Serialization(err.to_string())
    }
}
