//! Download error types.
//!
//! These errors are designed to be cloneable and serializable so they can be
//! stored in a run report. For I/O errors, we capture the path and message as
//! strings rather than holding `std::io::Error`.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for per-item download operations.
pub type DownloadResult<T> = Result<T, DownloadError>;

/// Error type for per-item download operations.
///
/// These are caught at the worker boundary: one item failing never aborts
/// the other items of a run.
#[derive(Clone, Debug, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum DownloadError {
    /// No candidate stream has both audio and a quality label.
    ///
    /// A progressive (audio+video) format does not exist for this video; a
    /// separate-stream merge would be required.
    #[error(
        "No progressive format with audio for '{video_id}' ({candidates} candidates, separate audio/video merge required)"
    )]
    NoEligibleFormat {
        /// The video that was resolved.
        video_id: String,
        /// How many candidates were inspected.
        candidates: usize,
    },

    /// Resolving the video or reading its stream failed.
    #[error("Fetch failed: {message}")]
    Fetch {
        /// Detailed error message.
        message: String,
        /// HTTP status code if available.
        #[serde(skip_serializing_if = "Option::is_none")]
        status_code: Option<u16>,
    },

    /// Creating or writing the destination file failed.
    #[error("Write failed for {path}: {message}")]
    Write {
        /// Destination path.
        path: String,
        /// Detailed error message.
        message: String,
    },

    /// The run was cancelled before this item finished.
    #[error("Download cancelled")]
    Cancelled,

    /// The dispatcher configuration is unusable.
    #[error("Invalid download configuration: {message}")]
    InvalidConfig {
        /// What is wrong.
        message: String,
    },
}

impl DownloadError {
    /// Create a fetch error.
    pub fn fetch(message: impl Into<String>) -> Self {
        Self::Fetch {
            message: message.into(),
            status_code: None,
        }
    }

    /// Create a fetch error carrying the HTTP status.
    pub fn fetch_with_status(message: impl Into<String>, status_code: u16) -> Self {
        Self::Fetch {
            message: message.into(),
            status_code: Some(status_code),
        }
    }

    /// Create a write error from the path and the underlying `std::io::Error`.
    pub fn write(path: &Path, err: &std::io::Error) -> Self {
        Self::Write {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Whether this error came from the run being cancelled.
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
