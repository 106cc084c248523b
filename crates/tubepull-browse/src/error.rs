//! Internal error types for InnerTube operations.
//!
//! These are mapped to core port errors at the boundary (see `port.rs`).

use thiserror::Error;

/// Result type alias for InnerTube operations.
pub type BrowseResult<T> = Result<T, BrowseError>;

/// Errors related to InnerTube API operations.
#[derive(Debug, Error)]
pub enum BrowseError {
    /// API request failed with an HTTP error status.
    #[error("InnerTube request failed with status {status}: {url}")]
    ApiRequestFailed {
        /// HTTP status code
        status: u16,
        /// The URL that was requested, without its query string
        url: String,
    },

    /// API returned a response that could not be interpreted.
    #[error("Invalid response from InnerTube: {message}")]
    InvalidResponse {
        /// Description of what was invalid
        message: String,
    },

    /// The input does not name a video.
    #[error("Not a video URL or id: '{input}'")]
    InvalidVideoRef {
        /// What the caller passed
        input: String,
    },

    /// The player refused to serve the video.
    #[error("Video '{video_id}' is not playable: {reason}")]
    Unplayable {
        /// The video that was requested
        video_id: String,
        /// Status and reason reported by the player
        reason: String,
    },

    /// The selected format has no direct URL.
    #[error("Format {itag} only offers a ciphered URL")]
    CipheredStream {
        /// Format identifier
        itag: u32,
    },

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl BrowseError {
    /// HTTP status carried by this error, if any.
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::ApiRequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }
}
