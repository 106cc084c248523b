//! Download events emitted by the worker pool.

use serde::{Deserialize, Serialize};

use super::types::SkipReason;

/// Single discriminated union for per-item download state changes.
///
/// Identifiers are item ids. Events for different items interleave freely;
/// events for one item arrive in the order started, progress, then exactly
/// one of completed, skipped or failed. Skipped items never see `started`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DownloadEvent {
    /// A worker picked up the item and resolved its destination.
    ItemStarted {
        /// Item id.
        id: String,
        /// Item title.
        title: String,
        /// Destination file.
        destination: String,
    },

    /// Bytes written so far.
    ItemProgress {
        /// Item id.
        id: String,
        /// Bytes written.
        downloaded: u64,
        /// Expected size, 0 when unknown.
        total: u64,
    },

    /// The item was written to its destination.
    ItemCompleted {
        /// Item id.
        id: String,
        /// Bytes written.
        bytes: u64,
    },

    /// The item was not fetched.
    ItemSkipped {
        /// Item id (may be empty).
        id: String,
        /// Why.
        reason: SkipReason,
    },

    /// The item failed.
    ItemFailed {
        /// Item id.
        id: String,
        /// Error message describing what went wrong.
        error: String,
    },
}

impl DownloadEvent {
    /// Create a started event.
    pub fn started(
        id: impl Into<String>,
        title: impl Into<String>,
        destination: impl Into<String>,
    ) -> Self {
        Self::ItemStarted {
            id: id.into(),
            title: title.into(),
            destination: destination.into(),
        }
    }

    /// Create a progress event.
    pub fn progress(id: impl Into<String>, downloaded: u64, total: u64) -> Self {
        Self::ItemProgress {
            id: id.into(),
            downloaded,
            total,
        }
    }

    /// Create a failed event.
    pub fn failed(id: impl Into<String>, error: impl Into<String>) -> Self {
        Self::ItemFailed {
            id: id.into(),
            error: error.into(),
        }
    }

    /// Whether this event ends the item.
    pub const fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::ItemCompleted { .. } | Self::ItemSkipped { .. } | Self::ItemFailed { .. }
        )
    }

    /// The item id this event refers to.
    pub fn id(&self) -> &str {
        match self {
            Self::ItemStarted { id, .. }
            | Self::ItemProgress { id, .. }
            | Self::ItemCompleted { id, .. }
            | Self::ItemSkipped { id, .. }
            | Self::ItemFailed { id, .. } => id,
        }
    }
}
