//! Download tasks and run reporting.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::errors::DownloadError;
use crate::domain::Item;

/// A unit of work handed to exactly one worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTask {
    /// The item to fetch.
    pub item: Item,
    /// Where the stream is written.
    pub destination: PathBuf,
}

impl DownloadTask {
    /// Create a task.
    pub fn new(item: Item, destination: impl Into<PathBuf>) -> Self {
        Self {
            item,
            destination: destination.into(),
        }
    }
}

/// An item that was downloaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedItem {
    /// The item.
    pub item: Item,
    /// Final file path.
    pub path: PathBuf,
    /// Bytes written to `path`.
    pub bytes: u64,
}

/// Why an item was not downloaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// The entry had no identifier.
    MissingId,
    /// The destination already existed and skip-existing was enabled.
    AlreadyExists,
}

/// An item that was skipped without fetching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedItem {
    /// The item.
    pub item: Item,
    /// Why it was skipped.
    pub reason: SkipReason,
}

/// An item whose download failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedItem {
    /// The item.
    pub item: Item,
    /// The error reported by the fetcher.
    pub error: DownloadError,
}

/// Outcome of a pool run.
///
/// Each worker builds its own report; the dispatcher merges them after every
/// worker has been joined. Order within each list follows completion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolReport {
    /// Items written to disk.
    pub completed: Vec<CompletedItem>,
    /// Items skipped without a fetch.
    pub skipped: Vec<SkippedItem>,
    /// Items that failed.
    pub failed: Vec<FailedItem>,
}

impl PoolReport {
    /// Fold another report into this one.
    pub fn merge(&mut self, other: Self) {
        self.completed.extend(other.completed);
        self.skipped.extend(other.skipped);
        self.failed.extend(other.failed);
    }

    /// Total number of items accounted for.
    pub fn total(&self) -> usize {
        self.completed.len() + self.skipped.len() + self.failed.len()
    }

    /// Total bytes written across all completed items.
    pub fn bytes_written(&self) -> u64 {
        self.completed.iter().map(|c| c.bytes).sum()
    }

    /// Whether any item failed.
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}
