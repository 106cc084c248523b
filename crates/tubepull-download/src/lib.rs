//! Download side of tubepull.
//!
//! - `format_selector` - picks the best progressive stream for a video
//! - `paths` - output layout and filename sanitization
//! - `queue` - shared FIFO of items waiting for a worker
//! - `fetcher` - per-item fetch-and-write (`ItemFetcher`, `StreamFetcher`)
//! - `pool` - bounded worker pool with per-item failure isolation
//! - `progress` - progress event rate limiting

#![deny(unused_crate_dependencies)]

// Re-export core types for convenience
pub use tubepull_core::{
    CompletedItem, DownloadConfig, DownloadError, DownloadEvent, DownloadResult, DownloadTask,
    FailedItem, PoolReport, SkipReason, SkippedItem,
};

mod fetcher;
mod format_selector;
mod paths;
mod pool;
mod progress;
mod queue;

pub use fetcher::{ItemFetcher, StreamFetcher};
pub use format_selector::{SelectionError, parse_rank, select_best};
pub use paths::{
    OutputLayout, SINGLE_OUTPUT_NAME, collection_dir_name, destination_exists, part_path,
    sanitize_filename,
};
pub use pool::{DownloadPool, ItemOutcome};
pub use progress::ProgressThrottle;
