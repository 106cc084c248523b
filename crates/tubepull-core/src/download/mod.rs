//! Download domain types, configuration and errors.
//!
//! Pure data types shared by the dispatcher and its adapters. No I/O.
//!
//! # Structure
//!
//! - `errors` - Per-item error taxonomy (`DownloadError`)
//! - `config` - Dispatcher configuration record (`DownloadConfig`)
//! - `events` - Per-item progress events (`DownloadEvent`)
//! - `types` - Tasks and the pool run report

pub mod config;
pub mod errors;
pub mod events;
pub mod types;

pub use config::DownloadConfig;
pub use errors::{DownloadError, DownloadResult};
pub use events::DownloadEvent;
pub use types::{CompletedItem, DownloadTask, FailedItem, PoolReport, SkipReason, SkippedItem};
