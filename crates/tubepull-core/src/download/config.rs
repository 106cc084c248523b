//! Dispatcher configuration.

use std::path::PathBuf;
use std::time::Duration;

use super::errors::DownloadError;

/// Default output directory, relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "./downloads";

/// Default number of parallel workers.
pub const DEFAULT_WORKERS: usize = 4;

/// Configuration for a download run.
///
/// Built once by the caller and handed to the dispatcher; nothing in the
/// download path reads options from anywhere else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadConfig {
    /// Root directory for all output files.
    pub output_dir: PathBuf,
    /// Number of concurrent workers. Must be at least 1.
    pub workers: usize,
    /// Skip items whose destination file already exists.
    pub skip_existing: bool,
    /// Longest a single stream read may stall before the item fails.
    pub idle_timeout: Duration,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            workers: DEFAULT_WORKERS,
            skip_existing: false,
            idle_timeout: Duration::from_secs(60),
        }
    }
}

impl DownloadConfig {
    /// Create a config rooted at the given output directory.
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            ..Default::default()
        }
    }

    /// Set the number of workers.
    #[must_use]
    pub const fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Enable or disable skipping of existing files.
    #[must_use]
    pub const fn with_skip_existing(mut self, skip: bool) -> Self {
        self.skip_existing = skip;
        self
    }

    /// Set the stream stall deadline.
    #[must_use]
    pub const fn with_idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = timeout;
        self
    }

    /// Check the config is usable.
    pub fn validate(&self) -> Result<(), DownloadError> {
        if self.workers == 0 {
            return Err(DownloadError::invalid_config(
                "worker count must be at least 1",
            ));
        }
        if self.idle_timeout.is_zero() {
            return Err(DownloadError::invalid_config(
                "idle timeout must be greater than zero",
            ));
        }
        Ok(())
    }
}
