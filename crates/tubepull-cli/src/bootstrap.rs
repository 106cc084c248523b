//! CLI bootstrap - the composition root.
//!
//! The only place where concrete adapters are wired together:
//! - InnerTube client (via tubepull-browse), used both as the collection
//!   browser and as the video source
//! - Collection crawler (via tubepull-core)
//! - Stream fetcher and worker pool (via tubepull-download)
//! - Terminal progress display, injected as the event emitter

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tubepull_browse::{BrowseClientConfig, DefaultBrowseClient};
use tubepull_core::{
    CollectionBrowserPort, CollectionCrawler, DownloadConfig, DownloadEventEmitterPort,
    VideoSourcePort,
};
use tubepull_download::{DownloadPool, StreamFetcher};

use crate::error::CliError;
use crate::presentation::TerminalProgress;

/// Options collected from the command line.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Output directory.
    pub output_dir: PathBuf,
    /// Number of concurrent downloads.
    pub workers: usize,
    /// Skip items whose destination already exists.
    pub skip_existing: bool,
    /// Per-read stall deadline.
    pub idle_timeout: Duration,
    /// InnerTube API key override.
    pub api_key: Option<String>,
}

impl CliConfig {
    fn download_config(&self) -> DownloadConfig {
        DownloadConfig::new(&self.output_dir)
            .with_workers(self.workers)
            .with_skip_existing(self.skip_existing)
            .with_idle_timeout(self.idle_timeout)
    }

    fn browse_config(&self) -> BrowseClientConfig {
        let config = BrowseClientConfig::new();
        match &self.api_key {
            Some(key) => config.with_api_key(key),
            None => config,
        }
    }
}

/// Fully composed context for CLI commands.
pub struct CliContext {
    /// Walks collection pages.
    pub crawler: CollectionCrawler,
    /// Downloads items.
    pub pool: DownloadPool,
    /// Progress display shared by the pool and the fetcher.
    pub progress: Arc<TerminalProgress>,
}

/// Build the CLI context.
///
/// # Errors
///
/// Returns `Config` if the HTTP client cannot be built or the download
/// options are invalid (zero workers).
pub fn bootstrap(config: &CliConfig) -> Result<CliContext, CliError> {
    let client = Arc::new(DefaultBrowseClient::new(&config.browse_config())?);
    let browser: Arc<dyn CollectionBrowserPort> = client.clone();
    let source: Arc<dyn VideoSourcePort> = client;

    let progress = Arc::new(TerminalProgress::new());
    let emitter: Arc<dyn DownloadEventEmitterPort> = progress.clone();

    let download_config = config.download_config();
    let fetcher = StreamFetcher::new(source, download_config.idle_timeout)
        .with_emitter(Arc::clone(&emitter));
    let pool = DownloadPool::new(download_config, Arc::new(fetcher))?.with_emitter(emitter);

    Ok(CliContext {
        crawler: CollectionCrawler::new(browser),
        pool,
        progress,
    })
}
