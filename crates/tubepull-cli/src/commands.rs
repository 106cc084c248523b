//! Available subcommands.

use std::path::PathBuf;

use clap::Subcommand;
use tubepull_core::download::config::{DEFAULT_OUTPUT_DIR, DEFAULT_WORKERS};

/// Default per-read stall deadline, in seconds.
pub const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 60;

#[derive(Subcommand)]
pub enum Commands {
    /// Download a single video, or every video of a playlist
    ///
    /// A URL containing `list=` is treated as a playlist.
    Download {
        /// Video or playlist URL
        #[arg(short, long)]
        url: String,
        /// Output directory
        #[arg(short, long, env = "TUBEPULL_OUT_DIR", default_value = DEFAULT_OUTPUT_DIR)]
        out: PathBuf,
        /// Number of concurrent downloads
        #[arg(short, long, env = "TUBEPULL_CONCURRENCY", default_value_t = DEFAULT_WORKERS)]
        concurrency: usize,
        /// Skip items whose output file already exists
        #[arg(long)]
        skip_existing: bool,
        /// Seconds a stream may stall before the item fails
        #[arg(long, value_name = "SECS", default_value_t = DEFAULT_IDLE_TIMEOUT_SECS)]
        idle_timeout: u64,
        /// InnerTube API key
        #[arg(long, env = "TUBEPULL_API_KEY", hide_env_values = true)]
        api_key: Option<String>,
    },
}
