//! Download handler.
//!
//! A URL carrying a playlist marker is crawled page by page and handed to
//! the pool as one collection; anything else is treated as a single video.

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tubepull_browse::{extract_video_id, is_collection_url, parse_collection_id};
use tubepull_core::Item;
use tubepull_download::{ItemOutcome, SkipReason, collection_dir_name};

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::{discovery_spinner, print_summary};

/// Execute the download command.
///
/// Per-item failures in a collection are reported but do not fail the
/// command; a failed crawl or a failed single download does.
pub async fn execute(ctx: &CliContext, url: &str) -> Result<(), CliError> {
    let _guard = cancel_on_ctrl_c(ctx.pool.cancellation_token());

    if is_collection_url(url) {
        download_collection(ctx, url).await
    } else {
        download_single(ctx, url).await
    }
}

async fn download_collection(ctx: &CliContext, url: &str) -> Result<(), CliError> {
    let collection_id = parse_collection_id(url)
        .ok_or_else(|| CliError::Arguments(format!("no playlist id in '{url}'")))?;

    let spinner = discovery_spinner(format!("Listing playlist {collection_id}..."));
    let collection = ctx.crawler.fetch_collection(&collection_id).await;
    spinner.finish_and_clear();
    let collection = collection?;
    info!(
        collection_id = %collection.id,
        items = collection.items.len(),
        "Collection discovered"
    );

    let dir_name = collection_dir_name(&collection.title, collection.id.as_str());
    println!(
        "Found {} videos in \"{}\"",
        collection.items.len(),
        if collection.title.is_empty() {
            collection.id.as_str()
        } else {
            collection.title.as_str()
        }
    );

    ctx.progress.begin_items(collection.items.len() as u64);
    let report = ctx.pool.run_all(&dir_name, collection.items).await;
    ctx.progress.finish();

    print_summary(&report);
    println!(
        "Saved to {}",
        ctx.pool.config().output_dir.join(&dir_name).display()
    );
    Ok(())
}

async fn download_single(ctx: &CliContext, url: &str) -> Result<(), CliError> {
    let video_id = extract_video_id(url)
        .ok_or_else(|| CliError::Arguments(format!("not a video URL or id: '{url}'")))?;

    ctx.progress.begin_bytes();
    let outcome = ctx.pool.run_single(Item::new(video_id, "")).await;
    ctx.progress.finish();

    match outcome? {
        ItemOutcome::Completed(done) => {
            println!("✓ Saved {} ({} bytes)", done.path.display(), done.bytes);
        }
        ItemOutcome::Skipped(skipped) => {
            let reason = match skipped.reason {
                SkipReason::AlreadyExists => "output already exists",
                SkipReason::MissingId => "no video id",
            };
            println!("Skipped: {reason}");
        }
    }
    Ok(())
}

/// Stops listening for Ctrl-C when dropped.
struct SignalGuard(JoinHandle<()>);

impl Drop for SignalGuard {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Cancel `token` on Ctrl-C for as long as the guard lives.
fn cancel_on_ctrl_c(token: CancellationToken) -> SignalGuard {
    SignalGuard(tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, stopping downloads");
            token.cancel();
        }
    }))
}
