//! Bounded worker pool.
//!
//! A run fills one shared queue, spawns exactly `workers` tasks that drain
//! it, and joins them all before returning. Each worker keeps its own
//! report; the reports are merged after the join, so the queue is the only
//! state the workers share.
//!
//! One item failing never affects another: errors are caught at the worker
//! boundary, logged with the item's identity, and recorded.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};
use tubepull_core::{
    CompletedItem, DownloadConfig, DownloadError, DownloadEvent, DownloadEventEmitterPort,
    DownloadResult, DownloadTask, FailedItem, Item, NoopDownloadEmitter, PoolReport, SkipReason,
    SkippedItem,
};

use crate::fetcher::ItemFetcher;
use crate::paths::{OutputLayout, destination_exists, part_path};
use crate::queue::WorkQueue;

/// Result of a single-item run that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    /// The item was written.
    Completed(CompletedItem),
    /// The item was not fetched.
    Skipped(SkippedItem),
}

/// What happened to one dequeued item.
enum Outcome {
    Completed(CompletedItem),
    Skipped(SkippedItem),
    Failed(FailedItem),
}

impl Outcome {
    fn record(self, report: &mut PoolReport) {
        match self {
            Self::Completed(item) => report.completed.push(item),
            Self::Skipped(item) => report.skipped.push(item),
            Self::Failed(item) => report.failed.push(item),
        }
    }
}

/// Worker pool over an [`ItemFetcher`].
pub struct DownloadPool {
    config: DownloadConfig,
    fetcher: Arc<dyn ItemFetcher>,
    emitter: Arc<dyn DownloadEventEmitterPort>,
    cancel: CancellationToken,
}

impl DownloadPool {
    /// Create a pool.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the worker count is zero or the stall
    /// deadline is zero.
    pub fn new(config: DownloadConfig, fetcher: Arc<dyn ItemFetcher>) -> DownloadResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            fetcher,
            emitter: Arc::new(NoopDownloadEmitter::new()),
            cancel: CancellationToken::new(),
        })
    }

    /// Report item lifecycle events through `emitter`.
    #[must_use]
    pub fn with_emitter(mut self, emitter: Arc<dyn DownloadEventEmitterPort>) -> Self {
        self.emitter = emitter;
        self
    }

    /// Token that stops the pool when cancelled.
    ///
    /// Workers stop taking new items; items in flight end with `Cancelled`
    /// and so do items still queued.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// The configuration this pool was built with.
    pub const fn config(&self) -> &DownloadConfig {
        &self.config
    }

    /// Download every item of a collection into `<out>/<collection_dir>/`.
    ///
    /// Returns once every worker has drained the queue and been joined. The
    /// report accounts for every item passed in.
    pub async fn run_all(&self, collection_dir: &str, items: Vec<Item>) -> PoolReport {
        let layout = OutputLayout::collection(&self.config.output_dir, collection_dir);
        let collisions = warn_on_collisions(&layout, &items);
        let total = items.len();

        info!(
            dir = %layout.dir().display(),
            items = total,
            workers = self.config.workers,
            collisions,
            "Starting downloads"
        );

        let queue = Arc::new(WorkQueue::new(items));
        let worker = Arc::new(self.worker(layout));

        let mut set = JoinSet::new();
        for index in 0..self.config.workers {
            let queue = Arc::clone(&queue);
            let worker = Arc::clone(&worker);
            set.spawn(async move { worker.drain(index, &queue).await });
        }

        let mut report = PoolReport::default();
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok(partial) => report.merge(partial),
                Err(e) => error!(error = %e, "Download worker did not finish"),
            }
        }

        for item in queue.drain().await {
            report.failed.push(FailedItem {
                item,
                error: DownloadError::Cancelled,
            });
        }

        info!(
            completed = report.completed.len(),
            skipped = report.skipped.len(),
            failed = report.failed.len(),
            bytes = report.bytes_written(),
            "Downloads finished"
        );
        report
    }

    /// Download one video to `<out>/output.mp4`.
    ///
    /// Same skip rules as [`run_all`](Self::run_all), but a failure is
    /// returned instead of recorded.
    pub async fn run_single(&self, item: Item) -> DownloadResult<ItemOutcome> {
        let worker = self.worker(OutputLayout::single(&self.config.output_dir));
        match worker.process(0, item).await {
            Outcome::Completed(done) => Ok(ItemOutcome::Completed(done)),
            Outcome::Skipped(skipped) => Ok(ItemOutcome::Skipped(skipped)),
            Outcome::Failed(failed) => Err(failed.error),
        }
    }

    fn worker(&self, layout: OutputLayout) -> Worker {
        Worker {
            layout,
            fetcher: Arc::clone(&self.fetcher),
            emitter: Arc::clone(&self.emitter),
            skip_existing: self.config.skip_existing,
            cancel: self.cancel.clone(),
        }
    }
}

/// Log every destination shared by more than one item.
///
/// Returns the number of items whose destination was already taken.
fn warn_on_collisions(layout: &OutputLayout, items: &[Item]) -> usize {
    let mut claimed: HashMap<PathBuf, &str> = HashMap::new();
    let mut collisions = 0;

    for item in items.iter().filter(|item| item.has_id()) {
        match claimed.entry(layout.item_path(item)) {
            Entry::Vacant(slot) => {
                slot.insert(&item.id);
            }
            Entry::Occupied(slot) => {
                collisions += 1;
                warn!(
                    path = %slot.key().display(),
                    first_id = %slot.get(),
                    item_id = %item.id,
                    "Items share a destination, the last one written wins"
                );
            }
        }
    }
    collisions
}

/// State shared by the workers of one run.
struct Worker {
    layout: OutputLayout,
    fetcher: Arc<dyn ItemFetcher>,
    emitter: Arc<dyn DownloadEventEmitterPort>,
    skip_existing: bool,
    cancel: CancellationToken,
}

impl Worker {
    /// Take items until the queue is empty or the run is cancelled.
    async fn drain(&self, worker: usize, queue: &WorkQueue) -> PoolReport {
        let mut report = PoolReport::default();
        while !self.cancel.is_cancelled() {
            let Some(item) = queue.pop().await else {
                break;
            };
            self.process(worker, item).await.record(&mut report);
        }
        debug!(worker, handled = report.total(), "Worker finished");
        report
    }

    async fn process(&self, worker: usize, item: Item) -> Outcome {
        if !item.has_id() {
            info!(worker, title = %item.title, "Skipping entry without an id");
            return self.skip(item, SkipReason::MissingId);
        }

        let destination = self.layout.item_path(&item);
        if self.skip_existing && destination_exists(&destination).await {
            info!(
                worker,
                item_id = %item.id,
                path = %destination.display(),
                "Destination exists, skipping"
            );
            return self.skip(item, SkipReason::AlreadyExists);
        }

        self.emitter.emit(DownloadEvent::started(
            &item.id,
            &item.title,
            destination.display().to_string(),
        ));
        debug!(worker, item_id = %item.id, path = %destination.display(), "Fetching item");

        let task = DownloadTask::new(item, destination);
        let result = tokio::select! {
            biased;
            () = self.cancel.cancelled() => Err(DownloadError::Cancelled),
            result = self.fetcher.fetch(&task) => result,
        };

        match result {
            Ok(bytes) => {
                info!(
                    worker,
                    item_id = %task.item.id,
                    path = %task.destination.display(),
                    bytes,
                    "Item downloaded"
                );
                self.emitter.emit(DownloadEvent::ItemCompleted {
                    id: task.item.id.clone(),
                    bytes,
                });
                Outcome::Completed(CompletedItem {
                    item: task.item,
                    path: task.destination,
                    bytes,
                })
            }
            Err(error) => {
                if error.is_cancelled() {
                    // The fetch future was dropped mid-write.
                    let part = part_path(&task.destination, &task.item.id);
                    let _ = tokio::fs::remove_file(part).await;
                    warn!(worker, item_id = %task.item.id, "Item cancelled");
                } else {
                    error!(
                        worker,
                        item_id = %task.item.id,
                        title = %task.item.title,
                        error = %error,
                        "Item failed"
                    );
                }
                self.emitter
                    .emit(DownloadEvent::failed(&task.item.id, error.to_string()));
                Outcome::Failed(FailedItem {
                    item: task.item,
                    error,
                })
            }
        }
    }

    fn skip(&self, item: Item, reason: SkipReason) -> Outcome {
        self.emitter.emit(DownloadEvent::ItemSkipped {
            id: item.id.clone(),
            reason,
        });
        Outcome::Skipped(SkippedItem { item, reason })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::testing::RecordingEmitter;
    use async_trait::async_trait;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Writes the item id to the destination; fails for ids in `failing`.
    #[derive(Default)]
    struct FakeFetcher {
        failing: Vec<String>,
        calls: AtomicUsize,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
        delay: Duration,
    }

    #[async_trait]
    impl ItemFetcher for FakeFetcher {
        async fn fetch(&self, task: &DownloadTask) -> DownloadResult<u64> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            if self.failing.contains(&task.item.id) {
                return Err(DownloadError::fetch(format!("boom {}", task.item.id)));
            }
            if let Some(parent) = task.destination.parent() {
                std::fs::create_dir_all(parent).unwrap();
            }
            std::fs::write(&task.destination, task.item.id.as_bytes()).unwrap();
            Ok(task.item.id.len() as u64)
        }
    }

    fn items(n: usize) -> Vec<Item> {
        (1..=n)
            .map(|i| Item::new(format!("id{i}"), format!("Title {i}")))
            .collect()
    }

    fn pool(out: &Path, workers: usize, fetcher: Arc<FakeFetcher>) -> DownloadPool {
        DownloadPool::new(DownloadConfig::new(out).with_workers(workers), fetcher).unwrap()
    }

    #[test]
    fn rejects_zero_workers() {
        let result = DownloadPool::new(
            DownloadConfig::new("/tmp").with_workers(0),
            Arc::new(FakeFetcher::default()),
        );
        assert!(matches!(result, Err(DownloadError::InvalidConfig { .. })));
    }

    #[tokio::test]
    async fn empty_id_is_skipped_without_fetch() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = Arc::new(FakeFetcher::default());
        let pool = pool(dir.path(), 2, fetcher.clone());

        let report = pool
            .run_all("Mix", vec![Item::new("", "Deleted"), Item::new("a", "A")])
            .await;

        assert_eq!(report.completed.len(), 1);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].reason, SkipReason::MissingId);
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrency_never_exceeds_worker_count() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = Arc::new(FakeFetcher {
            delay: Duration::from_millis(20),
            ..Default::default()
        });
        let pool = pool(dir.path(), 3, fetcher.clone());

        let report = pool.run_all("Mix", items(12)).await;

        assert_eq!(report.completed.len(), 12);
        assert!(fetcher.max_in_flight.load(Ordering::SeqCst) <= 3);
    }

    #[tokio::test]
    async fn single_worker_processes_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = Arc::new(FakeFetcher::default());
        let pool = pool(dir.path(), 1, fetcher);

        let report = pool.run_all("Mix", items(4)).await;

        let ids: Vec<_> = report.completed.iter().map(|c| c.item.id.as_str()).collect();
        assert_eq!(ids, ["id1", "id2", "id3", "id4"]);
    }

    #[tokio::test]
    async fn collection_files_land_under_collection_dir() {
        let dir = tempfile::tempdir().unwrap();
        let pool = pool(dir.path(), 2, Arc::new(FakeFetcher::default()));

        let report = pool
            .run_all("Road/Trip", vec![Item::new("a", "Song A")])
            .await;

        assert_eq!(
            report.completed[0].path,
            dir.path().join("Road_Trip").join("Song A.mp4")
        );
        assert!(report.completed[0].path.is_file());
    }

    #[tokio::test]
    async fn run_single_writes_output_mp4_and_propagates_failure() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = Arc::new(FakeFetcher {
            failing: vec!["bad".to_string()],
            ..Default::default()
        });
        let pool = pool(dir.path(), 1, fetcher);

        let outcome = pool.run_single(Item::new("good", "")).await.unwrap();
        match outcome {
            ItemOutcome::Completed(done) => {
                assert_eq!(done.path, dir.path().join("output.mp4"));
            }
            ItemOutcome::Skipped(_) => panic!("expected a download"),
        }

        let err = pool.run_single(Item::new("bad", "")).await.unwrap_err();
        assert!(matches!(err, DownloadError::Fetch { .. }));
    }

    #[tokio::test]
    async fn cancelled_pool_reports_remaining_items() {
        let dir = tempfile::tempdir().unwrap();
        let pool = pool(dir.path(), 2, Arc::new(FakeFetcher::default()));
        pool.cancellation_token().cancel();

        let report = pool.run_all("Mix", items(3)).await;

        assert_eq!(report.failed.len(), 3);
        assert!(report.failed.iter().all(|f| f.error.is_cancelled()));
    }

    #[tokio::test]
    async fn events_follow_item_lifecycle() {
        let dir = tempfile::tempdir().unwrap();
        let emitter = Arc::new(RecordingEmitter::default());
        let fetcher = Arc::new(FakeFetcher {
            failing: vec!["id2".to_string()],
            ..Default::default()
        });
        let pool = pool(dir.path(), 1, fetcher).with_emitter(emitter.clone());

        pool.run_all("Mix", items(2)).await;

        let kinds: Vec<_> = emitter
            .events()
            .iter()
            .map(|e| match e {
                DownloadEvent::ItemStarted { .. } => "started",
                DownloadEvent::ItemCompleted { .. } => "completed",
                DownloadEvent::ItemFailed { .. } => "failed",
                DownloadEvent::ItemSkipped { .. } => "skipped",
                DownloadEvent::ItemProgress { .. } => "progress",
            })
            .collect();
        assert_eq!(kinds, ["started", "completed", "started", "failed"]);
    }

    /// Writes a part file, then never finishes.
    struct StuckFetcher;

    #[async_trait]
    impl ItemFetcher for StuckFetcher {
        async fn fetch(&self, task: &DownloadTask) -> DownloadResult<u64> {
            let part = part_path(&task.destination, &task.item.id);
            std::fs::create_dir_all(part.parent().unwrap()).unwrap();
            std::fs::write(&part, b"partial").unwrap();
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn cancelled_item_removes_its_part_file() {
        let dir = tempfile::tempdir().unwrap();
        let pool = DownloadPool::new(
            DownloadConfig::new(dir.path()).with_workers(1),
            Arc::new(StuckFetcher),
        )
        .unwrap();
        let token = pool.cancellation_token();
        let destination = dir.path().join("Mix").join("Song.mp4");
        let part = part_path(&destination, "abc");

        let canceller = async {
            while !part.exists() {
                tokio::time::sleep(Duration::from_millis(1)).await;
            }
            token.cancel();
        };
        let (report, ()) = tokio::join!(
            pool.run_all("Mix", vec![Item::new("abc", "Song")]),
            canceller
        );

        assert_eq!(report.failed.len(), 1);
        assert!(report.failed[0].error.is_cancelled());
        assert!(!part.exists());
        assert!(!destination.exists());
    }

    #[test]
    fn collisions_are_counted() {
        let layout = OutputLayout::collection(Path::new("/out"), "Mix");
        let items = vec![
            Item::new("a", "Intro"),
            Item::new("b", "Intro"),
            Item::new("c", "Outro"),
            Item::new("", "Intro"),
        ];
        assert_eq!(warn_on_collisions(&layout, &items), 1);
    }

    #[test]
    fn outcome_records_into_matching_list() {
        let mut report = PoolReport::default();
        Outcome::Skipped(SkippedItem {
            item: Item::new("a", "A"),
            reason: SkipReason::AlreadyExists,
        })
        .record(&mut report);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.total(), 1);
    }
}
