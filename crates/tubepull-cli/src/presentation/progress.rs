//! `indicatif` rendering of download events.

use std::sync::Mutex;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tubepull_core::{DownloadEvent, DownloadEventEmitterPort};

const ITEMS_TEMPLATE: &str = "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}";
const BYTES_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec})";
const SPINNER_TEMPLATE: &str = "{spinner:.green} [{elapsed_precise}] {msg}";

fn style(template: &str, fallback: fn() -> ProgressStyle) -> ProgressStyle {
    ProgressStyle::with_template(template).map_or_else(|_| fallback(), |s| s.progress_chars("█▓░"))
}

/// Spinner shown while a collection is being crawled.
pub fn discovery_spinner(message: impl Into<String>) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(style(SPINNER_TEMPLATE, ProgressStyle::default_spinner));
    pb.set_message(message.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

enum Mode {
    /// One tick per finished item.
    Items,
    /// Byte progress of a single item.
    Bytes,
}

/// Event emitter that drives a terminal progress bar.
///
/// Starts idle; call [`begin_items`](Self::begin_items) or
/// [`begin_bytes`](Self::begin_bytes) before a run. Events received while
/// idle are ignored.
#[derive(Default)]
pub struct TerminalProgress {
    bar: Mutex<Option<(ProgressBar, Mode)>>,
}

impl TerminalProgress {
    /// Create an idle progress display.
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a bar counting finished items out of `total`.
    pub fn begin_items(&self, total: u64) {
        let pb = ProgressBar::new(total);
        pb.set_style(style(ITEMS_TEMPLATE, ProgressStyle::default_bar));
        self.install(pb, Mode::Items);
    }

    /// Show a byte bar for a single download.
    pub fn begin_bytes(&self) {
        let pb = ProgressBar::new(0);
        pb.set_style(style(BYTES_TEMPLATE, ProgressStyle::default_bar));
        self.install(pb, Mode::Bytes);
    }

    /// Remove the bar from the terminal.
    pub fn finish(&self) {
        if let Some((pb, _)) = self.lock().take() {
            pb.finish_and_clear();
        }
    }

    fn install(&self, pb: ProgressBar, mode: Mode) {
        if let Some((old, _)) = self.lock().replace((pb, mode)) {
            old.finish_and_clear();
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<(ProgressBar, Mode)>> {
        self.bar
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl DownloadEventEmitterPort for TerminalProgress {
    fn emit(&self, event: DownloadEvent) {
        let guard = self.lock();
        let Some((pb, mode)) = guard.as_ref() else {
            return;
        };

        match (&event, mode) {
            (DownloadEvent::ItemStarted { title, id, .. }, Mode::Items) => {
                pb.set_message(if title.is_empty() { id.clone() } else { title.clone() });
            }
            (DownloadEvent::ItemProgress { downloaded, total, .. }, Mode::Bytes) => {
                if *total > 0 {
                    pb.set_length(*total);
                }
                pb.set_position(*downloaded);
            }
            (DownloadEvent::ItemFailed { id, error }, Mode::Items) => {
                pb.println(format!("✗ {id}: {error}"));
                pb.inc(1);
            }
            (DownloadEvent::ItemCompleted { .. } | DownloadEvent::ItemSkipped { .. }, Mode::Items) => {
                pb.inc(1);
            }
            _ => {}
        }
    }
}
