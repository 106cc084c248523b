//! Download event emitter port.

use crate::download::DownloadEvent;

/// Port for emitting download events.
///
/// Called from worker tasks, so implementations must not block.
pub trait DownloadEventEmitterPort: Send + Sync {
    /// Emit a download event.
    fn emit(&self, event: DownloadEvent);
}

/// A no-op download event emitter for tests and quiet runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDownloadEmitter;

impl NoopDownloadEmitter {
    /// Create a new no-op download emitter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl DownloadEventEmitterPort for NoopDownloadEmitter {
    fn emit(&self, _event: DownloadEvent) {}
}
