//! Shared work queue for the worker pool.

use std::collections::VecDeque;

use tokio::sync::Mutex;
use tubepull_core::Item;

/// FIFO of items waiting for a worker.
///
/// Filled once before the workers start; workers only pop. Each item is
/// handed to exactly one worker.
#[derive(Debug, Default)]
pub struct WorkQueue {
    items: Mutex<VecDeque<Item>>,
}

impl WorkQueue {
    /// Create a queue holding `items` in order.
    pub fn new(items: impl IntoIterator<Item = Item>) -> Self {
        Self {
            items: Mutex::new(items.into_iter().collect()),
        }
    }

    /// Take the next item, or `None` when the queue is drained.
    pub async fn pop(&self) -> Option<Item> {
        self.items.lock().await.pop_front()
    }

    /// Remove and return everything still queued.
    pub async fn drain(&self) -> Vec<Item> {
        self.items.lock().await.drain(..).collect()
    }
}
