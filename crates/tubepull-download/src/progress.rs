//! Progress throttling.
//!
//! Streams arrive in small chunks; emitting an event per chunk would flood
//! the progress display.

use std::time::{Duration, Instant};

/// Rate-limiter for progress events.
pub struct ProgressThrottle {
    last_emit: Option<Instant>,
    min_interval: Duration,
}

impl ProgressThrottle {
    /// Create a throttle with the specified minimum interval.
    pub const fn new(min_interval: Duration) -> Self {
        Self {
            last_emit: None,
            min_interval,
        }
    }

    /// Whether an event may be emitted at `now`. Records the emission if so.
    pub fn should_emit_at(&mut self, now: Instant) -> bool {
        match self.last_emit {
            Some(last) if now.saturating_duration_since(last) < self.min_interval => false,
            _ => {
                self.last_emit = Some(now);
                true
            }
        }
    }

    /// Whether an event may be emitted now.
    pub fn should_emit(&mut self) -> bool {
        self.should_emit_at(Instant::now())
    }
}

impl Default for ProgressThrottle {
    fn default() -> Self {
        Self::new(Duration::from_millis(200))
    }
}
