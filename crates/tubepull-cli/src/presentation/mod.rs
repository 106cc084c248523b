//! Terminal presentation: progress display and the run summary.

mod progress;
mod summary;

pub use progress::{TerminalProgress, discovery_spinner};
pub use summary::print_summary;
