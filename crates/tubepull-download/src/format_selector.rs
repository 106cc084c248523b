//! Format selection logic.
//!
//! Centralizes the rule for choosing which stream of a video to download so
//! the single-item and collection paths cannot drift apart.
//!
//! # Selection Rules
//!
//! 1. Only progressive candidates are eligible: the stream must carry audio
//!    and have a non-empty quality label.
//! 2. Eligible candidates are ranked by the numeric part of the label
//!    (`"1080p"` ranks 1080). Labels that do not parse rank 0.
//! 3. The highest rank wins; on a tie the earliest candidate wins.
//! 4. No eligible candidate is an error: only separate audio and video
//!    streams exist and merging them is not supported.

use std::fmt;

use tubepull_core::{CandidateStream, DownloadError, SelectedStream};

/// Unit suffix on quality labels.
const LABEL_SUFFIX: char = 'p';

/// Error details for format selection failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// No candidate has both audio and a quality label.
    NoEligibleFormat {
        /// How many candidates were inspected.
        candidates: usize,
    },
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoEligibleFormat { candidates } => write!(
                f,
                "None of {candidates} candidate streams carries both audio and video"
            ),
        }
    }
}

impl std::error::Error for SelectionError {}

impl SelectionError {
    /// Attach the video id and convert into a download error.
    pub fn into_download_error(self, video_id: &str) -> DownloadError {
        match self {
            Self::NoEligibleFormat { candidates } => DownloadError::NoEligibleFormat {
                video_id: video_id.to_string(),
                candidates,
            },
        }
    }
}

impl From<SelectionError> for DownloadError {
    fn from(err: SelectionError) -> Self {
        err.into_download_error("")
    }
}

/// Numeric rank of a quality label.
///
/// Strips one trailing `p` and parses the rest; anything else ranks 0 so an
/// unparseable label can never beat a real resolution.
pub fn parse_rank(label: &str) -> u32 {
    let label = label.trim();
    label
        .strip_suffix(LABEL_SUFFIX)
        .unwrap_or(label)
        .parse()
        .unwrap_or(0)
}

fn is_eligible(candidate: &CandidateStream) -> bool {
    candidate.has_audio && !candidate.quality_label.is_empty()
}

/// Pick the best progressive candidate.
///
/// # Errors
///
/// Returns `NoEligibleFormat` when no candidate has audio and a label,
/// including when `candidates` is empty.
pub fn select_best(candidates: &[CandidateStream]) -> Result<SelectedStream, SelectionError> {
    let mut best: Option<(&CandidateStream, u32)> = None;

    for candidate in candidates.iter().filter(|c| is_eligible(c)) {
        let rank = parse_rank(&candidate.quality_label);
        // Strictly greater keeps the first of equal ranks.
        if best.is_none_or(|(_, best_rank)| rank > best_rank) {
            best = Some((candidate, rank));
        }
    }

    best.map(|(stream, rank)| SelectedStream {
        stream: stream.clone(),
        rank,
    })
    .ok_or(SelectionError::NoEligibleFormat {
        candidates: candidates.len(),
    })
}
