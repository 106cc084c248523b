//! Destination path planning for downloads.
//!
//! Single videos land in `<out>/output.mp4`. Collection items land in
//! `<out>/<collection>/<title>.mp4`, with both names sanitized.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tubepull_core::Item;

/// File name used for single-video downloads.
pub const SINGLE_OUTPUT_NAME: &str = "output.mp4";

/// Extension of downloaded files.
const MEDIA_EXTENSION: &str = "mp4";

/// Suffix of in-progress files.
const PART_SUFFIX: &str = ".part";

/// Make a title safe to use as a single path component.
///
/// Path separators (`/` and `\`) become `_`, then surrounding whitespace is
/// trimmed. `.` and `..` sanitize to the empty string so callers fall back
/// to an id. Nothing else is altered.
pub fn sanitize_filename(name: &str) -> String {
    let name = name.replace(['/', '\\'], "_");
    match name.trim() {
        "." | ".." => String::new(),
        trimmed => trimmed.to_string(),
    }
}

/// Directory name for a collection: its sanitized title, or its id when the
/// title sanitizes to nothing.
pub fn collection_dir_name(title: &str, collection_id: &str) -> String {
    let name = sanitize_filename(title);
    if name.is_empty() {
        sanitize_filename(collection_id)
    } else {
        name
    }
}

/// Where downloads are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputLayout {
    /// One video, fixed file name.
    Single {
        /// Output directory
        root: PathBuf,
    },
    /// Items of one collection, one file per item.
    Collection {
        /// `<out>/<collection>`
        dir: PathBuf,
    },
}

impl OutputLayout {
    /// Layout for a single video under `root`.
    pub fn single(root: impl Into<PathBuf>) -> Self {
        Self::Single { root: root.into() }
    }

    /// Layout for a collection under `root`.
    ///
    /// `dir_name` is sanitized again here; pass the result of
    /// [`collection_dir_name`].
    pub fn collection(root: &Path, dir_name: &str) -> Self {
        Self::Collection {
            dir: root.join(sanitize_filename(dir_name)),
        }
    }

    /// Directory that holds the files of this layout.
    pub fn dir(&self) -> &Path {
        match self {
            Self::Single { root } => root,
            Self::Collection { dir } => dir,
        }
    }

    /// Destination file for an item.
    ///
    /// Deterministic in the layout and the item alone. A title that sanitizes
    /// to nothing falls back to the item id.
    pub fn item_path(&self, item: &Item) -> PathBuf {
        match self {
            Self::Single { root } => root.join(SINGLE_OUTPUT_NAME),
            Self::Collection { dir } => {
                let mut stem = sanitize_filename(&item.title);
                if stem.is_empty() {
                    stem = sanitize_filename(&item.id);
                }
                dir.join(format!("{stem}.{MEDIA_EXTENSION}"))
            }
        }
    }
}

/// Whether `path` names an existing regular file.
///
/// Directories and missing paths do not count.
pub async fn destination_exists(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .is_ok_and(|meta| meta.is_file())
}

/// In-progress sibling of a destination (`<dest>.<item_id>.part`).
///
/// Keyed by item so two items sharing a destination never write the same
/// temporary file; the later rename replaces the earlier one.
pub fn part_path(destination: &Path, item_id: &str) -> PathBuf {
    let mut name: OsString = destination.as_os_str().to_owned();
    name.push(".");
    name.push(sanitize_filename(item_id));
    name.push(PART_SUFFIX);
    PathBuf::from(name)
}
