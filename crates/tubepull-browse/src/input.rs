//! Classification of user-supplied URLs.

use tubepull_core::CollectionId;
use url::Url;

/// Query marker that identifies a collection URL.
const LIST_MARKER: &str = "list=";

/// Length of a bare video id.
const VIDEO_ID_LEN: usize = 11;

/// Whether the input names a collection rather than a single video.
///
/// Any input containing `list=` is treated as a collection, including watch
/// URLs that merely reference one.
pub fn is_collection_url(input: &str) -> bool {
    input.contains(LIST_MARKER)
}

/// Extract the collection id from a URL containing `list=`.
///
/// Returns `None` when the marker is missing or its value is empty.
pub fn parse_collection_id(input: &str) -> Option<CollectionId> {
    if let Ok(url) = Url::parse(input) {
        if let Some((_, value)) = url.query_pairs().find(|(key, _)| key == "list") {
            return (!value.is_empty()).then(|| CollectionId::new(value.into_owned()));
        }
    }

    // Not an absolute URL: take everything after the marker up to the next
    // parameter separator.
    let start = input.find(LIST_MARKER)? + LIST_MARKER.len();
    let value = input[start..].split(['&', '#']).next().unwrap_or_default();
    (!value.is_empty()).then(|| CollectionId::new(value))
}

/// Extract the video id from a watch URL, short link, or bare id.
///
/// Recognized forms: `watch?v=ID`, `youtu.be/ID`, `/shorts/ID`, `/embed/ID`,
/// `/live/ID`, and an 11-character id on its own.
pub fn extract_video_id(input: &str) -> Option<String> {
    let input = input.trim();
    if is_bare_video_id(input) {
        return Some(input.to_string());
    }

    let url = Url::parse(input).ok()?;

    if let Some((_, v)) = url.query_pairs().find(|(key, _)| key == "v") {
        return (!v.is_empty()).then(|| v.into_owned());
    }

    let mut segments = url.path_segments()?.filter(|s| !s.is_empty());
    let candidate = if url.host_str().is_some_and(|h| h.ends_with("youtu.be")) {
        segments.next()
    } else {
        match segments.next() {
            Some("shorts" | "embed" | "live" | "v") => segments.next(),
            _ => None,
        }
    };

    candidate.filter(|id| !id.is_empty()).map(ToString::to_string)
}

/// Canonical watch URL for a video id.
pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={video_id}")
}

fn is_bare_video_id(input: &str) -> bool {
    input.len() == VIDEO_ID_LEN
        && input
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_collection_url() {
        assert!(is_collection_url(
            "https://www.youtube.com/playlist?list=PLx0sYbCqOb8TBPRdmBHs5Iftvv9TPboYG"
        ));
        assert!(is_collection_url(
            "https://www.youtube.com/watch?v=abc&list=PLfoo"
        ));
        assert!(!is_collection_url(
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ"
        ));
    }

    #[test]
    fn test_parse_collection_id() {
        let id = parse_collection_id("https://www.youtube.com/playlist?list=PLabc_123").unwrap();
        assert_eq!(id.as_str(), "PLabc_123");

        let id = parse_collection_id("https://www.youtube.com/watch?v=x&list=PLmix&index=2").unwrap();
        assert_eq!(id.as_str(), "PLmix");

        let id = parse_collection_id("youtube.com/playlist?list=PLnoscheme&pp=1").unwrap();
        assert_eq!(id.as_str(), "PLnoscheme");
    }

    #[test]
    fn test_parse_collection_id_missing() {
        assert!(parse_collection_id("https://www.youtube.com/playlist?list=").is_none());
        assert!(parse_collection_id("https://www.youtube.com/watch?v=abc").is_none());
    }

    #[test]
    fn test_extract_video_id_forms() {
        let expected = Some("dQw4w9WgXcQ".to_string());
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            expected
        );
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?feature=share&v=dQw4w9WgXcQ"),
            expected
        );
        assert_eq!(extract_video_id("https://youtu.be/dQw4w9WgXcQ?t=42"), expected);
        assert_eq!(
            extract_video_id("https://www.youtube.com/shorts/dQw4w9WgXcQ"),
            expected
        );
        assert_eq!(
            extract_video_id("https://www.youtube.com/embed/dQw4w9WgXcQ"),
            expected
        );
        assert_eq!(extract_video_id("  dQw4w9WgXcQ "), expected);
    }

    #[test]
    fn test_extract_video_id_rejects_other_input() {
        assert_eq!(extract_video_id("https://www.youtube.com/feed/trending"), None);
        assert_eq!(extract_video_id("not a url"), None);
        assert_eq!(extract_video_id(""), None);
    }

    #[test]
    fn test_watch_url() {
        assert_eq!(
            watch_url("dQw4w9WgXcQ"),
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ"
        );
        assert_eq!(
            extract_video_id(&watch_url("dQw4w9WgXcQ")).as_deref(),
            Some("dQw4w9WgXcQ")
        );
    }
}
