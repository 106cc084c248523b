//! Skip-existing behaviour end to end, through the stream fetcher.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tubepull_core::{
    CandidateStream, DownloadResult, Item, OpenedStream, SelectedStream, SkipReason, VideoInfo,
    VideoSourcePort,
};
use tubepull_download::{DownloadConfig, DownloadPool, ItemOutcome, StreamFetcher};

mockall::mock! {
    Source {}

    #[async_trait]
    impl VideoSourcePort for Source {
        async fn resolve_video(&self, url: &str) -> DownloadResult<VideoInfo>;
        async fn open_stream(
            &self,
            video: &VideoInfo,
            selected: &SelectedStream,
        ) -> DownloadResult<OpenedStream>;
    }
}

fn playable(url: &str) -> VideoInfo {
    VideoInfo {
        id: url.rsplit('=').next().unwrap_or_default().to_string(),
        title: "Clip".to_string(),
        author: None,
        candidates: vec![CandidateStream::new("360p", true).with_itag(18)],
    }
}

fn source_expecting(fetches: usize) -> MockSource {
    let mut source = MockSource::new();
    source
        .expect_resolve_video()
        .times(fetches)
        .returning(|url| Ok(playable(url)));
    source
        .expect_open_stream()
        .times(fetches)
        .returning(|_, _| {
            Ok(OpenedStream {
                reader: Box::new(&b"fresh"[..]),
                expected_total: 5,
            })
        });
    source
}

fn pool(out: &std::path::Path, skip_existing: bool, source: MockSource) -> DownloadPool {
    let fetcher = StreamFetcher::new(Arc::new(source), Duration::from_secs(5));
    DownloadPool::new(
        DownloadConfig::new(out).with_skip_existing(skip_existing),
        Arc::new(fetcher),
    )
    .unwrap()
}

#[tokio::test]
async fn second_single_run_is_a_no_op() {
    let dir = tempfile::tempdir().unwrap();
    let pool = pool(dir.path(), true, source_expecting(1));

    let first = pool.run_single(Item::new("abc", "")).await.unwrap();
    let second = pool.run_single(Item::new("abc", "")).await.unwrap();

    assert!(matches!(first, ItemOutcome::Completed(_)));
    match second {
        ItemOutcome::Skipped(skipped) => assert_eq!(skipped.reason, SkipReason::AlreadyExists),
        ItemOutcome::Completed(_) => panic!("second run should skip"),
    }
    assert_eq!(
        std::fs::read(dir.path().join("output.mp4")).unwrap(),
        b"fresh"
    );
}

#[tokio::test]
async fn existing_files_are_skipped_in_a_collection() {
    let dir = tempfile::tempdir().unwrap();
    let album = dir.path().join("Album");
    std::fs::create_dir_all(&album).unwrap();
    std::fs::write(album.join("Old.mp4"), b"kept").unwrap();

    let pool = pool(dir.path(), true, source_expecting(1));
    let report = pool
        .run_all(
            "Album",
            vec![Item::new("old", "Old"), Item::new("new", "New")],
        )
        .await;

    assert_eq!(report.completed.len(), 1);
    assert_eq!(report.completed[0].item.id, "new");
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].reason, SkipReason::AlreadyExists);
    assert_eq!(std::fs::read(album.join("Old.mp4")).unwrap(), b"kept");
}

#[tokio::test]
async fn existing_files_are_overwritten_without_skip() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("output.mp4"), b"stale").unwrap();

    let pool = pool(dir.path(), false, source_expecting(1));
    let outcome = pool.run_single(Item::new("abc", "")).await.unwrap();

    assert!(matches!(outcome, ItemOutcome::Completed(ref c) if c.bytes == 5));
    assert_eq!(
        std::fs::read(dir.path().join("output.mp4")).unwrap(),
        b"fresh"
    );
}

#[tokio::test]
async fn entries_without_id_never_reach_the_source() {
    let dir = tempfile::tempdir().unwrap();
    let pool = pool(dir.path(), false, source_expecting(0));

    let report = pool
        .run_all("Album", vec![Item::new("", "[Deleted video]")])
        .await;

    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].reason, SkipReason::MissingId);
    assert!(!report.has_failures());
}
