//! Integration tests for the feed scanning loop, driven by a scripted page source.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reel_view_tracker::graph::{FetchError, MediaType, Page, PageSource, Post};
use reel_view_tracker::scanner::{ScanError, ScanOutcome, Scanner};
use reel_view_tracker::throttle::Throttle;

/// Page source that replays a fixed list of responses and records cursors.
#[derive(Default)]
struct ScriptedSource {
    pages: Mutex<VecDeque<Result<Page, FetchError>>>,
    cursors: Mutex<Vec<Option<String>>>,
}

impl ScriptedSource {
    fn new(pages: Vec<Result<Page, FetchError>>) -> Self {
        Self {
            pages: Mutex::new(pages.into()),
            cursors: Mutex::default(),
        }
    }

    fn requested_cursors(&self) -> Vec<Option<String>> {
        self.cursors.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageSource for ScriptedSource {
    async fn fetch_page(&self, _username: &str, cursor: Option<&str>) -> Result<Page, FetchError> {
        self.cursors.lock().unwrap().push(cursor.map(String::from));
        self.pages
            .lock()
            .unwrap()
            .pop_front()
            .expect("scanner requested more pages than scripted")
    }
}

/// Throttle that only counts how often it was asked to wait.
#[derive(Default)]
struct CountingThrottle(AtomicUsize);

#[async_trait]
impl Throttle for CountingThrottle {
    async fn wait(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

fn reel(id: &str, views: u64) -> Post {
    post(id, MediaType::Video, views)
}

fn post(id: &str, media_type: MediaType, views: u64) -> Post {
    Post {
        id: id.to_string(),
        timestamp: "2024-05-01T12:00:00+0000".to_string(),
        caption: Some(format!("caption {id}")),
        media_type,
        view_count: views,
        like_count: 3,
        permalink: format!("https://www.instagram.com/reel/{id}/?igsh=abc"),
        thumbnail_url: None,
    }
}

fn page(posts: Vec<Post>, next: Option<&str>) -> Result<Page, FetchError> {
    Ok(Page {
        posts,
        next_cursor: next.map(String::from),
    })
}

fn scanner(
    pages: Vec<Result<Page, FetchError>>,
) -> (
    Scanner<Arc<ScriptedSource>, Arc<CountingThrottle>>,
    Arc<ScriptedSource>,
    Arc<CountingThrottle>,
) {
    let source = Arc::new(ScriptedSource::new(pages));
    let throttle = Arc::new(CountingThrottle::default());
    (
        Scanner::new(Arc::clone(&source), Arc::clone(&throttle)),
        source,
        throttle,
    )
}

const STOP_URL: &str = "https://www.instagram.com/reel/STOP/";

#[tokio::test]
async fn test_stops_at_target_and_excludes_later_posts() {
    let (scanner, source, _) = scanner(vec![page(
        vec![reel("A", 100), reel("B", 50), reel("STOP", 10), reel("C", 999)],
        Some("next"),
    )]);

    let result = scanner.scan("creator", STOP_URL).await.unwrap();

    assert_eq!(result.total_views(), 150);
    assert_eq!(result.scanned_count(), 2);
    assert!(result.found_target());
    assert_eq!(result.outcome(), ScanOutcome::ReachedTarget);
    let ids: Vec<_> = result.reels().iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["A", "B"]);
    // Target found, so the next page is never requested.
    assert_eq!(source.requested_cursors().len(), 1);
}

#[tokio::test]
async fn test_target_is_most_recent_post() {
    let (scanner, _, _) = scanner(vec![page(vec![reel("STOP", 10), reel("A", 5)], None)]);

    let result = scanner.scan("creator", STOP_URL).await.unwrap();

    assert_eq!(result.total_views(), 0);
    assert_eq!(result.scanned_count(), 0);
    assert!(result.found_target());
    assert_eq!(result.outcome(), ScanOutcome::TargetIsLatest);
}

#[tokio::test]
async fn test_target_on_later_page() {
    let (scanner, source, throttle) = scanner(vec![
        page(vec![reel("A", 10), reel("B", 20)], Some("c1")),
        page(vec![reel("C", 30)], Some("c2")),
        page(vec![reel("D", 40), reel("STOP", 1), reel("E", 1)], Some("c3")),
    ]);

    let result = scanner.scan("creator", STOP_URL).await.unwrap();

    assert_eq!(result.total_views(), 100);
    assert_eq!(result.scanned_count(), 4);
    assert_eq!(result.pages_fetched(), 3);
    assert_eq!(
        source.requested_cursors(),
        vec![None, Some("c1".to_string()), Some("c2".to_string())]
    );
    // One pause before each page after the first.
    assert_eq!(throttle.0.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_feed_exhausted_without_match() {
    let (scanner, _, _) = scanner(vec![
        page(vec![reel("A", 10), reel("B", 0)], Some("c1")),
        page(vec![reel("C", 5)], None),
    ]);

    let result = scanner.scan("creator", STOP_URL).await.unwrap();

    assert!(!result.found_target());
    assert_eq!(result.total_views(), 15);
    assert_eq!(result.scanned_count(), 3);
    assert_eq!(result.outcome(), ScanOutcome::FeedExhausted);
}

#[tokio::test]
async fn test_no_reels_and_no_match_is_ambiguous_outcome() {
    let (scanner, _, _) = scanner(vec![page(
        vec![post("IMG", MediaType::Image, 42)],
        None,
    )]);

    let result = scanner.scan("creator", STOP_URL).await.unwrap();

    assert!(!result.found_target());
    assert_eq!(result.scanned_count(), 0);
    assert_eq!(result.outcome(), ScanOutcome::NothingFound);
}

#[tokio::test]
async fn test_non_video_posts_excluded() {
    let (scanner, _, _) = scanner(vec![page(
        vec![
            post("I1", MediaType::Image, 1000),
            reel("V1", 10),
            post("C1", MediaType::CarouselAlbum, 2000),
            reel("V2", 20),
            post("O1", MediaType::Other, 3000),
        ],
        None,
    )]);

    let result = scanner.scan("creator", STOP_URL).await.unwrap();

    assert_eq!(result.total_views(), 30);
    assert_eq!(result.scanned_count(), 2);
    assert!(result.reels().iter().all(Post::is_video));
}

#[tokio::test]
async fn test_sum_matches_reels() {
    let posts: Vec<Post> = (0..25u64).map(|i| reel(&format!("R{i}"), i * 7)).collect();
    let expected: u64 = posts.iter().map(|p| p.view_count).sum();
    let (scanner, _, _) = scanner(vec![page(posts, None)]);

    let result = scanner.scan("creator", STOP_URL).await.unwrap();

    assert_eq!(result.total_views(), expected);
    assert_eq!(result.scanned_count(), 25);
    assert_eq!(
        result.total_views(),
        result.reels().iter().map(|p| p.view_count).sum::<u64>()
    );
}

#[tokio::test]
async fn test_huge_view_counts_do_not_overflow() {
    let (scanner, _, _) = scanner(vec![page(
        vec![reel("A", u64::MAX / 2 + 1), reel("B", u64::MAX / 2 + 1)],
        None,
    )]);

    let result = scanner.scan("creator", STOP_URL).await.unwrap();

    assert_eq!(result.total_views(), u64::MAX);
    assert_eq!(result.scanned_count(), 2);
}

#[tokio::test]
async fn test_remote_error_keeps_partial_totals() {
    let (scanner, _, _) = scanner(vec![
        page(vec![reel("A", 50), reel("B", 30)], Some("c1")),
        Err(FetchError::Remote {
            message: "Application request limit reached".to_string(),
            code: Some(4),
            kind: Some("OAuthException".to_string()),
        }),
    ]);

    let err = scanner.scan("creator", STOP_URL).await.unwrap_err();

    let partial = err.partial().expect("partial result");
    assert_eq!(partial.total_views(), 80);
    assert_eq!(partial.scanned_count(), 2);
    assert!(!partial.found_target());
    match err {
        ScanError::Aborted { source, .. } => {
            assert!(source.is_remote());
            assert!(source.to_string().contains("Application request limit reached"));
        }
        ScanError::MissingInput { .. } => panic!("expected aborted scan"),
    }
}

#[tokio::test]
async fn test_malformed_page_aborts_scan() {
    let (scanner, _, _) = scanner(vec![Err(FetchError::Malformed(
        "missing business_discovery".to_string(),
    ))]);

    let err = scanner.scan("creator", STOP_URL).await.unwrap_err();

    assert!(matches!(
        err,
        ScanError::Aborted {
            source: FetchError::Malformed(_),
            ..
        }
    ));
    assert_eq!(err.partial().unwrap().scanned_count(), 0);
    assert!(err.to_string().contains("check the account identifier"));
}

#[tokio::test]
async fn test_missing_input_rejected_before_fetch() {
    let (scanner, source, _) = scanner(vec![]);

    let err = scanner.scan("", STOP_URL).await.unwrap_err();
    assert!(matches!(err, ScanError::MissingInput { field: "username" }));

    let err = scanner.scan("creator", "   ").await.unwrap_err();
    assert!(matches!(err, ScanError::MissingInput { field: "stop_url" }));

    let err = scanner.scan("creator", "?utm_source=x").await.unwrap_err();
    assert!(matches!(err, ScanError::MissingInput { field: "stop_url" }));
    assert!(err.partial().is_none());

    assert!(source.requested_cursors().is_empty());
}

#[tokio::test]
async fn test_stop_url_query_is_ignored() {
    let (scanner, _, _) = scanner(vec![page(vec![reel("A", 5), reel("STOP", 1)], None)]);

    let result = scanner
        .scan("creator", "https://www.instagram.com/reel/STOP/?utm_source=ig_web_copy_link")
        .await
        .unwrap();

    assert!(result.found_target());
    assert_eq!(result.total_views(), 5);
}

#[tokio::test]
async fn test_repeated_cursor_ends_scan() {
    let (scanner, source, _) = scanner(vec![
        page(vec![reel("A", 1)], Some("same")),
        page(vec![reel("B", 2)], Some("same")),
    ]);

    let result = scanner.scan("creator", STOP_URL).await.unwrap();

    assert_eq!(result.total_views(), 3);
    assert!(!result.found_target());
    assert_eq!(source.requested_cursors().len(), 2);
}
