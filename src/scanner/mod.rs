//! Feed scanner: walks a creator's media feed page by page and sums reel
//! views until the stop post is reached or the feed runs out.

mod error;
mod normalize;
mod result;

use tracing::{debug, info, warn};

pub use error::ScanError;
pub use normalize::{matches_target, strip_query};
pub use result::{ScanOutcome, ScanResult};

use crate::config::Config;
use crate::graph::{FetchError, GraphClient, PageSource, Post};
use crate::throttle::{FixedDelay, Throttle};

/// Characters of the stop post's caption shown when it is found.
const STOP_CAPTION_PREVIEW: usize = 20;

/// States of the scan loop. A failed fetch returns straight out of the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Scanning,
    FoundTarget,
    NoMorePages,
}

pub struct Scanner<S, T = FixedDelay> {
    source: S,
    throttle: T,
}

impl Scanner<GraphClient, FixedDelay> {
    /// Build a scanner backed by the Graph API using `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn from_config(config: &Config) -> Result<Self, FetchError> {
        Ok(Self::new(
            GraphClient::new(config)?,
            FixedDelay::new(config.page_delay),
        ))
    }
}

impl<S: PageSource, T: Throttle> Scanner<S, T> {
    #[must_use]
    pub const fn new(source: S, throttle: T) -> Self {
        Self { source, throttle }
    }

    /// Sum views of every reel newer than the post at `stop_url`.
    ///
    /// The stop post itself is never counted. Non-video posts are skipped but
    /// can still act as the stop post.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::MissingInput`] for an empty username or stop URL and
    /// [`ScanError::Aborted`], carrying the partial totals, when a page fetch fails.
    pub async fn scan(&self, username: &str, stop_url: &str) -> Result<ScanResult, ScanError> {
        let username = username.trim().trim_start_matches('@');
        if username.is_empty() {
            return Err(ScanError::MissingInput { field: "username" });
        }
        let target = strip_query(stop_url.trim());
        if target.is_empty() {
            return Err(ScanError::MissingInput { field: "stop_url" });
        }

        info!(username = %username, target = %target, "Scanning feed");

        let mut result = ScanResult::default();
        let mut cursor: Option<String> = None;
        let mut state = ScanState::Scanning;

        while state == ScanState::Scanning {
            debug!(page = result.pages_fetched() + 1, cursor = ?cursor, "Fetching page");
            let page = match self.source.fetch_page(username, cursor.as_deref()).await {
                Ok(page) => page,
                Err(source) => {
                    warn!(
                        reels = result.scanned_count(),
                        views = result.total_views(),
                        "Scan stopped: {source}"
                    );
                    return Err(ScanError::Aborted {
                        source,
                        partial: result,
                    });
                }
            };
            result.record_page();

            if scan_page(&mut result, page.posts, target) {
                state = ScanState::FoundTarget;
                continue;
            }

            match page.next_cursor {
                Some(next) if cursor.as_deref() == Some(next.as_str()) => {
                    warn!(cursor = %next, "API returned the same cursor again, treating feed as exhausted");
                    state = ScanState::NoMorePages;
                }
                Some(next) => {
                    cursor = Some(next);
                    self.throttle.wait().await;
                }
                None => state = ScanState::NoMorePages,
            }
        }

        if state == ScanState::NoMorePages {
            info!(
                reels = result.scanned_count(),
                views = result.total_views(),
                "End of feed reached without finding the stop post"
            );
        }

        Ok(result)
    }
}

/// Accumulate one page into `result`. Returns `true` once the stop post is hit.
fn scan_page(result: &mut ScanResult, posts: Vec<Post>, target: &str) -> bool {
    for post in posts {
        if matches_target(&post.permalink, target) {
            info!(
                caption = %post.caption_prefix(STOP_CAPTION_PREVIEW),
                reels = result.scanned_count(),
                views = result.total_views(),
                "Found stopping point"
            );
            result.mark_found();
            return true;
        }

        if post.is_video() {
            info!(views = post.view_count, date = %post.date(), "Scanned reel");
            result.add_reel(post);
        }
    }
    false
}
