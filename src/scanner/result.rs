use crate::graph::Post;

/// Totals accumulated over one scan.
///
/// `total_views` equals the sum of `view_count` over `reels`, saturating at
/// `u64::MAX`, and `scanned_count` equals `reels.len()`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanResult {
    total_views: u64,
    scanned_count: usize,
    found_target: bool,
    pages_fetched: u32,
    reels: Vec<Post>,
}

/// How a finished scan should be reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    /// Stop post found after counting at least one reel.
    ReachedTarget,
    /// Stop post is the most recent post; nothing newer to count.
    TargetIsLatest,
    /// Feed ran out before the stop post was seen.
    FeedExhausted,
    /// Feed ran out without the stop post and without any reels. Either the
    /// target does not exist or the account has no reels newer than it.
    NothingFound,
}

impl ScanResult {
    #[must_use]
    pub fn total_views(&self) -> u64 {
        self.total_views
    }

    #[must_use]
    pub fn scanned_count(&self) -> usize {
        self.scanned_count
    }

    #[must_use]
    pub fn found_target(&self) -> bool {
        self.found_target
    }

    #[must_use]
    pub fn pages_fetched(&self) -> u32 {
        self.pages_fetched
    }

    /// Counted reels in feed order, newest first.
    #[must_use]
    pub fn reels(&self) -> &[Post] {
        &self.reels
    }

    #[must_use]
    pub fn outcome(&self) -> ScanOutcome {
        match (self.found_target, self.scanned_count) {
            (true, 0) => ScanOutcome::TargetIsLatest,
            (true, _) => ScanOutcome::ReachedTarget,
            (false, 0) => ScanOutcome::NothingFound,
            (false, _) => ScanOutcome::FeedExhausted,
        }
    }

    pub(super) fn record_page(&mut self) {
        self.pages_fetched += 1;
    }

    pub(crate) fn mark_found(&mut self) {
        self.found_target = true;
    }

    pub(crate) fn add_reel(&mut self, post: Post) {
        self.total_views = self.total_views.saturating_add(post.view_count);
        self.scanned_count += 1;
        self.reels.push(post);
    }
}
