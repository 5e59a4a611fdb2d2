//! Plain-text rendering of scan results for the terminal.

use std::fmt::Write;

use crate::graph::Post;
use crate::scanner::{ScanOutcome, ScanResult};

const CAPTION_PREVIEW: usize = 40;

/// Format an integer with comma thousands separators.
#[must_use]
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// One-line status describing how the scan ended.
#[must_use]
pub fn render_outcome(result: &ScanResult) -> &'static str {
    match result.outcome() {
        ScanOutcome::ReachedTarget => "Found stopping point",
        ScanOutcome::TargetIsLatest => "Target URL is the most recent post, no newer reels",
        ScanOutcome::FeedExhausted => "End of feed reached without finding the stopping point",
        ScanOutcome::NothingFound => "No reels found or target URL is the most recent post.",
    }
}

fn caption_line(post: &Post) -> String {
    match post.caption {
        Some(_) => format!("{}...", post.caption_prefix(CAPTION_PREVIEW)),
        None => "No Caption".to_string(),
    }
}

/// Render the full report: headline total followed by one block per reel.
#[must_use]
pub fn render(result: &ScanResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", render_outcome(result));

    if result.reels().is_empty() {
        return out;
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", format_count(result.total_views()));
    let _ = writeln!(out, "Total Views across {} Reels", result.scanned_count());
    let _ = writeln!(out);
    let _ = writeln!(out, "Reels Included in Count ({})", result.scanned_count());

    for reel in result.reels() {
        let _ = writeln!(
            out,
            "- {} views | {}",
            format_count(reel.view_count),
            reel.date()
        );
        let _ = writeln!(out, "    Caption: {}", caption_line(reel));
        let _ = writeln!(out, "    Likes: {}", reel.like_count);
        let _ = writeln!(out, "    Link: {}", reel.permalink);
        if let Some(thumb) = &reel.thumbnail_url {
            let _ = writeln!(out, "    Thumbnail: {thumb}");
        }
    }

    out
}
