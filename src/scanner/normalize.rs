/// Drop the query string (everything from the first `?`) from a URL.
#[must_use]
pub fn strip_query(url: &str) -> &str {
    url.split_once('?').map_or(url, |(head, _)| head)
}

/// Whether a post's permalink points at the stop target.
///
/// `target` is expected to be query-stripped already. This is a substring
/// match, so a target of `/reel/12` also matches `/reel/123`.
#[must_use]
pub fn matches_target(permalink: &str, target: &str) -> bool {
    strip_query(permalink).contains(target)
}
