//! Shared constants used across the application.

/// User agent string sent with every Graph API request.
pub const USER_AGENT: &str = concat!("reel-view-tracker/", env!("CARGO_PKG_VERSION"));

/// Default Graph API host.
pub const DEFAULT_GRAPH_API_URL: &str = "https://graph.facebook.com";

/// Default Graph API version path segment.
pub const DEFAULT_GRAPH_API_VERSION: &str = "v24.0";

/// Number of posts requested per page.
pub const PAGE_SIZE: u32 = 25;

/// Fields requested for every post.
pub const POST_FIELDS: &[&str] = &[
    "id",
    "timestamp",
    "caption",
    "media_type",
    "view_count",
    "like_count",
    "permalink",
];

/// Extra field requested when thumbnails are enabled.
pub const THUMBNAIL_FIELD: &str = "thumbnail_url";

/// Default politeness delay between page fetches, in milliseconds.
pub const DEFAULT_PAGE_DELAY_MS: u64 = 100;
