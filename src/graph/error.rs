use thiserror::Error;

/// Failure to fetch or decode a single page of posts.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The API answered with an explicit error payload.
    #[error("Graph API error: {message}")]
    Remote {
        message: String,
        code: Option<i64>,
        kind: Option<String>,
    },
    /// The response did not have the expected `business_discovery.media` shape.
    #[error("could not read data, check the account identifier ({0})")]
    Malformed(String),
    /// Non-success HTTP status without an error payload.
    #[error("Graph API request failed with status {0}")]
    Status(u16),
    #[error("Graph API request failed: {0}")]
    Transport(#[source] reqwest::Error),
}

impl FetchError {
    /// Whether the failure came from the remote service rather than from decoding.
    #[must_use]
    pub const fn is_remote(&self) -> bool {
        matches!(self, Self::Remote { .. } | Self::Status(_))
    }
}
