use chrono::{DateTime, NaiveDate};
use reqwest::StatusCode;
use serde::{Deserialize, Deserializer};

use super::FetchError;

/// Top-level body returned by the discovery endpoint.
///
/// Either `business_discovery` or `error` is present.
#[derive(Debug, Deserialize)]
pub struct DiscoveryEnvelope {
    pub business_discovery: Option<BusinessDiscovery>,
    pub error: Option<GraphApiError>,
}

#[derive(Debug, Deserialize)]
pub struct BusinessDiscovery {
    pub media: Option<MediaConnection>,
}

#[derive(Debug, Deserialize)]
pub struct MediaConnection {
    #[serde(default)]
    pub data: Vec<Post>,
    #[serde(default)]
    pub paging: Option<Paging>,
}

#[derive(Debug, Deserialize)]
pub struct Paging {
    #[serde(default)]
    pub cursors: Option<Cursors>,
}

#[derive(Debug, Deserialize)]
pub struct Cursors {
    pub after: Option<String>,
}

/// Error payload as reported by the Graph API.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphApiError {
    #[serde(default)]
    pub message: String,
    pub code: Option<i64>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

impl From<GraphApiError> for FetchError {
    fn from(err: GraphApiError) -> Self {
        Self::Remote {
            message: err.message,
            code: err.code,
            kind: err.kind,
        }
    }
}

/// Media type of a post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaType {
    Video,
    Image,
    CarouselAlbum,
    #[default]
    #[serde(other)]
    Other,
}

/// A single published post.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Post {
    #[serde(default)]
    pub id: String,
    /// ISO-8601 timestamp as sent by the API, e.g. `2024-05-01T12:00:00+0000`.
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub media_type: MediaType,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub view_count: u64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub like_count: u64,
    #[serde(default)]
    pub permalink: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
}

impl Post {
    #[must_use]
    pub fn is_video(&self) -> bool {
        self.media_type == MediaType::Video
    }

    /// Date portion (`YYYY-MM-DD`) of the timestamp.
    #[must_use]
    pub fn date(&self) -> &str {
        self.timestamp.get(..10).unwrap_or(&self.timestamp)
    }

    /// Calendar date the post was published on, if the timestamp parses.
    #[must_use]
    pub fn posted_on(&self) -> Option<NaiveDate> {
        DateTime::parse_from_str(&self.timestamp, "%Y-%m-%dT%H:%M:%S%z")
            .map(|dt| dt.date_naive())
            .or_else(|_| NaiveDate::parse_from_str(self.date(), "%Y-%m-%d"))
            .ok()
    }

    /// First `max_chars` characters of the caption.
    #[must_use]
    pub fn caption_prefix(&self, max_chars: usize) -> String {
        self.caption
            .as_deref()
            .unwrap_or_default()
            .chars()
            .take(max_chars)
            .collect()
    }
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u64>::deserialize(deserializer)?.unwrap_or_default())
}

/// One page of the media feed, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    pub posts: Vec<Post>,
    pub next_cursor: Option<String>,
}

impl DiscoveryEnvelope {
    /// Convert the envelope into a page, or the failure it describes.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Remote`] when an error payload is present and
    /// [`FetchError::Malformed`] when the media connection is missing.
    pub fn into_page(self) -> Result<Page, FetchError> {
        if let Some(err) = self.error {
            return Err(err.into());
        }

        let media = self
            .business_discovery
            .ok_or_else(|| FetchError::Malformed("missing business_discovery".to_string()))?
            .media
            .ok_or_else(|| FetchError::Malformed("missing business_discovery.media".to_string()))?;

        let next_cursor = media
            .paging
            .and_then(|p| p.cursors)
            .and_then(|c| c.after)
            .filter(|c| !c.is_empty());

        Ok(Page {
            posts: media.data,
            next_cursor,
        })
    }
}

/// Decode a raw response body into a page.
///
/// An error payload wins over the HTTP status, since the Graph API reports
/// most failures as 4xx responses carrying an `error` object.
///
/// # Errors
///
/// Returns the [`FetchError`] matching the response.
pub fn decode_page(status: StatusCode, body: &str) -> Result<Page, FetchError> {
    match serde_json::from_str::<DiscoveryEnvelope>(body) {
        Ok(envelope) => {
            if envelope.error.is_none() && !status.is_success() {
                return Err(FetchError::Status(status.as_u16()));
            }
            envelope.into_page()
        }
        Err(_) if !status.is_success() => Err(FetchError::Status(status.as_u16())),
        Err(e) => Err(FetchError::Malformed(e.to_string())),
    }
}
