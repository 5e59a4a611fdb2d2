use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::{decode_page, FetchError, Page, PageSource};
use crate::config::Config;
use crate::constants::{PAGE_SIZE, POST_FIELDS, THUMBNAIL_FIELD, USER_AGENT};

/// Client for the business discovery endpoint.
pub struct GraphClient {
    client: Client,
    endpoint: String,
    access_token: String,
    include_thumbnails: bool,
}

impl GraphClient {
    /// Create a client for the account configured in `config`.
    ///
    /// No request timeout is set; the HTTP client default applies.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(FetchError::Transport)?;

        Ok(Self {
            client,
            endpoint: config.discovery_url(),
            access_token: config.access_token.clone(),
            include_thumbnails: config.include_thumbnails,
        })
    }

    /// Issue one discovery request.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the API reports an error, or the
    /// body does not have the expected shape.
    pub async fn fetch(&self, username: &str, cursor: Option<&str>) -> Result<Page, FetchError> {
        let fields = fields_selector(username, cursor, self.include_thumbnails);
        debug!(username = %username, cursor = ?cursor, "Requesting media page");

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("fields", fields.as_str()),
                ("access_token", self.access_token.as_str()),
            ])
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.without_url()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.without_url()))?;

        decode_page(status, &body)
    }
}

#[async_trait]
impl PageSource for GraphClient {
    async fn fetch_page(&self, username: &str, cursor: Option<&str>) -> Result<Page, FetchError> {
        self.fetch(username, cursor).await
    }
}

/// Build the compound `fields` selector for one media page.
///
/// Produces e.g.
/// `business_discovery.username(alice){media.limit(25).after(XYZ){id,timestamp,...}}`.
#[must_use]
pub fn fields_selector(username: &str, cursor: Option<&str>, include_thumbnails: bool) -> String {
    let after = cursor.map(|c| format!(".after({c})")).unwrap_or_default();

    let mut fields = POST_FIELDS.join(",");
    if include_thumbnails {
        fields.push(',');
        fields.push_str(THUMBNAIL_FIELD);
    }

    format!("business_discovery.username({username}){{media.limit({PAGE_SIZE}){after}{{{fields}}}}}")
}
