use std::sync::Arc;

use async_trait::async_trait;

use super::{FetchError, Page};

/// Something that can hand out pages of a creator's feed.
///
/// [`super::GraphClient`] is the production implementation; tests script their own.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch one page of posts for `username`, starting after `cursor`.
    async fn fetch_page(&self, username: &str, cursor: Option<&str>) -> Result<Page, FetchError>;
}

#[async_trait]
impl<S: PageSource + ?Sized> PageSource for Arc<S> {
    async fn fetch_page(&self, username: &str, cursor: Option<&str>) -> Result<Page, FetchError> {
        (**self).fetch_page(username, cursor).await
    }
}
