//! Listing source trait for the remote vacancy API.

use async_trait::async_trait;

use crate::error::FetchResult;
use crate::types::config::SearchQuery;
use crate::types::listing::{ListingDetail, SearchPage};

/// A remote source of vacancy listings.
///
/// Implementations issue exactly one request per call. Paging, capping and
/// failure handling live in the pipeline, not here.
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Fetch one page of search results.
    ///
    /// A non-success status must be reported as [`FetchError::Status`] so the
    /// pipeline can stop paging.
    ///
    /// [`FetchError::Status`]: crate::error::FetchError::Status
    async fn search_page(
        &self,
        query: &SearchQuery,
        page: u32,
        per_page: u32,
    ) -> FetchResult<SearchPage>;

    /// Fetch the detail record for one vacancy.
    async fn fetch_detail(&self, id: &str) -> FetchResult<ListingDetail>;

    /// Name of this source (for logging).
    fn name(&self) -> &str;
}

#[async_trait]
impl<T: ListingSource + ?Sized> ListingSource for std::sync::Arc<T> {
    async fn search_page(
        &self,
        query: &SearchQuery,
        page: u32,
        per_page: u32,
    ) -> FetchResult<SearchPage> {
        (**self).search_page(query, page, per_page).await
    }

    async fn fetch_detail(&self, id: &str) -> FetchResult<ListingDetail> {
        (**self).fetch_detail(id).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
