//! Mock listing source for testing.
//!
//! Provides canned search pages and detail records with call tracking.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::error::{FetchError, FetchResult};
use crate::traits::source::ListingSource;
use crate::types::config::SearchQuery;
use crate::types::listing::{Listing, ListingDetail, SearchPage};

/// Mock listing source.
///
/// Pages are served by index; a page that was never configured answers
/// with status 404. Detail ids that were never configured answer with an
/// empty skill list.
///
/// # Example
///
/// ```rust
/// use vacancies::sources::MockSource;
/// use vacancies::types::listing::Listing;
///
/// let source = MockSource::paged(vec![Listing::new("1", "QA")], 50);
/// source.add_detail("1", ["SQL", "Git"]);
/// ```
#[derive(Default)]
pub struct MockSource {
    pages: Arc<RwLock<HashMap<u32, SearchPage>>>,
    page_failures: Arc<RwLock<HashMap<u32, u16>>>,
    details: Arc<RwLock<HashMap<String, ListingDetail>>>,
    detail_failures: Arc<RwLock<HashSet<String>>>,
    /// Page numbers requested, in order
    search_calls: Arc<RwLock<Vec<u32>>>,
    /// Detail ids requested, in order
    detail_calls: Arc<RwLock<Vec<String>>>,
}

impl MockSource {
    /// Create a new empty mock source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Split listings into pages of `page_size`, with `pages` set to the page count.
    pub fn paged(listings: Vec<Listing>, page_size: usize) -> Self {
        let source = Self::new();
        let page_size = page_size.max(1);
        let chunks: Vec<Vec<Listing>> = listings
            .chunks(page_size)
            .map(|chunk| chunk.to_vec())
            .collect();
        let total = chunks.len() as u32;

        for (index, items) in chunks.into_iter().enumerate() {
            source.set_page(
                index as u32,
                SearchPage {
                    found: listings.len() as u64,
                    items,
                    pages: total,
                },
            );
        }
        source
    }

    /// Serve `page` for the given page number.
    pub fn set_page(&self, number: u32, page: SearchPage) {
        self.pages.write().unwrap().insert(number, page);
    }

    /// Answer the given page number with a non-success status.
    pub fn fail_page(&self, number: u32, status: u16) {
        self.page_failures.write().unwrap().insert(number, status);
    }

    /// Serve a detail record declaring these skills.
    pub fn add_detail<I, S>(&self, id: &str, skills: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut detail = ListingDetail::with_skills(skills);
        detail.id = Some(id.to_string());
        self.details.write().unwrap().insert(id.to_string(), detail);
    }

    /// Make the detail fetch for `id` fail with a transport error.
    pub fn fail_detail(&self, id: &str) {
        self.detail_failures.write().unwrap().insert(id.to_string());
    }

    /// Builder form of [`add_detail`](Self::add_detail).
    pub fn with_detail<I, S>(self, id: &str, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.add_detail(id, skills);
        self
    }

    /// Page numbers requested so far.
    pub fn search_calls(&self) -> Vec<u32> {
        self.search_calls.read().unwrap().clone()
    }

    /// Detail ids requested so far.
    pub fn detail_calls(&self) -> Vec<String> {
        self.detail_calls.read().unwrap().clone()
    }

    /// Get the number of detail fetches made.
    pub fn detail_call_count(&self) -> usize {
        self.detail_calls.read().unwrap().len()
    }

    /// Clear all recorded calls.
    pub fn reset_calls(&self) {
        self.search_calls.write().unwrap().clear();
        self.detail_calls.write().unwrap().clear();
    }
}

impl Clone for MockSource {
    fn clone(&self) -> Self {
        Self {
            pages: Arc::clone(&self.pages),
            page_failures: Arc::clone(&self.page_failures),
            details: Arc::clone(&self.details),
            detail_failures: Arc::clone(&self.detail_failures),
            search_calls: Arc::clone(&self.search_calls),
            detail_calls: Arc::clone(&self.detail_calls),
        }
    }
}

#[async_trait]
impl ListingSource for MockSource {
    async fn search_page(
        &self,
        _query: &SearchQuery,
        page: u32,
        _per_page: u32,
    ) -> FetchResult<SearchPage> {
        self.search_calls.write().unwrap().push(page);

        if let Some(status) = self.page_failures.read().unwrap().get(&page) {
            return Err(FetchError::Status {
                url: format!("mock://vacancies?page={page}"),
                status: *status,
            });
        }

        self.pages
            .read()
            .unwrap()
            .get(&page)
            .cloned()
            .ok_or_else(|| FetchError::Status {
                url: format!("mock://vacancies?page={page}"),
                status: 404,
            })
    }

    async fn fetch_detail(&self, id: &str) -> FetchResult<ListingDetail> {
        self.detail_calls.write().unwrap().push(id.to_string());

        if self.detail_failures.read().unwrap().contains(id) {
            return Err(FetchError::Http(
                format!("connection reset fetching {id}").into(),
            ));
        }

        Ok(self
            .details
            .read()
            .unwrap()
            .get(id)
            .cloned()
            .unwrap_or_default())
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Builder for test scenarios with the mock source.
pub struct MockSourceBuilder {
    listings: Vec<Listing>,
    page_size: usize,
    details: Vec<(String, Vec<String>)>,
}

impl MockSourceBuilder {
    pub fn new() -> Self {
        Self {
            listings: Vec::new(),
            page_size: 50,
            details: Vec::new(),
        }
    }

    /// Add a listing from `employer` whose detail declares `skills`.
    pub fn listing(mut self, id: &str, employer: &str, skills: &[&str]) -> Self {
        self.listings.push(
            Listing::new(id, format!("Vacancy {id}"))
                .with_employer(employer)
                .with_url(format!("https://hh.ru/vacancy/{id}")),
        );
        self.details
            .push((id.to_string(), skills.iter().map(|s| s.to_string()).collect()));
        self
    }

    /// Set the page size used to split listings.
    pub fn page_size(mut self, size: usize) -> Self {
        self.page_size = size;
        self
    }

    /// Build the mock source.
    pub fn build(self) -> MockSource {
        let source = MockSource::paged(self.listings, self.page_size);
        for (id, skills) in self.details {
            source.add_detail(&id, skills);
        }
        source
    }
}

impl Default for MockSourceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_paged_splits_listings() {
        let listings: Vec<_> = (0..5).map(|i| Listing::new(i.to_string(), "QA")).collect();
        let source = MockSource::paged(listings, 2);
        let query = SearchQuery::new("QA", "", "");

        let first = source.search_page(&query, 0, 2).await.unwrap();
        let last = source.search_page(&query, 2, 2).await.unwrap();

        assert_eq!(first.items.len(), 2);
        assert_eq!(first.pages, 3);
        assert_eq!(last.items.len(), 1);
        assert!(matches!(
            source.search_page(&query, 3, 2).await,
            Err(FetchError::Status { status: 404, .. })
        ));
        assert_eq!(source.search_calls(), vec![0, 2, 3]);
    }

    #[tokio::test]
    async fn test_details_and_failures() {
        let source = MockSourceBuilder::new()
            .listing("1", "Acme", &["SQL"])
            .build();
        source.fail_detail("2");

        let detail = source.fetch_detail("1").await.unwrap();
        assert_eq!(detail.skill_names(), vec!["SQL"]);
        assert!(source.fetch_detail("2").await.is_err());
        assert!(source.fetch_detail("3").await.unwrap().key_skills.is_empty());
        assert_eq!(source.detail_call_count(), 3);
    }
}
