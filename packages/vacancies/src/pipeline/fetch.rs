//! Bounded pagination over the search endpoint.

use tracing::{debug, info, warn};

use crate::traits::source::ListingSource;
use crate::types::config::SearchQuery;
use crate::types::listing::Listing;

/// Page through search results until `batch_cap` listings are collected.
///
/// Stops when the cap is reached, when the last declared page has been read,
/// or on the first failed page. A failed page is not an error: whatever was
/// accumulated before it is returned. The result never exceeds `batch_cap`.
pub async fn fetch_listings<S>(
    source: &S,
    query: &SearchQuery,
    batch_cap: usize,
    per_page: u32,
) -> Vec<Listing>
where
    S: ListingSource + ?Sized,
{
    let mut listings: Vec<Listing> = Vec::new();
    let mut page: u32 = 0;

    while listings.len() < batch_cap {
        debug!(source = source.name(), page, per_page, "Requesting search page");

        let result = match source.search_page(query, page, per_page).await {
            Ok(result) => result,
            Err(e) => {
                warn!(
                    source = source.name(),
                    page,
                    collected = listings.len(),
                    error = %e,
                    "Search page failed, keeping partial result"
                );
                break;
            }
        };

        let total_pages = result.pages;
        listings.extend(result.items);

        if page.saturating_add(1) >= total_pages {
            break;
        }
        page += 1;
    }

    listings.truncate(batch_cap);

    info!(
        query = %query.text,
        last_page = page,
        listings = listings.len(),
        "Fetched listings"
    );

    listings
}
