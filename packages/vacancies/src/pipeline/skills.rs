//! Skill enrichment and frequency counting.

use indexmap::IndexMap;
use tracing::{debug, info, warn};

use crate::error::{PipelineError, Result};
use crate::traits::source::ListingSource;
use crate::types::batch::EnrichedListing;
use crate::types::config::DetailFailurePolicy;
use crate::types::listing::Listing;
use crate::types::skill::SkillCount;

/// Listings with their skills, plus the ids skipped on detail failure.
#[derive(Debug, Clone, Default)]
pub struct Enrichment {
    pub listings: Vec<EnrichedListing>,
    pub skipped: Vec<String>,
}

/// Fetch the detail record of every listing, one request at a time.
///
/// Under [`DetailFailurePolicy::FailFast`] the first failed fetch aborts with
/// [`PipelineError::Detail`]. Under [`DetailFailurePolicy::Skip`] the listing
/// is dropped and its id recorded in [`Enrichment::skipped`].
pub async fn enrich_listings<S>(
    source: &S,
    listings: Vec<Listing>,
    policy: DetailFailurePolicy,
) -> Result<Enrichment>
where
    S: ListingSource + ?Sized,
{
    let mut enrichment = Enrichment {
        listings: Vec::with_capacity(listings.len()),
        skipped: Vec::new(),
    };

    for listing in listings {
        match source.fetch_detail(&listing.id).await {
            Ok(detail) => {
                let skills = detail.skill_names();
                debug!(id = %listing.id, skills = skills.len(), "Fetched vacancy detail");
                enrichment.listings.push(EnrichedListing::new(listing, skills));
            }
            Err(e) => match policy {
                DetailFailurePolicy::FailFast => {
                    warn!(id = %listing.id, error = %e, "Detail fetch failed, aborting batch");
                    return Err(PipelineError::Detail {
                        id: listing.id,
                        source: e,
                    });
                }
                DetailFailurePolicy::Skip => {
                    warn!(id = %listing.id, error = %e, "Detail fetch failed, skipping vacancy");
                    enrichment.skipped.push(listing.id);
                }
            },
        }
    }

    info!(
        enriched = enrichment.listings.len(),
        skipped = enrichment.skipped.len(),
        "Enrichment complete"
    );

    Ok(enrichment)
}

/// Count skill-name occurrences.
///
/// Sorted by count descending; equal counts keep first-occurrence order.
pub fn count_skills<I, S>(names: I) -> Vec<SkillCount>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for name in names {
        *counts.entry(name.as_ref().to_string()).or_insert(0) += 1;
    }

    let mut table: Vec<SkillCount> = counts
        .into_iter()
        .map(|(skill, count)| SkillCount { skill, count })
        .collect();

    // Stable sort keeps insertion order for ties
    table.sort_by(|a, b| b.count.cmp(&a.count));
    table
}

/// Frequency table over every skill of every enriched listing.
pub fn skill_table(listings: &[EnrichedListing]) -> Vec<SkillCount> {
    count_skills(listings.iter().flat_map(|l| l.skills.iter()))
}
