//! Batch-level types: what one run produces and what a sink reports back.

use serde::{Deserialize, Serialize};

use crate::types::config::SearchQuery;
use crate::types::listing::{Listing, ListingSummary};
use crate::types::skill::SkillCount;

/// A filtered listing together with the skills its detail record declares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedListing {
    pub listing: Listing,

    /// Skill names in detail-record order
    pub skills: Vec<String>,
}

impl EnrichedListing {
    pub fn new(listing: Listing, skills: Vec<String>) -> Self {
        Self { listing, skills }
    }
}

/// Output of one end-to-end run for one query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Batch {
    pub query: SearchQuery,

    /// Listings that passed the filter and were enriched
    pub listings: Vec<EnrichedListing>,

    /// Frequency table, count descending
    pub skills: Vec<SkillCount>,

    /// Ids of listings dropped because their detail fetch failed
    #[serde(default)]
    pub skipped: Vec<String>,
}

impl Batch {
    /// Flat-file projections of the batch listings.
    pub fn summaries(&self) -> Vec<ListingSummary> {
        self.listings
            .iter()
            .map(|l| ListingSummary::from(&l.listing))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}

/// What a sink wrote for one batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SinkReport {
    pub listings_written: usize,

    /// Skill rows (relational) or frequency entries (flat file) written
    pub skills_written: usize,

    /// Listing-skill join rows written
    pub links_written: usize,
}

/// Persisted data as read back for presentation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredResults {
    pub listings: Vec<ListingSummary>,
    pub skills: Vec<SkillCount>,
}

/// One recorded search, as kept by the relational sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRecord {
    pub query: SearchQuery,
    pub searched_at: chrono::DateTime<chrono::Utc>,
}
