//! Vacancy Skill-Statistics Library
//!
//! Fetches job vacancies from an hh.ru-compatible API, drops listings from
//! excluded employers, collects the key skills each vacancy declares and
//! counts how often every skill appears. Finished batches go to a sink:
//! flat JSON files or a normalized SQLite schema.
//!
//! # Usage
//!
//! ```rust,ignore
//! use vacancies::{HhSource, HhSourceConfig, JsonFileSink, Pipeline, SearchQuery};
//!
//! let source = HhSource::new(HhSourceConfig::default())?;
//! let pipeline = Pipeline::new(source, JsonFileSink::new("data"));
//!
//! let query = SearchQuery::new("QA", "noExperience", "remote").with_area("1");
//! let batch = pipeline.run_search(&query).await?;
//! for entry in &batch.skills {
//!     println!("{}: {}", entry.skill, entry.count);
//! }
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Core trait abstractions (ListingSource, Sink, ResultsReader)
//! - [`types`] - Listings, batches, skill counts, configuration
//! - [`pipeline`] - Fetch, filter, enrich, aggregate and the `Pipeline` runner
//! - [`sources`] - Listing sources (HhSource, MockSource)
//! - [`sinks`] - Sinks (JsonFileSink, SqliteSink, MemorySink)
//! - [`testing`] - Fixtures for tests

pub mod error;
pub mod pipeline;
pub mod sinks;
pub mod sources;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{FetchError, PipelineError};
pub use traits::{
    sink::{ResultsReader, Sink, Store},
    source::ListingSource,
};
pub use types::{
    batch::{Batch, EnrichedListing, SearchRecord, SinkReport, StoredResults},
    config::{DetailFailurePolicy, PipelineConfig, SearchQuery, DEFAULT_BATCH_CAP, DEFAULT_PER_PAGE},
    listing::{Listing, ListingDetail, ListingSummary, SearchPage, DESCRIPTION_PLACEHOLDER},
    skill::SkillCount,
};

// Re-export pipeline components
pub use pipeline::{
    count_skills, enrich_listings, fetch_listings, filter_listings, skill_table, Enrichment,
    ExcludedEmployers, Pipeline,
};

// Re-export sources
pub use sources::{HhSource, HhSourceConfig, MockSource, MockSourceBuilder};

// Re-export sinks
pub use sinks::{JsonFileSink, MemorySink};

#[cfg(feature = "sqlite")]
pub use sinks::SqliteSink;
