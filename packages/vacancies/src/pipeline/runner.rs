//! Pipeline - the main entry point.

use tracing::{info, instrument};

use crate::error::Result;
use crate::pipeline::fetch::fetch_listings;
use crate::pipeline::filter::filter_listings;
use crate::pipeline::skills::{enrich_listings, skill_table};
use crate::traits::{sink::Sink, source::ListingSource};
use crate::types::batch::Batch;
use crate::types::config::{PipelineConfig, SearchQuery};

/// One fetch → filter → enrich → aggregate → persist pipeline, generic over
/// where listings come from and where batches go.
///
/// Each call to [`run_search`](Self::run_search) keeps its own paging state,
/// so a shared `Pipeline` can serve concurrent requests.
///
/// # Example
///
/// ```rust,ignore
/// use vacancies::{Pipeline, SearchQuery, HhSource, HhSourceConfig, JsonFileSink};
///
/// let pipeline = Pipeline::new(HhSource::new(HhSourceConfig::default())?, JsonFileSink::new("data"));
/// let query = SearchQuery::new("QA", "noExperience", "remote").with_area("1");
/// let batch = pipeline.run_search(&query).await?;
/// ```
pub struct Pipeline<S, K> {
    source: S,
    sink: K,
    config: PipelineConfig,
}

impl<S: ListingSource, K: Sink> Pipeline<S, K> {
    /// Create a pipeline with default config.
    pub fn new(source: S, sink: K) -> Self {
        Self {
            source,
            sink,
            config: PipelineConfig::default(),
        }
    }

    /// Replace the config.
    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// Fetch, filter, enrich and aggregate without persisting.
    pub async fn collect(&self, query: &SearchQuery) -> Result<Batch> {
        query.validate()?;

        let fetched = fetch_listings(
            &self.source,
            query,
            self.config.batch_cap,
            self.config.per_page,
        )
        .await;
        let fetched_count = fetched.len();

        let filtered = filter_listings(fetched, &self.config.excluded_employers);
        info!(
            fetched = fetched_count,
            kept = filtered.len(),
            "Filtered excluded employers"
        );

        let enrichment = enrich_listings(&self.source, filtered, self.config.detail_policy).await?;
        let skills = skill_table(&enrichment.listings);

        Ok(Batch {
            query: query.clone(),
            listings: enrichment.listings,
            skills,
            skipped: enrichment.skipped,
        })
    }

    /// Run a full search and persist the batch.
    #[instrument(skip(self), fields(source = self.source.name(), sink = self.sink.name()))]
    pub async fn run_search(&self, query: &SearchQuery) -> Result<Batch> {
        let batch = self.collect(query).await?;
        let report = self.sink.persist(&batch).await?;

        info!(
            listings = report.listings_written,
            skills = report.skills_written,
            links = report.links_written,
            skipped = batch.skipped.len(),
            "Batch persisted"
        );

        Ok(batch)
    }
}
