//! In-memory sink for testing and development.

use async_trait::async_trait;
use std::sync::RwLock;

use crate::error::Result;
use crate::traits::sink::{ResultsReader, Sink};
use crate::types::batch::{Batch, SinkReport, StoredResults};

/// Keeps every persisted batch in memory.
///
/// Reads return the most recent batch, mirroring the overwrite semantics of
/// the flat-file sink. Data is lost on restart.
#[derive(Default)]
pub struct MemorySink {
    batches: RwLock<Vec<Batch>>,
}

impl MemorySink {
    /// Create a new empty memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of batches persisted so far.
    pub fn batch_count(&self) -> usize {
        self.batches.read().unwrap().len()
    }

    /// The most recent batch, if any.
    pub fn last_batch(&self) -> Option<Batch> {
        self.batches.read().unwrap().last().cloned()
    }

    /// Clear all stored data.
    pub fn clear(&self) {
        self.batches.write().unwrap().clear();
    }
}

#[async_trait]
impl Sink for MemorySink {
    async fn persist(&self, batch: &Batch) -> Result<SinkReport> {
        let links = batch.listings.iter().map(|l| l.skills.len()).sum();
        self.batches.write().unwrap().push(batch.clone());

        Ok(SinkReport {
            listings_written: batch.listings.len(),
            skills_written: batch.skills.len(),
            links_written: links,
        })
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[async_trait]
impl ResultsReader for MemorySink {
    async fn load_results(&self) -> Result<StoredResults> {
        Ok(self
            .batches
            .read()
            .unwrap()
            .last()
            .map(|batch| StoredResults {
                listings: batch.summaries(),
                skills: batch.skills.clone(),
            })
            .unwrap_or_default())
    }
}
