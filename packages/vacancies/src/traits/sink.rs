//! Persistence traits.
//!
//! Writing and reading are split:
//! - `Sink`: persists a finished batch
//! - `ResultsReader`: reads persisted data back for presentation
//! - `Store`: composite of both, what the server holds

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::batch::{Batch, SinkReport, StoredResults};

/// Destination for a finished batch.
#[async_trait]
pub trait Sink: Send + Sync {
    /// Persist a batch.
    ///
    /// Writes are not transactional: a failure partway through leaves
    /// whatever was already written in place.
    async fn persist(&self, batch: &Batch) -> Result<SinkReport>;

    /// Name of this sink (for logging).
    fn name(&self) -> &str;
}

/// Read access to persisted results.
#[async_trait]
pub trait ResultsReader: Send + Sync {
    /// Load listing summaries and skill counts.
    async fn load_results(&self) -> Result<StoredResults>;
}

/// Composite trait combining write and read access.
pub trait Store: Sink + ResultsReader {}

// Blanket implementation: anything implementing both traits is a Store
impl<T: Sink + ResultsReader> Store for T {}

#[async_trait]
impl<T: Sink + ?Sized> Sink for Arc<T> {
    async fn persist(&self, batch: &Batch) -> Result<SinkReport> {
        (**self).persist(batch).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

#[async_trait]
impl<T: ResultsReader + ?Sized> ResultsReader for Arc<T> {
    async fn load_results(&self) -> Result<StoredResults> {
        (**self).load_results().await
    }
}
