//! Typed errors for the vacancies library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) so callers can tell
//! an upstream failure apart from a storage failure.

use thiserror::Error;

/// Errors that can abort a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Search parameters rejected before any request was made
    #[error("invalid query: {reason}")]
    InvalidQuery { reason: String },

    /// Detail fetch failed for one listing under the fail-fast policy
    #[error("detail fetch failed for vacancy {id}: {source}")]
    Detail {
        id: String,
        #[source]
        source: FetchError,
    },

    /// Storage operation failed
    #[error("storage error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),
}

impl PipelineError {
    /// Wrap any storage-layer error.
    pub fn storage(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Storage(err.into())
    }
}

/// Errors that can occur while talking to the remote listing API.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure (connect, timeout, TLS)
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Endpoint answered with a non-success status
    #[error("unexpected status {status} from {url}")]
    Status { url: String, status: u16 },

    /// Body could not be decoded
    #[error("decode error from {url}: {reason}")]
    Decode { url: String, reason: String },

    /// Endpoint URL could not be built
    #[error("invalid URL: {url}")]
    InvalidUrl { url: String },
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Result type alias for remote fetch operations.
pub type FetchResult<T> = std::result::Result<T, FetchError>;
