//! Application setup and router.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use vacancies::{ListingSource, Pipeline, PipelineConfig, Store};

use crate::routes::{health_handler, results_handler, search_handler};

pub type SharedSource = Arc<dyn ListingSource>;
pub type SharedStore = Arc<dyn Store>;

/// Shared application state
///
/// The pipeline holds no per-search state, so one instance serves every request.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<Pipeline<SharedSource, SharedStore>>,
}

impl AppState {
    pub fn new(source: SharedSource, store: SharedStore, config: PipelineConfig) -> Self {
        Self {
            pipeline: Arc::new(Pipeline::new(source, store).with_config(config)),
        }
    }
}

/// Build the Axum application router
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/search", post(search_handler))
        .route("/results", get(results_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
