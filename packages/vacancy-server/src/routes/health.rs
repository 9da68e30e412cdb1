use axum::{extract::State, Json};
use serde::Serialize;
use vacancies::{ListingSource, Sink};

use crate::app::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    source: String,
    sink: String,
}

/// Liveness check; reports which source and sink this deployment uses.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        source: state.pipeline.source().name().to_string(),
        sink: state.pipeline.sink().name().to_string(),
    })
}
