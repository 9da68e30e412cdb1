use axum::{extract::State, Json};
use vacancies::{ResultsReader, StoredResults};

use crate::app::AppState;
use crate::error::ApiError;

/// Everything the configured sink currently holds.
pub async fn results_handler(
    State(state): State<AppState>,
) -> Result<Json<StoredResults>, ApiError> {
    let results = state.pipeline.sink().load_results().await?;
    Ok(Json(results))
}
