use axum::{extract::State, Json};
use serde::Serialize;
use vacancies::{EnrichedListing, SearchQuery, SkillCount};

use crate::app::AppState;
use crate::error::ApiError;

#[derive(Debug, Serialize)]
pub struct ListingView {
    pub id: String,
    pub name: String,
    pub snippet: String,
    pub url: String,
    pub employer: String,
    pub area: String,
    pub experience: String,
    pub schedule: String,
    pub skills: Vec<String>,
}

impl From<EnrichedListing> for ListingView {
    fn from(enriched: EnrichedListing) -> Self {
        let listing = &enriched.listing;
        Self {
            snippet: listing.description().to_string(),
            employer: listing.employer_name().to_string(),
            area: listing.area_name().to_string(),
            experience: listing.experience_label().to_string(),
            schedule: listing.schedule_label().to_string(),
            id: listing.id.clone(),
            name: listing.name.clone(),
            url: listing.alternate_url.clone(),
            skills: enriched.skills,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub listings: Vec<ListingView>,
    pub skills: Vec<SkillCount>,
    pub skipped: Vec<String>,
}

/// Run one search: fetch, filter, enrich, persist, and return the batch.
pub async fn search_handler(
    State(state): State<AppState>,
    Json(query): Json<SearchQuery>,
) -> Result<Json<SearchResponse>, ApiError> {
    tracing::info!(
        text = %query.text,
        experience = %query.experience,
        schedule = %query.schedule,
        area = ?query.area(),
        "Search requested"
    );

    let batch = state.pipeline.run_search(&query).await?;

    Ok(Json(SearchResponse {
        listings: batch.listings.into_iter().map(ListingView::from).collect(),
        skills: batch.skills,
        skipped: batch.skipped,
    }))
}
