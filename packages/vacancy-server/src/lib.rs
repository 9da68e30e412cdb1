// Vacancy Skill Statistics - HTTP surface
//
// Thin axum layer over the `vacancies` pipeline: one route runs a search,
// one reads back whatever the configured sink holds.

pub mod app;
pub mod config;
pub mod error;
pub mod routes;

pub use app::{build_app, AppState};
pub use config::{Config, SinkKind};
pub use error::ApiError;
