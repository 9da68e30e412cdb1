// Main entry point for the vacancy statistics server

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vacancies::{HhSource, JsonFileSink, SqliteSink};
use vacancy_server::{
    app::{SharedSource, SharedStore},
    build_app, AppState, Config, SinkKind,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,vacancies=debug,vacancy_server=debug,sqlx=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_line_number(true),
        )
        .init();

    tracing::info!("Starting vacancy statistics server");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(sink = ?config.sink, api = %config.hh_api_url, "Configuration loaded");

    let store: SharedStore = match config.sink {
        SinkKind::Json => {
            tracing::info!(dir = %config.data_dir.display(), "Writing results to JSON files");
            Arc::new(JsonFileSink::new(&config.data_dir))
        }
        SinkKind::Sqlite => {
            tracing::info!("Connecting to database...");
            let sink = SqliteSink::new(&config.database_url)
                .await
                .context("Failed to open database")?;
            tracing::info!("Database ready");
            Arc::new(sink)
        }
    };

    let source: SharedSource =
        Arc::new(HhSource::new(config.source_config()).context("Failed to build HTTP client")?);

    let app = build_app(AppState::new(source, store, config.pipeline_config()));

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
