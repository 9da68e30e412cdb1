//! Router tests against in-process sources and sinks.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use vacancies::{
    testing::listing, JsonFileSink, MemorySink, MockSource, PipelineConfig, SearchQuery,
};
use vacancy_server::{build_app, AppState};

const MAX_SIZE: usize = 1024 * 1024;

fn source() -> MockSource {
    let source = MockSource::paged(
        vec![
            listing("1", "Acme"),
            listing("2", "Aston"),
            listing("3", "Globex"),
        ],
        50,
    );
    source.add_detail("1", ["SQL", "Postman"]);
    source.add_detail("3", ["SQL"]);
    source
}

fn app_with(source: MockSource, config: PipelineConfig) -> Router {
    build_app(AppState::new(
        Arc::new(source),
        Arc::new(MemorySink::new()),
        config,
    ))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), MAX_SIZE).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn search_request(query: &SearchQuery) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/search")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(query).unwrap()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_search_returns_filtered_batch() {
    let app = app_with(source(), PipelineConfig::default());

    let (status, body) = send(
        app.clone(),
        search_request(&SearchQuery::new("QA", "noExperience", "remote")),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["listings"].as_array().unwrap().len(), 2);
    assert_eq!(body["listings"][0]["employer"], "Acme");
    assert_eq!(body["listings"][0]["skills"], json!(["SQL", "Postman"]));
    assert_eq!(body["skills"][0], json!({"skill": "SQL", "count": 2}));

    let (status, stored) = send(app, get("/results")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stored["listings"].as_array().unwrap().len(), 2);
    assert_eq!(stored["skills"][1]["skill"], "Postman");
}

#[tokio::test]
async fn test_empty_text_is_bad_request() {
    let app = app_with(source(), PipelineConfig::default());

    let (status, body) = send(app, search_request(&SearchQuery::new(" ", "", ""))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_query");
}

#[tokio::test]
async fn test_detail_failure_is_bad_gateway() {
    let failing = source();
    failing.fail_detail("3");
    let app = app_with(failing, PipelineConfig::default());

    let (status, body) = send(app, search_request(&SearchQuery::new("QA", "", ""))).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], "upstream_detail_failed");
}

#[tokio::test]
async fn test_storage_failure_is_distinguishable() {
    let dir = tempfile::tempdir().unwrap();
    // A regular file where the sink expects a directory
    let blocked = dir.path().join("blocked");
    std::fs::write(&blocked, b"").unwrap();

    let app = build_app(AppState::new(
        Arc::new(source()),
        Arc::new(JsonFileSink::new(&blocked)),
        PipelineConfig::default(),
    ));

    let (status, body) = send(app, search_request(&SearchQuery::new("QA", "", ""))).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "storage_failed");
}

#[tokio::test]
async fn test_health_reports_components() {
    let app = app_with(source(), PipelineConfig::default());

    let (status, body) = send(app, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok", "source": "mock", "sink": "memory"}));
}
