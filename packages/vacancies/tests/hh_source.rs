//! HhSource against a local HTTP double.

use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vacancies::{
    fetch_listings,
    testing::{detail_json, listing, search_page_json},
    FetchError, HhSource, HhSourceConfig, JsonFileSink, ListingSource, MemorySink, Pipeline,
    ResultsReader, SearchQuery, SkillCount,
};

fn source_for(server: &MockServer) -> HhSource {
    HhSource::new(HhSourceConfig::new(server.uri()).with_user_agent("vacancies-test/1.0")).unwrap()
}

#[tokio::test]
async fn test_search_sends_expected_params() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/vacancies"))
        .and(query_param("text", "QA"))
        .and(query_param("search_field", "name"))
        .and(query_param("experience", "noExperience"))
        .and(query_param("schedule", "remote"))
        .and(query_param("page", "0"))
        .and(query_param("per_page", "50"))
        .and(query_param("area", "1"))
        .and(header("user-agent", "vacancies-test/1.0"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(search_page_json(&[listing("7", "Acme")], 1)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let query = SearchQuery::new("QA", "noExperience", "remote").with_area("1");
    let page = source_for(&server).search_page(&query, 0, 50).await.unwrap();

    assert_eq!(page.pages, 1);
    assert_eq!(page.items[0].id, "7");
    assert_eq!(page.items[0].employer_name(), "Acme");
}

#[tokio::test]
async fn test_non_success_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/vacancies"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let query = SearchQuery::new("QA", "", "");
    let err = source_for(&server).search_page(&query, 0, 50).await.unwrap_err();

    assert!(matches!(err, FetchError::Status { status: 403, .. }));
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/vacancies/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = source_for(&server).fetch_detail("1").await.unwrap_err();

    assert!(matches!(err, FetchError::Decode { .. }));
}

#[tokio::test]
async fn test_pagination_stops_on_server_error() {
    let server = MockServer::start().await;
    let first: Vec<_> = (0..5).map(|i| listing(&i.to_string(), "Acme")).collect();

    Mock::given(method("GET"))
        .and(path("/vacancies"))
        .and(query_param("page", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_page_json(&first, 4)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/vacancies"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/vacancies"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_page_json(&first, 4)))
        .expect(0)
        .mount(&server)
        .await;

    let query = SearchQuery::new("QA", "", "");
    let listings = fetch_listings(&source_for(&server), &query, 20, 5).await;

    assert_eq!(listings.len(), 5);
}

#[tokio::test]
async fn test_full_run_writes_json_documents() {
    let server = MockServer::start().await;
    let items = vec![
        listing("1", "Acme").with_responsibility("Тестировать API"),
        listing("2", "aston"),
        listing("3", "Globex"),
    ];

    Mock::given(method("GET"))
        .and(path("/vacancies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_page_json(&items, 1)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/vacancies/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(detail_json("1", &["SQL", "Postman"])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/vacancies/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(detail_json("3", &["SQL"])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/vacancies/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"key_skills": []})))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let pipeline = Pipeline::new(source_for(&server), JsonFileSink::new(dir.path()));

    let batch = pipeline
        .run_search(&SearchQuery::new("QA", "noExperience", "remote"))
        .await
        .unwrap();
    assert_eq!(batch.len(), 2);

    let results = pipeline.sink().load_results().await.unwrap();
    assert_eq!(results.listings[0].snippet, "Тестировать API");
    assert_eq!(results.listings[1].url, "https://hh.ru/vacancy/3");
    assert_eq!(results.skills[0].skill, "SQL");
    assert_eq!(results.skills[0].count, 2);
    assert_eq!(results.skills[1].skill, "Postman");
}

#[tokio::test]
async fn test_archived_detail_counts_with_no_skills() {
    let server = MockServer::start().await;
    let items = vec![listing("1", "Acme"), listing("2", "Globex")];

    Mock::given(method("GET"))
        .and(path("/vacancies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_page_json(&items, 1)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/vacancies/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(detail_json("1", &["SQL"])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/vacancies/2"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({"errors": [{"type": "not_found"}], "request_id": "r1"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let pipeline = Pipeline::new(source_for(&server), MemorySink::new());
    let batch = pipeline
        .run_search(&SearchQuery::new("QA", "noExperience", "remote"))
        .await
        .unwrap();

    assert_eq!(batch.len(), 2);
    assert!(batch.listings[1].skills.is_empty());
    assert!(batch.skipped.is_empty());
    assert_eq!(batch.skills, vec![SkillCount::new("SQL", 1)]);
    assert_eq!(pipeline.sink().batch_count(), 1);
}

#[tokio::test]
async fn test_detail_error_without_json_body_still_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/vacancies/9"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&server)
        .await;

    let err = source_for(&server).fetch_detail("9").await.unwrap_err();

    assert!(matches!(err, FetchError::Status { status: 503, .. }));
}
