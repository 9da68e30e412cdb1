//! hh.ru-compatible listing source.
//!
//! Talks to `{base}vacancies` for search pages and `{base}vacancies/{id}`
//! for detail records.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::error::{FetchError, FetchResult};
use crate::traits::source::ListingSource;
use crate::types::config::SearchQuery;
use crate::types::listing::{ListingDetail, SearchPage};

/// Public hh.ru API root.
pub const DEFAULT_API_URL: &str = "https://api.hh.ru/";

/// Connection settings for [`HhSource`].
#[derive(Debug, Clone)]
pub struct HhSourceConfig {
    /// API root; `vacancies` is resolved against it.
    ///
    /// Default: `https://api.hh.ru/`.
    pub base_url: String,

    /// `User-Agent` header. hh.ru rejects requests without one.
    pub user_agent: String,

    /// Per-request timeout.
    ///
    /// Default: 30 seconds.
    pub timeout: Duration,
}

impl Default for HhSourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            user_agent: concat!("vacancies/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl HhSourceConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set a custom user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Listing source backed by the hh.ru REST API.
///
/// # Example
///
/// ```rust,ignore
/// use vacancies::sources::{HhSource, HhSourceConfig};
///
/// let source = HhSource::new(HhSourceConfig::default())?;
/// let page = source.search_page(&query, 0, 50).await?;
/// ```
pub struct HhSource {
    client: reqwest::Client,
    vacancies_url: Url,
    user_agent: String,
}

impl HhSource {
    /// Create a source from config.
    pub fn new(config: HhSourceConfig) -> FetchResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| FetchError::Http(Box::new(e)))?;

        Self::with_client(client, config)
    }

    /// Create a source with a custom HTTP client.
    pub fn with_client(client: reqwest::Client, config: HhSourceConfig) -> FetchResult<Self> {
        let vacancies_url = vacancies_url(&config.base_url)?;
        Ok(Self {
            client,
            vacancies_url,
            user_agent: config.user_agent,
        })
    }

    /// Search endpoint URL.
    pub fn search_url(&self) -> &Url {
        &self.vacancies_url
    }

    /// Detail endpoint URL for one vacancy id.
    pub fn detail_url(&self, id: &str) -> FetchResult<Url> {
        let mut url = self.vacancies_url.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidUrl {
                url: self.vacancies_url.to_string(),
            })?
            .push(id);
        Ok(url)
    }

    /// Send a GET and return the status with the raw body.
    async fn get(&self, url: &Url, params: &[(&str, String)]) -> FetchResult<(StatusCode, String)> {
        debug!(url = %url, "HTTP GET starting");
        let response = self
            .client
            .get(url.clone())
            .query(params)
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .send()
            .await
            .map_err(|e| {
                warn!(url = %url, error = %e, "HTTP request failed");
                FetchError::Http(Box::new(e))
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Http(Box::new(e)))?;

        Ok((status, body))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        params: &[(&str, String)],
    ) -> FetchResult<T> {
        let (status, body) = self.get(&url, params).await?;
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        decode(&url, &body)
    }
}

fn decode<T: DeserializeOwned>(url: &Url, body: &str) -> FetchResult<T> {
    serde_json::from_str(body).map_err(|e| FetchError::Decode {
        url: url.to_string(),
        reason: e.to_string(),
    })
}

/// Interpret a non-success detail response.
///
/// A JSON object body (the API's `{"errors": [...]}` shape for archived or
/// removed vacancies) reads as a detail record with no skills. Anything else
/// stays a status error.
fn detail_from_error_body(url: &Url, status: StatusCode, body: &str) -> FetchResult<ListingDetail> {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value @ serde_json::Value::Object(_)) => {
            warn!(url = %url, status = status.as_u16(), "Detail unavailable, treating as no skills");
            serde_json::from_value(value).map_err(|e| FetchError::Decode {
                url: url.to_string(),
                reason: e.to_string(),
            })
        }
        _ => Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        }),
    }
}

/// Resolve `vacancies` against the API root, tolerating a missing trailing slash.
fn vacancies_url(base_url: &str) -> FetchResult<Url> {
    let invalid = || FetchError::InvalidUrl {
        url: base_url.to_string(),
    };

    let mut base = Url::parse(base_url).map_err(|_| invalid())?;
    if base.cannot_be_a_base() {
        return Err(invalid());
    }
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join("vacancies").map_err(|_| invalid())
}

/// Query parameters for one search page. Blank filters are left out.
pub(crate) fn search_params(query: &SearchQuery, page: u32, per_page: u32) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("text", query.text.clone()),
        ("search_field", "name".to_string()),
    ];
    if !query.experience.is_empty() {
        params.push(("experience", query.experience.clone()));
    }
    if !query.schedule.is_empty() {
        params.push(("schedule", query.schedule.clone()));
    }
    params.push(("page", page.to_string()));
    params.push(("per_page", per_page.to_string()));
    if let Some(area) = query.area() {
        params.push(("area", area.to_string()));
    }
    params
}

#[async_trait]
impl ListingSource for HhSource {
    async fn search_page(
        &self,
        query: &SearchQuery,
        page: u32,
        per_page: u32,
    ) -> FetchResult<SearchPage> {
        let params = search_params(query, page, per_page);
        self.get_json(self.vacancies_url.clone(), &params).await
    }

    async fn fetch_detail(&self, id: &str) -> FetchResult<ListingDetail> {
        let url = self.detail_url(id)?;
        let (status, body) = self.get(&url, &[]).await?;
        if !status.is_success() {
            return detail_from_error_body(&url, status, &body);
        }
        decode(&url, &body)
    }

    fn name(&self) -> &str {
        "hh"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vacancies_url_with_and_without_slash() {
        assert_eq!(
            vacancies_url("https://api.hh.ru/").unwrap().as_str(),
            "https://api.hh.ru/vacancies"
        );
        assert_eq!(
            vacancies_url("http://localhost:8080/api").unwrap().as_str(),
            "http://localhost:8080/api/vacancies"
        );
        assert!(vacancies_url("not a url").is_err());
    }

    #[test]
    fn test_detail_url_escapes_id() {
        let source = HhSource::new(HhSourceConfig::default()).unwrap();
        assert_eq!(
            source.detail_url("123").unwrap().as_str(),
            "https://api.hh.ru/vacancies/123"
        );
        assert_eq!(
            source.detail_url("a/b").unwrap().as_str(),
            "https://api.hh.ru/vacancies/a%2Fb"
        );
    }

    #[test]
    fn test_search_params() {
        let query = SearchQuery::new("QA", "noExperience", "remote").with_area("1");
        let params = search_params(&query, 2, 50);

        assert_eq!(
            params,
            vec![
                ("text", "QA".to_string()),
                ("search_field", "name".to_string()),
                ("experience", "noExperience".to_string()),
                ("schedule", "remote".to_string()),
                ("page", "2".to_string()),
                ("per_page", "50".to_string()),
                ("area", "1".to_string()),
            ]
        );
    }

    #[test]
    fn test_error_body_object_reads_as_empty_detail() {
        let url = Url::parse("https://api.hh.ru/vacancies/2").unwrap();
        let body = r#"{"errors": [{"type": "not_found"}], "request_id": "abc"}"#;

        let detail = detail_from_error_body(&url, StatusCode::NOT_FOUND, body).unwrap();
        assert!(detail.key_skills.is_empty());

        assert!(matches!(
            detail_from_error_body(&url, StatusCode::BAD_GATEWAY, "<html>bad gateway</html>"),
            Err(FetchError::Status { status: 502, .. })
        ));
        assert!(matches!(
            detail_from_error_body(&url, StatusCode::NOT_FOUND, ""),
            Err(FetchError::Status { status: 404, .. })
        ));
    }

    #[test]
    fn test_search_params_omit_blank_filters() {
        let query = SearchQuery::new("QA", "", "");
        let keys: Vec<_> = search_params(&query, 0, 50).into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["text", "search_field", "page", "per_page"]);
    }
}
