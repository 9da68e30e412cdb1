//! Configuration types for searching and running the pipeline.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};
use crate::pipeline::filter::ExcludedEmployers;

/// Default number of listings kept per batch.
pub const DEFAULT_BATCH_CAP: usize = 20;

/// Default page size requested from the search endpoint.
pub const DEFAULT_PER_PAGE: u32 = 50;

/// User-submitted search parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Free-text query matched against vacancy titles
    pub text: String,

    /// Experience filter id (e.g. `noExperience`, `between1And3`)
    #[serde(default)]
    pub experience: String,

    /// Schedule filter id (e.g. `remote`, `fullDay`)
    #[serde(default)]
    pub schedule: String,

    /// Optional area id or name
    #[serde(default)]
    pub area: Option<String>,
}

impl SearchQuery {
    pub fn new(
        text: impl Into<String>,
        experience: impl Into<String>,
        schedule: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            experience: experience.into(),
            schedule: schedule.into(),
            area: None,
        }
    }

    /// Restrict the search to an area.
    pub fn with_area(mut self, area: impl Into<String>) -> Self {
        self.area = Some(area.into());
        self
    }

    /// Area filter, `None` when unset or blank.
    pub fn area(&self) -> Option<&str> {
        self.area.as_deref().map(str::trim).filter(|a| !a.is_empty())
    }

    /// Reject queries that cannot produce a meaningful search.
    pub fn validate(&self) -> Result<()> {
        if self.text.trim().is_empty() {
            return Err(PipelineError::InvalidQuery {
                reason: "search text is empty".to_string(),
            });
        }
        Ok(())
    }
}

/// What to do when a single detail fetch fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailFailurePolicy {
    /// Abort the whole batch on the first failure.
    #[default]
    FailFast,

    /// Drop the failing listing and continue with the rest.
    Skip,
}

impl FromStr for DetailFailurePolicy {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "fail_fast" | "abort" => Ok(Self::FailFast),
            "skip" => Ok(Self::Skip),
            other => Err(PipelineError::Config(format!(
                "unknown detail failure policy: {other}"
            ))),
        }
    }
}

/// Configuration for a pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Maximum listings fetched per batch.
    ///
    /// Applied before employer filtering, so a batch may end up smaller.
    /// Default: 20.
    pub batch_cap: usize,

    /// Page size requested from the search endpoint.
    ///
    /// Default: 50.
    pub per_page: u32,

    /// Employers whose listings are dropped (case-insensitive).
    ///
    /// Default: `["aston"]`.
    pub excluded_employers: ExcludedEmployers,

    /// Behaviour when a detail fetch fails.
    ///
    /// Default: fail fast.
    pub detail_policy: DetailFailurePolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            batch_cap: DEFAULT_BATCH_CAP,
            per_page: DEFAULT_PER_PAGE,
            excluded_employers: ExcludedEmployers::default(),
            detail_policy: DetailFailurePolicy::default(),
        }
    }
}

impl PipelineConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the batch cap.
    pub fn with_batch_cap(mut self, cap: usize) -> Self {
        self.batch_cap = cap;
        self
    }

    /// Set the page size.
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    /// Replace the excluded employer set.
    pub fn with_excluded_employers(mut self, excluded: ExcludedEmployers) -> Self {
        self.excluded_employers = excluded;
        self
    }

    /// Set the detail failure policy.
    pub fn with_detail_policy(mut self, policy: DetailFailurePolicy) -> Self {
        self.detail_policy = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.batch_cap, 20);
        assert_eq!(config.per_page, 50);
        assert!(config.excluded_employers.contains("Aston"));
        assert_eq!(config.detail_policy, DetailFailurePolicy::FailFast);
    }

    #[test]
    fn test_blank_area_is_none() {
        let query = SearchQuery::new("QA", "noExperience", "remote").with_area("  ");
        assert_eq!(query.area(), None);

        let query = query.with_area("1");
        assert_eq!(query.area(), Some("1"));
    }

    #[test]
    fn test_validate_rejects_empty_text() {
        let query = SearchQuery::new("   ", "noExperience", "remote");
        assert!(matches!(
            query.validate(),
            Err(PipelineError::InvalidQuery { .. })
        ));
        assert!(SearchQuery::new("QA", "", "").validate().is_ok());
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("skip".parse::<DetailFailurePolicy>().unwrap(), DetailFailurePolicy::Skip);
        assert_eq!(
            "fail-fast".parse::<DetailFailurePolicy>().unwrap(),
            DetailFailurePolicy::FailFast
        );
        assert!("retry".parse::<DetailFailurePolicy>().is_err());
    }
}
