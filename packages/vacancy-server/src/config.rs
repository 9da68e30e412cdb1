use anyhow::{bail, Context, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use vacancies::{
    sources::DEFAULT_API_URL, DetailFailurePolicy, ExcludedEmployers, HhSourceConfig,
    PipelineConfig, DEFAULT_BATCH_CAP, DEFAULT_PER_PAGE,
};

/// Which sink a deployment writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkKind {
    Json,
    Sqlite,
}

impl FromStr for SinkKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" | "file" => Ok(Self::Json),
            "sqlite" | "db" => Ok(Self::Sqlite),
            other => bail!("SINK must be 'json' or 'sqlite', got '{other}'"),
        }
    }
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub sink: SinkKind,
    pub data_dir: PathBuf,
    pub database_url: String,
    pub hh_api_url: String,
    pub hh_user_agent: Option<String>,
    pub hh_timeout: Duration,
    pub excluded_employers: ExcludedEmployers,
    pub detail_policy: DetailFailurePolicy,
    pub batch_cap: usize,
    pub per_page: u32,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from any variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        let excluded_employers = match lookup("EXCLUDED_EMPLOYERS") {
            Some(list) => ExcludedEmployers::new(
                list.split(',').map(str::trim).filter(|name| !name.is_empty()),
            ),
            None => ExcludedEmployers::default(),
        };

        Ok(Self {
            port: var("PORT", "8080")
                .parse()
                .context("PORT must be a valid number")?,
            sink: var("SINK", "sqlite").parse()?,
            data_dir: PathBuf::from(var("DATA_DIR", "data")),
            database_url: var("DATABASE_URL", "sqlite://vacancies.db"),
            hh_api_url: var("HH_API_URL", DEFAULT_API_URL),
            hh_user_agent: lookup("HH_USER_AGENT"),
            hh_timeout: Duration::from_secs(
                var("HH_TIMEOUT_SECS", "30")
                    .parse()
                    .context("HH_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            excluded_employers,
            detail_policy: var("DETAIL_FAILURE_POLICY", "fail_fast")
                .parse()
                .context("DETAIL_FAILURE_POLICY must be 'fail_fast' or 'skip'")?,
            batch_cap: var("BATCH_CAP", &DEFAULT_BATCH_CAP.to_string())
                .parse()
                .context("BATCH_CAP must be a valid number")?,
            per_page: var("PER_PAGE", &DEFAULT_PER_PAGE.to_string())
                .parse()
                .context("PER_PAGE must be a valid number")?,
        })
    }

    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig::new()
            .with_batch_cap(self.batch_cap)
            .with_per_page(self.per_page)
            .with_excluded_employers(self.excluded_employers.clone())
            .with_detail_policy(self.detail_policy)
    }

    pub fn source_config(&self) -> HhSourceConfig {
        let config = HhSourceConfig::new(&self.hh_api_url).with_timeout(self.hh_timeout);
        match &self.hh_user_agent {
            Some(agent) => config.with_user_agent(agent),
            None => config,
        }
    }
}
