//! SQLite sink.
//!
//! Normalized schema:
//! - `vacancies` - one row per persisted listing, never deduplicated
//! - `skills` - unique skill names, looked up or created by exact name
//! - `vacancy_skills` - listing/skill join
//! - `search_history` - one row per persisted batch

use std::str::FromStr;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::FromRow;
use tracing::{debug, info};

use crate::error::{PipelineError, Result};
use crate::traits::sink::{ResultsReader, Sink};
use crate::types::batch::{Batch, SearchRecord, SinkReport, StoredResults};
use crate::types::config::SearchQuery;
use crate::types::listing::{Listing, ListingSummary, DESCRIPTION_PLACEHOLDER};
use crate::types::skill::SkillCount;

/// SQLite-backed sink.
pub struct SqliteSink {
    pool: SqlitePool,
}

impl SqliteSink {
    /// Create a new SQLite sink with the given connection URL.
    ///
    /// The database file is created if missing.
    ///
    /// # Example URLs
    /// - `sqlite://vacancies.db` - File-based database
    /// - `sqlite::memory:` - use [`in_memory`](Self::in_memory) instead
    pub async fn new(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(PipelineError::storage)?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(PipelineError::storage)?;

        Self::with_pool(pool).await
    }

    /// Create an in-memory SQLite sink (for testing).
    ///
    /// Pinned to a single connection that never expires, since every
    /// connection to `:memory:` opens its own empty database.
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(PipelineError::storage)?;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(PipelineError::storage)?;

        Self::with_pool(pool).await
    }

    /// Wrap an existing pool and create the schema.
    pub async fn with_pool(pool: SqlitePool) -> Result<Self> {
        let sink = Self { pool };
        sink.run_migrations().await?;
        Ok(sink)
    }

    /// Create tables if they do not exist.
    async fn run_migrations(&self) -> Result<()> {
        let statements = [
            r#"
            CREATE TABLE IF NOT EXISTS vacancies (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                description TEXT,
                url TEXT NOT NULL,
                location TEXT,
                experience TEXT,
                schedule TEXT
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS skills (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS vacancy_skills (
                vacancy_id INTEGER NOT NULL REFERENCES vacancies(id),
                skill_id INTEGER NOT NULL REFERENCES skills(id),
                PRIMARY KEY (vacancy_id, skill_id)
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS search_history (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                query TEXT NOT NULL,
                experience TEXT NOT NULL DEFAULT '',
                schedule TEXT NOT NULL DEFAULT '',
                area TEXT,
                searched_at TEXT NOT NULL
            )
            "#,
            "CREATE INDEX IF NOT EXISTS idx_vacancy_skills_skill_id ON vacancy_skills(skill_id)",
        ];

        for statement in statements {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(PipelineError::storage)?;
        }

        Ok(())
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Insert a vacancy row and return its assigned id.
    async fn insert_vacancy(&self, listing: &Listing) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO vacancies (title, description, url, location, experience, schedule)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&listing.name)
        .bind(listing.responsibility())
        .bind(&listing.alternate_url)
        .bind(listing.area_name())
        .bind(listing.experience_label())
        .bind(listing.schedule_label())
        .execute(&self.pool)
        .await
        .map_err(PipelineError::storage)?;

        Ok(result.last_insert_rowid())
    }

    async fn find_skill(&self, name: &str) -> Result<Option<i64>> {
        sqlx::query_scalar::<_, i64>("SELECT id FROM skills WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(PipelineError::storage)
    }

    /// Look up a skill by exact name, creating it if absent.
    ///
    /// Returns the skill id and whether a row was created.
    async fn find_or_create_skill(&self, name: &str) -> Result<(i64, bool)> {
        if let Some(id) = self.find_skill(name).await? {
            return Ok((id, false));
        }

        let result = sqlx::query("INSERT INTO skills (name) VALUES (?) ON CONFLICT(name) DO NOTHING")
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(PipelineError::storage)?;

        if result.rows_affected() == 1 {
            return Ok((result.last_insert_rowid(), true));
        }

        // Lost a race with a concurrent insert of the same name
        let id = self.find_skill(name).await?.ok_or_else(|| {
            PipelineError::storage(format!("skill vanished after insert: {name}"))
        })?;
        Ok((id, false))
    }

    /// Link a vacancy to a skill. Returns false if the link already existed.
    async fn link_skill(&self, vacancy_id: i64, skill_id: i64) -> Result<bool> {
        let result =
            sqlx::query("INSERT OR IGNORE INTO vacancy_skills (vacancy_id, skill_id) VALUES (?, ?)")
                .bind(vacancy_id)
                .bind(skill_id)
                .execute(&self.pool)
                .await
                .map_err(PipelineError::storage)?;

        Ok(result.rows_affected() == 1)
    }

    async fn record_search(&self, query: &SearchQuery) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO search_history (query, experience, schedule, area, searched_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&query.text)
        .bind(&query.experience)
        .bind(&query.schedule)
        .bind(query.area())
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(PipelineError::storage)?;

        Ok(())
    }

    /// Most recent searches, newest first.
    pub async fn recent_searches(&self, limit: u32) -> Result<Vec<SearchRecord>> {
        let rows = sqlx::query_as::<_, SearchRow>(
            r#"
            SELECT query, experience, schedule, area, searched_at
            FROM search_history
            ORDER BY id DESC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(PipelineError::storage)?;

        rows.into_iter().map(|r| r.into_record()).collect()
    }
}

// Row types for sqlx queries
#[derive(Debug, FromRow)]
struct VacancyRow {
    title: String,
    description: Option<String>,
    url: String,
}

impl From<VacancyRow> for ListingSummary {
    fn from(row: VacancyRow) -> Self {
        Self {
            name: row.title,
            snippet: row
                .description
                .unwrap_or_else(|| DESCRIPTION_PLACEHOLDER.to_string()),
            url: row.url,
        }
    }
}

#[derive(Debug, FromRow)]
struct SkillCountRow {
    skill: String,
    count: i64,
}

#[derive(Debug, FromRow)]
struct SearchRow {
    query: String,
    experience: String,
    schedule: String,
    area: Option<String>,
    searched_at: String,
}

impl SearchRow {
    fn into_record(self) -> Result<SearchRecord> {
        let searched_at = chrono::DateTime::parse_from_rfc3339(&self.searched_at)
            .map_err(|e| PipelineError::storage(format!("Invalid date: {}", e)))?
            .with_timezone(&Utc);

        Ok(SearchRecord {
            query: SearchQuery {
                text: self.query,
                experience: self.experience,
                schedule: self.schedule,
                area: self.area,
            },
            searched_at,
        })
    }
}

#[async_trait]
impl Sink for SqliteSink {
    async fn persist(&self, batch: &Batch) -> Result<SinkReport> {
        let mut report = SinkReport::default();

        self.record_search(&batch.query).await?;

        for enriched in &batch.listings {
            // Edges need the id assigned here
            let vacancy_id = self.insert_vacancy(&enriched.listing).await?;
            report.listings_written += 1;

            for name in &enriched.skills {
                let (skill_id, created) = self.find_or_create_skill(name).await?;
                if created {
                    report.skills_written += 1;
                }
                if self.link_skill(vacancy_id, skill_id).await? {
                    report.links_written += 1;
                }
            }

            debug!(
                vacancy_id,
                id = %enriched.listing.id,
                skills = enriched.skills.len(),
                "Vacancy stored"
            );
        }

        info!(
            vacancies = report.listings_written,
            new_skills = report.skills_written,
            links = report.links_written,
            "Batch saved to database"
        );

        Ok(report)
    }

    fn name(&self) -> &str {
        "sqlite"
    }
}

#[async_trait]
impl ResultsReader for SqliteSink {
    async fn load_results(&self) -> Result<StoredResults> {
        let listings = sqlx::query_as::<_, VacancyRow>(
            "SELECT title, description, url FROM vacancies ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(PipelineError::storage)?;

        let skills = sqlx::query_as::<_, SkillCountRow>(
            r#"
            SELECT s.name AS skill, COUNT(vs.vacancy_id) AS count
            FROM skills s
            JOIN vacancy_skills vs ON vs.skill_id = s.id
            GROUP BY s.id, s.name
            ORDER BY count DESC, s.id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(PipelineError::storage)?;

        Ok(StoredResults {
            listings: listings.into_iter().map(ListingSummary::from).collect(),
            skills: skills
                .into_iter()
                .map(|r| SkillCount::new(r.skill, r.count.max(0) as usize))
                .collect(),
        })
    }
}
