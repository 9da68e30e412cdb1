//! Flat-file JSON sink.
//!
//! Writes `vacancies.json` (listing projections) and `skills.json`
//! (frequency table). Both documents are replaced wholesale on every run.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::info;

use crate::error::{PipelineError, Result};
use crate::traits::sink::{ResultsReader, Sink};
use crate::types::batch::{Batch, SinkReport, StoredResults};

/// File name of the listings document.
pub const LISTINGS_FILE: &str = "vacancies.json";

/// File name of the skill-frequency document.
pub const SKILLS_FILE: &str = "skills.json";

/// Sink writing two JSON documents into a directory.
pub struct JsonFileSink {
    dir: PathBuf,
}

impl JsonFileSink {
    /// Create a sink writing into `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn listings_path(&self) -> PathBuf {
        self.dir.join(LISTINGS_FILE)
    }

    pub fn skills_path(&self) -> PathBuf {
        self.dir.join(SKILLS_FILE)
    }
}

/// Pretty-print with four-space indentation, non-ASCII kept as is.
fn to_pretty_json<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    value.serialize(&mut serializer)?;
    Ok(out)
}

async fn read_json_or_default<T: DeserializeOwned + Default>(path: &Path) -> Result<T> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(T::default()),
        Err(e) => Err(PipelineError::storage(e)),
    }
}

#[async_trait]
impl Sink for JsonFileSink {
    async fn persist(&self, batch: &Batch) -> Result<SinkReport> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(PipelineError::storage)?;

        let summaries = batch.summaries();
        tokio::fs::write(self.listings_path(), to_pretty_json(&summaries)?)
            .await
            .map_err(PipelineError::storage)?;
        info!(path = %self.listings_path().display(), count = summaries.len(), "Vacancies saved");

        tokio::fs::write(self.skills_path(), to_pretty_json(&batch.skills)?)
            .await
            .map_err(PipelineError::storage)?;
        info!(path = %self.skills_path().display(), count = batch.skills.len(), "Skills saved");

        Ok(SinkReport {
            listings_written: summaries.len(),
            skills_written: batch.skills.len(),
            links_written: 0,
        })
    }

    fn name(&self) -> &str {
        "json"
    }
}

#[async_trait]
impl ResultsReader for JsonFileSink {
    async fn load_results(&self) -> Result<StoredResults> {
        Ok(StoredResults {
            listings: read_json_or_default(&self.listings_path()).await?,
            skills: read_json_or_default(&self.skills_path()).await?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::batch_of as batch;

    #[tokio::test]
    async fn test_writes_both_documents() {
        let dir = tempfile::tempdir().unwrap();
        let sink = JsonFileSink::new(dir.path().join("data"));

        let report = sink
            .persist(&batch(vec![("1", vec!["SQL", "Git"]), ("2", vec!["SQL"])]))
            .await
            .unwrap();
        assert_eq!(report.listings_written, 2);
        assert_eq!(report.skills_written, 2);

        let listings: serde_json::Value =
            serde_json::from_slice(&std::fs::read(sink.listings_path()).unwrap()).unwrap();
        assert_eq!(listings[0]["name"], "Vacancy 1");
        assert_eq!(listings[0]["snippet"], "Description not specified");
        assert_eq!(listings[1]["url"], "https://hh.ru/vacancy/2");

        let skills: serde_json::Value =
            serde_json::from_slice(&std::fs::read(sink.skills_path()).unwrap()).unwrap();
        assert_eq!(skills[0]["skill"], "SQL");
        assert_eq!(skills[0]["count"], 2);
    }

    #[tokio::test]
    async fn test_second_run_leaves_no_residue() {
        let dir = tempfile::tempdir().unwrap();
        let sink = JsonFileSink::new(dir.path());

        sink.persist(&batch(vec![("1", vec!["SQL"]), ("2", vec!["Java"]), ("3", vec!["Go"])]))
            .await
            .unwrap();
        sink.persist(&batch(vec![("9", vec!["Rust"])])).await.unwrap();

        let results = sink.load_results().await.unwrap();
        assert_eq!(results.listings.len(), 1);
        assert_eq!(results.listings[0].name, "Vacancy 9");
        assert_eq!(results.skills.len(), 1);
        assert_eq!(results.skills[0].skill, "Rust");
    }

    #[tokio::test]
    async fn test_non_ascii_written_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let sink = JsonFileSink::new(dir.path());

        sink.persist(&batch(vec![("1", vec!["Тестирование"])])).await.unwrap();

        let text = std::fs::read_to_string(sink.skills_path()).unwrap();
        assert!(text.contains("Тестирование"));
        assert!(text.contains("\n    {"));
    }

    #[tokio::test]
    async fn test_load_missing_files_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let sink = JsonFileSink::new(dir.path().join("nothing-here"));
        assert_eq!(sink.load_results().await.unwrap(), StoredResults::default());
    }
}
