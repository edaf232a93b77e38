//! JSONL scan repository.
//!
//! Appends one JSON object per persisted scan. Per-provider payloads keep
//! the compact `{s, t, kp, kn}` shape downstream consumers read.

use async_trait::async_trait;
use brandlens_application::{NewScanRecord, PersistedScan, RepositoryError, ScanRepository};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

pub struct JsonlScanRepository {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlScanRepository {
    /// Open the file for appending, creating it and its parent directories.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, RepositoryError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                RepositoryError::Storage(format!(
                    "could not create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                RepositoryError::Storage(format!("could not open {}: {}", path.display(), e))
            })?;

        Ok(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ScanRepository for JsonlScanRepository {
    async fn save(&self, record: NewScanRecord) -> Result<PersistedScan, RepositoryError> {
        let scan = PersistedScan::from_record(super::new_scan_id(), record);
        let line = serde_json::to_string(&scan)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        let mut writer = self
            .writer
            .lock()
            .map_err(|_| RepositoryError::Storage("scan writer lock poisoned".to_string()))?;
        writeln!(writer, "{}", line)
            .and_then(|_| writer.flush())
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        debug!(scan_id = %scan.id, path = %self.path.display(), "Scan appended");
        Ok(scan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brandlens_domain::{ProviderId, StructuredResult, Theme};
    use chrono::{TimeZone, Utc};
    use std::collections::BTreeMap;

    /// Parse every well-formed line of the log
    fn read_scans(path: &Path) -> Vec<PersistedScan> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .filter_map(|line| serde_json::from_str(line).ok())
            .collect()
    }

    fn record(score: u8) -> NewScanRecord {
        let success = StructuredResult {
            score,
            themes: vec![Theme::Label("price".to_string())],
            positive_keywords: vec!["sturdy".to_string()],
            negative_keywords: vec!["heavy".to_string()],
        };
        NewScanRecord {
            subject_id: "p1".into(),
            scanned_at: Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
            overall_score: score,
            per_provider_results: BTreeMap::from([
                (ProviderId::Anthropic, success),
                (ProviderId::OpenAi, StructuredResult::placeholder()),
            ]),
        }
    }

    #[tokio::test]
    async fn test_save_appends_one_line_per_scan() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("scans.jsonl");
        let repo = JsonlScanRepository::open(&path).unwrap();

        let first = repo.save(record(70)).await.unwrap();
        repo.save(record(80)).await.unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);

        let line: serde_json::Value =
            serde_json::from_str(content.lines().next().unwrap()).unwrap();
        assert_eq!(line["id"], first.id.as_str());
        assert_eq!(line["overall_score"], 70);
        assert_eq!(
            line["per_provider_results"]["openai"],
            serde_json::json!({"s": 0, "t": [], "kp": [], "kn": []})
        );
        assert_eq!(line["per_provider_results"]["anthropic"]["t"][0], "price");
    }

    #[tokio::test]
    async fn test_reopen_appends_and_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scans.jsonl");

        JsonlScanRepository::open(&path)
            .unwrap()
            .save(record(10))
            .await
            .unwrap();
        let repo = JsonlScanRepository::open(&path).unwrap();
        repo.save(record(20)).await.unwrap();

        let scans = read_scans(repo.path());
        assert_eq!(scans.len(), 2);
        assert_eq!(scans[0].overall_score, 10);
        assert_eq!(scans[1].overall_score, 20);
        assert_eq!(scans[1].per_provider_results.len(), 2);
    }

    #[tokio::test]
    async fn test_appends_after_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scans.jsonl");
        std::fs::write(&path, "not json\n\n").unwrap();

        let repo = JsonlScanRepository::open(&path).unwrap();
        repo.save(record(55)).await.unwrap();

        let scans = read_scans(repo.path());
        assert_eq!(scans.len(), 1);
        assert_eq!(scans[0].overall_score, 55);
    }
}
