//! In-memory adapters, used by the CLI for ad-hoc projects and by tests.

use async_trait::async_trait;
use brandlens_application::{
    NewScanRecord, PersistedScan, ProjectLookup, RepositoryError, ScanRepository,
};
use brandlens_domain::{Project, ProjectId};
use std::collections::HashMap;
use std::sync::RwLock;

#[derive(Default)]
pub struct InMemoryProjectStore {
    projects: RwLock<HashMap<ProjectId, Project>>,
}

impl InMemoryProjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a project
    pub fn insert(&self, project: Project) -> Result<(), RepositoryError> {
        let mut projects = self
            .projects
            .write()
            .map_err(|_| RepositoryError::Storage("project store lock poisoned".to_string()))?;
        projects.insert(project.id.clone(), project);
        Ok(())
    }
}

#[async_trait]
impl ProjectLookup for InMemoryProjectStore {
    async fn find_by_id(&self, id: &ProjectId) -> Result<Option<Project>, RepositoryError> {
        let projects = self
            .projects
            .read()
            .map_err(|_| RepositoryError::Storage("project store lock poisoned".to_string()))?;
        Ok(projects.get(id).cloned())
    }
}

#[derive(Default)]
pub struct InMemoryScanRepository {
    scans: RwLock<Vec<PersistedScan>>,
}

impl InMemoryScanRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every persisted scan, oldest first
    pub fn all(&self) -> Vec<PersistedScan> {
        self.scans
            .read()
            .map(|scans| scans.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ScanRepository for InMemoryScanRepository {
    async fn save(&self, record: NewScanRecord) -> Result<PersistedScan, RepositoryError> {
        let scan = PersistedScan::from_record(super::new_scan_id(), record);
        self.scans
            .write()
            .map_err(|_| RepositoryError::Storage("scan store lock poisoned".to_string()))?
            .push(scan.clone());
        Ok(scan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brandlens_domain::{ProviderId, StructuredResult};
    use chrono::Utc;
    use std::collections::BTreeMap;

    #[tokio::test]
    async fn test_project_store_lookup() {
        let store = InMemoryProjectStore::new();
        store
            .insert(Project::new("p1", "alice", "Acme", "anvils"))
            .unwrap();

        let found = store.find_by_id(&"p1".into()).await.unwrap();
        assert_eq!(found.map(|p| p.brand_name), Some("Acme".to_string()));
        assert!(store.find_by_id(&"p2".into()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_scan_repository_assigns_unique_ids() {
        let repo = InMemoryScanRepository::new();
        let record = NewScanRecord {
            subject_id: "p1".into(),
            scanned_at: Utc::now(),
            overall_score: 42,
            per_provider_results: BTreeMap::from([(
                ProviderId::OpenAi,
                StructuredResult::placeholder(),
            )]),
        };

        let first = repo.save(record.clone()).await.unwrap();
        let second = repo.save(record).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(repo.all().len(), 2);
        assert_eq!(repo.all()[0].overall_score, 42);
    }
}
