//! Persistence ports
//!
//! The scan core never stores anything itself; it hands a finished
//! aggregate to these collaborators.

use async_trait::async_trait;
use brandlens_domain::{Project, ProjectId, ProviderId, StructuredResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors raised by storage adapters
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Scan record handed to the repository
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewScanRecord {
    pub subject_id: ProjectId,
    pub scanned_at: DateTime<Utc>,
    pub overall_score: u8,
    pub per_provider_results: BTreeMap<ProviderId, StructuredResult>,
}

/// Scan record as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedScan {
    pub id: String,
    pub subject_id: ProjectId,
    pub scanned_at: DateTime<Utc>,
    pub overall_score: u8,
    pub per_provider_results: BTreeMap<ProviderId, StructuredResult>,
}

impl PersistedScan {
    pub fn from_record(id: impl Into<String>, record: NewScanRecord) -> Self {
        Self {
            id: id.into(),
            subject_id: record.subject_id,
            scanned_at: record.scanned_at,
            overall_score: record.overall_score,
            per_provider_results: record.per_provider_results,
        }
    }
}

/// Lookup of brand projects by id
#[async_trait]
pub trait ProjectLookup: Send + Sync {
    async fn find_by_id(&self, id: &ProjectId) -> Result<Option<Project>, RepositoryError>;
}

/// Storage of finished sentiment scans
#[async_trait]
pub trait ScanRepository: Send + Sync {
    async fn save(&self, record: NewScanRecord) -> Result<PersistedScan, RepositoryError>;
}
