//! Scan job queue port
//!
//! Scans normally run in the background. The queue owns the outer,
//! whole-run retry with exponential backoff; the per-provider retry inside
//! a run is a separate, finer layer.

use async_trait::async_trait;
use brandlens_domain::{ProjectId, UserId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier returned by [`JobQueue::enqueue`]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Payload of a scan job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanJob {
    pub subject_id: ProjectId,
    pub user_id: UserId,
}

/// Lifecycle of a queued job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum JobStatus {
    Queued,
    Running { attempt: u32 },
    RetryScheduled { next_attempt: u32, reason: String },
    Completed { scan_id: String },
    Failed { reason: String },
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed { .. } | JobStatus::Failed { .. })
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JobError {
    #[error("Job queue is full")]
    QueueFull,

    #[error("Job queue is shut down")]
    Closed,
}

/// Background execution of scan jobs
#[async_trait]
pub trait JobQueue: Send + Sync {
    async fn enqueue(&self, job: ScanJob) -> Result<JobId, JobError>;

    async fn status(&self, id: &JobId) -> Option<JobStatus>;
}

/// Error surfaced by a job handler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobFailure {
    pub message: String,
    /// Whether the outer retry should run the job again
    pub retryable: bool,
}

/// Work performed for one job attempt
#[async_trait]
pub trait ScanJobHandler: Send + Sync {
    /// Run the job once; returns the id of the persisted scan
    async fn handle(&self, job: &ScanJob) -> Result<String, JobFailure>;
}
