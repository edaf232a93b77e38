//! Scan, job and storage configuration (`[scan]`, `[jobs]`, `[storage]`)

use brandlens_application::{JobParams, ScanParams};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Per-provider retry settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileScanConfig {
    /// Attempts per provider, including the first
    pub max_attempts: u32,
    /// Flat delay between attempts
    pub retry_delay_seconds: u64,
    pub temperature: Option<f32>,
}

impl Default for FileScanConfig {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            retry_delay_seconds: 3,
            temperature: None,
        }
    }
}

impl FileScanConfig {
    pub fn to_scan_params(&self) -> ScanParams {
        ScanParams::default()
            .with_max_attempts(self.max_attempts)
            .with_retry_delay(Duration::from_secs(self.retry_delay_seconds))
            .with_temperature(self.temperature)
    }
}

/// Whole-run retry settings for the job worker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileJobsConfig {
    pub max_attempts: u32,
    /// Base of the exponential backoff between whole-run attempts
    pub backoff_base_seconds: u64,
    pub queue_capacity: usize,
}

impl Default for FileJobsConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_base_seconds: 5,
            queue_capacity: 64,
        }
    }
}

impl FileJobsConfig {
    pub fn to_job_params(&self) -> JobParams {
        JobParams {
            max_attempts: self.max_attempts,
            backoff_base: Duration::from_secs(self.backoff_base_seconds),
            queue_capacity: self.queue_capacity,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStorageConfig {
    /// JSONL file for persisted scans; scans stay in memory when unset
    pub scans_path: Option<PathBuf>,
}
