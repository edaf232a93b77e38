//! Application layer for brandlens
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{JobParams, ScanParams};
pub use ports::{
    job_queue::{JobError, JobFailure, JobId, JobQueue, JobStatus, ScanJob, ScanJobHandler},
    progress::{NoProgress, ScanProgressNotifier},
    provider_adapter::{ProviderAdapter, ProviderTransportError},
    repository::{NewScanRecord, PersistedScan, ProjectLookup, RepositoryError, ScanRepository},
};
pub use use_cases::fan_out::{FanOutError, FanOutOrchestrator, FanOutResult};
pub use use_cases::generate_prompts::{
    GeneratePromptsInput, GeneratePromptsOutput, GeneratePromptsUseCase,
};
pub use use_cases::retry_coordinator::{AttemptError, RetryCoordinator};
pub use use_cases::run_sentiment_scan::{
    RunSentimentScanInput, RunSentimentScanOutput, RunSentimentScanUseCase, ScanError,
};
pub use use_cases::run_visibility_scan::{RunVisibilityScanInput, RunVisibilityScanUseCase};
