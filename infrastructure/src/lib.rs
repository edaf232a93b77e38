//! Infrastructure layer for brandlens
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: provider HTTP clients, persistence, the
//! background job worker, and configuration file loading.

pub mod config;
pub mod jobs;
pub mod persistence;
pub mod providers;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileOutputConfig, FileOutputFormat,
    FileProvidersConfig,
};
pub use jobs::ScanJobWorker;
pub use persistence::{InMemoryProjectStore, InMemoryScanRepository, JsonlScanRepository};
pub use providers::{
    AnthropicAdapter, CompatibleAdapter, OpenAiAdapter, assemble_providers,
    assemble_providers_with,
};
