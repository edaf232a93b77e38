//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Every section is optional; missing keys fall back to defaults.

mod output;
mod providers;
mod scan;

pub use output::{FileOutputConfig, FileOutputFormat};
pub use providers::{
    FileAnthropicConfig, FileCompatibleConfig, FileOpenAiConfig, FileProvidersConfig,
};
pub use scan::{FileJobsConfig, FileScanConfig, FileStorageConfig};

use brandlens_domain::ProviderId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("scan.max_attempts cannot be 0")]
    ZeroScanAttempts,

    #[error("jobs.max_attempts cannot be 0")]
    ZeroJobAttempts,

    #[error("jobs.queue_capacity cannot be 0")]
    ZeroQueueCapacity,

    #[error("providers.{0}.timeout_seconds cannot be 0")]
    InvalidTimeout(&'static str),

    #[error("providers.compatible.provider_id cannot be empty")]
    EmptyProviderId,

    #[error("providers.compatible.provider_id `{0}` duplicates the enabled {0} provider")]
    DuplicateProviderId(String),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub providers: FileProvidersConfig,
    pub scan: FileScanConfig,
    pub jobs: FileJobsConfig,
    pub storage: FileStorageConfig,
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.scan.max_attempts == 0 {
            return Err(ConfigValidationError::ZeroScanAttempts);
        }
        if self.jobs.max_attempts == 0 {
            return Err(ConfigValidationError::ZeroJobAttempts);
        }
        if self.jobs.queue_capacity == 0 {
            return Err(ConfigValidationError::ZeroQueueCapacity);
        }

        let timeouts = [
            ("anthropic", self.providers.anthropic.timeout_seconds),
            ("openai", self.providers.openai.timeout_seconds),
            ("compatible", self.providers.compatible.timeout_seconds),
        ];
        if let Some((name, _)) = timeouts.iter().find(|(_, secs)| *secs == 0) {
            return Err(ConfigValidationError::InvalidTimeout(*name));
        }

        let compatible = &self.providers.compatible;
        if compatible.enabled {
            if compatible.provider_id.trim().is_empty() {
                return Err(ConfigValidationError::EmptyProviderId);
            }
            // Aliases such as "claude" resolve to a built-in id
            let id = ProviderId::from(compatible.provider_id.as_str());
            let taken = (self.providers.anthropic.enabled && id == ProviderId::Anthropic)
                || (self.providers.openai.enabled && id == ProviderId::OpenAi);
            if taken {
                return Err(ConfigValidationError::DuplicateProviderId(
                    id.as_str().to_string(),
                ));
            }
        }

        Ok(())
    }
}
