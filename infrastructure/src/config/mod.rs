//! Configuration file loading for brandlens
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `BRANDLENS_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./brandlens.toml` or `./.brandlens.toml`
//! 4. Global: `$XDG_CONFIG_HOME/brandlens/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileAnthropicConfig, FileCompatibleConfig, FileConfig,
    FileJobsConfig, FileOpenAiConfig, FileOutputConfig, FileOutputFormat, FileProvidersConfig,
    FileScanConfig, FileStorageConfig,
};
pub use loader::ConfigLoader;
