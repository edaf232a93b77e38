//! Extraction error types

use thiserror::Error;

/// Why a provider's text could not be turned into a structured payload
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("no JSON object or array found in response")]
    NoJsonFound,

    #[error("invalid JSON: {0}")]
    InvalidJson(String),

    #[error("schema violation: {0}")]
    SchemaViolation(String),
}
