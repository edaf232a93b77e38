//! Provider adapter port
//!
//! Defines the interface for querying one external text-generation provider.

use async_trait::async_trait;
use brandlens_domain::{ProviderId, QueryRequest, RawResponse};
use thiserror::Error;

/// Network/HTTP-level failures raised by an adapter
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderTransportError {
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// One external provider (strategy per provider).
///
/// Implementations live in the infrastructure layer and own their client,
/// request timeout and provider-specific options (tool use, schema
/// enforcement). They never validate the returned text; that is the
/// extractor's job.
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    /// Stable identifier used as the key in persisted results
    fn id(&self) -> &ProviderId;

    /// Send the query and return the raw text plus usage metadata
    async fn query(&self, request: &QueryRequest) -> Result<RawResponse, ProviderTransportError>;
}
