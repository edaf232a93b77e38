//! Domain error types

use crate::scan::outcome::ProviderFailure;
use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    #[error("User {user_id} does not own project {project_id}")]
    Forbidden { project_id: String, user_id: String },

    #[error("All {} providers failed: {}", .0.len(), summarize(.0))]
    TotalProviderFailure(Vec<ProviderFailure>),

    #[error("Invalid brand: {0}")]
    InvalidBrand(String),
}

impl DomainError {
    /// Whether re-running the whole scan may succeed.
    ///
    /// Only provider failures are transient; authorization and validation
    /// errors fail the same way every time.
    pub fn is_retryable(&self) -> bool {
        matches!(self, DomainError::TotalProviderFailure(_))
    }
}

fn summarize(failures: &[ProviderFailure]) -> String {
    failures
        .iter()
        .map(|f| format!("{} ({})", f.provider_id, f.reason))
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::provider::ProviderId;

    #[test]
    fn test_total_failure_display_lists_providers() {
        let error = DomainError::TotalProviderFailure(vec![
            ProviderFailure::new(ProviderId::OpenAi, "timeout"),
            ProviderFailure::new(ProviderId::Anthropic, "no JSON found"),
        ]);
        let text = error.to_string();
        assert!(text.starts_with("All 2 providers failed"));
        assert!(text.contains("openai (timeout)"));
        assert!(text.contains("anthropic (no JSON found)"));
    }

    #[test]
    fn test_only_provider_failure_is_retryable() {
        assert!(DomainError::TotalProviderFailure(vec![]).is_retryable());
        assert!(!DomainError::ProjectNotFound("p1".into()).is_retryable());
        assert!(
            !DomainError::Forbidden {
                project_id: "p1".into(),
                user_id: "u1".into()
            }
            .is_retryable()
        );
    }
}
