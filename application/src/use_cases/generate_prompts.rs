//! Generate Prompts use case
//!
//! Onboarding helper: asks every provider for questions a prospective
//! customer might type when researching the brand's category, and merges
//! the suggestions into one list.

use crate::use_cases::fan_out::FanOutOrchestrator;
use crate::use_cases::run_sentiment_scan::ScanError;
use brandlens_domain::{
    DomainError, PromptBuilder, PromptSuggestions, PromptSuggestionsSchema, ProviderFailure,
};
use tracing::{debug, info};

/// Brand description for onboarding; no stored project exists yet
#[derive(Debug, Clone, Default)]
pub struct GeneratePromptsInput {
    pub brand_name: String,
    pub brand_variants: Vec<String>,
    pub domain: String,
    pub business_context: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GeneratePromptsOutput {
    /// Merged suggestions, at most ten
    pub prompts: Vec<String>,
    pub failures: Vec<ProviderFailure>,
}

pub struct GeneratePromptsUseCase {
    orchestrator: FanOutOrchestrator,
}

impl GeneratePromptsUseCase {
    pub fn new(orchestrator: FanOutOrchestrator) -> Self {
        Self { orchestrator }
    }

    pub async fn execute(&self, input: GeneratePromptsInput) -> Result<GeneratePromptsOutput, ScanError> {
        if input.brand_name.trim().is_empty() {
            return Err(DomainError::InvalidBrand("brand name is empty".to_string()).into());
        }

        let request = PromptBuilder::onboarding(
            input.brand_name.trim(),
            &input.brand_variants,
            &input.domain,
            input.business_context.as_deref(),
        );
        let fan_out = self.orchestrator.run(request, PromptSuggestionsSchema).await?;

        for success in &fan_out.successes {
            debug!(
                provider = %success.provider_id,
                "{} suggestions",
                success.payload.prompts.len()
            );
        }

        let prompts = PromptSuggestions::merge(fan_out.successes.iter().map(|s| &s.payload));
        info!("Generated {} onboarding prompts", prompts.len());

        Ok(GeneratePromptsOutput {
            prompts,
            failures: fan_out.failures,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::provider_adapter::{ProviderAdapter, ProviderTransportError};
    use async_trait::async_trait;
    use brandlens_domain::{ProviderId, QueryRequest, RawResponse, RetryPolicy};
    use std::sync::Arc;

    struct StubAdapter(ProviderId, &'static str);

    #[async_trait]
    impl ProviderAdapter for StubAdapter {
        fn id(&self) -> &ProviderId {
            &self.0
        }

        async fn query(&self, _request: &QueryRequest) -> Result<RawResponse, ProviderTransportError> {
            Ok(RawResponse::new(self.1, "stub"))
        }
    }

    fn use_case(providers: Vec<Arc<dyn ProviderAdapter>>) -> GeneratePromptsUseCase {
        GeneratePromptsUseCase::new(FanOutOrchestrator::new(
            providers,
            RetryPolicy::default().without_delay(),
        ))
    }

    fn input(brand: &str) -> GeneratePromptsInput {
        GeneratePromptsInput {
            brand_name: brand.to_string(),
            domain: "anvils".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_merges_suggestions_in_provider_order() {
        let providers: Vec<Arc<dyn ProviderAdapter>> = vec![
            Arc::new(StubAdapter(
                ProviderId::Anthropic,
                r#"{"prompts": ["best anvils", "anvil care"]}"#,
            )),
            Arc::new(StubAdapter(
                ProviderId::OpenAi,
                r#"```json
["Best Anvils", "cheap anvils"]
```"#,
            )),
        ];

        let output = use_case(providers).execute(input("Acme")).await.unwrap();
        assert_eq!(output.prompts, vec!["best anvils", "anvil care", "cheap anvils"]);
        assert!(output.failures.is_empty());
    }

    #[tokio::test]
    async fn test_blank_brand_is_rejected() {
        let err = use_case(vec![]).execute(input("  ")).await.unwrap_err();
        assert!(matches!(err, ScanError::Domain(DomainError::InvalidBrand(_))));
        assert!(!err.is_retryable());
    }
}
