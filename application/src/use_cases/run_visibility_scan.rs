//! Run Visibility Scan use case
//!
//! Asks every provider whether the brand comes up in a typical answer for
//! its category, then reduces the answers to a mention rate.

use crate::ports::repository::ProjectLookup;
use crate::use_cases::fan_out::FanOutOrchestrator;
use crate::use_cases::run_sentiment_scan::ScanError;
use crate::use_cases::shared::authorize;
use brandlens_domain::{ProjectId, PromptBuilder, UserId, VisibilityReport, VisibilitySchema};
use chrono::Utc;
use std::sync::Arc;
use tracing::{Instrument, info, info_span};

#[derive(Debug, Clone)]
pub struct RunVisibilityScanInput {
    pub project_id: ProjectId,
    pub user_id: UserId,
}

impl RunVisibilityScanInput {
    pub fn new(project_id: impl Into<ProjectId>, user_id: impl Into<UserId>) -> Self {
        Self {
            project_id: project_id.into(),
            user_id: user_id.into(),
        }
    }
}

/// Use case for running a brand visibility scan
pub struct RunVisibilityScanUseCase<P: ProjectLookup + 'static> {
    projects: Arc<P>,
    orchestrator: FanOutOrchestrator,
}

impl<P: ProjectLookup + 'static> RunVisibilityScanUseCase<P> {
    pub fn new(projects: Arc<P>, orchestrator: FanOutOrchestrator) -> Self {
        Self {
            projects,
            orchestrator,
        }
    }

    pub async fn execute(&self, input: RunVisibilityScanInput) -> Result<VisibilityReport, ScanError> {
        let span = info_span!(
            "visibility_scan",
            subject_id = %input.project_id,
            outcome = tracing::field::Empty,
        );

        let result = self.run(&input).instrument(span.clone()).await;
        span.record(
            "outcome",
            match &result {
                Ok(_) => "completed",
                Err(e) => e.outcome_label(),
            },
        );
        result
    }

    async fn run(&self, input: &RunVisibilityScanInput) -> Result<VisibilityReport, ScanError> {
        let project = authorize(self.projects.as_ref(), &input.project_id, &input.user_id).await?;

        let fan_out = self
            .orchestrator
            .run(PromptBuilder::visibility_for(&project), VisibilitySchema)
            .await?;
        let report = VisibilityReport::build(Utc::now(), &fan_out.successes, fan_out.failures)?;

        info!(mention_rate = report.mention_rate, "Visibility scan complete");
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::provider_adapter::{ProviderAdapter, ProviderTransportError};
    use crate::use_cases::shared::test_support::StaticProjects;
    use async_trait::async_trait;
    use brandlens_domain::{DomainError, Project, ProviderId, QueryRequest, RawResponse, RetryPolicy};

    struct StubAdapter(ProviderId, Result<&'static str, ProviderTransportError>);

    #[async_trait]
    impl ProviderAdapter for StubAdapter {
        fn id(&self) -> &ProviderId {
            &self.0
        }

        async fn query(&self, _request: &QueryRequest) -> Result<RawResponse, ProviderTransportError> {
            self.1.clone().map(|text| RawResponse::new(text, "stub"))
        }
    }

    fn use_case(providers: Vec<Arc<dyn ProviderAdapter>>) -> RunVisibilityScanUseCase<StaticProjects> {
        RunVisibilityScanUseCase::new(
            Arc::new(StaticProjects::with(Project::new("p1", "alice", "Acme", "anvils"))),
            FanOutOrchestrator::new(providers, RetryPolicy::default().without_delay()),
        )
    }

    #[tokio::test]
    async fn test_mention_rate_over_successes_only() {
        let providers: Vec<Arc<dyn ProviderAdapter>> = vec![
            Arc::new(StubAdapter(
                ProviderId::Anthropic,
                Ok(r#"{"mentioned": true, "position": 2, "competitors": ["Ajax"]}"#),
            )),
            Arc::new(StubAdapter(
                ProviderId::OpenAi,
                Ok(r#"{"mentioned": false, "position": null, "competitors": []}"#),
            )),
            Arc::new(StubAdapter(
                ProviderId::Perplexity,
                Err(ProviderTransportError::Timeout),
            )),
        ];

        let report = use_case(providers)
            .execute(RunVisibilityScanInput::new("p1", "alice"))
            .await
            .unwrap();

        assert_eq!(report.mention_rate, 50);
        assert_eq!(report.per_provider_results.len(), 3);
        assert_eq!(report.per_provider_results[&ProviderId::Perplexity], None);
        assert_eq!(report.failures.len(), 1);
    }

    #[tokio::test]
    async fn test_total_failure() {
        let providers: Vec<Arc<dyn ProviderAdapter>> = vec![Arc::new(StubAdapter(
            ProviderId::Anthropic,
            Ok("no idea"),
        ))];

        let err = use_case(providers)
            .execute(RunVisibilityScanInput::new("p1", "alice"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ScanError::Domain(DomainError::TotalProviderFailure(ref f)) if f.len() == 1
        ));
    }
}
