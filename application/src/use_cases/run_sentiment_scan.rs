//! Run Sentiment Scan use case
//!
//! Authorization, prompt, provider fan-out, aggregation and persistence for
//! one brand sentiment scan.

use crate::ports::job_queue::{JobFailure, ScanJob, ScanJobHandler};
use crate::ports::repository::{NewScanRecord, PersistedScan, ProjectLookup, RepositoryError, ScanRepository};
use crate::use_cases::fan_out::{FanOutError, FanOutOrchestrator};
use crate::use_cases::shared::{AuthorizeError, authorize};
use async_trait::async_trait;
use brandlens_domain::{
    AggregateResult, DomainError, ProjectId, PromptBuilder, ProviderFailure, ProviderId,
    SentimentSchema, UserId,
};
use chrono::Utc;
use std::sync::Arc;
use thiserror::Error;
use tracing::{Instrument, Span, error, info, info_span};

/// Errors that can occur during a scan
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScanError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("No providers configured")]
    NoProviders,

    #[error("Provider {0} is configured more than once")]
    DuplicateProvider(ProviderId),

    #[error("Persistence failed: {0}")]
    Persistence(#[from] RepositoryError),
}

impl ScanError {
    /// Whether the outer job retry should run the scan again
    pub fn is_retryable(&self) -> bool {
        match self {
            ScanError::Domain(e) => e.is_retryable(),
            ScanError::NoProviders
            | ScanError::DuplicateProvider(_)
            | ScanError::Persistence(_) => false,
        }
    }

    /// Value recorded in the `outcome` span field
    pub fn outcome_label(&self) -> &'static str {
        match self {
            ScanError::Domain(DomainError::ProjectNotFound(_)) => "not_found",
            ScanError::Domain(DomainError::Forbidden { .. }) => "forbidden",
            ScanError::Domain(DomainError::TotalProviderFailure(_)) => "total_provider_failure",
            ScanError::Domain(DomainError::InvalidBrand(_)) => "invalid_brand",
            ScanError::NoProviders => "no_providers",
            ScanError::DuplicateProvider(_) => "duplicate_provider",
            ScanError::Persistence(_) => "persistence_failed",
        }
    }
}

impl From<AuthorizeError> for ScanError {
    fn from(e: AuthorizeError) -> Self {
        match e {
            AuthorizeError::Domain(e) => ScanError::Domain(e),
            AuthorizeError::Repository(e) => ScanError::Persistence(e),
        }
    }
}

impl From<ScanError> for JobFailure {
    fn from(e: ScanError) -> Self {
        JobFailure {
            retryable: e.is_retryable(),
            message: e.to_string(),
        }
    }
}

impl From<FanOutError> for ScanError {
    fn from(e: FanOutError) -> Self {
        match e {
            FanOutError::NoProviders => ScanError::NoProviders,
            FanOutError::DuplicateProvider(id) => ScanError::DuplicateProvider(id),
            FanOutError::TotalProviderFailure(failures) => {
                ScanError::Domain(DomainError::TotalProviderFailure(failures))
            }
        }
    }
}

/// Input for the RunSentimentScan use case
#[derive(Debug, Clone)]
pub struct RunSentimentScanInput {
    pub project_id: ProjectId,
    pub user_id: UserId,
}

impl RunSentimentScanInput {
    pub fn new(project_id: impl Into<ProjectId>, user_id: impl Into<UserId>) -> Self {
        Self {
            project_id: project_id.into(),
            user_id: user_id.into(),
        }
    }
}

/// Output of a persisted scan
#[derive(Debug, Clone)]
pub struct RunSentimentScanOutput {
    pub scan: PersistedScan,
    /// Providers that exhausted their retries; empty unless partial
    pub failures: Vec<ProviderFailure>,
}

impl RunSentimentScanOutput {
    pub fn is_partial(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Use case for running a brand sentiment scan
pub struct RunSentimentScanUseCase<P: ProjectLookup + 'static, R: ScanRepository + 'static> {
    projects: Arc<P>,
    scans: Arc<R>,
    orchestrator: FanOutOrchestrator,
    temperature: Option<f32>,
}

impl<P: ProjectLookup + 'static, R: ScanRepository + 'static> RunSentimentScanUseCase<P, R> {
    pub fn new(projects: Arc<P>, scans: Arc<R>, orchestrator: FanOutOrchestrator) -> Self {
        Self {
            projects,
            scans,
            orchestrator,
            temperature: None,
        }
    }

    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    /// Execute the scan. On total provider failure nothing is persisted.
    pub async fn execute(
        &self,
        input: RunSentimentScanInput,
    ) -> Result<RunSentimentScanOutput, ScanError> {
        let span = info_span!(
            "sentiment_scan",
            subject_id = %input.project_id,
            outcome = tracing::field::Empty,
        );

        let result = self.run(&input).instrument(span.clone()).await;
        record_outcome(&span, &result);
        result
    }

    async fn run(&self, input: &RunSentimentScanInput) -> Result<RunSentimentScanOutput, ScanError> {
        let project = authorize(self.projects.as_ref(), &input.project_id, &input.user_id).await?;

        let mut request = PromptBuilder::sentiment_for(&project);
        if let Some(temperature) = self.temperature {
            request = request.with_temperature(temperature);
        }

        let fan_out = self.orchestrator.run(request, SentimentSchema).await?;
        let aggregate = AggregateResult::build(Utc::now(), &fan_out.successes, fan_out.failures)?;

        info!(
            overall_score = aggregate.overall_score,
            partial = aggregate.is_partial(),
            "Aggregated {} provider results",
            aggregate.per_provider_results.len()
        );

        let record = NewScanRecord {
            subject_id: project.id.clone(),
            scanned_at: aggregate.scanned_at,
            overall_score: aggregate.overall_score,
            per_provider_results: aggregate.per_provider_results,
        };
        let scan = self.scans.save(record).await.inspect_err(|e| {
            error!("Failed to persist scan: {}", e);
        })?;

        Ok(RunSentimentScanOutput {
            scan,
            failures: aggregate.failures,
        })
    }
}

fn record_outcome<T>(span: &Span, result: &Result<T, ScanError>) {
    let label = match result {
        Ok(_) => "persisted",
        Err(e) => e.outcome_label(),
    };
    span.record("outcome", label);
}

#[async_trait]
impl<P: ProjectLookup + 'static, R: ScanRepository + 'static> ScanJobHandler
    for RunSentimentScanUseCase<P, R>
{
    async fn handle(&self, job: &ScanJob) -> Result<String, JobFailure> {
        let input = RunSentimentScanInput {
            project_id: job.subject_id.clone(),
            user_id: job.user_id.clone(),
        };
        self.execute(input)
            .await
            .map(|output| output.scan.id)
            .map_err(JobFailure::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::provider_adapter::{ProviderAdapter, ProviderTransportError};
    use crate::use_cases::shared::test_support::StaticProjects;
    use brandlens_domain::{Project, QueryRequest, RawResponse, RetryPolicy};
    use std::sync::Mutex;

    // ==================== Test Mocks ====================

    struct StubAdapter {
        id: ProviderId,
        reply: Result<String, ProviderTransportError>,
        seen: Mutex<Vec<String>>,
    }

    impl StubAdapter {
        fn new(id: ProviderId, reply: Result<&str, ProviderTransportError>) -> Arc<Self> {
            Arc::new(Self {
                id,
                reply: reply.map(str::to_string),
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl ProviderAdapter for StubAdapter {
        fn id(&self) -> &ProviderId {
            &self.id
        }

        async fn query(&self, request: &QueryRequest) -> Result<RawResponse, ProviderTransportError> {
            self.seen.lock().unwrap().push(request.prompt_text.clone());
            self.reply.clone().map(|text| RawResponse::new(text, "stub"))
        }
    }

    #[derive(Default)]
    struct RecordingRepository {
        saved: Mutex<Vec<NewScanRecord>>,
        fail: bool,
    }

    #[async_trait]
    impl ScanRepository for RecordingRepository {
        async fn save(&self, record: NewScanRecord) -> Result<PersistedScan, RepositoryError> {
            if self.fail {
                return Err(RepositoryError::Storage("disk full".into()));
            }
            let mut saved = self.saved.lock().unwrap();
            saved.push(record.clone());
            Ok(PersistedScan::from_record(format!("scan-{}", saved.len()), record))
        }
    }

    fn use_case(
        providers: Vec<Arc<dyn ProviderAdapter>>,
        repo: Arc<RecordingRepository>,
    ) -> RunSentimentScanUseCase<StaticProjects, RecordingRepository> {
        let project = Project::new("p1", "alice", "Acme", "anvils")
            .with_variants(vec!["ACME Corp".into()]);
        RunSentimentScanUseCase::new(
            Arc::new(StaticProjects::with(project)),
            repo,
            FanOutOrchestrator::new(providers, RetryPolicy::default().without_delay()),
        )
    }

    const VALID: &str = r#"{"s": 64, "t": ["durability"], "kp": ["tough"], "kn": ["heavy"]}"#;

    #[tokio::test]
    async fn test_scan_is_persisted() {
        let adapter = StubAdapter::new(ProviderId::Anthropic, Ok(VALID));
        let repo = Arc::new(RecordingRepository::default());
        let output = use_case(vec![adapter.clone()], repo.clone())
            .execute(RunSentimentScanInput::new("p1", "alice"))
            .await
            .unwrap();

        assert_eq!(output.scan.id, "scan-1");
        assert_eq!(output.scan.overall_score, 64);
        assert!(!output.is_partial());
        assert_eq!(repo.saved.lock().unwrap().len(), 1);

        let prompt = adapter.seen.lock().unwrap()[0].clone();
        assert!(prompt.contains("Acme"));
        assert!(prompt.contains("ACME Corp"));
    }

    #[tokio::test]
    async fn test_forbidden_never_queries_providers() {
        let adapter = StubAdapter::new(ProviderId::Anthropic, Ok(VALID));
        let repo = Arc::new(RecordingRepository::default());
        let err = use_case(vec![adapter.clone()], repo.clone())
            .execute(RunSentimentScanInput::new("p1", "mallory"))
            .await
            .unwrap_err();

        assert_eq!(err.outcome_label(), "forbidden");
        assert!(!err.is_retryable());
        assert!(adapter.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_not_found() {
        let repo = Arc::new(RecordingRepository::default());
        let err = use_case(vec![], repo)
            .execute(RunSentimentScanInput::new("missing", "alice"))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ScanError::Domain(DomainError::ProjectNotFound("missing".into()))
        );
    }

    #[tokio::test]
    async fn test_no_providers() {
        let repo = Arc::new(RecordingRepository::default());
        let err = use_case(vec![], repo)
            .execute(RunSentimentScanInput::new("p1", "alice"))
            .await
            .unwrap_err();
        assert_eq!(err, ScanError::NoProviders);
    }

    #[tokio::test]
    async fn test_duplicate_provider_is_permanent_and_not_saved() {
        let repo = Arc::new(RecordingRepository::default());
        let err = use_case(
            vec![
                StubAdapter::new(ProviderId::Anthropic, Ok(VALID)),
                StubAdapter::new(ProviderId::OpenAi, Ok(VALID)),
                StubAdapter::new(ProviderId::from("claude"), Ok(VALID)),
            ],
            repo.clone(),
        )
        .execute(RunSentimentScanInput::new("p1", "alice"))
        .await
        .unwrap_err();

        assert_eq!(err, ScanError::DuplicateProvider(ProviderId::Anthropic));
        assert!(!err.is_retryable());
        assert_eq!(err.outcome_label(), "duplicate_provider");
        assert!(repo.saved.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_total_failure_is_retryable_and_not_saved() {
        let repo = Arc::new(RecordingRepository::default());
        let err = use_case(
            vec![StubAdapter::new(ProviderId::OpenAi, Ok("I cannot help with that."))],
            repo.clone(),
        )
        .execute(RunSentimentScanInput::new("p1", "alice"))
        .await
        .unwrap_err();

        assert!(err.is_retryable());
        assert_eq!(err.outcome_label(), "total_provider_failure");
        assert!(repo.saved.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_persistence_failure_surfaces() {
        let repo = Arc::new(RecordingRepository {
            fail: true,
            ..Default::default()
        });
        let err = use_case(
            vec![StubAdapter::new(ProviderId::Anthropic, Ok(VALID))],
            repo,
        )
        .execute(RunSentimentScanInput::new("p1", "alice"))
        .await
        .unwrap_err();

        assert!(matches!(err, ScanError::Persistence(_)));
        assert_eq!(err.outcome_label(), "persistence_failed");
    }

    #[tokio::test]
    async fn test_job_handler_maps_retryability() {
        let repo = Arc::new(RecordingRepository::default());
        let handler = use_case(
            vec![StubAdapter::new(
                ProviderId::OpenAi,
                Err(ProviderTransportError::Network("reset".into())),
            )],
            repo,
        );
        let job = ScanJob {
            subject_id: "p1".into(),
            user_id: "alice".into(),
        };

        let failure = handler.handle(&job).await.unwrap_err();
        assert!(failure.retryable);
        assert!(failure.message.contains("openai"));
    }
}
