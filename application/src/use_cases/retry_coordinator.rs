//! Per-provider retry loop
//!
//! Wraps one provider's query + extract cycle in a bounded-attempt loop.
//! Transport and extraction failures are values here, never panics, and
//! they share one budget and one flat delay.

use crate::ports::progress::ScanProgressNotifier;
use crate::ports::provider_adapter::{ProviderAdapter, ProviderTransportError};
use brandlens_domain::{
    AttemptState, ExtractionError, ProviderFailure, ProviderId, ProviderOutcome, ProviderSuccess,
    QueryRequest, RawResponse, ResultSchema, RetryPolicy, excerpt, extract,
};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Result tag of a single attempt
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AttemptError {
    #[error("transport error: {0}")]
    Transport(#[from] ProviderTransportError),

    #[error("extraction failed: {0}")]
    Extraction(#[from] ExtractionError),
}

/// Retry coordinator for one provider
pub struct RetryCoordinator {
    adapter: Arc<dyn ProviderAdapter>,
    policy: RetryPolicy,
}

impl RetryCoordinator {
    pub fn new(adapter: Arc<dyn ProviderAdapter>, policy: RetryPolicy) -> Self {
        Self { adapter, policy }
    }

    /// Run attempts until one succeeds or the budget is spent.
    ///
    /// Always settles to exactly one outcome.
    pub async fn run<S: ResultSchema>(
        &self,
        request: &QueryRequest,
        schema: &S,
        progress: &dyn ScanProgressNotifier,
    ) -> ProviderOutcome<S::Output> {
        let provider = self.adapter.id().clone();
        let mut state = AttemptState::Pending;
        let mut attempt = 1;

        loop {
            transition(&provider, &mut state, AttemptState::Attempting { attempt });
            let started = Instant::now();

            let error = match self.attempt(request, schema).await {
                Ok((payload, raw)) => {
                    transition(&provider, &mut state, AttemptState::Succeeded { attempts: attempt });
                    info!(
                        provider = %provider,
                        model = %raw.model_identifier,
                        attempt,
                        input_units = raw.input_units,
                        output_units = raw.output_units,
                        "Provider succeeded"
                    );
                    return ProviderOutcome::Success(ProviderSuccess {
                        provider_id: provider,
                        payload,
                        raw_model_name: raw.model_identifier,
                        latency: started.elapsed(),
                        attempts: attempt,
                    });
                }
                Err(e) => e,
            };

            let reason = error.to_string();
            warn!(provider = %provider, attempt, "Attempt failed: {}", reason);
            progress.on_attempt_failed(&provider, attempt, &reason);

            transition(&provider, &mut state, self.policy.after_failure(attempt));
            if let AttemptState::RetryScheduled { next_attempt } = state {
                tokio::time::sleep(self.policy.delay).await;
                attempt = next_attempt;
                continue;
            }

            warn!(provider = %provider, attempts = attempt, "Retry budget exhausted");
            return ProviderOutcome::Failure(ProviderFailure::new(provider, reason));
        }
    }

    async fn attempt<S: ResultSchema>(
        &self,
        request: &QueryRequest,
        schema: &S,
    ) -> Result<(S::Output, RawResponse), AttemptError> {
        let raw = self.adapter.query(request).await?;
        let payload = extract(&raw.text, schema).inspect_err(|_| {
            debug!(
                provider = %self.adapter.id(),
                text = %excerpt(&raw.text, 200),
                "Unusable provider text"
            );
        })?;
        Ok((payload, raw))
    }
}

fn transition(provider: &ProviderId, state: &mut AttemptState, next: AttemptState) {
    debug!(
        provider = %provider,
        from = state.as_str(),
        to = next.as_str(),
        "Attempt state"
    );
    *state = next;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::progress::NoProgress;
    use async_trait::async_trait;
    use brandlens_domain::SentimentSchema;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    // ==================== Test Mocks ====================

    struct ScriptedAdapter {
        id: ProviderId,
        responses: Mutex<VecDeque<Result<String, ProviderTransportError>>>,
        calls: AtomicUsize,
    }

    impl ScriptedAdapter {
        fn new(responses: Vec<Result<String, ProviderTransportError>>) -> Arc<Self> {
            Arc::new(Self {
                id: ProviderId::OpenAi,
                responses: Mutex::new(VecDeque::from(responses)),
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ProviderAdapter for ScriptedAdapter {
        fn id(&self) -> &ProviderId {
            &self.id
        }

        async fn query(
            &self,
            _request: &QueryRequest,
        ) -> Result<RawResponse, ProviderTransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(ProviderTransportError::Network("exhausted".into())))
                .map(|text| RawResponse::new(text, "test-model").with_usage(10, 20))
        }
    }

    struct RecordingProgress {
        failures: Mutex<Vec<(u32, String)>>,
    }

    impl ScanProgressNotifier for RecordingProgress {
        fn on_fan_out_start(&self, _total: usize) {}
        fn on_attempt_failed(&self, _provider: &ProviderId, attempt: u32, reason: &str) {
            self.failures
                .lock()
                .unwrap()
                .push((attempt, reason.to_string()));
        }
        fn on_provider_settled(&self, _provider: &ProviderId, _success: bool) {}
        fn on_fan_out_complete(&self, _succeeded: usize, _failed: usize) {}
    }

    const VALID: &str = r#"{"s": 75, "t": ["quality"], "kp": ["durable"], "kn": ["slow"]}"#;

    fn policy() -> RetryPolicy {
        RetryPolicy::default().without_delay()
    }

    fn request() -> QueryRequest {
        QueryRequest::new("prompt")
    }

    #[tokio::test]
    async fn test_first_attempt_success_stops() {
        let adapter = ScriptedAdapter::new(vec![Ok(VALID.to_string())]);
        let coordinator = RetryCoordinator::new(adapter.clone(), policy());

        let outcome = coordinator
            .run(&request(), &SentimentSchema, &NoProgress)
            .await;

        match outcome {
            ProviderOutcome::Success(success) => {
                assert_eq!(success.payload.score, 75);
                assert_eq!(success.raw_model_name, "test-model");
                assert_eq!(success.attempts, 1);
            }
            other => panic!("expected success, got {:?}", other),
        }
        assert_eq!(adapter.calls(), 1);
    }

    #[tokio::test]
    async fn test_extraction_failure_then_success() {
        let adapter = ScriptedAdapter::new(vec![
            Ok("I think the brand is great!".to_string()),
            Ok(VALID.to_string()),
        ]);
        let coordinator = RetryCoordinator::new(adapter.clone(), policy());

        let outcome = coordinator
            .run(&request(), &SentimentSchema, &NoProgress)
            .await;

        assert!(outcome.is_success());
        assert_eq!(adapter.calls(), 2);
    }

    #[tokio::test]
    async fn test_transport_failure_then_success() {
        let adapter = ScriptedAdapter::new(vec![
            Err(ProviderTransportError::Timeout),
            Ok(VALID.to_string()),
        ]);
        let coordinator = RetryCoordinator::new(adapter.clone(), policy());

        let outcome = coordinator
            .run(&request(), &SentimentSchema, &NoProgress)
            .await;

        assert!(outcome.is_success());
        assert_eq!(adapter.calls(), 2);
    }

    #[tokio::test]
    async fn test_budget_exhausted_reports_last_error() {
        let adapter = ScriptedAdapter::new(vec![
            Err(ProviderTransportError::Timeout),
            Ok(r#"{"s": 150, "t": ["a"], "kp": ["b"], "kn": ["c"]}"#.to_string()),
            Ok(VALID.to_string()),
        ]);
        let coordinator = RetryCoordinator::new(adapter.clone(), policy());
        let progress = RecordingProgress {
            failures: Mutex::new(Vec::new()),
        };

        let outcome = coordinator
            .run(&request(), &SentimentSchema, &progress)
            .await;

        match outcome {
            ProviderOutcome::Failure(failure) => {
                assert_eq!(failure.provider_id, ProviderId::OpenAi);
                assert!(failure.reason.starts_with("extraction failed: schema violation"));
            }
            other => panic!("expected failure, got {:?}", other),
        }
        // Never more than the budget, even though a valid answer was queued
        assert_eq!(adapter.calls(), 2);
        let failures = progress.failures.lock().unwrap();
        assert_eq!(failures.len(), 2);
        assert_eq!(failures[0], (1, "transport error: Request timed out".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_flat_delay_between_attempts() {
        let adapter = ScriptedAdapter::new(vec![
            Err(ProviderTransportError::Network("reset".into())),
            Err(ProviderTransportError::Network("reset".into())),
            Err(ProviderTransportError::Network("reset".into())),
        ]);
        let coordinator = RetryCoordinator::new(
            adapter.clone(),
            RetryPolicy::new(3, Duration::from_secs(3)),
        );

        let started = tokio::time::Instant::now();
        let outcome = coordinator
            .run(&request(), &SentimentSchema, &NoProgress)
            .await;

        assert!(!outcome.is_success());
        assert_eq!(adapter.calls(), 3);
        // Two flat pauses, not exponential growth
        assert_eq!(started.elapsed(), Duration::from_secs(6));
    }
}
