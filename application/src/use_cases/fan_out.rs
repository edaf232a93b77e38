//! Provider fan-out / fan-in
//!
//! Runs one [`RetryCoordinator`] per configured provider as an independent
//! tokio task and waits for every task to settle. A fast failure never
//! cancels its siblings; the join is a barrier, not a race.

use crate::ports::progress::{NoProgress, ScanProgressNotifier};
use crate::ports::provider_adapter::ProviderAdapter;
use crate::use_cases::retry_coordinator::RetryCoordinator;
use brandlens_domain::{
    ProviderFailure, ProviderId, ProviderOutcome, ProviderSuccess, QueryRequest, ResultSchema,
    RetryPolicy, partition_outcomes,
};
use futures::future::join_all;
use std::collections::BTreeSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

/// Errors that end a fan-out as a whole
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FanOutError {
    #[error("No providers configured")]
    NoProviders,

    #[error("Provider {0} is configured more than once")]
    DuplicateProvider(ProviderId),

    #[error("All {} providers failed", .0.len())]
    TotalProviderFailure(Vec<ProviderFailure>),
}

/// Settled outcomes of a fan-out with at least one success
#[derive(Debug, Clone)]
pub struct FanOutResult<T> {
    pub successes: Vec<ProviderSuccess<T>>,
    pub failures: Vec<ProviderFailure>,
}

impl<T> FanOutResult<T> {
    pub fn is_partial(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Concurrent query of every configured provider
#[derive(Clone)]
pub struct FanOutOrchestrator {
    providers: Vec<Arc<dyn ProviderAdapter>>,
    policy: RetryPolicy,
    progress: Arc<dyn ScanProgressNotifier>,
}

impl FanOutOrchestrator {
    pub fn new(providers: Vec<Arc<dyn ProviderAdapter>>, policy: RetryPolicy) -> Self {
        Self {
            providers,
            policy,
            progress: Arc::new(NoProgress),
        }
    }

    pub fn with_progress(mut self, progress: Arc<dyn ScanProgressNotifier>) -> Self {
        self.progress = progress;
        self
    }

    /// Query all providers and partition the settled outcomes.
    ///
    /// Output order follows the configured provider order, independent of
    /// which provider finished first.
    pub async fn run<S>(
        &self,
        request: QueryRequest,
        schema: S,
    ) -> Result<FanOutResult<S::Output>, FanOutError>
    where
        S: ResultSchema + Clone,
    {
        if self.providers.is_empty() {
            return Err(FanOutError::NoProviders);
        }
        // Results are keyed by provider id; two adapters cannot share one
        let mut seen = BTreeSet::new();
        if let Some(adapter) = self.providers.iter().find(|a| !seen.insert(a.id().clone())) {
            error!(provider = %adapter.id(), "Duplicate provider id");
            return Err(FanOutError::DuplicateProvider(adapter.id().clone()));
        }

        info!(
            "Querying {} providers for {}",
            self.providers.len(),
            schema.name()
        );
        self.progress.on_fan_out_start(self.providers.len());

        let request = Arc::new(request);
        let handles: Vec<_> = self
            .providers
            .iter()
            .map(|adapter| {
                let coordinator = RetryCoordinator::new(Arc::clone(adapter), self.policy);
                let request = Arc::clone(&request);
                let schema = schema.clone();
                let progress = Arc::clone(&self.progress);
                let provider_id = adapter.id().clone();

                let handle = tokio::spawn(async move {
                    let outcome = coordinator
                        .run(&request, &schema, progress.as_ref())
                        .await;
                    progress.on_provider_settled(outcome.provider_id(), outcome.is_success());
                    outcome
                });
                (provider_id, handle)
            })
            .collect();

        let (ids, handles): (Vec<_>, Vec<_>) = handles.into_iter().unzip();
        let settled = join_all(handles).await;

        let outcomes = ids.into_iter().zip(settled).map(|(provider_id, joined)| {
            joined.unwrap_or_else(|e| {
                // A panicking adapter still counts as exactly one failure
                warn!(provider = %provider_id, "Provider task aborted: {}", e);
                self.progress.on_provider_settled(&provider_id, false);
                ProviderOutcome::Failure(ProviderFailure::new(
                    provider_id,
                    format!("provider task aborted: {}", e),
                ))
            })
        });
        let (successes, failures) = partition_outcomes(outcomes);

        self.progress
            .on_fan_out_complete(successes.len(), failures.len());

        if successes.is_empty() {
            error!("All {} providers failed", failures.len());
            return Err(FanOutError::TotalProviderFailure(failures));
        }

        if !failures.is_empty() {
            warn!(
                succeeded = successes.len(),
                failed = failures.len(),
                "Partial success; failed providers: {}",
                failures
                    .iter()
                    .map(|f| f.provider_id.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }

        Ok(FanOutResult {
            successes,
            failures,
        })
    }
}
