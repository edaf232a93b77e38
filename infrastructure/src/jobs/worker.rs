//! In-process scan job worker.
//!
//! A bounded queue feeding a single worker task, so at most one scan runs
//! at a time (providers inside a run still fan out in parallel). The
//! worker owns the outer retry: a whole run that fails with a retryable
//! error is re-run after an exponential backoff, up to `max_attempts`.

use async_trait::async_trait;
use brandlens_application::{
    JobError, JobFailure, JobId, JobParams, JobQueue, JobStatus, ScanJob, ScanJobHandler,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

type StatusMap = HashMap<JobId, JobStatus>;

pub struct ScanJobWorker {
    sender: mpsc::Sender<(JobId, ScanJob)>,
    statuses: watch::Sender<StatusMap>,
    cancellation: CancellationToken,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl ScanJobWorker {
    /// Start the worker task on the current runtime.
    pub fn spawn(handler: Arc<dyn ScanJobHandler>, params: JobParams) -> Self {
        let (sender, receiver) = mpsc::channel(params.queue_capacity.max(1));
        let (statuses, _) = watch::channel(StatusMap::new());
        let cancellation = CancellationToken::new();

        let runner = Runner {
            handler,
            params,
            statuses: statuses.clone(),
            cancellation: cancellation.clone(),
        };
        let handle = tokio::spawn(runner.run(receiver));

        Self {
            sender,
            statuses,
            cancellation,
            handle: Mutex::new(Some(handle)),
        }
    }

    /// Wait until the job reaches `Completed` or `Failed`.
    ///
    /// The terminal status is handed to the caller and evicted, so a later
    /// `status` or `wait` for the same id returns `None`. Returns `None` for
    /// an unknown id or when the worker stopped first.
    pub async fn wait(&self, id: &JobId) -> Option<JobStatus> {
        let mut receiver = self.statuses.subscribe();
        if !receiver.borrow().contains_key(id) {
            return None;
        }

        let status = receiver
            .wait_for(|map| map.get(id).is_none_or(JobStatus::is_terminal))
            .await
            .ok()?
            .get(id)
            .cloned();
        self.statuses.send_modify(|map| {
            map.remove(id);
        });
        status
    }

    /// Stop accepting work; a pending backoff is abandoned and the job is
    /// marked failed. An in-flight run is allowed to finish.
    pub async fn shutdown(&self) {
        self.cancellation.cancel();
        let handle = self.handle.lock().ok().and_then(|mut guard| guard.take());
        if let Some(handle) = handle
            && let Err(e) = handle.await
        {
            error!("Scan worker task ended abnormally: {}", e);
        }
    }
}

#[async_trait]
impl JobQueue for ScanJobWorker {
    async fn enqueue(&self, job: ScanJob) -> Result<JobId, JobError> {
        if self.cancellation.is_cancelled() {
            return Err(JobError::Closed);
        }

        let id = JobId::new(uuid::Uuid::new_v4().to_string());
        self.statuses.send_modify(|map| {
            map.insert(id.clone(), JobStatus::Queued);
        });

        match self.sender.try_send((id.clone(), job)) {
            Ok(()) => {
                info!(job_id = %id, "Scan job queued");
                Ok(id)
            }
            Err(e) => {
                self.statuses.send_modify(|map| {
                    map.remove(&id);
                });
                Err(match e {
                    mpsc::error::TrySendError::Full(_) => JobError::QueueFull,
                    mpsc::error::TrySendError::Closed(_) => JobError::Closed,
                })
            }
        }
    }

    async fn status(&self, id: &JobId) -> Option<JobStatus> {
        self.statuses.borrow().get(id).cloned()
    }
}

struct Runner {
    handler: Arc<dyn ScanJobHandler>,
    params: JobParams,
    statuses: watch::Sender<StatusMap>,
    cancellation: CancellationToken,
}

impl Runner {
    async fn run(self, mut receiver: mpsc::Receiver<(JobId, ScanJob)>) {
        loop {
            let (id, job) = tokio::select! {
                biased;
                _ = self.cancellation.cancelled() => break,
                next = receiver.recv() => match next {
                    Some(item) => item,
                    None => break,
                },
            };
            self.process(&id, &job).await;
        }

        // Jobs still queued at shutdown never ran
        receiver.close();
        while let Ok((id, _)) = receiver.try_recv() {
            self.set(&id, JobStatus::Failed {
                reason: "worker shut down before the job ran".to_string(),
            });
        }
    }

    async fn process(&self, id: &JobId, job: &ScanJob) {
        let mut attempt = 1;

        loop {
            self.set(id, JobStatus::Running { attempt });
            info!(job_id = %id, subject_id = %job.subject_id, attempt, "Running scan job");

            let JobFailure { message, retryable } = match self.handler.handle(job).await {
                Ok(scan_id) => {
                    info!(job_id = %id, scan_id = %scan_id, "Scan job completed");
                    self.set(id, JobStatus::Completed { scan_id });
                    return;
                }
                Err(failure) => failure,
            };

            if !retryable || attempt >= self.params.max_attempts {
                error!(job_id = %id, attempt, "Scan job failed: {}", message);
                self.set(id, JobStatus::Failed { reason: message });
                return;
            }

            let delay = self.params.backoff_after(attempt);
            warn!(
                job_id = %id,
                attempt,
                "Scan job failed, retrying in {:?}: {}",
                delay,
                message
            );
            self.set(id, JobStatus::RetryScheduled {
                next_attempt: attempt + 1,
                reason: message.clone(),
            });

            tokio::select! {
                biased;
                _ = self.cancellation.cancelled() => {
                    self.set(id, JobStatus::Failed { reason: message });
                    return;
                }
                _ = tokio::time::sleep(delay) => {}
            }
            attempt += 1;
        }
    }

    fn set(&self, id: &JobId, status: JobStatus) {
        self.statuses.send_modify(|map| {
            map.insert(id.clone(), status);
        });
    }
}
