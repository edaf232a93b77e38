//! Progress notification port
//!
//! Defines the interface for reporting progress during a provider fan-out.

use brandlens_domain::ProviderId;

/// Callback for progress updates during a scan.
///
/// Called from concurrently running provider tasks, hence `Send + Sync`.
/// Implementations live in the presentation layer.
pub trait ScanProgressNotifier: Send + Sync {
    /// Called once before any provider is queried
    fn on_fan_out_start(&self, total_providers: usize);

    /// Called when an attempt fails (a retry may follow)
    fn on_attempt_failed(&self, _provider: &ProviderId, _attempt: u32, _reason: &str) {}

    /// Called when a provider reaches a terminal state
    fn on_provider_settled(&self, provider: &ProviderId, success: bool);

    /// Called after every provider has settled
    fn on_fan_out_complete(&self, succeeded: usize, failed: usize);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ScanProgressNotifier for NoProgress {
    fn on_fan_out_start(&self, _total_providers: usize) {}
    fn on_provider_settled(&self, _provider: &ProviderId, _success: bool) {}
    fn on_fan_out_complete(&self, _succeeded: usize, _failed: usize) {}
}
