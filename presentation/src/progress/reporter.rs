//! Progress reporting for provider fan-outs

use brandlens_application::ScanProgressNotifier;
use brandlens_domain::ProviderId;
use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Mutex;

/// Reports fan-out progress with a progress bar on stderr
pub struct ProgressReporter {
    multi: MultiProgress,
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            bar: Mutex::new(None),
        }
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(guard) = self.bar.lock()
            && let Some(bar) = guard.as_ref()
        {
            f(bar);
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanProgressNotifier for ProgressReporter {
    fn on_fan_out_start(&self, total_providers: usize) {
        let bar = self.multi.add(ProgressBar::new(total_providers as u64));
        bar.set_style(Self::bar_style());
        bar.set_prefix("Querying providers");
        bar.set_message("Starting...");
        bar.enable_steady_tick(std::time::Duration::from_millis(120));

        if let Ok(mut guard) = self.bar.lock() {
            *guard = Some(bar);
        }
    }

    fn on_attempt_failed(&self, provider: &ProviderId, attempt: u32, _reason: &str) {
        self.with_bar(|bar| {
            bar.set_message(format!(
                "{} {} attempt {} failed, retrying",
                "!".yellow(),
                provider.display_name(),
                attempt
            ));
        });
    }

    fn on_provider_settled(&self, provider: &ProviderId, success: bool) {
        self.with_bar(|bar| {
            let status = if success {
                format!("{} {}", "v".green(), provider.display_name())
            } else {
                format!("{} {}", "x".red(), provider.display_name())
            };
            bar.set_message(status);
            bar.inc(1);
        });
    }

    fn on_fan_out_complete(&self, succeeded: usize, failed: usize) {
        let bar = self.bar.lock().ok().and_then(|mut guard| guard.take());
        if let Some(bar) = bar {
            let summary = if failed == 0 {
                format!("{} providers answered", succeeded).green()
            } else {
                format!("{} answered, {} failed", succeeded, failed).yellow()
            };
            bar.finish_with_message(summary.to_string());
        }
    }
}

/// Simple line-based progress on stderr (no redraws)
pub struct SimpleProgress;

impl ScanProgressNotifier for SimpleProgress {
    fn on_fan_out_start(&self, total_providers: usize) {
        eprintln!(
            "{} {} ({} providers)",
            "->".cyan(),
            "Querying providers".bold(),
            total_providers
        );
    }

    fn on_attempt_failed(&self, provider: &ProviderId, attempt: u32, reason: &str) {
        eprintln!(
            "  {} {} attempt {}: {}",
            "!".yellow(),
            provider.display_name(),
            attempt,
            reason
        );
    }

    fn on_provider_settled(&self, provider: &ProviderId, success: bool) {
        if success {
            eprintln!("  {} {}", "v".green(), provider.display_name());
        } else {
            eprintln!("  {} {} (failed)", "x".red(), provider.display_name());
        }
    }

    fn on_fan_out_complete(&self, _succeeded: usize, _failed: usize) {
        eprintln!();
    }
}
