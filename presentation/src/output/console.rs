//! Console output formatter for scan results

use brandlens_application::{GeneratePromptsOutput, RunSentimentScanOutput};
use brandlens_domain::{ProviderFailure, ProviderId, StructuredResult, Theme, VisibilityReport};
use colored::{ColoredString, Colorize};
use serde_json::json;

/// Formats scan results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format a persisted sentiment scan
    pub fn format_scan(brand: &str, output: &RunSentimentScanOutput) -> String {
        let scan = &output.scan;
        let mut text = String::new();

        text.push_str(&Self::header("Brand Sentiment"));
        text.push('\n');
        text.push_str(&format!("{} {}\n", "Brand:".cyan().bold(), brand));
        text.push_str(&format!(
            "{} {}\n",
            "Scanned:".cyan().bold(),
            scan.scanned_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        text.push_str(&format!(
            "{} {} / 100\n",
            "Overall score:".cyan().bold(),
            Self::score(scan.overall_score)
        ));
        if output.is_partial() {
            text.push_str(&format!(
                "{}\n",
                "Partial result: failed providers are excluded from the score".yellow()
            ));
        }

        text.push_str(&Self::section_header("Providers"));
        for (provider, result) in &scan.per_provider_results {
            match Self::failure_for(&output.failures, provider) {
                Some(failure) => text.push_str(&format!(
                    "\n{}\nError: {}\n",
                    format!("── {} ──", provider.display_name()).red().bold(),
                    failure.reason
                )),
                None => text.push_str(&Self::provider_block(provider, result)),
            }
        }

        text.push_str(&format!("\n{} {}\n", "Scan id:".dimmed(), scan.id));
        text.push_str(&Self::footer());
        text
    }

    pub fn format_scan_json(output: &RunSentimentScanOutput) -> String {
        Self::pretty(&json!({
            "scan": output.scan,
            "failures": output.failures,
        }))
    }

    /// Format a visibility report
    pub fn format_visibility(brand: &str, report: &VisibilityReport) -> String {
        let mut text = String::new();

        text.push_str(&Self::header("Brand Visibility"));
        text.push('\n');
        text.push_str(&format!("{} {}\n", "Brand:".cyan().bold(), brand));
        text.push_str(&format!(
            "{} {}%\n",
            "Mention rate:".cyan().bold(),
            Self::score(report.mention_rate)
        ));

        text.push_str(&Self::section_header("Providers"));
        for (provider, result) in &report.per_provider_results {
            let line = match (result, Self::failure_for(&report.failures, provider)) {
                (Some(result), _) if result.mentioned => format!(
                    "  {} {} mentioned{}",
                    "v".green(),
                    provider.display_name(),
                    result
                        .position
                        .map(|p| format!(" at position {}", p))
                        .unwrap_or_default()
                ),
                (Some(_), _) => format!("  {} {} not mentioned", "-".yellow(), provider.display_name()),
                (None, failure) => format!(
                    "  {} {} failed: {}",
                    "x".red(),
                    provider.display_name(),
                    failure.map(|f| f.reason.as_str()).unwrap_or("unknown error")
                ),
            };
            text.push_str(&line);
            text.push('\n');

            if let Some(result) = result
                && !result.competitors.is_empty()
            {
                text.push_str(&format!(
                    "      {} {}\n",
                    "competitors:".dimmed(),
                    result.competitors.join(", ")
                ));
            }
        }

        text.push_str(&Self::footer());
        text
    }

    pub fn format_visibility_json(report: &VisibilityReport) -> String {
        Self::pretty(report)
    }

    /// Format onboarding prompt suggestions
    pub fn format_prompts(brand: &str, output: &GeneratePromptsOutput) -> String {
        let mut text = String::new();

        text.push_str(&format!(
            "{}\n\n",
            format!("=== Suggested prompts for {} ===", brand).cyan().bold()
        ));
        for (index, prompt) in output.prompts.iter().enumerate() {
            text.push_str(&format!("{:>3}. {}\n", index + 1, prompt));
        }
        for failure in &output.failures {
            text.push_str(&format!(
                "\n{} {} failed: {}",
                "x".red(),
                failure.provider_id.display_name(),
                failure.reason
            ));
        }
        text.push('\n');
        text
    }

    pub fn format_prompts_json(output: &GeneratePromptsOutput) -> String {
        Self::pretty(&json!({
            "prompts": output.prompts,
            "failures": output.failures,
        }))
    }

    fn provider_block(provider: &ProviderId, result: &StructuredResult) -> String {
        let mut text = format!(
            "\n{} {}\n",
            format!("── {} ──", provider.display_name()).yellow().bold(),
            Self::score(result.score)
        );

        let themes: Vec<String> = result.themes.iter().map(Self::theme).collect();
        text.push_str(&format!("  {} {}\n", "Themes:".bold(), themes.join(", ")));
        text.push_str(&format!(
            "  {} {}\n",
            "Positive:".green(),
            result.positive_keywords.join(", ")
        ));
        text.push_str(&format!(
            "  {} {}\n",
            "Negative:".red(),
            result.negative_keywords.join(", ")
        ));
        text
    }

    fn theme(theme: &Theme) -> String {
        match theme {
            Theme::Label(name) => name.clone(),
            Theme::Detailed(detail) => format!(
                "{} ({}, {})",
                detail.name,
                detail.sentiment.as_str(),
                detail.weight
            ),
        }
    }

    fn failure_for<'a>(
        failures: &'a [ProviderFailure],
        provider: &ProviderId,
    ) -> Option<&'a ProviderFailure> {
        failures.iter().find(|f| &f.provider_id == provider)
    }

    fn score(score: u8) -> ColoredString {
        let text = score.to_string();
        match score {
            70..=100 => text.green().bold(),
            40..=69 => text.yellow().bold(),
            _ => text.red().bold(),
        }
    }

    fn pretty(value: &impl serde::Serialize) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}
