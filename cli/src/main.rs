//! CLI entrypoint for brandlens
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use async_trait::async_trait;
use brandlens_application::{
    FanOutOrchestrator, GeneratePromptsInput, GeneratePromptsUseCase, JobFailure, JobQueue,
    JobStatus, NoProgress, ProjectLookup, RunSentimentScanInput, RunSentimentScanOutput,
    RunSentimentScanUseCase, RunVisibilityScanInput, RunVisibilityScanUseCase, ScanJob,
    ScanJobHandler, ScanProgressNotifier, ScanRepository,
};
use brandlens_domain::{Project, ProjectId, UserId};
use brandlens_infrastructure::{
    ConfigLoader, FileConfig, FileOutputFormat, InMemoryProjectStore, InMemoryScanRepository,
    JsonlScanRepository, ScanJobWorker, assemble_providers,
};
use brandlens_presentation::{BrandArgs, Cli, Command, ConsoleFormatter, OutputFormat, ProgressReporter};
use clap::Parser;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Owner of the ad-hoc project registered for a CLI run
const LOCAL_USER: &str = "local";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Held until exit so buffered file logs are flushed
    let _log_guard = init_tracing(cli.verbose, cli.log_file.as_deref())?;

    info!("Starting brandlens");

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {e}"))?
    };
    config.validate().context("Invalid configuration")?;

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        println!();
        println!("{}", ConfigLoader::render(&config)?);
        return Ok(());
    }

    let Some(command) = cli.command else {
        bail!("No command given. Run `brandlens --help` for usage.");
    };

    let format = cli.output.unwrap_or(match config.output.format {
        Some(FileOutputFormat::Json) => OutputFormat::Json,
        Some(FileOutputFormat::Text) | None => OutputFormat::Text,
    });
    if !config.output.color {
        colored::control::set_override(false);
    }

    // === Dependency Injection ===
    let providers = assemble_providers(&config.providers);
    if providers.is_empty() {
        bail!(
            "No providers available. Set ANTHROPIC_API_KEY or OPENAI_API_KEY, \
             or enable [providers.compatible] in the config file."
        );
    }

    let scan_params = config.scan.to_scan_params();
    let progress: Arc<dyn ScanProgressNotifier> = if cli.quiet || format == OutputFormat::Json {
        Arc::new(NoProgress)
    } else {
        Arc::new(ProgressReporter::new())
    };
    let orchestrator =
        FanOutOrchestrator::new(providers, scan_params.retry).with_progress(progress);

    let output = match command {
        Command::Scan(args) => {
            let projects = Arc::new(register_project(&args)?);
            match &config.storage.scans_path {
                Some(path) => {
                    let scans = Arc::new(
                        JsonlScanRepository::open(path)
                            .with_context(|| format!("Cannot open scan log {}", path.display()))?,
                    );
                    info!(path = %scans.path().display(), "Persisting scans to JSON Lines");
                    run_scan(&config, projects, scans, orchestrator, &args, format).await?
                }
                None => {
                    let scans = Arc::new(InMemoryScanRepository::new());
                    run_scan(&config, projects, scans, orchestrator, &args, format).await?
                }
            }
        }
        Command::Visibility(args) => {
            let projects = Arc::new(register_project(&args)?);
            let report = RunVisibilityScanUseCase::new(projects, orchestrator)
                .execute(RunVisibilityScanInput::new(project_id(&args), LOCAL_USER))
                .await?;
            match format {
                OutputFormat::Text => ConsoleFormatter::format_visibility(&args.brand, &report),
                OutputFormat::Json => ConsoleFormatter::format_visibility_json(&report),
            }
        }
        Command::Prompts(args) => {
            let prompts = GeneratePromptsUseCase::new(orchestrator)
                .execute(GeneratePromptsInput {
                    brand_name: args.brand.clone(),
                    brand_variants: args.variants.clone(),
                    domain: args.domain.clone(),
                    business_context: args.context.clone(),
                })
                .await?;
            match format {
                OutputFormat::Text => ConsoleFormatter::format_prompts(&args.brand, &prompts),
                OutputFormat::Json => ConsoleFormatter::format_prompts_json(&prompts),
            }
        }
    };

    println!("{}", output);

    Ok(())
}

fn init_tracing(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    // RUST_LOG overrides the -v flags
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbose)));
    let stderr = fmt::layer().with_target(false).with_writer(std::io::stderr);

    let Some(path) = log_file else {
        tracing_subscriber::registry().with(filter).with(stderr).init();
        return Ok(None);
    };

    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow!("--log-file must name a file: {}", path.display()))?;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr)
        .with(fmt::layer().with_ansi(false).with_writer(writer))
        .init();

    Ok(Some(guard))
}

fn default_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    }
}

fn project_id(args: &BrandArgs) -> ProjectId {
    ProjectId::new(format!("cli:{}", args.brand.trim().to_lowercase()))
}

/// Register the brand described on the command line as a project owned by
/// the local user.
fn register_project(args: &BrandArgs) -> Result<InMemoryProjectStore> {
    let mut project = Project::new(project_id(args), LOCAL_USER, &args.brand, &args.domain)
        .with_variants(args.variants.clone());
    if let Some(context) = &args.context {
        project = project.with_business_context(context);
    }

    let store = InMemoryProjectStore::new();
    store.insert(project)?;
    Ok(store)
}

/// Runs the sentiment scan through the job worker so a total provider failure
/// gets the outer retry with backoff.
async fn run_scan<R>(
    config: &FileConfig,
    projects: Arc<InMemoryProjectStore>,
    scans: Arc<R>,
    orchestrator: FanOutOrchestrator,
    args: &BrandArgs,
    format: OutputFormat,
) -> Result<String>
where
    R: ScanRepository + 'static,
{
    let use_case = RunSentimentScanUseCase::new(projects, scans, orchestrator)
        .with_temperature(config.scan.temperature);
    let handler = Arc::new(CapturingScan::new(use_case));

    let worker = ScanJobWorker::spawn(handler.clone(), config.jobs.to_job_params());
    let job_id = worker
        .enqueue(ScanJob {
            subject_id: project_id(args),
            user_id: UserId::new(LOCAL_USER),
        })
        .await?;
    let status = worker.wait(&job_id).await;
    worker.shutdown().await;

    match status {
        Some(JobStatus::Completed { .. }) => {}
        Some(JobStatus::Failed { reason }) => bail!("Scan failed: {reason}"),
        other => bail!("Scan did not finish (last status: {other:?})"),
    }

    let output = handler
        .take()
        .ok_or_else(|| anyhow!("Scan completed without a result"))?;

    Ok(match format {
        OutputFormat::Text => ConsoleFormatter::format_scan(&args.brand, &output),
        OutputFormat::Json => ConsoleFormatter::format_scan_json(&output),
    })
}

/// Job handler that keeps the last successful scan output for display
struct CapturingScan<P: ProjectLookup + 'static, R: ScanRepository + 'static> {
    use_case: RunSentimentScanUseCase<P, R>,
    last: Mutex<Option<RunSentimentScanOutput>>,
}

impl<P: ProjectLookup + 'static, R: ScanRepository + 'static> CapturingScan<P, R> {
    fn new(use_case: RunSentimentScanUseCase<P, R>) -> Self {
        Self {
            use_case,
            last: Mutex::new(None),
        }
    }

    fn take(&self) -> Option<RunSentimentScanOutput> {
        self.last.lock().ok().and_then(|mut last| last.take())
    }
}

#[async_trait]
impl<P: ProjectLookup + 'static, R: ScanRepository + 'static> ScanJobHandler for CapturingScan<P, R> {
    async fn handle(&self, job: &ScanJob) -> Result<String, JobFailure> {
        let input = RunSentimentScanInput::new(job.subject_id.clone(), job.user_id.clone());
        let output = self.use_case.execute(input).await?;
        let scan_id = output.scan.id.clone();
        if let Ok(mut last) = self.last.lock() {
            *last = Some(output);
        }
        Ok(scan_id)
    }
}
