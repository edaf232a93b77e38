//! CLI command definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for scan results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary
    Text,
    /// JSON document
    Json,
}

/// CLI arguments for brandlens
#[derive(Parser, Debug)]
#[command(name = "brandlens")]
#[command(author, version, about = "Brand sentiment and visibility scans across several LLM providers")]
#[command(long_about = r#"
brandlens asks several LLM providers the same question about a brand, pulls a
structured answer out of each reply, and combines them into one result.

A provider that fails is retried once; the scan succeeds as long as one
provider answers, and the whole scan is retried with backoff if none do.

Configuration files are loaded from (in priority order):
1. BRANDLENS_* environment variables (e.g. BRANDLENS_SCAN__MAX_ATTEMPTS=3)
2. --config <path>      Explicit config file
3. ./brandlens.toml     Project-level config
4. ~/.config/brandlens/config.toml   Global config

Example:
  brandlens scan --brand Acme --domain "industrial anvils"
  brandlens scan --brand Acme --variant "ACME Corp" --domain anvils -o json
  brandlens prompts --brand Acme --domain anvils --context "B2B supplier"
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration sources and the effective configuration, then exit
    #[arg(long)]
    pub show_config: bool,

    /// Also write logs to this file
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Score how providers perceive the brand (0-100)
    Scan(BrandArgs),
    /// Check whether providers mention the brand for its category
    Visibility(BrandArgs),
    /// Suggest questions a prospective customer might ask
    Prompts(BrandArgs),
}

/// Brand description shared by all subcommands
#[derive(Args, Debug, Clone)]
pub struct BrandArgs {
    /// Brand name
    #[arg(long)]
    pub brand: String,

    /// Alternative brand names (can be specified multiple times)
    #[arg(long = "variant", value_name = "NAME")]
    pub variants: Vec<String>,

    /// Market or category the brand competes in
    #[arg(long)]
    pub domain: String,

    /// Extra business context for the providers
    #[arg(long)]
    pub context: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scan() {
        let cli = Cli::parse_from([
            "brandlens",
            "scan",
            "--brand",
            "Acme",
            "--variant",
            "ACME Corp",
            "--variant",
            "Acme Inc",
            "--domain",
            "anvils",
            "-o",
            "json",
            "-vv",
        ]);

        assert_eq!(cli.output, Some(OutputFormat::Json));
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Some(Command::Scan(args)) => {
                assert_eq!(args.brand, "Acme");
                assert_eq!(args.variants, vec!["ACME Corp", "Acme Inc"]);
                assert_eq!(args.context, None);
            }
            other => panic!("expected scan, got {other:?}"),
        }
    }

    #[test]
    fn test_show_config_without_subcommand() {
        let cli = Cli::parse_from(["brandlens", "--show-config"]);
        assert!(cli.show_config);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_brand_is_required() {
        assert!(Cli::try_parse_from(["brandlens", "prompts", "--domain", "anvils"]).is_err());
    }
}
