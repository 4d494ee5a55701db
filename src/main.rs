//! Company Enricher main entry point
//!
//! This is the command-line interface for the Company Enricher pipeline.

use anyhow::Context;
use clap::Parser;
use company_enricher::config::{load_config_with_hash, Config};
use company_enricher::output::{print_statistics, read_table, write_enriched, BatchStatistics};
use company_enricher::{EnricherError, Pipeline, SuffixList};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Company Enricher: finds websites and contact emails for a list of companies
///
/// Each company name in the input CSV is resolved to a website through a company
/// suggestion API. Each website is then scraped for a contact email belonging to the
/// site's own domain, and the email is kept only if its domain accepts mail.
#[derive(Parser, Debug)]
#[command(name = "company-enricher")]
#[command(version = "1.0.0")]
#[command(about = "Finds websites and contact emails for companies", long_about = None)]
struct Cli {
    /// CSV file with a company name column
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Where to write the enriched CSV
    #[arg(short, long, default_value = "data/companies_complete.csv")]
    output: PathBuf,

    /// Path to TOML configuration file (defaults are used when omitted)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and input and show what would run without any network access
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<EnricherError>() {
                Some(EnricherError::InputNotFound(path)) => {
                    tracing::error!("Input file not found: {}", path);
                }
                _ => tracing::error!("Critical error: {:#}", e),
            }
            ExitCode::FAILURE
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("company_enricher=info,warn"),
            1 => EnvFilter::new("company_enricher=debug,info"),
            2 => EnvFilter::new("company_enricher=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_configuration(cli.config.as_deref())?;

    let table = read_table(&cli.input, &config.input.name_column)?;
    tracing::info!(
        "Loaded {} companies from {}",
        table.len(),
        cli.input.display()
    );

    if cli.dry_run {
        handle_dry_run(&config, &cli.input, &cli.output, table.len());
        return Ok(());
    }

    let suffixes = Arc::new(
        SuffixList::load(config.domains.suffix_list_path.as_deref())
            .context("Failed to load public suffix list")?,
    );
    let pipeline = Pipeline::from_config(&config, suffixes)?;

    let started_at = chrono::Utc::now();
    let report = pipeline.run(&table.records()).await;
    let finished_at = chrono::Utc::now();

    write_enriched(&cli.output, &table, &report.records, &config.output)
        .with_context(|| format!("Failed to write {}", cli.output.display()))?;

    if !cli.quiet {
        let stats = BatchStatistics::from_report(&report, started_at, finished_at);
        println!();
        print_statistics(&stats);
    }

    tracing::info!("Enrichment complete: {}", cli.output.display());
    Ok(())
}

/// Loads the config file if one was given, otherwise the built-in defaults
fn load_configuration(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        tracing::info!("No configuration file given, using defaults");
        return Ok(Config::default());
    };

    tracing::info!("Loading configuration from: {}", path.display());
    let (config, hash) = load_config_with_hash(path).map_err(EnricherError::from)?;
    tracing::info!("Configuration loaded successfully (hash: {})", hash);
    Ok(config)
}

/// Handles the --dry-run mode: shows the settings the run would use
fn handle_dry_run(config: &Config, input: &Path, output: &Path, companies: usize) {
    println!("=== Company Enricher Dry Run ===\n");

    println!("Input:");
    println!("  File: {}", input.display());
    println!("  Name column: {}", config.input.name_column);
    println!("  Companies: {}", companies);

    println!("\nSuggestion API:");
    println!("  Endpoint: {}", config.suggestion.endpoint);
    println!("  Timeout: {}s", config.suggestion.timeout_secs);
    println!(
        "  Connect retries: {} (backoff from {}ms)",
        config.suggestion.connect_retries, config.suggestion.backoff_base_ms
    );
    println!("  Candidates considered: {}", config.suggestion.max_candidates);
    println!(
        "  Concurrent lookups: {}",
        config.suggestion.max_concurrent_lookups
    );

    println!("\nScraper:");
    println!(
        "  Timeouts: homepage {}s, secondary {}s",
        config.scraper.homepage_timeout_secs, config.scraper.secondary_timeout_secs
    );
    println!(
        "  Concurrent scrapes: {}",
        config.scraper.max_concurrent_scrapes
    );
    println!(
        "  Accept invalid certificates: {}",
        config.scraper.accept_invalid_certs
    );
    println!("  MX timeout: {}s", config.dns.timeout_secs);

    println!("\nOutput:");
    println!("  File: {}", output.display());
    println!(
        "  Columns added: {}, {}",
        config.output.website_column, config.output.email_column
    );

    println!("\n✓ Configuration is valid");
    println!("✓ Would enrich {} companies", companies);
}
