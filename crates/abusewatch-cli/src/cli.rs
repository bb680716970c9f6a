//! Command-line argument parsing and the run loop.

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use abusewatch_client::{AbuseClient, AbuseError, RetryConfig};
use abusewatch_engine::{dedup_prefixes, rank_rows, PoolConfig, WorkerPool};

use crate::config::Config;
use crate::report;

/// Query AbuseIPDB for your network prefixes and build a weekly HTML report
#[derive(Parser, Debug)]
#[command(name = "abusewatch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the YAML configuration file
    #[arg(short, long, default_value = "config.yaml")]
    pub config: PathBuf,

    /// Directory the report is written into (overrides the config file)
    #[arg(long, env = "OUTPUT_DIR")]
    pub output_dir: Option<String>,

    /// Increase verbosity
    #[arg(short, long)]
    pub verbose: bool,
}

/// Run the CLI application.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = Config::load(&cli.config)?;
    if let Some(output_dir) = cli.output_dir {
        config.output_dir = output_dir;
    }

    let prefixes = startup_prefixes(&config)
        .with_context(|| format!("invalid configuration in {}", cli.config.display()))?;

    info!(networks = prefixes.len(), "querying networks");

    let client = AbuseClient::builder(config.api_keys.clone())
        .timeout(config.request_timeout())
        .retry(RetryConfig::default().max_retries(config.max_retries))
        .build();

    let pool = WorkerPool::with_config(
        client,
        PoolConfig {
            concurrency: config.concurrency,
            job_delay: config.retry_delay(),
        },
    );

    let mut rows = pool.process_networks(prefixes).await;
    rank_rows(&mut rows);

    let output = config.output_file();
    report::render_report(&rows, Local::now(), &output)
        .with_context(|| format!("failed to write report to {}", output.display()))?;

    info!(rows = rows.len(), output = %output.display(), "report generated");
    Ok(())
}

/// Validate the fatal startup conditions and return the deduplicated
/// prefix list. An empty key set or an empty prefix set aborts the run
/// before any querying begins.
fn startup_prefixes(config: &Config) -> abusewatch_core::Result<Vec<String>> {
    if config.api_keys.is_empty() {
        return Err(AbuseError::NoApiKeys);
    }

    let prefixes = dedup_prefixes(&config.prefixes);
    if prefixes.is_empty() {
        return Err(AbuseError::NoPrefixes);
    }

    Ok(prefixes)
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
