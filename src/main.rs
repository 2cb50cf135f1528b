//! Hookcat CLI
//!
//! Discovers webhook traffic from the provider API and writes a
//! documentation catalog.

use std::process::ExitCode;

use clap::Parser;

use hookcat::catalog::FileCatalogStore;
use hookcat::config::GeneratorConfig;
use hookcat::provider::{HttpProviderClient, DEFAULT_API_BASE};
use hookcat::sync::Generator;

/// Hookcat catalog generator
#[derive(Parser, Debug)]
#[command(name = "hookcat")]
#[command(author = "Hookcat Team <team@hookcat.dev>")]
#[command(version)]
#[command(about = "Generate a documentation catalog from observed webhook traffic")]
struct Args {
    /// Provider API key (falls back to HOOKCAT_API_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// Catalog directory to write into (falls back to HOOKCAT_CATALOG_DIR)
    #[arg(long)]
    dir: Option<String>,

    /// Provider API base URL
    #[arg(long, default_value = DEFAULT_API_BASE)]
    api_url: String,

    /// Domain to group generated services under
    #[arg(long)]
    domain: Option<String>,

    /// Maximum records to process per source/destination
    #[arg(long, default_value_t = hookcat::config::DEFAULT_MAX_RECORDS)]
    max_events: usize,

    /// Only process connections whose source name matches this pattern
    #[arg(long = "match")]
    match_pattern: Option<String>,

    /// Minimum log verbosity (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize tracing once; the level is fixed for the whole run.
    let filter = args.log_level.clone().unwrap_or_else(|| "info".to_string());
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut config = GeneratorConfig::default().with_env_fallbacks();
    if let Some(dir) = args.dir {
        config.catalog_dir = dir.into();
    }
    if let Some(api_key) = args.api_key {
        config.api_key = api_key;
    }
    config.domain = args.domain;
    config.match_pattern = args.match_pattern;
    config.max_records_per_entity = args.max_events;
    config.log_level = args.log_level;

    match generate(&config, &args.api_url).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "Error generating event catalog");
            eprintln!("Error generating event catalog: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn generate(config: &GeneratorConfig, api_url: &str) -> hookcat::Result<()> {
    config.validate()?;

    let client = HttpProviderClient::new(api_url, config.api_key.clone())?;
    let store = FileCatalogStore::new(&config.catalog_dir);

    let summary = Generator::new().run(config, &client, &store).await?;
    tracing::info!(
        connections = summary.connections,
        services = summary.services_written,
        events = summary.events_written,
        records = summary.records_processed,
        "Catalog generation finished"
    );
    Ok(())
}
