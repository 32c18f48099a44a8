//! Frame-Tally main entry point
//!
//! This is the command-line interface for Frame-Tally. The JSON report goes
//! to stdout; all logging goes to stderr.

use anyhow::Context;
use clap::Parser;
use frame_tally::config::{resolve_config, Config};
use frame_tally::crawler::run_pipeline;
use frame_tally::output::log_statistics;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Frame-Tally: image counts for movies in theaters
///
/// Pages through the in-theaters listing API, collects each movie's IMDB
/// identifier and reports how many images its media index page lists.
#[derive(Parser, Debug)]
#[command(name = "frame-tally")]
#[command(version)]
#[command(about = "Image counts for movies in theaters", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults are used when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Listing API access key (overrides the config file)
    #[arg(long, env = "FRAME_TALLY_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Pretty-print the JSON report
    #[arg(long)]
    pretty: bool,

    /// Validate config and show what would be fetched without fetching
    #[arg(long)]
    dry_run: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let (config, config_hash) = resolve_config(cli.config.as_deref(), cli.api_key.clone())
        .context("Failed to load configuration")?;

    match (&cli.config, config_hash) {
        (Some(path), Some(hash)) => tracing::info!(
            "Configuration loaded from {} (hash: {})",
            path.display(),
            hash
        ),
        _ => tracing::info!("Using default configuration"),
    }

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    let outcome = run_pipeline(config).await.context("Run failed")?;
    log_statistics(&outcome.stats);

    outcome
        .report
        .write_to(std::io::stdout().lock(), cli.pretty)
        .context("Failed to write report")?;

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("frame_tally=info,warn"),
            1 => EnvFilter::new("frame_tally=debug,info"),
            2 => EnvFilter::new("frame_tally=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows the effective configuration
fn handle_dry_run(config: &Config) {
    eprintln!("=== Frame-Tally Dry Run ===\n");

    eprintln!("Listing:");
    eprintln!("  Endpoint: {}", config.listing.endpoint);
    eprintln!("  Page limit: {}", config.listing.page_limit);
    eprintln!("  Start page: {}", config.listing.start_page);
    eprintln!(
        "  Window: {} pages, {}ms pause, at most {} windows",
        config.listing.window_size, config.listing.window_pause_ms, config.listing.max_windows
    );

    eprintln!("\nDetail pages:");
    eprintln!("  Media index: {}", config.detail.media_index_template);
    eprintln!("  Title page: {}", config.detail.title_template);
    eprintln!("  Concurrency: {}", config.detail.concurrency);
    eprintln!("  Count selector: {}", config.detail.count_selector);

    eprintln!("\nHTTP:");
    eprintln!("  User agent: {}", config.http.user_agent);
    eprintln!(
        "  Timeouts: {}s request, {}s connect",
        config.http.timeout_secs, config.http.connect_timeout_secs
    );

    eprintln!("\n✓ Configuration is valid");
}
