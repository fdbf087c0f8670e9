//! Reelpick main entry point
//!
//! This is the command-line interface for the Reelpick list fetcher.

use clap::Parser;
use reelpick::config::{load_config, Config};
use reelpick::crawler::ListFetcher;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Reelpick: fetch every film in a Letterboxd list
///
/// Walks the list's pages and its RSS feed, prints the deduplicated films as
/// JSON, and optionally picks one at random.
#[derive(Parser, Debug)]
#[command(name = "reelpick")]
#[command(version)]
#[command(about = "Fetch the films of a Letterboxd list", long_about = None)]
struct Cli {
    /// List URL, e.g. https://letterboxd.com/alice/list/favorites/
    #[arg(value_name = "LIST_URL")]
    list_url: String,

    /// Path to TOML configuration file (defaults apply when omitted)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Print one randomly chosen film instead of the whole list
    #[arg(short, long)]
    random: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> reelpick::Result<ExitCode> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path).map_err(|e| {
                tracing::error!("Failed to load configuration: {}", e);
                e
            })?
        }
        None => Config::default(),
    };

    let fetcher = ListFetcher::new(config)?;
    let response = fetcher.respond(&cli.list_url).await;

    let response = if cli.random {
        response.into_random_pick()
    } else {
        response
    };

    println!("{}", response.to_json()?);

    Ok(if response.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr; stdout carries only the JSON response.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("reelpick=info,warn"),
            1 => EnvFilter::new("reelpick=debug,info"),
            2 => EnvFilter::new("reelpick=trace,debug"),
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
