//! CLI entry point for the artifetch tool.

use anyhow::{Context, Result};
use clap::Parser;

use artifetch_core::{Coordinate, FetchEngine, HttpClient, VerifiedFetcher, parse_kinds};
use tracing::{debug, info};

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Determine log level based on verbose/quiet flags
    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    debug!(?args, "CLI arguments parsed");

    let kinds = parse_kinds(&args.kinds)?;

    tokio::fs::create_dir_all(&args.dest)
        .await
        .with_context(|| format!("failed to create destination {}", args.dest.display()))?;

    let fetcher = VerifiedFetcher::new(HttpClient::new());
    let engine = FetchEngine::new(
        fetcher,
        args.repo,
        &args.dest,
        kinds,
        usize::from(args.concurrency),
    )?;

    for input in &args.coordinates {
        let root = Coordinate::parse(input)?;
        engine.fetch_tree(&root).await?;
    }

    let stats = engine.stats();
    info!(
        coordinates = stats.coordinates(),
        downloaded = stats.downloaded(),
        up_to_date = stats.skipped(),
        "fetch complete"
    );

    Ok(())
}
