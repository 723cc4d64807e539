//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

use artifetch_core::{DEFAULT_CONCURRENCY, MAVEN_CENTRAL};

/// Download Maven artifacts and their runtime dependencies, verified
/// against the repository's published checksums.
///
/// Coordinates are given as `org/artifact` (release version) or
/// `org/artifact/version`, where the version may also be `latest` or
/// `release`.
#[derive(Parser, Debug)]
#[command(name = "artifetch")]
#[command(author, version, about)]
pub struct Args {
    /// Coordinates to fetch (org/artifact or org/artifact/version)
    #[arg(required = true)]
    pub coordinates: Vec<String>,

    /// Comma-separated artifact kinds to download (jar, src, doc)
    #[arg(short = 't', long, default_value = "jar,src")]
    pub kinds: String,

    /// Destination directory for downloaded artifacts
    #[arg(short = 'd', long, default_value = ".")]
    pub dest: PathBuf,

    /// Repository base URL
    #[arg(long, default_value = MAVEN_CENTRAL)]
    pub repo: String,

    /// Maximum concurrent subtree fetches (1-100)
    #[arg(short = 'c', long, default_value_t = DEFAULT_CONCURRENCY as u8, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub concurrency: u8,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}
