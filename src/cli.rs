//! Command-line interface definitions for the headline parser.
//!
//! Every option has a default, so running the binary without arguments
//! fetches the RIA.ru front page and prints the headlines.

use crate::scrapers::fetch::DEFAULT_TIMEOUT;
use clap::Parser;
use std::path::PathBuf;

/// Front page fetched when `--url` is not given.
pub const DEFAULT_URL: &str = "https://ria.ru/";

/// Command-line arguments.
///
/// # Examples
///
/// ```sh
/// # Print headlines only
/// ria_headlines
///
/// # Also export them
/// ria_headlines --csv news.csv --json news.json
///
/// # Custom thresholds, no diagnostic log
/// ria_headlines --config thresholds.yaml --no-log-file
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Page to fetch headlines from
    #[arg(short, long, env = "RIA_URL", default_value = DEFAULT_URL)]
    pub url: String,

    /// Request timeout in seconds
    #[arg(short, long, default_value_t = DEFAULT_TIMEOUT.as_secs())]
    pub timeout_secs: u64,

    /// Maximum number of headlines shown (overrides the config file)
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Write the headlines to this CSV file
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Write the full report to this JSON file
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Diagnostic log file (appended to)
    #[arg(long, default_value = "news_parser.log")]
    pub log_file: PathBuf,

    /// Do not write the diagnostic log file
    #[arg(long)]
    pub no_log_file: bool,

    /// YAML file overriding extractor thresholds
    #[arg(short, long, env = "RIA_CONFIG")]
    pub config: Option<PathBuf>,
}
