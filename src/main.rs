//! # RIA Headlines
//!
//! Fetches the RIA.ru front page, extracts headline/link/time triples with a
//! cascade of HTML heuristics, prints them and optionally exports them.
//!
//! ## Usage
//!
//! ```sh
//! ria_headlines --csv news.csv
//! ```
//!
//! ## Architecture
//!
//! The run is strictly sequential:
//! 1. **Fetching**: one GET of the front page ([`scrapers::fetch`])
//! 2. **Extracting**: strategy cascade over the parsed HTML ([`scrapers::ria`])
//! 3. **Fallback**: sample headlines when either step comes up empty ([`sample`])
//! 4. **Output**: console report, then CSV / JSON exports ([`outputs`])
//!
//! Nothing in this chain is fatal: the program always prints a report and
//! exits cleanly.

use clap::Parser;
use std::error::Error;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

mod cli;
mod config;
mod logging;
mod models;
mod outputs;
mod pipeline;
mod sample;
mod scrapers;
mod utils;

use cli::Cli;
use config::ExtractorConfig;
use models::{FallbackReason, Report};
use outputs::console::ConsoleRenderer;
use outputs::{csv, json};
use scrapers::fetch::HttpFetcher;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Cli::parse();

    // --- Tracing init ---
    let log_file = (!args.no_log_file).then_some(args.log_file.as_path());
    let _log_guard = logging::init_tracing(log_file);

    let start_time = Instant::now();
    debug!(?args, "Parsed CLI arguments");

    let renderer = ConsoleRenderer::for_stdout();
    print!("{}", renderer.banner());
    println!("Запрос новостей с {}...", args.url);

    let report = build_report(&args).await.unwrap_or_else(|e| {
        error!(error = %e, "Run failed before extraction");
        Report::fallback(FallbackReason::Unexpected(e.to_string()))
    });

    print!("{}", renderer.report(&report));

    // ---- Exports ----
    if let Some(path) = &args.csv {
        match csv::write_csv(&report.items, path) {
            Ok(()) => println!("CSV сохранён: {}", path.display()),
            Err(e) => {
                error!(error = %e, "CSV export failed");
                eprintln!("Не удалось сохранить CSV: {e}");
            }
        }
    }

    if let Some(path) = &args.json {
        match json::write_report(&report, path).await {
            Ok(()) => println!("JSON сохранён: {}", path.display()),
            Err(e) => {
                error!(error = %e, "JSON export failed");
                eprintln!("Не удалось сохранить JSON: {e}");
            }
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        items = report.items.len(),
        sample = report.is_sample(),
        "Execution complete"
    );

    Ok(())
}

/// Load configuration, build the fetcher and run the pipeline.
async fn build_report(args: &Cli) -> Result<Report, Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => ExtractorConfig::from_yaml_file(path)?,
        None => ExtractorConfig::default(),
    };
    if let Some(limit) = args.limit {
        config.max_items = limit;
    }

    let fetcher = HttpFetcher::new(Duration::from_secs(args.timeout_secs))?;
    Ok(pipeline::run(&fetcher, &args.url, &config).await)
}
