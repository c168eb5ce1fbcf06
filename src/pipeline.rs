//! Fetch → extract → report.
//!
//! [`run`] never fails: a download error, an empty extraction or any other
//! upstream error all end in a [`Report`] built from the sample set, tagged
//! with the reason so the outputs can tell the user what happened.

use crate::config::{ConfigError, ExtractorConfig};
use crate::models::{FallbackReason, Report};
use crate::scrapers::fetch::{FetchError, PageSource};
use crate::scrapers::ria::Extractor;
use crate::utils::truncate_for_log;
use thiserror::Error;
use tracing::{error, info, instrument, warn};

/// Failures that stop the live path before any headline is produced.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Build the report for `url`, falling back to sample data on any failure.
///
/// # Arguments
///
/// * `source` - Where the page comes from (the live fetcher or a test double)
/// * `url` - Page to fetch
/// * `config` - Extraction thresholds; validated before the fetch
///
/// # Returns
///
/// A live [`Report`] when at least one headline was extracted. Otherwise the
/// sample report, tagged with why the live path failed.
#[instrument(level = "info", skip(source, config))]
pub async fn run<S: PageSource>(source: &S, url: &str, config: &ExtractorConfig) -> Report {
    match try_live(source, url, config).await {
        Ok(Some(report)) => report,
        Ok(None) => {
            warn!("No headlines found, page structure has probably changed");
            Report::fallback(FallbackReason::NothingExtracted)
        }
        Err(PipelineError::Fetch(e)) => {
            error!(error = %e, "Could not download the front page");
            Report::fallback(FallbackReason::FetchFailed(e.to_string()))
        }
        Err(e) => {
            error!(error = %e, "Headline pipeline failed");
            Report::fallback(FallbackReason::Unexpected(e.to_string()))
        }
    }
}

/// The live path; `Ok(None)` means the page yielded no headlines.
async fn try_live<S: PageSource>(
    source: &S,
    url: &str,
    config: &ExtractorConfig,
) -> Result<Option<Report>, PipelineError> {
    let extractor = Extractor::new(config.clone())?;
    let html = source.fetch_page(url).await?;
    info!(
        bytes = html.len(),
        preview = %truncate_for_log(html.trim_start(), 120),
        "HTML loaded"
    );

    let extraction = extractor.extract(&html);
    if extraction.items.is_empty() {
        return Ok(None);
    }
    info!(
        found = extraction.accepted,
        shown = extraction.items.len(),
        limit = extractor.config().max_items,
        strategies = ?extraction.applied,
        "Headlines ready"
    );
    Ok(Some(Report::live(extraction.items, extraction.accepted)))
}
