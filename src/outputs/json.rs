//! JSON export of a [`Report`].
//!
//! The whole report is written: generation time, provenance (live page or
//! sample data and why), the number of headlines found and the items.

use super::ExportError;
use crate::models::Report;
use std::path::Path;
use tokio::fs;
use tracing::{error, info, instrument};

/// Serialize `report` as pretty JSON into `path`, creating parent directories.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_report(report: &Report, path: &Path) -> Result<(), ExportError> {
    let json = serde_json::to_string_pretty(report)?;
    let io_err = |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        if let Err(e) = fs::create_dir_all(dir).await {
            error!(dir = %dir.display(), error = %e, "Failed to create JSON dir");
            return Err(io_err(e));
        }
    }

    fs::write(path, json).await.map_err(io_err)?;
    info!(items = report.items.len(), "Wrote JSON report");
    Ok(())
}
