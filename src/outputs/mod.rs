//! Presentation and export of a [`crate::models::Report`].
//!
//! # Submodules
//!
//! - [`console`]: colored human-readable report for the terminal
//! - [`csv`]: comma-separated export (`--csv <path>`)
//! - [`json`]: JSON export of the whole report (`--json <path>`)
//!
//! Outputs only read the report; extraction never depends on them.

pub mod console;
pub mod csv;
pub mod json;

use std::path::PathBuf;
use thiserror::Error;

/// Failure while writing an export file.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}
