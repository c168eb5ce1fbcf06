//! CSV export.
//!
//! UTF-8, one header row, one row per item. Every field is quoted and
//! embedded double quotes are doubled, so titles like `Цитата "важная"`
//! survive spreadsheet import.

use super::ExportError;
use crate::models::NewsItem;
use crate::utils::ensure_parent_dir;
use itertools::Itertools;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{info, instrument};

pub const HEADER: &str = "Заголовок,Ссылка,Время";

/// Quote one field for CSV output.
pub fn quote_field(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// One CSV line (without the trailing newline) for `item`.
pub fn csv_row(item: &NewsItem) -> String {
    [
        item.title.as_str(),
        item.link.as_str(),
        item.time.as_deref().unwrap_or_default(),
    ]
    .into_iter()
    .map(quote_field)
    .join(",")
}

/// Write `items` to `path`, replacing any previous file.
///
/// # Arguments
///
/// * `items` - Headlines in display order
/// * `path` - Target file; missing parent directories are created
///
/// # Returns
///
/// `Ok(())` on success, or [`ExportError::Io`] naming the path that failed.
#[instrument(level = "info", skip_all, fields(path = %path.display(), rows = items.len()))]
pub fn write_csv(items: &[NewsItem], path: &Path) -> Result<(), ExportError> {
    let io_err = |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };
    ensure_parent_dir(path).map_err(io_err)?;

    // The writer owns the file; it is closed on every exit from this scope.
    let mut writer = BufWriter::new(File::create(path).map_err(io_err)?);
    writeln!(writer, "{HEADER}").map_err(io_err)?;
    for item in items {
        writeln!(writer, "{}", csv_row(item)).map_err(io_err)?;
    }
    writer.flush().map_err(io_err)?;

    info!("Wrote CSV export");
    Ok(())
}
