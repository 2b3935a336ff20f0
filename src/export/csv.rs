//! CSV output.
//!
//! One row per resolved URL, columns in the order of `CSV_HEADERS`.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use csv::Writer;

use crate::config::CSV_HEADERS;
use crate::models::ResolutionResult;

/// Writes the header and all `rows` to `writer`.
///
/// # Returns
///
/// The number of data rows written.
pub fn write_records<W: Write>(writer: W, rows: &[ResolutionResult]) -> Result<usize> {
    let mut writer = Writer::from_writer(writer);
    writer
        .write_record(CSV_HEADERS)
        .context("Failed to write CSV header")?;

    for row in rows {
        writer
            .write_record(row.to_record())
            .with_context(|| format!("Failed to write CSV row for {}", row.source_url()))?;
    }

    writer.flush().context("Failed to flush CSV output")?;
    Ok(rows.len())
}

/// Writes `rows` to the CSV file at `path`, replacing it.
///
/// Missing parent directories are created.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be created or written.
pub fn write_csv(path: &Path, rows: &[ResolutionResult]) -> Result<usize> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create output file {}", path.display()))?;
    write_records(file, rows)
}
