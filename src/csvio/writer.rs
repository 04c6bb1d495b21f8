//! [`Table`] -> CSV.

use anyhow::{Context, Result};
use csv::WriterBuilder;
use std::path::Path;

use crate::domain::Table;

/// Serialize a table to CSV bytes. Nulls become empty fields.
pub fn table_to_csv(table: &Table, delimiter: u8) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new().delimiter(delimiter).from_writer(Vec::new());
    writer.write_record(table.headers()).context("Writing output headers")?;
    for row in table.rows() {
        writer
            .write_record(row.iter().map(|cell| cell.as_deref().unwrap_or("")))
            .context("Writing output row")?;
    }
    writer.into_inner().map_err(|e| anyhow::anyhow!("Flushing CSV output: {}", e.error()))
}

/// Write a table to `path`.
///
/// The whole CSV is serialized before the file is touched, so a failure
/// leaves no partial output behind.
pub fn write_table(table: &Table, path: &Path, delimiter: u8) -> Result<()> {
    let bytes = table_to_csv(table, delimiter)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Creating output directory {}", parent.display()))?;
    }
    std::fs::write(path, bytes)
        .with_context(|| format!("Writing output file {}", path.display()))?;
    Ok(())
}
