//! CSV file -> [`Table`].

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use std::path::Path;

use crate::domain::Table;
use crate::utils::read_text_file;

/// Read a CSV file with a mandatory header row.
///
/// Empty fields become nulls. Short rows are padded with nulls. Repeated
/// headers are numbered (`Note`, `Note.1`). A file with no header row is an
/// error.
pub fn read_table(path: &Path, delimiter: u8) -> Result<Table> {
    let (content, encoding) = read_text_file(path)?;
    tracing::debug!("Read {} ({})", path.display(), encoding);
    parse_table(&content, delimiter)
        .with_context(|| format!("Couldn't read {}", path.display()))
}

/// Parse CSV text into a [`Table`].
pub fn parse_table(content: &str, delimiter: u8) -> Result<Table> {
    if content.trim().is_empty() {
        anyhow::bail!("CSV appears to be empty. Provide a CSV with a header row.");
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(content.as_bytes());

    let headers: Vec<String> =
        reader.headers().context("Reading CSV header")?.iter().map(str::to_string).collect();
    let mut table = Table::new(headers);

    for (line, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("Reading CSV record {}", line + 1))?;
        let row = record
            .iter()
            .map(|field| if field.is_empty() { None } else { Some(field.to_string()) })
            .collect();
        table.push_row(row);
    }

    Ok(table)
}
