//! In-memory table with named columns and nullable string cells.

use std::collections::{HashMap, HashSet};

/// A single cell. `None` is a null (an empty field in CSV).
pub type Cell = Option<String>;

/// Column-addressed table preserving row order.
///
/// Every row has exactly `headers.len()` cells. Constructors pad or
/// truncate ragged rows so lookups by column index never go out of bounds.
/// Column names are unique: repeated headers get `.1`, `.2`, ... suffixes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(headers: Vec<String>) -> Self {
        Self { headers: dedupe_headers(headers), rows: Vec::new() }
    }

    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        let mut table = Self::new(headers);
        for row in rows {
            table.push_row(row);
        }
        table
    }

    /// Build a table from string literals, treating `""` as null.
    pub fn from_strs(headers: &[&str], rows: &[&[&str]]) -> Self {
        let headers = headers.iter().map(|h| h.to_string()).collect();
        let rows = rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|v| if v.is_empty() { None } else { Some(v.to_string()) })
                    .collect()
            })
            .collect();
        Self::from_rows(headers, rows)
    }

    pub fn push_row(&mut self, mut row: Vec<Cell>) {
        row.resize(self.headers.len(), None);
        self.rows.push(row);
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Index of the first column with this exact name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Cell at `(row, column name)`; `None` for a null cell or a missing column.
    pub fn value(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.column_index(column)?;
        self.rows.get(row)?.get(idx)?.as_deref()
    }

    /// All cells of one column, in row order.
    pub fn column(&self, name: &str) -> Option<Vec<Option<&str>>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|row| row[idx].as_deref()).collect())
    }

    /// Apply `(source, target)` renames simultaneously against the current
    /// headers, so swaps and chains see the original names. A later pair
    /// for the same source wins. An untouched column whose name a rename
    /// claims is dropped.
    pub fn rename_columns<'a, I>(&mut self, renames: I)
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let targets: HashMap<&str, &str> = renames.into_iter().collect();
        if targets.is_empty() {
            return;
        }

        let renamed: Vec<Option<String>> = self
            .headers
            .iter()
            .map(|h| targets.get(h.as_str()).map(|t| t.to_string()))
            .collect();
        let claimed: HashSet<&str> = renamed.iter().flatten().map(String::as_str).collect();

        let mut keep = Vec::with_capacity(self.headers.len());
        let mut headers = Vec::with_capacity(self.headers.len());
        let mut seen: HashSet<String> = HashSet::new();
        for (idx, header) in self.headers.iter().enumerate() {
            let name = match &renamed[idx] {
                Some(target) => target.clone(),
                None if claimed.contains(header.as_str()) => continue,
                None => header.clone(),
            };
            if seen.insert(name.clone()) {
                keep.push(idx);
                headers.push(name);
            }
        }

        self.headers = headers;
        for row in &mut self.rows {
            let kept: Vec<Cell> = keep.iter().map(|&i| row[i].take()).collect();
            *row = kept;
        }
    }

    /// Append an all-null column. No-op when the column already exists.
    pub fn add_null_column(&mut self, name: &str) {
        if self.has_column(name) {
            return;
        }
        self.headers.push(name.to_string());
        for row in &mut self.rows {
            row.push(None);
        }
    }

    /// New table with the listed columns in the given order. Unknown names
    /// are skipped.
    pub fn select(&self, columns: &[&str]) -> Table {
        let indices: Vec<usize> = columns.iter().filter_map(|c| self.column_index(c)).collect();
        let headers = indices.iter().map(|&i| self.headers[i].clone()).collect();
        let rows = self
            .rows
            .iter()
            .map(|row| indices.iter().map(|&i| row[i].clone()).collect())
            .collect();
        Table { headers, rows }
    }

    /// First `n` rows as a new table.
    pub fn head(&self, n: usize) -> Table {
        Table {
            headers: self.headers.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }
}

/// Make header names unique the way spreadsheet/dataframe readers do:
/// the second `Note` becomes `Note.1`, the third `Note.2`, skipping names
/// already taken.
fn dedupe_headers(headers: Vec<String>) -> Vec<String> {
    let mut taken: HashSet<String> = headers.iter().cloned().collect();
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::with_capacity(headers.len());
    for header in headers {
        if seen.insert(header.clone()) {
            out.push(header);
            continue;
        }
        let mut n = 1;
        let mut candidate = format!("{header}.{n}");
        while taken.contains(&candidate) {
            n += 1;
            candidate = format!("{header}.{n}");
        }
        taken.insert(candidate.clone());
        seen.insert(candidate.clone());
        out.push(candidate);
    }
    out
}
