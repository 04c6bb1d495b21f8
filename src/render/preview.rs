//! Plain-text table previews for the terminal.

use unicode_width::UnicodeWidthStr;

use crate::domain::Table;

/// Widest a single column may render before its cells are truncated.
const MAX_CELL_WIDTH: usize = 32;
const NULL_MARKER: &str = "∅";

/// Render the first `max_rows` rows of `table` as an aligned text grid.
///
/// Nulls render as `∅` so they are distinguishable from empty strings.
pub fn render_preview(table: &Table, max_rows: usize) -> String {
    let shown = table.head(max_rows);
    let cells: Vec<Vec<String>> = shown
        .rows()
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| truncate(cell.as_deref().unwrap_or(NULL_MARKER), MAX_CELL_WIDTH))
                .collect()
        })
        .collect();
    let headers: Vec<String> =
        shown.headers().iter().map(|h| truncate(h, MAX_CELL_WIDTH)).collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.width()).collect();
    for row in &cells {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.width());
        }
    }

    let mut out = String::new();
    out.push_str(&render_line(&headers, &widths));
    out.push_str(&render_rule(&widths));
    for row in &cells {
        out.push_str(&render_line(row, &widths));
    }
    if table.row_count() > max_rows {
        out.push_str(&format!("… {} more rows\n", table.row_count() - max_rows));
    }
    out
}

fn render_line(cells: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{}{}", cell, " ".repeat(width.saturating_sub(cell.width()))))
        .collect();
    format!("| {} |\n", padded.join(" | "))
}

fn render_rule(widths: &[usize]) -> String {
    let dashes: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    format!("|-{}-|\n", dashes.join("-|-"))
}

fn truncate(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut width = 0;
    for ch in text.chars() {
        let ch_width = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if width + ch_width + 1 > max_width {
            break;
        }
        width += ch_width;
        out.push(ch);
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aligns_columns_and_marks_nulls() {
        let table = Table::from_strs(&["id", "channel_name"], &[&["1", "Acme"], &["22", ""]]);
        let out = render_preview(&table, 10);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "| id | channel_name |");
        assert_eq!(lines[1], "|----|--------------|");
        assert_eq!(lines[2], "| 1  | Acme         |");
        assert_eq!(lines[3], "| 22 | ∅            |");
    }

    #[test]
    fn reports_hidden_rows() {
        let table = Table::from_strs(&["a"], &[&["1"], &["2"], &["3"]]);
        let out = render_preview(&table, 2);
        assert!(out.ends_with("… 1 more rows\n"));
        assert_eq!(out.lines().count(), 5);
    }

    #[test]
    fn long_cells_are_truncated() {
        let long = "x".repeat(100);
        let truncated = truncate(&long, MAX_CELL_WIDTH);
        assert_eq!(truncated.width(), MAX_CELL_WIDTH);
        assert!(truncated.ends_with('…'));
    }
}
