//! Left join over [`Table`]s.

use std::collections::HashMap;

use crate::domain::{Cell, Table, COLLISION_SUFFIX};

/// Result of [`left_join`].
#[derive(Debug, Clone)]
pub struct JoinOutput {
    pub table: Table,
    /// Left rows that found no right row.
    pub unmatched: usize,
}

/// Left-join `left` to `right` on `left.left_key == right.right_key`,
/// bringing in `right_columns` from the right side.
///
/// - Every left row appears exactly once, in order. When several right rows
///   share a key the first one wins.
/// - Null keys never match.
/// - If both keys share a name, that column stays as the single left column.
/// - A left column colliding with an incoming right column is renamed with
///   [`COLLISION_SUFFIX`]; the right column keeps the plain name.
pub fn left_join(
    left: &Table,
    left_key: &str,
    right: &Table,
    right_key: &str,
    right_columns: &[&str],
) -> JoinOutput {
    let Some(left_key_idx) = left.column_index(left_key) else {
        return JoinOutput { table: left.clone(), unmatched: left.row_count() };
    };

    let mut index: HashMap<&str, usize> = HashMap::new();
    if let Some(right_key_idx) = right.column_index(right_key) {
        for (row_idx, row) in right.rows().iter().enumerate() {
            if let Some(key) = row[right_key_idx].as_deref() {
                index.entry(key).or_insert(row_idx);
            }
        }
    }

    let mut headers: Vec<String> = left.headers().to_vec();
    let mut carried: Vec<usize> = Vec::new();
    for column in right_columns {
        let Some(right_idx) = right.column_index(column) else {
            continue;
        };
        if *column == right_key && right_key == left_key {
            continue;
        }
        if let Some(pos) = headers.iter().position(|h| h == column) {
            let renamed = unique_name(&headers, column);
            headers[pos] = renamed;
        }
        headers.push(column.to_string());
        carried.push(right_idx);
    }

    let mut table = Table::new(headers);
    let mut unmatched = 0;
    for row in left.rows() {
        let matched = row[left_key_idx].as_deref().and_then(|key| index.get(key)).copied();
        if matched.is_none() {
            unmatched += 1;
        }
        let mut out: Vec<Cell> = row.clone();
        match matched {
            Some(right_row) => {
                let right_row = &right.rows()[right_row];
                out.extend(carried.iter().map(|&i| right_row[i].clone()));
            }
            None => out.extend(carried.iter().map(|_| None)),
        }
        table.push_row(out);
    }

    JoinOutput { table, unmatched }
}

fn unique_name(headers: &[String], base: &str) -> String {
    let mut candidate = format!("{base}{COLLISION_SUFFIX}");
    while headers.iter().any(|h| *h == candidate) {
        candidate.push_str(COLLISION_SUFFIX);
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_every_left_row_in_order() {
        let left = Table::from_strs(&["k", "v"], &[&["b", "1"], &["a", "2"], &["z", "3"]]);
        let right = Table::from_strs(&["key", "m"], &[&["a", "A"], &["b", "B"]]);
        let out = left_join(&left, "k", &right, "key", &["key", "m"]);

        assert_eq!(out.table.headers(), &["k", "v", "key", "m"]);
        assert_eq!(out.table.row_count(), 3);
        assert_eq!(out.table.value(0, "m"), Some("B"));
        assert_eq!(out.table.value(1, "m"), Some("A"));
        assert_eq!(out.table.value(2, "m"), None);
        assert_eq!(out.table.value(2, "key"), None);
        assert_eq!(out.unmatched, 1);
    }

    #[test]
    fn duplicate_right_keys_do_not_multiply_rows() {
        let left = Table::from_strs(&["k"], &[&["a"]]);
        let right = Table::from_strs(&["k", "m"], &[&["a", "first"], &["a", "second"]]);
        let out = left_join(&left, "k", &right, "k", &["k", "m"]);
        assert_eq!(out.table.row_count(), 1);
        assert_eq!(out.table.value(0, "m"), Some("first"));
    }

    #[test]
    fn shared_key_name_is_coalesced() {
        let left = Table::from_strs(&["k"], &[&["a"], &["b"]]);
        let right = Table::from_strs(&["k", "m"], &[&["a", "A"]]);
        let out = left_join(&left, "k", &right, "k", &["k", "m"]);
        assert_eq!(out.table.headers(), &["k", "m"]);
        assert_eq!(out.table.value(1, "k"), Some("b"));
    }

    #[test]
    fn null_keys_never_match() {
        let left = Table::from_strs(&["k"], &[&[""]]);
        let right = Table::from_strs(&["k", "m"], &[&["", "ghost"]]);
        let out = left_join(&left, "k", &right, "k", &["m"]);
        assert_eq!(out.table.value(0, "m"), None);
        assert_eq!(out.unmatched, 1);
    }

    #[test]
    fn colliding_left_column_is_suffixed() {
        let left = Table::from_strs(&["k", "m"], &[&["a", "left"]]);
        let right = Table::from_strs(&["id", "m"], &[&["a", "right"]]);
        let out = left_join(&left, "k", &right, "id", &["m"]);
        assert_eq!(out.table.headers(), &["k", "m_opps", "m"]);
        assert_eq!(out.table.value(0, "m_opps"), Some("left"));
        assert_eq!(out.table.value(0, "m"), Some("right"));
    }
}
