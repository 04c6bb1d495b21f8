//! `--metrics-cols` header mapping.

use crate::domain::Table;
use crate::error::MergeError;

/// Ordered mapping from canonical metric names to the headers a metrics
/// export actually uses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMapping {
    pairs: Vec<(String, String)>,
}

impl HeaderMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `expected <- source`. A repeated expected name overwrites the
    /// earlier source in place.
    pub fn insert(&mut self, expected: impl Into<String>, source: impl Into<String>) {
        let expected = expected.into();
        let source = source.into();
        match self.pairs.iter_mut().find(|(e, _)| *e == expected) {
            Some(pair) => pair.1 = source,
            None => self.pairs.push((expected, source)),
        }
    }

    pub fn get(&self, expected: &str) -> Option<&str> {
        self.pairs.iter().find(|(e, _)| e == expected).map(|(_, s)| s.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// `(expected, source)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(e, s)| (e.as_str(), s.as_str()))
    }

    /// Rename each `source` column of `table` to its `expected` name.
    ///
    /// All renames are resolved against the table's original headers at
    /// once, so `a:b,b:a` swaps columns and `a:x,b:a` chains. Sources the
    /// table does not have are ignored.
    pub fn apply(&self, table: &mut Table) {
        table.rename_columns(self.iter().map(|(expected, source)| (source, expected)));
    }
}

impl<E: Into<String>, S: Into<String>> FromIterator<(E, S)> for HeaderMapping {
    fn from_iter<I: IntoIterator<Item = (E, S)>>(iter: I) -> Self {
        let mut mapping = Self::new();
        for (expected, source) in iter {
            mapping.insert(expected, source);
        }
        mapping
    }
}

/// Parse `expected:source,expected:source,...`.
///
/// Empty input yields an empty mapping. Only the first `:` of a pair splits
/// it, so source headers may contain colons.
pub fn parse_header_mapping(spec: Option<&str>) -> Result<HeaderMapping, MergeError> {
    let mut mapping = HeaderMapping::new();
    let Some(spec) = spec else {
        return Ok(mapping);
    };

    for pair in spec.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let Some((expected, source)) = pair.split_once(':') else {
            return Err(MergeError::MalformedMapping { pair: pair.to_string() });
        };
        mapping.insert(expected.trim(), source.trim());
    }
    Ok(mapping)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_spec_is_empty_mapping() {
        assert!(parse_header_mapping(None).unwrap().is_empty());
        assert!(parse_header_mapping(Some("")).unwrap().is_empty());
        assert!(parse_header_mapping(Some("  ,  ")).unwrap().is_empty());
    }

    #[test]
    fn parses_and_trims_pairs() {
        let mapping = parse_header_mapping(Some(
            " channel_id : Channel ID ,views_30d:Views (30d), audience_size:Subscribers",
        ))
        .unwrap();
        assert_eq!(mapping.len(), 3);
        assert_eq!(mapping.get("channel_id"), Some("Channel ID"));
        assert_eq!(mapping.get("views_30d"), Some("Views (30d)"));
        assert_eq!(mapping.get("audience_size"), Some("Subscribers"));
    }

    #[test]
    fn missing_separator_names_the_pair() {
        let err = parse_header_mapping(Some("channel_id:Channel ID, views_30d")).unwrap_err();
        assert_eq!(err, MergeError::MalformedMapping { pair: "views_30d".to_string() });
        assert!(err.to_string().contains("views_30d"));
    }

    #[test]
    fn later_duplicate_wins() {
        let mapping =
            parse_header_mapping(Some("channel_id:A,views_30d:V,channel_id:B")).unwrap();
        assert_eq!(mapping.get("channel_id"), Some("B"));
        let order: Vec<&str> = mapping.iter().map(|(e, _)| e).collect();
        assert_eq!(order, vec!["channel_id", "views_30d"]);
    }

    #[test]
    fn source_may_contain_colon() {
        let mapping = parse_header_mapping(Some("views_30d:Views: last 30d")).unwrap();
        assert_eq!(mapping.get("views_30d"), Some("Views: last 30d"));
    }

    #[test]
    fn apply_renames_and_is_idempotent() {
        let mapping = parse_header_mapping(Some("channel_id:Channel ID")).unwrap();
        let mut table = Table::from_strs(&["Channel ID", "views_30d"], &[&["UC1", "10"]]);
        mapping.apply(&mut table);
        assert_eq!(table.headers(), &["channel_id", "views_30d"]);
        mapping.apply(&mut table);
        assert_eq!(table.headers(), &["channel_id", "views_30d"]);
    }

    #[test]
    fn apply_swaps_columns() {
        let mapping =
            parse_header_mapping(Some("views_30d:audience_size,audience_size:views_30d")).unwrap();
        let mut table = Table::from_strs(&["views_30d", "audience_size"], &[&["V", "A"]]);
        mapping.apply(&mut table);
        assert_eq!(table.value(0, "views_30d"), Some("A"));
        assert_eq!(table.value(0, "audience_size"), Some("V"));
    }

    #[test]
    fn apply_chains_against_original_headers() {
        let mapping = parse_header_mapping(Some("channel_id:X,views_30d:channel_id")).unwrap();
        let mut table = Table::from_strs(&["channel_id", "X"], &[&["1000", "UC1"]]);
        mapping.apply(&mut table);
        assert_eq!(table.headers(), &["views_30d", "channel_id"]);
        assert_eq!(table.value(0, "channel_id"), Some("UC1"));
        assert_eq!(table.value(0, "views_30d"), Some("1000"));
    }
}
