//! Merge report JSON generation.

use anyhow::Result;
use chrono::Utc;
use serde_json::{json, Map, Value};
use std::path::Path;

use crate::domain::MergedTable;

pub const REPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Input paths recorded in the report.
#[derive(Debug, Clone, Default)]
pub struct ReportInputs<'a> {
    pub opps: Option<&'a Path>,
    pub metrics: Option<&'a Path>,
    pub map: Option<&'a Path>,
    pub output: Option<&'a Path>,
}

/// Build the report value for a finished merge.
pub fn build_report(merged: &MergedTable, inputs: &ReportInputs<'_>, include_timestamp: bool) -> Value {
    let path_value = |p: Option<&Path>| match p {
        Some(p) => Value::String(p.display().to_string()),
        None => Value::Null,
    };

    let mut report = Map::new();
    report.insert("schema_version".to_string(), Value::String(REPORT_SCHEMA_VERSION.to_string()));
    if include_timestamp {
        report.insert(
            "generated_at".to_string(),
            Value::String(Utc::now().format("%Y-%m-%dT%H:%M:%S+00:00").to_string()),
        );
    }
    report.insert(
        "inputs".to_string(),
        json!({
            "opps": path_value(inputs.opps),
            "metrics": path_value(inputs.metrics),
            "map": path_value(inputs.map),
            "output": path_value(inputs.output),
        }),
    );
    report.insert("rows".to_string(), json!(merged.row_count()));
    report.insert(
        "provenance".to_string(),
        serde_json::to_value(&merged.provenance).unwrap_or(Value::Null),
    );
    report.insert("columns".to_string(), json!(merged.table.headers()));
    Value::Object(report)
}

pub fn write_report(
    report_path: &Path,
    merged: &MergedTable,
    inputs: &ReportInputs<'_>,
    include_timestamp: bool,
) -> Result<()> {
    let report = build_report(merged, inputs, include_timestamp);
    if let Some(parent) = report_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(report_path, serde_json::to_string_pretty(&report)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MergeProvenance, Table};
    use tempfile::TempDir;

    fn sample() -> MergedTable {
        MergedTable {
            table: Table::from_strs(&["channel_id", "views_30d"], &[&["UC1", "10"], &["UC2", ""]]),
            provenance: MergeProvenance {
                channel_column: "channel_id".to_string(),
                map_used: true,
                unmatched_metrics: 1,
                unmapped_accounts: 0,
            },
        }
    }

    #[test]
    fn report_without_timestamp_is_reproducible() {
        let inputs = ReportInputs { opps: Some(Path::new("opps.csv")), ..Default::default() };
        let report = build_report(&sample(), &inputs, false);
        assert_eq!(report["schema_version"], "1.0.0");
        assert!(report.get("generated_at").is_none());
        assert_eq!(report["rows"], 2);
        assert_eq!(report["inputs"]["opps"], "opps.csv");
        assert_eq!(report["inputs"]["map"], Value::Null);
        assert_eq!(report["provenance"]["channel_column"], "channel_id");
        assert_eq!(report["provenance"]["map_used"], true);
        assert_eq!(report["provenance"]["unmatched_metrics"], 1);
        assert_eq!(report["columns"], json!(["channel_id", "views_30d"]));
    }

    #[test]
    fn write_report_creates_parent_dirs() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("reports").join("merge.json");
        write_report(&path, &sample(), &ReportInputs::default(), true).unwrap();
        let value: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert!(value["generated_at"].is_string());
    }
}
