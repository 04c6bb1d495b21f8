//! Opportunity/metrics merge engine.
//!
//! [`merge_tables`] is a pure function: it borrows its inputs, builds new
//! tables, performs no I/O and does not log. Errors are raised on the first
//! violated precondition; there is no partial merge.

pub mod header_map;
pub mod join;
pub mod resolve;

pub use header_map::{parse_header_mapping, HeaderMapping};
pub use join::{left_join, JoinOutput};
pub use resolve::{resolve_account_column, resolve_channel_column};

use crate::domain::{
    MergeProvenance, MergedTable, Table, ACCOUNT_NAME, CHANNEL_ID, JOINED_METRIC_COLUMNS,
    METRIC_FIELDS, PREFERRED_LEADING_COLUMNS, PREFERRED_TRAILING_COLUMNS,
};
use crate::error::MergeError;

/// Join opportunities to channel metrics.
///
/// When the opportunities carry no channel column, `channel_map`
/// (`account_name`, `channel_id`) supplies one by account name. `mapping`
/// renames metrics headers to their canonical names before the join.
pub fn merge_tables(
    opps: &Table,
    metrics: &Table,
    channel_map: Option<&Table>,
    mapping: &HeaderMapping,
) -> Result<MergedTable, MergeError> {
    let (opps, channel_column, map_stats) = match resolve_channel_column(opps) {
        Some(column) => (opps.clone(), column.to_string(), None),
        None => {
            let joined = attach_channel_ids(opps, channel_map)?;
            (joined.table, CHANNEL_ID.to_string(), Some(joined.unmatched))
        }
    };

    let mut metrics = metrics.clone();
    mapping.apply(&mut metrics);
    if !metrics.has_column(CHANNEL_ID) {
        return Err(MergeError::schema(
            format!("Metrics CSV must include '{CHANNEL_ID}' (or map it via --metrics-cols)."),
            &[CHANNEL_ID],
        ));
    }
    for field in METRIC_FIELDS {
        metrics.add_null_column(field);
    }

    let joined = left_join(&opps, &channel_column, &metrics, CHANNEL_ID, JOINED_METRIC_COLUMNS);
    let table = reorder_columns(&joined.table, &channel_column);

    Ok(MergedTable {
        table,
        provenance: MergeProvenance {
            channel_column,
            map_used: map_stats.is_some(),
            unmatched_metrics: joined.unmatched,
            unmapped_accounts: map_stats.unwrap_or(0),
        },
    })
}

/// Resolve `channel_id` for each opportunity through the channel map.
fn attach_channel_ids(
    opps: &Table,
    channel_map: Option<&Table>,
) -> Result<JoinOutput, MergeError> {
    let Some(channel_map) = channel_map else {
        return Err(MergeError::Configuration(format!(
            "Opps CSV has no channel_id column. Provide --map channel_map.csv ({ACCOUNT_NAME},{CHANNEL_ID})."
        )));
    };

    if !channel_map.has_column(ACCOUNT_NAME) || !channel_map.has_column(CHANNEL_ID) {
        return Err(MergeError::schema(
            format!("channel_map.csv must include: {ACCOUNT_NAME}, {CHANNEL_ID}"),
            &[ACCOUNT_NAME, CHANNEL_ID],
        ));
    }

    let Some(account_column) = resolve_account_column(opps) else {
        return Err(MergeError::schema(
            "Couldn't find Account.Name column in opps to join with channel_map.",
            crate::domain::ACCOUNT_COLUMN_CANDIDATES,
        ));
    };

    Ok(left_join(opps, account_column, channel_map, ACCOUNT_NAME, &[CHANNEL_ID]))
}

/// Preferred columns first (when present), then the rest in existing order.
fn reorder_columns(table: &Table, channel_column: &str) -> Table {
    let preferred: Vec<&str> = PREFERRED_LEADING_COLUMNS
        .iter()
        .copied()
        .chain(std::iter::once(channel_column))
        .chain(PREFERRED_TRAILING_COLUMNS.iter().copied())
        .collect();

    let mut order: Vec<&str> = Vec::with_capacity(table.column_count());
    for column in preferred.iter().copied().filter(|c| table.has_column(c)) {
        if !order.contains(&column) {
            order.push(column);
        }
    }
    for column in table.headers() {
        if !order.contains(&column.as_str()) {
            order.push(column);
        }
    }
    table.select(&order)
}
