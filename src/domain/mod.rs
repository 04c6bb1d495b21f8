//! Core domain types and column vocabularies.

pub mod table;

pub use table::{Cell, Table};

use serde::Serialize;

/// Opportunity columns that may hold the channel ID, highest priority first.
pub const CHANNEL_COLUMN_CANDIDATES: &[&str] =
    &["Account.YouTube_Channel_ID__c", "YouTube_Channel_ID__c", "channel_id", "Channel_ID__c"];

/// Opportunity columns that may hold the account name, highest priority first.
pub const ACCOUNT_COLUMN_CANDIDATES: &[&str] = &["Account.Name", "account_name", "Account"];

pub const CHANNEL_ID: &str = "channel_id";
pub const ACCOUNT_NAME: &str = "account_name";
pub const CHANNEL_NAME: &str = "channel_name";

/// Metric fields guaranteed to exist in every merged output.
pub const METRIC_FIELDS: &[&str] =
    &["views_30d", "audience_size", "category", "growth_30d_pct", CHANNEL_NAME];

/// Metrics-side columns carried into the merged table, in join order.
pub const JOINED_METRIC_COLUMNS: &[&str] = &[
    CHANNEL_ID,
    CHANNEL_NAME,
    "views_30d",
    "audience_size",
    "category",
    "growth_30d_pct",
];

/// Opportunity identity fields listed ahead of the channel column.
pub const PREFERRED_LEADING_COLUMNS: &[&str] = &[
    "Account.Id",
    "Account.Name",
    "Id",
    "Name",
    "StageName",
    "Amount",
    "CloseDate",
    "Owner.Name",
];

/// Metric fields listed right after the channel column.
pub const PREFERRED_TRAILING_COLUMNS: &[&str] =
    &[CHANNEL_NAME, "views_30d", "audience_size", "category", "growth_30d_pct"];

/// Suffix for an opportunity column displaced by an incoming metrics column.
pub const COLLISION_SUFFIX: &str = "_opps";

/// How a merge was performed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergeProvenance {
    /// Opportunity column used as the join key.
    pub channel_column: String,
    /// Whether the channel map resolved the channel ID.
    pub map_used: bool,
    /// Rows with no matching metrics row.
    pub unmatched_metrics: usize,
    /// Rows whose account had no channel map entry (0 when the map was not used).
    pub unmapped_accounts: usize,
}

/// Merge output: the joined table plus its provenance.
#[derive(Debug, Clone)]
pub struct MergedTable {
    pub table: Table,
    pub provenance: MergeProvenance,
}

impl MergedTable {
    pub fn row_count(&self) -> usize {
        self.table.row_count()
    }
}
