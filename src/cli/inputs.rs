//! Input flags and loading shared by the merge and preview commands.

use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};

use crate::config::{load_config, resolve_header_mapping, Config};
use crate::csvio::read_table;
use crate::domain::{MergedTable, Table};
use crate::merge::{merge_tables, HeaderMapping};

#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Salesforce opportunities CSV (needs Account.Name; a channel ID column is better)
    #[arg(long, value_name = "PATH", required = true)]
    pub opps: Option<PathBuf>,

    /// Tubular metrics CSV export
    #[arg(long, value_name = "PATH", required = true)]
    pub metrics: Option<PathBuf>,

    /// Channel map CSV (account_name,channel_id) used when opps has no channel ID column
    #[arg(long, value_name = "PATH")]
    pub map: Option<PathBuf>,

    /// Metrics header mapping, e.g. 'channel_id:Channel ID,views_30d:Views (30d)'
    #[arg(long, value_name = "SPEC", env = "OPPS_MERGE_METRICS_COLS")]
    pub metrics_cols: Option<String>,
}

impl InputArgs {
    pub fn opps_path(&self) -> Result<&Path> {
        self.opps.as_deref().context("--opps is required")
    }

    pub fn metrics_path(&self) -> Result<&Path> {
        self.metrics.as_deref().context("--metrics is required")
    }
}

/// Everything one invocation needs, built fresh and passed explicitly.
pub struct MergeRequest {
    pub config: Config,
    pub mapping: HeaderMapping,
    pub opps: Table,
    pub metrics: Table,
    pub channel_map: Option<Table>,
}

impl MergeRequest {
    /// Load config, parse the header mapping, then read the input files.
    ///
    /// The mapping is validated before any file is read.
    pub fn load(args: &InputArgs, config_path: Option<&Path>) -> Result<Self> {
        let cwd = std::env::current_dir().context("Resolving current directory")?;
        let config = load_config(&cwd, config_path)?;
        let mapping = resolve_header_mapping(args.metrics_cols.as_deref(), &config)?;
        let delimiter = config.delimiter_byte()?;

        let opps_path = args.opps_path()?;
        let metrics_path = args.metrics_path()?;

        let opps = read_table(opps_path, delimiter)?;
        tracing::debug!("opportunities: {} rows, {} columns", opps.row_count(), opps.column_count());
        let channel_map = match &args.map {
            Some(path) => Some(read_table(path, delimiter)?),
            None => None,
        };
        let metrics = read_table(metrics_path, delimiter)?;
        tracing::debug!("metrics: {} rows, {} columns", metrics.row_count(), metrics.column_count());

        Ok(Self { config, mapping, opps, metrics, channel_map })
    }

    pub fn merge(&self) -> Result<MergedTable> {
        let merged =
            merge_tables(&self.opps, &self.metrics, self.channel_map.as_ref(), &self.mapping)?;
        tracing::debug!(
            "joined on '{}' (map used: {}), {} rows without metrics",
            merged.provenance.channel_column,
            merged.provenance.map_used,
            merged.provenance.unmatched_metrics
        );
        Ok(merged)
    }
}
