//! Merge command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};

use super::inputs::{InputArgs, MergeRequest};
use crate::csvio::write_table;
use crate::render::{write_report, ReportInputs};

#[derive(Args, Debug)]
pub struct MergeArgs {
    #[command(flatten)]
    pub inputs: InputArgs,

    /// Output CSV path
    #[arg(long, value_name = "PATH", required = true)]
    pub out: Option<PathBuf>,

    /// Also write a JSON merge report here
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Omit the timestamp from the merge report
    #[arg(long)]
    pub no_timestamp: bool,
}

pub fn run(args: MergeArgs, config_path: Option<&Path>) -> Result<()> {
    let out = args.out.as_deref().context("--out is required")?;

    let request = MergeRequest::load(&args.inputs, config_path)?;
    let merged = request.merge()?;
    write_table(&merged.table, out, request.config.delimiter_byte()?)?;

    if let Some(report_path) = &args.report {
        let inputs = ReportInputs {
            opps: args.inputs.opps.as_deref(),
            metrics: args.inputs.metrics.as_deref(),
            map: args.inputs.map.as_deref(),
            output: Some(out),
        };
        write_report(report_path, &merged, &inputs, !args.no_timestamp)
            .with_context(|| format!("Writing report {}", report_path.display()))?;
    }

    println!("Wrote {} with {} rows.", out.display(), merged.row_count());
    Ok(())
}
