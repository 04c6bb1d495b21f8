//! Preview command implementation

use anyhow::Result;
use clap::Args;
use std::path::Path;

use super::inputs::{InputArgs, MergeRequest};
use crate::domain::Table;
use crate::render::render_preview;
use crate::utils::format_with_commas;

/// Rows shown per input table with `--show-inputs`.
const INPUT_PREVIEW_ROWS: usize = 5;

#[derive(Args, Debug)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub inputs: InputArgs,

    /// Number of merged rows to show (defaults to preview_rows from config)
    #[arg(long, value_name = "N")]
    pub rows: Option<usize>,

    /// Show the head of each input table before merging
    #[arg(long)]
    pub show_inputs: bool,
}

pub fn run(args: PreviewArgs, config_path: Option<&Path>) -> Result<()> {
    let request = MergeRequest::load(&args.inputs, config_path)?;

    if args.show_inputs {
        print_input("Opportunities preview", &request.opps);
        if let Some(map) = &request.channel_map {
            print_input("Channel map preview", map);
        }
        print_input("Tubular metrics preview", &request.metrics);
    }

    let merged = request.merge()?;
    let provenance = &merged.provenance;

    println!(
        "Merged {} opportunities using channel column `{}`.",
        format_with_commas(merged.row_count()),
        provenance.channel_column
    );
    println!("Total rows: {}", format_with_commas(merged.row_count()));
    println!("Missing Tubular matches: {}", format_with_commas(provenance.unmatched_metrics));
    println!("Used channel map: {}", if provenance.map_used { "Yes" } else { "No" });
    if provenance.map_used {
        println!("Accounts without a channel map entry: {}", provenance.unmapped_accounts);
    }
    println!();

    let rows = args.rows.unwrap_or(request.config.preview_rows);
    print!("{}", render_preview(&merged.table, rows));
    Ok(())
}

fn print_input(label: &str, table: &Table) {
    println!("{label}");
    print!("{}", render_preview(table, INPUT_PREVIEW_ROWS));
    println!();
}
