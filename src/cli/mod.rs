//! Command-line interface for opps-merge
//!
//! The top-level flags run a merge and write the result; `preview` runs the
//! same merge and prints a summary instead of writing.

use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use std::ffi::OsString;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod inputs;
mod merge;
mod preview;

/// Merge Salesforce opportunities with Tubular channel metrics
#[derive(Parser)]
#[command(name = "opps-merge")]
#[command(author, version, about, long_about = None)]
#[command(subcommand_negates_reqs = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    merge: merge::MergeArgs,

    /// Path to config file (opps-merge.toml or opps-merge.yml)
    #[arg(short = 'c', long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge and print a summary plus a preview table without writing files
    Preview(preview::PreviewArgs),

    /// Print a shell completion script
    Completions(CompletionsArgs),
}

#[derive(Args)]
struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    shell: clap_complete::Shell,
}

pub fn run() -> Result<()> {
    run_from(std::env::args_os())
}

pub fn run_from<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();

    // Hosting processes may re-invoke us with nothing to do; show usage and succeed.
    if args.iter().skip(1).all(|a| a.is_empty()) {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    }

    let cli = Cli::parse_from(args);

    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    let config_path = cli.config.as_deref();
    match cli.command {
        Some(Commands::Preview(args)) => preview::run(args, config_path),
        Some(Commands::Completions(args)) => {
            clap_complete::generate(
                args.shell,
                &mut Cli::command(),
                "opps-merge",
                &mut std::io::stdout(),
            );
            Ok(())
        }
        None => merge::run(cli.merge, config_path),
    }
}
