use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mkmerge_lib::consts::DEFAULT_PLAN_FILENAME;

mod cmd;
mod output;

/// mkmerge - merge per-architecture build snapshots into one Android.mk
#[derive(Parser)]
#[command(name = "mkmerge")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Factor the plan's snapshots and write Android.mk
  Generate {
    /// Path to the merge plan
    #[arg(default_value = DEFAULT_PLAN_FILENAME)]
    plan: PathBuf,

    /// Directory to write Android.mk into (overrides the plan's output_dir)
    #[arg(short, long)]
    out_dir: Option<PathBuf>,
  },

  /// Show how the plan factors without writing anything
  Inspect {
    /// Path to the merge plan
    #[arg(default_value = DEFAULT_PLAN_FILENAME)]
    plan: PathBuf,

    /// Output as JSON
    #[arg(long)]
    json: bool,
  },

  /// List the variable categories a snapshot may contain
  Categories {
    /// Output as JSON
    #[arg(long)]
    json: bool,
  },
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  let filter = if cli.verbose {
    EnvFilter::new("debug")
  } else {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
  };
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  match cli.command {
    Commands::Generate { plan, out_dir } => cmd::cmd_generate(&plan, out_dir.as_deref(), cli.verbose),
    Commands::Inspect { plan, json } => cmd::cmd_inspect(&plan, cli.verbose, json),
    Commands::Categories { json } => cmd::cmd_categories(json),
  }
}
