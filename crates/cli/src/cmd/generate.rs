//! Generate command implementation.
//!
//! Loads a merge plan, factors its snapshots and writes Android.mk.

use std::path::Path;

use anyhow::{Context, Result};
use owo_colors::{OwoColorize, Stream};
use tracing::debug;

use mkmerge_lib::plan::{factor_plan, load_plan};
use mkmerge_lib::write_android_mk;

use crate::output::{print_stat, print_success, print_warning, symbols};

pub fn cmd_generate(plan_path: &Path, out_dir: Option<&Path>, verbose: bool) -> Result<()> {
  let plan = load_plan(plan_path).with_context(|| format!("Failed to load plan: {}", plan_path.display()))?;
  let factored = factor_plan(&plan).context("Failed to factor snapshots")?;
  debug!(
    common = factored.common.token_count(),
    blocks = factored.blocks.len(),
    "factored plan"
  );

  let target = out_dir.or(plan.output_dir.as_deref());
  let written = write_android_mk(target, &factored.common, &factored.blocks, &plan.template)
    .context("Failed to write makefile")?;

  print_success(&format!("Wrote {}", written.display()));
  print_stat("Common definitions", &factored.common.token_count().to_string());
  print_stat("Conditional blocks", &factored.blocks.len().to_string());

  for block in &factored.blocks {
    let count = block.vars().token_count();
    if count == 0 {
      print_warning(&format!("{} adds no definitions", block.guard()));
    } else if verbose {
      println!(
        "  {} {} ({} definitions)",
        symbols::PLUS.if_supports_color(Stream::Stdout, |s| s.green()),
        block.guard(),
        count
      );
    }
  }

  Ok(())
}
