//! Inspect command implementation.
//!
//! Shows how a plan factors into common definitions and conditional blocks,
//! without writing a makefile.

use std::path::Path;

use anyhow::{Context, Result};
use owo_colors::{OwoColorize, Stream};

use mkmerge_lib::VarsDict;
use mkmerge_lib::plan::{Factored, factor_plan, load_plan};

use crate::output::{print_info, print_json, print_stat, symbols};

pub fn cmd_inspect(plan_path: &Path, verbose: bool, json: bool) -> Result<()> {
  let plan = load_plan(plan_path).with_context(|| format!("Failed to load plan: {}", plan_path.display()))?;
  let factored = factor_plan(&plan).context("Failed to factor snapshots")?;

  if json {
    print_json(&json_summary(&factored))?;
  } else {
    print_human(plan_path, &factored, verbose);
  }

  Ok(())
}

fn json_summary(factored: &Factored) -> serde_json::Value {
  let blocks: Vec<_> = factored
    .blocks
    .iter()
    .map(|block| {
      serde_json::json!({
        "name": block.name(),
        "condition": block.condition(),
        "guard": block.guard(),
        "definitions": block.vars(),
      })
    })
    .collect();
  serde_json::json!({ "common": factored.common, "blocks": blocks })
}

fn print_human(plan_path: &Path, factored: &Factored, verbose: bool) {
  print_info(&format!("Plan: {}", plan_path.display()));
  println!();

  println!("Common:");
  print_counts(&factored.common, verbose);

  for block in &factored.blocks {
    println!();
    println!(
      "{} {}",
      symbols::ARROW.if_supports_color(Stream::Stdout, |s| s.cyan()),
      block.guard()
    );
    print_counts(block.vars(), verbose);
  }
}

fn print_counts(vars: &VarsDict, verbose: bool) {
  if vars.token_count() == 0 {
    println!("  (no definitions)");
    return;
  }

  for (category, tokens) in vars.iter() {
    if !category.is_rendered() || tokens.is_empty() {
      continue;
    }
    print_stat(category.as_str(), &tokens.len().to_string());
    if verbose {
      for token in tokens {
        println!("      {}", token);
      }
    }
  }
}
