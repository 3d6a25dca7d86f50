//! Merge plans.
//!
//! A plan lists the snapshots of a variant family and how their blocks are
//! guarded. Factoring a plan runs the full policy:
//!
//! 1. intersect the baseline and every variant snapshot into `common`
//! 2. trim each snapshot by `common` to get its residual
//! 3. refine every `specializes` pair: the base block keeps only what all of
//!    its specializations share, and each specialization block keeps what it
//!    adds on top of its base
//! 4. resolve `same_as` variants to the final residual they name
//!
//! Step 3 works on residuals, so it must run after step 2; otherwise entries
//! shared with unrelated variants would be pulled into the base block.
//!
//! A specialization is built with every guard on its `specializes` chain
//! active, so its effective build is `common`, the blocks of its ancestors
//! and its own block. That union always equals its snapshot. A base entry
//! that some specialization lacks cannot stay in the base block; it is
//! dropped from the base's build and logged as a warning.

mod types;

use std::collections::{HashMap, HashSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::arch::Arch;
use crate::factor::{FactorError, factor_common, refine, trim};
use crate::makefile::{MakefileTemplate, VariantBlock, WriteError, write_android_mk};
use crate::snapshot::{SnapshotError, load_snapshot};
use crate::vars::VarsDict;

pub use types::{PlanFile, VariantSpec};

/// Errors that can occur while loading or running a plan.
#[derive(Debug, Error)]
pub enum PlanError {
  #[error("failed to read plan {}: {source}", path.display())]
  Read { path: PathBuf, source: io::Error },

  #[error("failed to parse plan {}: {source}", path.display())]
  Parse { path: PathBuf, source: serde_json::Error },

  #[error(transparent)]
  Snapshot(#[from] SnapshotError),

  #[error("duplicate variant id '{id}'")]
  DuplicateId { id: String },

  #[error("variant '{id}' refers to unknown variant '{target}'")]
  UnknownReference { id: String, target: String },

  #[error("invalid variant '{id}': {reason}")]
  InvalidVariant { id: String, reason: String },

  #[error(transparent)]
  Factor(#[from] FactorError),

  #[error(transparent)]
  Write(#[from] WriteError),
}

/// Where a variant's definitions come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariantSource {
  Snapshot(VarsDict),
  SameAs(String),
}

/// A validated plan entry with its snapshot loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedVariant {
  pub id: String,
  pub name: String,
  pub condition: Option<String>,
  pub source: VariantSource,
  pub specializes: Option<String>,
}

/// A validated plan with every snapshot loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedPlan {
  /// Output directory resolved against the plan location.
  pub output_dir: Option<PathBuf>,
  pub baseline: Option<VarsDict>,
  pub variants: Vec<LoadedVariant>,
  pub template: MakefileTemplate,
}

/// Result of factoring a plan: the common definitions plus one block per
/// variant, in plan order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Factored {
  pub common: VarsDict,
  pub blocks: Vec<VariantBlock>,
}

/// Read, validate and load the plan at `path`.
///
/// Relative paths inside the plan resolve against the plan's directory.
pub fn load_plan(path: &Path) -> Result<LoadedPlan, PlanError> {
  let content = fs::read_to_string(path).map_err(|e| PlanError::Read {
    path: path.to_path_buf(),
    source: e,
  })?;
  let file: PlanFile = serde_json::from_str(&content).map_err(|e| PlanError::Parse {
    path: path.to_path_buf(),
    source: e,
  })?;

  let root = match path.parent() {
    Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
    _ => PathBuf::from("."),
  };

  info!(plan = ?path, variants = file.variants.len(), "loading merge plan");
  resolve_plan(file, &root)
}

/// Validate `file` and load its snapshots relative to `root`.
pub fn resolve_plan(file: PlanFile, root: &Path) -> Result<LoadedPlan, PlanError> {
  validate(&file.variants)?;

  let baseline = file
    .baseline
    .as_ref()
    .map(|p| load_snapshot(&root.join(p)))
    .transpose()?;

  let mut variants = Vec::with_capacity(file.variants.len());
  for spec in &file.variants {
    if Arch::parse(&spec.name).is_none() {
      warn!(variant = spec.id(), name = %spec.name, "variant name is not a known architecture");
    }

    let source = match (&spec.snapshot, &spec.same_as) {
      (Some(snapshot), None) => VariantSource::Snapshot(load_snapshot(&root.join(snapshot))?),
      (None, Some(target)) => VariantSource::SameAs(target.clone()),
      _ => {
        return Err(PlanError::InvalidVariant {
          id: spec.id().to_string(),
          reason: "one of 'snapshot' or 'same_as' is required".to_string(),
        });
      }
    };

    variants.push(LoadedVariant {
      id: spec.id().to_string(),
      name: spec.name.clone(),
      condition: spec.condition.clone(),
      source,
      specializes: spec.specializes.clone(),
    });
  }

  Ok(LoadedPlan {
    output_dir: file.output_dir.map(|dir| root.join(dir)),
    baseline,
    variants,
    template: file.template,
  })
}

fn validate(specs: &[VariantSpec]) -> Result<(), PlanError> {
  let invalid = |spec: &VariantSpec, reason: &str| PlanError::InvalidVariant {
    id: spec.id().to_string(),
    reason: reason.to_string(),
  };

  let mut by_id: HashMap<&str, &VariantSpec> = HashMap::new();
  for spec in specs {
    if spec.name.is_empty() {
      return Err(invalid(spec, "name must not be empty"));
    }
    if spec.id().is_empty() {
      return Err(invalid(spec, "id must not be empty"));
    }
    if spec.condition.as_deref() == Some("") {
      return Err(invalid(spec, "condition must not be empty"));
    }
    match (&spec.snapshot, &spec.same_as) {
      (Some(_), Some(_)) => return Err(invalid(spec, "set either 'snapshot' or 'same_as', not both")),
      (None, None) => return Err(invalid(spec, "one of 'snapshot' or 'same_as' is required")),
      _ => {}
    }
    if spec.same_as.is_some() && spec.specializes.is_some() {
      return Err(invalid(spec, "a 'same_as' variant cannot specialize another"));
    }
    if by_id.insert(spec.id(), spec).is_some() {
      return Err(PlanError::DuplicateId {
        id: spec.id().to_string(),
      });
    }
  }

  for spec in specs {
    let references = [
      (spec.same_as.as_deref(), "'same_as'"),
      (spec.specializes.as_deref(), "'specializes'"),
    ];
    for (target, field) in references {
      let Some(target) = target else {
        continue;
      };
      if target == spec.id() {
        return Err(invalid(spec, &format!("{} refers to itself", field)));
      }
      let Some(referenced) = by_id.get(target) else {
        return Err(PlanError::UnknownReference {
          id: spec.id().to_string(),
          target: target.to_string(),
        });
      };
      if referenced.snapshot.is_none() {
        return Err(invalid(
          spec,
          &format!("{} must name a variant with its own snapshot", field),
        ));
      }
    }
  }

  for spec in specs {
    let mut seen = HashSet::from([spec.id()]);
    let mut next = spec.specializes.as_deref();
    while let Some(base) = next {
      if !seen.insert(base) {
        return Err(invalid(spec, "'specializes' forms a cycle"));
      }
      next = by_id.get(base).and_then(|b| b.specializes.as_deref());
    }
  }

  Ok(())
}

/// Factor a loaded plan into common definitions and per-variant blocks.
///
/// # Errors
///
/// Returns [`FactorError::EmptyInput`] if the plan has no baseline and no
/// variant snapshots.
pub fn factor_plan(plan: &LoadedPlan) -> Result<Factored, PlanError> {
  let mut inputs: Vec<VarsDict> = Vec::new();
  if let Some(baseline) = &plan.baseline {
    inputs.push(baseline.clone());
  }

  // Position of each snapshot variant's residual in `residuals`.
  let mut slots: HashMap<&str, usize> = HashMap::new();
  let offset = inputs.len();
  for variant in &plan.variants {
    if let VariantSource::Snapshot(dict) = &variant.source {
      slots.insert(variant.id.as_str(), inputs.len() - offset);
      inputs.push(dict.clone());
    }
  }

  let (common, mut residuals) = factor_common(&inputs)?;
  let residuals = residuals.split_off(offset);

  let mut ids = vec![""; residuals.len()];
  let mut parents: Vec<Option<usize>> = vec![None; residuals.len()];
  for variant in &plan.variants {
    if let VariantSource::Snapshot(_) = &variant.source {
      let index = slot(&slots, &variant.id)?;
      ids[index] = variant.id.as_str();
      if let Some(base_id) = &variant.specializes {
        parents[index] = Some(slot(&slots, base_id)?);
      }
    }
  }

  // Each residual narrowed to what every specialization below it shares.
  let mut kept = residuals.clone();
  for (index, residual) in residuals.iter().enumerate() {
    let mut ancestor = parents[index];
    let mut depth = 0;
    while let Some(base) = ancestor {
      depth += 1;
      if depth > residuals.len() {
        return Err(PlanError::InvalidVariant {
          id: ids[index].to_string(),
          reason: "'specializes' forms a cycle".to_string(),
        });
      }
      let (shared, _) = refine(&kept[base], residual);
      kept[base] = shared;
      ancestor = parents[base];
    }
  }

  let mut finals = Vec::with_capacity(kept.len());
  for (index, narrowed) in kept.iter().enumerate() {
    let dropped = trim(&residuals[index], narrowed);
    if dropped.token_count() > 0 {
      warn!(
        variant = ids[index],
        dropped = dropped.token_count(),
        "base entries missing from a specialization are left out of its build"
      );
    }

    let block = match parents[index] {
      Some(base) => {
        let (_, unique) = refine(&kept[base], narrowed);
        debug!(
          base = ids[base],
          specialization = ids[index],
          unique = unique.token_count(),
          "refined specialization"
        );
        unique
      }
      None => narrowed.clone(),
    };
    finals.push(block);
  }

  let mut blocks = Vec::with_capacity(plan.variants.len());
  for variant in &plan.variants {
    let vars = match &variant.source {
      VariantSource::Snapshot(_) => finals[slot(&slots, &variant.id)?].clone(),
      VariantSource::SameAs(target) => finals[slot(&slots, target)?].clone(),
    };
    let block = VariantBlock::new(vars, &variant.name);
    blocks.push(match &variant.condition {
      Some(condition) => block.with_condition(condition),
      None => block,
    });
  }

  info!(
    common_tokens = common.token_count(),
    blocks = blocks.len(),
    "factored merge plan"
  );
  Ok(Factored { common, blocks })
}

fn slot(slots: &HashMap<&str, usize>, id: &str) -> Result<usize, PlanError> {
  slots.get(id).copied().ok_or_else(|| PlanError::UnknownReference {
    id: id.to_string(),
    target: id.to_string(),
  })
}

/// Load the plan at `path`, factor it and write the makefile.
///
/// `output_dir` overrides the plan's own output directory. Returns the path
/// of the written makefile.
pub fn run(path: &Path, output_dir: Option<&Path>) -> Result<PathBuf, PlanError> {
  let plan = load_plan(path)?;
  let factored = factor_plan(&plan)?;
  let target = output_dir.or(plan.output_dir.as_deref());
  Ok(write_android_mk(
    target,
    &factored.common,
    &factored.blocks,
    &plan.template,
  )?)
}
