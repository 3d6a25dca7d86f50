use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::makefile::MakefileTemplate;

/// On-disk form of a merge plan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlanFile {
  /// Directory to write `Android.mk` into, relative to the plan file.
  #[serde(default)]
  pub output_dir: Option<PathBuf>,

  /// Snapshot of the build with no specific architecture.
  ///
  /// Takes part in finding the common definitions but emits no block.
  #[serde(default)]
  pub baseline: Option<PathBuf>,

  /// Variants in the order their blocks are written.
  #[serde(default)]
  pub variants: Vec<VariantSpec>,

  #[serde(default)]
  pub template: MakefileTemplate,
}

/// One entry of [`PlanFile::variants`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VariantSpec {
  /// Unique label used for references; defaults to `name`.
  #[serde(default)]
  pub id: Option<String>,

  /// Architecture the block is guarded by.
  pub name: String,

  /// Make variable that must additionally be `true`.
  #[serde(default)]
  pub condition: Option<String>,

  /// Snapshot holding this variant's definitions.
  #[serde(default)]
  pub snapshot: Option<PathBuf>,

  /// Reuse the definitions of another variant.
  #[serde(default)]
  pub same_as: Option<String>,

  /// Variant this one is a specialization of.
  #[serde(default)]
  pub specializes: Option<String>,
}

impl VariantSpec {
  pub fn id(&self) -> &str {
    self.id.as_deref().unwrap_or(&self.name)
  }
}
