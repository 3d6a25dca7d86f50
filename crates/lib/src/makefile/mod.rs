//! Android.mk generation.
//!
//! A makefile is assembled from one unconditional block holding the
//! definitions common to every variant, followed by one conditional block per
//! [`VariantBlock`]. The common block uses plain assignments; variant blocks
//! only ever append to what the common block defined.
//!
//! The document is rendered fully in memory and then published atomically:
//! written to a temporary file next to the destination and renamed into
//! place. A failed write never leaves a partial makefile behind.

pub mod group;
mod templates;

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, info};

use crate::consts::{MAKEFILE_NAME, TARGET_ARCH_VAR};
use crate::vars::VarsDict;

pub use group::{render_category, write_group, write_local_vars};
pub use templates::{DEFAULT_BUILD_RULE, MakefileTemplate, autogen_banner};

/// Errors that can occur while atomically writing an output file.
#[derive(Debug, Error)]
pub enum WriteError {
  #[error("failed to create temporary file in {}: {source}", dir.display())]
  CreateTemp { dir: PathBuf, source: io::Error },

  #[error("failed to write {}: {source}", path.display())]
  Write { path: PathBuf, source: io::Error },

  #[error("failed to move file into place at {}: {source}", path.display())]
  Persist { path: PathBuf, source: io::Error },
}

/// The definitions specific to one variant, plus how to guard them.
///
/// Blocks are written in the order they are supplied. Two blocks may share a
/// name, e.g. a plain architecture and the same architecture with an extra
/// feature flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantBlock {
  vars: VarsDict,
  name: String,
  condition: Option<String>,
}

impl VariantBlock {
  /// A block guarded by `TARGET_ARCH == name`.
  pub fn new(vars: VarsDict, name: impl Into<String>) -> Self {
    Self {
      vars,
      name: name.into(),
      condition: None,
    }
  }

  /// Additionally require the make variable `condition` to be `true`.
  pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
    self.condition = Some(condition.into());
    self
  }

  pub fn vars(&self) -> &VarsDict {
    &self.vars
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn condition(&self) -> Option<&str> {
    self.condition.as_deref()
  }

  /// The `ifeq` line opening this block.
  pub fn guard(&self) -> String {
    match &self.condition {
      Some(condition) => format!(
        "ifeq ($({})-$({}),{}-true)",
        TARGET_ARCH_VAR, condition, self.name
      ),
      None => format!("ifeq ($({}),{})", TARGET_ARCH_VAR, self.name),
    }
  }
}

/// Path of the makefile inside `target_dir`, or in the working directory.
pub fn makefile_path(target_dir: Option<&Path>) -> PathBuf {
  match target_dir {
    Some(dir) => dir.join(MAKEFILE_NAME),
    None => PathBuf::from(MAKEFILE_NAME),
  }
}

/// Render the complete makefile text.
pub fn render_android_mk(common: &VarsDict, blocks: &[VariantBlock], template: &MakefileTemplate) -> String {
  let mut out = String::new();
  template.render_header(&mut out);

  write_local_vars(&mut out, common, false);

  for block in blocks {
    out.push_str(&block.guard());
    out.push('\n');
    write_local_vars(&mut out, &block.vars, true);
    out.push_str("endif\n\n");
  }

  template.render_footer(&mut out);
  out
}

/// Render and atomically write `Android.mk` into `target_dir`.
///
/// Returns the path that was written.
///
/// # Errors
///
/// Returns a [`WriteError`] if the directory is not writable or the file
/// cannot be moved into place. The destination is left untouched in that
/// case.
pub fn write_android_mk(
  target_dir: Option<&Path>,
  common: &VarsDict,
  blocks: &[VariantBlock],
  template: &MakefileTemplate,
) -> Result<PathBuf, WriteError> {
  let path = makefile_path(target_dir);
  let content = render_android_mk(common, blocks, template);
  debug!(path = ?path, bytes = content.len(), "rendered makefile");

  publish(&path, content.as_bytes())?;

  info!(path = ?path, blocks = blocks.len(), "wrote makefile");
  Ok(path)
}

/// Write `content` to a temporary sibling of `path`, then rename it over `path`.
pub(crate) fn publish(path: &Path, content: &[u8]) -> Result<(), WriteError> {
  let dir = match path.parent() {
    Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
    _ => PathBuf::from("."),
  };

  let mut temp = NamedTempFile::new_in(&dir).map_err(|e| WriteError::CreateTemp {
    dir: dir.clone(),
    source: e,
  })?;

  let write_err = |e: io::Error| WriteError::Write {
    path: path.to_path_buf(),
    source: e,
  };
  temp.write_all(content).map_err(write_err)?;
  temp.flush().map_err(write_err)?;
  set_readable(temp.as_file()).map_err(write_err)?;

  temp.persist(path).map_err(|e| WriteError::Persist {
    path: path.to_path_buf(),
    source: e.error,
  })?;

  Ok(())
}

// Temporary files are created owner-only; outputs should be world-readable.
#[cfg(unix)]
fn set_readable(file: &fs::File) -> io::Result<()> {
  use std::os::unix::fs::PermissionsExt;
  file.set_permissions(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn set_readable(_file: &fs::File) -> io::Result<()> {
  Ok(())
}
