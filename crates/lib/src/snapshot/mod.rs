//! Per-variant snapshot files.
//!
//! A snapshot is the JSON form of one [`VarsDict`], produced by whatever
//! tool enumerates a variant's sources and flags. Each load returns a fresh,
//! independently owned dictionary.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::makefile::{WriteError, publish};
use crate::vars::{VarsDict, VarsError};

/// Errors that can occur while loading or saving a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
  #[error("failed to read snapshot {}: {source}", path.display())]
  Read { path: PathBuf, source: io::Error },

  #[error("failed to parse snapshot {}: {source}", path.display())]
  Parse { path: PathBuf, source: serde_json::Error },

  #[error("invalid snapshot {}: {source}", path.display())]
  Category { path: PathBuf, source: VarsError },

  #[error("failed to serialize snapshot {}: {source}", path.display())]
  Serialize { path: PathBuf, source: serde_json::Error },

  #[error(transparent)]
  Write(#[from] WriteError),
}

/// Load a snapshot from `path`.
///
/// # Errors
///
/// Fails if the file cannot be read, is not a JSON object of string lists, or
/// names a category outside the known set.
pub fn load_snapshot(path: &Path) -> Result<VarsDict, SnapshotError> {
  let content = fs::read_to_string(path).map_err(|e| SnapshotError::Read {
    path: path.to_path_buf(),
    source: e,
  })?;

  let raw: BTreeMap<String, Vec<String>> = serde_json::from_str(&content).map_err(|e| SnapshotError::Parse {
    path: path.to_path_buf(),
    source: e,
  })?;

  let dict = VarsDict::try_from(raw).map_err(|e| SnapshotError::Category {
    path: path.to_path_buf(),
    source: e,
  })?;

  debug!(path = ?path, tokens = dict.token_count(), "loaded snapshot");
  Ok(dict)
}

/// Write `dict` to `path` as pretty-printed JSON.
///
/// The file is replaced atomically, so readers never see a partial snapshot.
pub fn save_snapshot(path: &Path, dict: &VarsDict) -> Result<(), SnapshotError> {
  let content = serde_json::to_string_pretty(dict).map_err(|e| SnapshotError::Serialize {
    path: path.to_path_buf(),
    source: e,
  })?;
  publish(path, content.as_bytes())?;

  debug!(path = ?path, tokens = dict.token_count(), "saved snapshot");
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::vars::Category;
  use tempfile::TempDir;

  #[test]
  fn save_then_load() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("arm.json");

    let dict: VarsDict = [
      (Category::SrcFiles, "src/opts/SkBlitRow_opts_arm.cpp"),
      (Category::Defines, "SK_ARM_HAS_OPTIONAL_NEON"),
      (Category::KnownTargets, "opts"),
    ]
    .into_iter()
    .collect();

    save_snapshot(&path, &dict).unwrap();
    assert_eq!(load_snapshot(&path).unwrap(), dict);
  }

  #[test]
  fn missing_file() {
    let temp = TempDir::new().unwrap();
    let err = load_snapshot(&temp.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, SnapshotError::Read { .. }));
  }

  #[test]
  fn malformed_json() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("bad.json");
    fs::write(&path, r#"{ "LOCAL_SRC_FILES": "not-a-list" }"#).unwrap();

    let err = load_snapshot(&path).unwrap_err();
    assert!(matches!(err, SnapshotError::Parse { .. }));
  }

  #[test]
  fn unknown_category() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("bad.json");
    fs::write(&path, r#"{ "LOCAL_LDLIBS": ["-llog"] }"#).unwrap();

    let err = load_snapshot(&path).unwrap_err();
    match err {
      SnapshotError::Category { source, .. } => {
        assert_eq!(source, VarsError::UnknownCategory("LOCAL_LDLIBS".to_string()));
      }
      other => panic!("unexpected error: {other}"),
    }
  }

  #[test]
  fn save_replaces_existing_snapshot() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("x86.json");
    fs::write(&path, "stale").unwrap();

    let dict: VarsDict = [(Category::SrcFiles, "sse2.cpp")].into_iter().collect();
    save_snapshot(&path, &dict).unwrap();

    assert_eq!(load_snapshot(&path).unwrap(), dict);
    let leftovers: Vec<_> = fs::read_dir(temp.path()).unwrap().collect();
    assert_eq!(leftovers.len(), 1);
  }

  #[test]
  fn save_into_missing_directory_fails_cleanly() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("missing");

    let err = save_snapshot(&missing.join("arm.json"), &VarsDict::new()).unwrap_err();
    assert!(matches!(err, SnapshotError::Write(WriteError::CreateTemp { .. })));
    assert!(!missing.exists());
  }
}
