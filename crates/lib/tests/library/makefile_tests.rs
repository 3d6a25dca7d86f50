use std::fs;

use mkmerge_lib::makefile::{render_android_mk, write_local_vars};
use mkmerge_lib::{Category, MakefileTemplate, VarsDict, VariantBlock, factor_common, write_android_mk};
use tempfile::TempDir;

use super::common::dummy_dict;

const EXPECTED_ANDROID_MK: &str = include_str!("../fixtures/Android.mk");

fn dummy_template() -> MakefileTemplate {
  MakefileTemplate {
    module_name: Some("libdummy".to_string()),
    ..Default::default()
  }
}

fn dummy_blocks() -> Vec<VariantBlock> {
  vec![
    VariantBlock::new(dummy_dict(Some("foo")), "foo").with_condition("COND"),
    VariantBlock::new(dummy_dict(Some("bar")), "bar"),
  ]
}

#[test]
fn android_mk_matches_expectation() {
  let temp = TempDir::new().unwrap();
  let path = write_android_mk(Some(temp.path()), &dummy_dict(None), &dummy_blocks(), &dummy_template()).unwrap();

  let actual = fs::read_to_string(path).unwrap();
  for (line, (actual, expected)) in actual.lines().zip(EXPECTED_ANDROID_MK.lines()).enumerate() {
    assert_eq!(actual, expected, "line {} differs; update tests/fixtures/Android.mk if intended", line + 1);
  }
  assert_eq!(actual, EXPECTED_ANDROID_MK);
}

#[test]
fn write_local_vars_never_writes_known_targets() {
  let vars = dummy_dict(None);
  assert_eq!(vars[Category::KnownTargets].len(), 1);

  for append in [true, false] {
    let mut out = String::new();
    write_local_vars(&mut out, &vars, append);
    assert!(!out.contains("KNOWN_TARGETS"));
    assert!(!out.contains("known_targets"));
  }
}

#[test]
fn write_local_vars_modes() {
  let vars = dummy_dict(None);

  let mut plain = String::new();
  write_local_vars(&mut plain, &vars, false);
  assert!(plain.contains("LOCAL_SRC_FILES := \\\n\tlocal_src_files\n\n"));
  assert!(plain.contains("LOCAL_CFLAGS += \\\n\t-Ddefines\n\n"));

  let mut append = String::new();
  write_local_vars(&mut append, &vars, true);
  assert!(append.contains("LOCAL_SRC_FILES += \\\n\tlocal_src_files\n\n"));
  assert!(!append.contains(":="));
}

#[test]
fn factored_family_end_to_end() {
  let family = [dummy_dict(None), dummy_dict(None), dummy_dict(None)]
    .into_iter()
    .zip([None, Some("arm"), Some("x86")])
    .map(|(mut d, extra)| {
      if let Some(extra) = extra {
        d.add(Category::SrcFiles, format!("{}.cpp", extra));
      }
      d
    })
    .collect::<Vec<VarsDict>>();

  let (common, residuals) = factor_common(&family).unwrap();
  assert_eq!(common, dummy_dict(None));

  let blocks: Vec<_> = residuals
    .into_iter()
    .skip(1)
    .zip(["arm", "x86"])
    .map(|(vars, name)| VariantBlock::new(vars, name))
    .collect();

  let text = render_android_mk(&common, &blocks, &MakefileTemplate::default());
  assert!(text.contains("ifeq ($(TARGET_ARCH),arm)\nLOCAL_SRC_FILES += \\\n\tarm.cpp\n\nendif\n\n"));
  assert!(text.contains("ifeq ($(TARGET_ARCH),x86)\nLOCAL_SRC_FILES += \\\n\tx86.cpp\n\nendif\n\n"));
  assert!(text.ends_with("include $(BUILD_SHARED_LIBRARY)\n"));
}
