//! Fixed boilerplate for generated makefiles.

use serde::{Deserialize, Serialize};

use crate::consts::APP_NAME;

/// Banner written at the top of every generated makefile.
pub fn autogen_banner() -> String {
  format!(
    "\
###############################################################################
#
# THIS FILE IS AUTOGENERATED BY {APP_NAME}. DO NOT EDIT.
#
# It is produced by merging per-architecture build snapshots. Definitions
# shared by every architecture come first; each conditional block below only
# appends what a single architecture adds.
#
###############################################################################
"
  )
}

/// Build rule included at the end of the makefile unless overridden.
pub const DEFAULT_BUILD_RULE: &str = "BUILD_SHARED_LIBRARY";

/// Boilerplate surrounding the generated variable blocks.
///
/// Loaded from the `template` section of a plan file; every field has a
/// default so the section may be omitted entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MakefileTemplate {
  /// Comment block written first. Lines should start with `#`.
  pub banner: String,
  /// Value for `LOCAL_MODULE`, if the makefile should set one.
  pub module_name: Option<String>,
  /// Raw lines written after `include $(CLEAR_VARS)`.
  pub preamble: Vec<String>,
  /// Make variable naming the build rule to include at the end.
  pub build_rule: String,
  /// Raw lines written after the build rule.
  pub trailer: Vec<String>,
}

impl Default for MakefileTemplate {
  fn default() -> Self {
    Self {
      banner: autogen_banner(),
      module_name: None,
      preamble: Vec::new(),
      build_rule: DEFAULT_BUILD_RULE.to_string(),
      trailer: Vec::new(),
    }
  }
}

impl MakefileTemplate {
  pub(crate) fn render_header(&self, out: &mut String) {
    if !self.banner.is_empty() {
      out.push_str(&self.banner);
      if !self.banner.ends_with('\n') {
        out.push('\n');
      }
      out.push('\n');
    }
    out.push_str("LOCAL_PATH := $(call my-dir)\n");
    out.push_str("include $(CLEAR_VARS)\n");
    if let Some(module) = &self.module_name {
      out.push_str(&format!("LOCAL_MODULE := {}\n", module));
    }
    for line in &self.preamble {
      out.push_str(line);
      out.push('\n');
    }
    out.push('\n');
  }

  pub(crate) fn render_footer(&self, out: &mut String) {
    out.push_str(&format!("include $({})\n", self.build_rule));
    for line in &self.trailer {
      out.push_str(line);
      out.push('\n');
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn default_header_and_footer() {
    let template = MakefileTemplate {
      banner: "# generated".to_string(),
      ..Default::default()
    };

    let mut out = String::new();
    template.render_header(&mut out);
    template.render_footer(&mut out);

    assert_eq!(
      out,
      "# generated\n\nLOCAL_PATH := $(call my-dir)\ninclude $(CLEAR_VARS)\n\ninclude $(BUILD_SHARED_LIBRARY)\n"
    );
  }

  #[test]
  fn module_preamble_and_trailer() {
    let template = MakefileTemplate {
      banner: String::new(),
      module_name: Some("libskia".to_string()),
      preamble: vec!["LOCAL_ARM_MODE := thumb".to_string()],
      build_rule: "BUILD_STATIC_LIBRARY".to_string(),
      trailer: vec!["include $(call all-makefiles-under,$(LOCAL_PATH))".to_string()],
    };

    let mut header = String::new();
    template.render_header(&mut header);
    assert_eq!(
      header,
      "LOCAL_PATH := $(call my-dir)\ninclude $(CLEAR_VARS)\nLOCAL_MODULE := libskia\nLOCAL_ARM_MODE := thumb\n\n"
    );

    let mut footer = String::new();
    template.render_footer(&mut footer);
    assert_eq!(
      footer,
      "include $(BUILD_STATIC_LIBRARY)\ninclude $(call all-makefiles-under,$(LOCAL_PATH))\n"
    );
  }

  #[test]
  fn partial_template_uses_defaults() {
    let template: MakefileTemplate = serde_json::from_str(r#"{ "module_name": "libfoo" }"#).unwrap();
    assert_eq!(template.module_name.as_deref(), Some("libfoo"));
    assert_eq!(template.build_rule, DEFAULT_BUILD_RULE);
    assert_eq!(template.banner, autogen_banner());
    assert!(template.banner.contains("AUTOGENERATED BY mkmerge. DO NOT EDIT."));
  }
}
