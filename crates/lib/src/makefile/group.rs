//! Rendering of single variable assignments.

use std::collections::BTreeSet;

use crate::vars::{Category, VarsDict};

/// Append one make assignment for `name` to `out`.
///
/// Nothing is written when `items` is empty, not even an empty assignment.
pub fn write_group<S: AsRef<str>>(out: &mut String, name: &str, items: &[S], append: bool) {
  if items.is_empty() {
    return;
  }

  let op = if append { "+=" } else { ":=" };
  out.push_str(&format!("{} {} \\\n", name, op));

  let last = items.len() - 1;
  for (i, item) in items.iter().enumerate() {
    out.push('\t');
    out.push_str(item.as_ref());
    if i == last {
      out.push_str("\n\n");
    } else {
      out.push_str(" \\\n");
    }
  }
}

/// Render one category as a make assignment.
///
/// Returns `None` for empty sets and for categories that are never rendered.
/// Tokens come out sorted, so the result does not depend on how the set was
/// built.
pub fn render_category(category: Category, tokens: &BTreeSet<String>, append: bool) -> Option<String> {
  if !category.is_rendered() || tokens.is_empty() {
    return None;
  }

  let prefix = category.token_prefix();
  let items: Vec<String> = tokens.iter().map(|t| format!("{}{}", prefix, t)).collect();

  let mut out = String::new();
  write_group(&mut out, category.make_variable(), &items, append || category.accumulates());
  Some(out)
}

/// Render every category of `dict` in canonical order.
pub fn write_local_vars(out: &mut String, dict: &VarsDict, append: bool) {
  for (category, tokens) in dict.iter() {
    if let Some(group) = render_category(category, tokens, append) {
      out.push_str(&group);
    }
  }
}
