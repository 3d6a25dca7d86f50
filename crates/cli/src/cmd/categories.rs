use anyhow::Result;

use mkmerge_lib::VarsDict;

use crate::output::print_json;

pub fn cmd_categories(json: bool) -> Result<()> {
  if json {
    let list: Vec<_> = VarsDict::categories()
      .map(|c| {
        serde_json::json!({
          "name": c.as_str(),
          "make_variable": c.make_variable(),
          "rendered": c.is_rendered(),
          "always_append": c.accumulates(),
        })
      })
      .collect();
    return print_json(&list);
  }

  for category in VarsDict::categories() {
    let mut notes = Vec::new();
    if category.make_variable() != category.as_str() {
      notes.push(format!("written as {}{}", category.make_variable(), with_prefix(category.token_prefix())));
    }
    if category.accumulates() {
      notes.push("always appended".to_string());
    }
    if !category.is_rendered() {
      notes.push("bookkeeping only, never written".to_string());
    }

    if notes.is_empty() {
      println!("{}", category);
    } else {
      println!("{} ({})", category, notes.join(", "));
    }
  }
  Ok(())
}

fn with_prefix(prefix: &str) -> String {
  if prefix.is_empty() {
    String::new()
  } else {
    format!(" with prefix {}", prefix)
  }
}
