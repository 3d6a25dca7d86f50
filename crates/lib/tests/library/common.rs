//! Shared helpers and proptest strategies.

use mkmerge_lib::{Category, VarsDict};
use proptest::prelude::*;

/// Any category, sentinel included.
pub fn category() -> impl Strategy<Value = Category> {
  (0..Category::COUNT).prop_map(|i| Category::ALL[i])
}

/// Raw `(category, token)` entries drawn from a small alphabet so that
/// independently generated dictionaries overlap.
pub fn entries() -> impl Strategy<Value = Vec<(Category, String)>> {
  prop::collection::vec((category(), "[a-f]{1,2}"), 0..24)
}

pub fn dict() -> impl Strategy<Value = VarsDict> {
  entries().prop_map(|entries| entries.into_iter().collect())
}

/// A non-empty family of dictionaries.
pub fn family() -> impl Strategy<Value = Vec<VarsDict>> {
  prop::collection::vec(dict(), 1..6)
}

/// Build a dictionary where every category holds the category keyword in
/// lower case, optionally suffixed with `_name`.
pub fn dummy_dict(name: Option<&str>) -> VarsDict {
  VarsDict::categories()
    .map(|category| {
      let mut entry = category.as_str().to_lowercase();
      if let Some(name) = name {
        entry.push('_');
        entry.push_str(name);
      }
      (category, entry)
    })
    .collect()
}
