//! The per-variant configuration model.
//!
//! A [`VarsDict`] maps every [`Category`] to a set of string tokens. Every
//! category is always present; an absent entry is simply an empty set. The
//! dictionary is backed by a fixed array indexed by category, so iterating
//! "all categories" is exhaustive by construction.
//!
//! # Serialization
//!
//! A dictionary serializes as a JSON object keyed by category keyword:
//!
//! ```json
//! {
//!   "LOCAL_SRC_FILES": ["src/core/SkCanvas.cpp"],
//!   "DEFINES": ["SK_BUILD_FOR_ANDROID"]
//! }
//! ```
//!
//! Missing keywords deserialize to empty sets; unknown keywords are rejected.

mod category;

use std::collections::{BTreeMap, BTreeSet};
use std::ops::Index;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use category::Category;

/// Errors raised by dictionary lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VarsError {
  #[error("unknown variable category: {0}")]
  UnknownCategory(String),
}

/// A complete set of variable definitions for one build variant.
///
/// Equality compares every category as a set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
  try_from = "BTreeMap<String, Vec<String>>",
  into = "BTreeMap<String, Vec<String>>"
)]
pub struct VarsDict {
  sets: [BTreeSet<String>; Category::COUNT],
}

impl VarsDict {
  /// Create a dictionary with every category mapped to an empty set.
  pub fn new() -> Self {
    Self::default()
  }

  /// All known categories in canonical order, sentinel included.
  pub fn categories() -> impl Iterator<Item = Category> + Clone {
    Category::ALL.into_iter()
  }

  /// The tokens stored for `category`.
  pub fn get(&self, category: Category) -> &BTreeSet<String> {
    &self.sets[category.index()]
  }

  /// Look up a category by its keyword.
  pub fn get_named(&self, name: &str) -> Result<&BTreeSet<String>, VarsError> {
    let category: Category = name.parse()?;
    Ok(self.get(category))
  }

  /// Insert `token` into `category`. Returns false if it was already present.
  pub fn add(&mut self, category: Category, token: impl Into<String>) -> bool {
    self.sets[category.index()].insert(token.into())
  }

  /// Insert a token into the category named by `name`.
  pub fn add_named(&mut self, name: &str, token: impl Into<String>) -> Result<bool, VarsError> {
    let category: Category = name.parse()?;
    Ok(self.add(category, token))
  }

  /// Iterate over `(category, tokens)` pairs in canonical order.
  pub fn iter(&self) -> impl Iterator<Item = (Category, &BTreeSet<String>)> {
    Category::ALL.into_iter().map(move |c| (c, self.get(c)))
  }

  /// Union `other` into this dictionary, category by category.
  pub fn extend_from(&mut self, other: &VarsDict) {
    for (category, tokens) in other.iter() {
      self.sets[category.index()].extend(tokens.iter().cloned());
    }
  }

  /// True when every category, the sentinel included, is empty.
  pub fn is_empty(&self) -> bool {
    self.sets.iter().all(BTreeSet::is_empty)
  }

  /// Number of tokens across all rendered categories.
  pub fn token_count(&self) -> usize {
    self
      .iter()
      .filter(|(category, _)| category.is_rendered())
      .map(|(_, tokens)| tokens.len())
      .sum()
  }
}

impl Index<Category> for VarsDict {
  type Output = BTreeSet<String>;

  fn index(&self, category: Category) -> &Self::Output {
    self.get(category)
  }
}

impl<S: Into<String>> FromIterator<(Category, S)> for VarsDict {
  fn from_iter<I: IntoIterator<Item = (Category, S)>>(iter: I) -> Self {
    let mut dict = VarsDict::new();
    dict.extend(iter);
    dict
  }
}

impl<S: Into<String>> Extend<(Category, S)> for VarsDict {
  fn extend<I: IntoIterator<Item = (Category, S)>>(&mut self, iter: I) {
    for (category, token) in iter {
      self.add(category, token);
    }
  }
}

impl TryFrom<BTreeMap<String, Vec<String>>> for VarsDict {
  type Error = VarsError;

  fn try_from(map: BTreeMap<String, Vec<String>>) -> Result<Self, Self::Error> {
    let mut dict = VarsDict::new();
    for (name, tokens) in map {
      let category: Category = name.parse()?;
      dict.extend(tokens.into_iter().map(|t| (category, t)));
    }
    Ok(dict)
  }
}

impl From<VarsDict> for BTreeMap<String, Vec<String>> {
  fn from(dict: VarsDict) -> Self {
    let VarsDict { sets } = dict;
    Category::ALL
      .into_iter()
      .zip(sets)
      .map(|(category, tokens)| (category.as_str().to_string(), tokens.into_iter().collect()))
      .collect()
  }
}
