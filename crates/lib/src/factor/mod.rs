//! Set algebra over variable dictionaries.
//!
//! This module factors a family of per-variant [`VarsDict`]s into the
//! definitions every variant shares and the residual each variant adds on
//! top. All operations are pure: they borrow their inputs and return new
//! dictionaries, since the same input may feed several refinement steps.
//!
//! # Laws
//!
//! For inputs `d1..dn`, with `c = intersect_all(d1..dn)` and
//! `ri = trim(di, c)`:
//!
//! - `di == c ∪ ri` and `c ∩ ri == ∅`, per category
//! - `intersect_all(d1..dn, c) == c`

use thiserror::Error;
use tracing::debug;

use crate::vars::VarsDict;

/// Errors raised while factoring dictionaries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FactorError {
  /// Intersection over zero dictionaries is undefined.
  #[error("cannot intersect an empty list of variable dictionaries")]
  EmptyInput,
}

/// Intersect every dictionary in `dicts`, category by category.
///
/// A single input yields a copy of itself.
///
/// # Errors
///
/// Returns [`FactorError::EmptyInput`] if `dicts` yields nothing.
pub fn intersect_all<'a, I>(dicts: I) -> Result<VarsDict, FactorError>
where
  I: IntoIterator<Item = &'a VarsDict>,
{
  let mut iter = dicts.into_iter();
  let first = iter.next().ok_or(FactorError::EmptyInput)?;

  let mut result = first.clone();
  let mut count = 1;
  for dict in iter {
    result = intersect(&result, dict);
    count += 1;
  }

  debug!(inputs = count, common_tokens = result.token_count(), "intersected dictionaries");
  Ok(result)
}

/// Remove every entry of `subtrahend` from `dict`, category by category.
pub fn trim(dict: &VarsDict, subtrahend: &VarsDict) -> VarsDict {
  let mut result = VarsDict::new();
  for (category, tokens) in dict.iter() {
    let removed = subtrahend.get(category);
    result.extend(tokens.difference(removed).map(|t| (category, t.clone())));
  }
  result
}

/// Refine a specialization against the variant it specializes.
///
/// Both arguments are residuals that have already been trimmed against the
/// global common dictionary. Returns `(base, specialization)` where the new
/// base holds what both share (the base condition alone implies those
/// entries) and the new specialization holds only what is unique to it.
pub fn refine(base: &VarsDict, specialization: &VarsDict) -> (VarsDict, VarsDict) {
  let shared = intersect(base, specialization);
  let unique = trim(specialization, &shared);
  (shared, unique)
}

/// Factor `dicts` into their intersection and one residual per input.
///
/// The residuals are returned in input order.
pub fn factor_common(dicts: &[VarsDict]) -> Result<(VarsDict, Vec<VarsDict>), FactorError> {
  let common = intersect_all(dicts)?;
  let residuals = dicts.iter().map(|d| trim(d, &common)).collect();
  Ok((common, residuals))
}

fn intersect(a: &VarsDict, b: &VarsDict) -> VarsDict {
  let mut result = VarsDict::new();
  for (category, tokens) in a.iter() {
    let other = b.get(category);
    result.extend(tokens.intersection(other).map(|t| (category, t.clone())));
  }
  result
}
