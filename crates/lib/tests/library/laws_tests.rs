use mkmerge_lib::makefile::{render_android_mk, render_category};
use mkmerge_lib::{Category, MakefileTemplate, VarsDict, intersect_all, refine, trim};
use proptest::prelude::*;

use super::common::{dict, entries, family};

fn bare_template() -> MakefileTemplate {
  MakefileTemplate {
    banner: String::new(),
    ..Default::default()
  }
}

proptest! {
  #[test]
  fn intersection_is_idempotent(dicts in family()) {
    let common = intersect_all(&dicts).unwrap();
    let again = intersect_all(dicts.iter().chain(std::iter::once(&common))).unwrap();
    prop_assert_eq!(again, common);
  }

  #[test]
  fn intersection_with_any_input_is_stable(dicts in family()) {
    let common = intersect_all(&dicts).unwrap();
    for d in &dicts {
      prop_assert_eq!(intersect_all([&common, d]).unwrap(), common.clone());
    }
  }

  #[test]
  fn trim_reconstructs_inputs(dicts in family()) {
    let common = intersect_all(&dicts).unwrap();
    for d in &dicts {
      let residual = trim(d, &common);
      for category in VarsDict::categories() {
        let union: std::collections::BTreeSet<_> =
          common[category].union(&residual[category]).cloned().collect();
        prop_assert_eq!(&union, &d[category]);
        prop_assert!(common[category].is_disjoint(&residual[category]));
      }
    }
  }

  #[test]
  fn refinement_splits_pair(base in dict(), spec in dict(), others in family()) {
    let mut inputs = others;
    inputs.push(base.clone());
    inputs.push(spec.clone());

    let common = intersect_all(&inputs).unwrap();
    let (base_residual, spec_residual) = (trim(&base, &common), trim(&spec, &common));
    let (new_base, new_spec) = refine(&base_residual, &spec_residual);

    prop_assert_eq!(&new_base, &intersect_all([&base_residual, &spec_residual]).unwrap());
    for category in VarsDict::categories() {
      prop_assert!(new_base[category].is_disjoint(&new_spec[category]));
      // Nothing of the specialization is lost: common + base + spec covers it.
      for token in &spec[category] {
        prop_assert!(
          common[category].contains(token)
            || new_base[category].contains(token)
            || new_spec[category].contains(token)
        );
      }
    }
  }

  #[test]
  fn render_ignores_insertion_order(raw in entries()) {
    let forward: VarsDict = raw.iter().cloned().collect();
    let backward: VarsDict = raw.iter().rev().cloned().collect();
    let template = MakefileTemplate::default();
    prop_assert_eq!(
      render_android_mk(&forward, &[], &template),
      render_android_mk(&backward, &[], &template)
    );
  }

  #[test]
  fn sentinel_never_rendered(d in dict(), append in any::<bool>()) {
    let mut d = d;
    d.add(Category::KnownTargets, "zz_sentinel");
    prop_assert_eq!(render_category(Category::KnownTargets, &d[Category::KnownTargets], append), None);

    let text = render_android_mk(&d, &[], &bare_template());
    prop_assert!(!text.contains("KNOWN_TARGETS"));
    prop_assert!(!text.contains("zz_sentinel"));
  }

  #[test]
  fn one_assignment_per_nonempty_category(d in dict()) {
    let text = render_android_mk(&d, &[], &bare_template());
    let assignments = text
      .lines()
      .filter(|line| line.ends_with(":= \\") || line.ends_with("+= \\"))
      .count();
    let expected = d
      .iter()
      .filter(|(category, tokens)| category.is_rendered() && !tokens.is_empty())
      .count();
    prop_assert_eq!(assignments, expected);
  }
}
