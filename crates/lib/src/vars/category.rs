use std::fmt;
use std::str::FromStr;

use super::VarsError;

/// A named variable category in a [`VarsDict`](super::VarsDict).
///
/// The set of categories is closed. The declaration order is the canonical
/// order in which categories are rendered into a makefile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
  CFlags,
  CppFlags,
  SrcFiles,
  SharedLibraries,
  StaticLibraries,
  CIncludes,
  ExportCIncludeDirs,
  Defines,
  /// Bookkeeping only: records which build targets contributed entries.
  KnownTargets,
}

impl Category {
  /// Number of categories in the enumeration.
  pub const COUNT: usize = 9;

  /// Every category, in canonical order.
  pub const ALL: [Category; Category::COUNT] = [
    Category::CFlags,
    Category::CppFlags,
    Category::SrcFiles,
    Category::SharedLibraries,
    Category::StaticLibraries,
    Category::CIncludes,
    Category::ExportCIncludeDirs,
    Category::Defines,
    Category::KnownTargets,
  ];

  /// Returns the keyword identifying this category in snapshots.
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::CFlags => "LOCAL_CFLAGS",
      Self::CppFlags => "LOCAL_CPPFLAGS",
      Self::SrcFiles => "LOCAL_SRC_FILES",
      Self::SharedLibraries => "LOCAL_SHARED_LIBRARIES",
      Self::StaticLibraries => "LOCAL_STATIC_LIBRARIES",
      Self::CIncludes => "LOCAL_C_INCLUDES",
      Self::ExportCIncludeDirs => "LOCAL_EXPORT_C_INCLUDE_DIRS",
      Self::Defines => "DEFINES",
      Self::KnownTargets => "KNOWN_TARGETS",
    }
  }

  /// Returns the make variable this category is written to.
  ///
  /// Defines have no variable of their own and are folded into `LOCAL_CFLAGS`.
  pub fn make_variable(&self) -> &'static str {
    match self {
      Self::Defines => Self::CFlags.as_str(),
      other => other.as_str(),
    }
  }

  /// Prefix added to every token when rendered.
  pub fn token_prefix(&self) -> &'static str {
    match self {
      Self::Defines => "-D",
      _ => "",
    }
  }

  /// Whether this category is always rendered with `+=`.
  ///
  /// `LOCAL_CFLAGS` is shared with `DEFINES` and may be seeded by the
  /// makefile preamble, so a plain assignment would drop earlier flags.
  pub fn accumulates(&self) -> bool {
    matches!(self, Self::CFlags | Self::Defines)
  }

  /// Whether this category is written to a makefile at all.
  pub fn is_rendered(&self) -> bool {
    !matches!(self, Self::KnownTargets)
  }

  pub(crate) fn index(self) -> usize {
    self as usize
  }
}

impl fmt::Display for Category {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl FromStr for Category {
  type Err = VarsError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Category::ALL
      .iter()
      .copied()
      .find(|c| c.as_str() == s)
      .ok_or_else(|| VarsError::UnknownCategory(s.to_string()))
  }
}
