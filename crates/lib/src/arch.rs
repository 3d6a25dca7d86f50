use std::fmt;

/// Android `TARGET_ARCH` values a makefile can be specialized for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arch {
  Arm,
  Arm64,
  X86,
  X86_64,
  Mips,
  Mips64,
}

impl Arch {
  /// Every known architecture
  pub const ALL: [Arch; 6] = [Arch::Arm, Arch::Arm64, Arch::X86, Arch::X86_64, Arch::Mips, Arch::Mips64];

  /// Parse a `TARGET_ARCH` value
  ///
  /// Returns `None` if the architecture is not known
  pub fn parse(value: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|arch| arch.as_str() == value)
  }

  /// Returns the `TARGET_ARCH` string for this architecture
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Arm => "arm",
      Self::Arm64 => "arm64",
      Self::X86 => "x86",
      Self::X86_64 => "x86_64",
      Self::Mips => "mips",
      Self::Mips64 => "mips64",
    }
  }
}

impl fmt::Display for Arch {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}
