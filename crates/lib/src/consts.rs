/// Name of the application, written into the banner of generated makefiles.
pub const APP_NAME: &str = "mkmerge";

/// File name of the generated makefile.
pub const MAKEFILE_NAME: &str = "Android.mk";

/// Default plan file looked up when none is given on the command line.
pub const DEFAULT_PLAN_FILENAME: &str = "mkmerge.json";

/// Make variable holding the architecture being built.
pub const TARGET_ARCH_VAR: &str = "TARGET_ARCH";
