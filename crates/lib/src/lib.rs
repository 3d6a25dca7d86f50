//! mkmerge-lib: merge per-architecture build snapshots into one Android.mk
//!
//! This crate provides the building blocks used by the `mkmerge` CLI:
//! - `VarsDict`: the variable definitions of one build variant
//! - `factor`: set algebra that splits a variant family into common
//!   definitions and per-variant residuals
//! - `makefile`: renders the factored result as a conditional Android.mk
//! - `plan`: loads a plan file describing the variant family and runs the
//!   whole pipeline

pub mod arch;
pub mod consts;
pub mod factor;
pub mod makefile;
pub mod plan;
pub mod snapshot;
pub mod vars;

pub use factor::{FactorError, factor_common, intersect_all, refine, trim};
pub use makefile::{MakefileTemplate, VariantBlock, WriteError, write_android_mk};
pub use vars::{Category, VarsDict, VarsError};
