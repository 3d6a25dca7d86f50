//! Library-level tests for mkmerge-lib.

mod common;
mod laws_tests;
mod makefile_tests;
