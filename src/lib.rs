//! gren-outline - the `gren.json` project outline
//!
//! This crate provides the library side of gren-outline: decoding,
//! validating and writing the outline that tells the compiler whether a
//! project is an application or a package, where its code lives and what
//! it depends on.

pub mod core;
pub mod json;
pub mod ops;
pub mod util;

/// Test utilities and mocks for gren-outline unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides an in-memory filesystem with symlinks and
/// sample outlines.
#[cfg(test)]
pub mod test_support;

pub use core::{
    outline::Outline, outline::OutlineProblem, outline::SrcDir, package_name::PackageName,
    version::Version,
};
pub use ops::{load, validate, LoadError};
