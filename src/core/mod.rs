//! Core data structures for gren-outline.
//!
//! This module contains the value types an outline is built from:
//! - Package names, versions and version constraints
//! - License identifiers and module names
//! - The outline itself, with its decoder, encoder and cache codec

pub mod license;
pub mod module_name;
pub mod non_empty;
pub mod outline;
pub mod package_name;
pub mod version;

pub use license::License;
pub use module_name::ModuleName;
pub use non_empty::NonEmpty;
pub use outline::{
    AppOutline, Exposed, Outline, OutlineProblem, PkgOutline, Platform, Problem, SrcDir,
    OUTLINE_FILE,
};
pub use package_name::PackageName;
pub use version::{Constraint, Version};
