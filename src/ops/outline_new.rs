//! Implementation of `gren-outline init`.

use std::path::Path;

use anyhow::{bail, Result};
use tracing::info;

use crate::core::outline::{self, Outline, Platform, OUTLINE_FILE};
use crate::core::package_name::PackageName;
use crate::core::version::Version;
use crate::util::fs::{ensure_dir, write_string};

/// Options for creating a new project.
#[derive(Debug, Clone)]
pub struct NewOptions {
    /// Create a package with this name instead of an application
    pub package: Option<PackageName>,

    /// Where the project's code runs
    pub platform: Platform,

    /// Spaces per indentation level in the written outline
    pub indent: usize,
}

impl Default for NewOptions {
    fn default() -> Self {
        NewOptions {
            package: None,
            platform: Platform::default(),
            indent: outline::encode::DEFAULT_INDENT,
        }
    }
}

/// Write a fresh `gren.json` and `src/` directory into `root`.
pub fn init_project(root: &Path, opts: &NewOptions) -> Result<Outline> {
    let outline_path = root.join(OUTLINE_FILE);
    if outline_path.exists() {
        bail!("`{}` already exists in `{}`", OUTLINE_FILE, root.display());
    }

    let outline = match &opts.package {
        Some(name) => Outline::default_package(name.clone(), Version::COMPILER, opts.platform),
        None => Outline::default_application(Version::COMPILER, opts.platform),
    };

    write_string(
        &outline_path,
        &outline::to_string_with_indent(&outline, opts.indent)?,
    )?;
    ensure_dir(&root.join("src"))?;

    info!("Created {} outline in {}", outline.kind(), root.display());
    Ok(outline)
}
