//! Checking an outline against the project it describes.
//!
//! Checks run in a fixed order and stop at the first one that fails:
//! 1. the core dependency is present
//! 2. every declared source directory exists
//! 3. no two declared source directories are the same directory

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::core::non_empty::NonEmpty;
use crate::core::outline::{Outline, OutlineProblem, SrcDir};
use crate::util::fs::FileSystem;

/// Validate `outline` for the project at `root`.
///
/// Returns the outline unchanged when every check passes.
pub fn validate<F: FileSystem + ?Sized>(
    fs: &F,
    root: &Path,
    outline: Outline,
) -> Result<Outline, OutlineProblem> {
    check_core(&outline)?;

    if let Outline::App(app) = &outline {
        check_exist(fs, root, &app.source_dirs)?;
        check_duplicates(fs, root, &app.source_dirs)?;
    }

    debug!("{} outline in {} is valid", outline.kind(), root.display());
    Ok(outline)
}

fn check_core(outline: &Outline) -> Result<(), OutlineProblem> {
    if outline.has_core_dependency() {
        return Ok(());
    }
    match outline {
        Outline::App(_) => Err(OutlineProblem::NoAppCore),
        Outline::Pkg(_) => Err(OutlineProblem::NoPkgCore),
    }
}

fn check_exist<F: FileSystem + ?Sized>(
    fs: &F,
    root: &Path,
    dirs: &NonEmpty<SrcDir>,
) -> Result<(), OutlineProblem> {
    let missing: Vec<SrcDir> = dirs
        .iter()
        .filter(|dir| !fs.is_dir(&dir.resolve(root)))
        .cloned()
        .collect();

    match NonEmpty::from_vec(missing) {
        Some(missing) => Err(OutlineProblem::MissingSrcDirs(missing)),
        None => Ok(()),
    }
}

/// Group directories by canonical path and report the first two entries of
/// the smallest duplicated path.
fn check_duplicates<F: FileSystem + ?Sized>(
    fs: &F,
    root: &Path,
    dirs: &NonEmpty<SrcDir>,
) -> Result<(), OutlineProblem> {
    let mut groups: BTreeMap<OsString, Vec<&SrcDir>> = BTreeMap::new();

    for dir in dirs {
        let resolved = dir.resolve(root);
        let canonical = fs.canonicalize(&resolved).unwrap_or_else(|e| {
            warn!("Failed to canonicalize {}: {}", resolved.display(), e);
            resolved
        });
        groups
            .entry(canonical.into_os_string())
            .or_default()
            .push(dir);
    }

    for (canonical, group) in groups {
        if let [first, second, ..] = group.as_slice() {
            return Err(OutlineProblem::DuplicateSrcDirs {
                canonical: PathBuf::from(canonical),
                first: (*first).clone(),
                second: (*second).clone(),
            });
        }
    }

    Ok(())
}
