//! Implementation of `gren-outline fmt`.

use std::path::Path;

use anyhow::Result;
use tracing::{debug, info};

use crate::core::outline::{self, OutlineProblem, OUTLINE_FILE};
use crate::util::diagnostic::OutlineReport;
use crate::util::fs::{write_string, FileSystem, RealFs};

use super::load::LoadError;

/// What formatting did, or would do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatOutcome {
    /// The file was already canonical.
    Unchanged,
    /// The file was rewritten.
    Rewritten,
    /// The file is not canonical and `check` prevented writing it.
    NeedsFormatting,
}

/// Rewrite `gren.json` in canonical form.
///
/// Only decoding is required; directories named in the outline do not need
/// to exist yet. With `check` set nothing is written.
pub fn format_outline(root: &Path, indent: usize, check: bool) -> Result<FormatOutcome> {
    let path = root.join(OUTLINE_FILE);
    let src = RealFs
        .read_to_string(&path)
        .map_err(|source| LoadError::NoOutline {
            path: path.clone(),
            source,
        })?;

    let decoded = match outline::decode(&src) {
        Ok(decoded) => decoded,
        Err(err) => {
            let report = OutlineReport::new(&path, src, OutlineProblem::from(err));
            return Err(LoadError::Invalid(Box::new(report)).into());
        }
    };

    let canonical = outline::to_string_with_indent(&decoded, indent)?;
    if canonical == src {
        debug!("{} is already formatted", path.display());
        return Ok(FormatOutcome::Unchanged);
    }
    if check {
        return Ok(FormatOutcome::NeedsFormatting);
    }

    write_string(&path, &canonical)?;
    info!("Formatted {}", path.display());
    Ok(FormatOutcome::Rewritten)
}
