//! Command implementations

pub mod check;
pub mod completions;
pub mod exposed;
pub mod fmt;
pub mod init;

use std::path::PathBuf;

use anyhow::Result;

/// The project root named on the command line, made absolute.
pub fn project_root(path: Option<PathBuf>) -> Result<PathBuf> {
    let path = path.unwrap_or_else(|| PathBuf::from("."));
    gren_outline::util::fs::absolute(&path)
}
