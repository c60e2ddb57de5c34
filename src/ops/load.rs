//! Reading, decoding and validating a project's `gren.json`.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::core::outline::{self, Outline, OutlineProblem, OUTLINE_FILE};
use crate::util::diagnostic::OutlineReport;
use crate::util::fs::FileSystem;

use super::validate::validate;

/// Why a project's outline could not be loaded.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read {}", path.display())]
    NoOutline {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Invalid(Box<OutlineReport>),
}

impl LoadError {
    /// The outline problem, if the file was read.
    pub fn problem(&self) -> Option<&OutlineProblem> {
        match self {
            LoadError::NoOutline { .. } => None,
            LoadError::Invalid(report) => Some(&report.problem),
        }
    }
}

/// Load the outline of the project at `root`.
pub fn load<F: FileSystem + ?Sized>(fs: &F, root: &Path) -> Result<Outline, LoadError> {
    let path = root.join(OUTLINE_FILE);
    debug!("Loading {}", path.display());

    let src = fs
        .read_to_string(&path)
        .map_err(|source| LoadError::NoOutline {
            path: path.clone(),
            source,
        })?;

    parse_and_validate(fs, root, &path, src)
}

/// Decode and validate outline text that was read from `path`.
pub fn parse_and_validate<F: FileSystem + ?Sized>(
    fs: &F,
    root: &Path,
    path: &Path,
    src: String,
) -> Result<Outline, LoadError> {
    let checked = outline::decode(&src)
        .map_err(OutlineProblem::from)
        .and_then(|outline| validate(fs, root, outline));

    checked.map_err(|problem| LoadError::Invalid(Box::new(OutlineReport::new(path, src, problem))))
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::core::outline::Problem;
    use crate::test_support::{fixtures, MockFileSystem};

    #[test]
    fn test_load_valid_application() {
        let mut fs = MockFileSystem::new();
        fs.add_file("/p/gren.json", fixtures::APPLICATION);
        fs.add_dir("/p/src");
        fs.add_dir("/p/lib");

        let outline = load(&fs, Path::new("/p")).unwrap();
        assert_eq!(outline.kind(), "application");
    }

    #[test]
    fn test_missing_outline() {
        let fs = MockFileSystem::new();
        let err = load(&fs, Path::new("/p")).unwrap_err();

        assert!(matches!(err, LoadError::NoOutline { ref path, .. } if path == Path::new("/p/gren.json")));
        assert!(err.problem().is_none());
        assert_eq!(err.to_string(), "could not read /p/gren.json");
    }

    #[test]
    fn test_decode_failure_has_span() {
        let mut fs = MockFileSystem::new();
        fs.add_file("/p/gren.json", r#"{"type": "library"}"#);

        let LoadError::Invalid(report) = load(&fs, Path::new("/p")).unwrap_err() else {
            panic!("expected an invalid outline");
        };
        assert!(report.has_span());
        let OutlineProblem::BadStructure(err) = &report.problem else {
            panic!("expected bad structure, got {:?}", report.problem);
        };
        assert_eq!(err.problem(), Some(&Problem::BadType("library".to_string())));
    }

    #[test]
    fn test_validation_failure_has_no_span() {
        let mut fs = MockFileSystem::new();
        fs.add_file("/p/gren.json", fixtures::APPLICATION);
        fs.add_dir("/p/src");

        let err = load(&fs, Path::new("/p")).unwrap_err();
        assert!(matches!(
            err.problem(),
            Some(OutlineProblem::MissingSrcDirs(_))
        ));
        let LoadError::Invalid(report) = err else {
            unreachable!();
        };
        assert!(!report.has_span());
    }
}
