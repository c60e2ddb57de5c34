//! Outline errors.
//!
//! `Problem` is what a single field can get wrong. `OutlineProblem` is what
//! a whole outline can get wrong, either because it does not decode or
//! because it disagrees with the filesystem.

use std::path::PathBuf;

use thiserror::Error;

use crate::core::license::LicenseError;
use crate::core::module_name::ModuleNameError;
use crate::core::non_empty::NonEmpty;
use crate::core::package_name::PackageNameError;
use crate::core::version::{ConstraintError, VersionError};
use crate::json::{Cursor, DecodeError, Reason};
use crate::util::diagnostic::{suggestions, Diagnostic};

use super::{PlatformError, SrcDir, OUTLINE_FILE};

/// A rejected field value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Problem {
    #[error("unknown project type `{0}`; expected `application` or `package`")]
    BadType(String),

    #[error("bad package name `{given}`: {reason}")]
    BadPackageName {
        given: String,
        reason: PackageNameError,
    },

    #[error("bad version: {0}")]
    BadVersion(VersionError),

    #[error("bad version constraint: {0}")]
    BadConstraint(ConstraintError),

    #[error("{0}")]
    BadLicense(LicenseError),

    #[error("bad module name: {0}")]
    BadModuleName(ModuleNameError),

    #[error("{0}")]
    BadPlatform(PlatformError),

    #[error("summary is longer than 80 bytes")]
    SummaryTooLong,

    #[error("section header is longer than 20 bytes")]
    SectionHeaderTooLong,

    #[error("section header `{0}` appears more than once")]
    RepeatedSectionHeader(String),

    #[error("bad dependency name `{given}`: {reason}")]
    BadDependencyName {
        given: String,
        reason: PackageNameError,
    },

    #[error("an application needs at least one source directory")]
    NoSourceDirs,
}

/// Why an outline was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OutlineProblem {
    #[error("gren.json has bad structure: {0}")]
    BadStructure(DecodeError<Problem>),

    #[error("application does not list `core-pkg/core` as a direct dependency")]
    NoAppCore,

    #[error("package does not depend on `core-pkg/core`")]
    NoPkgCore,

    #[error("source directories do not exist: {}", display_dirs(.0))]
    MissingSrcDirs(NonEmpty<SrcDir>),

    #[error("source directories `{first}` and `{second}` are the same directory")]
    DuplicateSrcDirs {
        canonical: PathBuf,
        first: SrcDir,
        second: SrcDir,
    },
}

fn display_dirs(dirs: &NonEmpty<SrcDir>) -> String {
    dirs.iter()
        .map(|dir| format!("`{}`", dir))
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<DecodeError<Problem>> for OutlineProblem {
    fn from(err: DecodeError<Problem>) -> Self {
        OutlineProblem::BadStructure(err)
    }
}

impl OutlineProblem {
    /// Where in the file the problem was found, for decode failures.
    pub fn position(&self) -> Option<Cursor> {
        match self {
            OutlineProblem::BadStructure(err) => Some(err.at),
            OutlineProblem::NoAppCore
            | OutlineProblem::NoPkgCore
            | OutlineProblem::MissingSrcDirs(_)
            | OutlineProblem::DuplicateSrcDirs { .. } => None,
        }
    }

    /// Short advice for fixing the problem.
    pub fn help(&self) -> Option<String> {
        match self {
            OutlineProblem::BadStructure(err) => structure_help(err),
            OutlineProblem::NoAppCore => Some(format!(
                "add `\"core-pkg/core\"` under `dependencies.direct` in {}",
                OUTLINE_FILE
            )),
            OutlineProblem::NoPkgCore => Some(format!(
                "add `\"core-pkg/core\": \"6.0.0 <= v < 7.0.0\"` under `dependencies` in {}",
                OUTLINE_FILE
            )),
            OutlineProblem::MissingSrcDirs(_) => Some(
                "create the directories or remove them from `source-directories`".to_string(),
            ),
            OutlineProblem::DuplicateSrcDirs { second, .. } => Some(format!(
                "remove `{}` from `source-directories`",
                second
            )),
        }
    }

    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(self.to_string());

        match self {
            OutlineProblem::BadStructure(err) => {
                if let Reason::OneOf(alternatives) = &err.reason {
                    for alternative in alternatives {
                        diag = diag.with_context(alternative.to_string());
                    }
                }
            }
            OutlineProblem::MissingSrcDirs(dirs) => {
                for dir in dirs {
                    diag = diag.with_context(format!("`{}` is not a directory", dir));
                }
            }
            OutlineProblem::DuplicateSrcDirs {
                canonical,
                first,
                second,
            } => {
                diag = diag.with_context(format!(
                    "`{}` and `{}` both resolve to {}",
                    first,
                    second,
                    canonical.display()
                ));
            }
            OutlineProblem::NoAppCore | OutlineProblem::NoPkgCore => {
                diag = diag.with_context("every project depends on core unless it is core");
            }
        }

        if let Some(help) = self.help() {
            diag = diag.with_suggestion(help);
        }
        diag.with_suggestion(suggestions::CHECK_AGAIN)
    }
}

fn structure_help(err: &DecodeError<Problem>) -> Option<String> {
    match &err.reason {
        Reason::Failure(Problem::BadLicense(license)) if !license.suggestions.is_empty() => {
            Some(format!("did you mean {}?", license.suggestions.join(" or ")))
        }
        Reason::Failure(Problem::BadType(_)) => {
            Some("set `\"type\"` to `\"application\"` or `\"package\"`".to_string())
        }
        Reason::Failure(Problem::SummaryTooLong) => {
            Some("shorten the summary; long descriptions belong in the README".to_string())
        }
        Reason::OneOf(_) => Some(
            "`exposed-modules` is either a list of module names or an object of sections"
                .to_string(),
        ),
        Reason::MissingField(field) => Some(format!("add the `{}` field", field)),
        _ => None,
    }
}
