//! Package names: `author/project`.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Author of the package every project depends on.
pub const CORE_AUTHOR: &str = "core-pkg";

/// Project name of the package every project depends on.
pub const CORE_PROJECT: &str = "core";

/// A validated `author/project` package name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PackageName {
    author: String,
    project: String,
}

/// Why a string is not a package name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PackageNameError {
    #[error("expected `author/project`")]
    MissingSlash,

    #[error("author `{0}` must be letters, digits and single inner hyphens")]
    BadAuthor(String),

    #[error("project `{0}` must start with a lowercase letter and use lowercase letters, digits and single inner hyphens")]
    BadProject(String),
}

impl PackageName {
    /// The reserved core package.
    pub fn core() -> Self {
        PackageName {
            author: CORE_AUTHOR.to_string(),
            project: CORE_PROJECT.to_string(),
        }
    }

    pub fn is_core(&self) -> bool {
        self.author == CORE_AUTHOR && self.project == CORE_PROJECT
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn project(&self) -> &str {
        &self.project
    }
}

fn valid_hyphens(s: &str) -> bool {
    !s.starts_with('-') && !s.ends_with('-') && !s.contains("--")
}

fn valid_author(author: &str) -> bool {
    !author.is_empty()
        && author.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        && valid_hyphens(author)
}

fn valid_project(project: &str) -> bool {
    project.starts_with(|c: char| c.is_ascii_lowercase())
        && project
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        && valid_hyphens(project)
}

impl FromStr for PackageName {
    type Err = PackageNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (author, project) = s.split_once('/').ok_or(PackageNameError::MissingSlash)?;

        if !valid_author(author) {
            return Err(PackageNameError::BadAuthor(author.to_string()));
        }
        if !valid_project(project) {
            return Err(PackageNameError::BadProject(project.to_string()));
        }

        Ok(PackageName {
            author: author.to_string(),
            project: project.to_string(),
        })
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.author, self.project)
    }
}
