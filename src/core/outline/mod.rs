//! The `gren.json` outline.
//!
//! An outline says whether a project is an application or a package, where
//! its code lives, and what it depends on. It is decoded from `gren.json`
//! (or built directly when scaffolding), checked against the filesystem by
//! [`crate::ops::validate`], and never changed afterwards.

pub mod binary;
pub mod decode;
pub mod encode;
pub mod problem;

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::license::License;
use crate::core::module_name::ModuleName;
use crate::core::non_empty::NonEmpty;
use crate::core::package_name::PackageName;
use crate::core::version::{Constraint, Version};

pub use decode::decode;
pub use encode::{encode, to_string, to_string_with_indent};
pub use problem::{OutlineProblem, Problem};

/// File name of the outline in a project root.
pub const OUTLINE_FILE: &str = "gren.json";

/// Maximum byte length of a package summary.
pub const SUMMARY_LIMIT: usize = 80;

/// Maximum byte length of an `exposed-modules` section header.
pub const SECTION_HEADER_LIMIT: usize = 20;

/// Core version pinned by new application outlines.
pub const CORE_VERSION: Version = Version::new(6, 0, 0);

/// A project outline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outline {
    App(AppOutline),
    Pkg(PkgOutline),
}

/// An application: a program with pinned dependencies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppOutline {
    pub gren_version: Version,
    pub platform: Platform,
    /// Searched in order; the first directory containing a module wins.
    pub source_dirs: NonEmpty<SrcDir>,
    pub direct: BTreeMap<PackageName, Version>,
    pub indirect: BTreeMap<PackageName, Version>,
}

/// A package: a library published for other projects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PkgOutline {
    pub name: PackageName,
    pub summary: String,
    pub license: License,
    pub version: Version,
    pub exposed: Exposed,
    pub dependencies: BTreeMap<PackageName, Constraint>,
    pub gren_version: Constraint,
    pub platform: Platform,
}

/// A declared source directory, kept in the form the user wrote it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SrcDir {
    Absolute(PathBuf),
    Relative(PathBuf),
}

impl SrcDir {
    /// Tag a path by whether it is absolute on this platform.
    pub fn classify(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if path.is_absolute() {
            SrcDir::Absolute(path)
        } else {
            SrcDir::Relative(path)
        }
    }

    /// The path as written.
    pub fn path(&self) -> &Path {
        match self {
            SrcDir::Absolute(path) | SrcDir::Relative(path) => path,
        }
    }

    /// The absolute location, joining relative paths to `root`.
    pub fn resolve(&self, root: &Path) -> PathBuf {
        match self {
            SrcDir::Absolute(path) => path.clone(),
            SrcDir::Relative(path) => root.join(path),
        }
    }
}

impl fmt::Display for SrcDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path().display())
    }
}

/// The modules a package makes available to its users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exposed {
    List(Vec<ModuleName>),
    /// Sections in declaration order, used to group modules in documentation.
    /// Headers are unique; decoding rejects a repeated one.
    Dict(Vec<(String, Vec<ModuleName>)>),
}

impl Exposed {
    /// Every exposed module, in declaration order.
    pub fn flatten(&self) -> Vec<ModuleName> {
        match self {
            Exposed::List(modules) => modules.clone(),
            Exposed::Dict(sections) => sections
                .iter()
                .flat_map(|(_, modules)| modules.iter().cloned())
                .collect(),
        }
    }
}

/// Where a project's compiled code runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Common,
    #[default]
    Browser,
    Node,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown platform `{0}`; expected `common`, `browser` or `node`")]
pub struct PlatformError(pub String);

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Common => "common",
            Platform::Browser => "browser",
            Platform::Node => "node",
        }
    }
}

impl FromStr for Platform {
    type Err = PlatformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "common" => Ok(Platform::Common),
            "browser" => Ok(Platform::Browser),
            "node" => Ok(Platform::Node),
            _ => Err(PlatformError(s.to_string())),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Outline {
    /// A new application depending only on core.
    pub fn default_application(gren_version: Version, platform: Platform) -> Self {
        let mut direct = BTreeMap::new();
        direct.insert(PackageName::core(), CORE_VERSION);

        Outline::App(AppOutline {
            gren_version,
            platform,
            source_dirs: NonEmpty::singleton(SrcDir::Relative(PathBuf::from("src"))),
            direct,
            indirect: BTreeMap::new(),
        })
    }

    /// A new package depending only on core.
    pub fn default_package(name: PackageName, gren_version: Version, platform: Platform) -> Self {
        let mut dependencies = BTreeMap::new();
        if !name.is_core() {
            dependencies.insert(
                PackageName::core(),
                Constraint::until_next_major(&CORE_VERSION),
            );
        }

        Outline::Pkg(PkgOutline {
            name,
            summary: "helpful summary of your project, less than 80 characters".to_string(),
            license: License::default(),
            version: Version::new(1, 0, 0),
            exposed: Exposed::List(Vec::new()),
            dependencies,
            gren_version: Constraint::until_next_major(&gren_version),
            platform,
        })
    }

    /// Directories searched for modules, in order.
    pub fn source_dirs(&self) -> NonEmpty<SrcDir> {
        match self {
            Outline::App(app) => app.source_dirs.clone(),
            Outline::Pkg(_) => NonEmpty::singleton(SrcDir::Relative(PathBuf::from("src"))),
        }
    }

    /// Directories searched for tests.
    pub fn test_dirs(&self) -> NonEmpty<SrcDir> {
        match self {
            Outline::App(_) | Outline::Pkg(_) => {
                NonEmpty::singleton(SrcDir::Relative(PathBuf::from("tests")))
            }
        }
    }

    pub fn platform(&self) -> Platform {
        match self {
            Outline::App(app) => app.platform,
            Outline::Pkg(pkg) => pkg.platform,
        }
    }

    /// The package name, for package outlines.
    pub fn name(&self) -> Option<&PackageName> {
        match self {
            Outline::App(_) => None,
            Outline::Pkg(pkg) => Some(&pkg.name),
        }
    }

    /// Whether the outline depends on core the way its kind requires.
    ///
    /// Applications must list core as a direct dependency. Packages must list
    /// it unless they are core.
    pub fn has_core_dependency(&self) -> bool {
        let core = PackageName::core();
        match self {
            Outline::App(app) => app.direct.contains_key(&core),
            Outline::Pkg(pkg) => pkg.name.is_core() || pkg.dependencies.contains_key(&core),
        }
    }

    /// `"application"` or `"package"`.
    pub fn kind(&self) -> &'static str {
        match self {
            Outline::App(_) => "application",
            Outline::Pkg(_) => "package",
        }
    }
}
