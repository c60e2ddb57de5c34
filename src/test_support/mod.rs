//! Test utilities and mocks for gren-outline unit tests.
//!
//! This module provides an in-memory filesystem so validation can be
//! tested without touching disk, plus sample outlines in [`fixtures`].
//!
//! # Example
//!
//! ```rust,ignore
//! use gren_outline::test_support::MockFileSystem;
//!
//! #[test]
//! fn test_example() {
//!     let mut fs = MockFileSystem::new();
//!     fs.add_file("/p/gren.json", fixtures::APPLICATION);
//!     fs.add_dir("/p/src");
//!     fs.add_symlink("/p/lib", "/p/src");
//!
//!     // Use the mock with ops::load or ops::validate...
//! }
//! ```

pub mod fixtures;

use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::util::fs::FileSystem;

/// Links followed before giving up, as a loop guard.
const MAX_LINKS: usize = 40;

/// Mock filesystem for testing without real I/O.
///
/// Paths are expected to be absolute. Symlinks may point at absolute paths
/// or at paths relative to the directory containing the link.
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    files: HashMap<PathBuf, String>,
    dirs: HashSet<PathBuf>,
    links: HashMap<PathBuf, PathBuf>,
}

impl MockFileSystem {
    /// Create a new empty mock filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file with the given content.
    pub fn add_file(&mut self, path: impl AsRef<Path>, content: impl Into<String>) {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            self.add_dir(parent);
        }
        self.files.insert(path, content.into());
    }

    /// Add a directory and all of its parents.
    pub fn add_dir(&mut self, path: impl AsRef<Path>) {
        for ancestor in path.as_ref().ancestors() {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            self.dirs.insert(ancestor.to_path_buf());
        }
    }

    /// Add a symlink at `link` pointing at `target`.
    pub fn add_symlink(&mut self, link: impl AsRef<Path>, target: impl AsRef<Path>) {
        let link = link.as_ref().to_path_buf();
        if let Some(parent) = link.parent() {
            self.add_dir(parent);
        }
        self.links.insert(link, target.as_ref().to_path_buf());
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path) || self.dirs.contains(path)
    }

    fn resolve(&self, path: &Path, budget: &mut usize) -> io::Result<PathBuf> {
        let mut resolved = PathBuf::new();

        for component in path.components() {
            match component {
                Component::Prefix(_) | Component::RootDir => resolved.push(component),
                Component::CurDir => {}
                Component::ParentDir => {
                    resolved.pop();
                }
                Component::Normal(name) => {
                    resolved.push(name);
                    if let Some(target) = self.links.get(&resolved) {
                        if *budget == 0 {
                            return Err(io::Error::new(
                                io::ErrorKind::Other,
                                format!("too many levels of symbolic links: {}", path.display()),
                            ));
                        }
                        *budget -= 1;

                        resolved.pop();
                        let target = resolved.join(target);
                        resolved = self.resolve(&target, budget)?;
                    }
                }
            }
        }

        Ok(resolved)
    }
}

impl FileSystem for MockFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let path = self.canonicalize(path)?;
        self.files.get(&path).cloned().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("not a file: {}", path.display()))
        })
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.canonicalize(path)
            .map(|path| self.dirs.contains(&path))
            .unwrap_or(false)
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        let mut budget = MAX_LINKS;
        let resolved = self.resolve(path, &mut budget)?;
        if self.exists(&resolved) {
            Ok(resolved)
        } else {
            Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such file or directory: {}", path.display()),
            ))
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_mock_filesystem() {
        let mut fs = MockFileSystem::new();
        fs.add_file("/p/gren.json", "{}");

        assert!(fs.is_dir(Path::new("/p")));
        assert!(!fs.is_dir(Path::new("/p/gren.json")));
        assert_eq!(fs.read_to_string(Path::new("/p/gren.json")).unwrap(), "{}");

        let err = fs.read_to_string(Path::new("/p/missing.json")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_canonicalize_follows_symlinks() {
        let mut fs = MockFileSystem::new();
        fs.add_dir("/p/src");
        fs.add_symlink("/p/lib", "src");
        fs.add_symlink("/p/abs", "/p/src");
        fs.add_symlink("/p/chain", "lib");

        let src = PathBuf::from("/p/src");
        assert_eq!(fs.canonicalize(Path::new("/p/lib")).unwrap(), src);
        assert_eq!(fs.canonicalize(Path::new("/p/abs")).unwrap(), src);
        assert_eq!(fs.canonicalize(Path::new("/p/chain")).unwrap(), src);
        assert_eq!(fs.canonicalize(Path::new("/p/./src/../src")).unwrap(), src);
        assert!(fs.is_dir(Path::new("/p/lib")));
    }

    #[test]
    fn test_symlink_loop_is_an_error() {
        let mut fs = MockFileSystem::new();
        fs.add_symlink("/p/a", "b");
        fs.add_symlink("/p/b", "a");

        assert!(fs.canonicalize(Path::new("/p/a")).is_err());
        assert!(!fs.is_dir(Path::new("/p/a")));
    }
}
