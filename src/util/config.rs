//! Configuration file support for gren-outline.
//!
//! Two configuration file locations are read:
//! - Global: `config.toml` in the platform config directory, or the file
//!   named by `GREN_OUTLINE_CONFIG`
//! - Project: `.gren/outline.toml` under the project root
//!
//! Project config takes precedence over global config.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::outline::encode::DEFAULT_INDENT;
use crate::core::outline::Platform;

/// Environment variable naming an explicit global config file.
pub const CONFIG_ENV: &str = "GREN_OUTLINE_CONFIG";

/// gren-outline configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output settings for `fmt` and `init`
    pub format: FormatConfig,

    /// Defaults for new projects
    pub init: InitConfig,
}

/// How outlines are written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    /// Spaces per indentation level (None = 4)
    pub indent: Option<usize>,
}

/// Defaults used by `init`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InitConfig {
    /// Platform for new projects (None = browser)
    pub platform: Option<Platform>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.format.indent.is_some() {
            self.format.indent = other.format.indent;
        }
        if other.init.platform.is_some() {
            self.init.platform = other.init.platform;
        }
    }

    /// Spaces per indentation level when writing `gren.json`.
    pub fn indent(&self) -> usize {
        self.format.indent.unwrap_or(DEFAULT_INDENT)
    }

    /// Platform for new projects.
    pub fn platform(&self) -> Platform {
        self.init.platform.unwrap_or_default()
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.gren/outline.toml)
/// 2. Global config
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global_path) = global_path {
        config.merge(Config::load_or_default(global_path));
    }
    config.merge(Config::load_or_default(project_path));

    config
}

/// Get the global config path, honouring `GREN_OUTLINE_CONFIG`.
pub fn global_config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    directories::ProjectDirs::from("org", "gren-lang", "gren-outline")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Get the project config path (.gren/outline.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".gren").join("outline.toml")
}

/// Load the configuration that applies to `project_root`.
pub fn discover(project_root: &Path) -> Config {
    let global = global_config_path();
    let config = load_config(global.as_deref(), &project_config_path(project_root));
    tracing::debug!(
        "Using indent {} and platform {}",
        config.indent(),
        config.platform()
    );
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.indent(), 4);
        assert_eq!(config.platform(), Platform::Browser);
    }

    #[test]
    fn test_config_load() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");

        std::fs::write(
            &config_path,
            r#"
[format]
indent = 2

[init]
platform = "node"
"#,
        )
        .unwrap();

        let config = Config::load(&config_path).unwrap();
        assert_eq!(config.indent(), 2);
        assert_eq!(config.platform(), Platform::Node);
    }

    #[test]
    fn test_malformed_config_falls_back_to_defaults() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        std::fs::write(&config_path, "[init]\nplatform = \"deno\"\n").unwrap();

        assert!(Config::load(&config_path).is_err());
        assert_eq!(Config::load_or_default(&config_path), Config::default());
    }

    #[test]
    fn test_load_config_precedence() {
        let tmp = TempDir::new().unwrap();
        let global_path = tmp.path().join("global.toml");
        let project_path = tmp.path().join("project.toml");

        std::fs::write(&global_path, "[format]\nindent = 2\n\n[init]\nplatform = \"node\"\n")
            .unwrap();
        std::fs::write(&project_path, "[init]\nplatform = \"common\"\n").unwrap();

        let config = load_config(Some(&global_path), &project_path);

        // Global indent is kept, project platform wins
        assert_eq!(config.indent(), 2);
        assert_eq!(config.platform(), Platform::Common);
    }

    #[test]
    fn test_missing_files_use_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(None, &project_config_path(tmp.path()));
        assert_eq!(config, Config::default());
    }
}
