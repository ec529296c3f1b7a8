//! Configuration types

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Files that do not build for the embedded target
pub const DEFAULT_EXCLUDED_FILES: &[&str] = &[
    "audio/au_alsa.c",
    "audio/au_oss.c",
    "audio/au_palmos.c",
    "audio/au_pulseaudio.c",
    "audio/au_sun.c",
    "audio/au_win.c",
    "audio/au_wince.c",
    "utils/cst_file_palmos.c",
    "utils/cst_file_wince.c",
    "utils/cst_mmap_posix.c",
    "utils/cst_mmap_win32.c",
];

/// incfix configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where the source tree lives
    pub project: ProjectConfig,

    /// File index configuration
    pub index: IndexConfig,

    /// Include rewrite configuration
    pub rewrite: RewriteConfig,

    /// Exclusion guard configuration
    pub guard: GuardConfig,
}

impl Config {
    /// Load a configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| Error::file_io(path, e))?;
        Self::from_yaml(&text)
    }

    /// Parse a configuration from YAML text
    pub fn from_yaml(text: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(text)
            .map_err(|e| Error::Config(format!("invalid YAML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the rewrite pass cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.rewrite.extensions.is_empty() {
            return Err(Error::Config("rewrite.extensions must not be empty".into()));
        }
        if self.guard.symbol.trim().is_empty() {
            return Err(Error::Config("guard.symbol must not be empty".into()));
        }
        if self.project.name.is_empty() {
            return Err(Error::Config("project.name must not be empty".into()));
        }
        Ok(())
    }
}

/// Project location configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Project directory name searched for in the working directory
    pub name: String,

    /// Source directory below the project directory
    pub source_dir: PathBuf,

    /// Explicit source root, bypasses the working directory lookup
    pub root: Option<PathBuf>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: "flite".into(),
            source_dir: PathBuf::from("src"),
            root: None,
        }
    }
}

impl ProjectConfig {
    /// Determine the source root relative to `cwd`.
    ///
    /// When `cwd` contains the project name as a path component, the path is
    /// cut right after it and `source_dir` is appended. Otherwise `cwd` itself
    /// is the root.
    pub fn locate_root(&self, cwd: &Path) -> PathBuf {
        if let Some(root) = &self.root {
            return if root.is_absolute() {
                root.clone()
            } else {
                cwd.join(root)
            };
        }

        let mut project_dir = PathBuf::new();
        let mut found = false;
        for component in cwd.components() {
            project_dir.push(component);
            if component.as_os_str() == self.name.as_str() {
                found = true;
                break;
            }
        }

        if found {
            project_dir.join(&self.source_dir)
        } else {
            cwd.to_path_buf()
        }
    }
}

/// File index configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Follow symbolic links while walking
    pub follow_symlinks: bool,

    /// Index dotfiles and dot-directories
    pub include_hidden: bool,
}

/// Include rewrite configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RewriteConfig {
    /// File extensions whose includes are rewritten
    pub extensions: Vec<String>,

    /// Run resolution and diagnostics without writing anything
    pub dry_run: bool,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["c".into(), "h".into()],
            dry_run: false,
        }
    }
}

/// Exclusion guard configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardConfig {
    /// Macro tested by the `#ifndef` guard
    pub symbol: String,

    /// Files to wrap, relative to the source root
    pub files: Vec<PathBuf>,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            symbol: "ARDUINO".into(),
            files: DEFAULT_EXCLUDED_FILES.iter().map(PathBuf::from).collect(),
        }
    }
}
