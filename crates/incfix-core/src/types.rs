//! Core type definitions

use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

/// A single file discovered under the source root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Path as discovered during the walk
    pub full_path: PathBuf,
    /// Path relative to the source root, always `/`-separated
    pub relative_path: String,
    /// Text after the last `.` of the file name
    pub extension: String,
    /// Text after the last `/`
    pub base_name: String,
}

impl FileRecord {
    /// Build a record for `path` discovered under `root`.
    ///
    /// The root prefix is stripped when present, otherwise a leading `./`
    /// is dropped, otherwise the path is kept as given.
    pub fn new(root: &Path, path: &Path) -> Self {
        let relative = path
            .strip_prefix(root)
            .or_else(|_| path.strip_prefix("."))
            .unwrap_or(path);

        let relative_path = to_slash(relative);
        let base_name = base_name_of(&relative_path).to_string();
        let extension = extension_of(&base_name).to_string();

        Self {
            full_path: path.to_path_buf(),
            relative_path,
            extension,
            base_name,
        }
    }

    /// Whether the record's extension is one of `extensions`
    pub fn has_extension(&self, extensions: &[String]) -> bool {
        extensions.iter().any(|e| *e == self.extension)
    }
}

/// Last `/`-separated component of `path`, or the whole string
pub fn base_name_of(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Text after the last `.` of `name`, empty when there is none
pub fn extension_of(name: &str) -> &str {
    name.rfind('.').map(|pos| &name[pos + 1..]).unwrap_or("")
}

fn to_slash(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            Component::ParentDir => Some("..".to_string()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
