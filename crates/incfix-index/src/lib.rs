//! incfix Index
//!
//! Catalogs every file under a source root by its base name so that
//! `#include "..."` references can be mapped back to a root-relative path.
//!
//! Base names are assumed to be unique across the tree. When two files share
//! one, the entry discovered last replaces the earlier one.

use incfix_core::config::IndexConfig;
use incfix_core::{Error, FileRecord, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

/// Lookup table from base name to file record
#[derive(Debug, Default)]
pub struct FileIndex {
    root: PathBuf,
    records: HashMap<String, FileRecord>,
    duplicates: usize,
}

impl FileIndex {
    /// Walk `root` recursively and index every file found.
    ///
    /// Entries are visited in file-name order, so the winner among duplicate
    /// base names is stable between runs. Any error raised by the walk aborts
    /// the build.
    pub fn build(root: &Path, options: &IndexConfig) -> Result<Self> {
        let metadata = std::fs::metadata(root).map_err(|e| Error::file_io(root, e))?;
        if !metadata.is_dir() {
            return Err(Error::file_io(
                root,
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "source root is not a directory",
                ),
            ));
        }

        info!("Indexing {}", root.display());

        let mut index = Self {
            root: root.to_path_buf(),
            ..Self::default()
        };

        let walker = WalkDir::new(root)
            .follow_links(options.follow_symlinks)
            .sort_by_file_name();

        for entry in walker {
            let entry = entry.map_err(|e| {
                let path = e
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| root.to_path_buf());
                Error::file_io(path, e.into())
            })?;

            // Dot-directories are still descended into, only dotfiles are skipped
            if !entry.file_type().is_file() || (!options.include_hidden && is_hidden(&entry)) {
                continue;
            }

            index.insert(FileRecord::new(root, entry.path()));
        }

        if index.duplicates > 0 {
            warn!(
                "{} file(s) share a base name with another file; only the last one is indexed",
                index.duplicates
            );
        }
        info!("Index has been built: {} entries", index.len());

        Ok(index)
    }

    /// Insert a record, replacing any entry with the same base name
    pub fn insert(&mut self, record: FileRecord) {
        debug!("Indexed {} -> {}", record.base_name, record.relative_path);
        if let Some(previous) = self.records.insert(record.base_name.clone(), record) {
            self.duplicates += 1;
            warn!(
                "Duplicate base name {}: {} replaced",
                previous.base_name, previous.relative_path
            );
        }
    }

    /// Look up a record by base name, failing when it is not indexed
    pub fn resolve(&self, base_name: &str) -> Result<&FileRecord> {
        self.get(base_name)
            .ok_or_else(|| Error::FileNotFound(base_name.to_string()))
    }

    /// Look up a record by base name
    pub fn get(&self, base_name: &str) -> Option<&FileRecord> {
        self.records.get(base_name)
    }

    /// All indexed base names, in no particular order
    pub fn list_names(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    /// All indexed records, in no particular order
    pub fn records(&self) -> impl Iterator<Item = &FileRecord> {
        self.records.values()
    }

    /// Root the index was built from
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Number of indexed entries
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// How many entries were replaced by a later file with the same base name
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|s| s.starts_with('.'))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_tree(files: &[&str]) -> TempDir {
        let temp = TempDir::new().unwrap();
        for file in files {
            let path = temp.path().join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, "// test\n").unwrap();
        }
        temp
    }

    #[test]
    fn test_index_empty_directory() {
        let temp = TempDir::new().unwrap();
        let index = FileIndex::build(temp.path(), &IndexConfig::default()).unwrap();
        assert!(index.is_empty());
    }

    #[test]
    fn test_index_all_extensions() {
        let temp = create_tree(&["a/foo.h", "b/foo.c", "docs/README", "data/voice.bin"]);
        let index = FileIndex::build(temp.path(), &IndexConfig::default()).unwrap();

        assert_eq!(index.len(), 4);
        assert_eq!(index.resolve("foo.h").unwrap().relative_path, "a/foo.h");
        assert_eq!(index.resolve("foo.c").unwrap().relative_path, "b/foo.c");
        assert_eq!(index.resolve("README").unwrap().extension, "");
        assert!(index.get("voice.bin").is_some());
    }

    #[test]
    fn test_directories_not_indexed() {
        let temp = create_tree(&["audio/au_none.c"]);
        let index = FileIndex::build(temp.path(), &IndexConfig::default()).unwrap();
        assert!(index.get("audio").is_none());
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_last_duplicate_wins() {
        let temp = create_tree(&["a/config.h", "b/config.h"]);
        let index = FileIndex::build(temp.path(), &IndexConfig::default()).unwrap();

        assert_eq!(index.len(), 1);
        assert_eq!(index.duplicates(), 1);
        assert_eq!(index.resolve("config.h").unwrap().relative_path, "b/config.h");
    }

    #[test]
    fn test_resolve_missing() {
        let temp = create_tree(&["a/foo.h"]);
        let index = FileIndex::build(temp.path(), &IndexConfig::default()).unwrap();
        assert!(matches!(
            index.resolve("bar.h"),
            Err(Error::FileNotFound(name)) if name == "bar.h"
        ));
    }

    #[test]
    fn test_resolve_is_stable() {
        let temp = create_tree(&["lang/usenglish/us_text.h", "cst_val.h"]);
        let index = FileIndex::build(temp.path(), &IndexConfig::default()).unwrap();

        let first = index.resolve("us_text.h").unwrap().clone();
        let second = index.resolve("us_text.h").unwrap();
        assert_eq!(&first, second);
    }

    #[test]
    fn test_dotfiles_skipped() {
        let temp = create_tree(&[".git/HEAD", ".git/.keep", ".hidden.h", "visible.h"]);

        let index = FileIndex::build(temp.path(), &IndexConfig::default()).unwrap();
        let mut names: Vec<_> = index.list_names().collect();
        names.sort();
        assert_eq!(names, vec!["HEAD", "visible.h"]);

        let options = IndexConfig {
            include_hidden: true,
            ..IndexConfig::default()
        };
        let index = FileIndex::build(temp.path(), &options).unwrap();
        assert_eq!(index.len(), 4);
    }

    #[test]
    fn test_dot_directories_walked() {
        let temp = create_tree(&[
            ".pio/libdeps/flite/cst_val.h",
            "src/cst_wave.h",
            "src/cst_val.h",
        ]);
        let index = FileIndex::build(temp.path(), &IndexConfig::default()).unwrap();

        assert_eq!(index.len(), 2);
        assert_eq!(index.duplicates(), 1);
        assert_eq!(index.resolve("cst_val.h").unwrap().relative_path, "src/cst_val.h");

        let temp = create_tree(&[".pio/libdeps/flite/cst_audio.h"]);
        let index = FileIndex::build(temp.path(), &IndexConfig::default()).unwrap();
        assert_eq!(
            index.resolve("cst_audio.h").unwrap().relative_path,
            ".pio/libdeps/flite/cst_audio.h"
        );
    }

    #[test]
    fn test_missing_root_fails() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope");
        let err = FileIndex::build(&missing, &IndexConfig::default()).unwrap_err();
        assert!(matches!(err, Error::FileIo { .. }));
    }

    #[test]
    fn test_file_root_fails() {
        let temp = create_tree(&["single.c"]);
        let single = temp.path().join("single.c");
        let err = FileIndex::build(&single, &IndexConfig::default()).unwrap_err();
        assert!(matches!(err, Error::FileIo { .. }));
    }
}
