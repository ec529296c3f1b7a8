//! Exclusion guards
//!
//! Wraps a source file in `#ifndef <SYMBOL>` / `#endif` so it drops out of
//! builds that define the symbol.

use incfix_core::{Error, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// What happened to a file passed to the guard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardOutcome {
    /// The guard was added (or would have been, in a dry run)
    Wrapped,
    /// The first line already opens the guard
    AlreadyGuarded,
}

/// `#ifndef` guard for one preprocessor symbol
#[derive(Debug, Clone)]
pub struct Guard {
    opener: String,
}

impl Guard {
    pub fn new(symbol: &str) -> Self {
        Self {
            opener: format!("#ifndef {}", symbol),
        }
    }

    /// Whether `source` already starts with this guard
    pub fn is_guarded(&self, source: &str) -> bool {
        source.lines().next().is_some_and(|first| first.starts_with(&self.opener))
    }

    /// Wrap `source`, or return `None` when it is already guarded
    pub fn wrap(&self, source: &str) -> Option<String> {
        if self.is_guarded(source) {
            return None;
        }

        let newline = if source.contains("\r\n") { "\r\n" } else { "\n" };
        let mut out = String::with_capacity(source.len() + self.opener.len() + 16);
        out.push_str(&self.opener);
        out.push_str(newline);
        out.push_str(source);
        if !source.is_empty() && !source.ends_with('\n') {
            out.push_str(newline);
        }
        out.push_str("#endif");
        out.push_str(newline);
        Some(out)
    }

    /// Guard the file at `path` in place. Nothing is written when `dry_run`
    /// is set or the file is already guarded.
    pub fn apply(&self, path: &Path, dry_run: bool) -> Result<GuardOutcome> {
        let source = std::fs::read_to_string(path).map_err(|e| Error::file_io(path, e))?;

        let Some(wrapped) = self.wrap(&source) else {
            debug!("Already guarded: {}", path.display());
            return Ok(GuardOutcome::AlreadyGuarded);
        };

        if dry_run {
            info!("Would guard {} with {}", path.display(), self.opener);
        } else {
            std::fs::write(path, wrapped).map_err(|e| Error::file_io(path, e))?;
            info!("Guarded {} with {}", path.display(), self.opener);
        }

        Ok(GuardOutcome::Wrapped)
    }
}

/// Join a relative `file` onto `root`; absolute paths are kept as given
pub fn resolve_under(root: &Path, file: &Path) -> PathBuf {
    if file.is_absolute() {
        file.to_path_buf()
    } else {
        root.join(file)
    }
}
