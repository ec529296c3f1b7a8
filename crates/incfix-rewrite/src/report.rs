//! Run accounting

use crate::guard::GuardOutcome;
use serde::Serialize;
use std::path::PathBuf;

/// An include whose name could not be mapped to an indexed file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnresolvedInclude {
    pub file: PathBuf,
    /// 1-based
    pub line: usize,
    /// Text between the quotes as written
    pub quoted: String,
}

/// Result of rewriting the includes of one file
#[derive(Debug, Clone, Default, Serialize)]
pub struct FileOutcome {
    pub path: PathBuf,
    /// Content differs from what was read
    pub changed: bool,
    /// Includes resolved through the index
    pub resolved: usize,
    pub unresolved: Vec<UnresolvedInclude>,
}

/// Summary of a full pass
#[derive(Debug, Clone, Default, Serialize)]
pub struct RewriteReport {
    pub dry_run: bool,
    pub files_scanned: usize,
    pub files_changed: usize,
    pub includes_resolved: usize,
    pub unresolved: Vec<UnresolvedInclude>,
    pub guarded: Vec<PathBuf>,
    pub already_guarded: Vec<PathBuf>,
}

impl RewriteReport {
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Self::default()
        }
    }

    /// Fold one file's outcome into the totals
    pub fn record_file(&mut self, outcome: FileOutcome) {
        self.files_scanned += 1;
        if outcome.changed {
            self.files_changed += 1;
        }
        self.includes_resolved += outcome.resolved;
        self.unresolved.extend(outcome.unresolved);
    }

    pub fn record_guard(&mut self, path: PathBuf, outcome: GuardOutcome) {
        match outcome {
            GuardOutcome::Wrapped => self.guarded.push(path),
            GuardOutcome::AlreadyGuarded => self.already_guarded.push(path),
        }
    }
}
