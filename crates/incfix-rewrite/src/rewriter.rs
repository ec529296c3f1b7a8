//! Include rewriting driver
//!
//! Maps every quoted include back onto the index and rewrites it to the
//! referenced file's path relative to the source root.

use crate::directive::{split_terminator, IncludeParser};
use crate::guard::{resolve_under, Guard, GuardOutcome};
use crate::report::{FileOutcome, RewriteReport, UnresolvedInclude};
use incfix_core::{Config, Error, Result};
use incfix_index::FileIndex;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Options for a rewrite pass
#[derive(Debug, Clone)]
pub struct RewriteOptions {
    /// Extensions of files whose includes are rewritten
    pub extensions: Vec<String>,
    /// Resolve and report only, write nothing
    pub dry_run: bool,
    /// Symbol used by the exclusion guard
    pub guard_symbol: String,
}

impl Default for RewriteOptions {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for RewriteOptions {
    fn from(config: &Config) -> Self {
        Self {
            extensions: config.rewrite.extensions.clone(),
            dry_run: config.rewrite.dry_run,
            guard_symbol: config.guard.symbol.clone(),
        }
    }
}

/// Rewrites includes and applies exclusion guards using a built index
pub struct Rewriter<'a> {
    index: &'a FileIndex,
    parser: IncludeParser,
    guard: Guard,
    options: RewriteOptions,
}

impl<'a> Rewriter<'a> {
    pub fn new(index: &'a FileIndex, options: RewriteOptions) -> Self {
        Self {
            index,
            parser: IncludeParser::new(),
            guard: Guard::new(&options.guard_symbol),
            options,
        }
    }

    /// Guard every file in `exclusions`, then rewrite the includes of every
    /// indexed file with a matching extension.
    ///
    /// Stops at the first I/O error; files handled before it stay modified.
    pub fn run(&self, exclusions: &[PathBuf]) -> Result<RewriteReport> {
        let mut report = RewriteReport::new(self.options.dry_run);

        for file in exclusions {
            let outcome = self.exclude_file(file)?;
            report.record_guard(file.clone(), outcome);
        }

        for name in self.index.list_names() {
            let record = self.index.resolve(name)?;
            if !record.has_extension(&self.options.extensions) {
                continue;
            }
            info!("Processing {} ...", record.full_path.display());
            let outcome = self.rewrite_includes(&record.full_path)?;
            report.record_file(outcome);
        }

        info!(
            "Rewrote {} of {} files ({} includes resolved, {} unresolved), guarded {} file(s)",
            report.files_changed,
            report.files_scanned,
            report.includes_resolved,
            report.unresolved.len(),
            report.guarded.len()
        );

        Ok(report)
    }

    /// Rewrite the quoted includes of one file in place
    pub fn rewrite_includes(&self, path: &Path) -> Result<FileOutcome> {
        let source = std::fs::read_to_string(path).map_err(|e| Error::file_io(path, e))?;
        let (rewritten, outcome) = self.rewrite_source(&source, path);

        if outcome.changed {
            if self.options.dry_run {
                debug!("Dry run, not writing {}", path.display());
            } else {
                std::fs::write(path, rewritten).map_err(|e| Error::file_io(path, e))?;
            }
        }

        Ok(outcome)
    }

    /// Rewrite the quoted includes of `source`, which was read from `path`.
    ///
    /// A resolved line becomes exactly `#include "<relative_path>"` with its
    /// original terminator, or `\n` when it had none. Lines with text after
    /// the closing quote are left as they are.
    pub fn rewrite_source(&self, source: &str, path: &Path) -> (String, FileOutcome) {
        let mut out = String::with_capacity(source.len());
        let mut outcome = FileOutcome {
            path: path.to_path_buf(),
            ..FileOutcome::default()
        };

        for (i, line) in source.split_inclusive('\n').enumerate() {
            let (body, terminator) = split_terminator(line);

            let Some(directive) = self.parser.parse(body) else {
                out.push_str(line);
                continue;
            };

            let record = self
                .index
                .get(directive.name)
                .filter(|_| !directive.name.is_empty() && !directive.has_trailing_text());

            match record {
                Some(record) => {
                    info!("{} -> {}", directive.name, record.relative_path);
                    out.push_str(&directive.with_path(&record.relative_path));
                    out.push_str(if terminator.is_empty() { "\n" } else { terminator });
                    outcome.resolved += 1;
                }
                None => {
                    if directive.name.is_empty() || directive.has_trailing_text() {
                        warn!("Name not defined: {}:{}: {}", path.display(), i + 1, body);
                    } else {
                        warn!("Not found: {} ({}:{})", directive.name, path.display(), i + 1);
                    }
                    outcome.unresolved.push(UnresolvedInclude {
                        file: path.to_path_buf(),
                        line: i + 1,
                        quoted: directive.quoted.to_string(),
                    });
                    out.push_str(line);
                }
            }
        }

        outcome.changed = out != source;
        (out, outcome)
    }

    /// Wrap one file in the exclusion guard. Relative paths are taken from
    /// the index root.
    pub fn exclude_file(&self, path: &Path) -> Result<GuardOutcome> {
        let full_path = resolve_under(self.index.root(), path);
        self.guard.apply(&full_path, self.options.dry_run)
    }
}
