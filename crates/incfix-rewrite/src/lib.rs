//! incfix Rewrite
//!
//! Relocates quoted `#include` directives and guards platform-incompatible
//! sources.
//!
//! ## Modules
//!
//! - `directive` - Recognizes `#include "..."` lines
//! - `rewriter` - Include rewriting driver built on a [`FileIndex`]
//! - `guard` - `#ifndef` exclusion guards
//! - `report` - Per-file and per-run accounting

pub mod directive;
pub mod guard;
pub mod report;
pub mod rewriter;

pub use directive::{IncludeDirective, IncludeParser};
pub use guard::{resolve_under, Guard, GuardOutcome};
pub use incfix_index::FileIndex;
pub use report::{FileOutcome, RewriteReport, UnresolvedInclude};
pub use rewriter::{RewriteOptions, Rewriter};
