//! Quoted include directive parsing
//!
//! Only lines that start with the literal `#include ` followed by a
//! double-quoted name are recognized. Angle-bracket includes, computed
//! includes and anything else are left alone.

use incfix_core::types::base_name_of;
use regex::Regex;

/// A parsed `#include "..."` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeDirective<'a> {
    /// Text between the quotes, untouched
    pub quoted: &'a str,
    /// Bare file name referenced by the directive, empty when the quotes
    /// hold nothing but whitespace or end in `/`
    pub name: &'a str,
    /// Whatever follows the closing quote (comments, stray spaces)
    pub trailing: &'a str,
}

impl<'a> IncludeDirective<'a> {
    /// Render a bare directive pointing at `path`, without terminator
    pub fn with_path(&self, path: &str) -> String {
        format!("#include \"{}\"", path)
    }

    /// Whether anything other than blanks follows the closing quote
    pub fn has_trailing_text(&self) -> bool {
        !self.trailing.trim().is_empty()
    }
}

/// Matcher for quoted include lines
pub struct IncludeParser {
    pattern: Regex,
}

impl IncludeParser {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(r#"^#include [ \t]*"([^"]*)"(.*)$"#)
                .expect("include pattern is a valid regex"),
        }
    }

    /// Parse a single line with its terminator already removed
    pub fn parse<'a>(&self, line: &'a str) -> Option<IncludeDirective<'a>> {
        let caps = self.pattern.captures(line)?;
        let quoted = caps.get(1)?.as_str();
        let trailing = caps.get(2).map_or("", |m| m.as_str());

        Some(IncludeDirective {
            quoted,
            name: base_name_of(quoted.trim()).trim(),
            trailing,
        })
    }
}

impl Default for IncludeParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Split a line into its content and its terminator (`\n`, `\r\n` or none)
pub fn split_terminator(line: &str) -> (&str, &str) {
    if let Some(body) = line.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = line.strip_suffix('\n') {
        (body, "\n")
    } else {
        (line, "")
    }
}
