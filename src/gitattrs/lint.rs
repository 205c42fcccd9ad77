//! Lenient pass over a `.gitattributes` file that collects every problem
//! instead of stopping at the first one.

use crate::matcher::RuleMatcher;
use crate::model::{Attribute, LineKind};
use crate::parse::{numbered_lines, parse_line};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Attribute names git (and GitHub's linguist) give meaning to.
const KNOWN_ATTRIBUTES: &[&str] = &[
    "text",
    "binary",
    "eol",
    "crlf",
    "diff",
    "merge",
    "ident",
    "filter",
    "whitespace",
    "export-ignore",
    "export-subst",
    "delta",
    "encoding",
    "working-tree-encoding",
    "conflict-marker-size",
    "lockable",
];

const KNOWN_PREFIXES: &[&str] = &["linguist-"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub line: usize,
    pub severity: Severity,
    pub message: String,
}

impl Diagnostic {
    fn error(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            severity: Severity::Error,
            message: message.into(),
        }
    }

    fn warning(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            severity: Severity::Warning,
            message: message.into(),
        }
    }
}

pub fn has_errors(diagnostics: &[Diagnostic]) -> bool {
    diagnostics.iter().any(|d| d.severity == Severity::Error)
}

fn is_known(name: &str, macros: &HashSet<String>) -> bool {
    KNOWN_ATTRIBUTES.contains(&name)
        || KNOWN_PREFIXES.iter().any(|p| name.starts_with(p))
        || macros.contains(name)
}

/// Lint raw file content. Bytes that are not UTF-8 get one warning, on the
/// line where they first appear, and are read as U+FFFD from there on.
pub fn lint_bytes(content: &[u8]) -> Vec<Diagnostic> {
    let mut diagnostics = lint(&String::from_utf8_lossy(content));
    if let Err(e) = std::str::from_utf8(content) {
        let before = &content[..e.valid_up_to()];
        let line = before.iter().filter(|&&b| b == b'\n').count() + 1;
        diagnostics.push(Diagnostic::warning(
            line,
            "line is not valid UTF-8; invalid bytes were read as U+FFFD",
        ));
        diagnostics.sort_by_key(|d| d.line);
    }
    diagnostics
}

pub fn lint(text: &str) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    // Macros apply wherever they are defined in the file
    let macros: HashSet<String> = numbered_lines(text)
        .filter_map(|(_, raw)| match parse_line(raw) {
            Ok(LineKind::Macro(def)) => Some(def.name),
            _ => None,
        })
        .collect();
    let mut seen_patterns: HashMap<String, usize> = HashMap::new();
    let mut first_specific_rule: Option<usize> = None;

    for (number, raw) in numbered_lines(text) {
        let kind = match parse_line(raw) {
            Ok(kind) => kind,
            Err(e) => {
                diagnostics.push(Diagnostic::error(number, e.to_string()));
                continue;
            }
        };

        let (pattern, attributes) = match kind {
            LineKind::Blank | LineKind::Comment | LineKind::Macro(_) => continue,
            LineKind::Rule(rule) => (rule.pattern, rule.attributes),
        };

        if let Err(e) = RuleMatcher::new(&pattern) {
            diagnostics.push(Diagnostic::error(number, e.to_string()));
            continue;
        }

        if pattern.len() > 1 && pattern.ends_with('/') {
            diagnostics.push(Diagnostic::warning(
                number,
                format!(
                    "directory pattern '{}' never matches files; use '{}**'",
                    pattern, pattern
                ),
            ));
        }

        if pattern == "*" {
            if let Some(first) = first_specific_rule {
                diagnostics.push(Diagnostic::warning(
                    number,
                    format!(
                        "catch-all '*' rule overrides the rules from line {} onward; move it to the top",
                        first
                    ),
                ));
            }
        } else if first_specific_rule.is_none() {
            first_specific_rule = Some(number);
        }

        if let Some(previous) = seen_patterns.insert(pattern.clone(), number) {
            diagnostics.push(Diagnostic::warning(
                number,
                format!("pattern '{}' already appears on line {}", pattern, previous),
            ));
        }

        for attr in &attributes {
            if !is_known(attr.name(), &macros) {
                diagnostics.push(Diagnostic::warning(
                    number,
                    format!("unknown attribute '{}'", attr.name()),
                ));
            }
            if let Attribute::Value(name, value) = attr {
                if name == "eol" && value != "lf" && value != "crlf" {
                    diagnostics.push(Diagnostic::warning(
                        number,
                        format!("eol must be 'lf' or 'crlf', got '{}'", value),
                    ));
                }
            }
        }
    }

    diagnostics
}
