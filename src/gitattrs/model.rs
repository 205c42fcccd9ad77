//! Core data types: attributes, pattern rules and the lines that carry them.

use serde::{Serialize, Serializer};
use std::fmt;

/// One attribute token on a rule line.
///
/// The four forms mirror what git accepts: `text`, `-text`, `!text` and
/// `eol=lf`. Interpretation is left to git; we only keep the token shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Attribute {
    Set(String),
    Unset(String),
    Unspecified(String),
    Value(String, String),
}

impl Attribute {
    pub fn name(&self) -> &str {
        match self {
            Attribute::Set(name)
            | Attribute::Unset(name)
            | Attribute::Unspecified(name)
            | Attribute::Value(name, _) => name,
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Attribute::Set(name) => write!(f, "{}", name),
            Attribute::Unset(name) => write!(f, "-{}", name),
            Attribute::Unspecified(name) => write!(f, "!{}", name),
            Attribute::Value(name, value) => write!(f, "{}={}", name, value),
        }
    }
}

impl Serialize for Attribute {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A glob pattern and the attributes git applies to files it matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatternRule {
    pub pattern: String,
    pub attributes: Vec<Attribute>,
}

impl PatternRule {
    pub fn new(pattern: impl Into<String>, attributes: Vec<Attribute>) -> Self {
        Self {
            pattern: pattern.into(),
            attributes,
        }
    }

    /// The bare `*` rule, which matches every file.
    pub fn is_catch_all(&self) -> bool {
        self.pattern == "*"
    }

    pub fn attributes_text(&self) -> String {
        self.attributes
            .iter()
            .map(|a| a.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for PatternRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if needs_quoting(&self.pattern) {
            write!(f, "\"{}\"", escape_pattern(&self.pattern))?;
        } else {
            write!(f, "{}", self.pattern)?;
        }
        for attr in &self.attributes {
            write!(f, " {}", attr)?;
        }
        Ok(())
    }
}

/// Whether the pattern only survives a round trip through a rule line when
/// written in double quotes.
fn needs_quoting(pattern: &str) -> bool {
    pattern.starts_with('#')
        || pattern
            .chars()
            .any(|c| c.is_whitespace() || c.is_control() || c == '"' || c == '\\')
}

fn escape_pattern(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    for c in pattern.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            other => out.push(other),
        }
    }
    out
}

/// An `[attr]name ...` line: a named bundle of attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MacroDef {
    pub name: String,
    pub attributes: Vec<Attribute>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    Blank,
    Comment,
    Rule(PatternRule),
    Macro(MacroDef),
}

/// A parsed line together with the exact text it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// 1-based
    pub number: usize,
    pub raw: String,
    pub kind: LineKind,
}

impl Line {
    pub fn rule(&self) -> Option<&PatternRule> {
        match &self.kind {
            LineKind::Rule(rule) => Some(rule),
            _ => None,
        }
    }
}
