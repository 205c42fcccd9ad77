//! # Attribute resolution
//!
//! Answers "what does git think of this path?" for a parsed [`Document`].
//!
//! Rules are applied in file order and, per attribute, the last matching rule
//! wins. This is git's behavior, not something the file enforces, which is
//! why a catch-all `*` rule has to come first to act as a default.
//!
//! Pattern semantics follow gitattributes:
//! - a pattern without `/` matches the file name at any depth
//! - a pattern with `/` is matched against the whole path, relative to the
//!   directory holding the `.gitattributes` file (a leading `/` is dropped)
//! - `*` and `?` stop at `/`, `**` crosses directories
//! - directory patterns (trailing `/`) never match a file
//! - negative patterns (`!foo`) are not allowed

use crate::error::{GitattrsError, Result};
use crate::model::Attribute;
use crate::parse::Document;
use glob::{MatchOptions, Pattern};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

#[derive(Debug, Clone)]
pub struct RuleMatcher {
    glob: Pattern,
    basename_only: bool,
    dir_only: bool,
}

impl RuleMatcher {
    pub fn new(pattern: &str) -> Result<Self> {
        let invalid = |reason: &str| GitattrsError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        };

        if pattern.starts_with('!') {
            return Err(invalid("negative patterns are not allowed in .gitattributes"));
        }

        let dir_only = pattern.len() > 1 && pattern.ends_with('/');
        let body = pattern.trim_end_matches('/');
        let basename_only = !body.contains('/') && !pattern.starts_with('/');
        let anchored = body.strip_prefix('/').unwrap_or(body);

        let glob = Pattern::new(&to_glob(anchored)).map_err(|e| invalid(e.msg))?;

        Ok(Self {
            glob,
            basename_only,
            dir_only,
        })
    }

    /// `path` is relative to the directory of the attributes file.
    pub fn matches(&self, path: &str) -> bool {
        if self.dir_only {
            return false;
        }
        let path = normalize_path(path);
        if self.basename_only {
            let name = path.rsplit('/').next().unwrap_or(&path);
            self.glob.matches_with(name, MATCH_OPTIONS)
        } else {
            self.glob.matches_with(&path, MATCH_OPTIONS)
        }
    }
}

/// Rewrite gitattributes glob syntax into what `glob::Pattern` accepts.
///
/// - `\x` matches `x` literally; metacharacters become one-char classes
/// - a star run that is not a whole path component is a plain `*`
/// - `[^...]` negates a class like `[!...]`
fn to_glob(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len());
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '\\' => match chars.get(i + 1) {
                Some(&c) => {
                    push_literal(&mut out, c);
                    i += 2;
                }
                None => {
                    out.push('\\');
                    i += 1;
                }
            },
            '*' => {
                let start = i;
                while chars.get(i) == Some(&'*') {
                    i += 1;
                }
                let component_start = start == 0 || chars[start - 1] == '/';
                let component_end = i == chars.len() || chars[i] == '/';
                if i - start >= 2 && component_start && component_end {
                    out.push_str("**");
                } else {
                    out.push('*');
                }
            }
            '[' => match class_end(&chars, i) {
                Some(end) => {
                    push_class(&mut out, &chars[i + 1..end]);
                    i = end + 1;
                }
                None => {
                    push_literal(&mut out, '[');
                    i += 1;
                }
            },
            c => {
                out.push(c);
                i += 1;
            }
        }
    }
    out
}

fn push_literal(out: &mut String, c: char) {
    if matches!(c, '*' | '?' | '[' | ']') {
        out.push('[');
        out.push(c);
        out.push(']');
    } else {
        out.push(c);
    }
}

/// Index of the `]` closing the class opened at `open`.
fn class_end(chars: &[char], open: usize) -> Option<usize> {
    let mut i = open + 1;
    if matches!(chars.get(i), Some('!' | '^')) {
        i += 1;
    }
    // A leading `]` is a member, not the end
    if chars.get(i) == Some(&']') {
        i += 1;
    }
    while i < chars.len() {
        match chars[i] {
            '\\' => i += 2,
            ']' => return Some(i),
            _ => i += 1,
        }
    }
    None
}

fn push_class(out: &mut String, body: &[char]) {
    out.push('[');
    let mut rest = body;
    if let Some((&first, tail)) = body.split_first() {
        if first == '^' || first == '!' {
            out.push('!');
            rest = tail;
        }
    }
    let mut iter = rest.iter();
    while let Some(&c) = iter.next() {
        if c == '\\' {
            if let Some(&escaped) = iter.next() {
                out.push(escaped);
            }
        } else {
            out.push(c);
        }
    }
    out.push(']');
}

fn normalize_path(path: &str) -> String {
    let path = path.replace('\\', "/");
    let mut trimmed = path.as_str();
    while let Some(rest) = trimmed.strip_prefix("./") {
        trimmed = rest;
    }
    trimmed.trim_start_matches('/').to_string()
}

/// Outcome of one attribute for one path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "state", content = "value")]
pub enum AttrState {
    Set,
    Unset,
    Value(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolved {
    #[serde(flatten)]
    pub state: AttrState,
    /// Line of the rule that decided this attribute.
    pub line: usize,
}

/// Macros git knows without a definition.
fn builtin_macros() -> HashMap<String, Vec<Attribute>> {
    let mut macros = HashMap::new();
    macros.insert(
        "binary".to_string(),
        vec![
            Attribute::Unset("diff".to_string()),
            Attribute::Unset("merge".to_string()),
            Attribute::Unset("text".to_string()),
        ],
    );
    macros
}

/// Builtins plus every `[attr]` line; a later definition replaces an
/// earlier one.
fn macro_table(doc: &Document) -> HashMap<String, Vec<Attribute>> {
    let mut macros = builtin_macros();
    for def in doc.macros() {
        macros.insert(def.name.clone(), def.attributes.clone());
    }
    macros
}

/// Resolve every attribute that applies to `path`.
///
/// Matching rules are visited from the bottom of the file up, and each
/// rule's attributes from right to left. The first decision seen for a
/// name is final, which is the same as "last match wins" read top-down.
/// A macro expands only at the moment it is itself decided as set, so a
/// later `-binary` or `!binary` leaves `diff`, `merge` and `text` alone.
pub fn resolve(doc: &Document, path: &str) -> Result<BTreeMap<String, Resolved>> {
    let macros = macro_table(doc);
    let mut decided: BTreeMap<String, Option<Resolved>> = BTreeMap::new();

    for line in doc.lines().iter().rev() {
        let Some(rule) = line.rule() else {
            continue;
        };
        if !RuleMatcher::new(&rule.pattern)?.matches(path) {
            continue;
        }
        debug!(path, pattern = %rule.pattern, line = line.number, "rule matches");
        fill(&mut decided, &macros, &rule.attributes, line.number);
    }

    // `None` marks an attribute explicitly left unspecified
    Ok(decided
        .into_iter()
        .filter_map(|(name, resolved)| resolved.map(|r| (name, r)))
        .collect())
}

fn fill(
    decided: &mut BTreeMap<String, Option<Resolved>>,
    macros: &HashMap<String, Vec<Attribute>>,
    attributes: &[Attribute],
    line: usize,
) {
    for attr in attributes.iter().rev() {
        let name = attr.name();
        if decided.contains_key(name) {
            continue;
        }
        let state = match attr {
            Attribute::Set(_) => Some(AttrState::Set),
            Attribute::Unset(_) => Some(AttrState::Unset),
            Attribute::Value(_, value) => Some(AttrState::Value(value.clone())),
            Attribute::Unspecified(_) => None,
        };
        decided.insert(
            name.to_string(),
            state.map(|state| Resolved { state, line }),
        );

        // Every expansion decides a new name first, so cycles stop
        if let (Attribute::Set(_), Some(expansion)) = (attr, macros.get(name)) {
            fill(decided, macros, expansion, line);
        }
    }
}
