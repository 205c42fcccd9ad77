//! Built-in `.gitattributes` templates.
//!
//! Template content is embedded at compile time and emitted verbatim: the
//! bytes written to a project are the bytes in `templates/`.

use crate::error::{GitattrsError, Result};
use crate::parse::Document;

pub const DEFAULT_TEMPLATE: &str = "go";

/// Commands to run after a new attributes file lands in an existing repo.
pub const RENORMALIZE_HINT: &[&str] = &[
    "git add --renormalize .",
    "git commit -m \"chore: normalize line endings\"",
];

#[derive(Debug)]
pub struct Template {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub description: &'static str,
    pub content: &'static str,
}

impl Template {
    pub fn answers_to(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
            || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(name))
    }

    pub fn document(&self) -> Result<Document> {
        Document::parse(self.content)
    }
}

static TEMPLATES: &[Template] = &[Template {
    name: "go",
    aliases: &["golang"],
    description: "Go sources, module files, tooling config and common binaries",
    content: include_str!("../../templates/gitattributes.go"),
}];

pub fn all() -> &'static [Template] {
    TEMPLATES
}

pub fn find(name: &str) -> Result<&'static Template> {
    TEMPLATES
        .iter()
        .find(|t| t.answers_to(name))
        .ok_or_else(|| GitattrsError::UnknownTemplate(name.to_string()))
}
