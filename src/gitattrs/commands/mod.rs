use crate::config::GitattrsConfig;
use crate::lint::Diagnostic;
use crate::matcher::Resolved;
use crate::model::PatternRule;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

pub mod check;
pub mod config;
pub mod explain;
pub mod init;
pub mod list;
pub mod show;
pub mod status;

#[derive(Debug, Clone)]
pub struct GitattrsPaths {
    /// Directory holding `config.json`
    pub config_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TemplateSummary {
    pub name: String,
    pub aliases: Vec<String>,
    pub description: String,
    pub rule_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileState {
    /// No attributes file in the directory
    Missing,
    /// Byte-identical to the template
    UpToDate,
    /// Same rules, different comments or spacing
    Equivalent,
    Differs,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleChange {
    pub pattern: String,
    pub expected: String,
    pub actual: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub path: PathBuf,
    pub template: String,
    pub state: FileState,
    pub missing: Vec<PatternRule>,
    pub extra: Vec<PatternRule>,
    pub changed: Vec<RuleChange>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Explanation {
    pub path: String,
    pub attributes: BTreeMap<String, Resolved>,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub templates: Vec<TemplateSummary>,
    pub content: Option<String>,
    pub rules: Vec<PatternRule>,
    pub diagnostics: Vec<Diagnostic>,
    pub status: Option<StatusReport>,
    pub explanations: Vec<Explanation>,
    pub written: Option<PathBuf>,
    pub config: Option<GitattrsConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_templates(mut self, templates: Vec<TemplateSummary>) -> Self {
        self.templates = templates;
        self
    }

    pub fn with_content(mut self, content: String) -> Self {
        self.content = Some(content);
        self
    }

    pub fn with_rules(mut self, rules: Vec<PatternRule>) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_diagnostics(mut self, diagnostics: Vec<Diagnostic>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn with_status(mut self, status: StatusReport) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_explanations(mut self, explanations: Vec<Explanation>) -> Self {
        self.explanations = explanations;
        self
    }

    pub fn with_written(mut self, path: PathBuf) -> Self {
        self.written = Some(path);
        self
    }

    pub fn with_config(mut self, config: GitattrsConfig) -> Self {
        self.config = Some(config);
        self
    }
}
