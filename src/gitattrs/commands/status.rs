use crate::commands::{CmdMessage, CmdResult, FileState, RuleChange, StatusReport};
use crate::error::Result;
use crate::model::{Attribute, PatternRule};
use crate::parse::Document;
use crate::store::AttributesStore;
use crate::templates;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Compare the attributes file in `dir` with a template.
pub fn run<S: AttributesStore>(store: &S, dir: &Path, template: &str) -> Result<CmdResult> {
    let template = templates::find(template)?;
    let path = store.path(dir);
    let mut report = StatusReport {
        path: path.clone(),
        template: template.name.to_string(),
        state: FileState::Missing,
        missing: Vec::new(),
        extra: Vec::new(),
        changed: Vec::new(),
    };
    let mut result = CmdResult::default();

    let Some(current) = store.read(dir)? else {
        result.add_message(CmdMessage::warning(format!(
            "{} does not exist. Run `gitattrs init` to create it.",
            path.display()
        )));
        return Ok(result.with_status(report));
    };

    if current == template.content.as_bytes() {
        report.state = FileState::UpToDate;
        result.add_message(CmdMessage::success(format!(
            "{} is up to date with the '{}' template.",
            path.display(),
            template.name
        )));
        return Ok(result.with_status(report));
    }

    let expected = template.document()?;
    let actual = Document::parse(&String::from_utf8_lossy(&current))?;
    compare(&expected, &actual, &mut report);

    if report.missing.is_empty() && report.extra.is_empty() && report.changed.is_empty() {
        report.state = FileState::Equivalent;
        result.add_message(CmdMessage::info(format!(
            "{} has the same rules as the '{}' template but different comments or spacing.",
            path.display(),
            template.name
        )));
    } else {
        report.state = FileState::Differs;
        result.add_message(CmdMessage::warning(format!(
            "{} differs from the '{}' template: {} missing, {} extra, {} changed.",
            path.display(),
            template.name,
            report.missing.len(),
            report.extra.len(),
            report.changed.len()
        )));
    }

    Ok(result.with_status(report))
}

/// Rules are compared by pattern; for a repeated pattern the last rule counts.
fn compare(expected: &Document, actual: &Document, report: &mut StatusReport) {
    let actual_by_pattern = last_rules(actual);
    let expected_by_pattern = last_rules(expected);

    for (pattern, rule) in ordered(expected) {
        match actual_by_pattern.get(pattern) {
            None => report.missing.push(rule.clone()),
            Some(current) if effective(current) != effective(rule) => {
                report.changed.push(RuleChange {
                    pattern: pattern.to_string(),
                    expected: rule.attributes_text(),
                    actual: current.attributes_text(),
                });
            }
            Some(_) => {}
        }
    }

    for (pattern, rule) in ordered(actual) {
        if !expected_by_pattern.contains_key(pattern) {
            report.extra.push(rule.clone());
        }
    }
}

/// What a rule does per attribute name: token order between different
/// names is irrelevant to git, and a repeated name keeps its last token.
fn effective(rule: &PatternRule) -> BTreeMap<&str, &Attribute> {
    rule.attributes.iter().map(|a| (a.name(), a)).collect()
}

fn last_rules(doc: &Document) -> HashMap<&str, &PatternRule> {
    doc.rules()
        .map(|(_, rule)| (rule.pattern.as_str(), rule))
        .collect()
}

/// Unique patterns in first-seen order, each paired with its last rule.
fn ordered(doc: &Document) -> Vec<(&str, &PatternRule)> {
    let last = last_rules(doc);
    let mut seen = Vec::new();
    for (_, rule) in doc.rules() {
        let pattern = rule.pattern.as_str();
        if !seen.iter().any(|(p, _)| *p == pattern) {
            seen.push((pattern, last[pattern]));
        }
    }
    seen
}
