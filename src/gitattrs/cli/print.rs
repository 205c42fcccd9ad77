use colored::Colorize;
use gitattrs::api::{
    CmdMessage, Explanation, FileState, MessageLevel, StatusReport, TemplateSummary,
};
use gitattrs::config::GitattrsConfig;
use gitattrs::lint::{Diagnostic, Severity};
use gitattrs::matcher::AttrState;
use unicode_width::UnicodeWidthStr;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

/// Pad `s` to `width` terminal columns.
fn pad(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(fill))
}

pub(super) fn print_templates(templates: &[TemplateSummary]) {
    let width = templates.iter().map(|t| t.name.width()).max().unwrap_or(0);
    for t in templates {
        let aliases = if t.aliases.is_empty() {
            String::new()
        } else {
            format!(" (aliases: {})", t.aliases.join(", "))
        };
        println!(
            "  {}  {}{}  {}",
            pad(&t.name, width).bold(),
            t.description,
            aliases.dimmed(),
            format!("[{} rules]", t.rule_count).dimmed()
        );
    }
}

pub(super) fn print_diagnostics(source: &str, diagnostics: &[Diagnostic]) {
    for d in diagnostics {
        let severity = match d.severity {
            Severity::Error => d.severity.to_string().red().bold(),
            Severity::Warning => d.severity.to_string().yellow().bold(),
        };
        println!("{}:{}: {}: {}", source, d.line, severity, d.message);
    }
}

pub(super) fn print_status(report: &StatusReport) {
    if report.state != FileState::Differs {
        return;
    }
    for rule in &report.missing {
        println!("  {} {}", "-".red(), rule.to_string().red());
    }
    for rule in &report.extra {
        println!("  {} {}", "+".green(), rule.to_string().green());
    }
    for change in &report.changed {
        println!(
            "  {} {}: {} {} {}",
            "~".yellow(),
            change.pattern.bold(),
            change.expected.dimmed(),
            "->".dimmed(),
            change.actual
        );
    }
}

fn state_text(state: &AttrState) -> String {
    match state {
        AttrState::Set => "set".to_string(),
        AttrState::Unset => "unset".to_string(),
        AttrState::Value(v) => v.clone(),
    }
}

pub(super) fn print_explanations(explanations: &[Explanation]) {
    for (i, exp) in explanations.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}", exp.path.bold());
        if exp.attributes.is_empty() {
            println!("  {}", "(no attributes)".dimmed());
            continue;
        }
        let width = exp.attributes.keys().map(|k| k.width()).max().unwrap_or(0);
        for (name, resolved) in &exp.attributes {
            let value = state_text(&resolved.state);
            let value = match resolved.state {
                AttrState::Set => value.green(),
                AttrState::Unset => value.red(),
                AttrState::Value(_) => value.normal(),
            };
            println!(
                "  {}  {}  {}",
                pad(name, width),
                value,
                format!("(line {})", resolved.line).dimmed()
            );
        }
    }
}

pub(super) fn print_config(config: &GitattrsConfig) {
    println!("template = {}", config.template);
    println!("backup = {}", config.backup);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_uses_display_width() {
        assert_eq!(pad("eol", 5), "eol  ");
        assert_eq!(pad("toolong", 3), "toolong");
    }

    #[test]
    fn test_state_text() {
        assert_eq!(state_text(&AttrState::Set), "set");
        assert_eq!(state_text(&AttrState::Unset), "unset");
        assert_eq!(state_text(&AttrState::Value("lf".into())), "lf");
    }
}
