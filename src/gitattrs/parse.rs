//! # Parsing `.gitattributes`
//!
//! A file is a sequence of lines. Each line is blank, a `#` comment, a macro
//! definition (`[attr]name attr...`) or a rule:
//!
//! ```text
//! <pattern> <ws> <attr> (<ws> <attr>)*
//! ```
//!
//! [`Document`] keeps every raw line next to its parsed form, so writing a
//! document back out reproduces the input byte-for-byte. Nothing here ever
//! reorders, trims or rewrites the text.

use crate::error::{GitattrsError, Result};
use crate::model::{Attribute, Line, LineKind, MacroDef, PatternRule};
use std::fmt;

const MACRO_PREFIX: &str = "[attr]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineErrorKind {
    MissingAttributes(String),
    InvalidAttribute(String),
    InvalidMacroName(String),
    UnterminatedQuote,
}

impl fmt::Display for LineErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineErrorKind::MissingAttributes(pattern) => {
                write!(f, "pattern '{}' has no attributes", pattern)
            }
            LineErrorKind::InvalidAttribute(token) => {
                write!(f, "invalid attribute '{}'", token)
            }
            LineErrorKind::InvalidMacroName(name) => {
                write!(f, "invalid macro name '{}'", name)
            }
            LineErrorKind::UnterminatedQuote => write!(f, "unterminated quoted pattern"),
        }
    }
}

/// Parse a single line (without its `\n`).
pub fn parse_line(line: &str) -> std::result::Result<LineKind, LineErrorKind> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let trimmed = line.trim_start();

    if trimmed.trim_end().is_empty() {
        return Ok(LineKind::Blank);
    }
    if trimmed.starts_with('#') {
        return Ok(LineKind::Comment);
    }

    let (pattern, rest) = split_pattern(trimmed)?;
    let attributes = rest
        .split_whitespace()
        .map(parse_attribute)
        .collect::<std::result::Result<Vec<_>, _>>()?;

    if let Some(name) = pattern.strip_prefix(MACRO_PREFIX) {
        if !is_valid_attr_name(name) {
            return Err(LineErrorKind::InvalidMacroName(name.to_string()));
        }
        if attributes.is_empty() {
            return Err(LineErrorKind::MissingAttributes(pattern));
        }
        return Ok(LineKind::Macro(MacroDef {
            name: name.to_string(),
            attributes,
        }));
    }

    if attributes.is_empty() {
        return Err(LineErrorKind::MissingAttributes(pattern));
    }

    Ok(LineKind::Rule(PatternRule::new(pattern, attributes)))
}

/// Split off the pattern. Quoted patterns follow C-style escaping the way
/// git writes them for paths with spaces.
fn split_pattern(line: &str) -> std::result::Result<(String, &str), LineErrorKind> {
    if let Some(quoted) = line.strip_prefix('"') {
        let mut pattern = String::new();
        let mut chars = quoted.char_indices();
        while let Some((i, c)) = chars.next() {
            match c {
                '"' => return Ok((pattern, &quoted[i + 1..])),
                '\\' => match chars.next() {
                    Some((_, 't')) => pattern.push('\t'),
                    Some((_, 'n')) => pattern.push('\n'),
                    Some((_, escaped)) => pattern.push(escaped),
                    None => return Err(LineErrorKind::UnterminatedQuote),
                },
                other => pattern.push(other),
            }
        }
        return Err(LineErrorKind::UnterminatedQuote);
    }

    match line.find(char::is_whitespace) {
        Some(end) => Ok((line[..end].to_string(), &line[end..])),
        None => Ok((line.to_string(), "")),
    }
}

fn parse_attribute(token: &str) -> std::result::Result<Attribute, LineErrorKind> {
    let invalid = || LineErrorKind::InvalidAttribute(token.to_string());

    let attr = if let Some(name) = token.strip_prefix('-') {
        Attribute::Unset(name.to_string())
    } else if let Some(name) = token.strip_prefix('!') {
        Attribute::Unspecified(name.to_string())
    } else if let Some((name, value)) = token.split_once('=') {
        Attribute::Value(name.to_string(), value.to_string())
    } else {
        Attribute::Set(token.to_string())
    };

    if !is_valid_attr_name(attr.name()) {
        return Err(invalid());
    }
    Ok(attr)
}

/// Git's rule: `[-_.A-Za-z0-9]+`, not starting with `-`.
pub fn is_valid_attr_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('-')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

/// Iterate `(line_number, raw_line)` pairs. A final `\n` does not open an
/// extra line.
pub(crate) fn numbered_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    let body = text.strip_suffix('\n').unwrap_or(text);
    (!text.is_empty())
        .then(|| body.split('\n'))
        .into_iter()
        .flatten()
        .enumerate()
        .map(|(i, l)| (i + 1, l))
}

/// A whole `.gitattributes` file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    lines: Vec<Line>,
    trailing_newline: bool,
}

impl Document {
    /// Parse strictly: the first malformed line fails the whole document.
    pub fn parse(text: &str) -> Result<Self> {
        let lines = numbered_lines(text)
            .map(|(number, raw)| {
                parse_line(raw)
                    .map(|kind| Line {
                        number,
                        raw: raw.to_string(),
                        kind,
                    })
                    .map_err(|kind| GitattrsError::Parse { line: number, kind })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            lines,
            trailing_newline: text.ends_with('\n'),
        })
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Rules in file order, with their line numbers.
    pub fn rules(&self) -> impl Iterator<Item = (usize, &PatternRule)> {
        self.lines
            .iter()
            .filter_map(|line| line.rule().map(|rule| (line.number, rule)))
    }

    pub fn macros(&self) -> impl Iterator<Item = &MacroDef> {
        self.lines.iter().filter_map(|line| match &line.kind {
            LineKind::Macro(def) => Some(def),
            _ => None,
        })
    }

    /// The last rule for exactly this pattern, which is the one git honors
    /// when a pattern repeats.
    pub fn rule_for(&self, pattern: &str) -> Option<&PatternRule> {
        self.rules()
            .map(|(_, rule)| rule)
            .filter(|rule| rule.pattern == pattern)
            .last()
    }

    pub fn rule_count(&self) -> usize {
        self.rules().count()
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            f.write_str(&line.raw)?;
        }
        if self.trailing_newline {
            f.write_str("\n")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(line: &str) -> PatternRule {
        match parse_line(line).unwrap() {
            LineKind::Rule(rule) => rule,
            other => panic!("expected rule, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_and_comment_lines() {
        assert_eq!(parse_line(""), Ok(LineKind::Blank));
        assert_eq!(parse_line("   \t"), Ok(LineKind::Blank));
        assert_eq!(parse_line("# Go source files"), Ok(LineKind::Comment));
        assert_eq!(parse_line("  #indented"), Ok(LineKind::Comment));
    }

    #[test]
    fn test_rule_with_value_attribute() {
        let r = rule("*.go text eol=lf");
        assert_eq!(r.pattern, "*.go");
        assert_eq!(
            r.attributes,
            vec![
                Attribute::Set("text".into()),
                Attribute::Value("eol".into(), "lf".into())
            ]
        );
    }

    #[test]
    fn test_rule_with_unset_and_unspecified() {
        let r = rule("*.bin\t-diff  !merge");
        assert_eq!(
            r.attributes,
            vec![
                Attribute::Unset("diff".into()),
                Attribute::Unspecified("merge".into())
            ]
        );
    }

    #[test]
    fn test_crlf_line_is_parsed_without_carriage_return() {
        let r = rule("*.sh text eol=lf\r");
        assert_eq!(r.attributes[1], Attribute::Value("eol".into(), "lf".into()));
    }

    #[test]
    fn test_quoted_pattern() {
        let r = rule(r#""my \"odd\" file.txt" text"#);
        assert_eq!(r.pattern, "my \"odd\" file.txt");
        assert_eq!(r.attributes, vec![Attribute::Set("text".into())]);
    }

    #[test]
    fn test_unterminated_quote() {
        assert_eq!(
            parse_line("\"oops text"),
            Err(LineErrorKind::UnterminatedQuote)
        );
    }

    #[test]
    fn test_pattern_without_attributes_is_rejected() {
        assert_eq!(
            parse_line("*.go"),
            Err(LineErrorKind::MissingAttributes("*.go".into()))
        );
        assert_eq!(
            parse_line("*.go   "),
            Err(LineErrorKind::MissingAttributes("*.go".into()))
        );
    }

    #[test]
    fn test_invalid_attribute_names() {
        assert!(matches!(
            parse_line("*.go te$t"),
            Err(LineErrorKind::InvalidAttribute(_))
        ));
        assert!(matches!(
            parse_line("*.go --text"),
            Err(LineErrorKind::InvalidAttribute(_))
        ));
        assert!(matches!(
            parse_line("*.go =lf"),
            Err(LineErrorKind::InvalidAttribute(_))
        ));
    }

    #[test]
    fn test_empty_value_is_allowed() {
        let r = rule("*.txt encoding=");
        assert_eq!(r.attributes, vec![Attribute::Value("encoding".into(), "".into())]);
    }

    #[test]
    fn test_macro_definition() {
        match parse_line("[attr]lfonly text eol=lf").unwrap() {
            LineKind::Macro(def) => {
                assert_eq!(def.name, "lfonly");
                assert_eq!(def.attributes.len(), 2);
            }
            other => panic!("expected macro, got {:?}", other),
        }
        assert!(matches!(
            parse_line("[attr] text"),
            Err(LineErrorKind::InvalidMacroName(_))
        ));
    }

    #[test]
    fn test_document_reports_line_number() {
        let err = Document::parse("# header\n*.go text\n*.md\n").unwrap_err();
        match err {
            GitattrsError::Parse { line, kind } => {
                assert_eq!(line, 3);
                assert_eq!(kind, LineErrorKind::MissingAttributes("*.md".into()));
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_document_display_is_byte_exact() {
        let inputs = [
            "",
            "\n",
            "*.go text eol=lf",
            "# c\r\n*.go text eol=lf\r\n\r\n",
            "*  text=auto   eol=lf\n\n\n# trailing\n",
        ];
        for input in inputs {
            let doc = Document::parse(input).unwrap();
            assert_eq!(doc.to_string(), input, "input {:?}", input);
        }
    }

    #[test]
    fn test_rules_keep_file_order() {
        let doc = Document::parse("* text=auto\n# x\n*.go text\n\n*.png binary\n").unwrap();
        let rules: Vec<_> = doc
            .rules()
            .map(|(n, r)| (n, r.pattern.as_str()))
            .collect();
        assert_eq!(rules, vec![(1, "*"), (3, "*.go"), (5, "*.png")]);
    }

    #[test]
    fn test_macros_are_collected() {
        let doc = Document::parse("[attr]lfonly text eol=lf\n*.sh lfonly\n").unwrap();
        let names: Vec<_> = doc.macros().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["lfonly"]);
        assert_eq!(doc.rule_count(), 1);
    }

    #[test]
    fn test_rule_for_returns_last_occurrence() {
        let doc = Document::parse("*.go text\n*.go binary\n").unwrap();
        assert_eq!(doc.rule_for("*.go").unwrap().attributes_text(), "binary");
        assert!(doc.rule_for("*.rs").is_none());
    }
}
