use crate::commands::CmdResult;
use crate::error::Result;
use crate::templates;

pub fn run(template: &str) -> Result<CmdResult> {
    let template = templates::find(template)?;
    let rules = template
        .document()?
        .rules()
        .map(|(_, rule)| rule.clone())
        .collect();

    Ok(CmdResult::default()
        .with_content(template.content.to_string())
        .with_rules(rules))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GitattrsError;

    #[test]
    fn test_show_returns_verbatim_content() {
        let result = run("golang").unwrap();
        assert_eq!(
            result.content.as_deref(),
            Some(templates::find("go").unwrap().content)
        );
        assert_eq!(result.rules[0].to_string(), "* text=auto eol=lf");
    }

    #[test]
    fn test_show_unknown_template() {
        assert!(matches!(run("zig"), Err(GitattrsError::UnknownTemplate(_))));
    }
}
