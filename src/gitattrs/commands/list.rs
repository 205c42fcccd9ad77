use crate::commands::{CmdResult, TemplateSummary};
use crate::error::Result;
use crate::templates;

pub fn run() -> Result<CmdResult> {
    let summaries = templates::all()
        .iter()
        .map(|t| {
            Ok(TemplateSummary {
                name: t.name.to_string(),
                aliases: t.aliases.iter().map(|a| a.to_string()).collect(),
                description: t.description.to_string(),
                rule_count: t.document()?.rule_count(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CmdResult::default().with_templates(summaries))
}
