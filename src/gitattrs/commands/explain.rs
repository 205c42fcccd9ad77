use crate::commands::{CmdMessage, CmdResult, Explanation};
use crate::error::Result;
use crate::matcher::resolve;
use crate::parse::Document;
use crate::store::AttributesStore;
use crate::templates;
use std::path::Path;

/// Resolve attributes for `paths` using the attributes file in `dir`, or
/// `template` when the directory has none yet.
pub fn run<S: AttributesStore, P: AsRef<str>>(
    store: &S,
    dir: &Path,
    template: &str,
    paths: &[P],
) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    let doc = match store.read(dir)? {
        Some(content) => Document::parse(&String::from_utf8_lossy(&content))?,
        None => {
            let template = templates::find(template)?;
            result.add_message(CmdMessage::info(format!(
                "No {} found; showing the '{}' template.",
                store.path(dir).display(),
                template.name
            )));
            template.document()?
        }
    };

    let explanations = paths
        .iter()
        .map(|p| {
            Ok(Explanation {
                path: p.as_ref().to_string(),
                attributes: resolve(&doc, p.as_ref())?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(result.with_explanations(explanations))
}
