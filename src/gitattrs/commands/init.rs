use crate::commands::{CmdMessage, CmdResult};
use crate::error::{GitattrsError, Result};
use crate::store::AttributesStore;
use crate::templates::{self, RENORMALIZE_HINT};
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default)]
pub struct InitOptions {
    /// Overwrite a file that differs from the template
    pub force: bool,
    /// Keep a copy of the overwritten file
    pub backup: bool,
}

/// Emit `template` verbatim into `dir`.
pub fn run<S: AttributesStore>(
    store: &mut S,
    dir: &Path,
    template: &str,
    options: InitOptions,
) -> Result<CmdResult> {
    let template = templates::find(template)?;
    let target = store.path(dir);
    let mut result = CmdResult::default();

    match store.read(dir)? {
        Some(existing) if existing == template.content.as_bytes() => {
            debug!(path = %target.display(), "target already matches template");
            result.add_message(CmdMessage::success(format!(
                "{} is already up to date with the '{}' template.",
                target.display(),
                template.name
            )));
            return Ok(result);
        }
        Some(_) if !options.force => return Err(GitattrsError::TargetExists(target)),
        Some(_) => {
            if options.backup {
                let backup = store.backup(dir)?;
                result.add_message(CmdMessage::info(format!(
                    "Saved previous file to {}",
                    backup.display()
                )));
            }
        }
        None => {}
    }

    let written = store.write(dir, template.content)?;
    result.add_message(CmdMessage::success(format!(
        "Wrote {} from the '{}' template.",
        written.display(),
        template.name
    )));
    result.add_message(CmdMessage::info(
        "To normalize files already in the repository, run:",
    ));
    for command in RENORMALIZE_HINT {
        result.add_message(CmdMessage::info(format!("  {}", command)));
    }

    Ok(result.with_written(written))
}
