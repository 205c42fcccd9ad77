use crate::commands::{CmdMessage, CmdResult};
use crate::error::{GitattrsError, Result};
use crate::lint::{has_errors, lint_bytes};
use crate::store::AttributesStore;
use std::io::{Error, ErrorKind};
use std::path::Path;

/// Lint the attributes file of a project directory.
pub fn run<S: AttributesStore>(store: &S, dir: &Path) -> Result<CmdResult> {
    let path = store.path(dir);
    let content = store.read(dir)?.ok_or_else(|| {
        GitattrsError::Io(Error::new(
            ErrorKind::NotFound,
            format!("{} not found", path.display()),
        ))
    })?;
    run_content(&path.display().to_string(), &content)
}

/// Lint content that came from `source` (a path or a label such as `<stdin>`).
pub fn run_content(source: &str, content: &[u8]) -> Result<CmdResult> {
    let diagnostics = lint_bytes(content);
    let mut result = CmdResult::default();

    if diagnostics.is_empty() {
        result.add_message(CmdMessage::success(format!("{}: no problems found.", source)));
    } else if has_errors(&diagnostics) {
        result.add_message(CmdMessage::error(format!(
            "{}: {} problem(s) found.",
            source,
            diagnostics.len()
        )));
    } else {
        result.add_message(CmdMessage::warning(format!(
            "{}: {} warning(s).",
            source,
            diagnostics.len()
        )));
    }

    Ok(result.with_diagnostics(diagnostics))
}
