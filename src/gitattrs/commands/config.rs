use crate::commands::{CmdMessage, CmdResult, GitattrsPaths};
use crate::config::GitattrsConfig;
use crate::error::Result;
use tracing::warn;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(paths: &GitattrsPaths, action: ConfigAction) -> Result<CmdResult> {
    let dir = &paths.config_dir;
    match action {
        ConfigAction::ShowAll => {
            let config = GitattrsConfig::load(dir)?;
            Ok(CmdResult::default().with_config(config))
        }
        ConfigAction::ShowKey(key) => {
            let config = GitattrsConfig::load(dir)?;
            let mut result = CmdResult::default();
            match config.get(&key) {
                Some(val) => result.add_message(CmdMessage::info(val)),
                None => {
                    result.add_message(CmdMessage::error(format!("Unknown config key: {}", key)))
                }
            }
            Ok(result)
        }
        ConfigAction::Set(key, value) => {
            let mut result = CmdResult::default();
            // A broken file must not block the command that rewrites it
            let mut config = GitattrsConfig::load(dir).unwrap_or_else(|e| {
                warn!(error = %e, "config unreadable, starting from defaults");
                result.add_message(CmdMessage::warning(format!(
                    "Could not read the existing config ({}); starting from defaults.",
                    e
                )));
                GitattrsConfig::default()
            });
            if let Err(e) = config.set(&key, &value) {
                result.add_message(CmdMessage::error(e.to_string()));
                return Ok(result);
            }
            config.save(dir)?;
            let display_val = config.get(&key).unwrap_or(value);
            let mut result = result.with_config(config);
            result.add_message(CmdMessage::success(format!(
                "{} set to {}",
                key, display_val
            )));
            Ok(result)
        }
    }
}
