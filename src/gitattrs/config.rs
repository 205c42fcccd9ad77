use crate::error::{GitattrsError, Result};
use crate::templates::{self, DEFAULT_TEMPLATE};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";

pub const KEYS: &[&str] = &["template", "backup"];

/// User configuration, stored as `config.json` in the config directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GitattrsConfig {
    /// Template used when none is given on the command line
    #[serde(default = "default_template")]
    pub template: String,

    /// Keep `.gitattributes.orig` before a forced overwrite
    #[serde(default = "default_backup")]
    pub backup: bool,
}

fn default_template() -> String {
    DEFAULT_TEMPLATE.to_string()
}

fn default_backup() -> bool {
    true
}

impl Default for GitattrsConfig {
    fn default() -> Self {
        Self {
            template: default_template(),
            backup: default_backup(),
        }
    }
}

impl GitattrsConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(GitattrsError::Io)?;
        let config: GitattrsConfig =
            serde_json::from_str(&content).map_err(GitattrsError::Serialization)?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(GitattrsError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(GitattrsError::Serialization)?;
        fs::write(config_path, content).map_err(GitattrsError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "template" => Some(self.template.clone()),
            "backup" => Some(self.backup.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "template" => {
                // Store the canonical name so aliases don't leak into the file
                self.template = templates::find(value)?.name.to_string();
            }
            "backup" => {
                self.backup = parse_bool(value).ok_or_else(|| {
                    GitattrsError::Config(format!("backup expects true or false, got '{}'", value))
                })?;
            }
            other => {
                return Err(GitattrsError::Config(format!(
                    "Unknown config key: {} (known: {})",
                    other,
                    KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}
