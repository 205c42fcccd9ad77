use crate::parse::LineErrorKind;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GitattrsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Line {line}: {kind}")]
    Parse { line: usize, kind: LineErrorKind },

    #[error("Unknown template: {0}")]
    UnknownTemplate(String),

    #[error("{} already exists and differs from the template (use --force to overwrite)", .0.display())]
    TargetExists(PathBuf),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

pub type Result<T> = std::result::Result<T, GitattrsError>;
