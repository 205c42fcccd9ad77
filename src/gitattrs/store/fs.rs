use super::{AttributesStore, BACKUP_FILENAME};
use crate::error::{GitattrsError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Default)]
pub struct FileStore;

impl FileStore {
    pub fn new() -> Self {
        Self
    }
}

impl AttributesStore for FileStore {
    fn read(&self, dir: &Path) -> Result<Option<Vec<u8>>> {
        let path = self.path(dir);
        match fs::read(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no attributes file");
                Ok(None)
            }
            Err(e) => Err(GitattrsError::Io(e)),
        }
    }

    fn write(&mut self, dir: &Path, content: &str) -> Result<PathBuf> {
        let path = self.path(dir);
        fs::write(&path, content).map_err(GitattrsError::Io)?;
        info!(path = %path.display(), bytes = content.len(), "wrote attributes file");
        Ok(path)
    }

    fn backup(&mut self, dir: &Path) -> Result<PathBuf> {
        let backup = dir.join(BACKUP_FILENAME);
        fs::copy(self.path(dir), &backup).map_err(GitattrsError::Io)?;
        info!(path = %backup.display(), "backed up attributes file");
        Ok(backup)
    }
}
