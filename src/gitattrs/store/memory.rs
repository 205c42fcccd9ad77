use super::{AttributesStore, BACKUP_FILENAME};
use crate::error::{GitattrsError, Result};
use std::collections::{HashMap, HashSet};
use std::io::{Error, ErrorKind};
use std::path::{Path, PathBuf};

/// In-memory store. Directories must be registered with [`with_dir`]
/// (or implicitly through [`with_file`]) before files can be written there,
/// matching the filesystem rule that the target directory must exist.
///
/// [`with_dir`]: InMemoryStore::with_dir
/// [`with_file`]: InMemoryStore::with_file
#[derive(Debug, Default)]
pub struct InMemoryStore {
    dirs: HashSet<PathBuf>,
    files: HashMap<PathBuf, Vec<u8>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dirs.insert(dir.into());
        self
    }

    pub fn with_file(mut self, dir: impl Into<PathBuf>, content: impl AsRef<[u8]>) -> Self {
        let dir = dir.into();
        let path = self.path(&dir);
        self.files.insert(path, content.as_ref().to_vec());
        self.dirs.insert(dir);
        self
    }

    /// Content of a stored file, if it exists and is UTF-8.
    pub fn file(&self, path: &Path) -> Option<&str> {
        self.file_bytes(path)
            .and_then(|bytes| std::str::from_utf8(bytes).ok())
    }

    pub fn file_bytes(&self, path: &Path) -> Option<&[u8]> {
        self.files.get(path).map(Vec::as_slice)
    }
}

impl AttributesStore for InMemoryStore {
    fn read(&self, dir: &Path) -> Result<Option<Vec<u8>>> {
        Ok(self.files.get(&self.path(dir)).cloned())
    }

    fn write(&mut self, dir: &Path, content: &str) -> Result<PathBuf> {
        if !self.dirs.contains(dir) {
            return Err(GitattrsError::Io(Error::new(
                ErrorKind::NotFound,
                format!("directory not found: {}", dir.display()),
            )));
        }
        let path = self.path(dir);
        self.files.insert(path.clone(), content.as_bytes().to_vec());
        Ok(path)
    }

    fn backup(&mut self, dir: &Path) -> Result<PathBuf> {
        let current = self.files.get(&self.path(dir)).cloned().ok_or_else(|| {
            GitattrsError::Io(Error::new(ErrorKind::NotFound, "nothing to back up"))
        })?;
        let backup = dir.join(BACKUP_FILENAME);
        self.files.insert(backup.clone(), current);
        Ok(backup)
    }
}
