//! # Storage Layer
//!
//! Where attribute files live. Commands never touch the filesystem directly;
//! they go through [`AttributesStore`], so the same logic runs against a real
//! project tree or an in-memory map in tests.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: `<dir>/.gitattributes` on disk, backups in
//!   `<dir>/.gitattributes.orig`
//! - [`memory::InMemoryStore`]: no persistence, for tests
//!
//! Reads return raw bytes: an attributes file is not required to be UTF-8,
//! and byte comparisons must not depend on decoding. Writes are a single
//! call with the exact bytes given. The target directory has to exist
//! already; filesystem errors come back unchanged.

use crate::error::Result;
use std::path::{Path, PathBuf};

pub mod fs;
pub mod memory;

pub const ATTRIBUTES_FILENAME: &str = ".gitattributes";
pub const BACKUP_FILENAME: &str = ".gitattributes.orig";

pub trait AttributesStore {
    /// Location of the attributes file for a project directory.
    fn path(&self, dir: &Path) -> PathBuf {
        dir.join(ATTRIBUTES_FILENAME)
    }

    /// Current content, or `None` when the file does not exist.
    fn read(&self, dir: &Path) -> Result<Option<Vec<u8>>>;

    /// Replace the file with `content`, returning the path written.
    fn write(&mut self, dir: &Path, content: &str) -> Result<PathBuf>;

    /// Copy the current file aside before it is overwritten.
    fn backup(&mut self, dir: &Path) -> Result<PathBuf>;
}
