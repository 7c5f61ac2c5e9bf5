//! Filesystem access for documents.

use std::fs;
use std::io;
use std::path::Path;

/// Whole-file text storage.
///
/// Reads return the full content; writes replace it (create or truncate).
pub trait Storage {
    fn read_text(&self, path: &Path) -> io::Result<String>;
    fn write_text(&self, path: &Path, content: &str) -> io::Result<()>;
}

/// Storage backed by the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorage;

impl Storage for LocalStorage {
    fn read_text(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn write_text(&self, path: &Path, content: &str) -> io::Result<()> {
        fs::write(path, content)
    }
}
