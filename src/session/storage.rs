// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Backing storage for the session document

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use crate::error::{Error, ErrorContext, Result};

/// Whole-document storage
///
/// Content is always read and written in full; implementations must never
/// expose a partially written document to `read`.
pub trait DocumentStorage: Send + Sync {
    /// Current content, or `None` if nothing has been stored yet
    fn read(&self) -> Result<Option<String>>;

    /// Replace the content
    fn write(&self, content: &str) -> Result<()>;

    /// Where the document lives, for error messages
    fn location(&self) -> PathBuf;
}

/// Document stored as a single file
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentStorage for FileStorage {
    fn read(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_path(&self.path),
        }
    }

    fn write(&self, content: &str) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).with_path(&self.path)?;

        // write beside the target, then rename over it
        let mut tmp = tempfile::NamedTempFile::new_in(&dir).with_path(&self.path)?;
        tmp.write_all(content.as_bytes()).with_path(&self.path)?;
        tmp.as_file().sync_all().with_path(&self.path)?;
        tmp.persist(&self.path)
            .map_err(|e| Error::persistence(&self.path, e.error.to_string()))?;
        Ok(())
    }

    fn location(&self) -> PathBuf {
        self.path.clone()
    }
}

/// Document kept in memory, for embedding and tests
#[derive(Debug, Default)]
pub struct MemoryStorage {
    content: Mutex<Option<String>>,
    writes: Mutex<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with existing content
    pub fn with_content(content: impl Into<String>) -> Self {
        Self {
            content: Mutex::new(Some(content.into())),
            writes: Mutex::new(0),
        }
    }

    /// Number of writes performed so far
    pub fn write_count(&self) -> usize {
        *self.writes.lock()
    }

    /// Snapshot of the stored content
    pub fn content(&self) -> Option<String> {
        self.content.lock().clone()
    }
}

impl DocumentStorage for MemoryStorage {
    fn read(&self) -> Result<Option<String>> {
        Ok(self.content.lock().clone())
    }

    fn write(&self, content: &str) -> Result<()> {
        *self.content.lock() = Some(content.to_string());
        *self.writes.lock() += 1;
        Ok(())
    }

    fn location(&self) -> PathBuf {
        PathBuf::from("<memory>")
    }
}

impl<S: DocumentStorage + ?Sized> DocumentStorage for std::sync::Arc<S> {
    fn read(&self) -> Result<Option<String>> {
        (**self).read()
    }

    fn write(&self, content: &str) -> Result<()> {
        (**self).write(content)
    }

    fn location(&self) -> PathBuf {
        (**self).location()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("absent.json"));
        assert_eq!(storage.read().unwrap(), None);
    }

    #[test]
    fn test_file_write_replaces_content() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("nested").join(".tenant-api.json"));

        storage.write("{\"a\":1}").unwrap();
        storage.write("{}").unwrap();

        assert_eq!(storage.read().unwrap().as_deref(), Some("{}"));
        // only the target remains, no stray temp files
        let entries = fs::read_dir(dir.path().join("nested")).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn test_unwritable_location_is_persistence_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "x").unwrap();

        // parent is a regular file, so the directory cannot be created
        let storage = FileStorage::new(blocker.join("config.json"));
        let err = storage.write("{}").unwrap_err();
        assert!(err.is_persistence());
    }

    #[test]
    fn test_memory_storage_counts_writes() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.read().unwrap(), None);
        storage.write("one").unwrap();
        storage.write("two").unwrap();
        assert_eq!(storage.write_count(), 2);
        assert_eq!(storage.content().as_deref(), Some("two"));
    }
}
