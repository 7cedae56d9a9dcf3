//! FileSystem trait definition

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Type of file system entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    File,
    Directory,
    Symlink,
}

/// A directory entry returned by read_dir
#[derive(Debug, Clone)]
pub struct DirEntry {
    pub path: PathBuf,
    pub name: String,
    pub file_type: FileType,
}

impl DirEntry {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> &str {
        &self.name
    }

    pub fn file_type(&self) -> FileType {
        self.file_type
    }
}

/// Abstraction over the project tree being scanned, so strategies can run
/// against an in-memory tree in tests
pub trait FileSystem: Send + Sync {
    /// Check if a path exists
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is a directory
    fn is_dir(&self, path: &Path) -> bool;

    /// Check if path is a file
    fn is_file(&self, path: &Path) -> bool;

    /// Read file contents as string
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// List directory contents
    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>>;

    /// Every regular file below `root`, recursively, sorted by path
    fn walk_files(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let mut found = Vec::new();
        let mut pending = vec![root.to_path_buf()];

        while let Some(dir) = pending.pop() {
            for entry in self.read_dir(&dir)? {
                match entry.file_type {
                    FileType::Directory => pending.push(entry.path),
                    FileType::File => found.push(entry.path),
                    FileType::Symlink => {}
                }
            }
        }

        found.sort();
        Ok(found)
    }

    /// Files below `root` whose extension equals `extension` (ASCII case-insensitive)
    fn find_files(&self, root: &Path, extension: &str) -> Result<Vec<PathBuf>> {
        Ok(self
            .walk_files(root)?
            .into_iter()
            .filter(|path| super::has_extension(path, extension))
            .collect())
    }
}
