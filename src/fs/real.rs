use super::{decode_text, DirEntry, FileSystem, FileType};
use anyhow::{Context, Result};
use ignore::WalkBuilder;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

pub struct RealFileSystem;

impl RealFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RealFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for RealFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).context(format!("Failed to read file {:?}", path))?;
        Ok(decode_text(bytes))
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>> {
        let entries = fs::read_dir(path).context(format!("Failed to read directory {:?}", path))?;

        let mut result = Vec::new();
        for entry in entries {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().to_string();
            let file_type = if path.is_file() {
                FileType::File
            } else if path.is_dir() {
                FileType::Directory
            } else {
                FileType::Symlink
            };

            result.push(DirEntry {
                path,
                name,
                file_type,
            });
        }

        Ok(result)
    }

    fn walk_files(&self, root: &Path) -> Result<Vec<PathBuf>> {
        if !root.is_dir() {
            anyhow::bail!("Directory not found: {:?}", root);
        }

        // .gitignore and hidden-file filters are off: every file under root is scanned.
        let mut files = Vec::new();
        for result in WalkBuilder::new(root).standard_filters(false).build() {
            let entry = match result {
                Ok(e) => e,
                Err(err) => {
                    warn!(error = %err, "Failed to read directory entry");
                    continue;
                }
            };
            if entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
                files.push(entry.into_path());
            }
        }

        files.sort();
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn create_test_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        let base = dir.path();

        fs::create_dir_all(base.join("src/Services")).unwrap();
        fs::File::create(base.join("App.csproj"))
            .unwrap()
            .write_all(b"<Project Sdk=\"Microsoft.NET.Sdk\" />")
            .unwrap();
        fs::File::create(base.join("src/Program.cs"))
            .unwrap()
            .write_all(b"Console.WriteLine();")
            .unwrap();
        fs::File::create(base.join("src/Services/Worker.CS"))
            .unwrap()
            .write_all(b"class Worker {}")
            .unwrap();

        dir
    }

    #[test]
    fn test_exists() {
        let temp = create_test_dir();
        let fs = RealFileSystem::new();

        assert!(fs.exists(temp.path()));
        assert!(fs.exists(&temp.path().join("App.csproj")));
        assert!(!fs.exists(&temp.path().join("nonexistent")));
    }

    #[test]
    fn test_is_dir_and_is_file() {
        let temp = create_test_dir();
        let fs = RealFileSystem::new();

        assert!(fs.is_dir(&temp.path().join("src")));
        assert!(!fs.is_dir(&temp.path().join("App.csproj")));
        assert!(fs.is_file(&temp.path().join("App.csproj")));
        assert!(!fs.is_file(temp.path()));
    }

    #[test]
    fn test_read_to_string() {
        let temp = create_test_dir();
        let fs = RealFileSystem::new();

        let content = fs.read_to_string(&temp.path().join("src/Program.cs")).unwrap();
        assert_eq!(content, "Console.WriteLine();");
    }

    #[test]
    fn test_read_to_string_tolerates_legacy_encodings() {
        let temp = create_test_dir();
        let fs = RealFileSystem::new();

        let ansi = temp.path().join("src/Ansi.cs");
        fs::write(&ansi, b"// caf\xE9\nvar client = new TelemetryClient();").unwrap();
        assert!(fs.read_to_string(&ansi).unwrap().contains("new TelemetryClient()"));

        let utf16 = temp.path().join("src/Wide.cs");
        let bytes: Vec<u8> = [0xFF, 0xFE]
            .into_iter()
            .chain("client.TrackEvent(\"x\");".encode_utf16().flat_map(u16::to_le_bytes))
            .collect();
        fs::write(&utf16, bytes).unwrap();
        assert_eq!(fs.read_to_string(&utf16).unwrap(), "client.TrackEvent(\"x\");");
    }

    #[test]
    fn test_read_dir() {
        let temp = create_test_dir();
        let fs = RealFileSystem::new();

        let entries = fs.read_dir(temp.path()).unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.file_name()).collect();

        assert!(names.contains(&"App.csproj"));
        assert!(names.contains(&"src"));
    }

    #[test]
    fn test_find_files_is_recursive_and_case_insensitive() {
        let temp = create_test_dir();
        let fs = RealFileSystem::new();

        let sources = fs.find_files(temp.path(), "cs").unwrap();
        assert_eq!(sources.len(), 2);
        assert!(sources.iter().any(|p| p.ends_with("src/Program.cs")));
        assert!(sources.iter().any(|p| p.ends_with("src/Services/Worker.CS")));

        let manifests = fs.find_files(temp.path(), "csproj").unwrap();
        assert_eq!(manifests.len(), 1);
    }

    #[test]
    fn test_walk_files_includes_hidden_directories() {
        let temp = create_test_dir();
        fs::create_dir_all(temp.path().join(".hidden")).unwrap();
        fs::write(temp.path().join(".hidden/Legacy.cs"), "class Legacy {}").unwrap();

        let files = RealFileSystem::new().walk_files(temp.path()).unwrap();
        assert!(files.iter().any(|p| p.ends_with(".hidden/Legacy.cs")));
    }

    #[test]
    fn test_walk_files_missing_root() {
        let temp = TempDir::new().unwrap();
        let result = RealFileSystem::new().walk_files(&temp.path().join("missing"));
        assert!(result.is_err());
    }
}
