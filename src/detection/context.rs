use crate::fs::{has_extension, FileSystem};
use crate::rules::FileCategory;
use anyhow::Result;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const MANIFEST_EXTENSION: &str = "csproj";
pub const SOURCE_EXTENSION: &str = "cs";

/// Files found under a project root, plus read access to them.
///
/// Built once per analysis request and shared read-only by every strategy.
pub struct ProjectAnalysisContext<'a> {
    pub project_path: PathBuf,
    pub manifest_files: Vec<PathBuf>,
    pub source_files: Vec<PathBuf>,
    fs: &'a dyn FileSystem,
}

impl<'a> ProjectAnalysisContext<'a> {
    pub fn new(
        fs: &'a dyn FileSystem,
        project_path: impl Into<PathBuf>,
        manifest_files: Vec<PathBuf>,
        source_files: Vec<PathBuf>,
    ) -> Self {
        Self {
            project_path: project_path.into(),
            manifest_files,
            source_files,
            fs,
        }
    }

    /// Enumerates `*.csproj` and `*.cs` files below `project_path` in one walk
    pub fn scan(fs: &'a dyn FileSystem, project_path: &Path) -> Result<Self> {
        let mut manifest_files = Vec::new();
        let mut source_files = Vec::new();
        for file in fs.walk_files(project_path)? {
            if has_extension(&file, MANIFEST_EXTENSION) {
                manifest_files.push(file);
            } else if has_extension(&file, SOURCE_EXTENSION) {
                source_files.push(file);
            }
        }

        debug!(
            project = %project_path.display(),
            manifests = manifest_files.len(),
            sources = source_files.len(),
            "Collected project files"
        );

        Ok(Self::new(fs, project_path, manifest_files, source_files))
    }

    /// File list for a pattern category; `Other` has no files
    pub fn files(&self, category: &FileCategory) -> &[PathBuf] {
        match category {
            FileCategory::ProjectManifest => &self.manifest_files,
            FileCategory::SourceFile => &self.source_files,
            FileCategory::Other(_) => &[],
        }
    }

    /// Reads a file, logging and returning `None` when it cannot be read
    pub fn read(&self, path: &Path) -> Option<String> {
        match self.fs.read_to_string(path) {
            Ok(content) => Some(content),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Skipping unreadable file");
                None
            }
        }
    }

    pub fn any_manifest(&self, predicate: impl Fn(&str) -> bool) -> bool {
        self.any_file(&self.manifest_files, predicate)
    }

    pub fn any_source(&self, predicate: impl Fn(&str) -> bool) -> bool {
        self.any_file(&self.source_files, predicate)
    }

    fn any_file(&self, files: &[PathBuf], predicate: impl Fn(&str) -> bool) -> bool {
        files
            .iter()
            .any(|file| self.read(file).map(|c| predicate(&c)).unwrap_or(false))
    }
}

impl fmt::Debug for ProjectAnalysisContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProjectAnalysisContext")
            .field("project_path", &self.project_path)
            .field("manifest_files", &self.manifest_files)
            .field("source_files", &self.source_files)
            .finish_non_exhaustive()
    }
}
