//! Presence check for the Application Insights SDK
//!
//! Works on a single file or a whole directory without involving the strategy
//! registry. A directory sweep lists at most [`MAX_FINDINGS`] files.

use crate::detection::context::{MANIFEST_EXTENSION, SOURCE_EXTENSION};
use crate::detection::indicators::{config_uses_sdk, manifest_uses_sdk, source_uses_sdk};
use crate::fs::{display_name, has_extension, FileSystem};
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const MAX_FINDINGS: usize = 10;

pub const TRUNCATION_MARKER: &str = "... and more (limited to first 10 findings)";

pub const DIRECTORY_MISS_MESSAGE: &str = "No Application Insights SDK usage detected in the directory.";

const RECOMMENDATION: &str = "Migration to Azure Monitor OpenTelemetry Distro is recommended.";

/// MSBuild and property files. Project-like in single-file mode, auxiliary in a sweep.
const PROPERTY_EXTENSIONS: &[&str] = &["properties", "props", "targets"];

/// How a single file is classified for indicator matching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileKind {
    Project,
    Source,
    Config,
    Unknown,
}

fn classify(path: &Path) -> FileKind {
    if has_extension(path, MANIFEST_EXTENSION)
        || PROPERTY_EXTENSIONS.iter().any(|ext| has_extension(path, ext))
    {
        FileKind::Project
    } else if has_extension(path, SOURCE_EXTENSION) {
        FileKind::Source
    } else if is_app_config(path) {
        FileKind::Config
    } else {
        FileKind::Unknown
    }
}

/// `appsettings*.json` or `ApplicationInsights.config`
fn is_app_config(path: &Path) -> bool {
    let name = display_name(path).to_ascii_lowercase();
    (name.starts_with("appsettings") && name.ends_with(".json")) || name == "applicationinsights.config"
}

/// Checks a file or directory for SDK usage and describes the outcome as text
pub fn check_for_app_insights(fs: &dyn FileSystem, path: &Path) -> String {
    if fs.is_file(path) {
        check_file(fs, path)
    } else if fs.is_dir(path) {
        check_directory(fs, path)
    } else {
        format!("Error: The file or directory {} does not exist.", path.display())
    }
}

fn check_file(fs: &dyn FileSystem, path: &Path) -> String {
    let content = match fs.read_to_string(path) {
        Ok(content) => content,
        Err(e) => return format!("Error: Failed to read {}: {:#}", path.display(), e),
    };

    let kind = classify(path);
    debug!(path = %path.display(), ?kind, "Checking single file");

    match kind {
        FileKind::Project if manifest_uses_sdk(&content) => {
            format!("Application Insights SDK detected in the project file. {}", RECOMMENDATION)
        }
        FileKind::Source if source_uses_sdk(&content) => {
            format!("Application Insights SDK usage detected in the C# file. {}", RECOMMENDATION)
        }
        FileKind::Config if config_uses_sdk(&content) => {
            format!("Application Insights configuration detected in the settings file. {}", RECOMMENDATION)
        }
        _ => {
            let extension = path
                .extension()
                .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
                .unwrap_or_default();
            format!("No Application Insights SDK usage detected in the {} file.", extension)
        }
    }
}

/// File hits collected by a sweep, capped at [`MAX_FINDINGS`]
#[derive(Debug, Default)]
struct Hits {
    items: Vec<String>,
    truncated: bool,
}

impl Hits {
    fn record(&mut self, item: String) -> ControlFlow<()> {
        if self.items.len() >= MAX_FINDINGS {
            self.truncated = true;
            return ControlFlow::Break(());
        }
        self.items.push(item);
        ControlFlow::Continue(())
    }

    /// Checks each file with `detect` and records matches under `label`
    fn scan(
        &mut self,
        fs: &dyn FileSystem,
        files: &[PathBuf],
        label: &str,
        detect: fn(&str) -> bool,
    ) -> ControlFlow<()> {
        for file in files {
            let content = match fs.read_to_string(file) {
                Ok(content) => content,
                Err(e) => {
                    warn!(path = %file.display(), error = %e, "Skipping unreadable file");
                    continue;
                }
            };
            if detect(&content) {
                self.record(format!("{}: {}", label, display_name(file)))?;
            }
        }
        ControlFlow::Continue(())
    }

    fn lines(&self) -> Vec<&str> {
        let mut lines: Vec<&str> = self.items.iter().map(String::as_str).collect();
        if self.truncated {
            lines.push(TRUNCATION_MARKER);
        }
        lines
    }
}

fn check_directory(fs: &dyn FileSystem, dir: &Path) -> String {
    let all_files = match fs.walk_files(dir) {
        Ok(files) => files,
        Err(e) => return format!("Error: Failed to read directory {}: {:#}", dir.display(), e),
    };
    let with_extension = |ext: &str| -> Vec<PathBuf> {
        all_files.iter().filter(|p| has_extension(p, ext)).cloned().collect()
    };

    let manifests = with_extension(MANIFEST_EXTENSION);
    let sources = with_extension(SOURCE_EXTENSION);
    let properties: Vec<PathBuf> = PROPERTY_EXTENSIONS.iter().flat_map(|ext| with_extension(*ext)).collect();
    let app_configs: Vec<PathBuf> = all_files.iter().filter(|p| is_app_config(p)).cloned().collect();

    let mut hits = Hits::default();
    let groups: [(&[PathBuf], &str, fn(&str) -> bool); 4] = [
        (manifests.as_slice(), "Project file", manifest_uses_sdk),
        (sources.as_slice(), "C# file", source_uses_sdk),
        (properties.as_slice(), "Properties file", config_uses_sdk),
        (app_configs.as_slice(), "Config file", config_uses_sdk),
    ];
    for (files, label, detect) in groups {
        if hits.scan(fs, files, label, detect).is_break() {
            break;
        }
    }

    debug!(
        dir = %dir.display(),
        hits = hits.items.len(),
        truncated = hits.truncated,
        "Directory sweep complete"
    );

    if hits.items.is_empty() {
        return DIRECTORY_MISS_MESSAGE.to_string();
    }

    format!(
        "Application Insights SDK usage detected in the directory.\n\
         Files with Application Insights references:\n- {}\n\n\
         Run the analyze command for detailed findings and migration suggestions.",
        hits.lines().join("\n- ")
    )
}
