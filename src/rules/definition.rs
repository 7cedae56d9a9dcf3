//! Rule definitions
//!
//! A [`RuleDefinition`] describes one application archetype: how to recognize it
//! in a project, which strings signal Application Insights usage, and the
//! migration content to hand back. Definitions are plain data; behavior lives in
//! [`crate::strategy::DataDrivenStrategy`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which file list a detection pattern is evaluated against
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileCategory {
    /// `*.csproj` project files
    ProjectManifest,
    /// `*.cs` source files
    SourceFile,
    /// Anything else; kept verbatim so it survives a save, never matches
    Other(String),
}

impl FileCategory {
    pub fn as_str(&self) -> &str {
        match self {
            FileCategory::ProjectManifest => "csproj",
            FileCategory::SourceFile => "cs",
            FileCategory::Other(tag) => tag,
        }
    }
}

impl From<String> for FileCategory {
    fn from(tag: String) -> Self {
        match tag.to_ascii_lowercase().as_str() {
            "csproj" => FileCategory::ProjectManifest,
            "cs" => FileCategory::SourceFile,
            _ => FileCategory::Other(tag),
        }
    }
}

impl From<FileCategory> for String {
    fn from(category: FileCategory) -> Self {
        category.as_str().to_string()
    }
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for FileCategory {
    fn default() -> Self {
        FileCategory::Other(String::new())
    }
}

/// Pattern used to classify a project into an archetype
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DetectionPattern {
    #[serde(with = "category_tag")]
    pub file_type: FileCategory,
    pub pattern: String,
    pub is_regex: bool,
    /// Optional file-name filter with `*` / `?` wildcards, e.g. `Program.cs`, `*.Api.csproj`
    pub file_name: String,
}

impl DetectionPattern {
    pub fn literal(file_type: FileCategory, pattern: impl Into<String>) -> Self {
        Self {
            file_type,
            pattern: pattern.into(),
            is_regex: false,
            file_name: String::new(),
        }
    }

    pub fn regex(file_type: FileCategory, pattern: impl Into<String>) -> Self {
        Self {
            is_regex: true,
            ..Self::literal(file_type, pattern)
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    pub fn file_name_filter(&self) -> Option<&str> {
        if self.file_name.is_empty() {
            None
        } else {
            Some(&self.file_name)
        }
    }
}

/// One archetype's detection patterns, SDK indicators and migration content
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct RuleDefinition {
    pub app_type: String,
    pub detection_patterns: Vec<DetectionPattern>,
    pub app_insights_indicators: Vec<String>,
    pub migration_suggestions: Vec<String>,
    pub sample_code: String,
    pub migration_steps: Vec<String>,
}

/// Field names of the on-disk representation, used to accept any key casing
pub(crate) const FIELD_NAMES: &[&str] = &[
    "AppType",
    "DetectionPatterns",
    "AppInsightsIndicators",
    "MigrationSuggestions",
    "SampleCode",
    "MigrationSteps",
    "FileType",
    "Pattern",
    "IsRegex",
    "FileName",
];

impl RuleDefinition {
    /// Editable starting point written by `create-rule`
    pub fn template(app_type: &str) -> Self {
        Self {
            app_type: app_type.to_string(),
            detection_patterns: vec![DetectionPattern::literal(
                FileCategory::ProjectManifest,
                "YourDetectionPattern",
            )],
            app_insights_indicators: vec![
                "Microsoft.ApplicationInsights".to_string(),
                "TelemetryClient".to_string(),
            ],
            migration_suggestions: vec![format!("Custom migration suggestion for {}", app_type)],
            migration_steps: vec![
                format!("1. Migration step 1 for {}", app_type),
                format!("2. Migration step 2 for {}", app_type),
            ],
            sample_code: format!("```csharp\n// Sample migration code for {}\n```", app_type),
        }
    }
}

mod category_tag {
    use super::FileCategory;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(category: &FileCategory, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(category.as_str())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<FileCategory, D::Error> {
        String::deserialize(deserializer).map(FileCategory::from)
    }
}
