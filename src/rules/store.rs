//! Rule store
//!
//! Loads [`RuleDefinition`]s from a directory (one definition per file) and
//! persists new templates. JSON, YAML and TOML files are accepted; field names
//! are matched case-insensitively. Writes are plain overwrites with no locking.

use super::definition::{RuleDefinition, FIELD_NAMES};
use serde_json::{Map, Value};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

const RULE_EXTENSIONS: &[&str] = &["json", "yaml", "yml", "toml"];

#[derive(Debug, Error)]
pub enum RuleStoreError {
    #[error("Rule file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to parse rule from {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Failed to access {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
}

/// Rule definitions stored one per file in a directory
#[derive(Debug, Clone)]
pub struct RuleStore {
    rules_dir: PathBuf,
}

impl RuleStore {
    pub fn new(rules_dir: impl Into<PathBuf>) -> Self {
        Self {
            rules_dir: rules_dir.into(),
        }
    }

    pub fn rules_dir(&self) -> &Path {
        &self.rules_dir
    }

    /// Loads every rule file in the directory, in file-name order.
    ///
    /// A file that fails to parse is logged and skipped. A missing directory
    /// yields no rules.
    pub fn load_all(&self) -> Vec<RuleDefinition> {
        if !self.rules_dir.is_dir() {
            debug!(dir = %self.rules_dir.display(), "Rules directory not found, no rules loaded");
            return Vec::new();
        }

        let mut files = match self.rule_files() {
            Ok(files) => files,
            Err(e) => {
                warn!(dir = %self.rules_dir.display(), error = %e, "Failed to list rules directory");
                return Vec::new();
            }
        };
        files.sort();

        let mut rules = Vec::new();
        for file in files {
            match self.load_one(&file) {
                Ok(rule) => {
                    debug!(path = %file.display(), app_type = %rule.app_type, "Loaded rule");
                    rules.push(rule);
                }
                Err(e) => {
                    warn!(path = %file.display(), error = %e, "Error loading rule, skipping");
                }
            }
        }

        info!(
            rule_count = rules.len(),
            dir = %self.rules_dir.display(),
            "Loaded migration rules"
        );
        rules
    }

    /// Loads a single rule file
    pub fn load_one(&self, path: &Path) -> Result<RuleDefinition, RuleStoreError> {
        if !path.is_file() {
            return Err(RuleStoreError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|source| RuleStoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        parse_rule(path, &content)
    }

    /// Writes `rule` as `<rules dir>/<file_name>`, creating the directory when absent
    pub fn save(&self, rule: &RuleDefinition, file_name: &str) -> Result<PathBuf, RuleStoreError> {
        let path = self.rules_dir.join(file_name);
        self.save_at(rule, &path)?;
        Ok(path)
    }

    /// Writes `rule` as pretty JSON to `path`, overwriting any existing file
    pub fn save_at(&self, rule: &RuleDefinition, path: &Path) -> Result<(), RuleStoreError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| RuleStoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let json = serde_json::to_string_pretty(rule).map_err(|e| RuleStoreError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        fs::write(path, json).map_err(|source| RuleStoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        info!(path = %path.display(), app_type = %rule.app_type, "Saved migration rule");
        Ok(())
    }

    fn rule_files(&self) -> io::Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(&self.rules_dir)? {
            let path = entry?.path();
            if path.is_file() && RULE_EXTENSIONS.iter().any(|ext| crate::fs::has_extension(&path, ext)) {
                files.push(path);
            }
        }
        Ok(files)
    }
}

fn parse_rule(path: &Path, content: &str) -> Result<RuleDefinition, RuleStoreError> {
    let parse_error = |message: String| RuleStoreError::Parse {
        path: path.to_path_buf(),
        message,
    };

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("json")
        .to_ascii_lowercase();

    let value: Value = match ext.as_str() {
        "yaml" | "yml" => serde_yaml::from_str(content).map_err(|e| parse_error(e.to_string()))?,
        "toml" => toml::from_str(content).map_err(|e| parse_error(e.to_string()))?,
        _ => serde_json::from_str(content).map_err(|e| parse_error(e.to_string()))?,
    };

    if !value.is_object() {
        return Err(parse_error("expected a rule object".to_string()));
    }

    serde_json::from_value(canonicalize_keys(value)).map_err(|e| parse_error(e.to_string()))
}

/// Renames object keys to their canonical casing so `apptype`, `appType` and
/// `AppType` all deserialize into the same field
fn canonicalize_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut canonical = Map::with_capacity(map.len());
            for (key, val) in map {
                let key = FIELD_NAMES
                    .iter()
                    .find(|name| name.eq_ignore_ascii_case(&key))
                    .map(|name| name.to_string())
                    .unwrap_or(key);
                canonical.insert(key, canonicalize_keys(val));
            }
            Value::Object(canonical)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(canonicalize_keys).collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::FileCategory;
    use tempfile::TempDir;

    const BLAZOR_RULE: &str = r#"{
  "appType": "Blazor",
  "detectionPatterns": [
    { "fileType": "CSPROJ", "pattern": "Microsoft.AspNetCore.Components", "isRegex": false }
  ],
  "APPINSIGHTSINDICATORS": ["TelemetryClient"],
  "migrationSuggestions": ["Use Azure.Monitor.OpenTelemetry.AspNetCore"],
  "migrationSteps": ["1. Add package", "2. Configure"],
  "sampleCode": "// blazor"
}"#;

    #[test]
    fn test_load_all_missing_directory() {
        let temp = TempDir::new().unwrap();
        let store = RuleStore::new(temp.path().join("Rules"));
        assert!(store.load_all().is_empty());
    }

    #[test]
    fn test_load_one_case_insensitive_fields() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("blazor.json");
        fs::write(&path, BLAZOR_RULE).unwrap();

        let rule = RuleStore::new(temp.path()).load_one(&path).unwrap();

        assert_eq!(rule.app_type, "Blazor");
        assert_eq!(rule.detection_patterns.len(), 1);
        assert_eq!(rule.detection_patterns[0].file_type, FileCategory::ProjectManifest);
        assert_eq!(rule.app_insights_indicators, vec!["TelemetryClient"]);
        assert_eq!(rule.migration_steps.len(), 2);
        assert_eq!(rule.sample_code, "// blazor");
    }

    #[test]
    fn test_load_one_not_found() {
        let temp = TempDir::new().unwrap();
        let result = RuleStore::new(temp.path()).load_one(&temp.path().join("missing.json"));
        assert!(matches!(result, Err(RuleStoreError::NotFound(_))));
    }

    #[test]
    fn test_load_one_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        let result = RuleStore::new(temp.path()).load_one(&path);
        assert!(matches!(result, Err(RuleStoreError::Parse { .. })));
    }

    #[test]
    fn test_load_one_rejects_non_object() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("list.json");
        fs::write(&path, "[1, 2, 3]").unwrap();

        let result = RuleStore::new(temp.path()).load_one(&path);
        assert!(matches!(result, Err(RuleStoreError::Parse { .. })));
    }

    #[test]
    fn test_load_all_skips_broken_files() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a_blazor.json"), BLAZOR_RULE).unwrap();
        fs::write(temp.path().join("b_broken.json"), "{ nope").unwrap();
        fs::write(temp.path().join("notes.txt"), "ignored").unwrap();

        let rules = RuleStore::new(temp.path()).load_all();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].app_type, "Blazor");
    }

    #[test]
    fn test_load_yaml_and_toml_rules() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("functions.yaml"),
            "appType: Azure Functions\ndetectionPatterns:\n  - fileType: csproj\n    pattern: Microsoft.NET.Sdk.Functions\n",
        )
        .unwrap();
        fs::write(
            temp.path().join("maui.toml"),
            "AppType = \"MAUI\"\nSampleCode = \"// maui\"\n\n[[DetectionPatterns]]\nFileType = \"csproj\"\nPattern = \"<UseMaui>true</UseMaui>\"\n",
        )
        .unwrap();

        let rules = RuleStore::new(temp.path()).load_all();
        let names: Vec<&str> = rules.iter().map(|r| r.app_type.as_str()).collect();

        assert_eq!(names, vec!["Azure Functions", "MAUI"]);
        assert_eq!(rules[1].detection_patterns[0].pattern, "<UseMaui>true</UseMaui>");
    }

    #[test]
    fn test_save_creates_directory_and_round_trips() {
        let temp = TempDir::new().unwrap();
        let store = RuleStore::new(temp.path().join("nested/Rules"));
        let rule = RuleDefinition::template("Azure Functions");

        let path = store.save(&rule, "azure_functions.json").unwrap();
        assert!(path.is_file());

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"AppType\": \"Azure Functions\""));
        assert!(written.contains("\"FileType\": \"csproj\""));

        assert_eq!(store.load_one(&path).unwrap(), rule);
    }

    #[test]
    fn test_save_overwrites_existing() {
        let temp = TempDir::new().unwrap();
        let store = RuleStore::new(temp.path());

        store.save(&RuleDefinition::template("First"), "rule.json").unwrap();
        store.save(&RuleDefinition::template("Second"), "rule.json").unwrap();

        let rules = store.load_all();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].app_type, "Second");
    }
}
