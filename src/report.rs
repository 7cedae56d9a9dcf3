//! Migration report and its text rendering

use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

pub const NO_USAGE_MESSAGE: &str =
    "No Application Insights SDK usage detected in the provided project path.";

/// Result of running one strategy over a project
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MigrationReport {
    /// Archetype of the strategy that produced the report
    pub app_type: Option<String>,
    /// True when no strategy matched and the fallback archetype was used
    pub used_fallback: bool,
    pub findings: Vec<String>,
    pub suggestions: Vec<String>,
    pub migration_steps: String,
    pub sample_code: String,
}

impl MigrationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_app_insights_references(&self) -> bool {
        !self.findings.is_empty()
    }

    pub fn add_finding(&mut self, finding: impl Into<String>) {
        self.findings.push(finding.into());
    }

    pub fn add_suggestion(&mut self, suggestion: impl Into<String>) {
        self.suggestions.push(suggestion.into());
    }

    /// Drops repeated suggestions, keeping the first occurrence of each
    pub fn dedup_suggestions(&mut self) {
        let mut seen = HashSet::new();
        self.suggestions.retain(|s| seen.insert(s.clone()));
    }

    /// Markdown-style rendering: Findings, Migration Suggestions, Migration
    /// Steps and, when present, Sample Code. A report without findings renders
    /// as a single line.
    pub fn render(&self) -> String {
        if self.findings.is_empty() {
            return NO_USAGE_MESSAGE.to_string();
        }

        let mut out = String::new();
        out.push_str("## Application Insights SDK Detection Results\n\n");

        out.push_str("### Findings:\n");
        for finding in &self.findings {
            out.push_str(&format!("- {}\n", finding));
        }

        out.push_str("\n### Migration Suggestions:\n");
        for suggestion in &self.suggestions {
            out.push_str(&format!("- {}\n", suggestion));
        }

        out.push_str("\n### Migration Steps:\n");
        out.push_str(&self.migration_steps);
        out.push('\n');

        if !self.sample_code.is_empty() {
            out.push_str("\n### Sample Code:\n");
            out.push_str(&self.sample_code);
            out.push('\n');
        }

        out
    }
}

impl fmt::Display for MigrationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
