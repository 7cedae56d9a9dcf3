//! Output formatting for reports, app type lists and configuration
//!
//! # Example
//!
//! ```ignore
//! use azmon_migrator::cli::output::{OutputFormat, OutputFormatter};
//!
//! let formatter = OutputFormatter::new(OutputFormat::Json);
//! let output = formatter.format_report(&report)?;
//! println!("{}", output);
//! ```

use anyhow::{Context, Result};
use serde::Serialize;

use crate::config::MigratorConfig;
use crate::report::MigrationReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// YAML format
    Yaml,
    /// The Markdown-style report text
    Human,
}

/// Report plus the derived presence flag, as written by the structured formats
#[derive(Serialize)]
struct ReportDocument<'a> {
    #[serde(flatten)]
    report: &'a MigrationReport,
    has_app_insights_references: bool,
}

impl<'a> From<&'a MigrationReport> for ReportDocument<'a> {
    fn from(report: &'a MigrationReport) -> Self {
        Self {
            report,
            has_app_insights_references: report.has_app_insights_references(),
        }
    }
}

#[derive(Serialize)]
struct AppTypesDocument<'a> {
    app_types: &'a [String],
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format_report(&self, report: &MigrationReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(&ReportDocument::from(report))
                .context("Failed to serialize migration report to JSON"),
            OutputFormat::Yaml => serde_yaml::to_string(&ReportDocument::from(report))
                .context("Failed to serialize migration report to YAML"),
            OutputFormat::Human => Ok(report.render()),
        }
    }

    pub fn format_app_types(&self, app_types: &[String]) -> Result<String> {
        let document = AppTypesDocument { app_types };
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(&document)
                .context("Failed to serialize app types to JSON"),
            OutputFormat::Yaml => {
                serde_yaml::to_string(&document).context("Failed to serialize app types to YAML")
            }
            OutputFormat::Human => Ok(format!(
                "Supported application types for migration: {}",
                app_types.join(", ")
            )),
        }
    }

    pub fn format_config(&self, config: &MigratorConfig) -> Result<String> {
        let config_map: std::collections::BTreeMap<_, _> = config.to_display_map().into_iter().collect();
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(&config_map).context("Failed to serialize config to JSON")
            }
            OutputFormat::Yaml => {
                serde_yaml::to_string(&config_map).context("Failed to serialize config to YAML")
            }
            OutputFormat::Human => Ok(config.to_string()),
        }
    }
}
