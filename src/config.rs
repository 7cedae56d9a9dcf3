//! Configuration management for azmon-migrator
//!
//! Settings are loaded from environment variables with defaults, then checked
//! with [`MigratorConfig::validate`] before the migrator is built.
//!
//! # Environment Variables
//!
//! - `AZMON_RULES_DIR`: Directory holding rule definition files - default: `Rules` next to the executable
//! - `AZMON_FALLBACK_APP_TYPE`: App type used when no strategy matches a project - default: "ASP.NET Core"
//! - `AZMON_LOG_LEVEL`: Logging level - default: "info"
//!
//! # Example
//!
//! ```no_run
//! use azmon_migrator::MigratorConfig;
//!
//! let config = MigratorConfig::default();
//! config.validate().expect("Invalid configuration");
//! println!("{}", config);
//! ```

use std::collections::HashMap;
use std::env;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

const DEFAULT_RULES_DIR_NAME: &str = "Rules";
pub const DEFAULT_FALLBACK_APP_TYPE: &str = "ASP.NET Core";
const DEFAULT_LOG_LEVEL: &str = "info";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    /// Failed to parse configuration value
    #[error("Failed to parse {field}: {error}")]
    ParseError { field: String, error: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigratorConfig {
    /// Directory scanned for rule definitions at start-up
    pub rules_dir: PathBuf,

    /// App type used when no registered strategy can handle a project
    pub fallback_app_type: String,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for MigratorConfig {
    /// Reads `AZMON_*` variables, falling back to defaults for anything unset
    fn default() -> Self {
        let rules_dir = env::var("AZMON_RULES_DIR")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_rules_dir);

        let fallback_app_type = env::var("AZMON_FALLBACK_APP_TYPE")
            .unwrap_or_else(|_| DEFAULT_FALLBACK_APP_TYPE.to_string());

        let log_level = env::var("AZMON_LOG_LEVEL")
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        Self {
            rules_dir,
            fallback_app_type,
            log_level,
        }
    }
}

/// `Rules` beside the running executable, or `./Rules` when that is unknown
pub fn default_rules_dir() -> PathBuf {
    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(DEFAULT_RULES_DIR_NAME)))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_RULES_DIR_NAME))
}

impl MigratorConfig {
    pub fn with_rules_dir(mut self, rules_dir: impl Into<PathBuf>) -> Self {
        self.rules_dir = rules_dir.into();
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fallback_app_type.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "Fallback app type cannot be empty".to_string(),
            ));
        }

        if self.rules_dir.as_os_str().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "Rules directory cannot be empty".to_string(),
            ));
        }

        if self.rules_dir.is_file() {
            return Err(ConfigError::ParseError {
                field: "AZMON_RULES_DIR".to_string(),
                error: format!("{} is a file, expected a directory", self.rules_dir.display()),
            });
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        Ok(())
    }

    pub fn to_display_map(&self) -> HashMap<String, String> {
        let mut map = HashMap::new();
        map.insert("rules_dir".to_string(), self.rules_dir.display().to_string());
        map.insert("fallback_app_type".to_string(), self.fallback_app_type.clone());
        map.insert("log_level".to_string(), self.log_level.clone());
        map
    }
}

impl fmt::Display for MigratorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Migrator Configuration:")?;
        writeln!(f, "  Rules Dir: {}", self.rules_dir.display())?;
        writeln!(f, "  Fallback App Type: {}", self.fallback_app_type)?;
        writeln!(f, "  Log Level: {}", self.log_level)?;
        Ok(())
    }
}
