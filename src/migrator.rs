//! Migration service
//!
//! [`Migrator`] is built once at start-up: it loads rule definitions, builds
//! the strategy registry and then serves the five text operations. Nothing in
//! it is mutated after construction.
//!
//! Every public operation returns text for both success and failure; the
//! `*_report` / `create_rule_file` variants expose the typed errors.
//!
//! # Example
//!
//! ```no_run
//! use azmon_migrator::{Migrator, MigratorConfig};
//! use std::path::Path;
//!
//! let migrator = Migrator::initialize(MigratorConfig::default());
//! println!("{}", migrator.analyze_project(Path::new("./MyWebApp")));
//! println!("{}", migrator.generate_migration_code("Console"));
//! ```

use crate::config::MigratorConfig;
use crate::detection::ProjectAnalysisContext;
use crate::fs::{FileSystem, RealFileSystem};
use crate::registry::{RegistryError, StrategyRegistry};
use crate::report::MigrationReport;
use crate::rules::{RuleDefinition, RuleStore, RuleStoreError};
use crate::sweep;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

const RULE_FILE_EXTENSION: &str = ".json";

/// Errors surfaced by migrator operations
#[derive(Debug, Error)]
pub enum MigratorError {
    /// Project directory does not exist
    #[error("Directory {0} does not exist.")]
    DirectoryNotFound(PathBuf),

    /// Neither a file nor a directory exists at the path
    #[error("The file or directory {0} does not exist.")]
    FileNotFound(PathBuf),

    /// Reading or writing a rule definition failed
    #[error(transparent)]
    Rules(#[from] RuleStoreError),

    /// Strategy resolution or lookup failed
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Enumerating project files failed
    #[error("Failed to scan {path}: {message}")]
    Io { path: PathBuf, message: String },
}

pub struct Migrator {
    fs: Box<dyn FileSystem>,
    registry: StrategyRegistry,
    store: RuleStore,
    config: MigratorConfig,
}

impl std::fmt::Debug for Migrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Migrator")
            .field("app_types", &self.registry.app_type_names())
            .field("rules_dir", &self.store.rules_dir())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Migrator {
    /// Loads every rule from `config.rules_dir` and registers them ahead of the
    /// built-in strategies. Projects are read from the real file system.
    pub fn initialize(config: MigratorConfig) -> Self {
        Self::with_file_system(Box::new(RealFileSystem), config)
    }

    pub fn with_file_system(fs: Box<dyn FileSystem>, config: MigratorConfig) -> Self {
        let store = RuleStore::new(config.rules_dir.clone());
        let registry = StrategyRegistry::with_rules(store.load_all());

        info!(
            rules_dir = %store.rules_dir().display(),
            app_types = registry.app_type_names().len(),
            "Migrator initialized"
        );

        Self::from_parts(fs, registry, store, config)
    }

    /// Assembles a migrator from an already populated registry
    pub fn from_parts(
        fs: Box<dyn FileSystem>,
        registry: StrategyRegistry,
        store: RuleStore,
        config: MigratorConfig,
    ) -> Self {
        Self {
            fs,
            registry,
            store,
            config,
        }
    }

    pub fn registry(&self) -> &StrategyRegistry {
        &self.registry
    }

    pub fn config(&self) -> &MigratorConfig {
        &self.config
    }

    /// Analyzes a project directory and renders the report
    pub fn analyze_project(&self, project_path: &Path) -> String {
        match self.analyze_project_report(project_path) {
            Ok(report) => report.render(),
            Err(e) => format!("Error: {}", e),
        }
    }

    /// Resolves a strategy for the project and runs it.
    ///
    /// When no strategy matches, the configured fallback app type is used and
    /// the report is flagged with `used_fallback`.
    pub fn analyze_project_report(&self, project_path: &Path) -> Result<MigrationReport, MigratorError> {
        if !self.fs.is_dir(project_path) {
            return Err(MigratorError::DirectoryNotFound(project_path.to_path_buf()));
        }

        let context = ProjectAnalysisContext::scan(self.fs.as_ref(), project_path).map_err(|e| {
            MigratorError::Io {
                path: project_path.to_path_buf(),
                message: format!("{:#}", e),
            }
        })?;

        let (strategy, used_fallback) = match self.registry.resolve(&context) {
            Ok(strategy) => (strategy, false),
            Err(RegistryError::NoMatch) => {
                debug!(
                    fallback = %self.config.fallback_app_type,
                    "No strategy matched, using fallback app type"
                );
                (self.registry.by_name(&self.config.fallback_app_type)?, true)
            }
            Err(e) => return Err(e.into()),
        };

        info!(
            project = %project_path.display(),
            app_type = strategy.app_type_name(),
            used_fallback,
            "Analyzing project"
        );

        let mut report = strategy.generate_migration(&context);
        report.used_fallback = used_fallback;
        Ok(report)
    }

    /// Sample code for an app type, or the list of known app types when the
    /// name is not registered
    pub fn generate_migration_code(&self, app_type: &str) -> String {
        match self.registry.by_name(app_type) {
            Ok(strategy) => strategy.generate_sample_code(),
            Err(_) => format!(
                "Unsupported app type: '{}'. Supported types are: {}",
                app_type,
                self.registry.app_type_names().join(", ")
            ),
        }
    }

    /// Presence check on a single file or a whole directory
    pub fn check_for_app_insights(&self, path: &Path) -> String {
        if !self.fs.exists(path) {
            return format!("Error: {}", MigratorError::FileNotFound(path.to_path_buf()));
        }
        sweep::check_for_app_insights(self.fs.as_ref(), path)
    }

    pub fn list_supported_app_types(&self) -> String {
        format!(
            "Supported application types for migration: {}",
            self.registry.app_type_names().join(", ")
        )
    }

    /// Writes a rule template for `app_type` and describes where it went.
    ///
    /// The new rule is picked up on the next start; the running registry is
    /// left unchanged.
    pub fn create_migration_rule(&self, app_type: &str, rule_path: Option<&Path>) -> String {
        match self.create_rule_file(app_type, rule_path) {
            Ok(path) => format!(
                "Migration rule template created for '{}' at {}. \
                 Customize it with your specific detection patterns and migration steps.",
                app_type,
                path.display()
            ),
            Err(e) => {
                warn!(app_type, error = %e, "Failed to create migration rule");
                format!("Error creating migration rule: {}", e)
            }
        }
    }

    /// Saves a template to `rule_path` when it names a `.json` file, otherwise
    /// to `<rules dir>/<safe name>.json`
    pub fn create_rule_file(&self, app_type: &str, rule_path: Option<&Path>) -> Result<PathBuf, MigratorError> {
        let rule = RuleDefinition::template(app_type);

        match rule_path.filter(|p| is_rule_file_path(p)) {
            Some(path) => {
                self.store.save_at(&rule, path)?;
                Ok(path.to_path_buf())
            }
            None => {
                let file_name = format!("{}{}", safe_file_name(app_type), RULE_FILE_EXTENSION);
                Ok(self.store.save(&rule, &file_name)?)
            }
        }
    }
}

fn is_rule_file_path(path: &Path) -> bool {
    path.to_string_lossy()
        .to_ascii_lowercase()
        .ends_with(RULE_FILE_EXTENSION)
}

/// Lower-cased app type with every character outside `[A-Za-z0-9_-]` replaced by `_`
pub fn safe_file_name(app_type: &str) -> String {
    app_type
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
