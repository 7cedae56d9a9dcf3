//! azmon-migrator - Application Insights SDK to Azure Monitor OpenTelemetry migration assistant
//!
//! Scans C# projects for Application Insights SDK usage and produces migration
//! guidance: findings, suggestions, ordered steps and replacement sample code.
//!
//! # Core Concepts
//!
//! - **Strategy**: detection heuristic plus migration content for one application
//!   type (ASP.NET Core, Console, Worker Service, or a custom rule)
//! - **Rule definition**: a JSON/YAML/TOML file describing a custom application
//!   type; loaded at start-up and registered ahead of the built-in strategies
//! - **Registry**: ordered strategies, first match wins
//! - **Migrator**: the context object built once at start-up that serves every
//!   operation
//!
//! # Example Usage
//!
//! ```no_run
//! use azmon_migrator::{Migrator, MigratorConfig};
//! use std::path::Path;
//!
//! let config = MigratorConfig::default();
//! config.validate().expect("Invalid configuration");
//!
//! let migrator = Migrator::initialize(config);
//! println!("{}", migrator.check_for_app_insights(Path::new("./MyWebApp")));
//! println!("{}", migrator.analyze_project(Path::new("./MyWebApp")));
//! ```
//!
//! # Project Structure
//!
//! - [`fs`]: file system abstraction with real and in-memory implementations
//! - [`rules`]: rule definitions and the on-disk rule store
//! - [`detection`]: project context, pattern matching and SDK indicators
//! - [`strategy`]: the `Strategy` trait and its implementations
//! - [`registry`]: strategy registration and resolution
//! - [`report`]: migration report and rendering
//! - [`sweep`]: lightweight presence check
//! - [`migrator`]: the public text operations

pub mod cli;
pub mod config;
pub mod detection;
pub mod fs;
pub mod migrator;
pub mod registry;
pub mod report;
pub mod rules;
pub mod strategy;
pub mod sweep;
pub mod util;

pub use config::{ConfigError, MigratorConfig};
pub use detection::ProjectAnalysisContext;
pub use migrator::{Migrator, MigratorError};
pub use registry::{RegistryError, StrategyRegistry};
pub use report::MigrationReport;
pub use rules::{DetectionPattern, FileCategory, RuleDefinition, RuleStore, RuleStoreError};
pub use strategy::Strategy;
pub use util::{init_from_env, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
