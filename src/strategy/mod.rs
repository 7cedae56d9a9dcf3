//! Migration strategies
//!
//! A strategy pairs one application archetype's detection heuristic with the
//! migration content for that archetype. Two flavors exist:
//!
//! - [`DataDrivenStrategy`]: built from a [`crate::rules::RuleDefinition`] loaded at start-up
//! - hardcoded archetypes ([`WorkerServiceStrategy`], [`ConsoleStrategy`],
//!   [`AspNetCoreStrategy`]) that act as built-in fallbacks
//!
//! Strategies hold no mutable state; the same instance serves every request.

use crate::detection::ProjectAnalysisContext;
use crate::report::MigrationReport;

pub mod aspnet_core;
pub mod base;
pub mod console;
pub mod data_driven;
pub mod worker_service;

pub use aspnet_core::AspNetCoreStrategy;
pub use console::ConsoleStrategy;
pub use data_driven::DataDrivenStrategy;
pub use worker_service::WorkerServiceStrategy;

/// Detection and migration-content generation for one application archetype
pub trait Strategy: Send + Sync {
    /// Archetype name, e.g. "ASP.NET Core". Used for lookup and display.
    fn app_type_name(&self) -> &str;

    /// Whether the project looks like this archetype
    fn can_handle(&self, context: &ProjectAnalysisContext<'_>) -> bool;

    /// Scans the project and assembles findings, suggestions, steps and sample code.
    /// An empty findings list means nothing needs migrating.
    fn generate_migration(&self, context: &ProjectAnalysisContext<'_>) -> MigrationReport;

    /// Replacement code for this archetype
    fn generate_sample_code(&self) -> String;
}

/// Built-in strategies, most specific first
pub fn hardcoded_strategies() -> Vec<Box<dyn Strategy>> {
    vec![
        Box::new(WorkerServiceStrategy),
        Box::new(ConsoleStrategy),
        Box::new(AspNetCoreStrategy),
    ]
}
