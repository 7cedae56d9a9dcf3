//! Ordered strategy registry
//!
//! Resolution is first-match-wins over registration order, so data-driven
//! strategies are registered ahead of the hardcoded archetypes and shadow any
//! hardcoded strategy with the same name.

use crate::detection::ProjectAnalysisContext;
use crate::rules::RuleDefinition;
use crate::strategy::{hardcoded_strategies, DataDrivenStrategy, Strategy};
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("No registered strategy matches the project")]
    NoMatch,

    #[error("No strategy registered for app type '{0}'")]
    NotFound(String),
}

#[derive(Default)]
pub struct StrategyRegistry {
    strategies: Vec<Box<dyn Strategy>>,
}

impl StrategyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Data-driven strategies for `rules` (in order), followed by the built-in archetypes
    pub fn with_rules(rules: Vec<RuleDefinition>) -> Self {
        let mut registry = Self::new();

        for rule in rules {
            registry.register(Box::new(DataDrivenStrategy::new(rule)));
        }
        for strategy in hardcoded_strategies() {
            registry.register(strategy);
        }

        info!(strategies = registry.len(), "Strategy registry initialized");
        registry
    }

    /// Appends a strategy. No de-duplication takes place.
    pub fn register(&mut self, strategy: Box<dyn Strategy>) {
        debug!(app_type = strategy.app_type_name(), "Registering strategy");
        self.strategies.push(strategy);
    }

    /// First registered strategy that can handle the project
    pub fn resolve(&self, context: &ProjectAnalysisContext<'_>) -> Result<&dyn Strategy, RegistryError> {
        let strategy = self
            .strategies
            .iter()
            .find(|s| s.can_handle(context))
            .map(|s| s.as_ref())
            .ok_or(RegistryError::NoMatch)?;

        debug!(app_type = strategy.app_type_name(), "Resolved strategy");
        Ok(strategy)
    }

    /// Case-insensitive lookup by archetype name, folding non-ASCII letters too
    pub fn by_name(&self, app_type: &str) -> Result<&dyn Strategy, RegistryError> {
        let wanted = app_type.to_lowercase();
        self.strategies
            .iter()
            .find(|s| s.app_type_name().to_lowercase() == wanted)
            .map(|s| s.as_ref())
            .ok_or_else(|| RegistryError::NotFound(app_type.to_string()))
    }

    /// Distinct archetype names in registration order
    pub fn app_type_names(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.strategies
            .iter()
            .map(|s| s.app_type_name())
            .filter(|name| seen.insert(*name))
            .map(str::to_string)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}
