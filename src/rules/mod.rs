//! Externally defined migration rules

pub mod definition;
pub mod store;

pub use definition::{DetectionPattern, FileCategory, RuleDefinition};
pub use store::{RuleStore, RuleStoreError};
