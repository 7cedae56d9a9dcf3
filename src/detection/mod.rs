//! Text-based detection over project files
//!
//! - [`context`]: the per-request file lists strategies read from
//! - [`matcher`]: literal / regex content predicates and wildcard file-name filters
//! - [`indicators`]: Application Insights markers and the indicator scan

pub mod context;
pub mod indicators;
pub mod matcher;

pub use context::ProjectAnalysisContext;
pub use matcher::{CompiledPattern, ContentMatcher, FileNameFilter};
