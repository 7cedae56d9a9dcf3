//! Text matching primitives shared by every strategy
//!
//! Detection is substring or regex search over whole-file text. There is no
//! parsing; a marker inside a comment counts the same as one in code.

use super::context::ProjectAnalysisContext;
use crate::rules::{DetectionPattern, FileCategory};
use regex::Regex;
use std::path::Path;

/// Literal substring or regex search over file content
#[derive(Debug, Clone)]
pub enum ContentMatcher {
    Literal(String),
    Regex(Regex),
}

impl ContentMatcher {
    pub fn literal(pattern: impl Into<String>) -> Self {
        ContentMatcher::Literal(pattern.into())
    }

    pub fn regex(pattern: &str) -> Result<Self, regex::Error> {
        Regex::new(pattern).map(ContentMatcher::Regex)
    }

    pub fn is_match(&self, content: &str) -> bool {
        match self {
            ContentMatcher::Literal(needle) => content.contains(needle.as_str()),
            ContentMatcher::Regex(re) => re.is_match(content),
        }
    }
}

/// Translates a `*` / `?` wildcard into an anchored regex
pub fn wildcard_to_regex(pattern: &str) -> String {
    format!(
        "^{}$",
        regex::escape(pattern).replace(r"\*", ".*").replace(r"\?", ".")
    )
}

/// File-name filter built from a wildcard pattern
#[derive(Debug, Clone)]
pub struct FileNameFilter(Regex);

impl FileNameFilter {
    pub fn new(wildcard: &str) -> Result<Self, regex::Error> {
        Regex::new(&wildcard_to_regex(wildcard)).map(FileNameFilter)
    }

    pub fn matches(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|n| n.to_str())
            .map(|name| self.0.is_match(name))
            .unwrap_or(false)
    }
}

/// A [`DetectionPattern`] with its regexes compiled once
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    category: FileCategory,
    matcher: ContentMatcher,
    file_filter: Option<FileNameFilter>,
}

impl CompiledPattern {
    pub fn compile(pattern: &DetectionPattern) -> Result<Self, regex::Error> {
        let matcher = if pattern.is_regex {
            ContentMatcher::regex(&pattern.pattern)?
        } else {
            ContentMatcher::literal(pattern.pattern.clone())
        };
        let file_filter = pattern.file_name_filter().map(FileNameFilter::new).transpose()?;

        Ok(Self {
            category: pattern.file_type.clone(),
            matcher,
            file_filter,
        })
    }

    /// True when any eligible file in the pattern's category matches its content
    pub fn matches_project(&self, context: &ProjectAnalysisContext<'_>) -> bool {
        context
            .files(&self.category)
            .iter()
            .filter(|file| {
                self.file_filter
                    .as_ref()
                    .map(|filter| filter.matches(file))
                    .unwrap_or(true)
            })
            .any(|file| {
                context
                    .read(file)
                    .map(|content| self.matcher.is_match(&content))
                    .unwrap_or(false)
            })
    }
}
