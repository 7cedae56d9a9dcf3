use super::Strategy;
use crate::detection::indicators::scan_indicators;
use crate::detection::{CompiledPattern, ProjectAnalysisContext};
use crate::report::MigrationReport;
use crate::rules::RuleDefinition;
use tracing::{debug, warn};

/// Strategy whose detection and content come entirely from a [`RuleDefinition`]
pub struct DataDrivenStrategy {
    rule: RuleDefinition,
    patterns: Vec<CompiledPattern>,
}

impl DataDrivenStrategy {
    /// Compiles the rule's detection patterns. A pattern whose regex or file-name
    /// filter does not compile is dropped with a warning.
    pub fn new(rule: RuleDefinition) -> Self {
        let patterns = rule
            .detection_patterns
            .iter()
            .filter_map(|pattern| match CompiledPattern::compile(pattern) {
                Ok(compiled) => Some(compiled),
                Err(e) => {
                    warn!(
                        app_type = %rule.app_type,
                        pattern = %pattern.pattern,
                        error = %e,
                        "Ignoring detection pattern that does not compile"
                    );
                    None
                }
            })
            .collect();

        Self { rule, patterns }
    }
}

impl Strategy for DataDrivenStrategy {
    fn app_type_name(&self) -> &str {
        &self.rule.app_type
    }

    fn can_handle(&self, context: &ProjectAnalysisContext<'_>) -> bool {
        let matched = self.patterns.iter().any(|p| p.matches_project(context));
        debug!(app_type = %self.rule.app_type, matched, "Evaluated rule detection patterns");
        matched
    }

    fn generate_migration(&self, context: &ProjectAnalysisContext<'_>) -> MigrationReport {
        let mut report = MigrationReport::new();
        report.app_type = Some(self.rule.app_type.clone());
        report.findings = scan_indicators(context, &self.rule.app_insights_indicators);
        report.suggestions = self.rule.migration_suggestions.clone();
        report.dedup_suggestions();
        report.migration_steps = self.rule.migration_steps.join("\n\n");
        report.sample_code = self.rule.sample_code.clone();
        report
    }

    fn generate_sample_code(&self) -> String {
        self.rule.sample_code.clone()
    }
}
