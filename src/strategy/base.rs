//! Analysis shared by the hardcoded strategies

use crate::detection::indicators::{manifest_uses_sdk, track_method_regex};
use crate::detection::ProjectAnalysisContext;
use crate::fs::display_name;
use crate::report::MigrationReport;
use tracing::debug;

const STARTUP_FILES: &[&str] = &["Startup.cs", "Program.cs"];

/// Runs the generic project and source scan, appends the archetype's own
/// suggestions, then de-duplicates suggestions across both
pub fn generate(
    context: &ProjectAnalysisContext<'_>,
    app_type: &str,
    archetype_suggestions: &[&str],
    sample_code: String,
) -> MigrationReport {
    let mut report = MigrationReport::new();
    report.app_type = Some(app_type.to_string());

    analyze_project_files(context, &mut report);
    analyze_source_files(context, &mut report);

    for suggestion in archetype_suggestions {
        report.add_suggestion(*suggestion);
    }
    report.dedup_suggestions();

    report.migration_steps = generic_migration_steps();
    report.sample_code = sample_code;

    debug!(
        app_type,
        findings = report.findings.len(),
        suggestions = report.suggestions.len(),
        "Generated migration report"
    );
    report
}

pub fn analyze_project_files(context: &ProjectAnalysisContext<'_>, report: &mut MigrationReport) {
    for file in &context.manifest_files {
        let Some(content) = context.read(file) else {
            continue;
        };

        if manifest_uses_sdk(&content) {
            report.add_finding(format!(
                "Found Application Insights SDK reference in {}",
                display_name(file)
            ));
            report.add_suggestion(
                "Replace all Application Insights SDK packages with latest version of Azure.Monitor.OpenTelemetry.AspNetCore package",
            );
        }
    }
}

pub fn analyze_source_files(context: &ProjectAnalysisContext<'_>, report: &mut MigrationReport) {
    for file in &context.source_files {
        let Some(content) = context.read(file) else {
            continue;
        };
        let name = display_name(file);

        if content.contains("TelemetryClient") {
            report.add_finding(format!("Found TelemetryClient usage in {}", name));
            report.add_suggestion("Replace TelemetryClient with ActivitySource for tracking operations");
        }

        if content.contains("Microsoft.ApplicationInsights") {
            report.add_finding(format!("Found Microsoft.ApplicationInsights namespace in {}", name));
        }

        if track_method_regex().is_match(&content) {
            report.add_finding(format!("Found Track methods in {}", name));
            report.add_suggestion("Replace Track methods with OpenTelemetry equivalents");
        }

        let is_startup = STARTUP_FILES.iter().any(|s| s.eq_ignore_ascii_case(&name));
        if is_startup && content.contains("AddApplicationInsightsTelemetry") {
            report.add_finding(format!("Found AddApplicationInsightsTelemetry in {}", name));
            report.add_suggestion(
                "Replace AddApplicationInsightsTelemetry with AddOpenTelemetry().UseAzureMonitor()",
            );
        }
    }
}

/// Checklist shared by every hardcoded archetype
pub fn generic_migration_steps() -> String {
    [
        "1. Add the Azure Monitor OpenTelemetry package appropriate for your app type",
        "   - For ASP.NET Core: Azure.Monitor.OpenTelemetry.AspNetCore",
        "   - For ASP.NET, console, WorkerService: Azure.Monitor.OpenTelemetry.Exporter",
        "",
        "2. In your Program.cs file, add and configure OpenTelemetry with Azure Monitor:",
        "   - Import the Azure.Monitor.OpenTelemetry namespace",
        "   - Call services.AddOpenTelemetry().UseAzureMonitor()",
        "",
        "3. For custom operations tracking, replace TelemetryClient with ActivitySource:",
        "   - Create a new ActivitySource",
        "   - Use StartActivity() instead of StartOperation()",
        "",
        "4. Be aware that by March 31, 2025, support for instrumentation key ingestion will end. You should transition to connection strings.",
    ]
    .iter()
    .map(|line| format!("{}\n", line))
    .collect()
}
