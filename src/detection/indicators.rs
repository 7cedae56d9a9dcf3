//! Application Insights SDK indicators

use super::context::ProjectAnalysisContext;
use crate::fs::display_name;
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

/// Package references that mark a project file as using the SDK
pub const MANIFEST_INDICATORS: &[&str] = &[
    "Microsoft.ApplicationInsights",
    "ApplicationInsights.AspNetCore",
];

/// Literal markers of SDK usage in C# source
pub const SOURCE_INDICATORS: &[&str] = &[
    "Microsoft.ApplicationInsights",
    "TelemetryClient",
    "ApplicationInsightsServiceOptions",
    "AddApplicationInsightsTelemetry",
];

/// Markers in property files, MSBuild imports and app configuration
pub const CONFIG_INDICATORS: &[&str] = &["ApplicationInsights", "InstrumentationKey", "APPINSIGHTS_"];

pub const TRACK_METHOD_PATTERN: &str = r"\.Track(Event|Exception|Request|Dependency|Metric|Trace|PageView)\(";

pub fn track_method_regex() -> &'static Regex {
    static TRACK_REGEX: OnceLock<Regex> = OnceLock::new();
    TRACK_REGEX.get_or_init(|| Regex::new(TRACK_METHOD_PATTERN).expect("Invalid track method regex"))
}

pub fn manifest_uses_sdk(content: &str) -> bool {
    MANIFEST_INDICATORS.iter().any(|i| content.contains(i))
}

pub fn source_uses_sdk(content: &str) -> bool {
    SOURCE_INDICATORS.iter().any(|i| content.contains(i)) || track_method_regex().is_match(content)
}

pub fn config_uses_sdk(content: &str) -> bool {
    CONFIG_INDICATORS.iter().any(|i| content.contains(i))
}

/// Looks for each indicator string across the project.
///
/// Project files are checked first and every project file containing the
/// indicator yields a finding; source files are only consulted when no project
/// file matched, and the first source hit ends the search for that indicator.
pub fn scan_indicators(context: &ProjectAnalysisContext<'_>, indicators: &[String]) -> Vec<String> {
    let mut findings = Vec::new();

    for indicator in indicators {
        let mut found = false;

        for file in &context.manifest_files {
            if context.read(file).map(|c| c.contains(indicator.as_str())).unwrap_or(false) {
                findings.push(format!("Found '{}' in {}", indicator, display_name(file)));
                found = true;
            }
        }

        if found {
            continue;
        }

        if let Some(file) = context
            .source_files
            .iter()
            .find(|file| context.read(file).map(|c| c.contains(indicator.as_str())).unwrap_or(false))
        {
            findings.push(format!("Found '{}' in {}", indicator, display_name(file)));
            found = true;
        }

        if !found {
            debug!(indicator = %indicator, "Indicator not present");
        }
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MockFileSystem;
    use std::path::PathBuf;
    use yare::parameterized;

    #[parameterized(
        track_event = { "telemetry.TrackEvent(\"Login\");", true },
        track_page_view = { "client.TrackPageView(page);", true },
        track_availability = { "client.TrackAvailability(result);", false },
        no_dot = { "TrackEvent(\"x\")", false },
    )]
    fn test_track_method_regex(source: &str, expected: bool) {
        assert_eq!(track_method_regex().is_match(source), expected);
    }

    #[test]
    fn test_manifest_indicators() {
        assert!(manifest_uses_sdk(
            r#"<PackageReference Include="Microsoft.ApplicationInsights.AspNetCore" Version="2.22.0" />"#
        ));
        assert!(!manifest_uses_sdk(
            r#"<PackageReference Include="Azure.Monitor.OpenTelemetry.AspNetCore" Version="1.2.0" />"#
        ));
    }

    #[test]
    fn test_source_and_config_indicators() {
        assert!(source_uses_sdk("services.AddApplicationInsightsTelemetry();"));
        assert!(!source_uses_sdk("services.AddOpenTelemetry().UseAzureMonitor();"));
        assert!(config_uses_sdk("APPINSIGHTS_INSTRUMENTATIONKEY=abc"));
        assert!(!config_uses_sdk("Logging__LogLevel__Default=Information"));
    }

    fn project(fs: &MockFileSystem) -> ProjectAnalysisContext<'_> {
        ProjectAnalysisContext::new(
            fs,
            "/mock",
            vec![PathBuf::from("/mock/A.csproj"), PathBuf::from("/mock/B.csproj")],
            vec![PathBuf::from("/mock/One.cs"), PathBuf::from("/mock/Two.cs")],
        )
    }

    #[test]
    fn test_manifest_hit_skips_sources() {
        let fs = MockFileSystem::new();
        fs.add_file("A.csproj", "Microsoft.ApplicationInsights");
        fs.add_file("B.csproj", "Microsoft.ApplicationInsights");
        fs.add_file("One.cs", "using Microsoft.ApplicationInsights;");
        fs.add_file("Two.cs", "");

        let findings = scan_indicators(&project(&fs), &["Microsoft.ApplicationInsights".to_string()]);

        assert_eq!(
            findings,
            vec![
                "Found 'Microsoft.ApplicationInsights' in A.csproj",
                "Found 'Microsoft.ApplicationInsights' in B.csproj",
            ]
        );
    }

    #[test]
    fn test_source_scan_stops_at_first_hit() {
        let fs = MockFileSystem::new();
        fs.add_file("A.csproj", "");
        fs.add_file("B.csproj", "");
        fs.add_file("One.cs", "new TelemetryClient()");
        fs.add_file("Two.cs", "new TelemetryClient()");

        let findings = scan_indicators(&project(&fs), &["TelemetryClient".to_string()]);

        assert_eq!(findings, vec!["Found 'TelemetryClient' in One.cs"]);
    }

    #[test]
    fn test_missing_indicator_yields_nothing() {
        let fs = MockFileSystem::new();
        fs.add_file("A.csproj", "");
        fs.add_file("B.csproj", "");
        fs.add_file("One.cs", "");
        fs.add_file("Two.cs", "");

        assert!(scan_indicators(&project(&fs), &["TelemetryClient".to_string()]).is_empty());
    }
}
