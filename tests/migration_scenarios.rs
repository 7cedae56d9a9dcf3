//! End-to-end migration scenarios against real directories
//!
//! Projects under `tests/fixtures/projects` cover each built-in application
//! type plus one that only a custom rule recognizes; `tests/fixtures/rules`
//! holds JSON and YAML rule files and one malformed file that must be skipped.

use azmon_migrator::report::NO_USAGE_MESSAGE;
use azmon_migrator::sweep::TRUNCATION_MARKER;
use azmon_migrator::{Migrator, MigratorConfig, RuleDefinition, RuleStore};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn fixtures() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

fn project(name: &str) -> PathBuf {
    fixtures().join("projects").join(name)
}

fn config(rules_dir: PathBuf) -> MigratorConfig {
    MigratorConfig {
        rules_dir,
        fallback_app_type: "ASP.NET Core".to_string(),
        log_level: "info".to_string(),
    }
}

fn migrator_with_fixture_rules() -> Migrator {
    Migrator::initialize(config(fixtures().join("rules")))
}

fn migrator_without_rules() -> (Migrator, TempDir) {
    let temp = TempDir::new().unwrap();
    let migrator = Migrator::initialize(config(temp.path().join("Rules")));
    (migrator, temp)
}

#[test]
fn test_fixture_rules_registered_before_builtins() {
    let migrator = migrator_with_fixture_rules();

    assert_eq!(
        migrator.list_supported_app_types(),
        "Supported application types for migration: Blazor, Azure Functions, Worker Service, Console, ASP.NET Core"
    );
}

#[test]
fn test_web_app_resolves_to_aspnet_core() {
    let migrator = migrator_with_fixture_rules();
    let report = migrator.analyze_project_report(&project("web-app")).unwrap();

    assert_eq!(report.app_type.as_deref(), Some("ASP.NET Core"));
    assert!(!report.used_fallback);
    assert_eq!(
        report.findings,
        vec![
            "Found Application Insights SDK reference in WebApp.csproj",
            "Found TelemetryClient usage in OrdersController.cs",
            "Found Microsoft.ApplicationInsights namespace in OrdersController.cs",
            "Found Track methods in OrdersController.cs",
            "Found AddApplicationInsightsTelemetry in Program.cs",
        ]
    );

    let rendered = report.render();
    assert!(rendered.starts_with("## Application Insights SDK Detection Results\n\n### Findings:\n"));
    assert!(rendered.contains("- Replace Track methods with OpenTelemetry equivalents\n"));
    assert!(rendered.contains("\n### Sample Code:\n```csharp\n// Program.cs"));
}

#[test]
fn test_worker_and_console_projects() {
    let migrator = migrator_with_fixture_rules();

    let worker = migrator.analyze_project_report(&project("worker")).unwrap();
    assert_eq!(worker.app_type.as_deref(), Some("Worker Service"));
    assert!(worker
        .suggestions
        .contains(&"Use ActivitySource in your BackgroundService implementations".to_string()));

    let console = migrator.analyze_project_report(&project("console-app")).unwrap();
    assert_eq!(console.app_type.as_deref(), Some("Console"));
    assert!(console.findings.contains(&"Found Track methods in Program.cs".to_string()));
}

#[test]
fn test_custom_rule_detects_functions_app() {
    let migrator = migrator_with_fixture_rules();
    let report = migrator.analyze_project_report(&project("functions-app")).unwrap();

    assert_eq!(report.app_type.as_deref(), Some("Azure Functions"));
    assert_eq!(report.findings, vec!["Found 'TelemetryClient' in HttpFunctions.cs"]);
    assert_eq!(
        report.migration_steps,
        "1. Add Microsoft.Azure.Functions.Worker.OpenTelemetry\n\n\
         2. Call UseFunctionsWorkerDefaults() then AddOpenTelemetry().UseAzureMonitor()"
    );
}

#[test]
fn test_functions_app_without_rules_falls_back_to_console() {
    let (migrator, _temp) = migrator_without_rules();
    let report = migrator.analyze_project_report(&project("functions-app")).unwrap();

    assert_eq!(report.app_type.as_deref(), Some("Console"));
}

#[test]
fn test_sample_code_matches_loaded_rules() {
    let migrator = migrator_with_fixture_rules();
    let store = RuleStore::new(fixtures().join("rules"));

    for rule in store.load_all() {
        assert_eq!(migrator.generate_migration_code(&rule.app_type), rule.sample_code);
    }
}

#[test]
fn test_unsupported_app_type_lists_all_names() {
    let migrator = migrator_with_fixture_rules();
    let text = migrator.generate_migration_code("NoSuchType");

    assert!(text.contains("Unsupported app type"));
    for name in migrator.registry().app_type_names() {
        assert!(text.contains(&name), "missing {} in {}", name, text);
    }
}

#[test]
fn test_manifest_only_project_has_single_finding() {
    let (migrator, temp) = migrator_without_rules();
    let dir = temp.path().join("lib");
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("Telemetry.csproj"),
        r#"<PackageReference Include="Microsoft.ApplicationInsights" Version="2.22.0" />"#,
    )
    .unwrap();

    let report = migrator.analyze_project_report(&dir).unwrap();

    assert!(report.has_app_insights_references());
    assert!(report.used_fallback);
    assert_eq!(report.findings, vec!["Found Application Insights SDK reference in Telemetry.csproj"]);
}

#[test]
fn test_empty_and_clean_projects_report_no_usage() {
    let (migrator, temp) = migrator_without_rules();
    let empty = temp.path().join("empty");
    fs::create_dir_all(&empty).unwrap();

    assert_eq!(migrator.analyze_project(&empty), NO_USAGE_MESSAGE);
    assert_eq!(migrator.analyze_project(&project("clean-lib")), NO_USAGE_MESSAGE);
}

#[test]
fn test_render_is_idempotent_and_resolution_deterministic() {
    let migrator = migrator_with_fixture_rules();

    let first = migrator.analyze_project(&project("web-app"));
    let second = migrator.analyze_project(&project("web-app"));
    assert_eq!(first, second);

    let report = migrator.analyze_project_report(&project("web-app")).unwrap();
    assert_eq!(report.render(), report.render());
}

#[test]
fn test_check_directory_lists_matching_files() {
    let migrator = migrator_with_fixture_rules();

    assert_eq!(
        migrator.check_for_app_insights(&project("web-app")),
        "Application Insights SDK usage detected in the directory.\n\
         Files with Application Insights references:\n\
         - Project file: WebApp.csproj\n\
         - C# file: OrdersController.cs\n\
         - C# file: Program.cs\n\
         - Config file: appsettings.json\n\n\
         Run the analyze command for detailed findings and migration suggestions."
    );
    assert_eq!(
        migrator.check_for_app_insights(&project("clean-lib")),
        "No Application Insights SDK usage detected in the directory."
    );
}

#[test]
fn test_check_caps_large_directories() {
    let (migrator, temp) = migrator_without_rules();
    let dir = temp.path().join("many");
    fs::create_dir_all(&dir).unwrap();
    for i in 0..30 {
        fs::write(dir.join(format!("Service{:02}.cs", i)), "private TelemetryClient _client;").unwrap();
    }

    let text = migrator.check_for_app_insights(&dir);
    let items: Vec<&str> = text.lines().filter(|l| l.starts_with("- ")).collect();

    assert_eq!(items.len(), 11);
    assert_eq!(items[10], format!("- {}", TRUNCATION_MARKER));
}

#[test]
fn test_check_single_files() {
    let migrator = migrator_with_fixture_rules();

    assert_eq!(
        migrator.check_for_app_insights(&project("web-app").join("WebApp.csproj")),
        "Application Insights SDK detected in the project file. \
         Migration to Azure Monitor OpenTelemetry Distro is recommended."
    );
    assert_eq!(
        migrator.check_for_app_insights(&project("clean-lib").join("Calculator.cs")),
        "No Application Insights SDK usage detected in the .cs file."
    );
}

#[test]
fn test_create_rule_then_reload() {
    let temp = TempDir::new().unwrap();
    let rules_dir = temp.path().join("Rules");
    let migrator = Migrator::initialize(config(rules_dir.clone()));

    let message = migrator.create_migration_rule("Service Fabric", None);
    assert!(message.starts_with("Migration rule template created for 'Service Fabric' at "));
    assert!(rules_dir.join("service_fabric.json").is_file());
    assert!(migrator.registry().by_name("Service Fabric").is_err());

    let restarted = Migrator::initialize(config(rules_dir));
    assert_eq!(
        restarted.generate_migration_code("service fabric"),
        RuleDefinition::template("Service Fabric").sample_code
    );
}

#[test]
fn test_legacy_encoded_sources_are_scanned() {
    let (migrator, temp) = migrator_without_rules();
    let dir = temp.path().join("legacy");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("App.csproj"), "<Project Sdk=\"Microsoft.NET.Sdk\" />").unwrap();
    fs::write(
        dir.join("Program.cs"),
        b"// caf\xE9\nvar client = new TelemetryClient();\nclient.TrackEvent(\"x\");\n".as_slice(),
    )
    .unwrap();

    let report = migrator.analyze_project_report(&dir).unwrap();
    assert!(report.findings.contains(&"Found TelemetryClient usage in Program.cs".to_string()));
    assert!(report.findings.contains(&"Found Track methods in Program.cs".to_string()));

    assert!(migrator
        .check_for_app_insights(&dir)
        .contains("- C# file: Program.cs"));
    assert!(migrator
        .check_for_app_insights(&dir.join("Program.cs"))
        .starts_with("Application Insights SDK usage detected in the C# file."));
}
