//! ASP.NET Core web applications

use super::{base, Strategy};
use crate::detection::ProjectAnalysisContext;
use crate::report::MigrationReport;

pub const APP_TYPE: &str = "ASP.NET Core";

const MARKERS: &[&str] = &[
    "Microsoft.AspNetCore.App",
    "Microsoft.AspNetCore.Mvc",
    "<TargetFramework>net",
];

const SUGGESTIONS: &[&str] = &[
    "Replace AddApplicationInsightsTelemetry() with AddOpenTelemetry().UseAzureMonitor()",
    "Use Azure.Monitor.OpenTelemetry.AspNetCore package",
];

const SAMPLE_CODE: &str = r#"```csharp
// Program.cs
using Azure.Monitor.OpenTelemetry.AspNetCore;

var builder = WebApplication.CreateBuilder(args);

// Add Azure Monitor OpenTelemetry
builder.Services.AddOpenTelemetry().UseAzureMonitor(options => {
    // Connection string can be specified in code, appsettings.json, or environment variables
    options.ConnectionString = "InstrumentationKey=00000000-0000-0000-0000-000000000000;IngestionEndpoint=https://regionname.in.applicationinsights.azure.com/";
});

// Sample for custom operations tracking
using System.Diagnostics;

public class MyService {
    private readonly ActivitySource _activitySource = new ActivitySource("MyCompany.MyApp");

    public void DoSomething() {
        // Start a new activity (replaces TelemetryClient.StartOperation)
        using var activity = _activitySource.StartActivity("CustomOperation");
        activity?.SetTag("customProperty", "value");
        
        // Your code here
        
        // Activity stops automatically when disposed
    }
}
```"#;

/// General-purpose web archetype; also the fallback when nothing else matches.
///
/// `<TargetFramework>net` appears in nearly every SDK-style project, so this
/// heuristic is registered after the narrower ones.
pub struct AspNetCoreStrategy;

impl Strategy for AspNetCoreStrategy {
    fn app_type_name(&self) -> &str {
        APP_TYPE
    }

    fn can_handle(&self, context: &ProjectAnalysisContext<'_>) -> bool {
        context.any_manifest(|content| MARKERS.iter().any(|m| content.contains(m)))
    }

    fn generate_migration(&self, context: &ProjectAnalysisContext<'_>) -> MigrationReport {
        base::generate(context, APP_TYPE, SUGGESTIONS, self.generate_sample_code())
    }

    fn generate_sample_code(&self) -> String {
        SAMPLE_CODE.to_string()
    }
}
