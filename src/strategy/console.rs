//! Console applications

use super::{base, Strategy};
use crate::detection::ProjectAnalysisContext;
use crate::report::MigrationReport;

pub const APP_TYPE: &str = "Console";

const SUGGESTIONS: &[&str] = &[
    "Use the OpenTelemetry SDK with Azure.Monitor.OpenTelemetry.Exporter package",
    "Initialize OpenTelemetry with TracerProvider in your Program.cs",
];

const SAMPLE_CODE: &str = r#"```csharp
// Program.cs
using OpenTelemetry;
using OpenTelemetry.Resources;
using OpenTelemetry.Trace;
using Azure.Monitor.OpenTelemetry.Exporter;
using System.Diagnostics;

// Define your ActivitySource
var myActivitySource = new ActivitySource("MyCompany.MyApp");

// Configure OpenTelemetry
using var tracerProvider = Sdk.CreateTracerProviderBuilder()
    .SetResourceBuilder(ResourceBuilder.CreateDefault().AddService("MyServiceName"))
    .AddSource(myActivitySource.Name)
    .AddAzureMonitorTraceExporter(options => {
        options.ConnectionString = "InstrumentationKey=00000000-0000-0000-0000-000000000000;IngestionEndpoint=https://regionname.in.applicationinsights.azure.com/";
    })
    .Build();

// Your application code
using (var activity = myActivitySource.StartActivity("SampleOperation"))
{
    activity?.SetTag("customDimension", "value");
    // Your code here
}
```"#;

/// Executable project that is neither a web app nor a Windows service
pub struct ConsoleStrategy;

impl Strategy for ConsoleStrategy {
    fn app_type_name(&self) -> &str {
        APP_TYPE
    }

    fn can_handle(&self, context: &ProjectAnalysisContext<'_>) -> bool {
        context.any_manifest(|content| {
            content.contains("<OutputType>Exe</OutputType>")
                && !content.contains("Microsoft.AspNetCore")
                && !content.contains("Microsoft.Extensions.Hosting.WindowsServices")
        })
    }

    fn generate_migration(&self, context: &ProjectAnalysisContext<'_>) -> MigrationReport {
        base::generate(context, APP_TYPE, SUGGESTIONS, self.generate_sample_code())
    }

    fn generate_sample_code(&self) -> String {
        SAMPLE_CODE.to_string()
    }
}
