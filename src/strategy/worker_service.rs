//! Worker services and other generic-host background processes

use super::{base, Strategy};
use crate::detection::ProjectAnalysisContext;
use crate::report::MigrationReport;

pub const APP_TYPE: &str = "Worker Service";

const SUGGESTIONS: &[&str] = &[
    "Use Azure.Monitor.OpenTelemetry.Exporter package for Worker Services",
    "Configure OpenTelemetry in Program.cs with AddOpenTelemetry().WithTracing()",
    "Use ActivitySource in your BackgroundService implementations",
];

const SAMPLE_CODE: &str = r#"```csharp
// Program.cs
using Microsoft.Extensions.Hosting;
using Microsoft.Extensions.DependencyInjection;
using Azure.Monitor.OpenTelemetry.Exporter;
using OpenTelemetry;
using OpenTelemetry.Trace;
using OpenTelemetry.Resources;
using System.Diagnostics;

var builder = Host.CreateApplicationBuilder(args);

// Register your worker services
builder.Services.AddHostedService<Worker>();

// Add Azure Monitor OpenTelemetry
builder.Services.AddOpenTelemetry()
    .WithTracing(builder => builder
        .SetResourceBuilder(ResourceBuilder.CreateDefault().AddService("MyWorkerService"))
        .AddSource("MyWorkerService")
        .AddAzureMonitorTraceExporter(options => {
            options.ConnectionString = "InstrumentationKey=00000000-0000-0000-0000-000000000000;IngestionEndpoint=https://regionname.in.applicationinsights.azure.com/";
        }));

var host = builder.Build();
await host.RunAsync();

// Worker.cs
public class Worker : BackgroundService
{
    private readonly ActivitySource _activitySource;
    private readonly ILogger<Worker> _logger;

    public Worker(ILogger<Worker> logger)
    {
        _logger = logger;
        _activitySource = new ActivitySource("MyWorkerService");
    }

    protected override async Task ExecuteAsync(CancellationToken stoppingToken)
    {
        while (!stoppingToken.IsCancellationRequested)
        {
            using (var activity = _activitySource.StartActivity("WorkerOperation"))
            {
                activity?.SetTag("executionTime", DateTime.UtcNow);
                _logger.LogInformation("Worker running at: {time}", DateTimeOffset.Now);
                
                try
                {
                    // Do work here
                    await Task.Delay(1000, stoppingToken);
                }
                catch (Exception ex)
                {
                    activity?.SetStatus(ActivityStatusCode.Error, ex.Message);
                    activity?.RecordException(ex);
                    _logger.LogError(ex, "Error executing worker task");
                }
            }
        }
    }
}
```"#;

/// Long-running background process built on the generic host.
///
/// A project with a hosted service and an `<OutputType>Exe</OutputType>`
/// manifest also satisfies the console heuristic; whichever is registered
/// first wins.
pub struct WorkerServiceStrategy;

impl Strategy for WorkerServiceStrategy {
    fn app_type_name(&self) -> &str {
        APP_TYPE
    }

    fn can_handle(&self, context: &ProjectAnalysisContext<'_>) -> bool {
        context.any_manifest(|content| {
            content.contains("Microsoft.Extensions.Hosting")
                && content.contains("Microsoft.Extensions.Hosting.WindowsServices")
        }) || context.any_source(|content| {
            content.contains("IHostedService")
                || (content.contains("BackgroundService") && !content.contains("Microsoft.AspNetCore"))
        })
    }

    fn generate_migration(&self, context: &ProjectAnalysisContext<'_>) -> MigrationReport {
        base::generate(context, APP_TYPE, SUGGESTIONS, self.generate_sample_code())
    }

    fn generate_sample_code(&self) -> String {
        SAMPLE_CODE.to_string()
    }
}
