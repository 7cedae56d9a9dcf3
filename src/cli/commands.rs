use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Application Insights SDK to Azure Monitor OpenTelemetry migration assistant
#[derive(Parser, Debug)]
#[command(
    name = "azmon-migrator",
    about = "Detects Application Insights SDK usage and plans the move to Azure Monitor OpenTelemetry",
    version,
    author,
    long_about = "azmon-migrator scans C# projects for Application Insights SDK usage, classifies \
                  each project into an application type using built-in heuristics and custom \
                  rule files, and prints findings, suggestions, migration steps and sample code \
                  for Azure Monitor OpenTelemetry."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(
        long,
        global = true,
        value_name = "DIR",
        help = "Directory with rule definition files (overrides AZMON_RULES_DIR)"
    )]
    pub rules_dir: Option<PathBuf>,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - only log errors"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Analyze a project and suggest migration changes",
        long_about = "Finds project and C# files under PATH, picks the matching application type \
                      and reports Application Insights findings with migration guidance.\n\n\
                      Examples:\n  \
                      azmon-migrator analyze ./MyWebApp\n  \
                      azmon-migrator analyze ./MyWorker --format json\n  \
                      azmon-migrator analyze . -o report.md"
    )]
    Analyze(AnalyzeArgs),

    #[command(
        name = "sample-code",
        about = "Print Azure Monitor OpenTelemetry sample code for an application type",
        long_about = "Prints replacement code for the given application type. Unknown types \
                      list the supported ones.\n\n\
                      Examples:\n  \
                      azmon-migrator sample-code \"ASP.NET Core\"\n  \
                      azmon-migrator sample-code console"
    )]
    SampleCode(SampleCodeArgs),

    #[command(
        about = "Check a file or directory for Application Insights SDK references",
        long_about = "Quick presence check. A directory lists up to 10 matching files.\n\n\
                      Examples:\n  \
                      azmon-migrator check ./MyWebApp\n  \
                      azmon-migrator check ./MyWebApp/MyWebApp.csproj"
    )]
    Check(CheckArgs),

    #[command(name = "list-types", about = "List supported application types")]
    ListTypes(ListTypesArgs),

    #[command(
        name = "create-rule",
        about = "Create a rule template for a custom application type",
        long_about = "Writes an editable rule definition. PATH is used when it ends in .json; \
                      otherwise the file goes to the rules directory, named after the app type.\n\n\
                      Examples:\n  \
                      azmon-migrator create-rule \"Azure Functions\"\n  \
                      azmon-migrator create-rule Blazor ./Rules/blazor.json"
    )]
    CreateRule(CreateRuleArgs),

    #[command(about = "Show the effective configuration")]
    Config(ConfigArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct AnalyzeArgs {
    #[arg(value_name = "PATH", help = "Project directory to analyze")]
    pub project_path: PathBuf,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,

    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        help = "Write output to file instead of stdout"
    )]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct SampleCodeArgs {
    #[arg(value_name = "APP_TYPE", help = "Application type, e.g. \"ASP.NET Core\"")]
    pub app_type: String,
}

#[derive(Parser, Debug, Clone)]
pub struct CheckArgs {
    #[arg(value_name = "PATH", help = "File or directory to check")]
    pub path: PathBuf,
}

#[derive(Parser, Debug, Clone)]
pub struct ListTypesArgs {
    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct CreateRuleArgs {
    #[arg(value_name = "APP_TYPE", help = "Application type the rule describes")]
    pub app_type: String,

    #[arg(value_name = "PATH", help = "Target .json file (defaults to the rules directory)")]
    pub rule_path: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct ConfigArgs {
    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}
