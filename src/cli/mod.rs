pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{
    AnalyzeArgs, CheckArgs, CliArgs, Commands, ConfigArgs, CreateRuleArgs, ListTypesArgs, SampleCodeArgs,
};
pub use output::{OutputFormat, OutputFormatter};
