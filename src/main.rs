use azmon_migrator::cli::commands::{CliArgs, Commands};
use azmon_migrator::cli::handlers::{
    handle_analyze, handle_check, handle_config, handle_create_rule, handle_list_types, handle_sample_code,
};
use azmon_migrator::util::logging::{init_logging, LoggingConfig};
use azmon_migrator::VERSION;

use clap::Parser;
use tracing::debug;

fn main() {
    let args = CliArgs::parse();
    init_logging(LoggingConfig::from_flags(
        args.log_level.as_deref(),
        args.verbose,
        args.quiet,
    ));

    debug!("azmon-migrator v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match &args.command {
        Commands::Analyze(analyze_args) => handle_analyze(&args, analyze_args),
        Commands::SampleCode(sample_args) => handle_sample_code(&args, sample_args),
        Commands::Check(check_args) => handle_check(&args, check_args),
        Commands::ListTypes(list_args) => handle_list_types(&args, list_args),
        Commands::CreateRule(rule_args) => handle_create_rule(&args, rule_args),
        Commands::Config(config_args) => handle_config(&args, config_args),
    };

    std::process::exit(exit_code);
}
