//! Subcommand handlers
//!
//! Each handler prints its textual outcome to stdout and returns the process
//! exit code. Outcomes produced by the migrator, including its error texts,
//! exit with 0; only CLI-level failures exit with 1.

use super::commands::{AnalyzeArgs, CheckArgs, CliArgs, ConfigArgs, CreateRuleArgs, ListTypesArgs, SampleCodeArgs};
use super::output::{OutputFormat, OutputFormatter};
use crate::config::MigratorConfig;
use crate::migrator::Migrator;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, error};

const EXIT_OK: i32 = 0;
const EXIT_FAILURE: i32 = 1;

/// Environment configuration with the `--rules-dir` override applied, validated
pub fn load_config(args: &CliArgs) -> Result<MigratorConfig> {
    let mut config = MigratorConfig::default();
    if let Some(rules_dir) = &args.rules_dir {
        config = config.with_rules_dir(rules_dir.clone());
    }
    config.validate().context("Invalid configuration")?;
    debug!(?config, "Loaded configuration");
    Ok(config)
}

fn build_migrator(args: &CliArgs) -> Result<Migrator> {
    Ok(Migrator::initialize(load_config(args)?))
}

fn with_migrator(args: &CliArgs, run: impl FnOnce(&Migrator) -> Result<()>) -> i32 {
    match build_migrator(args).and_then(|migrator| run(&migrator)) {
        Ok(()) => EXIT_OK,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            EXIT_FAILURE
        }
    }
}

fn emit(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("Failed to write output to {}", path.display()))?;
            debug!(path = %path.display(), "Wrote output file");
        }
        None => println!("{}", text),
    }
    Ok(())
}

pub fn handle_analyze(cli: &CliArgs, args: &AnalyzeArgs) -> i32 {
    with_migrator(cli, |migrator| {
        let format = OutputFormat::from(args.format);
        let text = match format {
            OutputFormat::Human => migrator.analyze_project(&args.project_path),
            _ => match migrator.analyze_project_report(&args.project_path) {
                Ok(report) => OutputFormatter::new(format).format_report(&report)?,
                Err(e) => format!("Error: {}", e),
            },
        };
        emit(&text, args.output.as_deref())
    })
}

pub fn handle_sample_code(cli: &CliArgs, args: &SampleCodeArgs) -> i32 {
    with_migrator(cli, |migrator| emit(&migrator.generate_migration_code(&args.app_type), None))
}

pub fn handle_check(cli: &CliArgs, args: &CheckArgs) -> i32 {
    with_migrator(cli, |migrator| emit(&migrator.check_for_app_insights(&args.path), None))
}

pub fn handle_list_types(cli: &CliArgs, args: &ListTypesArgs) -> i32 {
    with_migrator(cli, |migrator| {
        let names = migrator.registry().app_type_names();
        let text = OutputFormatter::new(args.format.into()).format_app_types(&names)?;
        emit(&text, None)
    })
}

pub fn handle_create_rule(cli: &CliArgs, args: &CreateRuleArgs) -> i32 {
    with_migrator(cli, |migrator| {
        emit(
            &migrator.create_migration_rule(&args.app_type, args.rule_path.as_deref()),
            None,
        )
    })
}

pub fn handle_config(cli: &CliArgs, args: &ConfigArgs) -> i32 {
    let result = load_config(cli)
        .and_then(|config| OutputFormatter::new(args.format.into()).format_config(&config))
        .and_then(|text| emit(&text, None));

    match result {
        Ok(()) => EXIT_OK,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            EXIT_FAILURE
        }
    }
}
