//! Structured logging setup
//!
//! Logs are written to stderr through a `tracing` subscriber so that report
//! text on stdout stays clean. The subscriber can only be installed once per
//! process; later calls are ignored.
//!
//! # Example
//!
//! ```no_run
//! use azmon_migrator::util::logging;
//! use tracing::info;
//!
//! // Reads AZMON_LOG_LEVEL and AZMON_LOG_JSON
//! logging::init_from_env();
//!
//! info!(project = "MyWebApp", "Analyzing project");
//! ```

use std::env;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

/// Target prefix used for the crate's own log directive
const CRATE_TARGET: &str = "azmon_migrator";

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum log level to display
    pub level: Level,

    /// Use JSON output format
    pub use_json: bool,

    /// Include the module target (e.g., azmon_migrator::registry) in logs
    pub include_target: bool,

    /// Include file and line number information
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            use_json: false,
            include_target: true,
            include_location: false,
        }
    }
}

impl LoggingConfig {
    pub fn with_level(level: Level) -> Self {
        Self {
            level,
            ..Default::default()
        }
    }

    /// JSON output with source locations, for log collectors
    pub fn production() -> Self {
        Self {
            level: Level::INFO,
            use_json: true,
            include_target: true,
            include_location: true,
        }
    }

    /// Picks the level from explicit flags, in priority order: `log_level`,
    /// `verbose` (debug), `quiet` (error), then `AZMON_LOG_LEVEL`
    pub fn from_flags(log_level: Option<&str>, verbose: bool, quiet: bool) -> Self {
        let level = if let Some(level_str) = log_level {
            parse_level(level_str)
        } else if verbose {
            Level::DEBUG
        } else if quiet {
            Level::ERROR
        } else {
            level_from_env()
        };

        Self {
            level,
            use_json: json_from_env(),
            ..Default::default()
        }
    }
}

/// Parses a log level name (case-insensitive), defaulting to INFO
///
/// ```
/// use azmon_migrator::util::logging::parse_level;
/// use tracing::Level;
///
/// assert_eq!(parse_level("debug"), Level::DEBUG);
/// assert_eq!(parse_level("invalid"), Level::INFO);
/// ```
pub fn parse_level(level_str: &str) -> Level {
    match level_str.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => {
            eprintln!(
                "Invalid log level '{}', defaulting to INFO. Valid levels: trace, debug, info, warn, error",
                level_str
            );
            Level::INFO
        }
    }
}

fn level_from_env() -> Level {
    let level_str = env::var("AZMON_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    parse_level(&level_str)
}

fn json_from_env() -> bool {
    env::var("AZMON_LOG_JSON")
        .ok()
        .and_then(|v| v.parse::<bool>().ok())
        .unwrap_or(false)
}

/// Builds the filter: `RUST_LOG` when set, otherwise the configured level for this crate
/// and warnings for everything else
pub fn build_filter(level: Level) -> EnvFilter {
    if env::var("RUST_LOG").is_ok() {
        return EnvFilter::from_default_env();
    }

    EnvFilter::new(format!("warn,{}={}", CRATE_TARGET, level))
}

/// Installs the global subscriber. Only the first call has any effect.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = build_filter(config.level);

        if config.use_json {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_writer(std::io::stderr)
                        .with_target(config.include_target)
                        .with_file(config.include_location)
                        .with_line_number(config.include_location),
                )
                .init();
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(config.include_target)
                        .with_file(config.include_location)
                        .with_line_number(config.include_location),
                )
                .init();
        }
    });
}

/// Initializes logging from `AZMON_LOG_LEVEL` and `AZMON_LOG_JSON`
pub fn init_from_env() {
    init_logging(LoggingConfig::from_flags(None, false, false));
}
