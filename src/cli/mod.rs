//! CLI argument parsing and validation module
//!
//! Handles command-line interface using clap, including:
//! - Target selection (bundle identifiers or app bundle paths)
//! - Service filtering options
//! - Output format selection (human/JSON)
//! - Verbosity and quiet modes
//! - Optional configuration file merging

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};

use tccinspect::config::{InspectConfiguration, OutputFormat};
use tccinspect::tcc::filter::validate_service_filters;

/// Effective options after merging flags over the config file
#[derive(Debug, Clone, PartialEq)]
pub struct InspectOptions {
    /// Bundle identifiers or app bundle paths, in argument order
    pub targets: Vec<String>,
    /// Service identifier filters (exact or glob)
    pub services: Vec<String>,
    pub json_output: bool,
    pub quiet_mode: bool,
    pub verbose: bool,
    pub date_format: String,
}

fn version() -> &'static str {
    concat!(env!("TCCINSPECT_VERSION"), " (", env!("GIT_HASH"), ")")
}

fn build_command() -> Command {
    Command::new("tccinspect")
        .version(version())
        .about("List macOS privacy (TCC) permissions recorded for applications")
        .long_about(
            "Reads the per-user and system-wide TCC databases and lists the privacy \
             permissions recorded for each target application. The system database \
             requires Full Disk Access; when it cannot be read the user results are \
             still shown.",
        )
        .arg(
            Arg::new("target")
                .value_name("TARGET")
                .help("Bundle identifier (e.g. com.apple.Safari) or path to an .app bundle")
                .required(true)
                .num_args(1..)
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("service")
                .short('s')
                .long("service")
                .value_name("PATTERN")
                .help("Filter by service identifier (exact match, or glob with * ? [])")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("json")
                .short('j')
                .long("json")
                .help("Output in JSON format")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("human")
                .long("human")
                .help("Output in human-readable format, overriding the configuration file")
                .conflicts_with("json")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Suppress warnings about unreadable databases")
                .conflicts_with("verbose")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable debug logging")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("TOML configuration file")
                .value_parser(clap::value_parser!(PathBuf)),
        )
}

/// Parse command line arguments and return options
pub fn parse_args() -> Result<InspectOptions> {
    options_from_matches(&build_command().get_matches())
}

/// Parse an explicit argument list; clap errors (including --help) are returned
#[cfg(test)]
pub fn parse_from<I, T>(args: I) -> Result<InspectOptions>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let matches = build_command().try_get_matches_from(args)?;
    options_from_matches(&matches)
}

fn options_from_matches(matches: &ArgMatches) -> Result<InspectOptions> {
    let config = match matches.get_one::<PathBuf>("config") {
        Some(path) => InspectConfiguration::load_from_file(path)
            .with_context(|| format!("Could not load configuration from {}", path.display()))?,
        None => InspectConfiguration::default(),
    };

    let targets: Vec<String> = matches
        .get_many::<String>("target")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();

    // Command-line filters replace the configured ones
    let services: Vec<String> = match matches.get_many::<String>("service") {
        Some(values) => values.cloned().collect(),
        None => config.filter.services.clone(),
    };
    validate_service_filters(&services)?;

    Ok(InspectOptions {
        targets,
        services,
        json_output: matches.get_flag("json")
            || (!matches.get_flag("human") && config.output.format == OutputFormat::Json),
        quiet_mode: matches.get_flag("quiet"),
        verbose: matches.get_flag("verbose"),
        date_format: config.output.date_format,
    })
}
