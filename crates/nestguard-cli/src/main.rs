//! Nestguard CLI - Command-line interface for validating nested documents
//!
//! This is the main entry point for the Nestguard CLI application, providing
//! commands for validating record files against a schema document and
//! inspecting the field tree a schema document declares.

mod cli;
mod config;
mod error;
mod handlers;
mod logging;
mod output;
mod report;

use cli::{Cli, Commands};
use colored::control;
use config::Config;
use error::Result;
use logging::{timing::Timer, LoggingConfig};
use output::OutputWriter;
use std::process;
use tracing::instrument;

fn main() {
    // Parse command-line arguments
    let cli = Cli::parse_args();

    // Set up colored output
    control::set_override(cli.use_color());

    // Configuration feeds logging, so it is read first
    let config = Config::load_with_file(cli.config.as_deref());

    if let Err(e) = init_logging(&cli, config.as_ref().ok()) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let result = config.and_then(|config| run(cli, &config));

    match result {
        Ok(()) => process::exit(0),
        Err(e) => {
            eprintln!("{}", error::format_error(&e, control::SHOULD_COLORIZE.should_colorize()));

            if e.should_show_help() {
                eprintln!("\nFor more information, try '--help'");
            }

            process::exit(e.exit_code());
        }
    }
}

/// Main application logic
#[instrument(skip(cli, config), fields(command = ?cli.command))]
fn run(cli: Cli, config: &Config) -> Result<()> {
    let _timer = Timer::new("cli_execution");

    let mut output = OutputWriter::new(cli.output, cli.use_color(), cli.quiet);

    tracing::info!(
        command = ?cli.command,
        verbosity = cli.verbosity_level(),
        "Executing command"
    );

    match cli.command {
        Commands::Validate(args) => handlers::handle_validate(args, config, &mut output),
        Commands::Schema(args) => handlers::handle_schema(args, &mut output),
        Commands::Completions(args) => handlers::handle_completions(args),
    }
}

/// Initialize the logging system
fn init_logging(cli: &Cli, config: Option<&Config>) -> Result<()> {
    let mut logging_config = LoggingConfig::from_verbosity(cli.verbosity_level());

    if let Some(config) = config {
        logging_config.merge_with_settings(&config.logging, cli.verbosity_level());
    }

    // Environment overrides the config file, but not an explicit -v
    logging_config.merge_with_env(cli.verbosity_level());

    // If quiet mode, only log errors
    if cli.quiet {
        logging_config.level = "error".to_string();
        logging_config.console = false;
    }

    logging::init_logging(logging_config)
}
