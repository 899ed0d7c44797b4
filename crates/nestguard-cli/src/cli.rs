//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API,
//! providing a type-safe and well-documented command interface.

use clap::{Parser, Subcommand, ValueEnum};
use std::io::IsTerminal;
use std::path::PathBuf;

/// Nestguard CLI - Validate nested JSON and YAML records against declarative schemas
///
/// Loads a schema document once and reports every invalid key, type and
/// format it finds in each record, addressed by document path.
#[derive(Parser, Debug)]
#[command(
    name = "nestguard",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity; overrides RUST_LOG)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "NESTGUARD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(short, long, value_enum, global = true, default_value = "human")]
    pub output: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate record files against a schema document
    Validate(ValidateArgs),

    /// Load a schema document and print its field tree
    Schema(SchemaArgs),

    /// Generate shell completions for the specified shell
    Completions(CompletionsArgs),
}

/// Arguments for the validate command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Schema document (JSON or YAML)
    #[arg(short, long, value_name = "SCHEMA")]
    pub schema: PathBuf,

    /// Only validate these attributes (repeatable; default: every attribute in the schema)
    #[arg(short, long = "attribute", value_name = "NAME")]
    pub attributes: Vec<String>,

    /// How locations are written in error messages
    #[arg(long, value_enum)]
    pub path_style: Option<PathStyleArg>,

    /// Maximum number of nested mappings to descend into
    #[arg(long, value_name = "N")]
    pub max_depth: Option<usize>,

    /// Record files to validate (JSON or YAML objects)
    #[arg(value_name = "RECORD", required = true)]
    pub records: Vec<PathBuf>,
}

/// Arguments for the schema command
#[derive(Parser, Debug)]
pub struct SchemaArgs {
    /// Schema document (JSON or YAML)
    #[arg(value_name = "SCHEMA")]
    pub schema: PathBuf,
}

/// Arguments for generating shell completions
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable formatted output
    Human,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
    /// Pretty-printed JSON output
    JsonPretty,
}

/// Path display styles
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum PathStyleArg {
    /// settings.theme.colors[2]
    Dot,
    /// settings/theme/colors/2
    Pointer,
}

/// Supported shells for completion generation
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective verbosity level (considering quiet flag)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Check if colored output should be used
    pub fn use_color(&self) -> bool {
        !self.no_color && std::io::stdout().is_terminal()
    }
}

impl From<PathStyleArg> for nestguard_core::PathStyle {
    fn from(style: PathStyleArg) -> Self {
        match style {
            PathStyleArg::Dot => nestguard_core::PathStyle::Dot,
            PathStyleArg::Pointer => nestguard_core::PathStyle::Pointer,
        }
    }
}

impl Shell {
    /// Convert to clap_complete shell type
    pub fn to_clap_shell(self) -> clap_complete::Shell {
        match self {
            Shell::Bash => clap_complete::Shell::Bash,
            Shell::Zsh => clap_complete::Shell::Zsh,
            Shell::Fish => clap_complete::Shell::Fish,
            Shell::PowerShell => clap_complete::Shell::PowerShell,
            Shell::Elvish => clap_complete::Shell::Elvish,
        }
    }
}
