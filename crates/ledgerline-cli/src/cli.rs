//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API.

use clap::{Parser, Subcommand, ValueEnum};
use is_terminal::IsTerminal;
use ledgerline_schemas::SchemaCategory;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Ledgerline CLI - validate ledger transactions and votes
///
/// Checks records against the ledger's schema definitions before they are
/// submitted, and inspects the definitions themselves.
#[derive(Parser, Debug)]
#[command(
    name = "ledgerline",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "LEDGERLINE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for results [default: human]
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

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
    /// Validate transactions or votes against the ledger schemas
    Validate(ValidateArgs),

    /// Inspect the schema definitions
    Schemas(SchemasArgs),

    /// Generate shell completions for the specified shell
    Completions(CompletionsArgs),
}

/// Arguments for the validate command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// File holding one record or an array of records (JSON or YAML)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Kind of record in the file
    #[arg(short, long, value_enum, default_value = "auto")]
    pub kind: KindArg,

    /// Stop at the first rejected record
    #[arg(long)]
    pub fail_fast: bool,

    /// Stop after this many rejected records (0 = no limit)
    #[arg(long, value_name = "N", default_value = "0")]
    pub max_errors: usize,

    /// Load schema definitions from this directory instead of the built-in ones
    #[arg(long, value_name = "DIR")]
    pub schemas_dir: Option<PathBuf>,
}

/// Arguments for the schemas command
#[derive(Parser, Debug)]
pub struct SchemasArgs {
    #[command(subcommand)]
    pub action: SchemasAction,
}

/// Schema inspection actions
#[derive(Subcommand, Debug)]
pub enum SchemasAction {
    /// Load and compile every schema and report where each came from
    Check {
        /// Load schema definitions from this directory instead of the built-in ones
        #[arg(long, value_name = "DIR")]
        schemas_dir: Option<PathBuf>,
    },

    /// Print a schema as the validators see it
    Show {
        /// Schema category (e.g. transaction-common, vote)
        #[arg(value_parser = parse_category)]
        category: SchemaCategory,

        /// Load schema definitions from this directory instead of the built-in ones
        #[arg(long, value_name = "DIR")]
        schemas_dir: Option<PathBuf>,
    },
}

/// Arguments for generating shell completions
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Output format options
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Human-readable formatted output
    #[default]
    Human,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
    /// Pretty-printed JSON output
    JsonPretty,
}

/// Record kind selection for the validate command
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    /// Votes carry a `vote` member; everything else is a transaction
    Auto,
    /// Validate as transactions
    Transaction,
    /// Validate as votes
    Vote,
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

fn parse_category(value: &str) -> Result<SchemaCategory, String> {
    value.parse::<SchemaCategory>().map_err(|e| {
        let known = SchemaCategory::ALL
            .iter()
            .map(SchemaCategory::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        format!("{} (expected one of: {})", e, known)
    })
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
