//! # gradekit CLI Module
//!
//! This module implements the CLI interface for gradekit.
//!
//! ## Available Commands
//!
//! - `expand` - Expand `%name%` variables in text, a file or stdin
//! - `commas` - Parse an escaped comma list
//! - `range` - Expand integral ranges such as `1,3-5`
//! - `grades` - Show the grade table
//! - `kinds` - Show the failure kind table

mod commands;

use crate::CliError;
use clap::{Parser, Subcommand, ValueEnum};
use gradekit_core::limits::DEFAULT_SIGIL;
use std::io::{self, Read, Write};
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// gradekit - failure grades and small string algorithms
#[derive(Parser, Debug)]
#[command(name = "gradekit")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json: bool,

    /// Log output format on stderr
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Log line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

/// Integer type used by `range`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum IntType {
    I64,
    U64,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Expand variables in text
    Expand {
        /// Text to expand (reads --file or stdin when absent)
        text: Option<String>,

        /// Read the text from a file
        #[arg(short, long, conflicts_with = "text")]
        file: Option<PathBuf>,

        /// Character enclosing variable names
        #[arg(short, long, default_value_t = DEFAULT_SIGIL)]
        sigil: char,

        /// TOML file with variable values
        #[arg(long)]
        vars: Option<PathBuf>,

        /// Set a variable (NAME=VALUE), overriding --vars
        #[arg(long = "set", value_name = "NAME=VALUE")]
        assignments: Vec<String>,
    },

    /// Parse a comma separated list with backslash escapes
    Commas {
        /// The list to parse
        text: String,
    },

    /// Expand integral ranges (e.g. "1,3-5")
    Range {
        /// Range specification
        #[arg(allow_hyphen_values = true)]
        spec: String,

        /// Integer type of the values
        #[arg(short = 't', long = "type", value_enum, default_value_t = IntType::I64)]
        int_type: IntType,
    },

    /// Show the grade table
    Grades,

    /// Show the failure kind table
    Kinds,
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments, writing results to `out`.
pub fn execute(cli: Cli, out: &mut dyn Write) -> Result<(), CliError> {
    execute_with_input(cli, &mut io::stdin().lock(), out)
}

/// Like [`execute`], reading standard input from `stdin`.
pub fn execute_with_input(
    cli: Cli,
    stdin: &mut dyn Read,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let json = cli.json;

    match cli.command {
        Commands::Expand {
            text,
            file,
            sigil,
            vars,
            assignments,
        } => {
            let source = match (text, file) {
                (Some(text), _) => ExpandSource::Text(text),
                (None, Some(path)) => ExpandSource::File(path),
                (None, None) => ExpandSource::Stdin,
            };
            cmd_expand(out, stdin, source, sigil, vars.as_deref(), &assignments)
        }
        Commands::Commas { text } => cmd_commas(out, json, &text),
        Commands::Range { spec, int_type } => cmd_range(out, json, &spec, int_type),
        Commands::Grades => cmd_grades(out, json),
        Commands::Kinds => cmd_kinds(out, json),
    }
}
