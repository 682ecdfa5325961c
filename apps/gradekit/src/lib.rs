//! # gradekit
//!
//! Library half of the `gradekit` binary: the CLI definition, its commands
//! and the variables-file loader. Kept as a library so the commands can be
//! driven from tests with an in-memory writer.

pub mod cli;
pub mod config;
pub mod error;

pub use error::CliError;
