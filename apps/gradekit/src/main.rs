//! # gradekit
//!
//! Command-line front end for gradekit-core.
//!
//! ## Usage
//!
//! ```bash
//! # Expand variables from a TOML file, overriding one of them
//! gradekit expand -f motd.txt --vars vars.toml --set user=ada
//!
//! # Parse lists and ranges
//! gradekit commas 'a,b\,c'
//! gradekit range 1,3-5 --json
//!
//! # Inspect the grading taxonomy
//! gradekit grades
//! gradekit kinds
//! ```
//!
//! Failures are graded: ordinary errors (bad arguments, missing files) exit
//! with status 1, critical ones (a stream breaking mid-command) with
//! status 2.

use clap::Parser;
use gradekit::cli::{self, LogFormat};
use gradekit::error::exit_code;
use gradekit_core::Failure;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    let cli = cli::Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "gradekit=info,gradekit_core=warn".into());

    // stdout carries command output; logs go to stderr.
    match cli.log_format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if let Err(e) = cli::execute(cli, &mut out) {
        let failure = Failure::from_graded(e);
        tracing::error!(
            grade = %failure.grade(),
            tag = ?failure.tag().map(|t| t.name()),
            "{}",
            failure
        );
        std::process::exit(exit_code(failure.grade()));
    }
}
