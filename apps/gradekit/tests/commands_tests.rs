//! Command behaviour tests, driven through the parsed CLI.

use clap::Parser;
use gradekit::CliError;
use gradekit::cli::{Cli, execute, execute_with_input};
use gradekit::error::exit_code;
use gradekit_core::{Grade, Graded, TextError};
use std::io::Write;

/// Parse `args` and run the command, returning stdout.
fn run(args: &[&str]) -> Result<String, CliError> {
    let cli = Cli::try_parse_from(std::iter::once("gradekit").chain(args.iter().copied()))
        .expect("arguments parse");
    let mut out = Vec::new();
    execute(cli, &mut out)?;
    Ok(String::from_utf8(out).expect("utf8 output"))
}

/// Like [`run`], feeding `stdin` to the command.
fn run_with_stdin(args: &[&str], stdin: &str) -> Result<String, CliError> {
    let cli = Cli::try_parse_from(std::iter::once("gradekit").chain(args.iter().copied()))
        .expect("arguments parse");
    let mut out = Vec::new();
    execute_with_input(cli, &mut stdin.as_bytes(), &mut out)?;
    Ok(String::from_utf8(out).expect("utf8 output"))
}

fn vars_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write vars");
    file
}

// =============================================================================
// EXPAND
// =============================================================================

#[test]
fn expand_with_assignments() {
    let out = run(&["expand", "hello %who%, 100%%", "--set", "who=world"]).expect("expand");
    assert_eq!(out, "hello world, 100%\n");
}

#[test]
fn expand_with_vars_file_and_override() {
    let vars = vars_file("who = \"file\"\nport = 8080\n");
    let path = vars.path().to_str().expect("path");

    let out = run(&["expand", "%who%:%port%", "--vars", path, "--set", "who=flag"])
        .expect("expand");
    assert_eq!(out, "flag:8080\n");
}

#[test]
fn expand_custom_sigil_from_file() {
    let mut input = tempfile::NamedTempFile::new().expect("temp file");
    input
        .write_all(b"user=$user$\nhome=/home/$user$\n$unset$\n")
        .expect("write input");
    let path = input.path().to_str().expect("path");

    let out = run(&["expand", "-f", path, "-s", "$", "--set", "user=ada"]).expect("expand");
    assert_eq!(out, "user=ada\nhome=/home/ada\n$unset$\n");
}

#[test]
fn expand_rejects_bad_assignment() {
    let err = run(&["expand", "x", "--set", "novalue"]).expect_err("bad assignment");
    assert!(matches!(err, CliError::InvalidAssignment(_)));
    assert_eq!(err.grade(), Grade::Error);
}

#[test]
fn expand_reports_missing_vars_file() {
    let err = run(&["expand", "x", "--vars", "/no/such/vars.toml"]).expect_err("missing file");
    assert!(matches!(err, CliError::VarsFile { .. }));
}

#[test]
fn expand_reads_stdin_without_text_or_file() {
    let out = run_with_stdin(&["expand", "--set", "who=pipe"], "from %who%\npartial %who%")
        .expect("expand");
    assert_eq!(out, "from pipe\npartial pipe");
}

#[test]
fn expand_reports_missing_input_file() {
    let err = run(&["expand", "-f", "/no/such/input.txt"]).expect_err("missing input");
    assert!(matches!(&err, CliError::InputFile { path, .. } if path.ends_with("input.txt")));
    assert_eq!(err.grade(), Grade::Error);
    assert_eq!(exit_code(err.grade()), 1);
}

#[test]
fn broken_output_exits_with_critical_status() {
    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    let cli = Cli::try_parse_from(["gradekit", "range", "1-3"]).expect("arguments parse");
    let err = execute(cli, &mut ClosedPipe).expect_err("closed output");
    assert_eq!(err.grade(), Grade::CriticalError);
    assert_eq!(exit_code(err.grade()), 2);
}

// =============================================================================
// COMMAS
// =============================================================================

#[test]
fn commas_one_per_line() {
    let out = run(&["commas", r"a,b\,c,,d"]).expect("commas");
    assert_eq!(out, "a\nb,c\n\nd\n");
}

#[test]
fn commas_json() {
    let out = run(&["--json", "commas", r"x\\y,z"]).expect("commas");
    let items: Vec<String> = serde_json::from_str(&out).expect("json");
    assert_eq!(items, vec![r"x\y", "z"]);
}

#[test]
fn commas_dangling_escape_fails() {
    let err = run(&["commas", r"a\"]).expect_err("dangling");
    assert!(matches!(err, CliError::Text(TextError::DanglingEscape)));
}

// =============================================================================
// RANGE
// =============================================================================

#[test]
fn range_lists_values() {
    let out = run(&["range", "1,3-5"]).expect("range");
    assert_eq!(out, "1\n3\n4\n5\n");
}

#[test]
fn range_negative_json() {
    let out = run(&["--json", "range", "-2-1"]).expect("range");
    let values: Vec<i64> = serde_json::from_str(&out).expect("json");
    assert_eq!(values, vec![-2, -1, 0, 1]);
}

#[test]
fn range_unsigned_rejects_negative() {
    let err = run(&["range", "--type", "u64", "-1"]).expect_err("negative u64");
    assert!(matches!(err, CliError::Text(TextError::InvalidInteger(_))));
}

#[test]
fn range_inverted_fails() {
    let err = run(&["range", "9-2"]).expect_err("inverted");
    assert!(matches!(err, CliError::Text(TextError::InvertedRange { .. })));
}

// =============================================================================
// TABLES
// =============================================================================

#[test]
fn grades_table_lists_all_grades() {
    let out = run(&["grades"]).expect("grades");
    let lines: Vec<&str> = out.lines().collect();

    assert_eq!(lines.len(), 6);
    assert!(lines[0].starts_with("GRADE"));
    assert!(lines[1].starts_with("condition"));
    assert!(lines[5].starts_with("violation"));
    assert!(lines[5].contains("propagate"));
}

#[test]
fn grades_json_rows() {
    let out = run(&["grades", "--json"]).expect("grades");
    let rows: serde_json::Value = serde_json::from_str(&out).expect("json");

    assert_eq!(rows[3]["grade"], "critical-error");
    assert_eq!(rows[3]["rank"], 3);
    assert_eq!(rows[3]["recovery"], "unwind");
    assert_eq!(rows[3]["locally_recoverable"], false);
}

#[test]
fn kinds_table_shows_hierarchy() {
    let out = run(&["kinds"]).expect("kinds");
    let index_line = out
        .lines()
        .find(|line| line.starts_with("index-out-of-range"))
        .expect("index row");

    assert!(index_line.contains("out-of-range"));
    assert!(index_line.ends_with("error,critical-error,violation"));
}

#[test]
fn kinds_json_rows() {
    let out = run(&["--json", "kinds"]).expect("kinds");
    let rows: serde_json::Value = serde_json::from_str(&out).expect("json");

    let finished = rows
        .as_array()
        .expect("array")
        .iter()
        .find(|row| row["kind"] == "finished")
        .expect("finished row");
    assert_eq!(finished["parent"], serde_json::Value::Null);
    assert_eq!(finished["grades"], serde_json::json!(["condition"]));
}
