//! Purpose: `rowsort` CLI entry point.
//! Role: Binary crate root; parses args, installs logging, runs commands, reports errors.
//! Invariants: Command output goes to stdout; logs and errors go to stderr.
//! Invariants: Non-interactive errors are emitted as JSON on stderr.
//! Invariants: Process exit code is derived from `api::to_exit_code`.
use std::io::{self, IsTerminal};
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum, ValueHint, error::ErrorKind as ClapErrorKind};
use clap_complete::aot::Shell;
use serde_json::{Map, Value, json};
use std::error::Error as StdError;
use tracing_subscriber::EnvFilter;

mod command_dispatch;
mod shell;

use rowsort::api::{Error, ErrorKind, SortPolicy, to_exit_code};

#[derive(Copy, Clone, Debug)]
struct RunOutcome {
    exit_code: i32,
}

impl RunOutcome {
    fn ok() -> Self {
        Self { exit_code: 0 }
    }

    fn with_code(exit_code: i32) -> Self {
        Self { exit_code }
    }
}

fn main() {
    init_tracing();
    let exit_code = match run() {
        Ok(outcome) => outcome.exit_code,
        Err((err, color_mode)) => {
            emit_error(&err, color_mode);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run() -> Result<RunOutcome, (Error, ColorMode)> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp
            | ClapErrorKind::DisplayVersion
            | ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                err.print().map_err(|io_err| {
                    (
                        Error::new(ErrorKind::Io)
                            .with_message("failed to write help")
                            .with_source(io_err),
                        ColorMode::Auto,
                    )
                })?;
                let exit_code = if matches!(
                    err.kind(),
                    ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                ) {
                    2
                } else {
                    0
                };
                return Ok(RunOutcome::with_code(exit_code));
            }
            _ => {
                return Err((
                    Error::new(ErrorKind::Usage)
                        .with_message(clap_error_summary(&err))
                        .with_hint("Try `rowsort --help`."),
                    ColorMode::Auto,
                ));
            }
        },
    };

    let color_mode = cli.color;
    command_dispatch::dispatch_command(cli.command, color_mode).map_err(|err| (err, color_mode))
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

#[derive(Parser)]
#[command(
    name = "rowsort",
    version,
    about = "Sort schema-typed tables by multi-key policies",
    long_about = None,
    after_help = r#"EXAMPLES
  $ rowsort sort people.json --by 0:asc --by 2:desc
  $ rowsort sort people.json --format json
  $ rowsort check people.json
  $ rowsort demo
  $ rowsort shell

TABLE FILES
  {"schema": ["string", "integer", "boolean"],
   "rows": [["aa", 3, true], ["bbb", 1, true]],
   "sort": [{"column": 0, "direction": "asc"}]}"#,
    arg_required_else_help = true
)]
struct Cli {
    #[arg(
        long,
        default_value = "auto",
        global = true,
        help = "Colorize headers and error labels: auto, always, never"
    )]
    color: ColorMode,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    #[command(about = "Load a table file, sort it, and print it")]
    Sort {
        #[arg(help = "Table file (JSON), or - for stdin", value_hint = ValueHint::FilePath)]
        input: PathBuf,
        #[arg(
            long = "by",
            value_name = "COL[:DIR]",
            help = "Sort key; repeat for tie-breakers (overrides the file's sort list)"
        )]
        by: Vec<SortPolicy>,
        #[arg(long, default_value = "text", help = "Output format")]
        format: OutputFormat,
    },
    #[command(about = "Validate a table file without printing rows")]
    Check {
        #[arg(help = "Table file (JSON), or - for stdin", value_hint = ValueHint::FilePath)]
        input: PathBuf,
    },
    #[command(about = "Walk through a sample table sorted several ways")]
    Demo,
    #[command(about = "Interactive menu for building and sorting tables")]
    Shell,
    #[command(about = "Generate shell completions")]
    Completion {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    fn use_color(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

enum AnsiColor {
    Red,
    Yellow,
}

fn colorize_label(label: &str, enabled: bool, color: AnsiColor) -> String {
    if !enabled {
        return label.to_string();
    }
    let code = match color {
        AnsiColor::Red => "31",
        AnsiColor::Yellow => "33",
    };
    format!("\u{1b}[{code}m{label}\u{1b}[0m")
}

fn emit_error(err: &Error, color_mode: ColorMode) {
    let is_tty = io::stderr().is_terminal();
    if is_tty {
        eprintln!("{}", error_text(err, color_mode.use_color(is_tty)));
        return;
    }

    let value = error_json(err);
    let json = serde_json::to_string(&value).unwrap_or_else(|_| {
        "{\"error\":{\"kind\":\"Internal\",\"message\":\"json encode failed\"}}".to_string()
    });
    eprintln!("{json}");
}

fn error_message(err: &Error) -> String {
    if let Some(message) = err.message() {
        return message.to_string();
    }
    match err.kind() {
        ErrorKind::Internal => "internal error".to_string(),
        ErrorKind::Usage => "usage error".to_string(),
        ErrorKind::Schema => "invalid schema".to_string(),
        ErrorKind::RowShape => "row has the wrong number of values".to_string(),
        ErrorKind::RowKindMismatch => "row value has the wrong kind".to_string(),
        ErrorKind::SortPolicy => "invalid sort policy".to_string(),
        ErrorKind::Io => "i/o error".to_string(),
    }
}

fn error_causes(err: &Error) -> Vec<String> {
    let mut causes = Vec::new();
    let mut cur = err.source();
    while let Some(source) = cur {
        causes.push(source.to_string());
        cur = source.source();
    }
    causes
}

fn error_json(err: &Error) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(format!("{:?}", err.kind())));
    inner.insert("message".to_string(), json!(error_message(err)));
    if let Some(hint) = err.hint() {
        inner.insert("hint".to_string(), json!(hint));
    }
    if let Some(row) = err.row() {
        inner.insert("row".to_string(), json!(row));
    }
    if let Some(column) = err.column() {
        inner.insert("column".to_string(), json!(column));
    }
    if let Some(policy) = err.policy() {
        inner.insert("policy".to_string(), json!(policy));
    }
    if let (Some(expected), Some(found)) = (err.expected(), err.found()) {
        inner.insert("expected".to_string(), json!(expected));
        inner.insert("found".to_string(), json!(found));
    }
    let causes = error_causes(err);
    if !causes.is_empty() {
        inner.insert("causes".to_string(), json!(causes));
    }

    let mut outer = Map::new();
    outer.insert("error".to_string(), Value::Object(inner));
    Value::Object(outer)
}

fn error_text(err: &Error, use_color: bool) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "{} {}",
        colorize_label("error:", use_color, AnsiColor::Red),
        error_message(err)
    ));

    if let Some(hint) = err.hint() {
        lines.push(format!(
            "{} {hint}",
            colorize_label("hint:", use_color, AnsiColor::Yellow)
        ));
    }
    if let Some(row) = err.row() {
        lines.push(format!(
            "{} {row}",
            colorize_label("row:", use_color, AnsiColor::Yellow)
        ));
    }
    if let Some(column) = err.column() {
        lines.push(format!(
            "{} {column}",
            colorize_label("column:", use_color, AnsiColor::Yellow)
        ));
    }
    if let Some(policy) = err.policy() {
        lines.push(format!(
            "{} {policy}",
            colorize_label("policy:", use_color, AnsiColor::Yellow)
        ));
    }

    let causes = error_causes(err);
    if let Some(cause) = causes.first() {
        lines.push(format!(
            "{} {cause}",
            colorize_label("caused by:", use_color, AnsiColor::Yellow)
        ));
    }

    lines.join("\n")
}

fn clap_error_summary(err: &clap::Error) -> String {
    for line in err.to_string().lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix("error:") {
            return rest.trim().to_string();
        }
        return trimmed.to_string();
    }
    "invalid arguments".to_string()
}

#[cfg(test)]
mod tests {
    use super::{error_json, error_text};
    use rowsort::api::{ColumnKind, Error, ErrorKind};

    #[test]
    fn error_json_carries_context() {
        let err = Error::new(ErrorKind::RowKindMismatch)
            .with_message("cell kind disagrees with its column")
            .with_row(3)
            .with_column(1)
            .with_kinds(ColumnKind::Integer, ColumnKind::String);
        let value = error_json(&err);
        let inner = value.get("error").expect("error object");
        assert_eq!(inner["kind"], "RowKindMismatch");
        assert_eq!(inner["row"], 3);
        assert_eq!(inner["column"], 1);
        assert_eq!(inner["expected"], "integer");
        assert_eq!(inner["found"], "string");
        assert!(inner.get("policy").is_none());
    }

    #[test]
    fn error_text_without_color_has_plain_labels() {
        let err = Error::new(ErrorKind::SortPolicy)
            .with_message("sort column 9 is out of range for 3 columns")
            .with_policy(0);
        let text = error_text(&err, false);
        assert_eq!(
            text,
            "error: sort column 9 is out of range for 3 columns\npolicy: 0"
        );
    }
}
