//! Purpose: Hold top-level CLI command dispatch for `rowsort`.
//! Exports: `dispatch_command`.
//! Role: Keep `main.rs` focused on parse/bootstrap and delegate command execution.
//! Invariants: Table mutations only go through `api::Table` operations.
//! Invariants: `--by` replaces the file's own sort list rather than appending to it.

use std::fs::File;
use std::io::{self, BufReader, IsTerminal, Write};
use std::path::Path;

use clap::CommandFactory;
use serde_json::json;

use rowsort::api::{ColumnKind, SortPolicy, Table, TableLiteral, table_json};

use super::*;

pub(super) fn dispatch_command(command: Command, color_mode: ColorMode) -> Result<RunOutcome, Error> {
    match command {
        Command::Sort { input, by, format } => {
            let mut literal = load_literal(&input)?;
            if !by.is_empty() {
                literal.sort = by;
            }
            let table = literal.into_table()?;
            match format {
                OutputFormat::Text => {
                    let use_color = color_mode.use_color(io::stdout().is_terminal());
                    write_stdout(&table.render(use_color))?;
                }
                OutputFormat::Json => {
                    write_stdout(&format!("{}\n", table_json(&table)))?;
                }
            }
            Ok(RunOutcome::ok())
        }
        Command::Check { input } => {
            let table = load_literal(&input)?.into_table()?;
            let report = json!({
                "ok": true,
                "rows": table.len(),
                "columns": table.column_count(),
            });
            write_stdout(&format!("{report}\n"))?;
            Ok(RunOutcome::ok())
        }
        Command::Demo => {
            let use_color = color_mode.use_color(io::stdout().is_terminal());
            let mut stdout = io::stdout().lock();
            run_demo(&mut stdout, use_color)?;
            Ok(RunOutcome::ok())
        }
        Command::Shell => {
            let stdin = io::stdin().lock();
            let stdout = io::stdout().lock();
            shell::Session::new(stdin, stdout).run()?;
            Ok(RunOutcome::ok())
        }
        Command::Completion { shell } => {
            let mut cmd = Cli::command();
            clap_complete::aot::generate(shell, &mut cmd, "rowsort", &mut io::stdout());
            Ok(RunOutcome::ok())
        }
    }
}

fn load_literal(input: &Path) -> Result<TableLiteral, Error> {
    if input == Path::new("-") {
        return TableLiteral::from_reader(io::stdin().lock());
    }
    let file = File::open(input).map_err(|err| {
        Error::new(ErrorKind::Io)
            .with_message(format!("cannot open {}", input.display()))
            .with_source(err)
    })?;
    TableLiteral::from_reader(BufReader::new(file))
}

fn write_stdout(text: &str) -> Result<(), Error> {
    io::stdout()
        .lock()
        .write_all(text.as_bytes())
        .map_err(io_error)
}

pub(crate) fn io_error(err: io::Error) -> Error {
    Error::new(ErrorKind::Io)
        .with_message("failed to write output")
        .with_source(err)
}

pub(crate) fn describe_policies(policies: &[SortPolicy]) -> String {
    let keys: Vec<String> = policies.iter().map(ToString::to_string).collect();
    format!("[{}]", keys.join(", "))
}

/// Replays the sample walkthrough: one table, several policy lists.
pub(crate) fn run_demo(out: &mut impl Write, use_color: bool) -> Result<(), Error> {
    let mut table = Table::new([ColumnKind::String, ColumnKind::Integer, ColumnKind::Boolean])?;
    table.append_rows([
        vec!["aa".into(), 3_i64.into(), true.into()],
        vec!["bbb".into(), 1_i64.into(), true.into()],
        vec!["xx".into(), 2_i64.into(), false.into()],
        vec!["aa".into(), 4_i64.into(), true.into()],
        vec!["bbb".into(), 0_i64.into(), false.into()],
    ])?;

    writeln!(out, "Starting table").map_err(io_error)?;
    writeln!(out, "{}", table.render(use_color)).map_err(io_error)?;

    let stages = [
        vec![SortPolicy::asc(0)],
        vec![SortPolicy::asc(2), SortPolicy::asc(1)],
        vec![SortPolicy::asc(2), SortPolicy::desc(2)],
        vec![SortPolicy::desc(2), SortPolicy::asc(2)],
    ];
    for policies in &stages {
        table.sort(policies)?;
        writeln!(out, "Table after sort {}", describe_policies(policies)).map_err(io_error)?;
        writeln!(out, "{}", table.render(use_color)).map_err(io_error)?;
    }
    Ok(())
}
