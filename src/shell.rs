//! Purpose: Interactive numbered-menu session over a catalog of named tables.
//! Exports: `Session`, `MenuAction`.
//! Role: Line-oriented front end; every table change goes through `api::Table`.
//! Invariants: Menu numbers are 1-based; invalid choices re-prompt without side effects.
//! Invariants: Table errors are reported inline and never end the session; end of input does.
use std::collections::BTreeMap;
use std::io::{BufRead, Write};

use rowsort::api::{ColumnKind, ColumnValue, Error, ErrorKind, Row, SortPolicy, Table};

use crate::command_dispatch::{describe_policies, io_error};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum MenuAction {
    ShutDown,
    MakeTable,
    ShowTable,
    ListTables,
    AppendRow,
    SortTable,
}

impl MenuAction {
    const ALL: [MenuAction; 6] = [
        MenuAction::ShutDown,
        MenuAction::MakeTable,
        MenuAction::ShowTable,
        MenuAction::ListTables,
        MenuAction::AppendRow,
        MenuAction::SortTable,
    ];

    fn label(self) -> &'static str {
        match self {
            MenuAction::ShutDown => "Shut down the system gracefully",
            MenuAction::MakeTable => "Make a table",
            MenuAction::ShowTable => "Show an existing table",
            MenuAction::ListTables => "List all existing tables",
            MenuAction::AppendRow => "Append a row to a table",
            MenuAction::SortTable => "Sort a table",
        }
    }
}

enum Choice {
    Action(MenuAction),
    Retry,
    EndOfInput,
}

pub(crate) struct Session<R, W> {
    input: R,
    output: W,
    tables: BTreeMap<String, Table>,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub(crate) fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            tables: BTreeMap::new(),
        }
    }

    pub(crate) fn run(&mut self) -> Result<(), Error> {
        self.say("Welcome to the rowsort table shell!\n")?;
        loop {
            let action = match self.ask_for_action()? {
                Choice::Action(action) => action,
                Choice::Retry => continue,
                Choice::EndOfInput => return Ok(()),
            };
            self.say(&format!("You chose: {}\n", action.label()))?;

            let outcome = match action {
                MenuAction::ShutDown => {
                    self.say("Goodbye.\n")?;
                    return Ok(());
                }
                MenuAction::MakeTable => self.make_table(),
                MenuAction::ShowTable => self.show_table(),
                MenuAction::ListTables => self.list_tables(),
                MenuAction::AppendRow => self.append_row(),
                MenuAction::SortTable => self.sort_table(),
            };
            match outcome {
                Ok(true) => {}
                Ok(false) => return Ok(()),
                Err(err) if err.kind() == ErrorKind::Io => return Err(err),
                Err(err) => self.say(&format!("error: {err}\n"))?,
            }
            self.say("\n")?;
        }
    }

    fn ask_for_action(&mut self) -> Result<Choice, Error> {
        self.say("What action would you like to take:\n")?;
        for (idx, action) in MenuAction::ALL.iter().enumerate() {
            self.say(&format!("{}: {}\n", idx + 1, action.label()))?;
        }
        let Some(line) = self.prompt("\nMy response: ")? else {
            return Ok(Choice::EndOfInput);
        };

        let Ok(number) = line.trim().parse::<usize>() else {
            self.say("Please type in a valid number\n\n")?;
            return Ok(Choice::Retry);
        };
        match number
            .checked_sub(1)
            .and_then(|idx| MenuAction::ALL.get(idx))
        {
            Some(action) => Ok(Choice::Action(*action)),
            None => {
                self.say("That number is not a current option. Please try again\n\n")?;
                Ok(Choice::Retry)
            }
        }
    }

    // Each handler returns Ok(false) when input ran out mid-dialog.

    fn make_table(&mut self) -> Result<bool, Error> {
        let Some(name) = self.prompt("Table name: ")? else {
            return Ok(false);
        };
        let name = name.trim().to_string();
        if name.is_empty() || self.tables.contains_key(&name) {
            return Err(Error::new(ErrorKind::Usage)
                .with_message(format!("table name `{name}` is empty or already taken")));
        }
        let Some(kinds) = self.prompt("Column kinds (e.g. string integer boolean): ")? else {
            return Ok(false);
        };
        let schema = kinds
            .split_whitespace()
            .map(str::parse::<ColumnKind>)
            .collect::<Result<Vec<_>, _>>()?;
        let table = Table::new(schema)?;
        self.say(&format!(
            "Created table `{name}` with {} columns\n",
            table.column_count()
        ))?;
        self.tables.insert(name, table);
        Ok(true)
    }

    fn show_table(&mut self) -> Result<bool, Error> {
        let Some(name) = self.prompt("Table name: ")? else {
            return Ok(false);
        };
        let rendered = self.table(&name)?.render(false);
        self.say(&rendered)?;
        Ok(true)
    }

    fn list_tables(&mut self) -> Result<bool, Error> {
        if self.tables.is_empty() {
            self.say("No tables yet\n")?;
            return Ok(true);
        }
        let lines: Vec<String> = self
            .tables
            .iter()
            .map(|(name, table)| {
                format!(
                    "{name} ({} rows, {} columns)\n",
                    table.len(),
                    table.column_count()
                )
            })
            .collect();
        for line in lines {
            self.say(&line)?;
        }
        Ok(true)
    }

    fn append_row(&mut self) -> Result<bool, Error> {
        let Some(name) = self.prompt("Table name: ")? else {
            return Ok(false);
        };
        let schema = self.table(&name)?.schema().to_vec();
        let hint: Vec<&str> = schema.iter().map(|kind| kind.name()).collect();
        let Some(values) = self.prompt(&format!("Row values ({}): ", hint.join(" ")))? else {
            return Ok(false);
        };
        let row = parse_row(&schema, &values)?;
        let table = self.table_mut(&name)?;
        table.append_row(row)?;
        let count = table.len();
        self.say(&format!("Table `{}` now has {count} rows\n", name.trim()))?;
        Ok(true)
    }

    fn sort_table(&mut self) -> Result<bool, Error> {
        let Some(name) = self.prompt("Table name: ")? else {
            return Ok(false);
        };
        self.table(&name)?;
        let Some(keys) = self.prompt("Sort keys (e.g. 0:asc 1:desc): ")? else {
            return Ok(false);
        };
        let policies = keys
            .split_whitespace()
            .map(str::parse::<SortPolicy>)
            .collect::<Result<Vec<_>, _>>()?;
        let table = self.table_mut(&name)?;
        table.sort(&policies)?;
        let rendered = table.render(false);
        self.say(&format!("Sorted by {}\n", describe_policies(&policies)))?;
        self.say(&rendered)?;
        Ok(true)
    }

    fn table(&self, name: &str) -> Result<&Table, Error> {
        self.tables.get(name.trim()).ok_or_else(|| unknown_table(name))
    }

    fn table_mut(&mut self, name: &str) -> Result<&mut Table, Error> {
        self.tables
            .get_mut(name.trim())
            .ok_or_else(|| unknown_table(name))
    }

    fn prompt(&mut self, question: &str) -> Result<Option<String>, Error> {
        self.say(question)?;
        self.output.flush().map_err(io_error)?;
        let mut line = String::new();
        let read = self.input.read_line(&mut line).map_err(|err| {
            Error::new(ErrorKind::Io)
                .with_message("failed to read input")
                .with_source(err)
        })?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn say(&mut self, text: &str) -> Result<(), Error> {
        self.output.write_all(text.as_bytes()).map_err(io_error)
    }
}

fn unknown_table(name: &str) -> Error {
    Error::new(ErrorKind::Usage)
        .with_message(format!("no table named `{}`", name.trim()))
        .with_hint("Use \"List all existing tables\" to see table names.")
}

/// Splits a line into one token per column and parses each against its kind.
fn parse_row(schema: &[ColumnKind], line: &str) -> Result<Row, Error> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != schema.len() {
        return Err(Error::new(ErrorKind::RowShape).with_message(format!(
            "expected {} values, got {}",
            schema.len(),
            tokens.len()
        )));
    }
    schema
        .iter()
        .zip(tokens)
        .enumerate()
        .map(|(column, (kind, token))| {
            ColumnValue::parse_token(*kind, token).map_err(|err| err.with_column(column))
        })
        .collect()
}
