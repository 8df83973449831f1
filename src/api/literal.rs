//! Purpose: Load tables from JSON literals and emit them back as JSON.
//! Exports: `TableLiteral`, `table_json`.
//! Role: Front-end contract shared by the CLI and tests; the core stays format-agnostic.
//! Invariants: Cells are converted against the declared schema, never by sniffing JSON types.
//! Invariants: A literal either produces a fully built table or an error naming row and column.
use std::io::Read;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::core::error::{Error, ErrorKind};
use crate::core::kind::ColumnKind;
use crate::core::order::SortPolicy;
use crate::core::table::Table;
use crate::core::value::{ColumnValue, Row};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableLiteral {
    pub schema: Vec<ColumnKind>,
    #[serde(default)]
    pub rows: Vec<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sort: Vec<SortPolicy>,
}

impl TableLiteral {
    pub fn from_json_str(text: &str) -> Result<Self, Error> {
        serde_json::from_str(text).map_err(literal_parse_error)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self, Error> {
        serde_json::from_reader(reader).map_err(literal_parse_error)
    }

    /// Builds the table, appends every row, then applies `sort` if present.
    pub fn into_table(self) -> Result<Table, Error> {
        let mut table = Table::new(self.schema)?;
        let mut rows = Vec::with_capacity(self.rows.len());
        for (position, cells) in self.rows.iter().enumerate() {
            rows.push(convert_row(table.schema(), cells).map_err(|err| err.with_row(position))?);
        }
        table.append_rows(rows)?;
        table.sort(&self.sort)?;
        Ok(table)
    }
}

fn convert_row(schema: &[ColumnKind], cells: &[Value]) -> Result<Row, Error> {
    if cells.len() != schema.len() {
        return Err(Error::new(ErrorKind::RowShape).with_message(format!(
            "row has {} values but the schema has {} columns",
            cells.len(),
            schema.len()
        )));
    }
    schema
        .iter()
        .zip(cells)
        .enumerate()
        .map(|(column, (kind, cell))| {
            ColumnValue::from_json(*kind, cell).map_err(|err| err.with_column(column))
        })
        .collect()
}

fn literal_parse_error(err: serde_json::Error) -> Error {
    let kind = if err.is_io() {
        ErrorKind::Io
    } else {
        ErrorKind::Usage
    };
    Error::new(kind)
        .with_message("invalid table literal")
        .with_hint(
            r#"Expected {"schema": ["string", ...], "rows": [[...], ...], "sort": [{"column": 0, "direction": "asc"}]}."#,
        )
        .with_source(err)
}

/// JSON form of a table's schema and current row order.
pub fn table_json(table: &Table) -> Value {
    let rows: Vec<Value> = table
        .rows()
        .iter()
        .map(|row| Value::Array(row.iter().map(ColumnValue::to_json).collect()))
        .collect();
    json!({
        "schema": table.schema(),
        "rows": rows,
    })
}
