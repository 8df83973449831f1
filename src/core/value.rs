//! Purpose: Hold one typed cell value and convert it to and from front-end literals.
//! Exports: `ColumnValue`, `Row`.
//! Role: Cell model shared by validation, comparison, rendering, and the JSON loader.
//! Invariants: Each variant corresponds to exactly one `ColumnKind`.
//! Invariants: Conversions are schema-directed; a literal is never coerced across kinds.
use std::fmt;

use serde_json::{Value, json};

use crate::core::error::{Error, ErrorKind};
use crate::core::kind::{Color, ColumnKind};

#[derive(Clone, Debug, PartialEq)]
pub enum ColumnValue {
    Integer(i64),
    String(String),
    Boolean(bool),
    Float(f64),
    Color(Color),
}

/// One cell per schema column, in schema order.
pub type Row = Vec<ColumnValue>;

impl ColumnValue {
    pub fn kind(&self) -> ColumnKind {
        match self {
            ColumnValue::Integer(_) => ColumnKind::Integer,
            ColumnValue::String(_) => ColumnKind::String,
            ColumnValue::Boolean(_) => ColumnKind::Boolean,
            ColumnValue::Float(_) => ColumnKind::Float,
            ColumnValue::Color(_) => ColumnKind::Color,
        }
    }

    /// Converts a JSON literal into a cell of the declared `kind`.
    pub fn from_json(kind: ColumnKind, value: &Value) -> Result<Self, Error> {
        let converted = match kind {
            ColumnKind::Integer => value.as_i64().map(ColumnValue::Integer),
            ColumnKind::String => value.as_str().map(|s| ColumnValue::String(s.to_string())),
            ColumnKind::Boolean => value.as_bool().map(ColumnValue::Boolean),
            ColumnKind::Float => value.as_f64().map(ColumnValue::Float),
            ColumnKind::Color => value
                .as_str()
                .and_then(|s| s.parse::<Color>().ok())
                .map(ColumnValue::Color),
        };
        converted.ok_or_else(|| {
            Error::new(ErrorKind::Usage)
                .with_message(format!("value {value} is not a valid {kind}"))
        })
    }

    /// Parses a bare text token (as typed into the shell) into a cell of `kind`.
    pub fn parse_token(kind: ColumnKind, token: &str) -> Result<Self, Error> {
        let invalid = || {
            Error::new(ErrorKind::Usage).with_message(format!("`{token}` is not a valid {kind}"))
        };
        match kind {
            ColumnKind::Integer => token
                .parse::<i64>()
                .map(ColumnValue::Integer)
                .map_err(|err| invalid().with_source(err)),
            ColumnKind::String => Ok(ColumnValue::String(token.to_string())),
            ColumnKind::Boolean => match token.to_ascii_lowercase().as_str() {
                "true" | "t" | "1" => Ok(ColumnValue::Boolean(true)),
                "false" | "f" | "0" => Ok(ColumnValue::Boolean(false)),
                _ => Err(invalid()),
            },
            ColumnKind::Float => token
                .parse::<f64>()
                .map(ColumnValue::Float)
                .map_err(|err| invalid().with_source(err)),
            ColumnKind::Color => token.parse::<Color>().map(ColumnValue::Color),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            ColumnValue::Integer(num) => json!(num),
            ColumnValue::String(s) => json!(s),
            ColumnValue::Boolean(b) => json!(b),
            // Non-finite floats have no JSON number form.
            ColumnValue::Float(num) if num.is_finite() => json!(num),
            ColumnValue::Float(num) => json!(num.to_string()),
            ColumnValue::Color(color) => json!(color.name()),
        }
    }
}

impl fmt::Display for ColumnValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnValue::Integer(num) => write!(f, "{num}"),
            ColumnValue::String(s) => f.write_str(s),
            ColumnValue::Boolean(b) => write!(f, "{b}"),
            ColumnValue::Float(num) => write!(f, "{num}"),
            ColumnValue::Color(color) => write!(f, "{color}"),
        }
    }
}

impl From<i64> for ColumnValue {
    fn from(value: i64) -> Self {
        ColumnValue::Integer(value)
    }
}

impl From<&str> for ColumnValue {
    fn from(value: &str) -> Self {
        ColumnValue::String(value.to_string())
    }
}

impl From<String> for ColumnValue {
    fn from(value: String) -> Self {
        ColumnValue::String(value)
    }
}

impl From<bool> for ColumnValue {
    fn from(value: bool) -> Self {
        ColumnValue::Boolean(value)
    }
}

impl From<f64> for ColumnValue {
    fn from(value: f64) -> Self {
        ColumnValue::Float(value)
    }
}

impl From<Color> for ColumnValue {
    fn from(value: Color) -> Self {
        ColumnValue::Color(value)
    }
}
