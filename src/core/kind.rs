//! Purpose: Declare the closed set of column kinds and the ordinal `Color` enumeration.
//! Exports: `ColumnKind`, `Color`.
//! Role: Schema vocabulary; every `ColumnValue` alternative maps to exactly one kind.
//! Invariants: `ColumnKind::ordinal` equals the position of the matching `ColumnValue` variant.
//! Invariants: `Color` orders by ordinal (`Red < Green < Blue`).
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::{Error, ErrorKind};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ColumnKind {
    Integer,
    String,
    Boolean,
    Float,
    Color,
}

impl ColumnKind {
    pub const ALL: [ColumnKind; 5] = [
        ColumnKind::Integer,
        ColumnKind::String,
        ColumnKind::Boolean,
        ColumnKind::Float,
        ColumnKind::Color,
    ];

    pub fn ordinal(self) -> usize {
        match self {
            ColumnKind::Integer => 0,
            ColumnKind::String => 1,
            ColumnKind::Boolean => 2,
            ColumnKind::Float => 3,
            ColumnKind::Color => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ColumnKind::Integer => "integer",
            ColumnKind::String => "string",
            ColumnKind::Boolean => "boolean",
            ColumnKind::Float => "float",
            ColumnKind::Color => "color",
        }
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColumnKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "integer" | "int" => Ok(ColumnKind::Integer),
            "string" | "str" => Ok(ColumnKind::String),
            "boolean" | "bool" => Ok(ColumnKind::Boolean),
            "float" | "double" => Ok(ColumnKind::Float),
            "color" => Ok(ColumnKind::Color),
            _ => Err(Error::new(ErrorKind::Usage)
                .with_message(format!("unknown column kind `{s}`"))
                .with_hint("Use one of: integer, string, boolean, float, color.")),
        }
    }
}

impl TryFrom<String> for ColumnKind {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ColumnKind> for String {
    fn from(kind: ColumnKind) -> Self {
        kind.name().to_string()
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Color {
    Red,
    Green,
    Blue,
}

impl Color {
    pub fn name(self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Green => "green",
            Color::Blue => "blue",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Color::Red => "RED",
            Color::Green => "GREEN",
            Color::Blue => "BLUE",
        };
        f.write_str(label)
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "red" => Ok(Color::Red),
            "green" => Ok(Color::Green),
            "blue" => Ok(Color::Blue),
            _ => Err(Error::new(ErrorKind::Usage)
                .with_message(format!("unknown color `{s}`"))
                .with_hint("Colors are red, green, or blue.")),
        }
    }
}
