//! Purpose: One error type for every contract violation the table core can report.
//! Exports: `Error`, `ErrorKind`, `to_exit_code`.
//! Role: Shared by the core, the literal loader, and the CLI emission paths.
//! Invariants: Kinds map to stable exit codes; new kinds are additive.
//! Invariants: Context fields are optional and never change the kind.
use std::error::Error as StdError;
use std::fmt;

use crate::core::kind::ColumnKind;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Internal,
    Usage,
    Schema,
    RowShape,
    RowKindMismatch,
    SortPolicy,
    Io,
}

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: Option<String>,
    hint: Option<String>,
    row: Option<usize>,
    column: Option<usize>,
    policy: Option<usize>,
    expected: Option<ColumnKind>,
    found: Option<ColumnKind>,
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            hint: None,
            row: None,
            column: None,
            policy: None,
            expected: None,
            found: None,
            source: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    pub fn row(&self) -> Option<usize> {
        self.row
    }

    pub fn column(&self) -> Option<usize> {
        self.column
    }

    pub fn policy(&self) -> Option<usize> {
        self.policy
    }

    pub fn expected(&self) -> Option<ColumnKind> {
        self.expected
    }

    pub fn found(&self) -> Option<ColumnKind> {
        self.found
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_row(mut self, row: usize) -> Self {
        self.row = Some(row);
        self
    }

    pub fn with_column(mut self, column: usize) -> Self {
        self.column = Some(column);
        self
    }

    pub fn with_policy(mut self, policy: usize) -> Self {
        self.policy = Some(policy);
        self
    }

    pub fn with_kinds(mut self, expected: ColumnKind, found: ColumnKind) -> Self {
        self.expected = Some(expected);
        self.found = Some(found);
        self
    }

    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.kind)?;
        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }
        if let Some(row) = self.row {
            write!(f, " (row: {row})")?;
        }
        if let Some(column) = self.column {
            write!(f, " (column: {column})")?;
        }
        if let Some(policy) = self.policy {
            write!(f, " (policy: {policy})")?;
        }
        if let (Some(expected), Some(found)) = (self.expected, self.found) {
            write!(f, " (expected: {expected}, found: {found})")?;
        }
        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|source| source.as_ref() as &(dyn StdError + 'static))
    }
}

pub fn to_exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::Internal => 1,
        ErrorKind::Usage => 2,
        ErrorKind::Schema => 3,
        ErrorKind::RowShape => 4,
        ErrorKind::RowKindMismatch => 5,
        ErrorKind::SortPolicy => 6,
        ErrorKind::Io => 7,
    }
}
