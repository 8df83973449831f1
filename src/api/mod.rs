//! Purpose: Define the stable public Rust API boundary for rowsort.
//! Exports: Table, value, ordering, and error types plus the JSON literal loader.
//! Role: Public, additive-only surface used by the CLI and integration tests.
//! Invariants: This module is the public path to the table core.
//! Invariants: The literal loader only builds tables through `Table`'s validated operations.

mod literal;

pub use crate::core::compare::{Comparator, ComparatorRegistry, comparator_for};
#[doc(hidden)]
pub use crate::core::error::to_exit_code;
pub use crate::core::error::{Error, ErrorKind};
pub use crate::core::kind::{Color, ColumnKind};
pub use crate::core::order::{ColumnIndex, RowOrder, SortDirection, SortPolicy, compile_order};
pub use crate::core::render::render_rows;
pub use crate::core::table::Table;
pub use crate::core::value::{ColumnValue, Row};
pub use literal::{TableLiteral, table_json};
