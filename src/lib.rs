//! Purpose: Library crate behind the `rowsort` CLI: typed tables and multi-key row ordering.
//! Exports: `core` (values, comparators, ordering, table, errors) and `api` (public surface).
//! Role: In-process library; the CLI and tests go through `api`.
//! Invariants: Core modules are synchronous and perform no I/O.
//! Invariants: Every failure is a returned `core::error::Error`, never a partial mutation.
pub mod api;
pub mod core;
