//! Purpose: Resolve one three-way comparator per column kind and store them per schema.
//! Exports: `Comparator`, `comparator_for`, `ComparatorRegistry`.
//! Role: Kind-indexed dispatch table consumed by the order compiler.
//! Invariants: Dispatch happens once per column at registry build time, never per comparison.
//! Invariants: Every comparator is a strict weak order over its own kind.
//! Invariants: Passing a value of another kind is a contract violation and panics.
use std::cmp::Ordering;
use std::fmt;

use crate::core::kind::ColumnKind;
use crate::core::value::ColumnValue;

/// Three-way comparison of two cells of the same kind.
pub type Comparator = fn(&ColumnValue, &ColumnValue) -> Ordering;

pub fn comparator_for(kind: ColumnKind) -> Comparator {
    match kind {
        ColumnKind::Integer => compare_integer,
        ColumnKind::String => compare_string,
        ColumnKind::Boolean => compare_boolean,
        ColumnKind::Float => compare_float,
        ColumnKind::Color => compare_color,
    }
}

fn compare_integer(lhs: &ColumnValue, rhs: &ColumnValue) -> Ordering {
    match (lhs, rhs) {
        (ColumnValue::Integer(a), ColumnValue::Integer(b)) => a.cmp(b),
        _ => kind_violation(ColumnKind::Integer, lhs, rhs),
    }
}

fn compare_string(lhs: &ColumnValue, rhs: &ColumnValue) -> Ordering {
    match (lhs, rhs) {
        (ColumnValue::String(a), ColumnValue::String(b)) => a.as_bytes().cmp(b.as_bytes()),
        _ => kind_violation(ColumnKind::String, lhs, rhs),
    }
}

fn compare_boolean(lhs: &ColumnValue, rhs: &ColumnValue) -> Ordering {
    match (lhs, rhs) {
        (ColumnValue::Boolean(a), ColumnValue::Boolean(b)) => a.cmp(b),
        _ => kind_violation(ColumnKind::Boolean, lhs, rhs),
    }
}

// IEEE totalOrder keeps NaN inside a strict weak order.
fn compare_float(lhs: &ColumnValue, rhs: &ColumnValue) -> Ordering {
    match (lhs, rhs) {
        (ColumnValue::Float(a), ColumnValue::Float(b)) => a.total_cmp(b),
        _ => kind_violation(ColumnKind::Float, lhs, rhs),
    }
}

fn compare_color(lhs: &ColumnValue, rhs: &ColumnValue) -> Ordering {
    match (lhs, rhs) {
        (ColumnValue::Color(a), ColumnValue::Color(b)) => a.cmp(b),
        _ => kind_violation(ColumnKind::Color, lhs, rhs),
    }
}

fn kind_violation(kind: ColumnKind, lhs: &ColumnValue, rhs: &ColumnValue) -> ! {
    panic!(
        "{kind} comparator received {} and {} values",
        lhs.kind(),
        rhs.kind()
    );
}

/// Comparators parallel to a schema: position `i` orders cells of column `i`.
#[derive(Clone)]
pub struct ComparatorRegistry {
    comparators: Vec<Comparator>,
}

impl fmt::Debug for ComparatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComparatorRegistry")
            .field("columns", &self.comparators.len())
            .finish()
    }
}

impl ComparatorRegistry {
    pub fn for_schema(schema: &[ColumnKind]) -> Self {
        Self {
            comparators: schema.iter().copied().map(comparator_for).collect(),
        }
    }

    pub fn get(&self, column: usize) -> Option<&Comparator> {
        self.comparators.get(column)
    }

    pub fn len(&self) -> usize {
        self.comparators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comparators.is_empty()
    }
}
