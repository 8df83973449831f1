//! Purpose: Compile an ordered list of sort policies into one row ordering.
//! Exports: `ColumnIndex`, `SortDirection`, `SortPolicy`, `RowOrder`, `compile_order`.
//! Role: The ordering engine; `Table::sort` hands its result to a stable sort.
//! Invariants: Every policy is bounds-checked before any `RowOrder` exists.
//! Invariants: The first non-equal key decides; a full tie compares `Equal`.
//! Invariants: A `RowOrder` borrows the registry and never outlives the sort call that built it.
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::compare::{Comparator, ComparatorRegistry};
use crate::core::error::{Error, ErrorKind};
use crate::core::value::ColumnValue;

/// Zero-based position of a column in a schema.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnIndex(usize);

impl ColumnIndex {
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub const fn get(self) -> usize {
        self.0
    }

    /// Returns the raw index only when it addresses one of `width` columns.
    pub fn within(self, width: usize) -> Option<usize> {
        (self.0 < width).then_some(self.0)
    }
}

impl From<usize> for ColumnIndex {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl fmt::Display for ColumnIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    #[serde(rename = "asc", alias = "ascending", alias = "ASC")]
    Ascending,
    #[serde(rename = "desc", alias = "descending", alias = "DESC")]
    Descending,
}

impl SortDirection {
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Ascending => f.write_str("asc"),
            SortDirection::Descending => f.write_str("desc"),
        }
    }
}

impl FromStr for SortDirection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" | "a" => Ok(SortDirection::Ascending),
            "desc" | "descending" | "d" => Ok(SortDirection::Descending),
            _ => Err(Error::new(ErrorKind::Usage)
                .with_message(format!("unknown sort direction `{s}`"))
                .with_hint("Use asc or desc.")),
        }
    }
}

/// One key of a lexicographic multi-key order.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct SortPolicy {
    pub column: ColumnIndex,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortPolicy {
    pub fn new(column: usize, direction: SortDirection) -> Self {
        Self {
            column: ColumnIndex::new(column),
            direction,
        }
    }

    pub fn asc(column: usize) -> Self {
        Self::new(column, SortDirection::Ascending)
    }

    pub fn desc(column: usize) -> Self {
        Self::new(column, SortDirection::Descending)
    }
}

impl fmt::Display for SortPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.column, self.direction)
    }
}

/// Parses `COL` or `COL:DIR`, e.g. `2`, `0:asc`, `1:desc`.
impl FromStr for SortPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (column, direction) = match s.split_once(':') {
            Some((column, direction)) => (column, direction.parse::<SortDirection>()?),
            None => (s, SortDirection::Ascending),
        };
        let column = column.trim().parse::<usize>().map_err(|err| {
            Error::new(ErrorKind::Usage)
                .with_message(format!("invalid sort column `{column}`"))
                .with_hint("Sort keys look like `0:asc` or `2:desc`.")
                .with_source(err)
        })?;
        Ok(SortPolicy::new(column, direction))
    }
}

#[derive(Clone, Copy)]
struct SortKey<'r> {
    column: usize,
    direction: SortDirection,
    compare: &'r Comparator,
}

/// Lexicographic row ordering compiled from a policy list.
#[derive(Clone)]
pub struct RowOrder<'r> {
    keys: Vec<SortKey<'r>>,
}

impl fmt::Debug for RowOrder<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(
                self.keys
                    .iter()
                    .map(|key| SortPolicy::new(key.column, key.direction)),
            )
            .finish()
    }
}

impl RowOrder<'_> {
    pub fn compare(&self, lhs: &[ColumnValue], rhs: &[ColumnValue]) -> Ordering {
        for key in &self.keys {
            let ordering = (key.compare)(&lhs[key.column], &rhs[key.column]);
            if ordering != Ordering::Equal {
                return key.direction.apply(ordering);
            }
        }
        Ordering::Equal
    }

    /// Strict "sorts before" predicate; false on a full tie.
    pub fn less_than(&self, lhs: &[ColumnValue], rhs: &[ColumnValue]) -> bool {
        self.compare(lhs, rhs) == Ordering::Less
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Builds the ordering for `policies`, rejecting the whole list if any
/// policy names a column the registry does not cover.
pub fn compile_order<'r>(
    policies: &[SortPolicy],
    registry: &'r ComparatorRegistry,
) -> Result<RowOrder<'r>, Error> {
    let mut keys = Vec::with_capacity(policies.len());
    for (position, policy) in policies.iter().enumerate() {
        let compare = policy
            .column
            .within(registry.len())
            .and_then(|column| registry.get(column))
            .ok_or_else(|| {
                Error::new(ErrorKind::SortPolicy)
                    .with_message(format!(
                        "sort column {} is out of range for {} columns",
                        policy.column,
                        registry.len()
                    ))
                    .with_policy(position)
                    .with_column(policy.column.get())
            })?;
        keys.push(SortKey {
            column: policy.column.get(),
            direction: policy.direction,
            compare,
        });
    }

    let dead = dead_tie_breakers(policies);
    if dead > 0 {
        tracing::debug!(dead, "sort policy list repeats columns; later keys never decide");
    }

    Ok(RowOrder { keys })
}

fn dead_tie_breakers(policies: &[SortPolicy]) -> usize {
    policies
        .iter()
        .enumerate()
        .filter(|(idx, policy)| {
            policies[..*idx]
                .iter()
                .any(|earlier| earlier.column == policy.column)
        })
        .count()
}
