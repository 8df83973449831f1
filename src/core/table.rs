//! Purpose: Own a fixed schema, its comparator registry, and the row collection.
//! Exports: `Table`.
//! Role: The only mutation surface of the core: append rows and reorder them in place.
//! Invariants: Every stored row has the schema's arity and per-column kinds.
//! Invariants: Failed appends and sorts leave rows and schema exactly as they were.
//! Invariants: Sorting is stable; rows tied on every key keep their prior relative order.
use crate::core::compare::ComparatorRegistry;
use crate::core::error::{Error, ErrorKind};
use crate::core::kind::ColumnKind;
use crate::core::order::{SortPolicy, compile_order};
use crate::core::render;
use crate::core::value::{ColumnValue, Row};

#[derive(Clone, Debug)]
pub struct Table {
    schema: Vec<ColumnKind>,
    comparators: ComparatorRegistry,
    rows: Vec<Row>,
}

impl Table {
    /// Creates an empty table. The schema is fixed for the table's lifetime
    /// and must name at least one column.
    pub fn new(schema: impl Into<Vec<ColumnKind>>) -> Result<Self, Error> {
        let schema = schema.into();
        if schema.is_empty() {
            return Err(Error::new(ErrorKind::Schema)
                .with_message("schema must declare at least one column"));
        }
        let comparators = ComparatorRegistry::for_schema(&schema);
        tracing::debug!(columns = schema.len(), "table created");
        Ok(Self {
            schema,
            comparators,
            rows: Vec::new(),
        })
    }

    pub fn schema(&self) -> &[ColumnKind] {
        &self.schema
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn comparators(&self) -> &ComparatorRegistry {
        &self.comparators
    }

    pub fn column_count(&self) -> usize {
        self.schema.len()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn append_row(&mut self, row: Row) -> Result<(), Error> {
        self.validate_row(&row)?;
        self.rows.push(row);
        tracing::debug!(rows = self.rows.len(), "row appended");
        Ok(())
    }

    /// Appends a batch of rows. Every row is checked before any is stored;
    /// errors carry the batch position of the first bad row.
    pub fn append_rows(&mut self, rows: impl IntoIterator<Item = Row>) -> Result<(), Error> {
        let rows: Vec<Row> = rows.into_iter().collect();
        for (position, row) in rows.iter().enumerate() {
            self.validate_row(row).map_err(|err| err.with_row(position))?;
        }
        let added = rows.len();
        self.rows.extend(rows);
        tracing::debug!(added, rows = self.rows.len(), "rows appended");
        Ok(())
    }

    /// Reorders rows by `policies`, first policy as the primary key.
    /// An empty list leaves the order untouched.
    pub fn sort(&mut self, policies: &[SortPolicy]) -> Result<(), Error> {
        let order = compile_order(policies, &self.comparators)?;
        if !order.is_empty() {
            self.rows.sort_by(|lhs, rhs| order.compare(lhs, rhs));
        }
        tracing::debug!(
            policies = policies.len(),
            rows = self.rows.len(),
            "table sorted"
        );
        Ok(())
    }

    pub fn render(&self, use_color: bool) -> String {
        render::render_rows(&self.schema, &self.rows, use_color)
    }

    fn validate_row(&self, row: &[ColumnValue]) -> Result<(), Error> {
        if row.len() != self.schema.len() {
            return Err(Error::new(ErrorKind::RowShape).with_message(format!(
                "row has {} values but the schema has {} columns",
                row.len(),
                self.schema.len()
            )));
        }
        for (column, (cell, expected)) in row.iter().zip(&self.schema).enumerate() {
            let found = cell.kind();
            if found.ordinal() != expected.ordinal() {
                return Err(Error::new(ErrorKind::RowKindMismatch)
                    .with_message("cell kind disagrees with its column")
                    .with_column(column)
                    .with_kinds(*expected, found));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Table;
    use crate::core::error::ErrorKind;
    use crate::core::kind::{Color, ColumnKind};
    use crate::core::order::SortPolicy;
    use crate::core::value::{ColumnValue, Row};

    fn row(name: &str, num: i64, flag: bool) -> Row {
        vec![name.into(), num.into(), flag.into()]
    }

    fn sample() -> Table {
        let mut table =
            Table::new([ColumnKind::String, ColumnKind::Integer, ColumnKind::Boolean]).unwrap();
        table
            .append_rows([
                row("aa", 3, true),
                row("bbb", 1, true),
                row("xx", 2, false),
                row("aa", 4, true),
                row("bbb", 0, false),
            ])
            .unwrap();
        table
    }

    #[test]
    fn empty_schema_is_rejected() {
        let err = Table::new(Vec::<ColumnKind>::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Schema);
    }

    #[test]
    fn registry_tracks_schema_width() {
        let table = Table::new([ColumnKind::Color, ColumnKind::Float]).unwrap();
        assert_eq!(table.comparators().len(), 2);
        assert_eq!(table.column_count(), 2);
        assert!(table.is_empty());
    }

    #[test]
    fn wrong_arity_is_a_shape_error() {
        let mut table = sample();
        let err = table.append_row(vec!["short".into()]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RowShape);
        assert_eq!(table.len(), 5);
    }

    #[test]
    fn wrong_cell_kind_names_the_column() {
        let mut table = sample();
        let err = table
            .append_row(vec!["a".into(), ColumnValue::Float(1.0), true.into()])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RowKindMismatch);
        assert_eq!(err.column(), Some(1));
        assert_eq!(err.expected(), Some(ColumnKind::Integer));
        assert_eq!(err.found(), Some(ColumnKind::Float));
    }

    #[test]
    fn batch_append_is_all_or_nothing() {
        let mut table = sample();
        let before = table.rows().to_vec();
        let err = table
            .append_rows([
                row("ok", 9, true),
                vec![Color::Red.into(), 1_i64.into(), false.into()],
            ])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RowKindMismatch);
        assert_eq!(err.row(), Some(1));
        assert_eq!(table.rows(), before.as_slice());
    }

    #[test]
    fn sort_by_first_column_keeps_ties_stable() {
        let mut table = sample();
        table.sort(&[SortPolicy::asc(0)]).unwrap();
        assert_eq!(
            table.rows(),
            &[
                row("aa", 3, true),
                row("aa", 4, true),
                row("bbb", 1, true),
                row("bbb", 0, false),
                row("xx", 2, false),
            ]
        );
    }

    #[test]
    fn sort_by_two_keys() {
        let mut table = sample();
        table
            .sort(&[SortPolicy::asc(2), SortPolicy::asc(1)])
            .unwrap();
        assert_eq!(
            table.rows(),
            &[
                row("bbb", 0, false),
                row("xx", 2, false),
                row("bbb", 1, true),
                row("aa", 3, true),
                row("aa", 4, true),
            ]
        );
    }

    #[test]
    fn rejected_sort_leaves_rows_untouched() {
        let mut table = sample();
        let before = table.rows().to_vec();
        let err = table
            .sort(&[SortPolicy::desc(1), SortPolicy::asc(7)])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SortPolicy);
        assert_eq!(err.policy(), Some(1));
        assert_eq!(table.rows(), before.as_slice());
    }

    #[test]
    fn colors_sort_descending_by_ordinal() {
        let mut table = Table::new([ColumnKind::Color, ColumnKind::Integer]).unwrap();
        for (color, num) in [(Color::Green, 1), (Color::Blue, 2), (Color::Red, 3)] {
            table.append_row(vec![color.into(), ColumnValue::Integer(num)]).unwrap();
        }
        table.sort(&[SortPolicy::desc(0)]).unwrap();
        let order: Vec<i64> = table
            .rows()
            .iter()
            .map(|row| match row[1] {
                ColumnValue::Integer(num) => num,
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(order, vec![2, 1, 3]);
    }
}
