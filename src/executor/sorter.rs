//! Multi-key row sorting
//!
//! Ascending only. Keys are compared in the order given and the first
//! unequal key decides; ties keep input order. Nulls sort after every
//! non-null value for each key.

use std::cmp::Ordering;

use crate::dataset::Row;
use crate::schema::Schema;

use super::errors::{ExecutorError, ExecutorResult};

/// Sorts rows by an ordered sequence of column keys
pub struct RowSorter;

impl RowSorter {
    /// Resolves sort key names to column positions.
    ///
    /// Fails on the first key the schema does not contain.
    pub fn resolve_keys(schema: &Schema, keys: &[String]) -> ExecutorResult<Vec<usize>> {
        keys.iter()
            .map(|key| {
                schema
                    .column(key)
                    .map(|c| c.position)
                    .ok_or_else(|| ExecutorError::InvalidSortKey(key.clone()))
            })
            .collect()
    }

    /// Stable ascending sort by the given column positions
    pub fn sort(rows: &mut [Row], positions: &[usize]) {
        rows.sort_by(|a, b| Self::compare_rows(a, b, positions));
    }

    /// Validates `keys` against `schema`, then sorts
    pub fn sort_by_names(
        mut rows: Vec<Row>,
        schema: &Schema,
        keys: &[String],
    ) -> ExecutorResult<Vec<Row>> {
        let positions = Self::resolve_keys(schema, keys)?;
        Self::sort(&mut rows, &positions);
        Ok(rows)
    }

    fn compare_rows(a: &Row, b: &Row, positions: &[usize]) -> Ordering {
        positions
            .iter()
            .map(|&p| a.get(p).sort_cmp(b.get(p)))
            .find(|ordering| *ordering != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{parse_delimited, Value};
    use crate::schema::SchemaInferencer;

    fn load(csv: &str) -> (Schema, Vec<Row>) {
        let ds = parse_delimited("t.csv", csv.as_bytes(), b',').unwrap();
        let schema = SchemaInferencer::infer(&ds);
        let rows = SchemaInferencer::materialize(&ds, &schema);
        (schema, rows)
    }

    fn column(rows: &[Row], position: usize) -> Vec<String> {
        rows.iter().map(|r| r.get(position).to_string()).collect()
    }

    #[test]
    fn test_sort_ascending() {
        let (schema, rows) = load("id,age\na,30\nb,20\nc,25\n");
        let sorted = RowSorter::sort_by_names(rows, &schema, &["age".into()]).unwrap();
        assert_eq!(column(&sorted, 0), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_sort_stable() {
        let (schema, rows) = load("id,age\na,25\nb,25\nc,25\n");
        let sorted = RowSorter::sort_by_names(rows, &schema, &["age".into()]).unwrap();
        assert_eq!(column(&sorted, 0), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_multi_key_first_unequal_decides() {
        let (schema, rows) = load("id,team,age\na,red,30\nb,blue,40\nc,red,20\nd,blue,40\n");
        let sorted =
            RowSorter::sort_by_names(rows, &schema, &["team".into(), "age".into()]).unwrap();
        assert_eq!(column(&sorted, 0), vec!["b", "d", "c", "a"]);
    }

    #[test]
    fn test_nulls_sort_last() {
        let (schema, rows) = load("id,score\na,\nb,2.5\nc,NA\nd,-1\n");
        let sorted = RowSorter::sort_by_names(rows, &schema, &["score".into()]).unwrap();
        assert_eq!(column(&sorted, 0), vec!["d", "b", "a", "c"]);
        assert_eq!(sorted[3].get(1), &Value::Null);
    }

    #[test]
    fn test_sort_text_and_datetime() {
        let (schema, rows) =
            load("name,at\ncharlie,2024-03-01\nalice,2023-01-01\nbob,2024-01-01\n");
        let by_name = RowSorter::sort_by_names(rows.clone(), &schema, &["name".into()]).unwrap();
        assert_eq!(column(&by_name, 0), vec!["alice", "bob", "charlie"]);

        let by_date = RowSorter::sort_by_names(rows, &schema, &["at".into()]).unwrap();
        assert_eq!(column(&by_date, 0), vec!["alice", "bob", "charlie"]);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let (schema, rows) = load("id,age\na,1\n");
        let err = RowSorter::sort_by_names(rows, &schema, &["age".into(), "missing_col".into()])
            .unwrap_err();
        assert_eq!(err, ExecutorError::InvalidSortKey("missing_col".into()));
    }
}
