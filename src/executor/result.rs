//! Result types for query execution

use serde_json::{Map, Value as JsonValue};

use crate::dataset::Row;

/// Rows surviving a query, in output order
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    /// Dataset the rows came from
    pub dataset: String,
    /// Column names in header order
    pub columns: Vec<String>,
    /// Surviving rows, filtered and sorted
    pub rows: Vec<Row>,
    /// Number of rows loaded before filtering
    pub scanned_count: usize,
}

impl ExecutionResult {
    pub fn new(
        dataset: impl Into<String>,
        columns: Vec<String>,
        rows: Vec<Row>,
        scanned_count: usize,
    ) -> Self {
        Self {
            dataset: dataset.into(),
            columns,
            rows,
            scanned_count,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Serializes rows as JSON objects keyed by column name.
    ///
    /// Keys follow header order; for a duplicated header only the first
    /// column is emitted.
    pub fn records(&self) -> Vec<JsonValue> {
        self.rows.iter().map(|row| self.record(row)).collect()
    }

    fn record(&self, row: &Row) -> JsonValue {
        let mut object = Map::with_capacity(self.columns.len());
        for (position, name) in self.columns.iter().enumerate() {
            if !object.contains_key(name) {
                object.insert(name.clone(), row.get(position).to_json());
            }
        }
        JsonValue::Object(object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Value;
    use serde_json::json;

    #[test]
    fn test_records_render_nulls_and_types() {
        let result = ExecutionResult::new(
            "t.csv",
            vec!["age".into(), "name".into(), "ok".into()],
            vec![Row::new(vec![
                Value::Integer(30),
                Value::Null,
                Value::Boolean(true),
            ])],
            1,
        );
        assert_eq!(
            result.records(),
            vec![json!({"age": 30, "name": null, "ok": true})]
        );
    }

    #[test]
    fn test_duplicate_header_first_wins() {
        let result = ExecutionResult::new(
            "t.csv",
            vec!["a".into(), "a".into()],
            vec![Row::new(vec![Value::Integer(1), Value::Integer(2)])],
            1,
        );
        assert_eq!(result.records(), vec![json!({"a": 1})]);
    }

    #[test]
    fn test_empty_result() {
        let result = ExecutionResult::new("t.csv", vec!["a".into()], Vec::new(), 3);
        assert!(result.is_empty());
        assert_eq!(result.len(), 0);
        assert_eq!(result.scanned_count, 3);
    }
}
