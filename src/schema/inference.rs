//! Deterministic per-column type inference
//!
//! Rules are applied in [`InferredType::PRECEDENCE`] order; the first rule
//! satisfied by every non-null cell of a column decides its type. A column
//! with no non-null cells is Text.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::dataset::{Dataset, Row, Value};

use super::types::{ColumnSchema, InferredType, Schema};

/// Tokens accepted as Boolean true
pub const TRUE_TOKENS: &[&str] = &["true", "True", "TRUE"];

/// Tokens accepted as Boolean false
pub const FALSE_TOKENS: &[&str] = &["false", "False", "FALSE"];

/// Accepted date-time layouts, tried in order
const DATETIME_PATTERNS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Date-only layout (midnight)
const DATE_PATTERN: &str = "%Y-%m-%d";

/// Whole number: optional sign, ASCII digits only, fits in i64
pub fn parse_integer(cell: &str) -> Option<i64> {
    let s = cell.trim();
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Decimal number: optional sign, digits with optional fraction and
/// exponent. `inf` and `nan` spellings are rejected.
pub fn parse_float(cell: &str) -> Option<f64> {
    let s = cell.trim();
    let body = s.strip_prefix(['+', '-']).unwrap_or(s);
    let has_digit = body.bytes().any(|b| b.is_ascii_digit());
    let well_formed = body
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
    if !has_digit || !well_formed {
        return None;
    }
    s.parse().ok()
}

pub fn parse_boolean(cell: &str) -> Option<bool> {
    let s = cell.trim();
    if TRUE_TOKENS.contains(&s) {
        Some(true)
    } else if FALSE_TOKENS.contains(&s) {
        Some(false)
    } else {
        None
    }
}

/// Parses any accepted date/time layout. RFC 3339 values with an offset
/// are converted to UTC.
pub fn parse_datetime(cell: &str) -> Option<NaiveDateTime> {
    let s = cell.trim();
    for pattern in DATETIME_PATTERNS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, pattern) {
            return Some(dt);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, DATE_PATTERN) {
        return date.and_hms_opt(0, 0, 0);
    }
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.naive_utc())
}

/// Converts a raw cell under a column type. Returns Null when the cell is
/// null or does not satisfy the type's rule.
pub fn convert_cell(cell: Option<&str>, inferred_type: InferredType) -> Value {
    let Some(cell) = cell else {
        return Value::Null;
    };
    let converted = match inferred_type {
        InferredType::Integer => parse_integer(cell).map(Value::Integer),
        InferredType::Float => parse_float(cell).map(Value::Float),
        InferredType::Boolean => parse_boolean(cell).map(Value::Boolean),
        InferredType::DateTime => parse_datetime(cell).map(Value::DateTime),
        InferredType::Text => Some(Value::Text(cell.to_string())),
    };
    converted.unwrap_or(Value::Null)
}

fn satisfies(cell: &str, inferred_type: InferredType) -> bool {
    match inferred_type {
        InferredType::Integer => parse_integer(cell).is_some(),
        InferredType::Float => parse_float(cell).is_some(),
        InferredType::Boolean => parse_boolean(cell).is_some(),
        InferredType::DateTime => parse_datetime(cell).is_some(),
        InferredType::Text => true,
    }
}

/// Infers column types and materializes typed rows
pub struct SchemaInferencer;

impl SchemaInferencer {
    /// Infers one type per column of the dataset
    pub fn infer(dataset: &Dataset) -> Schema {
        let columns = dataset
            .columns()
            .iter()
            .map(|column| ColumnSchema {
                name: column.name.clone(),
                position: column.position,
                inferred_type: Self::infer_column(dataset.column_cells(column.position)),
            })
            .collect();
        Schema::new(columns)
    }

    /// Infers the type of a single column from its cells
    pub fn infer_column<'a, I>(cells: I) -> InferredType
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let non_null: Vec<&str> = cells.into_iter().flatten().collect();
        if non_null.is_empty() {
            return InferredType::Text;
        }

        InferredType::PRECEDENCE
            .into_iter()
            .find(|ty| non_null.iter().all(|cell| satisfies(cell, *ty)))
            .unwrap_or(InferredType::Text)
    }

    /// Converts every raw record into a typed row under `schema`
    pub fn materialize(dataset: &Dataset, schema: &Schema) -> Vec<Row> {
        dataset
            .records()
            .iter()
            .map(|cells| {
                let values = schema
                    .columns()
                    .iter()
                    .map(|column| {
                        let cell = cells.get(column.position).and_then(|c| c.as_deref());
                        convert_cell(cell, column.inferred_type)
                    })
                    .collect();
                Row::new(values)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::parse_delimited;

    fn infer(cells: &[Option<&str>]) -> InferredType {
        SchemaInferencer::infer_column(cells.iter().copied())
    }

    #[test]
    fn test_integer_rule() {
        assert_eq!(parse_integer("42"), Some(42));
        assert_eq!(parse_integer("-7"), Some(-7));
        assert_eq!(parse_integer("+3"), Some(3));
        assert_eq!(parse_integer("1.0"), None);
        assert_eq!(parse_integer("1e3"), None);
        assert_eq!(parse_integer("99999999999999999999"), None);
        assert_eq!(parse_integer("-"), None);
    }

    #[test]
    fn test_float_rule() {
        assert_eq!(parse_float("1.5"), Some(1.5));
        assert_eq!(parse_float("-2e3"), Some(-2000.0));
        assert_eq!(parse_float(".5"), Some(0.5));
        assert_eq!(parse_float("inf"), None);
        assert_eq!(parse_float("NaN"), None);
        assert_eq!(parse_float("1.2.3"), None);
        assert_eq!(parse_float("e"), None);
    }

    #[test]
    fn test_datetime_patterns() {
        assert!(parse_datetime("2024-01-31").is_some());
        assert!(parse_datetime("2024-01-31T10:20:30").is_some());
        assert!(parse_datetime("2024-01-31 10:20:30.250").is_some());
        assert!(parse_datetime("2024-01-31T10:20").is_some());
        assert!(parse_datetime("2024-01-31T10:20:30+02:00").is_some());
        assert!(parse_datetime("31/01/2024").is_none());
        assert!(parse_datetime("2024-13-01").is_none());
    }

    #[test]
    fn test_precedence() {
        assert_eq!(infer(&[Some("1"), Some("2")]), InferredType::Integer);
        assert_eq!(infer(&[Some("1"), Some("2.5")]), InferredType::Float);
        assert_eq!(infer(&[Some("true"), Some("False")]), InferredType::Boolean);
        assert_eq!(
            infer(&[Some("2024-01-01"), Some("2024-02-01 12:00:00")]),
            InferredType::DateTime
        );
        assert_eq!(infer(&[Some("1"), Some("x")]), InferredType::Text);
    }

    #[test]
    fn test_nulls_ignored_and_all_null_is_text() {
        assert_eq!(infer(&[None, Some("3"), None]), InferredType::Integer);
        assert_eq!(infer(&[None, None]), InferredType::Text);
        assert_eq!(infer(&[]), InferredType::Text);
    }

    #[test]
    fn test_zero_and_one_are_integers_not_booleans() {
        assert_eq!(infer(&[Some("0"), Some("1")]), InferredType::Integer);
    }

    #[test]
    fn test_infer_is_deterministic() {
        let ds = parse_delimited("t.csv", b"a,b,c\n1,x,true\n2,,false\n", b',').unwrap();
        let first = SchemaInferencer::infer(&ds);
        for _ in 0..50 {
            assert_eq!(SchemaInferencer::infer(&ds), first);
        }
        assert_eq!(
            first.column_types(),
            vec![
                ("a".to_string(), InferredType::Integer),
                ("b".to_string(), InferredType::Text),
                ("c".to_string(), InferredType::Boolean),
            ]
        );
    }

    #[test]
    fn test_materialize_keeps_every_column() {
        let ds = parse_delimited("t.csv", b"a,b\n1,x\n2\n", b',').unwrap();
        let schema = SchemaInferencer::infer(&ds);
        let rows = SchemaInferencer::materialize(&ds, &schema);

        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.len() == 2));
        assert_eq!(rows[0].get(0), &Value::Integer(1));
        assert_eq!(rows[1].get(1), &Value::Null);
    }
}
