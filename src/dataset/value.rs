//! Typed cell values and rows

use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDateTime;
use serde_json::Value as JsonValue;

/// Textual form used whenever a DateTime leaves the engine
pub const DATETIME_OUTPUT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

/// A single typed cell
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    DateTime(NaiveDateTime),
    Text(String),
    Null,
}

impl Value {
    /// Returns true for the Null marker
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Compares two non-null values of compatible types.
    ///
    /// Integer and Float compare numerically with promotion to f64.
    /// Returns None when either side is Null, the types are incompatible,
    /// or a float comparison involves NaN.
    pub fn partial_compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => Some(a.cmp(b)),
            (Value::Integer(a), Value::Float(b)) => (*a as f64).partial_cmp(b),
            (Value::Float(a), Value::Integer(b)) => a.partial_cmp(&(*b as f64)),
            (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
            (Value::Boolean(a), Value::Boolean(b)) => Some(a.cmp(b)),
            (Value::DateTime(a), Value::DateTime(b)) => Some(a.cmp(b)),
            (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// Total order used for sorting: Nulls after every non-null value.
    ///
    /// Floats use `total_cmp`, so NaN sorts after all finite values.
    pub fn sort_cmp(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Null, _) => Ordering::Greater,
            (_, Value::Null) => Ordering::Less,
            (Value::Float(a), Value::Float(b)) => a.total_cmp(b),
            (Value::Integer(a), Value::Float(b)) => (*a as f64).total_cmp(b),
            (Value::Float(a), Value::Integer(b)) => a.total_cmp(&(*b as f64)),
            (a, b) => a
                .partial_compare(b)
                .unwrap_or_else(|| a.rank().cmp(&b.rank())),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Value::Boolean(_) => 0,
            Value::Integer(_) | Value::Float(_) => 1,
            Value::DateTime(_) => 2,
            Value::Text(_) => 3,
            Value::Null => 4,
        }
    }

    /// Renders the value as a JSON primitive for output records
    pub fn to_json(&self) -> JsonValue {
        match self {
            Value::Integer(i) => JsonValue::from(*i),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            Value::Boolean(b) => JsonValue::Bool(*b),
            Value::DateTime(dt) => {
                JsonValue::String(dt.format(DATETIME_OUTPUT_FORMAT).to_string())
            }
            Value::Text(s) => JsonValue::String(s.clone()),
            Value::Null => JsonValue::Null,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(v) => write!(f, "{}", v),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::DateTime(dt) => write!(f, "{}", dt.format(DATETIME_OUTPUT_FORMAT)),
            Value::Text(s) => write!(f, "{}", s),
            Value::Null => write!(f, "null"),
        }
    }
}

/// A typed row, positionally aligned with its dataset's columns.
///
/// Every row of a load has exactly one value per column; missing cells
/// are `Value::Null`.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    values: Vec<Value>,
}

impl Row {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    /// Value at a column position (Null when out of range)
    pub fn get(&self, position: usize) -> &Value {
        self.values.get(position).unwrap_or(&Value::Null)
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
