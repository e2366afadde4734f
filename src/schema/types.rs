//! Inferred column types and per-dataset schemas

use std::fmt;

use serde::{Deserialize, Serialize};

/// Primitive type assigned to a column by inspecting its values.
///
/// Declaration order is the inference precedence: the first type whose
/// rule holds for every non-null cell wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InferredType {
    Integer,
    Float,
    Boolean,
    DateTime,
    Text,
}

impl InferredType {
    /// Precedence order used by the inferencer
    pub const PRECEDENCE: [InferredType; 5] = [
        InferredType::Integer,
        InferredType::Float,
        InferredType::Boolean,
        InferredType::DateTime,
        InferredType::Text,
    ];

    /// Returns the type name used in reports and error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            InferredType::Integer => "Integer",
            InferredType::Float => "Float",
            InferredType::Boolean => "Boolean",
            InferredType::DateTime => "DateTime",
            InferredType::Text => "Text",
        }
    }

    /// Returns true for Integer and Float
    pub fn is_numeric(&self) -> bool {
        matches!(self, InferredType::Integer | InferredType::Float)
    }
}

impl fmt::Display for InferredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

/// One column with its inferred type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSchema {
    pub name: String,
    pub position: usize,
    pub inferred_type: InferredType,
}

/// Ordered column types of one dataset load
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Schema {
    columns: Vec<ColumnSchema>,
}

impl Schema {
    pub fn new(columns: Vec<ColumnSchema>) -> Self {
        Self { columns }
    }

    /// Looks up a column by name; the first occurrence wins for duplicates
    pub fn column(&self, name: &str) -> Option<&ColumnSchema> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn columns(&self) -> &[ColumnSchema] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// `(name, type)` pairs in column order
    pub fn column_types(&self) -> Vec<(String, InferredType)> {
        self.columns
            .iter()
            .map(|c| (c.name.clone(), c.inferred_type))
            .collect()
    }
}
