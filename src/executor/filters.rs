//! Sequential filter pipeline
//!
//! Each expression is compiled against the schema and applied to the rows
//! that survived the previous one. The result equals the conjunction of
//! all filters, while a failure still names the filter that caused it.

use crate::dataset::Row;
use crate::expr::CompiledPredicate;
use crate::schema::Schema;

use super::errors::{ExecutorError, ExecutorResult};

/// Applies compiled filter predicates to rows
pub struct PredicateFilter;

impl PredicateFilter {
    /// Checks if a row satisfies a predicate
    pub fn matches(row: &Row, predicate: &CompiledPredicate) -> bool {
        predicate.evaluate(row)
    }

    /// Keeps the rows satisfying `predicate`, in their original order
    pub fn retain(rows: Vec<Row>, predicate: &CompiledPredicate) -> Vec<Row> {
        rows.into_iter()
            .filter(|row| Self::matches(row, predicate))
            .collect()
    }

    /// Runs every filter in order, each over the previous survivors
    pub fn apply_all(
        mut rows: Vec<Row>,
        filters: &[String],
        schema: &Schema,
    ) -> ExecutorResult<Vec<Row>> {
        for (index, expression) in filters.iter().enumerate() {
            let predicate = CompiledPredicate::compile(expression, schema).map_err(|reason| {
                ExecutorError::InvalidExpression {
                    index,
                    expression: expression.clone(),
                    reason,
                }
            })?;
            rows = Self::retain(rows, &predicate);
        }
        Ok(rows)
    }
}
